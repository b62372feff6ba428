//! Transient notifications shown over every screen.

use std::time::Duration;

use chrono::{DateTime, Utc};
use portal_core::model::ToastId;

use crate::Clock;

/// How long a toast stays up unless closed earlier.
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastSeverity {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastSeverity {
    /// CSS modifier used by the toast host.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ToastSeverity::Success => "toast--success",
            ToastSeverity::Error => "toast--error",
            ToastSeverity::Info => "toast--info",
            ToastSeverity::Warning => "toast--warning",
        }
    }
}

/// A message a service wants surfaced, before it becomes a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: ToastSeverity,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(ToastSeverity::Success, text)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ToastSeverity::Error, text)
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(ToastSeverity::Info, text)
    }

    fn new(severity: ToastSeverity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub severity: ToastSeverity,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

/// Visible toasts, newest first. Each rendered toast schedules its own
/// removal after `auto_hide`; closing it by hand goes through the same
/// `dismiss`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastQueue {
    clock: Clock,
    auto_hide: Duration,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Clock::default(), DEFAULT_AUTO_HIDE)
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new(clock: Clock, auto_hide: Duration) -> Self {
        Self {
            clock,
            auto_hide,
            toasts: Vec::new(),
        }
    }

    #[must_use]
    pub fn auto_hide(&self) -> Duration {
        self.auto_hide
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn show(&mut self, text: impl Into<String>, severity: ToastSeverity) -> ToastId {
        let toast = Toast {
            id: ToastId::generate(),
            severity,
            text: text.into(),
            shown_at: self.clock.now(),
        };
        let id = toast.id;
        tracing::debug!(%id, ?severity, text = %toast.text, "toast shown");
        self.toasts.insert(0, toast);
        id
    }

    pub fn push(&mut self, notice: Notice) -> ToastId {
        self.show(notice.text, notice.severity)
    }

    /// Shows every notice in order; the last one ends up on top.
    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) -> Vec<ToastId> {
        notices.into_iter().map(|notice| self.push(notice)).collect()
    }

    /// Removes a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }
}
