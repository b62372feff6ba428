use std::time::Duration;

use dioxus::prelude::*;
use portal_core::model::ToastId;
use services::toast::DEFAULT_AUTO_HIDE;
use services::{Clock, Notice, Toast, ToastQueue};

/// Handle on the shared toast queue, provided through context.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    queue: Signal<ToastQueue>,
}

impl Toaster {
    #[must_use]
    pub fn new(queue: Signal<ToastQueue>) -> Self {
        Self { queue }
    }

    pub fn notify(&self, notice: Notice) -> ToastId {
        let mut queue = self.queue;
        let id = queue.write().push(notice);
        id
    }

    pub fn notify_all(&self, notices: impl IntoIterator<Item = Notice>) {
        let mut queue = self.queue;
        queue.write().extend(notices);
    }

    pub fn success(&self, text: impl Into<String>) -> ToastId {
        self.notify(Notice::success(text))
    }

    pub fn error(&self, text: impl Into<String>) -> ToastId {
        self.notify(Notice::error(text))
    }

    pub fn info(&self, text: impl Into<String>) -> ToastId {
        self.notify(Notice::info(text))
    }

    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut queue = self.queue;
        let removed = queue.write().dismiss(id);
        removed
    }

    #[must_use]
    pub fn auto_hide(&self) -> Duration {
        self.queue.read().auto_hide()
    }

    /// Current toasts, newest first. Reading subscribes the caller.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.queue.read().toasts().to_vec()
    }
}

/// Install an empty toast queue for this scope and everything below it.
pub fn use_toaster_provider(clock: Clock) -> Toaster {
    use_context_provider(|| Toaster::new(Signal::new(ToastQueue::new(clock, DEFAULT_AUTO_HIDE))))
}

#[must_use]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}
