use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day format the backend uses for `lastLogin`.
pub const LAST_LOGIN_FORMAT: &str = "%d-%m-%Y";

/// The signed-in professional as returned by the login endpoint and cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(rename = "lastLogin", default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl SessionUser {
    /// Parses `lastLogin`; `None` when absent or malformed.
    #[must_use]
    pub fn last_login_date(&self) -> Option<NaiveDate> {
        let raw = self.last_login.as_deref()?;
        NaiveDate::parse_from_str(raw.trim(), LAST_LOGIN_FORMAT).ok()
    }

    /// True when the user last signed in on `day`.
    #[must_use]
    pub fn logged_in_on(&self, day: NaiveDate) -> bool {
        self.last_login_date() == Some(day)
    }

    /// Short form shown in the sidebar, e.g. `A. Lovelace`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let initial = self.first_name.trim().chars().next();
        let last = self.last_name.trim();
        match (initial, last.is_empty()) {
            (Some(initial), false) => format!("{}. {last}", initial.to_uppercase()),
            (Some(_), true) => self.first_name.trim().to_owned(),
            (None, false) => last.to_owned(),
            (None, true) => self.username.clone(),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_owned()
    }
}
