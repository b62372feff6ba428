use portal_core::model::SessionUser;
use storage::session_store::SessionStore;

use crate::Clock;
use crate::api::{LoginOutcome, PortalApi, SignupForm};
use crate::error::AccountError;

/// Sign-in, sign-up and the "signed in today" session rule.
#[derive(Clone)]
pub struct AccountService {
    clock: Clock,
    api: PortalApi,
    session: SessionStore,
}

impl AccountService {
    #[must_use]
    pub fn new(clock: Clock, api: PortalApi, session: SessionStore) -> Self {
        Self {
            clock,
            api,
            session,
        }
    }

    /// Sign in and remember the returned user.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::MissingFields` for a blank email or password.
    /// Returns `AccountError::Api` if the backend refuses the credentials.
    /// Returns `AccountError::Storage` if the user cannot be stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AccountError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        let outcome = self.api.login(email.trim(), password).await?;
        self.session.set_user(&outcome.user).await?;
        tracing::info!(username = %outcome.user.username, "signed in");
        Ok(outcome)
    }

    /// Create an account; `confirm_password` must repeat the password.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::MissingFields` or `AccountError::PasswordMismatch`
    /// before any request is made, and `AccountError::Api` if signup fails.
    pub async fn signup(
        &self,
        form: &SignupForm,
        confirm_password: &str,
    ) -> Result<String, AccountError> {
        let required = [&form.first_name, &form.last_name, &form.email];
        if required.iter().any(|value| value.trim().is_empty()) || form.password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        if form.password != confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        let message = self.api.signup(form).await?;
        tracing::info!(email = %form.email, "account created");
        Ok(message)
    }

    /// # Errors
    ///
    /// Returns `AccountError::Storage` if the stored user cannot be read.
    pub async fn current_user(&self) -> Result<Option<SessionUser>, AccountError> {
        Ok(self.session.user().await?)
    }

    /// True when a stored user last signed in on the current day.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Storage` if the stored user cannot be read.
    pub async fn has_active_session(&self) -> Result<bool, AccountError> {
        let today = self.clock.today();
        Ok(self
            .session
            .user()
            .await?
            .is_some_and(|user| user.logged_in_on(today)))
    }

    /// Returns the stored user if their session is still fresh.
    ///
    /// A user who signed in on an earlier day is forgotten.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Storage` if the store cannot be read or updated.
    pub async fn enforce_session(&self) -> Result<Option<SessionUser>, AccountError> {
        let Some(user) = self.session.user().await? else {
            return Ok(None);
        };
        if user.logged_in_on(self.clock.today()) {
            return Ok(Some(user));
        }
        tracing::info!(username = %user.username, "session expired");
        self.session.forget_user().await?;
        Ok(None)
    }

    /// # Errors
    ///
    /// Returns `AccountError::Storage` if the store cannot be cleared.
    pub async fn logout(&self) -> Result<(), AccountError> {
        self.session.clear().await?;
        tracing::info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portal_core::time::fixed_clock;
    use serde_json::json;
    use storage::repository::InMemoryStore;

    use super::*;
    use crate::api::{ApiFailure, Endpoints, ScriptedTransport};

    fn service(transport: Arc<ScriptedTransport>) -> (AccountService, SessionStore) {
        let endpoints = Endpoints::parse("https://api.example.test").unwrap();
        let api = PortalApi::new(transport, endpoints);
        let session = SessionStore::new(Arc::new(InMemoryStore::new()));
        (AccountService::new(fixed_clock(), api, session.clone()), session)
    }

    fn user(last_login: &str) -> SessionUser {
        SessionUser {
            username: "ada".into(),
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            last_login: Some(last_login.into()),
        }
    }

    #[tokio::test]
    async fn blank_credentials_skip_the_request() {
        let transport = Arc::new(ScriptedTransport::new());
        let (service, _) = service(Arc::clone(&transport));
        let err = service.login("  ", "secret").await.unwrap_err();
        assert!(matches!(err, AccountError::MissingFields));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_login_keeps_server_message() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_json(
            "professional-login",
            json!({"success": false, "message": "Invalid credentials"}),
        );
        let (service, session) = service(Arc::clone(&transport));
        let err = service.login("ada@example.com", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(session.user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn signup_checks_password_confirmation() {
        let transport = Arc::new(ScriptedTransport::new());
        let (service, _) = service(Arc::clone(&transport));
        let form = SignupForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "one".into(),
        };
        let err = service.signup(&form, "two").await.unwrap_err();
        assert!(matches!(err, AccountError::PasswordMismatch));
        assert!(transport.requests().is_empty());

        transport.fail("professional-signup", ApiFailure::HttpStatus(500));
        let err = service.signup(&form, "one").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP Error 500");
    }

    #[tokio::test]
    async fn stale_sessions_are_forgotten() {
        let (service, session) = service(Arc::new(ScriptedTransport::new()));
        session.set_user(&user("13-11-2023")).await.unwrap();
        assert!(!service.has_active_session().await.unwrap());
        assert!(service.enforce_session().await.unwrap().is_none());
        assert!(session.user().await.unwrap().is_none());

        session.set_user(&user("14-11-2023")).await.unwrap();
        assert!(service.has_active_session().await.unwrap());
        assert_eq!(
            service.enforce_session().await.unwrap().map(|u| u.username),
            Some("ada".to_owned())
        );
    }
}
