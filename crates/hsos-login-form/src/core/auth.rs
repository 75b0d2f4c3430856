//! Authentication primitives and the provider capability the form talks to.
//!
//! # Design
//! - The provider is injected, never looked up globally, so tests can swap in a fake.
//! - Keep session data opaque: the form reads it but never validates or persists it.
//! - Error classification is parsed once; presentation goes through [`MessagePolicy`].

use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Authenticated-user record supplied by the provider on each auth-state change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSession {
    /// Provider-assigned user identifier.
    pub uid: Option<String>,
    /// Email address the user signed in with.
    pub email: Option<String>,
}

impl UserSession {
    /// Session for a user identified only by email.
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            uid: None,
            email: Some(email.into()),
        }
    }

    /// Label used in diagnostics; falls back to the uid when no email is known.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .or(self.uid.as_deref())
            .unwrap_or("unknown")
    }
}

/// Identifier/secret pair submitted to the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Identifier (email) value.
    pub email: String,
    /// Secret (password) value.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Provider error classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthErrorCode {
    /// `auth/invalid-email`
    InvalidEmail,
    /// `auth/wrong-password`
    WrongPassword,
    /// `auth/user-not-found`
    UserNotFound,
    /// `auth/user-disabled`
    UserDisabled,
    /// `auth/too-many-requests`
    TooManyRequests,
    /// `auth/network-request-failed`
    NetworkRequestFailed,
    /// Any classification without a dedicated variant.
    Other(String),
}

impl AuthErrorCode {
    /// Parse the provider's classification string.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/user-not-found" => Self::UserNotFound,
            "auth/user-disabled" => Self::UserDisabled,
            "auth/too-many-requests" => Self::TooManyRequests,
            "auth/network-request-failed" => Self::NetworkRequestFailed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Classification string as reported by the provider.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::WrongPassword => "auth/wrong-password",
            Self::UserNotFound => "auth/user-not-found",
            Self::UserDisabled => "auth/user-disabled",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::NetworkRequestFailed => "auth/network-request-failed",
            Self::Other(code) => code,
        }
    }

    /// How the message for this classification is presented to the user.
    #[must_use]
    pub const fn message_policy(&self) -> MessagePolicy {
        match self {
            Self::InvalidEmail
            | Self::WrongPassword
            | Self::UserNotFound
            | Self::UserDisabled
            | Self::TooManyRequests
            | Self::NetworkRequestFailed
            | Self::Other(_) => MessagePolicy::Verbatim,
        }
    }
}

/// Transform applied to a provider message before it reaches the message area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessagePolicy {
    /// Show the provider message unchanged.
    Verbatim,
}

impl MessagePolicy {
    /// Produce the message-area text for a provider message.
    #[must_use]
    pub fn render(self, message: &str) -> String {
        match self {
            Self::Verbatim => message.to_string(),
        }
    }
}

/// Error reported by the authentication provider.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    /// Provider classification.
    pub code: AuthErrorCode,
    /// Human-readable provider message.
    pub message: String,
}

impl AuthError {
    /// Build an error from the provider's raw `{code, message}` pair.
    #[must_use]
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: AuthErrorCode::parse(code),
            message: message.into(),
        }
    }

    /// Text shown in the message area for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.code.message_policy().render(&self.message)
    }
}

/// Listener invoked with the provider's current auth state.
pub type AuthListener = Rc<dyn Fn(Option<UserSession>)>;

/// Registration handle returned by [`AuthProvider::subscribe`].
///
/// Dropping the handle cancels the registration.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a cancellation routine.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle that has nothing to cancel.
    pub fn detached() -> Self {
        Self { cancel: None }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Authentication backend capability.
///
/// Implementations must invoke a new listener once with the current state and again
/// after every sign-in or sign-out for as long as the [`Subscription`] lives.
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Register an auth-state listener.
    fn subscribe(&self, listener: AuthListener) -> Subscription;

    /// Submit credentials.
    ///
    /// # Errors
    /// Returns the provider's classified error when the sign-in is rejected.
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserSession, AuthError>;

    /// End the current session.
    ///
    /// # Errors
    /// Returns the provider's classified error when the sign-out fails.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::{AuthError, AuthErrorCode, Credentials, MessagePolicy, Subscription, UserSession};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn known_codes_round_trip_through_parse() {
        for code in [
            "auth/invalid-email",
            "auth/wrong-password",
            "auth/user-not-found",
            "auth/user-disabled",
            "auth/too-many-requests",
            "auth/network-request-failed",
        ] {
            let parsed = AuthErrorCode::parse(code);
            assert!(!matches!(parsed, AuthErrorCode::Other(_)), "{code}");
            assert_eq!(parsed.as_str(), code);
        }
        assert_eq!(
            AuthErrorCode::parse("auth/operation-not-allowed"),
            AuthErrorCode::Other("auth/operation-not-allowed".to_string())
        );
    }

    #[test]
    fn every_classification_shows_provider_message_verbatim() {
        let message = "The password is invalid or the user does not have a password.";
        for code in ["auth/wrong-password", "auth/user-not-found", "auth/whatever"] {
            let err = AuthError::new(code, message);
            assert_eq!(err.code.message_policy(), MessagePolicy::Verbatim);
            assert_eq!(err.user_message(), message);
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials {
            email: "a@b.de".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("a@b.de"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn display_name_prefers_email() {
        assert_eq!(UserSession::with_email("x@y.org").display_name(), "x@y.org");
        let uid_only = UserSession {
            uid: Some("u-1".to_string()),
            email: None,
        };
        assert_eq!(uid_only.display_name(), "u-1");
        assert_eq!(UserSession::default().display_name(), "unknown");
    }

    #[test]
    fn dropping_subscription_runs_cancel_once() {
        let cancelled = Rc::new(Cell::new(0));
        {
            let cancelled = Rc::clone(&cancelled);
            let _sub = Subscription::new(move || cancelled.set(cancelled.get() + 1));
        }
        assert_eq!(cancelled.get(), 1);
        drop(Subscription::detached());
        assert_eq!(cancelled.get(), 1);
    }
}
