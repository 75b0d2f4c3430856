//! Login form events and the side effects they request.
//!
//! # Design
//! - Events capture user intent and provider notifications separately from rendering.
//! - Applying an event never performs I/O; it returns a [`Transition`] describing it.

use crate::core::auth::{AuthError, Credentials, UserSession};
use crate::core::config::ConfigOutcome;

/// Inputs to the login form state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// The one-shot configuration load finished.
    ConfigLoaded(ConfigOutcome),
    /// Identifier input changed.
    EmailEdited(String),
    /// Secret input changed.
    PasswordEdited(String),
    /// Login control activated.
    LoginClicked,
    /// Logout control activated.
    LogoutClicked,
    /// Provider reported the current auth state.
    AuthStateChanged(Option<UserSession>),
    /// Provider rejected a sign-in.
    SignInFailed(AuthError),
    /// Provider rejected a sign-out.
    SignOutFailed(AuthError),
}

/// Provider call requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    /// Submit credentials.
    SignIn(Credentials),
    /// End the session.
    SignOut,
}

/// Severity of a diagnostic line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Routine state reports.
    Info,
    /// Recoverable configuration problems.
    Warn,
    /// Provider failures.
    Error,
}

/// Log line produced by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub level: DiagnosticLevel,
    /// Message text.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    pub(crate) fn warn(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            message: message.into(),
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
        }
    }
}

/// Effects of applying one event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Provider call to perform, if any.
    pub request: Option<AuthRequest>,
    /// Log lines to emit, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Transition {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    pub(crate) fn request(request: AuthRequest) -> Self {
        Self {
            request: Some(request),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn log(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Messages of every diagnostic, for assertions and logging.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .map(|diagnostic| diagnostic.message.as_str())
            .collect()
    }
}
