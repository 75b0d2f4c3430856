//! Login form state machine.
//!
//! # Design
//! - Visibility and auth status are stored separately; [`WidgetState`] is derived.
//! - Rendered attributes come only from [`LoginForm::view`], so the DOM cannot drift
//!   from the last provider report.
//! - The provider's auth-state callback is the single source of truth for sign-in.

use crate::core::auth::{AuthError, Credentials, UserSession};
use crate::core::config::{ConfigOutcome, FormText, MissingConfigPolicy};
use crate::features::login_form::actions::{AuthRequest, Diagnostic, FormEvent, Transition};
use crate::features::login_form::logic::{FieldValidity, validate_email, validate_password};

/// Observable widget state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    /// Configuration has not resolved; nothing is shown.
    Hidden,
    /// Visible, but the provider has not reported yet.
    AwaitingAuth,
    /// Visible with no authenticated user.
    LoggedOut,
    /// Visible with an authenticated user.
    LoggedIn,
}

/// Last auth status reported by the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// No report received yet.
    #[default]
    Unknown,
    /// Provider reported no user.
    SignedOut,
    /// Provider reported an authenticated user.
    SignedIn(UserSession),
}

impl SessionStatus {
    /// Whether a user is authenticated.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

/// Most recent user-initiated actions awaiting provider confirmation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionIntent {
    /// Login was clicked and not yet confirmed or rejected.
    pub login: bool,
    /// Logout was clicked and not yet confirmed or rejected.
    pub logout: bool,
}

impl InteractionIntent {
    fn take_login(&mut self) -> bool {
        std::mem::take(&mut self.login)
    }

    fn take_logout(&mut self) -> bool {
        std::mem::take(&mut self.logout)
    }
}

/// Render-ready projection of [`LoginForm`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    /// Derived widget state.
    pub state: WidgetState,
    /// Whether the host element is hidden.
    pub hidden: bool,
    /// Display strings.
    pub text: FormText,
    /// Identifier input value.
    pub email: String,
    /// Secret input value.
    pub password: String,
    /// Whether both inputs are disabled.
    pub inputs_disabled: bool,
    /// Whether the identifier input shows its invalid indicator.
    pub email_invalid: bool,
    /// Whether the secret input shows its invalid indicator.
    pub password_invalid: bool,
    /// Whether the login button is disabled.
    pub login_disabled: bool,
    /// Whether the logout button is hidden.
    pub logout_hidden: bool,
    /// Message area text.
    pub message: Option<String>,
}

/// Login form aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginForm {
    text: FormText,
    missing_config: MissingConfigPolicy,
    config_resolved: bool,
    revealed: bool,
    session: SessionStatus,
    intent: InteractionIntent,
    email: String,
    password: String,
    email_validity: FieldValidity,
    password_validity: FieldValidity,
    message: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(FormText::default(), MissingConfigPolicy::default())
    }
}

impl LoginForm {
    /// Hidden form with the given host/default text.
    #[must_use]
    pub fn new(text: FormText, missing_config: MissingConfigPolicy) -> Self {
        Self {
            text,
            missing_config,
            config_resolved: false,
            revealed: false,
            session: SessionStatus::Unknown,
            intent: InteractionIntent::default(),
            email: String::new(),
            password: String::new(),
            email_validity: FieldValidity::Unchecked,
            password_validity: FieldValidity::Unchecked,
            message: None,
        }
    }

    /// Derived widget state.
    #[must_use]
    pub const fn state(&self) -> WidgetState {
        if !self.revealed {
            return WidgetState::Hidden;
        }
        match self.session {
            SessionStatus::Unknown => WidgetState::AwaitingAuth,
            SessionStatus::SignedOut => WidgetState::LoggedOut,
            SessionStatus::SignedIn(_) => WidgetState::LoggedIn,
        }
    }

    /// Last provider report.
    #[must_use]
    pub const fn session(&self) -> &SessionStatus {
        &self.session
    }

    /// Pending interaction intents.
    #[must_use]
    pub const fn intent(&self) -> InteractionIntent {
        self.intent
    }

    /// Current display strings.
    #[must_use]
    pub const fn text(&self) -> &FormText {
        &self.text
    }

    /// Project the state into render attributes.
    #[must_use]
    pub fn view(&self) -> FormView {
        let signed_in = self.session.is_signed_in();
        FormView {
            state: self.state(),
            hidden: !self.revealed,
            text: self.text.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            inputs_disabled: signed_in,
            email_invalid: self.email_validity.is_invalid(),
            password_invalid: self.password_validity.is_invalid(),
            login_disabled: signed_in,
            logout_hidden: !signed_in,
            message: self.message.clone(),
        }
    }

    /// Apply one event.
    pub fn apply(&mut self, event: FormEvent) -> Transition {
        match event {
            FormEvent::ConfigLoaded(outcome) => self.configure(outcome),
            FormEvent::EmailEdited(value) => {
                if !self.session.is_signed_in() {
                    self.email = value;
                    self.email_validity = FieldValidity::Unchecked;
                }
                Transition::none()
            }
            FormEvent::PasswordEdited(value) => {
                if !self.session.is_signed_in() {
                    self.password = value;
                    self.password_validity = FieldValidity::Unchecked;
                }
                Transition::none()
            }
            FormEvent::LoginClicked => self.login(),
            FormEvent::LogoutClicked => self.logout(),
            FormEvent::AuthStateChanged(session) => self.auth_state_changed(session),
            FormEvent::SignInFailed(err) => {
                self.intent.login = false;
                self.handle_error(&err)
            }
            FormEvent::SignOutFailed(err) => {
                self.intent.logout = false;
                self.handle_error(&err)
            }
        }
    }

    fn configure(&mut self, outcome: ConfigOutcome) -> Transition {
        let mut transition = Transition::none();
        if self.config_resolved {
            return transition;
        }
        self.config_resolved = true;
        match outcome {
            ConfigOutcome::Applied(section) => {
                let applied = self.text.apply(&section);
                transition.log(Diagnostic::info(format!(
                    "Login form configuration applied ({applied} overrides)."
                )));
                self.revealed = true;
            }
            ConfigOutcome::MissingSection => {
                transition.log(Diagnostic::warn(
                    "Login form configuration has no hsosLoginForm section.",
                ));
                self.reveal_on_fallback(&mut transition);
            }
            ConfigOutcome::Failed(err) => {
                transition.log(Diagnostic::warn(format!(
                    "Login form configuration unavailable: {err}"
                )));
                self.reveal_on_fallback(&mut transition);
            }
        }
        transition
    }

    fn reveal_on_fallback(&mut self, transition: &mut Transition) {
        match self.missing_config {
            MissingConfigPolicy::StayHidden => {
                transition.log(Diagnostic::warn("Login form stays hidden."));
            }
            MissingConfigPolicy::RevealDefaults => {
                self.revealed = true;
                transition.log(Diagnostic::info("Login form shown with default text."));
            }
        }
    }

    fn login(&mut self) -> Transition {
        if self.session.is_signed_in() {
            return Transition::none();
        }
        self.message = None;
        self.email_validity = validate_email(&self.email);
        self.password_validity = validate_password(&self.password);
        if self.email_validity.is_invalid() || self.password_validity.is_invalid() {
            return Transition::none();
        }
        self.intent.login = true;
        Transition::request(AuthRequest::SignIn(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }))
    }

    fn logout(&mut self) -> Transition {
        if !self.session.is_signed_in() {
            return Transition::none();
        }
        self.intent.logout = true;
        Transition::request(AuthRequest::SignOut)
    }

    fn auth_state_changed(&mut self, session: Option<UserSession>) -> Transition {
        let mut transition = Transition::none();
        if let Some(user) = session {
            transition.log(Diagnostic::info(format!(
                "User with email >{}< signed in.",
                user.display_name()
            )));
            self.email.clear();
            self.password.clear();
            self.email_validity = FieldValidity::Unchecked;
            self.password_validity = FieldValidity::Unchecked;
            self.session = SessionStatus::SignedIn(user);
            if self.intent.take_login() {
                transition.log(Diagnostic::info("User successfully signed in."));
            }
        } else {
            transition.log(Diagnostic::info("No user signed in."));
            self.session = SessionStatus::SignedOut;
            if self.intent.take_logout() {
                transition.log(Diagnostic::info("User successfully signed out."));
            }
        }
        transition
    }

    fn handle_error(&mut self, err: &AuthError) -> Transition {
        let message = err.user_message();
        let mut transition = Transition::none();
        transition.log(Diagnostic::error(format!(
            "{message} ({})",
            err.code.as_str()
        )));
        self.message = Some(message);
        transition
    }
}
