#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! HSOS login form widget.
//! A Yew front end for a login/logout form whose credential checks are delegated to an
//! injected authentication provider (Firebase in the browser build).

pub mod core;
pub mod features;

pub use crate::core::auth::{
    AuthError, AuthErrorCode, AuthProvider, Credentials, Subscription, UserSession,
};
pub use crate::core::config::{FormText, HostAttributes, MissingConfigPolicy};
pub use crate::features::login_form::driver::{DriverHooks, FormDriver};
pub use crate::features::login_form::state::{FormView, LoginForm, WidgetState};

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod services;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
mod tests {
    use crate::{FormText, HostAttributes, LoginForm, WidgetState};

    #[test]
    fn host_text_flows_into_a_fresh_form() {
        let attrs = HostAttributes::from_pairs([("login-button-text", "Einloggen")]);
        let form = LoginForm::new(attrs.text, attrs.missing_config);
        assert_eq!(form.state(), WidgetState::Hidden);
        assert_eq!(form.text().login_button_text, "Einloggen");
        assert_eq!(form.text().password_header, FormText::default().password_header);
    }
}
