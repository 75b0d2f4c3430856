//! Login form component.
//!
//! # Design
//! - Every attribute is read from the driver's [`FormView`]; nothing toggles the DOM directly.
//! - The message is rendered as text so provider messages cannot inject markup.
//! - Subscription and configuration fetch start on mount; the subscription ends on unmount.

use crate::core::auth::AuthProvider;
use crate::core::config::HostAttributes;
use crate::features::login_form::actions::{Diagnostic, DiagnosticLevel, FormEvent};
use crate::features::login_form::driver::{DriverHooks, FormDriver};
use crate::features::login_form::state::{FormView, LoginForm, WidgetState};
use crate::services::config::load_config;
use gloo::console;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

/// Shared provider handle; props compare by identity.
#[derive(Clone)]
pub(crate) struct ProviderHandle(pub(crate) Rc<dyn AuthProvider>);

impl PartialEq for ProviderHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LoginFormProps {
    pub(crate) provider: ProviderHandle,
    pub(crate) host: HostAttributes,
}

#[function_component(LoginFormWidget)]
pub(crate) fn login_form_widget(props: &LoginFormProps) -> Html {
    let view = {
        let host = props.host.clone();
        use_state(move || LoginForm::new(host.text, host.missing_config).view())
    };
    let driver = {
        let view = view.clone();
        let provider = Rc::clone(&props.provider.0);
        let host = props.host.clone();
        use_memo(
            move |_| {
                let form = LoginForm::new(host.text, host.missing_config);
                let hooks = DriverHooks::new(move |next| view.set(next), log_diagnostic);
                FormDriver::new(form, provider, hooks)
            },
            (),
        )
    };

    {
        let driver = Rc::clone(&driver);
        let config_file = props.host.config_file.clone();
        use_effect_with_deps(
            move |_| {
                let subscription = driver.attach();
                let loader = (*driver).clone();
                spawn_local(async move {
                    let outcome = load_config(&config_file).await;
                    loader.dispatch(FormEvent::ConfigLoaded(outcome));
                });
                move || drop(subscription)
            },
            (),
        );
    }

    let on_email = {
        let driver = Rc::clone(&driver);
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                driver.dispatch(FormEvent::EmailEdited(input.value()));
            }
        })
    };
    let on_password = {
        let driver = Rc::clone(&driver);
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                driver.dispatch(FormEvent::PasswordEdited(input.value()));
            }
        })
    };
    let on_login = spawn_event(&driver, FormEvent::LoginClicked);
    let on_logout = spawn_event(&driver, FormEvent::LogoutClicked);

    let current: FormView = (*view).clone();
    html! {
        <div
            class={classes!("hsos-login-form", "grid", "gap-2")}
            hidden={current.hidden}
            data-state={state_name(current.state)}>
            <label class="form-control gap-1">
                <span class="label-text">{current.text.user_name_header.clone()}</span>
                <input
                    id="inputEmail"
                    class={classes!("input", "input-bordered", current.email_invalid.then_some("input-error"))}
                    type="email"
                    required=true
                    placeholder={current.text.user_value_placeholder.clone()}
                    value={current.email.clone()}
                    disabled={current.inputs_disabled}
                    aria-invalid={aria_flag(current.email_invalid)}
                    oninput={on_email} />
            </label>
            <label class="form-control gap-1">
                <span class="label-text">{current.text.password_header.clone()}</span>
                <input
                    id="inputPassword"
                    class={classes!("input", "input-bordered", current.password_invalid.then_some("input-error"))}
                    type="password"
                    required=true
                    placeholder={current.text.password_value_placeholder.clone()}
                    value={current.password.clone()}
                    disabled={current.inputs_disabled}
                    aria-invalid={aria_flag(current.password_invalid)}
                    oninput={on_password} />
            </label>
            <div id="message" class="text-sm text-error" role="alert">
                {current.message.clone().unwrap_or_default()}
            </div>
            <div class="flex gap-2">
                <button
                    id="btnLogin"
                    class="btn btn-primary"
                    onclick={on_login}
                    disabled={current.login_disabled}>
                    {current.text.login_button_text.clone()}
                </button>
                <button
                    id="btnLogout"
                    class="btn btn-primary"
                    onclick={on_logout}
                    hidden={current.logout_hidden}>
                    {current.text.logout_button_text.clone()}
                </button>
            </div>
        </div>
    }
}

fn spawn_event(driver: &Rc<FormDriver<dyn AuthProvider>>, event: FormEvent) -> Callback<MouseEvent> {
    let driver = Rc::clone(driver);
    Callback::from(move |_| {
        let driver = (*driver).clone();
        let event = event.clone();
        spawn_local(async move { driver.handle(event).await });
    })
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    let message = diagnostic.message.clone();
    match diagnostic.level {
        DiagnosticLevel::Info => console::log!(message),
        DiagnosticLevel::Warn => console::warn!(message),
        DiagnosticLevel::Error => console::error!(message),
    }
}

const fn state_name(state: WidgetState) -> &'static str {
    match state {
        WidgetState::Hidden => "hidden",
        WidgetState::AwaitingAuth => "awaiting-auth",
        WidgetState::LoggedOut => "logged-out",
        WidgetState::LoggedIn => "logged-in",
    }
}

const fn aria_flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
