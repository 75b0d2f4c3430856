//! Runs the login form against an [`AuthProvider`].
//!
//! # Design
//! - One shared [`LoginForm`] per widget; borrows never span an `.await`.
//! - Every applied event publishes a fresh [`FormView`] and its diagnostics.
//! - Successful provider calls change nothing directly; the auth-state listener does.

use crate::core::auth::{AuthProvider, Subscription, UserSession};
use crate::features::login_form::actions::{AuthRequest, Diagnostic, FormEvent};
use crate::features::login_form::state::{FormView, LoginForm};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Callbacks the driver reports through.
#[derive(Clone)]
pub struct DriverHooks {
    render: Rc<dyn Fn(FormView)>,
    diagnostic: Rc<dyn Fn(&Diagnostic)>,
}

impl DriverHooks {
    /// Build hooks from a render sink and a diagnostic sink.
    pub fn new(
        render: impl Fn(FormView) + 'static,
        diagnostic: impl Fn(&Diagnostic) + 'static,
    ) -> Self {
        Self {
            render: Rc::new(render),
            diagnostic: Rc::new(diagnostic),
        }
    }
}

/// Event loop glue between the form state, the provider, and the renderer.
pub struct FormDriver<P: ?Sized> {
    form: Rc<RefCell<LoginForm>>,
    provider: Rc<P>,
    hooks: DriverHooks,
}

impl<P: ?Sized> Clone for FormDriver<P> {
    fn clone(&self) -> Self {
        Self {
            form: Rc::clone(&self.form),
            provider: Rc::clone(&self.provider),
            hooks: self.hooks.clone(),
        }
    }
}

impl<P: AuthProvider + ?Sized + 'static> FormDriver<P> {
    /// Wrap a form and provider.
    pub fn new(form: LoginForm, provider: Rc<P>, hooks: DriverHooks) -> Self {
        Self {
            form: Rc::new(RefCell::new(form)),
            provider,
            hooks,
        }
    }

    /// Register the auth-state listener. Keep the handle for the widget's lifetime.
    pub fn attach(&self) -> Subscription {
        let form = Rc::downgrade(&self.form);
        let hooks = self.hooks.clone();
        self.provider.subscribe(Rc::new(move |session: Option<UserSession>| {
            deliver(&form, &hooks, FormEvent::AuthStateChanged(session));
        }))
    }

    /// Apply an event synchronously and return the provider call it requests.
    pub fn dispatch(&self, event: FormEvent) -> Option<AuthRequest> {
        apply(&self.form, &self.hooks, event)
    }

    /// Apply an event and perform any provider call it requests.
    pub async fn handle(&self, event: FormEvent) {
        if let Some(request) = self.dispatch(event) {
            self.perform(request).await;
        }
    }

    async fn perform(&self, request: AuthRequest) {
        let failure = match request {
            AuthRequest::SignIn(credentials) => self
                .provider
                .sign_in(&credentials)
                .await
                .err()
                .map(FormEvent::SignInFailed),
            AuthRequest::SignOut => self
                .provider
                .sign_out()
                .await
                .err()
                .map(FormEvent::SignOutFailed),
        };
        if let Some(event) = failure {
            self.dispatch(event);
        }
    }

    /// Current render projection.
    #[must_use]
    pub fn view(&self) -> FormView {
        self.form.borrow().view()
    }
}

fn deliver(form: &Weak<RefCell<LoginForm>>, hooks: &DriverHooks, event: FormEvent) {
    if let Some(form) = form.upgrade() {
        apply(&form, hooks, event);
    }
}

fn apply(
    form: &RefCell<LoginForm>,
    hooks: &DriverHooks,
    event: FormEvent,
) -> Option<AuthRequest> {
    let (transition, view) = {
        let mut form = form.borrow_mut();
        let transition = form.apply(event);
        (transition, form.view())
    };
    for diagnostic in &transition.diagnostics {
        (hooks.diagnostic)(diagnostic);
    }
    (hooks.render)(view);
    transition.request
}
