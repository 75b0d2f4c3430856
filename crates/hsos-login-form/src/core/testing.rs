//! Scripted in-memory provider used by unit tests.

use crate::core::auth::{
    AuthError, AuthListener, AuthProvider, Credentials, Subscription, UserSession,
};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type Listeners = Rc<RefCell<Vec<(usize, AuthListener)>>>;

/// Provider double that records calls and notifies listeners synchronously.
#[derive(Default)]
pub(crate) struct FakeAuthProvider {
    listeners: Listeners,
    next_id: Cell<usize>,
    current: RefCell<Option<UserSession>>,
    sign_in_results: RefCell<VecDeque<Result<UserSession, AuthError>>>,
    sign_out_results: RefCell<VecDeque<Result<(), AuthError>>>,
    sign_in_calls: RefCell<Vec<Credentials>>,
    sign_out_calls: Cell<usize>,
}

impl FakeAuthProvider {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn fail_next_sign_in(&self, code: &str, message: &str) {
        self.sign_in_results
            .borrow_mut()
            .push_back(Err(AuthError::new(code, message)));
    }

    pub(crate) fn fail_next_sign_out(&self, code: &str, message: &str) {
        self.sign_out_results
            .borrow_mut()
            .push_back(Err(AuthError::new(code, message)));
    }

    pub(crate) fn sign_in_calls(&self) -> Vec<Credentials> {
        self.sign_in_calls.borrow().clone()
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.get()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Push a state change as if it came from outside the widget.
    pub(crate) fn emit(&self, session: Option<UserSession>) {
        self.current.replace(session.clone());
        let listeners: Vec<AuthListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(session.clone());
        }
    }
}

#[async_trait(?Send)]
impl AuthProvider for FakeAuthProvider {
    fn subscribe(&self, listener: AuthListener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::clone(&listener)));
        let current = self.current.borrow().clone();
        listener(current);
        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(entry, _)| *entry != id);
            }
        })
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<UserSession, AuthError> {
        self.sign_in_calls.borrow_mut().push(credentials.clone());
        let scripted = self.sign_in_results.borrow_mut().pop_front();
        let session = scripted.unwrap_or_else(|| Ok(UserSession::with_email(&credentials.email)))?;
        self.emit(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        let scripted = self.sign_out_results.borrow_mut().pop_front();
        scripted.unwrap_or(Ok(()))?;
        self.emit(None);
        Ok(())
    }
}
