//! [`AuthProvider`] over the global Firebase compat SDK (`firebase.auth()`).
//!
//! # Design
//! - The SDK is looked up once at startup and shared by every widget on the page.
//! - Calls go through `Reflect` + `Function` so no extern bindings are needed.
//! - Rejections are mapped to [`AuthError`] from the JS `{code, message}` shape.

use crate::core::auth::{
    AuthError, AuthListener, AuthProvider, Credentials, Subscription, UserSession,
};
use async_trait::async_trait;
use gloo::console;
use js_sys::{Array, Function, Promise, Reflect};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;

/// The Firebase SDK could not be reached on the page.
#[derive(Debug, Error)]
#[error("firebase auth SDK unavailable: {detail}")]
pub(crate) struct ProviderUnavailable {
    detail: String,
}

impl ProviderUnavailable {
    fn from_js(step: &str, value: &JsValue) -> Self {
        Self {
            detail: format!("{step}: {value:?}"),
        }
    }
}

/// Handle on the page's `firebase.auth()` instance.
#[derive(Clone, Debug)]
pub(crate) struct FirebaseAuth {
    auth: JsValue,
}

impl FirebaseAuth {
    /// Resolve `firebase.auth()` from the global scope.
    pub(crate) fn from_global() -> Result<Self, ProviderUnavailable> {
        let firebase = Reflect::get(&js_sys::global(), &JsValue::from_str("firebase"))
            .map_err(|err| ProviderUnavailable::from_js("global lookup", &err))?;
        if firebase.is_undefined() || firebase.is_null() {
            return Err(ProviderUnavailable {
                detail: "`firebase` is not defined".to_string(),
            });
        }
        let auth_fn = method(&firebase, "auth")
            .map_err(|err| ProviderUnavailable::from_js("firebase.auth", &err))?;
        let auth = auth_fn
            .call0(&firebase)
            .map_err(|err| ProviderUnavailable::from_js("firebase.auth()", &err))?;
        Ok(Self { auth })
    }

    fn call_promise(&self, name: &str, args: &[JsValue]) -> Result<Promise, AuthError> {
        let function = method(&self.auth, name).map_err(|err| auth_error(&err))?;
        let args = args.iter().collect::<Array>();
        let result = function
            .apply(&self.auth, &args)
            .map_err(|err| auth_error(&err))?;
        result
            .dyn_into::<Promise>()
            .map_err(|value| auth_error(&value))
    }
}

#[async_trait(?Send)]
impl AuthProvider for FirebaseAuth {
    fn subscribe(&self, listener: AuthListener) -> Subscription {
        let observer = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |user: JsValue| {
            listener(session_from_js(&user));
        }));
        let registered = method(&self.auth, "onAuthStateChanged")
            .and_then(|function| function.call1(&self.auth, observer.as_ref()))
            .and_then(|value| value.dyn_into::<Function>());
        match registered {
            Ok(unsubscribe) => Subscription::new(move || {
                if let Err(err) = unsubscribe.call0(&JsValue::NULL) {
                    console::error!("auth listener removal failed", err);
                }
                drop(observer);
            }),
            Err(err) => {
                console::error!("auth listener registration failed", err);
                Subscription::detached()
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<UserSession, AuthError> {
        let promise = self.call_promise(
            "signInWithEmailAndPassword",
            &[
                JsValue::from_str(&credentials.email),
                JsValue::from_str(&credentials.password),
            ],
        )?;
        let credential = JsFuture::from(promise)
            .await
            .map_err(|err| auth_error(&err))?;
        let user =
            Reflect::get(&credential, &JsValue::from_str("user")).unwrap_or(JsValue::NULL);
        Ok(session_from_js(&user).unwrap_or_default())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let promise = self.call_promise("signOut", &[])?;
        JsFuture::from(promise)
            .await
            .map_err(|err| auth_error(&err))?;
        Ok(())
    }
}

fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?.dyn_into::<Function>()
}

fn string_prop(target: &JsValue, key: &str) -> Option<String> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_string())
}

fn session_from_js(user: &JsValue) -> Option<UserSession> {
    if user.is_null() || user.is_undefined() {
        return None;
    }
    Some(UserSession {
        uid: string_prop(user, "uid"),
        email: string_prop(user, "email"),
    })
}

fn auth_error(value: &JsValue) -> AuthError {
    let code = string_prop(value, "code").unwrap_or_default();
    let message = string_prop(value, "message")
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    AuthError::new(&code, message)
}
