//! Page bootstrap: mounts one login form per `<hsos-login-form>` host element.

use crate::core::auth::AuthProvider;
use crate::core::config::HostAttributes;
use crate::features::login_form::view::{LoginFormProps, LoginFormWidget, ProviderHandle};
use crate::services::firebase::FirebaseAuth;
use anyhow::anyhow;
use gloo::console;
use gloo::utils::document;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// Tag name of the host elements the widget renders into.
const HOST_TAG: &str = "hsos-login-form";

/// Entry point for the wasm build.
pub fn run_app() {
    console_error_panic_hook::set_once();
    match mount_all() {
        Ok(0) => console::warn!(format!("no <{HOST_TAG}> element found on the page")),
        Ok(_) => {}
        Err(err) => console::error!(format!("login form unavailable: {err:#}")),
    }
}

fn mount_all() -> anyhow::Result<usize> {
    let provider: Rc<dyn AuthProvider> = Rc::new(FirebaseAuth::from_global()?);
    let hosts = document()
        .query_selector_all(HOST_TAG)
        .map_err(|err| anyhow!("host element lookup failed: {err:?}"))?;
    let mut mounted = 0;
    for index in 0..hosts.length() {
        let Some(element) = hosts
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let host = host_attributes(&element);
        yew::Renderer::<LoginFormWidget>::with_root_and_props(
            element,
            LoginFormProps {
                provider: ProviderHandle(Rc::clone(&provider)),
                host,
            },
        )
        .render();
        mounted += 1;
    }
    Ok(mounted)
}

fn host_attributes(element: &Element) -> HostAttributes {
    let values: Vec<(&str, String)> = HostAttributes::NAMES
        .iter()
        .filter_map(|name| element.get_attribute(name).map(|value| (*name, value)))
        .collect();
    HostAttributes::from_pairs(values.iter().map(|(name, value)| (*name, value.as_str())))
}
