//! Login/logout form feature.
//!
//! # Design
//! - Pure state and events compile everywhere; only the view touches the DOM.
//! - The provider is reached solely through the driver.

pub mod actions;
pub mod driver;
pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
