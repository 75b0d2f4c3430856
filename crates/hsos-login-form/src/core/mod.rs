//! Core, DOM-free primitives shared by the form and its browser services.
pub mod auth;
pub mod config;

#[cfg(test)]
pub(crate) mod testing;
