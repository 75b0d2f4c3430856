//! Browser services: configuration fetch and the Firebase provider binding.

pub(crate) mod config;
pub(crate) mod firebase;
