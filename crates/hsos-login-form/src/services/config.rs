//! One-shot fetch of the configuration resource.

use crate::core::config::{ConfigError, ConfigOutcome};
use gloo_net::http::Request;

/// Fetch and classify the configuration document. Never retried.
pub(crate) async fn load_config(url: &str) -> ConfigOutcome {
    match fetch_text(url).await {
        Ok(text) => ConfigOutcome::from_json(&text),
        Err(err) => ConfigOutcome::Failed(err),
    }
}

async fn fetch_text(url: &str) -> Result<String, ConfigError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| ConfigError::Fetch {
            url: url.to_string(),
            detail: err.to_string(),
        })?;
    if !response.ok() {
        return Err(ConfigError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response.text().await.map_err(|err| ConfigError::Fetch {
        url: url.to_string(),
        detail: err.to_string(),
    })
}
