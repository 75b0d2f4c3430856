//! Display-text configuration: defaults, host attributes, and the fetched JSON resource.
//!
//! # Design
//! - Precedence is defaults, then host attributes, then the fetched document.
//! - Absent or `null` keys leave the current value untouched.
//! - Parsing is DOM-free; fetching lives in the browser service layer.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Configuration resource fetched when no host attribute overrides it.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Top-level key holding the form section in the configuration document.
pub const CONFIG_SECTION_KEY: &str = "hsosLoginForm";

/// Display strings for labels, placeholders, and buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormText {
    /// Identifier field label.
    pub user_name_header: String,
    /// Secret field label.
    pub password_header: String,
    /// Identifier field placeholder.
    pub user_value_placeholder: String,
    /// Secret field placeholder.
    pub password_value_placeholder: String,
    /// Login button text.
    pub login_button_text: String,
    /// Logout button text.
    pub logout_button_text: String,
}

impl Default for FormText {
    fn default() -> Self {
        Self {
            user_name_header: "E-Mail".to_string(),
            password_header: "Password".to_string(),
            user_value_placeholder: String::new(),
            password_value_placeholder: String::new(),
            login_button_text: "Login".to_string(),
            logout_button_text: "Logout".to_string(),
        }
    }
}

impl FormText {
    /// Overwrite every field the section provides. Returns the number of overrides.
    pub fn apply(&mut self, section: &FormSection) -> usize {
        let mut applied = 0;
        for (target, value) in [
            (&mut self.user_name_header, &section.user_name_header),
            (&mut self.password_header, &section.password_header),
            (&mut self.user_value_placeholder, &section.user_value_placeholder),
            (
                &mut self.password_value_placeholder,
                &section.password_value_placeholder,
            ),
            (&mut self.login_button_text, &section.login_button_text),
            (&mut self.logout_button_text, &section.logout_button_text),
        ] {
            if let Some(value) = value {
                target.clone_from(value);
                applied += 1;
            }
        }
        applied
    }
}

/// Optional overrides for the six display strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    /// Identifier field label.
    #[serde(default)]
    pub user_name_header: Option<String>,
    /// Secret field label.
    #[serde(default)]
    pub password_header: Option<String>,
    /// Identifier field placeholder.
    #[serde(default)]
    pub user_value_placeholder: Option<String>,
    /// Secret field placeholder.
    #[serde(default)]
    pub password_value_placeholder: Option<String>,
    /// Login button text.
    #[serde(default)]
    pub login_button_text: Option<String>,
    /// Logout button text.
    #[serde(default)]
    pub logout_button_text: Option<String>,
}

/// Parsed configuration document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigDocument {
    /// Form section, when the document carries one.
    #[serde(rename = "hsosLoginForm", default)]
    pub section: Option<FormSection>,
}

impl ConfigDocument {
    /// Parse a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Malformed`] when the text is not JSON, the top level is
    /// not an object, or a known field carries a non-string value.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|err| ConfigError::Malformed {
            detail: err.to_string(),
        })?;
        if !value.is_object() {
            return Err(ConfigError::Malformed {
                detail: "top-level value is not an object".to_string(),
            });
        }
        serde_json::from_value(value).map_err(|err| ConfigError::Malformed {
            detail: err.to_string(),
        })
    }

    /// Classify the document as a load outcome.
    #[must_use]
    pub fn into_outcome(self) -> ConfigOutcome {
        self.section
            .map_or(ConfigOutcome::MissingSection, ConfigOutcome::Applied)
    }
}

/// Failure while loading the configuration resource.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The request never produced a response.
    #[error("configuration fetch failed for {url}: {detail}")]
    Fetch {
        /// Requested resource.
        url: String,
        /// Transport error detail.
        detail: String,
    },
    /// The server answered with a non-success status.
    #[error("configuration fetch for {url} returned status {status}")]
    Status {
        /// Requested resource.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The body was not a usable configuration document.
    #[error("malformed configuration document: {detail}")]
    Malformed {
        /// Parser error detail.
        detail: String,
    },
}

/// Result of the one-shot configuration load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigOutcome {
    /// The document carried a form section.
    Applied(FormSection),
    /// The document parsed but has no form section.
    MissingSection,
    /// The document could not be loaded.
    Failed(ConfigError),
}

impl ConfigOutcome {
    /// Classify raw JSON text.
    #[must_use]
    pub fn from_json(text: &str) -> Self {
        match ConfigDocument::from_json(text) {
            Ok(document) => document.into_outcome(),
            Err(err) => Self::Failed(err),
        }
    }
}

/// What the widget does when the configuration yields no form section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingConfigPolicy {
    /// Remain hidden with default text.
    #[default]
    StayHidden,
    /// Reveal the widget with host/default text.
    RevealDefaults,
}

/// Settings read from the host element's attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostAttributes {
    /// Configuration resource locator.
    pub config_file: String,
    /// Display text after host overrides.
    pub text: FormText,
    /// Behaviour when the configuration has no usable section.
    pub missing_config: MissingConfigPolicy,
}

impl Default for HostAttributes {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            text: FormText::default(),
            missing_config: MissingConfigPolicy::default(),
        }
    }
}

impl HostAttributes {
    /// Attribute names recognised on the host element.
    pub const NAMES: [&'static str; 8] = [
        "config-file",
        "user-name-header",
        "password-header",
        "user-value-placeholder",
        "password-value-placeholder",
        "login-button-text",
        "logout-button-text",
        "reveal-on-missing-config",
    ];

    /// Build settings from `(name, value)` attribute pairs; unknown names are ignored.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut attrs = Self::default();
        for (name, value) in pairs {
            match name {
                "config-file" => {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        attrs.config_file = trimmed.to_string();
                    }
                }
                "user-name-header" => attrs.text.user_name_header = value.to_string(),
                "password-header" => attrs.text.password_header = value.to_string(),
                "user-value-placeholder" => {
                    attrs.text.user_value_placeholder = value.to_string();
                }
                "password-value-placeholder" => {
                    attrs.text.password_value_placeholder = value.to_string();
                }
                "login-button-text" => attrs.text.login_button_text = value.to_string(),
                "logout-button-text" => attrs.text.logout_button_text = value.to_string(),
                "reveal-on-missing-config" => {
                    attrs.missing_config = if value.trim().eq_ignore_ascii_case("false") {
                        MissingConfigPolicy::StayHidden
                    } else {
                        MissingConfigPolicy::RevealDefaults
                    };
                }
                _ => {}
            }
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigDocument, ConfigError, ConfigOutcome, DEFAULT_CONFIG_FILE, FormSection, FormText,
        HostAttributes, MissingConfigPolicy,
    };

    #[test]
    fn login_text_only_overrides_one_field() {
        let outcome = ConfigOutcome::from_json(r#"{"hsosLoginForm":{"loginButtonText":"Anmelden"}}"#);
        let section = match outcome {
            ConfigOutcome::Applied(section) => section,
            other => panic!("expected section, got {other:?}"),
        };
        let mut text = FormText::default();
        assert_eq!(text.apply(&section), 1);
        assert_eq!(text.login_button_text, "Anmelden");
        assert_eq!(
            FormText {
                login_button_text: "Login".to_string(),
                ..text
            },
            FormText::default()
        );
    }

    #[test]
    fn all_six_fields_are_recognised() {
        let json = r#"{"hsosLoginForm":{
            "userNameHeader":"Benutzer","passwordHeader":"Passwort",
            "userValuePlaceholder":"name@hs.de","passwordValuePlaceholder":"***",
            "loginButtonText":"Anmelden","logoutButtonText":"Abmelden"}}"#;
        let document = ConfigDocument::from_json(json).expect("document parses");
        let section = document.section.expect("section present");
        let mut text = FormText::default();
        assert_eq!(text.apply(&section), 6);
        assert_eq!(text.user_name_header, "Benutzer");
        assert_eq!(text.password_value_placeholder, "***");
        assert_eq!(text.logout_button_text, "Abmelden");
    }

    #[test]
    fn missing_section_is_reported() {
        assert_eq!(
            ConfigOutcome::from_json(r#"{"otherWidget":{"loginButtonText":"x"}}"#),
            ConfigOutcome::MissingSection
        );
        assert_eq!(
            ConfigOutcome::from_json(r#"{"hsosLoginForm":null}"#),
            ConfigOutcome::MissingSection
        );
    }

    #[test]
    fn null_fields_keep_defaults() {
        let outcome = ConfigOutcome::from_json(r#"{"hsosLoginForm":{"passwordHeader":null}}"#);
        assert_eq!(outcome, ConfigOutcome::Applied(FormSection::default()));
    }

    #[test]
    fn malformed_documents_fail() {
        for text in ["not json", "[]", "null", r#"{"hsosLoginForm":{"loginButtonText":5}}"#] {
            assert!(
                matches!(
                    ConfigOutcome::from_json(text),
                    ConfigOutcome::Failed(ConfigError::Malformed { .. })
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn host_attributes_override_defaults() {
        let attrs = HostAttributes::from_pairs([
            ("config-file", " lang/de.json "),
            ("login-button-text", "Los"),
            ("user-value-placeholder", "you@example.org"),
            ("data-unrelated", "ignored"),
        ]);
        assert_eq!(attrs.config_file, "lang/de.json");
        assert_eq!(attrs.text.login_button_text, "Los");
        assert_eq!(attrs.text.user_value_placeholder, "you@example.org");
        assert_eq!(attrs.text.logout_button_text, "Logout");
        assert_eq!(attrs.missing_config, MissingConfigPolicy::StayHidden);
    }

    #[test]
    fn blank_config_file_keeps_default_and_reveal_flag_parses() {
        let attrs = HostAttributes::from_pairs([
            ("config-file", "  "),
            ("reveal-on-missing-config", ""),
        ]);
        assert_eq!(attrs.config_file, DEFAULT_CONFIG_FILE);
        assert_eq!(attrs.missing_config, MissingConfigPolicy::RevealDefaults);
        let off = HostAttributes::from_pairs([("reveal-on-missing-config", "FALSE")]);
        assert_eq!(off.missing_config, MissingConfigPolicy::StayHidden);
    }
}
