//! Configuration for the Twilio client and the message template
//!
//! Credentials come from the process environment only (optionally seeded
//! from a `.env` file). Non-secret settings may be placed in `notify.yml`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const ENV_PHONE_NUMBER: &str = "TWILIO_PHONE_NUMBER";

pub const ENV_API_URL: &str = "TWILIO_API_URL";
pub const ENV_CLINIC_NAME: &str = "NOTIFY_CLINIC_NAME";
pub const ENV_COUNTRY_CODE: &str = "NOTIFY_COUNTRY_CODE";
pub const ENV_DRY_RUN: &str = "NOTIFY_DRY_RUN";

pub const CONFIG_FILE: &str = "notify.yml";
pub const DEFAULT_CLINIC_NAME: &str = "Radiant Care";
pub const DEFAULT_COUNTRY_CODE: &str = "+91";
pub const TWILIO_API_URL: &str = "https://api.twilio.com";

static COUNTRY_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+[0-9]{1,3}$").expect("country code pattern is valid")
});

/// Load .env file into environment variables using dotenvy
pub fn load_dotenv() {
    // Try to load from current directory first, then parent
    if dotenvy::dotenv().is_err() {
        let _ = dotenvy::from_filename("../.env");
    }
}

/// Twilio account credentials and the sender number.
#[derive(Clone, PartialEq, Eq)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
}

impl fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***")
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

impl TwilioCredentials {
    pub fn new<S1, S2, S3>(account_sid: S1, auth_token: S2, phone_number: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Read all three credentials from the environment.
    ///
    /// Unset and empty values are both treated as missing. Values are used
    /// exactly as given.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            account_sid: required_env(ENV_ACCOUNT_SID)?,
            auth_token: required_env(ENV_AUTH_TOKEN)?,
            phone_number: required_env(ENV_PHONE_NUMBER)?,
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::ConfigMissing(key.to_string())),
    }
}

/// YAML config structures
#[derive(Debug, Default, Deserialize)]
struct YamlConfig {
    #[serde(default)]
    dry_run: bool,
    message: Option<MessageConfig>,
    twilio: Option<TwilioConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageConfig {
    clinic_name: Option<String>,
    country_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioConfig {
    api_url: Option<String>,
}

/// Non-secret runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub clinic_name: String,
    pub country_code: String,
    pub api_url: String,
    /// Print the recipient and body instead of sending.
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    /// Load settings from notify.yml (current dir, then parent) or defaults.
    /// Environment variables take precedence over file values.
    pub fn load() -> Result<Self> {
        for candidate in [CONFIG_FILE, "../notify.yml"] {
            if Path::new(candidate).exists() {
                debug!(path = candidate, "Loading settings file");
                return Self::load_from_file(candidate);
            }
        }
        Self::from_yaml(YamlConfig::default())
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let yaml: YamlConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        Self::from_yaml(yaml)
    }

    fn from_yaml(yaml: YamlConfig) -> Result<Self> {
        let message = yaml.message.unwrap_or_default();
        let twilio = yaml.twilio.unwrap_or_default();

        let settings = Self {
            clinic_name: resolve_env_string(message.clinic_name, ENV_CLINIC_NAME)
                .unwrap_or_else(|| DEFAULT_CLINIC_NAME.to_string()),
            country_code: resolve_env_string(message.country_code, ENV_COUNTRY_CODE)
                .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string()),
            api_url: resolve_env_string(twilio.api_url, ENV_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| TWILIO_API_URL.to_string()),
            dry_run: resolve_env_bool(yaml.dry_run, ENV_DRY_RUN),
        };

        if !COUNTRY_CODE_RE.is_match(&settings.country_code) {
            return Err(Error::Config(format!(
                "country code must look like +91, got {:?}",
                settings.country_code
            )));
        }

        Ok(settings)
    }

    fn defaults() -> Self {
        Self {
            clinic_name: DEFAULT_CLINIC_NAME.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            api_url: TWILIO_API_URL.to_string(),
            dry_run: false,
        }
    }
}

/// Resolve a value: explicit env var first, then a `${VAR}` placeholder,
/// then the literal file value. Blank results count as unset.
fn resolve_env_string(value: Option<String>, env_key: &str) -> Option<String> {
    if let Ok(env_val) = std::env::var(env_key) {
        if !env_val.trim().is_empty() {
            return Some(env_val);
        }
    }

    let value = value?;
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        return std::env::var(var_name)
            .ok()
            .filter(|v| !v.trim().is_empty());
    }

    Some(value).filter(|v| !v.trim().is_empty())
}

/// Env var wins when set to a recognised boolean; otherwise the file value.
fn resolve_env_bool(value: bool, env_key: &str) -> bool {
    match std::env::var(env_key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => value,
        },
        Err(_) => value,
    }
}
