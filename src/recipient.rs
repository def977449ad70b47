//! Phone number validation and WhatsApp address construction.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Protocol tag Twilio expects on WhatsApp addresses.
pub const WHATSAPP_PREFIX: &str = "whatsapp:";

static LOCAL_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// A local phone number: exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        if LOCAL_NUMBER_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidNumber(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fully-qualified WhatsApp address, e.g. `whatsapp:+919876543210`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppAddress(String);

impl WhatsAppAddress {
    /// Recipient address: prefix, country code, then the local number.
    pub fn recipient(country_code: &str, number: &PhoneNumber) -> Self {
        Self(format!("{}{}{}", WHATSAPP_PREFIX, country_code, number.as_str()))
    }

    /// Sender address from the configured Twilio number, used verbatim.
    pub fn sender(configured_number: &str) -> Self {
        Self(format!("{}{}", WHATSAPP_PREFIX, configured_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WhatsAppAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
