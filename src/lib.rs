//! Patient Notification Library
//!
//! This library provides tools to:
//! - Load Twilio credentials and message settings
//! - Validate local phone numbers and build WhatsApp addresses
//! - Render the patient-record notification template
//! - Send a single WhatsApp message through the Twilio Messages API

pub mod config;
pub mod dispatch;
pub mod error;
pub mod patient;
pub mod recipient;
pub mod twilio;

// Re-export common types
pub use config::{Settings, TwilioCredentials};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use patient::PatientRecord;
pub use recipient::{PhoneNumber, WhatsAppAddress};
pub use twilio::{MessageSid, TwilioClient};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
