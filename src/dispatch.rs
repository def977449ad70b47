//! Message dispatcher: validates the recipient and issues the single send.

use tracing::{info, warn};

use crate::config::{Settings, TwilioCredentials};
use crate::recipient::{PhoneNumber, WhatsAppAddress};
use crate::twilio::{MessageSid, TwilioClient};
use crate::Result;

#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: TwilioClient,
    sender: WhatsAppAddress,
    country_code: String,
}

impl Dispatcher {
    pub fn new(credentials: &TwilioCredentials, settings: &Settings) -> Result<Self> {
        let client = TwilioClient::with_base_url(credentials, settings.api_url.as_str())?;
        Ok(Self::with_client(client, credentials, settings))
    }

    pub fn with_client(
        client: TwilioClient,
        credentials: &TwilioCredentials,
        settings: &Settings,
    ) -> Self {
        Self {
            client,
            sender: WhatsAppAddress::sender(&credentials.phone_number),
            country_code: settings.country_code.clone(),
        }
    }

    /// Validate a local number and qualify it for WhatsApp delivery.
    pub fn recipient_address(&self, recipient_number: &str) -> Result<WhatsAppAddress> {
        let number = PhoneNumber::parse(recipient_number)?;
        Ok(WhatsAppAddress::recipient(&self.country_code, &number))
    }

    /// Send `body` to `recipient_number`.
    ///
    /// Invalid numbers are rejected before any request is made. Delivery
    /// failures are returned as-is and never retried.
    pub async fn send_message(&self, recipient_number: &str, body: &str) -> Result<MessageSid> {
        let to = self.recipient_address(recipient_number).inspect_err(|_| {
            warn!(recipient = recipient_number, "Rejected recipient number");
        })?;

        let sid = self
            .client
            .create_message(&self.sender, &to, body)
            .await
            .inspect_err(|err| warn!(%to, "Delivery failed: {}", err))?;

        info!(%to, %sid, "Message accepted by Twilio");
        Ok(sid)
    }
}
