//! Minimal Twilio Messages API client (message creation).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TwilioCredentials;
use crate::recipient::WhatsAppAddress;
use crate::{Error, Result};

/// Identifier Twilio assigns to an accepted message (`SM...`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MessageSid(pub String);

impl std::fmt::Display for MessageSid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TwilioClient {
    http: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioClient {
    /// Create client for the given API root, e.g. `https://api.twilio.com`.
    pub fn with_base_url<S: Into<String>>(
        credentials: &TwilioCredentials,
        base_url: S,
    ) -> Result<Self> {
        // No explicit timeout: the request waits as long as reqwest allows.
        let http = Client::builder()
            .user_agent(format!("radiant_notify/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Delivery(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            account_sid: credentials.account_sid.clone(),
            auth_token: credentials.auth_token.clone(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }

    /// Create a single message. One request, never retried.
    pub async fn create_message(
        &self,
        from: &WhatsAppAddress,
        to: &WhatsAppAddress,
        body: &str,
    ) -> Result<MessageSid> {
        let url = self.messages_url();
        debug!(%url, %to, "POST message");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&CreateMessageForm {
                from: from.as_str(),
                to: to.as_str(),
                body,
            })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Delivery(describe_failure(status.as_u16(), &text)));
        }

        let created: CreatedMessage = serde_json::from_str(&text)?;
        Ok(created.sid)
    }
}

/// Turn a non-2xx response into a human-readable description.
fn describe_failure(status: u16, text: &str) -> String {
    match serde_json::from_str::<TwilioErrorBody>(text) {
        Ok(err) => {
            let mut description = format!("HTTP {} error from Twilio: ", status);
            if let Some(code) = err.code {
                description.push_str(&format!("[{}] ", code));
            }
            description.push_str(&err.message);
            if let Some(more_info) = err.more_info {
                description.push_str(&format!(" ({})", more_info));
            }
            description
        }
        Err(_) => format!("HTTP {} error from Twilio: {}", status, text.trim()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateMessageForm<'a> {
    from: &'a str,
    to: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    sid: MessageSid,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<u32>,
    message: String,
    more_info: Option<String>,
}
