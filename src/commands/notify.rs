//! Notify command: format the patient message and send it once.

use tracing::info;

use crate::config::{Settings, TwilioCredentials};
use crate::dispatch::Dispatcher;
use crate::patient::PatientRecord;
use crate::twilio::MessageSid;
use crate::Result;

/// What a successful invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sent(MessageSid),
    DryRun,
}

/// CLI entry point
pub async fn run(
    record: &PatientRecord,
    credentials: &TwilioCredentials,
    settings: &Settings,
    dry_run: bool,
) -> Result<Outcome> {
    let dispatcher = Dispatcher::new(credentials, settings)?;
    let body = record.render_message(&settings.clinic_name);
    info!(patient = %record.id, action = %record.action, "Composed notification");

    if dry_run {
        let to = dispatcher.recipient_address(&record.phone_number)?;
        println!("To: {}", to);
        println!("{}", body);
        return Ok(Outcome::DryRun);
    }

    let sid = dispatcher.send_message(&record.phone_number, &body).await?;
    println!("Message sent! SID: {}", sid);
    Ok(Outcome::Sent(sid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::sample_record;
    use crate::Error;
    use httpmock::prelude::*;

    fn credentials() -> TwilioCredentials {
        TwilioCredentials::new("AC123", "token", "+14155238886")
    }

    fn settings(server: &MockServer) -> Settings {
        Settings {
            api_url: server.base_url(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn sends_formatted_record() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/2010-04-01/Accounts/AC123/Messages.json")
                .is_true(|req| {
                    let body = String::from_utf8_lossy(req.body().as_ref());
                    body.contains("Hello+Asha") && body.contains("ID%3A+P1")
                });
            then.status(201).json_body(serde_json::json!({ "sid": "SM42" }));
        });

        let outcome = run(&sample_record(), &credentials(), &settings(&server), false)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Sent(MessageSid("SM42".into())));
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn dry_run_makes_no_request() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(201).json_body(serde_json::json!({ "sid": "SM42" }));
        });

        let outcome = run(&sample_record(), &credentials(), &settings(&server), true)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::DryRun);
        mock.assert_calls(0);
    }

    #[tokio::test]
    async fn dry_run_still_validates_number() {
        let server = MockServer::start_async().await;
        let mut record = sample_record();
        record.phone_number = "12345".into();

        let err = run(&record, &credentials(), &settings(&server), true)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidNumber(_)));
    }
}
