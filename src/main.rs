//! radiant_notify CLI - main entry point
//!
//! Sends one WhatsApp notification about a patient record.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use radiant_notify::commands::{self, Outcome};
use radiant_notify::config::{self, Settings, TwilioCredentials};
use radiant_notify::{Error, PatientRecord, Result};

/// The command line carries record fields only. Dry runs are switched on
/// through `NOTIFY_DRY_RUN` or `notify.yml`.
#[derive(Parser)]
#[command(name = "radiant_notify")]
#[command(about = "Send a WhatsApp notification about a patient record", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    #[command(flatten)]
    record: PatientRecord,
}

impl Cli {
    /// Parse argv with every value after the program path taken literally,
    /// so field contents such as `-ve`, `--help` or `--` stay data.
    fn parse_record<I, T>(args: I) -> Result<PatientRecord>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into);
        let program = args
            .next()
            .unwrap_or_else(|| OsString::from("radiant_notify"));

        let argv = [program, OsString::from("--")].into_iter().chain(args);
        Cli::try_parse_from(argv)
            .map(|cli| cli.record)
            .map_err(|err| Error::Usage(err.to_string()))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env for local development
    config::load_dotenv();

    if let Err(err) = init_logging() {
        eprintln!("Failed to initialise logging: {:#}", err);
    }

    match run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            println!("{}", err.console_message());
            ExitCode::FAILURE
        }
    }
}

fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("radiant_notify=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

async fn run() -> Result<Outcome> {
    // Credentials are checked before the command line is looked at.
    let credentials = TwilioCredentials::from_env()?;
    let settings = Settings::load()?;

    let record = Cli::parse_record(std::env::args_os())?;

    commands::notify_run(&record, &credentials, &settings, settings.dry_run).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ARGS: [&str; 14] = [
        "radiant_notify",
        "P1",
        "Asha",
        "F",
        "1990-01-01",
        "9876543210",
        "O+",
        "None",
        "None",
        "None",
        "OK",
        "2024-01-01",
        "2024-06-01",
        "updated",
    ];

    const NOTES: usize = 10;
    const PHONE: usize = 5;

    fn with_field(index: usize, value: &'static str) -> Vec<&'static str> {
        let mut args = SAMPLE_ARGS.to_vec();
        args[index] = value;
        args
    }

    #[test]
    fn parses_fourteen_positional_values() {
        let record = Cli::parse_record(SAMPLE_ARGS).unwrap();

        assert_eq!(record.id, "P1");
        assert_eq!(record.phone_number, "9876543210");
        assert_eq!(record.notes, "OK");
        assert_eq!(record.action, "updated");
    }

    #[test]
    fn too_few_arguments_is_an_error() {
        let err = Cli::parse_record(SAMPLE_ARGS[..13].iter().copied()).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn too_many_arguments_is_an_error() {
        let mut args = SAMPLE_ARGS.to_vec();
        args.push("extra");
        assert!(matches!(Cli::parse_record(args), Err(Error::Usage(_))));
    }

    #[test]
    fn no_arguments_is_an_error() {
        assert!(matches!(
            Cli::parse_record(["radiant_notify"]),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn hyphenated_values_are_record_data() {
        for value in ["-ve reaction", "--dry-run", "--help", "--version", "-", "--"] {
            let record = Cli::parse_record(with_field(NOTES, value)).unwrap();
            assert_eq!(record.notes, value);
            assert_eq!(record.action, "updated");
        }
    }

    #[test]
    fn hyphenated_first_field_is_record_data() {
        let record = Cli::parse_record(with_field(1, "--help")).unwrap();
        assert_eq!(record.id, "--help");
    }

    #[test]
    fn negative_looking_phone_reaches_the_record() {
        let record = Cli::parse_record(with_field(PHONE, "-987654321")).unwrap();
        assert_eq!(record.phone_number, "-987654321");
    }
}
