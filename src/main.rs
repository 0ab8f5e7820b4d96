use clap::Parser;
use finwin::args::{Args, Command};
use finwin::report::ReportKind;
use finwin::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().finwin_home().path();

    // When FINWIN_SAMPLE_DATA is set and non-empty the built-in sample tables are used instead of
    // the CSV files in the data directory.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, !init_args.no_sample()).await?.print(),

        Command::Ranking(ranking_args) => {
            let config = Config::load(home).await?;
            commands::ranking(config, mode, ranking_args.clone())
                .await?
                .print_stdout()
        }

        Command::Trend(report_args) => {
            let config = Config::load(home).await?;
            commands::report(config, mode, ReportKind::Trend, report_args.clone())
                .await?
                .print_stdout()
        }

        Command::Mom(report_args) => {
            let config = Config::load(home).await?;
            commands::report(config, mode, ReportKind::Mom, report_args.clone())
                .await?
                .print_stdout()
        }

        Command::Risk(report_args) => {
            let config = Config::load(home).await?;
            commands::report(config, mode, ReportKind::Risk, report_args.clone())
                .await?
                .print_stdout()
        }

        Command::All(report_args) => {
            let config = Config::load(home).await?;
            commands::all(config, mode, report_args.clone())
                .await?
                .print_stdout()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
