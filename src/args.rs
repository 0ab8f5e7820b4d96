//! These structs provide the CLI interface for the finwin CLI.

use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// finwin: Window-function analytics over department expense data.
///
/// finwin reads three tables (departments, expense categories and transactions) from CSV files
/// and prints four reports: departments ranked by revenue, the monthly trend with a running
/// total and moving average, month-over-month growth, and risk quartiles of individual
/// transactions.
///
/// Run `finwin init` first. It creates the home directory, a config file and a data directory
/// seeded with a small sample dataset that you can replace with your own CSV files.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and initialize the configuration file.
    ///
    /// The data directory, $FINWIN_HOME/data by default, is seeded with departments.csv,
    /// expense_categories.csv and transactions.csv holding sample data unless --no-sample is
    /// given.
    Init(InitArgs),
    /// Rank departments by total revenue with row number, rank and dense rank.
    Ranking(RankingArgs),
    /// Monthly totals with running total, moving average and the yearly min and max.
    Trend(ReportArgs),
    /// Month-over-month comparison with previous and next month, growth and trend.
    Mom(ReportArgs),
    /// Split transactions into risk quartiles by amount.
    Risk(ReportArgs),
    /// Print all four reports.
    All(ReportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where finwin data and configuration is held. Defaults to ~/finwin
    #[arg(long, env = "FINWIN_HOME", default_value_t = default_finwin_home())]
    finwin_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, finwin_home: PathBuf) -> Self {
        Self {
            log_level,
            finwin_home: finwin_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn finwin_home(&self) -> &DisplayPath {
        &self.finwin_home
    }
}

/// Args for the `finwin init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Create an empty data directory instead of writing the sample tables into it.
    #[arg(long)]
    no_sample: bool,
}

impl InitArgs {
    pub fn new(no_sample: bool) -> Self {
        Self { no_sample }
    }

    pub fn no_sample(&self) -> bool {
        self.no_sample
    }
}

/// Args for the `finwin ranking` command.
#[derive(Debug, Parser, Clone)]
pub struct RankingArgs {
    /// Keep only departments with a row number at or below this value. Defaults to `top_n` from
    /// config.json.
    #[arg(long)]
    top: Option<usize>,

    #[clap(flatten)]
    report: ReportArgs,
}

impl RankingArgs {
    pub fn new(top: Option<usize>, report: ReportArgs) -> Self {
        Self { top, report }
    }

    pub fn top(&self) -> Option<usize> {
        self.top
    }

    pub fn report(&self) -> &ReportArgs {
        &self.report
    }
}

/// Args shared by the report commands.
#[derive(Debug, Default, Parser, Clone)]
pub struct ReportArgs {
    /// The output format: table, csv or json. Defaults to `output_format` from config.json.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl ReportArgs {
    pub fn new(format: Option<OutputFormat>) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.format
    }
}

fn default_finwin_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("finwin"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --finwin-home or FINWIN_HOME instead of relying on the default \
                finwin home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("finwin")
        }
    })
}

/// A `PathBuf` that implements `Display` so that clap can show it as a default value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranking() {
        let args = Args::try_parse_from([
            "finwin",
            "--finwin-home",
            "/tmp/fw",
            "ranking",
            "--top",
            "3",
            "--format",
            "csv",
        ])
        .unwrap();
        assert_eq!(args.common().finwin_home().path(), Path::new("/tmp/fw"));
        match args.command() {
            Command::Ranking(r) => {
                assert_eq!(r.top(), Some(3));
                assert_eq!(r.report().format(), Some(OutputFormat::Csv));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args =
            Args::try_parse_from(["finwin", "--finwin-home", "/tmp/fw", "trend"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        match args.command() {
            Command::Trend(r) => assert_eq!(r.format(), None),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_no_sample() {
        let args = Args::try_parse_from([
            "finwin",
            "--log-level",
            "debug",
            "--finwin-home",
            "/tmp/fw",
            "init",
            "--no-sample",
        ])
        .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert!(matches!(args.command(), Command::Init(i) if i.no_sample()));
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Args::try_parse_from(["finwin", "risk", "--format", "xml"]).is_err());
    }
}
