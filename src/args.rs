//! These structs provide the CLI interface for the paylog CLI.

use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// paylog: A command-line tool for looking through a purchase history.
///
/// The history is copied out of a store's purchase history page as raw (date, channel, amount)
/// triples. `paylog extract` turns those into a clean dataset of records, `paylog view` prints
/// totals and grouped tables for it, and `paylog session` lets another program drive the
/// interactive viewer one JSON action per line.
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
    /// Create the data directory and initialize the configuration file.
    ///
    /// Only `paylog session` reads the configuration, the other commands work without it.
    Init,
    /// Turn raw (date, channel, amount) triples into a dataset.
    ///
    /// The input is a JSON array of `{"day": ..., "channel": ..., "yen": ...}` objects as copied
    /// from the purchase history page. Days like `3月2日` get the current year (or --year), and
    /// a blank day repeats the one before it. The dataset is printed to stdout.
    Extract(ExtractArgs),
    /// Print totals and the grouped tables for a dataset.
    View(ViewArgs),
    /// Drive the interactive viewer with JSON actions on stdin.
    ///
    /// Every redraw is written to stdout as one line of JSON.
    Session(SessionArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the paylog configuration is held. Defaults to ~/paylog
    #[arg(long, env = "PAYLOG_HOME", default_value_t = default_paylog_home())]
    paylog_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, paylog_home: PathBuf) -> Self {
        Self {
            log_level,
            paylog_home: paylog_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn paylog_home(&self) -> &DisplayPath {
        &self.paylog_home
    }
}

/// (Not shown): Args for the `paylog extract` command.
#[derive(Debug, Parser, Clone)]
pub struct ExtractArgs {
    /// The file holding the raw triples. Reads stdin if omitted.
    #[arg(long)]
    file: Option<PathBuf>,

    /// The year given to days that do not name one. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,
}

impl ExtractArgs {
    pub fn new(file: Option<PathBuf>, year: Option<i32>) -> Self {
        Self { file, year }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

/// (Not shown): Args for the `paylog view` command.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// The dataset file. Reads stdin if omitted.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Only include records on or after this day, e.g. 2024/03/01 or 2024-03-01.
    #[arg(long)]
    from: Option<String>,

    /// Only include records on or before this day.
    #[arg(long)]
    to: Option<String>,

    /// Only include records from this channel.
    #[arg(long)]
    channel: Option<String>,
}

impl ViewArgs {
    pub fn new(
        file: Option<PathBuf>,
        from: Option<String>,
        to: Option<String>,
        channel: Option<String>,
    ) -> Self {
        Self {
            file,
            from,
            to,
            channel,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }
}

/// (Not shown): Args for the `paylog session` command.
#[derive(Debug, Parser, Clone)]
pub struct SessionArgs {
    /// A dataset to load before reading any actions.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl SessionArgs {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

fn default_paylog_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("paylog"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --paylog-home or PAYLOG_HOME instead of relying on the default \
                paylog home directory.",
            );
            PathBuf::from("paylog")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
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
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_args() {
        let args = Args::try_parse_from([
            "paylog",
            "--paylog-home",
            "/tmp/ph",
            "view",
            "--file",
            "history.json",
            "--from",
            "2024/03/01",
            "--channel",
            "Alpha",
        ])
        .unwrap();
        assert_eq!(args.common().paylog_home().path(), Path::new("/tmp/ph"));
        match args.command() {
            Command::View(view) => {
                assert_eq!(view.file(), Some(Path::new("history.json")));
                assert_eq!(view.from(), Some("2024/03/01"));
                assert_eq!(view.to(), None);
                assert_eq!(view.channel(), Some("Alpha"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_level() {
        let args = Args::try_parse_from(["paylog", "--log-level", "debug", "init"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert!(matches!(args.command(), Command::Init));
    }

    #[test]
    fn test_parse_extract_year() {
        let args = Args::try_parse_from(["paylog", "extract", "--year", "2023"]).unwrap();
        match args.command() {
            Command::Extract(extract) => {
                assert_eq!(extract.year(), Some(2023));
                assert_eq!(extract.file(), None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
