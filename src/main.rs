use clap::Parser;
use paylog::args::{Args, Command};
use paylog::{commands, Config, Result};
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
    let home = args.common().paylog_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Extract(extract_args) => {
            commands::extract(extract_args.file(), extract_args.year())
                .await?
                .print()
        }

        Command::View(view_args) => {
            // The configured sorts apply when a config exists, the defaults otherwise.
            let sorts = match Config::load(home).await {
                Ok(config) => config.sorts(),
                Err(e) => {
                    debug!("Using the default sorts: {e:#}");
                    Default::default()
                }
            };
            commands::view(
                view_args.file(),
                view_args.from(),
                view_args.to(),
                view_args.channel(),
                &sorts,
            )
            .await?
            .print()
        }

        Command::Session(session_args) => {
            let config = Config::load(home).await?;
            commands::session(config, session_args.file())
                .await?
                .print()
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
