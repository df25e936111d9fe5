use std::path::PathBuf;

mod batch;
mod convert;
mod rules;
mod terminal;

use batch::Batch;
use clap::ArgAction;
use convert::Convert;
use docgen::Config;
use rules::Rules;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a taxonomy/rendering configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };

        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Convert a single source document to Markdown
    Convert(Convert),

    /// Convert every source document under a directory
    Batch(Batch),

    /// List the effective classification rules
    Rules(Rules),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Convert(command) => command.run(config)?,
            Self::Batch(command) => command.run(config)?,
            Self::Rules(command) => command.run(config),
        }
        Ok(())
    }
}
