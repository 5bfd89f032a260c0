//! Root CLI structure for invite-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "invite-rs")]
#[command(about = "Render invitation effects and deliver invitation answers", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-v`/`-q`; `None` keeps `RUST_LOG` or the `warn` default
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, false) => None,
            (0, true) => Some(log::LevelFilter::Error),
            (1, _) => Some(log::LevelFilter::Info),
            (2, _) => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Particle effect operations
    Fx {
        #[command(subcommand)]
        command: crate::commands::fx::FxCommands,
    },

    /// Print the month grid of the date picker
    Calendar(crate::commands::calendar::CalendarArgs),

    /// Fill in the invitation form and deliver the answer
    Send(crate::commands::send::SendArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
