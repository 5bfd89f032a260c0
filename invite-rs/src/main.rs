//! Main entry point for the invite-rs CLI

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use invite_rs::cli::{Cli, Commands};
use invite_rs::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    // Explicit flags win over RUST_LOG
    if let Some(level) = cli.log_level() {
        logger.filter_level(level);
    }
    logger.init();

    match cli.command {
        Commands::Fx { command } => commands::fx::execute(command, cli.quiet),
        Commands::Calendar(args) => commands::calendar::execute(args),
        Commands::Send(args) => commands::send::execute(args).await,
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
