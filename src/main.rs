mod cli;
mod commands;
mod discussion;
mod infra;
mod shared;
mod storage;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli { verbose, command } = Cli::parse();

    if let Commands::Completions { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let config = shared::config::load_config().context("Failed to load config")?;
    let _log_guard = shared::logging::init(verbose, config.log.file.as_deref())?;

    match command {
        Commands::Scrape(args) => commands::scrape::run(&args, &config).await?,
        Commands::Show(args) => commands::show::run(&args, &config)?,
        Commands::Config(cmd) => cmd.run()?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
