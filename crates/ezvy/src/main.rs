mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Setup and config commands don't need an existing session
        Command::Setup(args) => commands::setup::handle(args, &cli.global).await,
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "ezvy", &mut std::io::stdout());
            Ok(())
        }

        // Everything else opens an account session first
        cmd => {
            let (account_name, account_config) = config::resolve_account_config(&cli.global)?;
            let account = ezvy_core::Account::new(account_config)
                .map_err(|e| CliError::from_core(e, &account_name))?;

            tracing::debug!(account = %account_name, command = ?cmd, "dispatching command");
            account
                .connect()
                .await
                .map_err(|e| CliError::from_core(e, &account_name))?;

            commands::dispatch(cmd, &account, &account_name, &cli.global).await
        }
    }
}
