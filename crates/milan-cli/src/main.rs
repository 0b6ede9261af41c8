//! Milan terminal chat entry point.
//!
//! Binary name: `milan`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler. `chat` is the default command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use milan_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::{Cli, Commands, ThemeCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Chat);

    // Shell completions and the persona dump don't need app state
    match &command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "milan", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Persona => {
            cli::persona::print_persona(cli.json)?;
            return Ok(());
        }
        _ => {}
    }

    let state = AppState::init(cli.model).await?;

    match command {
        Commands::Chat => {
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }
        Commands::Ask { text } => {
            cli::ask::ask(&state, &text.join(" "), cli.json).await?;
        }
        Commands::Theme { action } => match action {
            ThemeCommand::Get => cli::theme::show_theme(&state, cli.json).await?,
            ThemeCommand::Set { value } => {
                cli::theme::set_theme(&state, value.as_deref(), cli.json).await?
            }
        },
        Commands::Check => {
            cli::check::check(&state, cli.json).await?;
        }
        Commands::Completions { .. } | Commands::Persona => unreachable!("handled above"),
    }

    Ok(())
}
