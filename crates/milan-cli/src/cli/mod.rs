//! CLI command definitions and dispatch for the `milan` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod check;
pub mod persona;
pub mod theme;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with Milan from the terminal.
#[derive(Parser)]
#[command(name = "milan", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Override the model from config.toml.
    #[arg(long, global = true, env = "MILAN_MODEL")]
    pub model: Option<String>,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (default).
    Chat,

    /// Ask a single question and print the reply.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the persona priming prompt.
    Persona,

    /// Show or change the color theme.
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },

    /// Verify the API key and connectivity.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Show the stored preference and the theme it resolves to.
    Get,

    /// Set the preference (prompts when no value is given).
    Set {
        /// light, dark, or system.
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_chat() {
        let cli = Cli::try_parse_from(["milan"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["milan", "ask", "what", "are", "you", "up", "to"]).unwrap();
        match cli.command {
            Some(Commands::Ask { text }) => assert_eq!(text.join(" "), "what are you up to"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_ask_requires_text() {
        assert!(Cli::try_parse_from(["milan", "ask"]).is_err());
    }

    #[test]
    fn test_theme_set_optional_value() {
        let cli = Cli::try_parse_from(["milan", "theme", "set"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                action: ThemeCommand::Set { value: None }
            })
        ));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["milan", "-vv", "--model", "gemini-2.5-flash", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-flash"));
    }
}
