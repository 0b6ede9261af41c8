//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for help, history,
//! example prompts, and the theme.

use console::style;

use milan_core::chat::widget::EXAMPLE_PROMPTS;
use milan_types::theme::ThemePreference;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Show the transcript so far.
    History,
    /// Show session status.
    Status,
    /// Submit an example prompt (zero-based index).
    Example(usize),
    /// Show (`None`) or set the theme.
    Theme(Option<ThemePreference>),
    /// Unknown or malformed command, with a message for the user.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/history" => ChatCommand::History,
        "/status" => ChatCommand::Status,
        "/example" | "/ex" => match arg {
            Some(n) => parse_example(n),
            None => ChatCommand::Unknown("/example requires a number".to_string()),
        },
        "/theme" => match arg.map(str::parse::<ThemePreference>) {
            None => ChatCommand::Theme(None),
            Some(Ok(pref)) => ChatCommand::Theme(Some(pref)),
            Some(Err(e)) => ChatCommand::Unknown(e),
        },
        other => match other.strip_prefix('/').map(parse_example) {
            Some(ChatCommand::Example(i)) => ChatCommand::Example(i),
            _ => ChatCommand::Unknown(other.to_string()),
        },
    };
    Some(command)
}

/// One-based number to zero-based example index.
fn parse_example(n: &str) -> ChatCommand {
    match n.parse::<usize>() {
        Ok(i) if (1..=EXAMPLE_PROMPTS.len()).contains(&i) => ChatCommand::Example(i - 1),
        _ => ChatCommand::Unknown(format!(
            "example must be between 1 and {}",
            EXAMPLE_PROMPTS.len()
        )),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}          {}", style("/help").cyan(), "Show this help message");
    println!("  {}         {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}          {}", style("/exit").cyan(), "End the chat session");
    println!("  {}       {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {}        {}", style("/status").cyan(), "Show session status");
    println!("  {}     {}", style("/example N").cyan(), "Ask example prompt N (or /1, /2)");
    println!("  {} {}", style("/theme [mode]").cyan(), "Show or set light, dark, system");
    println!();
    println!(
        "  {}",
        style("End a line with \\ for a new line. Ctrl+C cancels a pending reply, Ctrl+D exits.").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_clear_history_status() {
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("/cls"), Some(ChatCommand::Clear));
        assert_eq!(parse("/history"), Some(ChatCommand::History));
        assert_eq!(parse("/STATUS"), Some(ChatCommand::Status));
    }

    #[test]
    fn test_parse_example() {
        assert_eq!(parse("/example 1"), Some(ChatCommand::Example(0)));
        assert_eq!(parse("/example 2"), Some(ChatCommand::Example(1)));
        assert_eq!(parse("/1"), Some(ChatCommand::Example(0)));
        assert_eq!(parse("/2"), Some(ChatCommand::Example(1)));
        assert!(matches!(parse("/example 3"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/example"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/0"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse("/theme"), Some(ChatCommand::Theme(None)));
        assert_eq!(
            parse("/theme Dark"),
            Some(ChatCommand::Theme(Some(ThemePreference::Dark)))
        );
        assert!(matches!(parse("/theme sepia"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("/nope"), Some(ChatCommand::Unknown("/nope".to_string())));
    }
}
