//! Welcome banner and empty-state display for chat sessions.

use console::style;

use milan_core::chat::widget::EXAMPLE_PROMPTS;
use milan_types::theme::ResolvedTheme;

/// Print the header shown at the top of a chat session.
pub fn print_welcome_banner(name: &str, model: &str, session_id: &str, theme: ResolvedTheme) {
    println!();
    println!("  {}", style(name).cyan().bold());
    println!("  {}", style("Powered by Google").dim());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!("  {}  {}", style("Theme:").bold(), style(theme).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print the placeholder shown while the transcript is empty.
pub fn print_empty_state() {
    println!("  {}", style("Let's start a conversation").bold());
    println!(
        "  {}",
        style("Ask me about my background, interests, or what I'm working on!").dim()
    );
    println!();
    for (i, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
        println!("  {} {}", style(format!("/{}", i + 1)).cyan(), prompt);
    }
    println!();
}
