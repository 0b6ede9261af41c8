//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! proper handling of EOF (Ctrl+D) and interrupt (Ctrl+C) signals. A line
//! ending in `\` continues the draft on the next line.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// User submitted a line.
    Line(String),
    /// User ended a line with `\` to keep composing.
    Continue(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new chat input handler with the given initial prompt.
    ///
    /// Returns the input handler and a `SharedWriter` that can be used to
    /// print output without interfering with the readline prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    pub fn update_prompt(&mut self, prompt: &str) {
        let _ = self.rl.update_prompt(prompt);
    }

    /// Read a line of input.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                self.rl.add_history_entry(line.clone());
                classify_line(&line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}

fn classify_line(line: &str) -> InputEvent {
    let line = line.trim_end();
    match line.strip_suffix('\\') {
        Some(head) => InputEvent::Continue(head.to_string()),
        None => InputEvent::Line(line.to_string()),
    }
}
