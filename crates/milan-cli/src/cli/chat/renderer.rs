//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code block
//! syntax highlighting. The skin and highlight theme follow the resolved
//! light/dark theme.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use milan_types::chat::{FALLBACK_REPLY, Message, MessageRole};
use milan_types::theme::ResolvedTheme;

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    theme: ResolvedTheme,
    skin: MadSkin,
    syntax_set: SyntaxSet,
    highlight_theme: Option<Theme>,
}

impl ChatRenderer {
    pub fn new(theme: ResolvedTheme) -> Self {
        let (mut skin, accent, highlight_name) = match theme {
            ResolvedTheme::Dark => (MadSkin::default_dark(), Color::Cyan, "base16-ocean.dark"),
            ResolvedTheme::Light => (MadSkin::default_light(), Color::DarkBlue, "InspiredGitHub"),
        };

        skin.bold.set_fg(accent);
        skin.headers[0].set_fg(accent);
        skin.headers[1].set_fg(accent);
        skin.inline_code.set_fg(match theme {
            ResolvedTheme::Dark => Color::Yellow,
            ResolvedTheme::Light => Color::DarkMagenta,
        });

        let mut theme_set = ThemeSet::load_defaults();

        Self {
            theme,
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            highlight_theme: theme_set.themes.remove(highlight_name),
        }
    }

    pub fn theme(&self) -> ResolvedTheme {
        self.theme
    }

    /// Render a complete markdown response with syntax-highlighted code blocks.
    ///
    /// Code fences are highlighted via syntect; everything else is rendered
    /// through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") && in_code_block {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&format!("{}", self.skin.term_text(line)));
            }
        }

        // Unclosed code block
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// Print one transcript message with its speaker label.
    pub fn print_message(&self, message: &Message) {
        match message.role {
            MessageRole::User => {
                println!("  {} {}", style("You").green().bold(), message.content);
            }
            MessageRole::Assistant if message.content == FALLBACK_REPLY => {
                println!(
                    "\n  {} {}",
                    style("Milan").cyan().bold(),
                    style(&message.content).yellow()
                );
            }
            MessageRole::Assistant => {
                let rendered = self.render_final(&message.content);
                println!("\n  {} {}", style("Milan").cyan().bold(), rendered.trim());
            }
        }
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let Some(theme) = self.highlight_theme.as_ref() else {
            return code
                .lines()
                .map(|l| format!("  {l}\n"))
                .collect();
        };

        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut h = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

/// Steady-ticking spinner shown while a request is in flight.
pub fn thinking_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_text_keeps_words() {
        let renderer = ChatRenderer::new(ResolvedTheme::Dark);
        let out = renderer.render_final("Yeah, LLM stuff at 8090.");
        assert!(out.contains("LLM stuff at 8090"));
    }

    #[test]
    fn test_code_block_is_labelled_and_highlighted() {
        let renderer = ChatRenderer::new(ResolvedTheme::Light);
        let out = renderer.render_final("Here:\n```python\nprint('hi')\n```\n");
        assert!(out.contains("--- python ---"));
        assert!(out.contains("\x1b["));
        assert!(out.contains("print"));
    }

    #[test]
    fn test_unclosed_code_block_still_rendered() {
        let renderer = ChatRenderer::new(ResolvedTheme::Dark);
        let out = renderer.render_final("```rust\nfn main() {}");
        assert!(out.contains("main"));
    }

    #[test]
    fn test_both_highlight_themes_exist() {
        assert!(ChatRenderer::new(ResolvedTheme::Dark).highlight_theme.is_some());
        assert!(ChatRenderer::new(ResolvedTheme::Light).highlight_theme.is_some());
    }
}
