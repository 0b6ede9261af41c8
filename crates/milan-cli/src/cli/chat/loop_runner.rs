//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: session creation, persona
//! priming, welcome banner, the input loop with slash commands, turn
//! cancellation, and session disposal.

use std::future::Future;
use std::sync::Arc;

use console::style;
use tracing::{info, warn};

use milan_core::chat::session::SessionManager;
use milan_core::chat::widget::ChatWidget;
use milan_core::persona::Persona;
use milan_types::chat::{Readiness, RejectReason, TurnOutcome};
use milan_types::theme::ThemePreference;

use crate::state::AppState;

use super::banner::{print_empty_state, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, thinking_spinner};

/// What the loop should do after a turn finishes.
enum AfterTurn {
    Continue,
    Exit,
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    // Missing API key is fatal before anything is drawn
    let provider = state.provider()?;

    let session = Arc::new(state.new_session(provider));
    let mut widget = ChatWidget::new(Arc::clone(&session));
    let persona = Persona::milan();

    let mut renderer = ChatRenderer::new(state.theme_service.resolved().await);
    let session_id = session.id().to_string();
    print_welcome_banner(persona.name, session.model(), &session_id, renderer.theme());

    let spinner = thinking_spinner("Getting ready...");
    let readiness = session.start().await;
    spinner.finish_and_clear();
    if readiness == Readiness::Degraded {
        eprintln!(
            "  {} Couldn't set up the persona; replies may sound generic.",
            style("!").yellow().bold()
        );
        println!();
    }

    print_empty_state();

    let prompt = format!("  {} ", style("You >").green().bold());
    let continuation = format!("  {} ", style("    .").green().dim());
    let (mut chat_input, _writer) = ChatInput::new(prompt.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                if !widget.draft().is_blank() {
                    widget.draft_mut().clear();
                    chat_input.update_prompt(&prompt);
                }
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Continue(text) => {
                widget.draft_mut().push_str(&text);
                widget.draft_mut().insert_newline();
                chat_input.update_prompt(&continuation);
                continue;
            }
            InputEvent::Line(text) => {
                let composing = widget.draft().is_multiline();
                widget.draft_mut().push_str(&text);
                chat_input.update_prompt(&prompt);

                // Slash commands only apply to single-line input
                if !composing {
                    if let Some(cmd) = commands::parse(&text) {
                        widget.draft_mut().clear();
                        let after = match cmd {
                            ChatCommand::Help => {
                                commands::print_help();
                                AfterTurn::Continue
                            }
                            ChatCommand::Clear => {
                                chat_input.clear();
                                print_welcome_banner(
                                    persona.name,
                                    session.model(),
                                    &session_id,
                                    renderer.theme(),
                                );
                                if session.transcript().is_empty() {
                                    print_empty_state();
                                }
                                AfterTurn::Continue
                            }
                            ChatCommand::Exit => AfterTurn::Exit,
                            ChatCommand::History => {
                                print_history(&session, &renderer);
                                AfterTurn::Continue
                            }
                            ChatCommand::Status => {
                                print_status(state, &session, &renderer).await;
                                AfterTurn::Continue
                            }
                            ChatCommand::Example(index) => {
                                let turn = async { widget.run_example(index).await };
                                let (outcome, after) =
                                    drive_turn(turn, &session, &mut chat_input).await;
                                if let Some(outcome) = outcome {
                                    report_outcome(outcome, &session, &renderer);
                                }
                                after
                            }
                            ChatCommand::Theme(choice) => {
                                if let Some(updated) = change_theme(state, choice).await {
                                    renderer = updated;
                                }
                                AfterTurn::Continue
                            }
                            ChatCommand::Unknown(message) => {
                                println!(
                                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                    style("?").yellow().bold(),
                                    style(message).dim()
                                );
                                AfterTurn::Continue
                            }
                        };
                        if matches!(after, AfterTurn::Exit) {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        continue;
                    }
                }

                if !widget.can_submit() {
                    widget.discard_blank_draft();
                    continue;
                }

                let (outcome, after) =
                    drive_turn(widget.submit_draft(), &session, &mut chat_input).await;
                report_outcome(outcome, &session, &renderer);
                if matches!(after, AfterTurn::Exit) {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
            }
        }
    }

    info!(turns = session.turn_count(), "Chat loop finished");
    session.dispose();
    Ok(())
}

/// Await a turn while watching the keyboard.
///
/// Ctrl+C cancels the pending request (it completes with the fallback reply).
/// Lines typed meanwhile are dropped; a second submission is never queued.
async fn drive_turn<F, T>(
    turn: F,
    session: &SessionManager,
    chat_input: &mut ChatInput,
) -> (T, AfterTurn)
where
    F: Future<Output = T>,
{
    let spinner = thinking_spinner("Thinking...");
    let mut after = AfterTurn::Continue;
    tokio::pin!(turn);

    let result = loop {
        tokio::select! {
            result = &mut turn => break result,
            event = chat_input.read_line() => match event {
                InputEvent::Interrupted => {
                    if session.cancel_turn() {
                        spinner.set_message("Cancelling...");
                    }
                }
                InputEvent::Eof => {
                    session.cancel_turn();
                    after = AfterTurn::Exit;
                }
                InputEvent::Line(_) | InputEvent::Continue(_) => {
                    spinner.println(format!(
                        "  {}",
                        style("Still waiting on the last reply; that message was not sent.").dim()
                    ));
                }
            },
        }
    };

    spinner.finish_and_clear();
    (result, after)
}

fn report_outcome(outcome: TurnOutcome, session: &SessionManager, renderer: &ChatRenderer) {
    match outcome {
        TurnOutcome::Replied | TurnOutcome::Fallback => {
            if let Some(reply) = session.transcript().last() {
                renderer.print_message(reply);
            }
            println!();
        }
        TurnOutcome::Rejected(RejectReason::InFlight) => {
            println!("  {}", style("Still waiting on the last reply.").dim());
        }
        TurnOutcome::Rejected(reason) => {
            warn!(?reason, "Submission rejected");
        }
    }
}

fn print_history(session: &SessionManager, renderer: &ChatRenderer) {
    let transcript = session.transcript();
    println!();
    if transcript.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for message in &transcript {
        renderer.print_message(message);
    }
    println!();
}

async fn print_status(state: &AppState, session: &SessionManager, renderer: &ChatRenderer) {
    let preference = state.theme_service.load_preference().await;
    println!();
    println!("  {}  {}", style("Session:").bold(), session.id());
    println!("  {}  {}", style("Started:").bold(), session.started_at().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  {}  {} ({})", style("Model:").bold(), session.model(), session.provider_name());
    println!("  {}  {}", style("Persona:").bold(), session.readiness());
    println!("  {}  {}", style("Turns:").bold(), session.turn_count());
    println!("  {}  {}", style("Messages:").bold(), session.transcript().len());
    println!("  {}  {} ({})", style("Theme:").bold(), renderer.theme(), preference);
    println!();
}

/// Show or update the theme. Returns a new renderer when the theme changed.
async fn change_theme(state: &AppState, choice: Option<ThemePreference>) -> Option<ChatRenderer> {
    let Some(preference) = choice else {
        let current = state.theme_service.load_preference().await;
        let resolved = state.theme_service.resolved().await;
        println!("\n  Theme: {} ({})\n", style(resolved).cyan(), current);
        return None;
    };

    match state.theme_service.set_preference(preference).await {
        Ok(resolved) => {
            println!(
                "\n  {} Theme set to {} ({})\n",
                style("*").cyan().bold(),
                preference,
                resolved
            );
            Some(ChatRenderer::new(resolved))
        }
        Err(e) => {
            // Theme still applies for this session
            eprintln!("\n  {} Failed to save theme: {e}\n", style("!").red().bold());
            Some(ChatRenderer::new(
                preference.resolve(state.theme_service.host_prefers_dark()),
            ))
        }
    }
}
