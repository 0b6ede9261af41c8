//! One-shot question: prime, ask once, print the reply.

use anyhow::Result;
use console::style;

use milan_types::chat::{Readiness, TurnOutcome};

use crate::state::AppState;

use super::chat::renderer::{ChatRenderer, thinking_spinner};

pub async fn ask(state: &AppState, text: &str, json: bool) -> Result<()> {
    let provider = state.provider()?;
    let session = state.new_session(provider);

    let spinner = (!json).then(|| thinking_spinner("Thinking..."));
    let readiness = session.start().await;
    let outcome = session.submit(text).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let reply = session
        .transcript()
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();
    session.dispose();

    if json {
        let out = serde_json::json!({
            "question": text,
            "reply": reply,
            "outcome": outcome,
            "readiness": readiness,
            "model": session.model(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if readiness == Readiness::Degraded {
            eprintln!(
                "  {} Persona setup failed; reply may sound generic.",
                style("!").yellow().bold()
            );
        }
        let renderer = ChatRenderer::new(state.theme_service.resolved().await);
        if let Some(message) = session.transcript().last() {
            renderer.print_message(message);
        }
        println!();
    }

    match outcome {
        TurnOutcome::Replied => Ok(()),
        TurnOutcome::Fallback => anyhow::bail!("request failed; rerun with -v for details"),
        TurnOutcome::Rejected(reason) => anyhow::bail!("question not sent: {reason:?}"),
    }
}
