//! Presentation binding between a draft buffer and a chat session.

use std::sync::Arc;

use milan_types::chat::{RejectReason, TurnOutcome};

use super::draft::DraftInput;
use super::session::SessionManager;

/// Canned prompts offered on the empty-state screen.
pub const EXAMPLE_PROMPTS: [&str; 2] = [
    "What are you studying at university?",
    "What are your plans this summer?",
];

/// One chat widget: a session plus the draft being composed.
pub struct ChatWidget {
    session: Arc<SessionManager>,
    draft: DraftInput,
}

impl ChatWidget {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            draft: DraftInput::new(),
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftInput {
        &mut self.draft
    }

    /// False while a turn is in flight or the draft is blank.
    pub fn can_submit(&self) -> bool {
        !self.draft.is_blank() && !self.session.is_in_flight()
    }

    /// Drop a whitespace-only draft so it is not carried into the next
    /// message. Returns true when something was discarded.
    pub fn discard_blank_draft(&mut self) -> bool {
        if self.draft.is_blank() && !self.draft.text().is_empty() {
            self.draft.clear();
            return true;
        }
        false
    }

    /// Submit the draft. The draft is cleared as soon as the turn is accepted
    /// and restored if the session rejects it.
    pub async fn submit_draft(&mut self) -> TurnOutcome {
        if self.draft.is_blank() {
            return TurnOutcome::Rejected(RejectReason::EmptyInput);
        }
        if self.session.is_in_flight() {
            return TurnOutcome::Rejected(RejectReason::InFlight);
        }

        let text = self.draft.take();
        let outcome = self.session.submit(&text).await;
        if !outcome.is_accepted() {
            self.draft.set(text);
        }
        outcome
    }

    /// Pre-fill the draft with an example prompt and submit it.
    ///
    /// Returns `None` for an out-of-range index.
    pub async fn run_example(&mut self, index: usize) -> Option<TurnOutcome> {
        let prompt = EXAMPLE_PROMPTS.get(index)?;
        self.draft.set(*prompt);
        Some(self.submit_draft().await)
    }
}
