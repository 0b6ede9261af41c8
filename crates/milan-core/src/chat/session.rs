//! Session manager for chat sessions.
//!
//! Owns the visible transcript, the in-flight flag, and the persona readiness
//! flag; sequences user turns against a [`RemoteConversation`]. At most one
//! request is outstanding per session. A submission made while one is in
//! flight is dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use milan_types::chat::{
    FALLBACK_REPLY, Message, Readiness, RejectReason, SessionEvent, Transcript, TurnOutcome,
};
use milan_types::llm::LlmError;

use super::conversation::RemoteConversation;
use super::events::EventBus;

/// Mutable session state guarded by a single lock.
///
/// The lock is never held across an `.await`.
struct SessionState {
    transcript: Transcript,
    readiness: Readiness,
    turn_token: Option<CancellationToken>,
    turn_count: u32,
}

/// Manages the lifecycle and state of a single chat session.
///
/// All operations take `&self`, so the session can be shared (e.g. in an
/// `Arc`) between the input loop and a renderer.
pub struct SessionManager {
    id: Uuid,
    started_at: DateTime<Utc>,
    conversation: RemoteConversation,
    persona_prompt: String,
    request_timeout: Duration,
    state: Mutex<SessionState>,
    in_flight: AtomicBool,
    shutdown: CancellationToken,
    events: EventBus,
}

impl SessionManager {
    /// Create a session. Call [`start`](Self::start) before accepting input.
    pub fn new(
        conversation: RemoteConversation,
        persona_prompt: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            conversation,
            persona_prompt,
            request_timeout,
            state: Mutex::new(SessionState {
                transcript: Transcript::new(),
                readiness: Readiness::Pending,
                turn_token: None,
                turn_count: 0,
            }),
            in_flight: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            events: EventBus::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn model(&self) -> &str {
        self.conversation.model()
    }

    pub fn provider_name(&self) -> &str {
        self.conversation.provider_name()
    }

    /// Snapshot of the visible transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock_state().transcript.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn readiness(&self) -> Readiness {
        self.lock_state().readiness
    }

    /// Number of completed turns (replies and fallbacks).
    pub fn turn_count(&self) -> u32 {
        self.lock_state().turn_count
    }

    pub fn is_disposed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Subscribe to transcript, in-flight, and readiness changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Prime the remote conversation with the persona prompt.
    ///
    /// The reply is discarded and never enters the transcript. A failure is
    /// not retried; it leaves the session [`Readiness::Degraded`] but usable.
    /// No-op when already ready, when disposed, or while a request is in
    /// flight.
    pub async fn start(&self) -> Readiness {
        let current = self.readiness();
        if current == Readiness::Ready || self.is_disposed() {
            return current;
        }

        let Some(token) = self.begin_request() else {
            return current;
        };

        let readiness = match self.call_remote(&self.persona_prompt, &token).await {
            Ok(_) => {
                info!(session_id = %self.id, "Persona primed");
                Readiness::Ready
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Persona priming failed, session degraded");
                Readiness::Degraded
            }
        };

        self.lock_state().readiness = readiness;
        self.events.publish(SessionEvent::ReadinessChanged { readiness });
        self.end_request();
        readiness
    }

    /// Submit one user turn.
    ///
    /// Blank input, a disposed session, or an outstanding request make this a
    /// no-op returning [`TurnOutcome::Rejected`]. Otherwise exactly one user
    /// message and then exactly one assistant message (reply or fallback) are
    /// appended, and in-flight is false again on return.
    pub async fn submit(&self, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::Rejected(RejectReason::EmptyInput);
        }
        if self.is_disposed() {
            return TurnOutcome::Rejected(RejectReason::Disposed);
        }
        let Some(token) = self.begin_request() else {
            return TurnOutcome::Rejected(RejectReason::InFlight);
        };

        self.append(Message::user(text));

        let outcome = match self.call_remote(text, &token).await {
            Ok(reply) => {
                self.append(Message::assistant(reply));
                TurnOutcome::Replied
            }
            Err(e) => {
                match e {
                    LlmError::Cancelled => warn!(session_id = %self.id, "Turn cancelled"),
                    _ => error!(session_id = %self.id, error = %e, "Turn failed"),
                }
                self.append(Message::assistant(FALLBACK_REPLY));
                TurnOutcome::Fallback
            }
        };

        self.lock_state().turn_count += 1;
        self.end_request();
        outcome
    }

    /// Abandon the outstanding turn, if any. It completes via the fallback path.
    ///
    /// Returns true if a request was in flight.
    pub fn cancel_turn(&self) -> bool {
        match self.lock_state().turn_token.as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Tear the session down: cancels any outstanding request and rejects
    /// all later submissions.
    pub fn dispose(&self) {
        if !self.shutdown.is_cancelled() {
            info!(session_id = %self.id, turns = self.turn_count(), "Session disposed");
        }
        self.shutdown.cancel();
    }

    /// Claim the in-flight slot and create this request's cancellation token.
    fn begin_request(&self) -> Option<CancellationToken> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        let token = self.shutdown.child_token();
        self.lock_state().turn_token = Some(token.clone());
        self.events
            .publish(SessionEvent::InFlightChanged { in_flight: true });
        Some(token)
    }

    fn end_request(&self) {
        self.lock_state().turn_token = None;
        self.in_flight.store(false, Ordering::Release);
        self.events
            .publish(SessionEvent::InFlightChanged { in_flight: false });
    }

    async fn call_remote(&self, text: &str, token: &CancellationToken) -> Result<String, LlmError> {
        let timeout = self.request_timeout;
        tokio::select! {
            _ = token.cancelled() => Err(LlmError::Cancelled),
            result = tokio::time::timeout(timeout, self.conversation.send_turn(text)) => {
                result.unwrap_or(Err(LlmError::Timeout { secs: timeout.as_secs() }))
            }
        }
    }

    fn append(&self, message: Message) {
        let index = self.lock_state().transcript.push(message.clone());
        self.events
            .publish(SessionEvent::MessageAppended { index, message });
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
