//! Chat session management.
//!
//! - `conversation`: the remote conversation client (history + provider)
//! - `session`: the session manager sequencing user turns
//! - `events`: broadcast of transcript/in-flight/readiness changes
//! - `draft` / `widget`: presentation-side input buffer and bindings

pub mod conversation;
pub mod draft;
pub mod events;
pub mod session;
pub mod widget;
