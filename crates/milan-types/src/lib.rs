//! Shared domain types for the Milan chat client.
//!
//! Messages, transcripts, generation settings, theme preferences, application
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod theme;
