//! Business logic and port definitions for Milan.
//!
//! This crate defines the traits the infrastructure layer implements
//! (`LlmProvider`, `PreferenceStore`, `ColorSchemeProbe`) and the chat
//! session logic built on them. It depends only on `milan-types` -- never on
//! `milan-infra` or any HTTP/IO crate.

pub mod chat;
pub mod llm;
pub mod persona;
pub mod service;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
