//! LLM provider abstractions for Milan.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
