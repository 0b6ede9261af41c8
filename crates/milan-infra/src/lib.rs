//! Infrastructure layer for Milan.
//!
//! Contains implementations of the traits defined in `milan-core`: the
//! Gemini HTTP provider, the file-backed preference store, and the host
//! color-scheme probe. Also resolves the data directory, config file, and
//! API key at startup.

pub mod color_scheme;
pub mod config;
pub mod filesystem;
pub mod llm;
pub mod preference;
pub mod secret;
