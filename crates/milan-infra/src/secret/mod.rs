//! API key resolution.

pub mod env;

pub use env::{API_KEY_VARS, resolve_api_key};
