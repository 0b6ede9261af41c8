//! Storage abstractions for Milan.
//!
//! Implementations live in milan-infra.

pub mod preference;
