//! Interactive CLI chat experience for Milan.
//!
//! Implements the chat loop: persona priming, welcome banner and empty
//! state, thinking spinner, markdown rendering, slash commands, and turn
//! cancellation. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
