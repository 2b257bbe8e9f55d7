//! Interactive chat module
//!
//! Line-based chat loop over the question pipeline.

mod repl;

pub use repl::{ChatRepl, ReplInput};
