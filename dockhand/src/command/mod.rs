//! Engine command construction.
//!
//! - `line`: argv value with optional stdin and its shell-style rendering
//! - `engine`: the `<binary> [-H host]` prefix shared by every command

mod engine;
mod line;

pub use engine::EngineCommand;
pub use line::CommandLine;
