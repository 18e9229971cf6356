//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_content;
mod preview;

pub use check_content::CheckContent;
pub use preview::Preview;
