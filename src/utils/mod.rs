//! Utility modules for common functionality

pub mod terminal;

// Re-export commonly used items
#[allow(unused_imports)]
pub use terminal::{prompt_line, prompt_password};

// vim: ts=4
