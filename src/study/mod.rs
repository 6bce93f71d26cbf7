//! Flashcard study sessions
//!
//! This module provides:
//! - An immutable, browser-style visit history
//! - The flip/next/prev/random navigator over a word sequence
//! - Session construction from lists, levels and start words

mod history;
mod navigator;
mod session;

pub use history::History;
pub use navigator::{Navigator, StudyError};
pub use session::{SessionError, StudySession};
