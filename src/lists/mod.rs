//! Flashcard lists
//!
//! This module provides:
//! - List CRUD and ordering (one JSON record per list)
//! - The Favorites list, auto-created and protected from rename/delete
//! - The active list selection

mod models;
mod storage;

pub use models::*;
pub use storage::{ListError, ListStorage, Result};
