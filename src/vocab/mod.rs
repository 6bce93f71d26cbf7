//! HSK vocabulary catalog
//!
//! Read-mostly store of `VocabWord`s, loaded once from static data and
//! queried by level, by id and by substring.

pub mod loader;
mod models;
mod storage;

pub use models::*;
pub use storage::{Result, VocabError, VocabStorage};
