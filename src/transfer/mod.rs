//! Import and export of flashcard lists as portable JSON files
//!
//! Provides:
//! - Export of a list together with the words it references
//! - Import of single documents and batches of files

mod errors;
mod export;
mod import;
mod models;

pub use errors::{TransferError, TransferResult};
pub use export::{export_file_name, export_list, write_export};
pub use import::{import_document, import_file, import_files, parse_document};
pub use models::*;
