//! Save/load of player records
//!
//! Features:
//! - Two plain JSON arrays: session history and level progress
//! - Whole-file rewrite through a temp file and rename
//! - Missing files load as empty; unreadable files are logged and skipped

pub mod store;

pub use store::{PROGRESS_FILE, SESSIONS_FILE, Store};
