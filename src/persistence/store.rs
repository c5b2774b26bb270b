//! JSON file store for session history and level progress

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PersistenceError;
use crate::progress::{LevelProgress, PlayerRecords, ProgressStore};
use crate::sim::session::GameSession;

/// Default session history file name
pub const SESSIONS_FILE: &str = "focus_game_sessions.json";
/// Default level progress file name
pub const PROGRESS_FILE: &str = "focus_game_progress.json";

/// Locations of the two record files
#[derive(Debug, Clone)]
pub struct Store {
    sessions_path: PathBuf,
    progress_path: PathBuf,
}

impl Store {
    pub fn new(sessions_path: impl Into<PathBuf>, progress_path: impl Into<PathBuf>) -> Self {
        Self {
            sessions_path: sessions_path.into(),
            progress_path: progress_path.into(),
        }
    }

    /// Store using the default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(SESSIONS_FILE), dir.join(PROGRESS_FILE))
    }

    pub fn sessions_path(&self) -> &Path {
        &self.sessions_path
    }

    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    pub fn load_sessions(&self) -> Result<Vec<GameSession>, PersistenceError> {
        read_records(&self.sessions_path)
    }

    pub fn load_progress(&self) -> Result<ProgressStore, PersistenceError> {
        read_records::<LevelProgress>(&self.progress_path).map(ProgressStore::from_records)
    }

    /// Load both collections, failing on the first unreadable file
    pub fn load(&self) -> Result<PlayerRecords, PersistenceError> {
        Ok(PlayerRecords::new(self.load_sessions()?, self.load_progress()?))
    }

    /// Load both collections, substituting an empty one for any file that
    /// cannot be read or parsed
    pub fn load_or_default(&self) -> PlayerRecords {
        let sessions = self.load_sessions().unwrap_or_else(|e| {
            log::warn!("{e}; starting with empty session history");
            Vec::new()
        });
        let progress = self.load_progress().unwrap_or_else(|e| {
            log::warn!("{e}; starting with empty level progress");
            ProgressStore::new()
        });
        log::info!(
            "Loaded {} sessions and {} level records",
            sessions.len(),
            progress.records().len()
        );
        PlayerRecords::new(sessions, progress)
    }

    /// Rewrite both files from the in-memory records.
    ///
    /// Both files are encoded and staged next to their targets before either
    /// is replaced, so an encode or staging failure leaves the old pair
    /// untouched. The two final renames are separate steps; a failure
    /// between them can still leave the files out of step.
    pub fn save(&self, records: &PlayerRecords) -> Result<(), PersistenceError> {
        let sessions_tmp = stage_records(&self.sessions_path, &records.sessions)?;
        let progress_tmp = match stage_records(&self.progress_path, records.progress.records()) {
            Ok(tmp) => tmp,
            Err(e) => {
                let _ = fs::remove_file(&sessions_tmp);
                return Err(e);
            }
        };
        if let Err(e) = commit(&sessions_tmp, &self.sessions_path) {
            let _ = fs::remove_file(&sessions_tmp);
            let _ = fs::remove_file(&progress_tmp);
            return Err(e);
        }
        commit(&progress_tmp, &self.progress_path).inspect_err(|_| {
            let _ = fs::remove_file(&progress_tmp);
        })?;
        log::info!(
            "Records saved ({} sessions, {} levels)",
            records.sessions.len(),
            records.progress.records().len()
        );
        Ok(())
    }

    /// Save, logging instead of returning a failure. The in-memory records
    /// stay authoritative either way.
    pub fn save_logged(&self, records: &PlayerRecords) -> bool {
        match self.save(records) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error saving records: {e}");
                false
            }
        }
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PersistenceError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&json).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_error(path: &Path) -> impl Fn(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Encode `records` into a `.tmp` file beside `path` and return its location
fn stage_records<T: Serialize>(path: &Path, records: &[T]) -> Result<PathBuf, PersistenceError> {
    let json = serde_json::to_string(records).map_err(|source| PersistenceError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error(path))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(write_error(path))?;
    Ok(tmp)
}

fn commit(tmp: &Path, path: &Path) -> Result<(), PersistenceError> {
    fs::rename(tmp, path).map_err(write_error(path))
}
