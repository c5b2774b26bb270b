//! Runtime settings
//!
//! Persisted as JSON next to the game data. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH, TARGET_FPS};
use crate::persistence::{PROGRESS_FILE, SESSIONS_FILE, Store};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    pub play_width: f32,
    pub play_height: f32,

    // === Loop ===
    /// Ticks per second the loop paces itself to
    pub target_fps: u32,
    /// Upper bound on the dt handed to the simulation (seconds)
    pub max_frame_dt: f32,
    /// Fixed RNG seed; a fresh seed is drawn per run when unset
    pub seed: Option<u64>,

    // === Storage ===
    pub data_dir: PathBuf,
    pub sessions_file: String,
    pub progress_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_width: PLAY_AREA_WIDTH,
            play_height: PLAY_AREA_HEIGHT,
            target_fps: TARGET_FPS,
            max_frame_dt: MAX_FRAME_DT,
            seed: None,
            data_dir: PathBuf::from("."),
            sessions_file: SESSIONS_FILE.to_string(),
            progress_file: PROGRESS_FILE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file is missing or unusable
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read settings {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Malformed settings {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.target_fps == 0 {
            log::warn!("target_fps must be positive, using {}", defaults.target_fps);
            self.target_fps = defaults.target_fps;
        }
        if !(self.max_frame_dt > 0.0) {
            self.max_frame_dt = defaults.max_frame_dt;
        }
        if !(self.play_width > 0.0 && self.play_height > 0.0) {
            log::warn!("Play area must be positive, using defaults");
            self.play_width = defaults.play_width;
            self.play_height = defaults.play_height;
        }
        self
    }

    /// Record store for the configured data directory and file names
    pub fn store(&self) -> Store {
        Store::new(
            self.data_dir.join(&self.sessions_file),
            self.data_dir.join(&self.progress_file),
        )
    }
}
