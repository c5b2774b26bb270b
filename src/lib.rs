//! Focus Catcher - a visual attention training game
//!
//! Core modules:
//! - `levels`: The ten built-in level configurations
//! - `sim`: Real-time simulation (objects, spawning, sessions, tick)
//! - `progress`: Per-level best results and session history
//! - `persistence`: JSON record store
//! - `platform`: Clock and frame pacing
//! - `renderer`: Snapshot of simulation state for presentation
//! - `settings`: Runtime configuration

pub mod autoplay;
pub mod error;
pub mod levels;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, InvalidLevelError, PersistenceError};
pub use levels::{LevelCatalog, LevelConfig, ShapeKind};
pub use progress::{LevelProgress, PlayerRecords, ProgressReport, ProgressStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default play area dimensions (pixels)
    pub const PLAY_AREA_WIDTH: f32 = 1200.0;
    pub const PLAY_AREA_HEIGHT: f32 = 800.0;

    /// Target simulation rate
    pub const TARGET_FPS: u32 = 60;
    /// Largest dt fed to the simulation after a stall
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lives at the start of every session
    pub const START_LIVES: u32 = 3;
    /// Score for clicking a target
    pub const CORRECT_CLICK_POINTS: u32 = 10;
    /// Score lost for a wrong click (score never goes below zero)
    pub const INCORRECT_CLICK_PENALTY: u32 = 5;

    /// Object base size and total jitter range (size = base ± variation/2)
    pub const OBJECT_BASE_SIZE: f32 = 60.0;
    pub const OBJECT_SIZE_VARIATION: f32 = 20.0;
    /// Full range of each velocity component (units/s), centered on zero
    pub const OBJECT_MAX_VELOCITY: f32 = 50.0;
    /// Full range of angular velocity (rad/s), centered on zero
    pub const OBJECT_MAX_SPIN: f32 = 4.0;

    /// Breathing animation bounds and rate (scale units per second)
    pub const SCALE_MIN: f32 = 0.8;
    pub const SCALE_MAX: f32 = 1.2;
    pub const SCALE_RATE: f32 = 0.5;

    /// Spawn inset from the play area edges
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Best accuracy (%) a level needs before it counts as cleared
    pub const UNLOCK_ACCURACY: f64 = 70.0;
}

/// Milliseconds since the unix epoch, as used for every in-game timestamp
pub type Millis = f64;

/// Convert an in-game millisecond timestamp into unix seconds for records
#[inline]
pub fn millis_to_secs(ms: Millis) -> f64 {
    ms / 1000.0
}
