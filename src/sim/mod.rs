//! Real-time simulation module
//!
//! All gameplay logic lives here:
//! - Objects advance by the measured dt each tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, platform or file I/O dependencies

pub mod object;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use object::{DISTRACTOR_PALETTE, GameObject, Rgb, TARGET_PALETTE};
pub use session::{
    ClickResult, GameSession, SessionOutcome, SessionPhase, SessionSummary, SessionTracker,
    resolve_click,
};
pub use spawner::SpawnScheduler;
pub use state::{GamePhase, GameState};
pub use tick::{Click, GameEvent, TickInput, tick};
