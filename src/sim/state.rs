//! Game state
//!
//! Everything the loop mutates lives in one owned `GameState`; subsystems
//! receive the pieces they need explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::object::GameObject;
use super::session::{ClickResult, SessionOutcome, SessionSummary, SessionTracker, resolve_click};
use super::spawner::SpawnScheduler;
use crate::Millis;
use crate::consts::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
use crate::error::InvalidLevelError;
use crate::levels::{LevelCatalog, LevelConfig};
use crate::progress::PlayerRecords;

/// Loop phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session running (menus, results)
    Idle,
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub catalog: LevelCatalog,
    /// Level selected most recently
    pub current_level: u32,
    pub tracker: SessionTracker,
    pub spawner: SpawnScheduler,
    /// Live objects, oldest first
    pub objects: Vec<GameObject>,
    /// Session history and level progress
    pub records: PlayerRecords,
    pub play_area: Vec2,
    /// Background scroll offset (pixels)
    pub background_offset: f32,
    /// Seconds of unpaused play in this session
    pub game_time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// When the current pause began
    pub(crate) paused_at: Option<Millis>,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and no history
    pub fn new(seed: u64) -> Self {
        Self::with_records(seed, LevelCatalog::standard(), PlayerRecords::default())
    }

    pub fn with_records(seed: u64, catalog: LevelCatalog, records: PlayerRecords) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            catalog,
            current_level: 1,
            tracker: SessionTracker::new(),
            spawner: SpawnScheduler::new(),
            objects: Vec::new(),
            records,
            play_area: Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT),
            background_offset: 0.0,
            game_time: 0.0,
            time_ticks: 0,
            paused_at: None,
            next_id: 1,
        }
    }

    pub fn with_play_area(mut self, width: f32, height: f32) -> Self {
        self.play_area = Vec2::new(width, height);
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Configuration of the level being played, if any
    pub fn active_level(&self) -> Option<&LevelConfig> {
        self.tracker.level()
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn lives(&self) -> u32 {
        self.tracker.lives()
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        self.records.progress.is_unlocked(level)
    }

    /// Start a session on `level`, resetting score, lives, objects and timers
    pub fn start_level(&mut self, level: u32, now: Millis) -> Result<(), InvalidLevelError> {
        let config = match self.catalog.get(level) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Cannot start session: {e}");
                return Err(e);
            }
        };
        self.tracker.start(config, now);
        self.current_level = level;
        self.objects.clear();
        self.spawner.reset();
        self.background_offset = 0.0;
        self.game_time = 0.0;
        self.paused_at = None;
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// Resolve a click against the live objects.
    ///
    /// Returns `None` unless a session is being played. The summary is set
    /// when the click decided the session.
    pub fn handle_click(
        &mut self,
        point: Vec2,
        click_time: Millis,
    ) -> Option<(ClickResult, Option<SessionSummary>)> {
        if self.phase != GamePhase::Playing || !self.tracker.is_active() {
            return None;
        }
        let result = resolve_click(
            &mut self.objects,
            point,
            click_time,
            self.tracker.started_at(),
        );
        let summary = self.tracker.record_click(
            result.is_correct(),
            result.reaction_ms(),
            click_time,
            &mut self.records,
        );
        if summary.is_some() {
            self.finish_session();
        }
        Some((result, summary))
    }

    /// End the running session early with the given outcome
    pub fn end_session(&mut self, outcome: SessionOutcome, now: Millis) -> Option<SessionSummary> {
        let summary = self.tracker.end(outcome, now, &mut self.records)?;
        self.finish_session();
        Some(summary)
    }

    fn finish_session(&mut self) {
        self.objects.clear();
        self.paused_at = None;
        self.phase = GamePhase::Idle;
    }

    /// Freeze the simulation
    pub fn pause(&mut self, now: Millis) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        self.paused_at = Some(now);
        true
    }

    /// Resume play. Object lifespans and the spawn gate skip the paused time.
    pub fn resume(&mut self, now: Millis) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        if let Some(paused_at) = self.paused_at.take() {
            let frozen = (now - paused_at).max(0.0);
            for obj in &mut self.objects {
                obj.spawn_time += frozen;
            }
            self.spawner.shift(frozen);
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// Seconds left before the level's time limit, if it has one
    pub fn time_remaining(&self) -> Option<f32> {
        let limit = self.active_level()?.time_limit?;
        Some((limit as f32 - self.game_time).max(0.0))
    }
}
