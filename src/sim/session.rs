//! Session tracking: score, lives, clicks and reaction times for one playthrough
//!
//! `Inactive -> Active -> Completed`. A completed session is finalized exactly
//! once, appended to the history and folded into level progress.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::object::GameObject;
use crate::consts::{CORRECT_CLICK_POINTS, INCORRECT_CLICK_PENALTY, START_LIVES};
use crate::levels::LevelConfig;
use crate::progress::PlayerRecords;
use crate::{Millis, millis_to_secs};

/// One playthrough of a level, in the persisted record layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    pub level: u32,
    /// Unix seconds
    pub start_time: f64,
    /// Unix seconds, set when the session ends
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub correct_clicks: u32,
    #[serde(default)]
    pub incorrect_clicks: u32,
    #[serde(default)]
    pub total_targets: u32,
    /// Reaction time samples in ms, in click order
    #[serde(default)]
    pub reaction_times: Vec<f64>,
    /// Percent, computed at session end
    #[serde(default)]
    pub accuracy: f64,
    /// Mean reaction time in ms, computed at session end
    #[serde(default)]
    pub average_reaction_time: f64,
}

impl GameSession {
    pub fn new(level: u32, now: Millis) -> Self {
        Self {
            id: format!("session_{}", now.round() as u64),
            level,
            start_time: millis_to_secs(now),
            end_time: None,
            correct_clicks: 0,
            incorrect_clicks: 0,
            total_targets: 0,
            reaction_times: Vec::new(),
            accuracy: 0.0,
            average_reaction_time: 0.0,
        }
    }

    pub fn total_clicks(&self) -> u32 {
        self.correct_clicks + self.incorrect_clicks
    }

    /// Percentage of clicks that hit a target (0 with no clicks)
    pub fn compute_accuracy(&self) -> f64 {
        accuracy(self.correct_clicks, self.incorrect_clicks)
    }

    /// Mean of the reaction time samples (0 with no samples)
    pub fn compute_average_reaction_time(&self) -> f64 {
        mean(&self.reaction_times)
    }
}

pub fn accuracy(correct: u32, incorrect: u32) -> f64 {
    let total = correct + incorrect;
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Inactive,
    Active,
    Completed,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Reached the required number of correct clicks
    Won,
    /// Ran out of lives
    OutOfLives,
    /// Level time limit elapsed
    TimeExpired,
}

impl SessionOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, SessionOutcome::Won)
    }
}

/// Emitted once when a session is finalized
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub session: GameSession,
    pub outcome: SessionOutcome,
    pub score: u32,
    pub lives: u32,
    /// Whether the level counted as cleared after this session
    pub level_cleared: bool,
}

/// Result of resolving a click against the object population
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickResult {
    /// Hit an object, which has been removed
    Hit {
        id: u32,
        is_target: bool,
        reaction_ms: f64,
    },
    /// Nothing under the cursor; counts as a wrong click
    Miss { reaction_ms: f64 },
}

impl ClickResult {
    pub fn is_correct(&self) -> bool {
        matches!(self, ClickResult::Hit { is_target: true, .. })
    }

    pub fn reaction_ms(&self) -> f64 {
        match *self {
            ClickResult::Hit { reaction_ms, .. } | ClickResult::Miss { reaction_ms } => reaction_ms,
        }
    }
}

/// Find the topmost object under `point`, remove it and report the click.
///
/// Objects later in `population` were spawned later and draw on top, so the
/// search runs newest to oldest. A miss measures time since `session_start`,
/// unlike hits which measure time since the object spawned.
pub fn resolve_click(
    population: &mut Vec<GameObject>,
    point: Vec2,
    click_time: Millis,
    session_start: Millis,
) -> ClickResult {
    match population.iter().rposition(|obj| obj.hit_test(point)) {
        Some(idx) => {
            let obj = population.remove(idx);
            ClickResult::Hit {
                id: obj.id,
                is_target: obj.is_target,
                reaction_ms: click_time - obj.spawn_time,
            }
        }
        None => ClickResult::Miss {
            reaction_ms: click_time - session_start,
        },
    }
}

/// Owns the active session and its running score and lives
#[derive(Debug, Clone)]
pub struct SessionTracker {
    phase: SessionPhase,
    session: Option<GameSession>,
    level: Option<LevelConfig>,
    /// Session start in ms (the session record keeps seconds)
    started_at: Millis,
    score: u32,
    lives: u32,
    last_summary: Option<SessionSummary>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Inactive,
            session: None,
            level: None,
            started_at: 0.0,
            score: 0,
            lives: START_LIVES,
            last_summary: None,
        }
    }
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    /// The in-progress session record
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn level(&self) -> Option<&LevelConfig> {
        self.level.as_ref()
    }

    /// Summary of the most recently finalized session
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    /// Begin a new session. Any session still active is discarded unrecorded.
    pub fn start(&mut self, level: &LevelConfig, now: Millis) {
        if self.phase == SessionPhase::Active {
            log::warn!("Discarding unfinished session for level {}", level.level);
        }
        self.phase = SessionPhase::Active;
        self.session = Some(GameSession::new(level.level, now));
        self.level = Some(level.clone());
        self.started_at = now;
        self.score = 0;
        self.lives = START_LIVES;
        self.last_summary = None;
        log::info!("Level {} ({}) started", level.level, level.name);
    }

    /// Count a target spawned during the session
    pub fn note_target_spawned(&mut self) {
        if let (SessionPhase::Active, Some(session)) = (self.phase, self.session.as_mut()) {
            session.total_targets += 1;
        }
    }

    /// Record a click and end the session if it was decisive.
    ///
    /// Returns the summary when this click won or lost the session. Ignored
    /// unless a session is active.
    pub fn record_click(
        &mut self,
        is_correct: bool,
        reaction_ms: f64,
        now: Millis,
        records: &mut PlayerRecords,
    ) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let session = self.session.as_mut()?;

        if is_correct {
            session.correct_clicks += 1;
            self.score += CORRECT_CLICK_POINTS;
        } else {
            session.incorrect_clicks += 1;
            self.score = self.score.saturating_sub(INCORRECT_CLICK_PENALTY);
            self.lives = self.lives.saturating_sub(1);
        }
        session.reaction_times.push(reaction_ms);

        let required = self
            .level
            .as_ref()
            .map(|l| l.required_correct_clicks)
            .unwrap_or(u32::MAX);
        if session.correct_clicks >= required {
            self.end(SessionOutcome::Won, now, records)
        } else if self.lives == 0 {
            self.end(SessionOutcome::OutOfLives, now, records)
        } else {
            None
        }
    }

    /// Finalize the active session.
    ///
    /// No-op unless a session is active, so calling it again after the
    /// session completed never double-records.
    pub fn end(
        &mut self,
        outcome: SessionOutcome,
        now: Millis,
        records: &mut PlayerRecords,
    ) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let mut session = self.session.take()?;

        let end_time = millis_to_secs(now);
        session.end_time = Some(end_time);
        session.accuracy = session.compute_accuracy();
        session.average_reaction_time = session.compute_average_reaction_time();

        records.record_session(&session, end_time);
        let level_cleared = records
            .progress
            .get(session.level)
            .is_some_and(|p| p.is_cleared());

        log::info!(
            "Session {} ended ({:?}): accuracy {:.1}%, avg reaction {:.0}ms, score {}",
            session.id,
            outcome,
            session.accuracy,
            session.average_reaction_time,
            self.score
        );

        let summary = SessionSummary {
            session,
            outcome,
            score: self.score,
            lives: self.lives,
            level_cleared,
        };
        self.phase = SessionPhase::Completed;
        self.last_summary = Some(summary.clone());
        Some(summary)
    }

    /// Drop back to `Inactive` (leaving the results screen)
    pub fn reset(&mut self) {
        if self.phase != SessionPhase::Active {
            self.phase = SessionPhase::Inactive;
            self.level = None;
        }
    }

    /// Live accuracy for the HUD (0 with no clicks yet)
    pub fn current_accuracy(&self) -> f64 {
        self.session
            .as_ref()
            .map(GameSession::compute_accuracy)
            .unwrap_or(0.0)
    }

    /// Correct clicks as a percentage of the level requirement
    pub fn progress_percent(&self) -> f64 {
        match (&self.session, &self.level) {
            (Some(s), Some(l)) => {
                (s.correct_clicks as f64 / l.required_correct_clicks as f64 * 100.0).min(100.0)
            }
            _ => 0.0,
        }
    }
}
