//! Level progress and session history
//!
//! One progress record per level, created on the first completed session and
//! improved monotonically afterwards. Unlocking is driven by best accuracy.

use serde::{Deserialize, Serialize};

use crate::consts::UNLOCK_ACCURACY;
use crate::sim::session::{GameSession, mean};

/// Best-ever results for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// Percent
    #[serde(default)]
    pub best_accuracy: f64,
    /// Lowest average reaction time in ms (0 = not set)
    #[serde(default)]
    pub best_reaction_time: f64,
    #[serde(default)]
    pub times_played: u32,
    /// Unix seconds
    #[serde(default)]
    pub last_played: f64,
}

impl LevelProgress {
    /// Whether this level's best accuracy clears the unlock threshold
    pub fn is_cleared(&self) -> bool {
        self.best_accuracy >= UNLOCK_ACCURACY
    }
}

/// Per-level progress records, in first-completion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    records: Vec<LevelProgress>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<LevelProgress>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LevelProgress] {
        &self.records
    }

    pub fn get(&self, level: u32) -> Option<&LevelProgress> {
        self.records.iter().find(|p| p.level == level)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fold one completed session into the level's record.
    ///
    /// Best accuracy only rises. Best reaction time only falls once set; an
    /// unset (zero) best adopts whatever the session produced.
    pub fn record_completion(
        &mut self,
        level: u32,
        accuracy: f64,
        avg_reaction_time: f64,
        timestamp: f64,
    ) -> &LevelProgress {
        match self.records.iter().position(|p| p.level == level) {
            Some(idx) => {
                let p = &mut self.records[idx];
                p.best_accuracy = p.best_accuracy.max(accuracy);
                p.best_reaction_time = if p.best_reaction_time > 0.0 {
                    p.best_reaction_time.min(avg_reaction_time)
                } else {
                    avg_reaction_time
                };
                p.times_played += 1;
                p.last_played = timestamp;
                &self.records[idx]
            }
            None => {
                self.records.push(LevelProgress {
                    level,
                    best_accuracy: accuracy,
                    best_reaction_time: avg_reaction_time,
                    times_played: 1,
                    last_played: timestamp,
                });
                &self.records[self.records.len() - 1]
            }
        }
    }

    /// Level 1 is always open. Any other level opens once its own best
    /// accuracy reaches the threshold, not the level before it.
    pub fn is_unlocked(&self, level: u32) -> bool {
        level == 1 || self.get(level).is_some_and(LevelProgress::is_cleared)
    }

    /// Number of levels whose best accuracy clears the threshold
    pub fn levels_cleared(&self) -> usize {
        self.records.iter().filter(|p| p.is_cleared()).count()
    }
}

/// Everything persisted between runs: session history and level progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecords {
    pub sessions: Vec<GameSession>,
    pub progress: ProgressStore,
}

impl PlayerRecords {
    pub fn new(sessions: Vec<GameSession>, progress: ProgressStore) -> Self {
        Self { sessions, progress }
    }

    /// Append a finalized session and update its level's progress
    pub fn record_session(&mut self, session: &GameSession, timestamp: f64) {
        self.progress.record_completion(
            session.level,
            session.accuracy,
            session.average_reaction_time,
            timestamp,
        );
        self.sessions.push(session.clone());
    }
}

/// Overall statistics for the progress screen
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub total_sessions: usize,
    /// Mean accuracy across every recorded session
    pub average_accuracy: f64,
    pub levels_cleared: usize,
    pub total_levels: usize,
    /// Per-level bests, ascending by level
    pub levels: Vec<LevelProgress>,
}

impl ProgressReport {
    pub fn build(records: &PlayerRecords, total_levels: usize) -> Self {
        let accuracies: Vec<f64> = records.sessions.iter().map(|s| s.accuracy).collect();
        let mut levels = records.progress.records().to_vec();
        levels.sort_by_key(|p| p.level);
        Self {
            total_sessions: records.sessions.len(),
            average_accuracy: mean(&accuracies),
            levels_cleared: records.progress.levels_cleared(),
            total_levels,
            levels,
        }
    }

    /// Text lines as shown on the progress screen
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total Sessions: {}", self.total_sessions),
            format!("Average Accuracy: {}%", self.average_accuracy as u32),
            format!("Levels Completed: {}/{}", self.levels_cleared, self.total_levels),
        ];
        for p in &self.levels {
            lines.push(format!(
                "Level {}: {}% accuracy, {}ms reaction",
                p.level, p.best_accuracy as u32, p.best_reaction_time as u32
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_completion_creates_record() {
        let mut store = ProgressStore::new();
        let p = store.record_completion(2, 55.0, 480.0, 100.0).clone();
        assert_eq!(
            p,
            LevelProgress {
                level: 2,
                best_accuracy: 55.0,
                best_reaction_time: 480.0,
                times_played: 1,
                last_played: 100.0,
            }
        );
    }

    #[test]
    fn test_bests_improve_monotonically() {
        let mut store = ProgressStore::new();
        store.record_completion(1, 80.0, 500.0, 1.0);
        store.record_completion(1, 60.0, 300.0, 2.0);
        store.record_completion(1, 90.0, 700.0, 3.0);
        let p = store.get(1).unwrap();
        assert_eq!(p.best_accuracy, 90.0);
        assert_eq!(p.best_reaction_time, 300.0);
        assert_eq!(p.times_played, 3);
        assert_eq!(p.last_played, 3.0);
    }

    #[test]
    fn test_unset_reaction_time_adopts_next_value() {
        let mut store = ProgressStore::new();
        // A session with no clicks leaves the best unset
        store.record_completion(3, 0.0, 0.0, 1.0);
        store.record_completion(3, 40.0, 900.0, 2.0);
        assert_eq!(store.get(3).unwrap().best_reaction_time, 900.0);
    }

    #[test]
    fn test_unlock_checks_the_level_itself() {
        let mut store = ProgressStore::new();
        assert!(store.is_unlocked(1));
        assert!(!store.is_unlocked(2));

        // Clearing level 1 does not open level 2
        store.record_completion(1, 100.0, 400.0, 1.0);
        assert!(!store.is_unlocked(2));

        store.record_completion(2, 69.9, 400.0, 2.0);
        assert!(!store.is_unlocked(2));
        store.record_completion(2, 70.0, 400.0, 3.0);
        assert!(store.is_unlocked(2));
        assert_eq!(store.levels_cleared(), 2);
    }

    #[test]
    fn test_record_session_appends_history() {
        let mut records = PlayerRecords::default();
        let mut session = GameSession::new(1, 0.0);
        session.accuracy = 75.0;
        session.average_reaction_time = 420.0;
        records.record_session(&session, 10.0);
        assert_eq!(records.sessions.len(), 1);
        assert_eq!(records.progress.get(1).unwrap().best_accuracy, 75.0);
    }

    #[test]
    fn test_report() {
        let mut records = PlayerRecords::default();
        for (level, acc) in [(2, 50.0), (1, 100.0), (1, 80.0)] {
            let mut s = GameSession::new(level, 0.0);
            s.accuracy = acc;
            s.average_reaction_time = 512.7;
            records.record_session(&s, 0.0);
        }
        let report = ProgressReport::build(&records, 10);
        assert_eq!(report.total_sessions, 3);
        assert!((report.average_accuracy - 230.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.levels_cleared, 1);
        assert_eq!(report.levels[0].level, 1);
        let lines = report.lines();
        assert_eq!(lines[1], "Average Accuracy: 76%");
        assert_eq!(lines[2], "Levels Completed: 1/10");
        assert_eq!(lines[3], "Level 1: 100% accuracy, 512ms reaction");
    }

    #[test]
    fn test_empty_report() {
        let report = ProgressReport::build(&PlayerRecords::default(), 10);
        assert_eq!(report.average_accuracy, 0.0);
        assert!(report.levels.is_empty());
    }

    proptest! {
        #[test]
        fn prop_bests_are_monotonic(runs in proptest::collection::vec((0.0f64..=100.0, 1.0f64..5000.0), 1..40)) {
            let mut store = ProgressStore::new();
            let mut prev: Option<LevelProgress> = None;
            for (i, (acc, rt)) in runs.into_iter().enumerate() {
                let p = store.record_completion(4, acc, rt, i as f64).clone();
                if let Some(prev) = prev {
                    prop_assert!(p.best_accuracy >= prev.best_accuracy);
                    prop_assert!(p.best_reaction_time <= prev.best_reaction_time);
                    prop_assert_eq!(p.times_played, prev.times_played + 1);
                }
                prev = Some(p);
            }
        }
    }
}
