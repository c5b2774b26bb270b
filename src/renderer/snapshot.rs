//! Frame snapshot: everything a frame needs, copied out of the game state

use super::instance::ObjectInstance;
use crate::sim::{GamePhase, GameState};

/// Heads-up display values
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub level: u32,
    pub level_name: String,
    pub description: String,
    pub score: u32,
    pub lives: u32,
    pub correct_clicks: u32,
    pub required_correct_clicks: u32,
    /// Correct clicks as a percentage of the requirement
    pub progress_percent: f64,
    /// Live accuracy (0 before the first click)
    pub accuracy: f64,
    /// Only for timed levels
    pub time_remaining: Option<f32>,
}

impl HudSnapshot {
    /// Status line in the style of the in-game HUD
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "Level {}: {} | Score: {} | Progress: {}/{} | Lives: {} | Accuracy: {}%",
            self.level,
            self.level_name,
            self.score,
            self.correct_clicks,
            self.required_correct_clicks,
            self.lives,
            self.accuracy as u32
        );
        if let Some(t) = self.time_remaining {
            line.push_str(&format!(" | Time: {}s", t.ceil() as u32));
        }
        line
    }
}

/// Render data for one frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Back to front (spawn order)
    pub objects: Vec<ObjectInstance>,
    pub background_offset: f32,
    pub paused: bool,
    /// Present while a session is running
    pub hud: Option<HudSnapshot>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let hud = state
            .tracker
            .session()
            .zip(state.active_level())
            .map(|(session, level)| HudSnapshot {
                level: level.level,
                level_name: level.name.clone(),
                description: level.description.clone(),
                score: state.score(),
                lives: state.lives(),
                correct_clicks: session.correct_clicks,
                required_correct_clicks: level.required_correct_clicks,
                progress_percent: state.tracker.progress_percent(),
                accuracy: state.tracker.current_accuracy(),
                time_remaining: state.time_remaining(),
            });

        Self {
            objects: state.objects.iter().map(ObjectInstance::from_object).collect(),
            background_offset: state.background_offset,
            paused: state.phase == GamePhase::Paused,
            hud,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_idle_snapshot_has_no_hud() {
        let state = GameState::new(1);
        let frame = FrameSnapshot::capture(&state);
        assert!(frame.hud.is_none());
        assert!(frame.objects.is_empty());
        assert!(!frame.paused);
    }

    #[test]
    fn test_snapshot_of_running_level() {
        let mut state = GameState::new(8);
        state.start_level(10, 0.0).unwrap();
        tick(&mut state, &TickInput::default(), 0.5, 500.0);
        state.handle_click(glam::Vec2::new(-500.0, -500.0), 600.0);

        let frame = FrameSnapshot::capture(&state);
        assert_eq!(frame.objects.len(), state.objects.len());
        assert_eq!(frame.background_offset, 25.0);
        let hud = frame.hud.unwrap();
        assert_eq!(hud.level, 10);
        assert_eq!(hud.level_name, "Master Focus");
        assert_eq!(hud.lives, 2);
        assert_eq!(hud.required_correct_clicks, 35);
        assert_eq!(hud.accuracy, 0.0);
        assert_eq!(hud.time_remaining, Some(59.5));
        assert_eq!(
            hud.status_line(),
            "Level 10: Master Focus | Score: 0 | Progress: 0/35 | Lives: 2 | Accuracy: 0% | Time: 60s"
        );
    }
}
