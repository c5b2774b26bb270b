//! Demo player
//!
//! Watches the live objects and clicks targets after a human-ish delay,
//! slipping up now and then. Drives the headless runner.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Millis;
use crate::sim::{Click, GameObject, GamePhase, GameState};

#[derive(Debug, Clone)]
pub struct Autoplayer {
    rng: Pcg32,
    /// Chance (0-1) that an intended target click is made correctly
    accuracy: f32,
    /// How long a target must be visible before it gets clicked (ms)
    reaction_ms: f64,
    next_click_at: Millis,
}

impl Autoplayer {
    pub fn new(seed: u64, accuracy: f32, reaction_ms: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            reaction_ms: reaction_ms.max(0.0),
            next_click_at: 0.0,
        }
    }

    /// Pick this frame's click, if any
    pub fn decide(&mut self, state: &GameState, now: Millis) -> Option<Click> {
        if state.phase != GamePhase::Playing || now < self.next_click_at {
            return None;
        }

        // Oldest target that has been on screen long enough to notice and
        // is not covered by a newer object at its center
        let target = state
            .objects
            .iter()
            .filter(|o| o.is_target && o.age_ms(now) >= self.reaction_ms)
            .filter(|o| topmost_at(&state.objects, o.center()) == Some(o.id))
            .min_by(|a, b| a.spawn_time.total_cmp(&b.spawn_time))?;

        let pos = if self.rng.random::<f32>() < self.accuracy {
            target.center()
        } else {
            self.mistake(&state.objects)
        };

        let jitter = 0.5 + self.rng.random::<f64>() * 0.5;
        self.next_click_at = now + self.reaction_ms * jitter;
        Some(Click { pos, time: now })
    }

    /// A distractor if one is visible, otherwise a corner of the play area
    fn mistake(&mut self, objects: &[GameObject]) -> Vec2 {
        let distractors: Vec<&GameObject> = objects.iter().filter(|o| !o.is_target).collect();
        if distractors.is_empty() {
            Vec2::new(1.0, 1.0)
        } else {
            let i = self.rng.random_range(0..distractors.len());
            distractors[i].center()
        }
    }
}

fn topmost_at(objects: &[GameObject], point: Vec2) -> Option<u32> {
    objects.iter().rev().find(|o| o.hit_test(point)).map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::ShapeKind;
    use crate::sim::{GameEvent, SessionOutcome, TickInput, tick};

    fn place(state: &mut GameState, is_target: bool, at: Vec2, spawn_time: Millis) -> u32 {
        let id = state.next_entity_id();
        let mut rng = Pcg32::seed_from_u64(id as u64);
        let mut obj = GameObject::spawn(id, ShapeKind::Star, at, is_target, spawn_time, 4000.0, &mut rng);
        obj.vel = Vec2::ZERO;
        state.objects.push(obj);
        id
    }

    #[test]
    fn test_waits_for_reaction_delay() {
        let mut state = GameState::new(1);
        state.start_level(1, 0.0).unwrap();
        place(&mut state, true, Vec2::new(200.0, 200.0), 1000.0);
        let mut bot = Autoplayer::new(1, 1.0, 300.0);
        assert!(bot.decide(&state, 1200.0).is_none());
        let click = bot.decide(&state, 1300.0).unwrap();
        assert!(state.objects[0].hit_test(click.pos));
        // Cooldown after a click
        assert!(bot.decide(&state, 1301.0).is_none());
    }

    #[test]
    fn test_clicks_oldest_target() {
        let mut state = GameState::new(1);
        state.start_level(2, 0.0).unwrap();
        place(&mut state, false, Vec2::new(600.0, 600.0), 0.0);
        let newer = place(&mut state, true, Vec2::new(400.0, 100.0), 500.0);
        let older = place(&mut state, true, Vec2::new(100.0, 400.0), 100.0);
        let mut bot = Autoplayer::new(2, 1.0, 0.0);
        let click = bot.decide(&state, 1000.0).unwrap();
        let hit = state.objects.iter().find(|o| o.hit_test(click.pos)).unwrap();
        assert_eq!(hit.id, older);
        assert_ne!(hit.id, newer);
    }

    #[test]
    fn test_zero_accuracy_clicks_distractor() {
        let mut state = GameState::new(1);
        state.start_level(2, 0.0).unwrap();
        let distractor = place(&mut state, false, Vec2::new(600.0, 600.0), 0.0);
        place(&mut state, true, Vec2::new(100.0, 100.0), 0.0);
        let mut bot = Autoplayer::new(3, 0.0, 0.0);
        let click = bot.decide(&state, 10.0).unwrap();
        let hit = state.objects.iter().find(|o| o.hit_test(click.pos)).unwrap();
        assert_eq!(hit.id, distractor);
    }

    #[test]
    fn test_perfect_player_wins_level_one() {
        let mut state = GameState::new(17);
        state.start_level(1, 0.0).unwrap();
        let mut bot = Autoplayer::new(17, 1.0, 250.0);
        let dt = 1.0 / 60.0;
        let mut now = 0.0;
        let mut outcome = None;
        for _ in 0..60 * 120 {
            now += 1000.0 / 60.0;
            let input = TickInput {
                clicks: bot.decide(&state, now).into_iter().collect(),
                ..Default::default()
            };
            for event in tick(&mut state, &input, dt, now) {
                if let GameEvent::SessionEnded(summary) = event {
                    outcome = Some(summary);
                }
            }
            if outcome.is_some() {
                break;
            }
        }
        let summary = outcome.expect("session should finish within two minutes");
        assert_eq!(summary.outcome, SessionOutcome::Won);
        assert_eq!(summary.session.accuracy, 100.0);
        assert_eq!(summary.session.correct_clicks, 10);
        assert!(state.records.progress.get(1).unwrap().is_cleared());
    }
}
