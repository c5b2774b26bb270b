//! Spawn scheduling
//!
//! A minimum-interval gate: at most one object per `1000 / spawn_rate` ms,
//! never more than `max_objects` alive. Missed intervals are not banked.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::object::GameObject;
use crate::Millis;
use crate::consts::{OBJECT_BASE_SIZE, SPAWN_MARGIN};
use crate::levels::LevelConfig;

#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    /// Time of the last spawn; `None` lets the first spawn happen immediately
    last_spawn: Option<Millis>,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous spawn (called at session start)
    pub fn reset(&mut self) {
        self.last_spawn = None;
    }

    pub fn last_spawn(&self) -> Option<Millis> {
        self.last_spawn
    }

    /// Move the gate forward by time the simulation spent frozen
    pub fn shift(&mut self, ms: f64) {
        if let Some(last) = self.last_spawn.as_mut() {
            *last += ms;
        }
    }

    /// Whether the rate gate and population cap allow a spawn at `now`
    pub fn can_spawn(&self, now: Millis, level: &LevelConfig, population: usize) -> bool {
        if population >= level.max_objects {
            return false;
        }
        match self.last_spawn {
            Some(last) => now - last >= level.spawn_interval_ms(),
            None => true,
        }
    }

    /// Spawn one object into `population` if allowed.
    ///
    /// `next_id` allocates the object id. Returns a reference to the new object.
    pub fn maybe_spawn<'a, R: Rng>(
        &mut self,
        now: Millis,
        level: &LevelConfig,
        play_area: Vec2,
        population: &'a mut Vec<GameObject>,
        rng: &mut R,
        next_id: impl FnOnce() -> u32,
    ) -> Option<&'a GameObject> {
        if !self.can_spawn(now, level, population.len()) {
            return None;
        }
        self.last_spawn = Some(now);

        let is_target = rng.random::<f32>() < level.target_ratio;
        let shape = if is_target {
            level.target
        } else {
            *level.distractors.choose(rng).unwrap_or(&level.target)
        };

        let pos = spawn_position(play_area, rng);
        let obj = GameObject::spawn(next_id(), shape, pos, is_target, now, level.lifespan_ms, rng);
        population.push(obj);
        population.last()
    }
}

/// Uniform top-left position inside the play area, inset by the spawn
/// margin and by the base footprint so new objects start fully visible
pub fn spawn_position<R: Rng>(play_area: Vec2, rng: &mut R) -> Vec2 {
    let span = (play_area - Vec2::splat(2.0 * SPAWN_MARGIN + OBJECT_BASE_SIZE)).max(Vec2::ZERO);
    Vec2::new(
        SPAWN_MARGIN + rng.random::<f32>() * span.x,
        SPAWN_MARGIN + rng.random::<f32>() * span.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{LevelCatalog, ShapeKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const AREA: Vec2 = Vec2::new(1200.0, 800.0);

    fn level(n: u32) -> LevelConfig {
        LevelCatalog::standard().get(n).unwrap().clone()
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let level = level(1);
        let mut sched = SpawnScheduler::new();
        let mut pop = Vec::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut id = 0;
        let spawned = sched.maybe_spawn(0.0, &level, AREA, &mut pop, &mut rng, || {
            id += 1;
            id
        });
        assert!(spawned.is_some());
        assert_eq!(pop.len(), 1);
        assert_eq!(sched.last_spawn(), Some(0.0));
    }

    #[test]
    fn test_rate_gate() {
        // Level 1 spawns every 2000ms
        let level = level(1);
        let mut sched = SpawnScheduler::new();
        let mut pop = Vec::new();
        let mut rng = Pcg32::seed_from_u64(2);

        assert!(sched.maybe_spawn(1000.0, &level, AREA, &mut pop, &mut rng, || 1).is_some());
        assert!(sched.maybe_spawn(2999.0, &level, AREA, &mut pop, &mut rng, || 2).is_none());
        assert!(sched.maybe_spawn(3000.0, &level, AREA, &mut pop, &mut rng, || 2).is_some());
        // A long gap yields a single spawn, not a burst
        assert!(sched.maybe_spawn(20000.0, &level, AREA, &mut pop, &mut rng, || 3).is_some());
        assert!(sched.maybe_spawn(20001.0, &level, AREA, &mut pop, &mut rng, || 4).is_none());
        assert_eq!(pop.len(), 3);
    }

    #[test]
    fn test_population_cap() {
        let level = level(1);
        let mut sched = SpawnScheduler::new();
        let mut pop = Vec::new();
        let mut rng = Pcg32::seed_from_u64(3);
        for i in 0..10 {
            let now = i as f64 * 5000.0;
            sched.maybe_spawn(now, &level, AREA, &mut pop, &mut rng, || i);
        }
        assert_eq!(pop.len(), level.max_objects);
        // A blocked spawn does not move the gate
        assert_eq!(sched.last_spawn(), Some(10000.0));
    }

    #[test]
    fn test_shapes_follow_level() {
        let level = level(2);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut targets = 0;
        for i in 0..2000u32 {
            let mut sched = SpawnScheduler::new();
            let mut pop = Vec::new();
            let obj = sched
                .maybe_spawn(0.0, &level, AREA, &mut pop, &mut rng, || i)
                .unwrap();
            if obj.is_target {
                targets += 1;
                assert_eq!(obj.shape, ShapeKind::Balloon);
            } else {
                assert!(level.distractors.contains(&obj.shape));
            }
        }
        // target ratio 0.6
        let ratio = targets as f32 / 2000.0;
        assert!((ratio - 0.6).abs() < 0.05, "ratio {ratio}");
    }

    #[test]
    fn test_spawn_position_stays_inside() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..1000 {
            let p = spawn_position(AREA, &mut rng);
            assert!(p.x >= SPAWN_MARGIN && p.x + OBJECT_BASE_SIZE <= AREA.x - SPAWN_MARGIN);
            assert!(p.y >= SPAWN_MARGIN && p.y + OBJECT_BASE_SIZE <= AREA.y - SPAWN_MARGIN);
        }
    }
}
