//! Game objects: the shapes the player clicks (or should not click)

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::consts::*;
use crate::levels::ShapeKind;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Bright colors used for targets
pub const TARGET_PALETTE: [Rgb; 5] = [
    [255, 107, 107], // red
    [78, 205, 196],  // green
    [69, 183, 209],  // blue
    [249, 202, 36],  // yellow
    [240, 147, 43],  // orange
];

/// Muted colors used for distractors
pub const DISTRACTOR_PALETTE: [Rgb; 3] = [
    [149, 165, 166], // gray
    [127, 140, 141], // dark gray
    [189, 195, 199], // light gray
];

/// A spawned shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u32,
    pub shape: ShapeKind,
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub is_target: bool,
    pub spawn_time: Millis,
    pub lifespan_ms: f64,
    pub size: f32,
    pub color: Rgb,
    pub vel: Vec2,
    pub rotation: f32,
    pub angular_vel: f32,
    /// Breathing scale in [SCALE_MIN, SCALE_MAX]
    pub scale: f32,
    /// +1 while growing, -1 while shrinking
    pub scale_dir: f32,
}

impl GameObject {
    /// Create an object with randomized size, drift, spin and color
    pub fn spawn<R: Rng>(
        id: u32,
        shape: ShapeKind,
        pos: Vec2,
        is_target: bool,
        spawn_time: Millis,
        lifespan_ms: f64,
        rng: &mut R,
    ) -> Self {
        let size = OBJECT_BASE_SIZE + (rng.random::<f32>() - 0.5) * OBJECT_SIZE_VARIATION;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * OBJECT_MAX_VELOCITY,
            (rng.random::<f32>() - 0.5) * OBJECT_MAX_VELOCITY,
        );
        let angular_vel = (rng.random::<f32>() - 0.5) * OBJECT_MAX_SPIN;
        let palette: &[Rgb] = if is_target {
            &TARGET_PALETTE
        } else {
            &DISTRACTOR_PALETTE
        };
        let color = *palette.choose(rng).unwrap_or(&palette[0]);

        Self {
            id,
            shape,
            pos,
            is_target,
            spawn_time,
            lifespan_ms,
            size,
            color,
            vel,
            rotation: 0.0,
            angular_vel,
            scale: 1.0,
            scale_dir: 1.0,
        }
    }

    /// Advance drift, spin and breathing by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation += self.angular_vel * dt;

        self.scale += self.scale_dir * SCALE_RATE * dt;
        if self.scale > SCALE_MAX {
            self.scale = SCALE_MAX;
            self.scale_dir = -1.0;
        } else if self.scale < SCALE_MIN {
            self.scale = SCALE_MIN;
            self.scale_dir = 1.0;
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Radius of the click circle at the current scale
    pub fn hit_radius(&self) -> f32 {
        (self.size / 2.0) * self.scale
    }

    /// Circular hit test around the bounding-box center.
    ///
    /// Every shape uses the same circle, so star spikes and triangle corners
    /// are slightly generous or stingy compared with the drawn outline.
    pub fn hit_test(&self, point: Vec2) -> bool {
        point.distance(self.center()) <= self.hit_radius()
    }

    pub fn is_expired(&self, now: Millis) -> bool {
        now - self.spawn_time > self.lifespan_ms
    }

    /// True once the center has drifted more than one object size past any edge
    pub fn is_out_of_bounds(&self, area: Vec2) -> bool {
        let c = self.center();
        c.x < -self.size || c.y < -self.size || c.x > area.x + self.size || c.y > area.y + self.size
    }

    /// Milliseconds this object has been alive
    pub fn age_ms(&self, now: Millis) -> f64 {
        now - self.spawn_time
    }
}
