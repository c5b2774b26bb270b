//! Fixed timestep simulation tick
//!
//! Input is applied first, against the population the player saw, then the
//! world advances: background, elapsed time, spawning, object motion and
//! culling.

use glam::Vec2;

use super::session::{ClickResult, SessionOutcome, SessionSummary};
use super::state::{GamePhase, GameState};
use crate::Millis;

/// A left click in play-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub pos: Vec2,
    pub time: Millis,
}

impl Click {
    pub fn new(x: f32, y: f32, time: Millis) -> Self {
        Self {
            pos: Vec2::new(x, y),
            time,
        }
    }
}

/// Input collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Clicks in the order they happened
    pub clicks: Vec<Click>,
    /// Pause/resume toggle
    pub pause: bool,
    /// Leave the game loop
    pub quit: bool,
}

/// Things that happened during a tick, for presentation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ObjectSpawned { id: u32, is_target: bool },
    ObjectHit { id: u32, is_target: bool, reaction_ms: f64 },
    EmptyClick { reaction_ms: f64 },
    /// Removed by expiry or by drifting out of the play area
    ObjectExpired { id: u32, is_target: bool },
    Paused,
    Resumed,
    SessionEnded(SessionSummary),
    QuitRequested,
}

/// Advance the game state by one step of `dt` seconds ending at `now`
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now: Millis) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        events.push(GameEvent::QuitRequested);
        return events;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause(now);
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.resume(now);
                events.push(GameEvent::Resumed);
            }
            GamePhase::Idle => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    for click in &input.clicks {
        let Some((result, summary)) = state.handle_click(click.pos, click.time) else {
            break;
        };
        events.push(match result {
            ClickResult::Hit {
                id,
                is_target,
                reaction_ms,
            } => GameEvent::ObjectHit {
                id,
                is_target,
                reaction_ms,
            },
            ClickResult::Miss { reaction_ms } => GameEvent::EmptyClick { reaction_ms },
        });
        if let Some(summary) = summary {
            events.push(GameEvent::SessionEnded(summary));
            return events;
        }
    }

    state.time_ticks += 1;

    let time_limit = {
        let Some(level) = state.tracker.level() else {
            return events;
        };
        state.background_offset += level.background_speed * dt;
        state.game_time += dt;
        level.time_limit
    };

    if let Some(limit) = time_limit {
        if state.game_time >= limit as f32 {
            if let Some(summary) = state.end_session(SessionOutcome::TimeExpired, now) {
                events.push(GameEvent::SessionEnded(summary));
            }
            return events;
        }
    }

    let spawned = {
        let Some(level) = state.tracker.level() else {
            return events;
        };
        let next_id = &mut state.next_id;
        state
            .spawner
            .maybe_spawn(now, level, state.play_area, &mut state.objects, &mut state.rng, || {
                let id = *next_id;
                *next_id += 1;
                id
            })
            .map(|obj| (obj.id, obj.is_target))
    };

    if let Some((id, is_target)) = spawned {
        if is_target {
            state.tracker.note_target_spawned();
        }
        events.push(GameEvent::ObjectSpawned { id, is_target });
    }

    for obj in &mut state.objects {
        obj.update(dt);
    }

    // Cull in a single filter pass
    let area = state.play_area;
    state.objects.retain(|obj| {
        let gone = obj.is_expired(now) || obj.is_out_of_bounds(area);
        if gone {
            events.push(GameEvent::ObjectExpired {
                id: obj.id,
                is_target: obj.is_target,
            });
        }
        !gone
    });

    events
}
