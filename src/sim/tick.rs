//! Per-frame simulation step

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input snapshot for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Pointer position in world coordinates, present while the pointer is down
    pub pointer_world: Option<Vec2>,
    /// Left arrow held
    pub move_left: bool,
    /// Right arrow held
    pub move_right: bool,
    /// Monotonic timestamp of this frame, nanoseconds
    pub now_ns: u64,
}

/// Advance the game state by one frame
///
/// `dt` may spike on frame hitches; movement scales with it unclamped.
/// Ordering within the frame: pointer placement, then key nudges, then the
/// viewport clamp; at most one raindrop spawns per call; finally every drop
/// falls and the collection is swept. Returns this frame's gameplay events
/// for the shell to act on.
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
    if let Some(pointer) = input.pointer_world {
        state.paddle.center_on(pointer.x);
    }
    if input.move_left {
        state.paddle.rect.x -= PADDLE_SPEED * dt;
    }
    if input.move_right {
        state.paddle.rect.x += PADDLE_SPEED * dt;
    }
    state.paddle.clamp_to_viewport();

    if input.now_ns - state.last_spawn_ns > SPAWN_INTERVAL_NS {
        state.spawn_raindrop(input.now_ns);
    }

    // Advance and sweep. Off-screen drops vanish silently; survivors that
    // overlap the paddle are caught. A removed drop is never tested twice.
    let mut events = Vec::new();
    let paddle = state.paddle.rect;
    state.raindrops.retain_mut(|drop| {
        drop.fall(dt);
        if drop.below_screen() {
            return false;
        }
        if drop.rect.overlaps(&paddle) {
            events.push(GameEvent::RaindropCaught);
            return false;
        }
        true
    });

    events
}
