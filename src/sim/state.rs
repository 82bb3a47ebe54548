//! Game state and entity types

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

impl Paddle {
    /// Paddle centered horizontally, resting on the fixed baseline
    pub fn new() -> Self {
        Self {
            rect: Rect::new(
                VIEW_WIDTH / 2.0 - SPRITE_SIZE / 2.0,
                PADDLE_Y,
                SPRITE_SIZE,
                SPRITE_SIZE,
            ),
        }
    }

    /// Absolute placement: the pointer position becomes the paddle center
    pub fn center_on(&mut self, world_x: f32) {
        self.rect.x = world_x - SPRITE_SIZE / 2.0;
    }

    /// Clamp back into the visible range, applied after all adjustments
    pub fn clamp_to_viewport(&mut self) {
        self.rect.x = self.rect.x.clamp(0.0, MAX_SPRITE_X);
    }
}

/// A single falling raindrop
#[derive(Debug, Clone)]
pub struct Raindrop {
    pub rect: Rect,
}

impl Raindrop {
    /// A fresh raindrop sitting at the top edge of the viewport
    pub fn new(x: f32) -> Self {
        Self {
            rect: Rect::new(x, VIEW_HEIGHT, SPRITE_SIZE, SPRITE_SIZE),
        }
    }

    pub fn fall(&mut self, dt: f32) {
        self.rect.y -= FALL_SPEED * dt;
    }

    /// True once the drop is fully below the bottom edge
    pub fn below_screen(&self) -> bool {
        self.rect.top() < 0.0
    }
}

/// Gameplay events surfaced to the shell (audio triggers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A raindrop landed in the paddle this frame
    RaindropCaught,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Player paddle
    pub paddle: Paddle,
    /// Falling raindrops in spawn order (also draw order)
    pub raindrops: Vec<Raindrop>,
    /// Monotonic timestamp of the last spawn, nanoseconds
    pub last_spawn_ns: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    ///
    /// The paddle starts centered and one raindrop is already falling,
    /// spawned at the clock origin.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            paddle: Paddle::new(),
            raindrops: Vec::new(),
            last_spawn_ns: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_raindrop(0);
        state
    }

    /// Append one raindrop at a random x and reset the spawn timer
    pub fn spawn_raindrop(&mut self, now_ns: u64) {
        let x = self.rng.random_range(0.0..=MAX_SPRITE_X);
        self.raindrops.push(Raindrop::new(x));
        self.last_spawn_ns = now_ns;
    }
}
