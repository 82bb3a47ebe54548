//! Raincatch - catch falling raindrops in a bucket
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle movement, spawning, collisions)
//! - `renderer`: wgpu sprite rendering over a fixed 800x480 logical viewport
//! - `audio`: cpal output stream with a small software mixer
//! - `assets`: PNG sprite and WAV sound loading

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Logical viewport width in world units
    pub const VIEW_WIDTH: f32 = 800.0;
    /// Logical viewport height in world units
    pub const VIEW_HEIGHT: f32 = 480.0;

    /// Paddle and raindrop sprites are both 64x64 world units
    pub const SPRITE_SIZE: f32 = 64.0;

    /// Fixed paddle baseline above the bottom edge
    pub const PADDLE_Y: f32 = 20.0;
    /// Paddle speed under key input (world units per second)
    pub const PADDLE_SPEED: f32 = 200.0;
    /// Raindrop fall speed (world units per second)
    pub const FALL_SPEED: f32 = 200.0;

    /// Minimum gap between raindrop spawns (monotonic clock, nanoseconds)
    pub const SPAWN_INTERVAL_NS: u64 = 1_000_000_000;

    /// Rightmost x where a sprite still sits fully on screen
    pub const MAX_SPRITE_X: f32 = VIEW_WIDTH - SPRITE_SIZE;
}
