//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time enters only through `FrameInput` (monotonic nanoseconds)
//! - No rendering, audio, or platform dependencies

pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{GameEvent, GameState, Paddle, Raindrop};
pub use tick::{FrameInput, tick};
