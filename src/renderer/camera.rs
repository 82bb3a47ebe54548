//! Fixed logical viewport mapping and pointer unprojection
//!
//! The game simulates in a fixed 800x480 world with a y-up origin at the
//! bottom-left. That space stretches over the whole surface, so resizing the
//! window never changes world coordinates - only how large they appear.

use glam::Vec2;

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

/// Map a world position to normalized device coordinates
#[inline]
pub fn world_to_ndc(world: Vec2) -> Vec2 {
    Vec2::new(
        world.x / VIEW_WIDTH * 2.0 - 1.0,
        world.y / VIEW_HEIGHT * 2.0 - 1.0,
    )
}

/// Unproject a window pointer position (origin top-left, physical pixels)
/// into world coordinates
pub fn screen_to_world(screen: Vec2, surface_size: (u32, u32)) -> Vec2 {
    let (width, height) = surface_size;
    Vec2::new(
        screen.x / width.max(1) as f32 * VIEW_WIDTH,
        (1.0 - screen.y / height.max(1) as f32) * VIEW_HEIGHT,
    )
}
