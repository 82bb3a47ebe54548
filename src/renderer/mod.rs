//! wgpu sprite rendering
//!
//! A fixed 800x480 logical viewport stretched over the window surface.

pub mod camera;
pub mod sprite;
pub mod vertex;

pub use sprite::SpriteRenderState;
pub use vertex::Vertex;
