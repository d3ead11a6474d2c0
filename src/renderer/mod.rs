//! Software rendering module
//!
//! Draws into a CPU-side ARGB8888 buffer: Bresenham lines for the cube,
//! scan-filled (optionally shaded) discs for the particles.

pub mod buffer;
pub mod color;
pub mod raster;
pub mod scene;

pub use buffer::PixelBuffer;
pub use raster::{Lighting, draw_filled_circle, draw_filled_circle_shaded, draw_line, draw_rect};
pub use scene::{CUBE_EDGES, CUBE_VERTICES, ScreenDisc, draw_particles, draw_wireframe_cube, pick};
