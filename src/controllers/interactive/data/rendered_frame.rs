use crate::core::data::pixel_buffer::PixelBuffer;
use std::time::Duration;

/// One published progressive pass: a complete image plus where in the
/// refinement chain it came from.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Generation of the pass that produced this image.
    pub generation: u64,
    /// Tile granularity of the pass; 1 means full per-pixel resolution.
    pub tile_size: u32,
    /// Wall-clock time from input installation to publication.
    pub render_duration: Duration,
    pub pixel_buffer: PixelBuffer,
}
