use rayon::prelude::*;

use crate::core::actions::render::ports::pixel_function::PixelFunction;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::render_request::RenderRequest;

/// One-shot, full-resolution render: every pixel evaluated exactly once,
/// rows fanned out over rayon's work-stealing pool.
///
/// The request's `tile_size` is ignored. This is the reference the
/// progressive engine converges to - its final tile-size-1 pass produces a
/// byte-identical image - and the path for non-interactive snapshots where
/// coarse previews have no value.
pub fn render_direct(
    request: &RenderRequest,
    function: &dyn PixelFunction,
) -> Result<PixelBuffer, PixelBufferError> {
    let rows: Vec<Vec<u8>> = (0..request.height)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(request.width as usize * 3);

            for x in 0..request.width {
                let value = function.value(
                    x,
                    y,
                    request.width,
                    request.height,
                    request.scale,
                    request.center_offset,
                );
                let colour = Colour::from_intensity(value);
                row.extend_from_slice(&[colour.r, colour.g, colour.b]);
            }

            row
        })
        .collect();

    PixelBuffer::from_data(
        request.width,
        request.height,
        rows.into_iter().flatten().collect(),
    )
}
