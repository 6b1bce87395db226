use crate::core::actions::render::ports::pixel_function::PixelFunction;
use crate::core::actions::staleness::{StalenessProbe, Superseded};
use crate::core::data::colour::Colour;
use crate::core::data::render_request::RenderRequest;
use crate::core::data::render_result::BandWriter;
use std::ops::Range;

/// Fills a worker's tile bands with one function sample per tile.
///
/// The sample taken at a tile's top-left corner is broadcast to every pixel
/// of the tile, clipped to the image at the right and bottom edges. This is
/// the coarse-pass "blocky preview" policy: tiles are never supersampled or
/// averaged, so halving the tile size across passes sharpens the same image
/// rather than re-exposing it.
///
/// The probe is consulted before each band, each tile, each tile row, and
/// once between sampling and writing. On staleness the pass is abandoned
/// where it stands; whatever was already written stays in a buffer that will
/// never be published, so no cleanup is attempted.
pub fn fill_tile_bands<P: StalenessProbe>(
    writer: &mut BandWriter<'_>,
    request: &RenderRequest,
    bands: Range<u32>,
    function: &dyn PixelFunction,
    probe: &P,
) -> Result<(), Superseded> {
    let tile_size = request.tile_size;

    for band in bands {
        probe.check()?;
        let y = band * tile_size;
        let y_end = y.saturating_add(tile_size).min(request.height);

        for x in (0..request.width).step_by(tile_size as usize) {
            probe.check()?;
            let value = function.value(
                x,
                y,
                request.width,
                request.height,
                request.scale,
                request.center_offset,
            );
            probe.check()?;

            let colour = Colour::from_intensity(value);
            let x_end = x.saturating_add(tile_size).min(request.width);

            for row in y..y_end {
                probe.check()?;
                writer.fill_span(row, x..x_end, colour);
            }
        }
    }

    Ok(())
}
