use std::ops::Range;

/// Number of horizontal tile bands in an image of `height` rows grouped into
/// tiles of `tile_size` rows each; the last band may be partial.
#[must_use]
pub fn tile_band_count(height: u32, tile_size: u32) -> u32 {
    height.div_ceil(tile_size)
}

/// The contiguous slice of bands assigned to one worker.
///
/// Splits `band_count` bands as evenly as possible across `worker_count`
/// workers; workers with a high index may receive an empty range when there
/// are more workers than bands. Contiguous ranges keep each worker's writes
/// spatially local.
#[must_use]
pub fn worker_band_range(band_count: u32, worker_index: usize, worker_count: usize) -> Range<u32> {
    let bands = u64::from(band_count);
    let start = bands * worker_index as u64 / worker_count as u64;
    let end = bands * (worker_index as u64 + 1) / worker_count as u64;

    start as u32..end as u32
}

/// The pixel rows covered by a range of bands, clipped to the image height.
#[must_use]
pub fn band_rows(bands: Range<u32>, tile_size: u32, height: u32) -> Range<u32> {
    let start = (u64::from(bands.start) * u64::from(tile_size)).min(u64::from(height));
    let end = (u64::from(bands.end) * u64::from(tile_size)).min(u64::from(height));

    start as u32..end as u32
}
