use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::ops::Range;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// A width×height×3 image buffer that several workers fill concurrently.
///
/// Each worker writes through a [`BandWriter`] bound to its own row range, so
/// the no-overlap partitioning invariant is checked at the API boundary
/// rather than trusted by convention. The bytes themselves are atomic, which
/// keeps even a buggy overlapping write well-defined instead of undefined
/// behaviour.
#[derive(Debug)]
pub struct TileImage {
    width: u32,
    height: u32,
    data: Box<[AtomicU8]>,
}

impl TileImage {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * 3;
        let mut data = Vec::with_capacity(size);
        data.resize_with(size, || AtomicU8::new(0));

        Self {
            width,
            height,
            data: data.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Hands out a writer restricted to `rows`. Distinct workers must request
    /// disjoint ranges; the row-band partition guarantees that by construction.
    #[must_use]
    pub fn band(&self, rows: Range<u32>) -> BandWriter<'_> {
        assert!(rows.start <= rows.end && rows.end <= self.height);

        BandWriter { image: self, rows }
    }

    /// Copies the settled bytes into an immutable image. Only meaningful once
    /// every writer of the owning generation has finished.
    #[must_use]
    pub fn snapshot(&self) -> PixelBuffer {
        let data = self
            .data
            .iter()
            .map(|byte| byte.load(Ordering::Relaxed))
            .collect();

        PixelBuffer::from_data(self.width, self.height, data)
            .expect("snapshot buffer matches image dimensions")
    }
}

/// Write access to one contiguous row band of a [`TileImage`].
#[derive(Debug)]
pub struct BandWriter<'a> {
    image: &'a TileImage,
    rows: Range<u32>,
}

impl BandWriter<'_> {
    /// Fills `xs` of row `y` with one colour. The row must lie inside this
    /// writer's band; the span is expected to be pre-clipped to the image.
    pub fn fill_span(&mut self, y: u32, xs: Range<u32>, colour: Colour) {
        assert!(self.rows.contains(&y));
        assert!(xs.end <= self.image.width);

        let row_start = y as usize * self.image.width as usize;
        for x in xs {
            let index = (row_start + x as usize) * 3;
            self.image.data[index].store(colour.r, Ordering::Relaxed);
            self.image.data[index + 1].store(colour.g, Ordering::Relaxed);
            self.image.data[index + 2].store(colour.b, Ordering::Relaxed);
        }
    }
}

/// The in-flight product of one generation: the shared image plus the count
/// of workers that completed their bands without observing staleness.
///
/// Allocated fresh for every generation. That is what makes abandoned passes
/// harmless: a stale worker can only ever write into a buffer nobody will
/// publish.
#[derive(Debug)]
pub struct RenderResult {
    image: TileImage,
    workers_finished: AtomicUsize,
}

impl RenderResult {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: TileImage::new(width, height),
            workers_finished: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn image(&self) -> &TileImage {
        &self.image
    }

    /// Records one worker's clean completion and returns the total so far.
    /// The caller whose increment reaches the worker count is the finisher.
    pub fn finish_worker(&self) -> usize {
        self.workers_finished.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[must_use]
    pub fn finished_workers(&self) -> usize {
        self.workers_finished.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const RED: Colour = Colour { r: 255, g: 0, b: 0 };

    #[test]
    fn test_new_image_is_black() {
        let image = TileImage::new(4, 3);
        let snapshot = image.snapshot();

        assert_eq!(snapshot.width(), 4);
        assert_eq!(snapshot.height(), 3);
        assert!(snapshot.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_span_writes_all_pixels_in_span() {
        let image = TileImage::new(4, 4);

        image.band(1..2).fill_span(1, 1..3, RED);

        let snapshot = image.snapshot();
        assert_eq!(snapshot.pixel(0, 1), Some(Colour { r: 0, g: 0, b: 0 }));
        assert_eq!(snapshot.pixel(1, 1), Some(RED));
        assert_eq!(snapshot.pixel(2, 1), Some(RED));
        assert_eq!(snapshot.pixel(3, 1), Some(Colour { r: 0, g: 0, b: 0 }));
    }

    #[test]
    #[should_panic]
    fn test_fill_span_rejects_row_outside_band() {
        let image = TileImage::new(4, 4);

        image.band(0..2).fill_span(2, 0..4, RED);
    }

    #[test]
    #[should_panic]
    fn test_band_rejects_rows_beyond_image() {
        let image = TileImage::new(4, 4);

        let _ = image.band(0..5);
    }

    #[test]
    fn test_empty_band_is_allowed() {
        let image = TileImage::new(4, 4);

        // A worker given no bands still needs a (useless) writer.
        let _ = image.band(2..2);
        let _ = image.band(4..4);
    }

    #[test]
    fn test_concurrent_disjoint_bands() {
        let image = Arc::new(TileImage::new(8, 8));

        thread::scope(|scope| {
            for worker in 0..4u32 {
                let image = Arc::clone(&image);
                scope.spawn(move || {
                    let rows = worker * 2..(worker + 1) * 2;
                    let mut writer = image.band(rows.clone());
                    for y in rows {
                        writer.fill_span(y, 0..8, RED);
                    }
                });
            }
        });

        let snapshot = image.snapshot();
        assert!(
            (0..8).all(|y| (0..8).all(|x| snapshot.pixel(x, y) == Some(RED))),
            "every band should have been filled exactly once"
        );
    }

    #[test]
    fn test_finish_worker_counts_up() {
        let result = RenderResult::new(2, 2);

        assert_eq!(result.finished_workers(), 0);
        assert_eq!(result.finish_worker(), 1);
        assert_eq!(result.finish_worker(), 2);
        assert_eq!(result.finished_workers(), 2);
    }
}
