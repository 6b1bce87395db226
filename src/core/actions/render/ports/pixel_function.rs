use crate::core::data::complex::Complex;

/// The per-pixel colouring rule the engine fans out across its workers.
///
/// Implementations must be pure and deterministic for identical inputs:
/// the engine re-evaluates pixels freely across passes and discards whole
/// buffers when input changes, which is only harmless if every evaluation
/// of the same pixel agrees. Called concurrently from every worker thread.
pub trait PixelFunction: Send + Sync {
    /// Returns a normalized intensity in [0, 1] for the pixel at (x, y) of a
    /// width×height viewport scaled by `scale` around `center_offset`.
    fn value(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        scale: f64,
        center_offset: Complex,
    ) -> f64;
}
