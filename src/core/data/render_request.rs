use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderRequestError {
    InvalidSize { width: u32, height: u32 },
    InvalidTileSize { tile_size: u32 },
}

impl fmt::Display for RenderRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "image size must be positive: {}x{}", width, height)
            }
            Self::InvalidTileSize { tile_size } => {
                write!(f, "tile size must be positive: {}", tile_size)
            }
        }
    }
}

impl Error for RenderRequestError {}

/// A snapshot of "what to render": viewport geometry plus the tile granularity
/// of one progressive pass.
///
/// Immutable by design - represents the exact parameters for one render pass.
/// Coarse passes use a large `tile_size` (conventionally a power of two); each
/// refinement halves it until a full-resolution pass at tile size 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub center_offset: Complex,
    pub tile_size: u32,
}

impl RenderRequest {
    pub fn new(
        width: u32,
        height: u32,
        scale: f64,
        center_offset: Complex,
        tile_size: u32,
    ) -> Result<Self, RenderRequestError> {
        if width == 0 || height == 0 {
            return Err(RenderRequestError::InvalidSize { width, height });
        }

        if tile_size == 0 {
            return Err(RenderRequestError::InvalidTileSize { tile_size });
        }

        Ok(Self {
            width,
            height,
            scale,
            center_offset,
            tile_size,
        })
    }

    /// The request for the next, finer pass: same geometry, tile size halved.
    /// Returns `None` once full resolution has been reached.
    #[must_use]
    pub fn refined(&self) -> Option<Self> {
        if self.tile_size == 1 {
            return None;
        }

        Some(Self {
            tile_size: (self.tile_size / 2).max(1),
            ..*self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tile_size: u32) -> RenderRequest {
        RenderRequest::new(64, 48, 0.005, Complex::ZERO, tile_size).unwrap()
    }

    #[test]
    fn test_new_valid() {
        let request = RenderRequest::new(640, 480, 0.005, Complex::ZERO, 64);

        assert!(request.is_ok());
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let no_width = RenderRequest::new(0, 480, 0.005, Complex::ZERO, 64);
        let no_height = RenderRequest::new(640, 0, 0.005, Complex::ZERO, 64);

        assert_eq!(
            no_width.unwrap_err(),
            RenderRequestError::InvalidSize {
                width: 0,
                height: 480
            }
        );
        assert_eq!(
            no_height.unwrap_err(),
            RenderRequestError::InvalidSize {
                width: 640,
                height: 0
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_tile_size() {
        let result = RenderRequest::new(640, 480, 0.005, Complex::ZERO, 0);

        assert_eq!(
            result.unwrap_err(),
            RenderRequestError::InvalidTileSize { tile_size: 0 }
        );
    }

    #[test]
    fn test_refined_halves_tile_size() {
        let refined = request(64).refined().unwrap();

        assert_eq!(refined.tile_size, 32);
        assert_eq!(refined.width, 64);
        assert_eq!(refined.height, 48);
    }

    #[test]
    fn test_refined_stops_at_full_resolution() {
        assert_eq!(request(1).refined(), None);
    }

    #[test]
    fn test_refined_chain_terminates() {
        // 64 → 32 → 16 → 8 → 4 → 2 → 1: log2(64) + 1 passes in total.
        let mut current = request(64);
        let mut passes = 1;

        while let Some(next) = current.refined() {
            assert_eq!(next.tile_size, current.tile_size / 2);
            current = next;
            passes += 1;
        }

        assert_eq!(current.tile_size, 1);
        assert_eq!(passes, 7);
    }

    #[test]
    fn test_refined_floors_odd_tile_size_at_one() {
        let refined = request(3).refined().unwrap();

        assert_eq!(refined.tile_size, 1);
        assert_eq!(refined.refined(), None);
    }
}
