use crate::core::actions::render::ports::pixel_function::PixelFunction;
use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

/// Escape iterations are folded into this many shading steps before being
/// normalized, which cycles the gradient instead of washing out deep zooms.
const PALETTE_PERIOD: u32 = 51;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EscapeTimeConstructorError {
    ZeroMaxIterations,
    InvalidEscapeRadius { escape_radius: f64 },
}

impl fmt::Display for EscapeTimeConstructorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterations => {
                write!(f, "maximum iterations must be greater than zero")
            }
            Self::InvalidEscapeRadius { escape_radius } => {
                write!(
                    f,
                    "escape radius must be positive and finite: {}",
                    escape_radius
                )
            }
        }
    }
}

impl Error for EscapeTimeConstructorError {}

/// The classic Mandelbrot escape-time iteration, mapped onto screen pixels.
///
/// A pixel is translated to the complex plane relative to the viewport
/// center, offset by `center_offset` and scaled by `scale`; `z ← z² + c` is
/// iterated from zero until `|z|` crosses the escape radius or the iteration
/// budget runs out (bounded points shade to 0).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EscapeTime {
    max_iterations: u32,
    escape_radius: f64,
}

impl EscapeTime {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 2000;
    pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

    pub fn new(
        max_iterations: u32,
        escape_radius: f64,
    ) -> Result<Self, EscapeTimeConstructorError> {
        if max_iterations == 0 {
            return Err(EscapeTimeConstructorError::ZeroMaxIterations);
        }

        if !(escape_radius > 0.0 && escape_radius.is_finite()) {
            return Err(EscapeTimeConstructorError::InvalidEscapeRadius { escape_radius });
        }

        Ok(Self {
            max_iterations,
            escape_radius,
        })
    }
}

impl Default for EscapeTime {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            escape_radius: Self::DEFAULT_ESCAPE_RADIUS,
        }
    }
}

impl PixelFunction for EscapeTime {
    fn value(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        scale: f64,
        center_offset: Complex,
    ) -> f64 {
        let pixel = Complex {
            real: f64::from(x) - f64::from(width) / 2.0,
            imag: f64::from(y) - f64::from(height) / 2.0,
        };
        let c = (pixel + center_offset) * scale;
        let threshold = self.escape_radius * self.escape_radius;

        let mut z = Complex::ZERO;
        for step in 0..=self.max_iterations {
            if z.magnitude_squared() >= threshold {
                return f64::from(step % PALETTE_PERIOD) / f64::from(PALETTE_PERIOD - 1);
            }
            z = z * z + c;
        }

        0.0
    }
}
