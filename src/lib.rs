mod controllers;
mod core;
mod presenters;

pub use crate::controllers::interactive::{OutputSink, RenderedFrame, RenderingEngine};
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::controllers::snapshot::{SnapshotController, SnapshotError};
pub use crate::core::actions::render::ports::pixel_function::PixelFunction;
pub use crate::core::actions::render::render_direct::render_direct;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::render_request::{RenderRequest, RenderRequestError};
pub use crate::core::fractals::escape_time::EscapeTime;
pub use crate::presenters::file::ppm::PpmFilePresenter;
