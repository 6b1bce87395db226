//! The progressive rendering engine.
//!
//! This module owns the concurrency core: a fixed worker pool fanning one
//! render request out across row bands, generation counters for implicit
//! race-free cancellation, an automatic coarse-to-fine refinement chain, and
//! a debounced output slot the consumer drains at its own pace.
//!
//! # Architecture
//!
//! - **Input**: [`RenderRequest`](crate::core::data::render_request::RenderRequest)
//!   snapshots submitted through `set_input`
//! - **Output**: [`OutputSink`] notifications plus `get_output` polling
//! - **Core**: tile-band fills from `core/actions` driven by a caller-supplied
//!   [`PixelFunction`](crate::core::actions::render::ports::pixel_function::PixelFunction)

pub mod data;
mod engine;
pub mod ports;

pub use data::rendered_frame::RenderedFrame;
pub use engine::RenderingEngine;
pub use ports::output_sink::OutputSink;
