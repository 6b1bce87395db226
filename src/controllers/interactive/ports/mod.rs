//! Port definitions for the rendering engine.
//!
//! Traits that decouple the engine from the presentation layer consuming
//! its frames.

pub mod output_sink;
