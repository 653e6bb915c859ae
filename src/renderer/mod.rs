//! Rendering module
//!
//! `painter` turns game state into filled primitives; `pipeline` draws them
//! with WebGPU.

pub mod painter;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use painter::{Painter, VertexBatch, paint_frame};
pub use pipeline::RenderState;
