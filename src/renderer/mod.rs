//! WebGPU rendering module
//!
//! Scenes are plain triangle lists built on the CPU each frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
