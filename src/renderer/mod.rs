//! Rendering module
//!
//! `draw` turns the world into an API-free `Frame`; `pipeline` puts the
//! frame's triangles on screen with wgpu.

pub mod draw;
pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::draw;
pub use frame::{Frame, HitRegions, UiAction};
pub use pipeline::{RenderState, Viewport};
pub use vertex::Vertex;
