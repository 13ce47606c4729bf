//! Presentation hand-off
//!
//! The simulation never talks to a GPU. Entities turn their world polygons
//! into coloured triangle lists and push them, plus HUD text, into a
//! `DrawSurface` supplied by the host.

pub mod shapes;
pub mod surface;
pub mod vertex;

pub use surface::{DrawCall, DrawSurface, RecordingSurface};
pub use vertex::{Color, Vertex, colors};
