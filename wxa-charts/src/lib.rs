//! Chart descriptions and rendering.
//!
//! Plot steps build a [`Figure`](figure::Figure), a plain description of a
//! chart, and hand it to a [`Renderer`](render::Renderer). The SVG renderer
//! draws figures with `plotters`; the memory renderer only keeps them, which
//! is what the tests use.

pub mod colormap;
pub mod draw;
pub mod figure;
pub mod render;

pub use figure::{Axes, Figure, FigureKind};
pub use render::{MemoryRenderer, Renderer, SvgRenderer};
