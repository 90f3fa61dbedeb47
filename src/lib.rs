#![warn(missing_docs)]

//! Hand-drawn, sketchy rendering for 2D drawing surfaces.
//!
//! Open a session with [HandyDraw::start_handy](core::handy::HandyDraw::start_handy)
//! and every primitive drawn through the [Sketch](core::sketch::Sketch) is
//! re-rendered by a sketchy engine into an off-screen buffer. Closing the
//! session with [stop_handy](core::handy::HandyDraw::stop_handy) composites
//! that buffer back onto the sketch.

pub use vello::kurbo as math;
pub use vello::peniko as color;

pub use handy_core as core;
#[cfg(feature = "rough")]
pub use handy_rough as rough;

/// A "prelude" for users of handy.
///
/// Importing this module brings into scope the types needed to open a
/// sketchy session and draw in it.
///
/// ```rust
/// use handy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::canvas::Canvas;
    pub use crate::core::config::EngineConfig;
    pub use crate::core::engine::{PlainEngine, SketchyEngine};
    pub use crate::core::error::{HandyError, HandyResult};
    pub use crate::core::handy::{HandyDraw, HandySurface};
    pub use crate::core::primitives::Primitives;
    pub use crate::core::shape::{EndMode, ShapeKind, ShapeRecord, Vertex};
    pub use crate::core::sketch::Sketch;
    pub use crate::core::style::{CoordMode, StrokeCap, StrokeJoin, Style};
    pub use crate::core::surface::{Surface, SurfaceKind};

    // Color
    pub use vello::peniko::Color;

    #[cfg(feature = "rough")]
    pub use crate::rough::RoughEngine;
}
