#![warn(missing_docs)]

//! Core library for handy => See `handy` crate.
//!
//! Contains the drawing contract, the raster canvas and the sketchy session
//! machinery.

pub use tiny_skia;
pub use vello::kurbo;
pub use vello::peniko;

/// Contains the [Canvas](canvas::Canvas) raster surface.
pub mod canvas;

/// Contains the [EngineConfig](config::EngineConfig) struct.
pub mod config;

/// Contains the [SketchyEngine](engine::SketchyEngine) contract.
pub mod engine;

/// Contains the [HandyError](error::HandyError) type.
pub mod error;

/// Contains the sketchy surface and the session controller.
pub mod handy;

/// Contains the [Primitives](primitives::Primitives) trait.
pub mod primitives;

/// Contains the shape vertex protocol.
pub mod shape;

/// Contains the [Sketch](sketch::Sketch) host.
pub mod sketch;

/// Contains drawing style types.
pub mod style;

/// Contains the [Surface](surface::Surface) trait.
pub mod surface;
