//! The fixed set of drawing primitives.
//!
//! [Primitives] is implemented once by the native raster
//! [Canvas](crate::canvas::Canvas) and once by the intercepting
//! [HandySurface](crate::handy::HandySurface). Sketchy engines only ever see a
//! `&mut dyn Primitives`, so they can draw but cannot touch style or transform
//! state.

use crate::error::HandyResult;
use crate::shape::{EndMode, ShapeKind};

/// Drawing primitives shared by native and sketchy surfaces.
///
/// Coordinates of `ellipse`, `arc` and `rect` are interpreted according to
/// the surface's current [CoordMode](crate::style::CoordMode) settings.
pub trait Primitives {
    /// Whether calls issued right now are rasterized directly.
    fn is_native(&self) -> bool;

    /// Draw a point.
    fn point(&mut self, x: f32, y: f32);

    /// Draw a point in 3D space.
    fn point3(&mut self, x: f32, y: f32, z: f32);

    /// Draw a line between two points.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    /// Draw a line between two points in 3D space.
    fn line3(&mut self, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32);

    /// Draw an ellipse.
    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Draw an arc of an ellipse between two angles in radians.
    fn arc(&mut self, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32);

    /// Draw a rectangle.
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Draw a triangle.
    fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32);

    /// Draw a quadrilateral.
    fn quad(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, x4: f32, y4: f32);

    /// Draw a cube centred on the origin.
    fn cube(&mut self, size: f32);

    /// Draw a box centred on the origin.
    fn box3(&mut self, w: f32, h: f32, d: f32);

    /// Start a polygon.
    fn begin_shape(&mut self) -> HandyResult<()> {
        self.begin_shape_with(ShapeKind::Polygon)
    }

    /// Start a shape of the given kind.
    fn begin_shape_with(&mut self, kind: ShapeKind) -> HandyResult<()>;

    /// Add a vertex to the open shape.
    fn vertex(&mut self, x: f32, y: f32) -> HandyResult<()>;

    /// Add a 3D vertex to the open shape.
    fn vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()>;

    /// Add a curve vertex to the open shape.
    fn curve_vertex(&mut self, x: f32, y: f32) -> HandyResult<()>;

    /// Add a 3D curve vertex to the open shape.
    fn curve_vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()>;

    /// Finish the open shape without closing it.
    fn end_shape(&mut self) -> HandyResult<()> {
        self.end_shape_with(EndMode::Open)
    }

    /// Finish the open shape.
    fn end_shape_with(&mut self, mode: EndMode) -> HandyResult<()>;
}
