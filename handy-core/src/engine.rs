//! The contract between a sketchy surface and the engine that perturbs its
//! primitives.

use crate::config::EngineConfig;
use crate::error::HandyResult;
use crate::primitives::Primitives;
use crate::shape::ShapeRecord;

/// Re-renders primitives in a hand-drawn style.
///
/// Every method receives the surface to draw on. Calls made on `g` while the
/// engine method runs are rasterized natively; they never reach the engine
/// again. An engine may issue any number of calls, including none.
pub trait SketchyEngine {
    /// Apply configuration. Called when a sketchy surface is set up.
    fn configure(&mut self, config: &EngineConfig) {
        let _ = config;
    }

    /// Draw a point.
    fn point(&mut self, g: &mut dyn Primitives, x: f32, y: f32);

    /// Draw a point in 3D space.
    fn point3(&mut self, g: &mut dyn Primitives, x: f32, y: f32, z: f32);

    /// Draw a line.
    fn line(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32);

    /// Draw a line in 3D space.
    fn line3(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32);

    /// Draw an ellipse.
    fn ellipse(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32);

    /// Draw an arc.
    fn arc(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32);

    /// Draw a rectangle.
    fn rect(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32);

    /// Draw a triangle.
    fn triangle(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32);

    /// Draw a quadrilateral.
    fn quad(
        &mut self,
        g: &mut dyn Primitives,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
        x4: f32,
        y4: f32,
    );

    /// Draw a cube.
    fn cube(&mut self, g: &mut dyn Primitives, size: f32);

    /// Draw a box.
    fn box3(&mut self, g: &mut dyn Primitives, w: f32, h: f32, d: f32);

    /// Draw a finished shape.
    fn shape(&mut self, g: &mut dyn Primitives, shape: &ShapeRecord) -> HandyResult<()>;
}

/// An engine that draws every primitive exactly as given.
///
/// Useful for switching sketchy rendering off without changing any drawing
/// code.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainEngine;

impl SketchyEngine for PlainEngine {
    fn point(&mut self, g: &mut dyn Primitives, x: f32, y: f32) {
        g.point(x, y);
    }

    fn point3(&mut self, g: &mut dyn Primitives, x: f32, y: f32, z: f32) {
        g.point3(x, y, z);
    }

    fn line(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32) {
        g.line(x1, y1, x2, y2);
    }

    fn line3(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) {
        g.line3(x1, y1, z1, x2, y2, z2);
    }

    fn ellipse(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32) {
        g.ellipse(x, y, w, h);
    }

    fn arc(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32) {
        g.arc(x, y, w, h, start, stop);
    }

    fn rect(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32) {
        g.rect(x, y, w, h);
    }

    fn triangle(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        g.triangle(x1, y1, x2, y2, x3, y3);
    }

    fn quad(
        &mut self,
        g: &mut dyn Primitives,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
        x4: f32,
        y4: f32,
    ) {
        g.quad(x1, y1, x2, y2, x3, y3, x4, y4);
    }

    fn cube(&mut self, g: &mut dyn Primitives, size: f32) {
        g.cube(size);
    }

    fn box3(&mut self, g: &mut dyn Primitives, w: f32, h: f32, d: f32) {
        g.box3(w, h, d);
    }

    fn shape(&mut self, g: &mut dyn Primitives, shape: &ShapeRecord) -> HandyResult<()> {
        shape.replay(g)
    }
}
