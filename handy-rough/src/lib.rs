#![warn(missing_docs)]

//! Seeded perturbation engine for handy => See `handy` crate.
//!
//! [RoughEngine] redraws every primitive as a couple of slightly displaced
//! strokes, which reads as a quick pen sketch. The amount of displacement is
//! scaled by [EngineConfig::roughness]; a fixed [EngineConfig::seed] makes the
//! output reproducible.

use handy_core::config::EngineConfig;
use handy_core::engine::SketchyEngine;
use handy_core::error::HandyResult;
use handy_core::primitives::Primitives;
use handy_core::shape::{ShapeKind, ShapeRecord, Vertex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum endpoint displacement at roughness `1.0`, in pixels.
const POSITION_JITTER: f32 = 1.5;

/// Maximum size change at roughness `1.0`, as a fraction of the size.
const SIZE_JITTER: f32 = 0.03;

/// Maximum angle change of arc ends at roughness `1.0`, in radians.
const ANGLE_JITTER: f32 = 0.05;

/// A sketchy engine that draws each primitive with random displacement.
#[derive(Debug)]
pub struct RoughEngine {
    config: EngineConfig,
    rng: StdRng,
}

impl RoughEngine {
    /// Create an engine with default settings and an entropy seed.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine from the given settings.
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create an engine with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_config(EngineConfig::default().with_seed(seed))
    }

    /// The active settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn passes(&self) -> usize {
        if self.config.roughness > 0.0 {
            2
        } else {
            1
        }
    }

    /// A random offset in `-amount..amount`, scaled by the roughness.
    fn offset(&mut self, amount: f32) -> f32 {
        let amount = amount * self.config.roughness;
        if !(amount > 0.0) || !amount.is_finite() {
            return 0.0;
        }
        self.rng.gen_range(-amount..amount)
    }

    fn jitter(&mut self, v: f32) -> f32 {
        v + self.offset(POSITION_JITTER)
    }

    // Zero stays zero so that degenerate primitives stay invisible.
    fn jitter_size(&mut self, v: f32) -> f32 {
        if v == 0.0 {
            return 0.0;
        }
        v + self.offset(v.abs() * SIZE_JITTER)
    }

    fn jitter_vertex(&mut self, v: &Vertex) -> Vertex {
        Vertex {
            x: self.jitter(v.x),
            y: self.jitter(v.y),
            ..*v
        }
    }
}

impl Default for RoughEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchyEngine for RoughEngine {
    fn configure(&mut self, config: &EngineConfig) {
        if let Some(seed) = config.seed {
            if self.config.seed != Some(seed) {
                self.rng = StdRng::seed_from_u64(seed);
            }
        }
        self.config = config.clone();
        log::debug!(
            "RoughEngine configured: roughness {}, handy {}, hachure angle {} (+/- {})",
            self.config.roughness,
            self.config.is_handy,
            self.config.hachure_angle,
            self.config.hachure_perturbation_angle
        );
    }

    fn point(&mut self, g: &mut dyn Primitives, x: f32, y: f32) {
        if !self.config.is_handy {
            return g.point(x, y);
        }
        let (x, y) = (self.jitter(x), self.jitter(y));
        g.point(x, y);
    }

    fn point3(&mut self, g: &mut dyn Primitives, x: f32, y: f32, z: f32) {
        if !self.config.is_handy {
            return g.point3(x, y, z);
        }
        let (x, y) = (self.jitter(x), self.jitter(y));
        g.point3(x, y, z);
    }

    fn line(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32) {
        if !self.config.is_handy {
            return g.line(x1, y1, x2, y2);
        }
        for _ in 0..self.passes() {
            let (a, b) = (self.jitter(x1), self.jitter(y1));
            let (c, d) = (self.jitter(x2), self.jitter(y2));
            g.line(a, b, c, d);
        }
    }

    fn line3(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) {
        if !self.config.is_handy {
            return g.line3(x1, y1, z1, x2, y2, z2);
        }
        for _ in 0..self.passes() {
            let (a, b) = (self.jitter(x1), self.jitter(y1));
            let (c, d) = (self.jitter(x2), self.jitter(y2));
            g.line3(a, b, z1, c, d, z2);
        }
    }

    fn ellipse(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32) {
        if !self.config.is_handy {
            return g.ellipse(x, y, w, h);
        }
        for _ in 0..self.passes() {
            let (cx, cy) = (self.jitter(x), self.jitter(y));
            let (cw, ch) = (self.jitter_size(w), self.jitter_size(h));
            g.ellipse(cx, cy, cw, ch);
        }
    }

    fn arc(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32) {
        if !self.config.is_handy {
            return g.arc(x, y, w, h, start, stop);
        }
        for _ in 0..self.passes() {
            let (cx, cy) = (self.jitter(x), self.jitter(y));
            let (cw, ch) = (self.jitter_size(w), self.jitter_size(h));
            let a = start + self.offset(ANGLE_JITTER);
            let b = stop + self.offset(ANGLE_JITTER);
            g.arc(cx, cy, cw, ch, a, b);
        }
    }

    fn rect(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32) {
        if !self.config.is_handy {
            return g.rect(x, y, w, h);
        }
        for _ in 0..self.passes() {
            let (rx, ry) = (self.jitter(x), self.jitter(y));
            let (rw, rh) = (self.jitter_size(w), self.jitter_size(h));
            g.rect(rx, ry, rw, rh);
        }
    }

    fn triangle(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        if !self.config.is_handy {
            return g.triangle(x1, y1, x2, y2, x3, y3);
        }
        for _ in 0..self.passes() {
            let (a, b) = (self.jitter(x1), self.jitter(y1));
            let (c, d) = (self.jitter(x2), self.jitter(y2));
            let (e, f) = (self.jitter(x3), self.jitter(y3));
            g.triangle(a, b, c, d, e, f);
        }
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
        if !self.config.is_handy {
            return g.quad(x1, y1, x2, y2, x3, y3, x4, y4);
        }
        for _ in 0..self.passes() {
            let (a, b) = (self.jitter(x1), self.jitter(y1));
            let (c, d) = (self.jitter(x2), self.jitter(y2));
            let (e, f) = (self.jitter(x3), self.jitter(y3));
            let (p, q) = (self.jitter(x4), self.jitter(y4));
            g.quad(a, b, c, d, e, f, p, q);
        }
    }

    fn cube(&mut self, g: &mut dyn Primitives, size: f32) {
        if !self.config.is_handy {
            return g.cube(size);
        }
        for _ in 0..self.passes() {
            let s = self.jitter_size(size);
            g.cube(s);
        }
    }

    fn box3(&mut self, g: &mut dyn Primitives, w: f32, h: f32, d: f32) {
        if !self.config.is_handy {
            return g.box3(w, h, d);
        }
        for _ in 0..self.passes() {
            let (bw, bh) = (self.jitter_size(w), self.jitter_size(h));
            let bd = self.jitter_size(d);
            g.box3(bw, bh, bd);
        }
    }

    fn shape(&mut self, g: &mut dyn Primitives, shape: &ShapeRecord) -> HandyResult<()> {
        if !self.config.is_handy {
            return shape.replay(g);
        }
        // A second pass would only thicken individual points.
        let passes = match shape.kind {
            ShapeKind::Points => 1,
            _ => self.passes(),
        };
        for _ in 0..passes {
            let vertices = shape
                .vertices
                .iter()
                .map(|v| self.jitter_vertex(v))
                .collect();
            let rough = ShapeRecord {
                kind: shape.kind,
                vertices,
                end: shape.end,
            };
            rough.replay(g)?;
        }
        Ok(())
    }
}
