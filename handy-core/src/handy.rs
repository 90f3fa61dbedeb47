//! Sketchy drawing sessions.
//!
//! [HandySurface] intercepts primitives and forwards them to a
//! [SketchyEngine]. [HandyDraw] installs that surface as a sketch's active
//! surface between [start_handy](HandyDraw::start_handy) and
//! [stop_handy](HandyDraw::stop_handy), then composites the captured buffer
//! back onto the sketch's own surface.
//!
//! ```ignore
//! let mut sketch = Sketch::new(800, 800)?;
//! let mut handy = HandyDraw::new(&sketch, RoughEngine::new())?;
//!
//! handy.start_handy(&mut sketch)?;
//! sketch.graphics().ellipse(100.0, 100.0, 50.0, 50.0);
//! handy.stop_handy(&mut sketch)?;
//! ```

use std::any::Any;

use tiny_skia::Pixmap;
use vello::kurbo::Affine;
use vello::peniko::Color;

use crate::canvas::Canvas;
use crate::config::EngineConfig;
use crate::engine::SketchyEngine;
use crate::error::{HandyError, HandyResult};
use crate::primitives::Primitives;
use crate::shape::{EndMode, ShapeBuilder, ShapeKind, Vertex};
use crate::sketch::Sketch;
use crate::style::Style;
use crate::surface::{Surface, SurfaceKind};

/// A surface that re-renders every primitive through a sketchy engine.
///
/// While the engine runs it is leased out of the surface. That lease is the
/// recursion guard: calls the engine makes back onto the surface find no
/// engine and are rasterized into the buffer directly.
pub struct HandySurface<E> {
    buffer: Canvas,
    engine: Option<E>,
    shape: ShapeBuilder,
}

/// Returns the engine to its surface when dropped, also during unwinding.
struct EngineLease<'a, E> {
    surface: &'a mut HandySurface<E>,
    engine: Option<E>,
}

impl<E> Drop for EngineLease<'_, E> {
    fn drop(&mut self) {
        self.surface.engine = self.engine.take();
    }
}

impl<E: SketchyEngine> HandySurface<E> {
    /// Create a sketchy surface with a transparent buffer of the given size.
    pub fn new(width: u32, height: u32, engine: E) -> HandyResult<Self> {
        Ok(Self {
            buffer: Canvas::new(width, height)?,
            engine: Some(engine),
            shape: ShapeBuilder::new(),
        })
    }

    /// Whether the engine is currently running, so that calls are rasterized natively.
    pub fn is_guarded(&self) -> bool {
        self.engine.is_none()
    }

    /// The off-screen buffer.
    pub fn buffer(&self) -> &Canvas {
        &self.buffer
    }

    /// The engine, unless it is currently running.
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Mutable access to the engine, unless it is currently running.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Drop a shape left open by the client, on this surface and on its buffer.
    fn discard_open_shape(&mut self) {
        if self.shape.discard() | self.buffer.discard_shape() {
            log::warn!("Sketchy session ended with an open shape; its vertices were discarded");
        }
    }

    /// Pass configuration on to the engine.
    pub fn configure(&mut self, config: &EngineConfig) {
        match self.engine.as_mut() {
            Some(engine) => engine.configure(config),
            None => log::warn!("Cannot configure a sketchy engine while it is drawing"),
        }
    }

    fn intercept<R>(
        &mut self,
        native: impl FnOnce(&mut Canvas) -> R,
        sketchy: impl FnOnce(&mut E, &mut dyn Primitives) -> R,
    ) -> R {
        let Some(engine) = self.engine.take() else {
            return native(&mut self.buffer);
        };
        let mut lease = EngineLease {
            surface: self,
            engine: Some(engine),
        };
        let EngineLease { surface, engine } = &mut lease;
        let result = match engine.as_mut() {
            Some(engine) => sketchy(engine, &mut **surface),
            None => native(&mut surface.buffer),
        };
        result
    }
}

impl<E: SketchyEngine> Primitives for HandySurface<E> {
    fn is_native(&self) -> bool {
        self.is_guarded()
    }

    fn point(&mut self, x: f32, y: f32) {
        self.intercept(|c| c.point(x, y), |e, g| e.point(g, x, y));
    }

    fn point3(&mut self, x: f32, y: f32, z: f32) {
        self.intercept(|c| c.point3(x, y, z), |e, g| e.point3(g, x, y, z));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.intercept(|c| c.line(x1, y1, x2, y2), |e, g| e.line(g, x1, y1, x2, y2));
    }

    fn line3(&mut self, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) {
        self.intercept(
            |c| c.line3(x1, y1, z1, x2, y2, z2),
            |e, g| e.line3(g, x1, y1, z1, x2, y2, z2),
        );
    }

    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.intercept(|c| c.ellipse(x, y, w, h), |e, g| e.ellipse(g, x, y, w, h));
    }

    fn arc(&mut self, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32) {
        self.intercept(
            |c| c.arc(x, y, w, h, start, stop),
            |e, g| e.arc(g, x, y, w, h, start, stop),
        );
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.intercept(|c| c.rect(x, y, w, h), |e, g| e.rect(g, x, y, w, h));
    }

    fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.intercept(
            |c| c.triangle(x1, y1, x2, y2, x3, y3),
            |e, g| e.triangle(g, x1, y1, x2, y2, x3, y3),
        );
    }

    fn quad(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, x4: f32, y4: f32) {
        self.intercept(
            |c| c.quad(x1, y1, x2, y2, x3, y3, x4, y4),
            |e, g| e.quad(g, x1, y1, x2, y2, x3, y3, x4, y4),
        );
    }

    fn cube(&mut self, size: f32) {
        self.intercept(|c| c.cube(size), |e, g| e.cube(g, size));
    }

    fn box3(&mut self, w: f32, h: f32, d: f32) {
        self.intercept(|c| c.box3(w, h, d), |e, g| e.box3(g, w, h, d));
    }

    // Vertices are collected here while the guard is clear; the engine sees
    // the finished shape once, at end_shape.
    fn begin_shape_with(&mut self, kind: ShapeKind) -> HandyResult<()> {
        if self.is_guarded() {
            self.buffer.begin_shape_with(kind)
        } else {
            self.shape.begin(kind)
        }
    }

    fn vertex(&mut self, x: f32, y: f32) -> HandyResult<()> {
        if self.is_guarded() {
            self.buffer.vertex(x, y)
        } else {
            self.shape.push(Vertex::new(x, y))
        }
    }

    fn vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()> {
        if self.is_guarded() {
            self.buffer.vertex3(x, y, z)
        } else {
            self.shape.push(Vertex::new(x, y).with_z(z))
        }
    }

    fn curve_vertex(&mut self, x: f32, y: f32) -> HandyResult<()> {
        if self.is_guarded() {
            self.buffer.curve_vertex(x, y)
        } else {
            self.shape.push(Vertex::curve(x, y))
        }
    }

    fn curve_vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()> {
        if self.is_guarded() {
            self.buffer.curve_vertex3(x, y, z)
        } else {
            self.shape.push(Vertex::curve(x, y).with_z(z))
        }
    }

    fn end_shape_with(&mut self, mode: EndMode) -> HandyResult<()> {
        if self.is_guarded() {
            return self.buffer.end_shape_with(mode);
        }
        let record = self.shape.finish(mode)?;
        self.intercept(|c| record.replay(c), |e, g| e.shape(g, &record))
    }
}

impl<E: SketchyEngine + 'static> Surface for HandySurface<E> {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Sketchy
    }

    fn size(&self) -> (u32, u32) {
        self.buffer.size()
    }

    fn resize(&mut self, width: u32, height: u32) -> HandyResult<()> {
        self.buffer.resize(width, height)
    }

    fn begin_draw(&mut self) {
        self.buffer.begin_draw();
    }

    fn end_draw(&mut self) {
        self.buffer.end_draw();
    }

    fn style(&self) -> &Style {
        self.buffer.style()
    }

    fn style_mut(&mut self) -> &mut Style {
        self.buffer.style_mut()
    }

    fn matrix(&self) -> Affine {
        self.buffer.matrix()
    }

    fn set_matrix(&mut self, matrix: Affine) {
        self.buffer.set_matrix(matrix);
    }

    fn push_matrix(&mut self) {
        self.buffer.push_matrix();
    }

    fn pop_matrix(&mut self) {
        self.buffer.pop_matrix();
    }

    fn push_style(&mut self) {
        self.buffer.push_style();
    }

    fn pop_style(&mut self) {
        self.buffer.pop_style();
    }

    fn is_smooth(&self) -> bool {
        self.buffer.is_smooth()
    }

    fn set_smooth(&mut self, smooth: bool) {
        self.buffer.set_smooth(smooth);
    }

    fn background(&mut self, color: Color) {
        self.buffer.background(color);
    }

    fn image(&mut self, image: &Pixmap, x: f32, y: f32) {
        self.buffer.image(image, x, y);
    }

    fn snapshot(&self) -> Pixmap {
        self.buffer.snapshot()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// State captured by `start_handy` and consumed by `stop_handy`.
struct SessionState<E> {
    previous: Box<dyn Surface>,
    /// The surface this controller put into the slot, compared by address.
    installed: *const HandySurface<E>,
    style: Style,
    matrix: Affine,
}

/// Turns sketchy rendering on and off for a [Sketch].
///
/// Drawing code between [start_handy](Self::start_handy) and
/// [stop_handy](Self::stop_handy) lands on a [HandySurface] instead of the
/// sketch's own surface. Only one session can be open at a time: starting a
/// second one fails with [HandyError::SessionActive], and stopping without a
/// session fails with [HandyError::NoSession].
pub struct HandyDraw<E: SketchyEngine + 'static> {
    surface: Option<Box<HandySurface<E>>>,
    session: Option<SessionState<E>>,
}

impl<E: SketchyEngine + 'static> HandyDraw<E> {
    /// Create a controller whose buffer matches the sketch's current size.
    pub fn new(sketch: &Sketch, engine: E) -> HandyResult<Self> {
        let (width, height) = sketch.size();
        Ok(Self {
            surface: Some(Box::new(HandySurface::new(width, height, engine)?)),
            session: None,
        })
    }

    /// Create a controller and configure its engine.
    pub fn with_config(sketch: &Sketch, engine: E, config: &EngineConfig) -> HandyResult<Self> {
        let mut handy = Self::new(sketch, engine)?;
        handy.configure(config)?;
        Ok(handy)
    }

    /// Whether a session is open.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Pass configuration on to the engine. Only allowed between sessions.
    pub fn configure(&mut self, config: &EngineConfig) -> HandyResult<()> {
        let surface = self.surface.as_mut().ok_or(HandyError::SessionActive)?;
        surface.configure(config);
        Ok(())
    }

    /// The sketchy surface, while no session is open.
    pub fn surface(&self) -> Option<&HandySurface<E>> {
        self.surface.as_deref()
    }

    /// Mutable access to the sketchy surface, while no session is open.
    pub fn surface_mut(&mut self) -> Option<&mut HandySurface<E>> {
        self.surface.as_deref_mut()
    }

    /// The off-screen buffer holding the last session's drawing, while no
    /// session is open.
    pub fn buffer(&self) -> Option<&Canvas> {
        self.surface.as_deref().map(HandySurface::buffer)
    }

    /// Turn sketchy rendering on.
    ///
    /// Must be paired with [stop_handy](Self::stop_handy) once the sketchy
    /// drawing is done.
    pub fn start_handy(&mut self, sketch: &mut Sketch) -> HandyResult<()> {
        if self.session.is_some() || sketch.graphics_ref().kind() == SurfaceKind::Sketchy {
            return Err(HandyError::SessionActive);
        }
        let Some(mut surface) = self.surface.take() else {
            return Err(HandyError::SessionActive);
        };

        let previous = sketch.graphics();
        if previous.kind() != SurfaceKind::Raster {
            log::warn!(
                "Sketchy rendering is only supported over the raster backend, not {:?}",
                previous.kind()
            );
        }

        surface.begin_draw();
        surface.set_style(previous.style());
        surface.set_matrix(previous.matrix());
        surface.set_smooth(previous.is_smooth());
        let style = previous.style().clone();
        let matrix = previous.matrix();

        let (width, height) = sketch.size();
        if surface.size() != (width, height) {
            if let Err(e) = surface.resize(width, height) {
                surface.end_draw();
                self.surface = Some(surface);
                return Err(e);
            }
        }
        surface.background(Color::TRANSPARENT);

        let installed: *const HandySurface<E> = &*surface;
        let previous = sketch.replace_graphics(surface);
        self.session = Some(SessionState {
            previous,
            installed,
            style,
            matrix,
        });
        log::trace!("Sketchy session started at {}x{}", width, height);
        Ok(())
    }

    /// Turn sketchy rendering off and composite what was drawn onto the
    /// sketch's own surface.
    pub fn stop_handy(&mut self, sketch: &mut Sketch) -> HandyResult<()> {
        let Some(session) = self.session.take() else {
            return Err(HandyError::NoSession);
        };
        let ours = sketch
            .graphics_ref()
            .as_any()
            .downcast_ref::<HandySurface<E>>()
            .is_some_and(|current| std::ptr::eq(current, session.installed));
        if !ours {
            self.session = Some(session);
            return Err(HandyError::SurfaceSwapped);
        }

        let SessionState {
            previous,
            style,
            matrix,
            ..
        } = session;
        // The slot was checked above to hold exactly our surface.
        let current = sketch.replace_graphics(previous);
        let mut surface = current
            .into_any()
            .downcast::<HandySurface<E>>()
            .map_err(|_| HandyError::SurfaceSwapped)?;
        surface.end_draw();
        surface.discard_open_shape();

        if surface.style() != &style || surface.matrix() != matrix {
            log::debug!("Carrying style or transform changes from the sketchy session back to the sketch");
        }

        let target = sketch.graphics();
        target.set_style(surface.style());
        target.set_matrix(surface.matrix());

        target.push_matrix();
        target.reset_matrix();
        target.push_style();
        target.no_tint();
        target.image(surface.buffer().pixmap(), 0.0, 0.0);
        target.pop_style();
        target.pop_matrix();

        self.surface = Some(surface);
        log::trace!("Sketchy session stopped");
        Ok(())
    }
}

impl<E: SketchyEngine + 'static> Drop for HandyDraw<E> {
    fn drop(&mut self) {
        if self.session.is_some() {
            log::warn!("HandyDraw dropped during a sketchy session; the sketch keeps drawing into the sketchy buffer");
        }
    }
}
