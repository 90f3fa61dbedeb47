use std::cell::RefCell;
use std::rc::Rc;

use handy_core::canvas::Canvas;
use handy_core::engine::{PlainEngine, SketchyEngine};
use handy_core::error::{HandyError, HandyResult};
use handy_core::handy::HandyDraw;
use handy_core::kurbo::Affine;
use handy_core::peniko::Color;
use handy_core::primitives::Primitives;
use handy_core::shape::{EndMode, ShapeKind, ShapeRecord, Vertex};
use handy_core::sketch::Sketch;
use handy_core::style::Style;
use handy_core::surface::{Surface, SurfaceKind};
use tiny_skia::Pixmap;

/// One observed engine call: its name, its arguments, and whether the
/// surface handed to the engine was rasterizing natively at that point.
#[derive(Clone, Debug, PartialEq)]
struct Call {
    name: &'static str,
    args: Vec<f32>,
    native: bool,
}

type Log = Rc<RefCell<Vec<Call>>>;

/// Records every call and forwards it unchanged.
#[derive(Default)]
struct Recorder {
    calls: Log,
    shapes: Rc<RefCell<Vec<ShapeRecord>>>,
}

impl Recorder {
    fn record(&self, g: &dyn Primitives, name: &'static str, args: &[f32]) {
        self.calls.borrow_mut().push(Call {
            name,
            args: args.to_vec(),
            native: g.is_native(),
        });
    }
}

impl SketchyEngine for Recorder {
    fn point(&mut self, g: &mut dyn Primitives, x: f32, y: f32) {
        self.record(g, "point", &[x, y]);
        g.point(x, y);
    }

    fn point3(&mut self, g: &mut dyn Primitives, x: f32, y: f32, z: f32) {
        self.record(g, "point3", &[x, y, z]);
        g.point3(x, y, z);
    }

    fn line(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.record(g, "line", &[x1, y1, x2, y2]);
        g.line(x1, y1, x2, y2);
    }

    fn line3(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) {
        self.record(g, "line3", &[x1, y1, z1, x2, y2, z2]);
        g.line3(x1, y1, z1, x2, y2, z2);
    }

    fn ellipse(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32) {
        self.record(g, "ellipse", &[x, y, w, h]);
        g.ellipse(x, y, w, h);
    }

    fn arc(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32) {
        self.record(g, "arc", &[x, y, w, h, start, stop]);
        g.arc(x, y, w, h, start, stop);
    }

    fn rect(&mut self, g: &mut dyn Primitives, x: f32, y: f32, w: f32, h: f32) {
        self.record(g, "rect", &[x, y, w, h]);
        g.rect(x, y, w, h);
    }

    fn triangle(&mut self, g: &mut dyn Primitives, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.record(g, "triangle", &[x1, y1, x2, y2, x3, y3]);
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
        self.record(g, "quad", &[x1, y1, x2, y2, x3, y3, x4, y4]);
        g.quad(x1, y1, x2, y2, x3, y3, x4, y4);
    }

    fn cube(&mut self, g: &mut dyn Primitives, size: f32) {
        self.record(g, "cube", &[size]);
        g.cube(size);
    }

    fn box3(&mut self, g: &mut dyn Primitives, w: f32, h: f32, d: f32) {
        self.record(g, "box3", &[w, h, d]);
        g.box3(w, h, d);
    }

    fn shape(&mut self, g: &mut dyn Primitives, shape: &ShapeRecord) -> HandyResult<()> {
        self.record(g, "shape", &[]);
        self.shapes.borrow_mut().push(shape.clone());
        shape.replay(g)
    }
}

/// Draws a fixed scribble no matter which primitive was requested.
struct Scribbler;

impl Scribbler {
    fn scribble(g: &mut dyn Primitives) {
        g.line(0.0, 0.0, 30.0, 30.0);
        g.ellipse(20.0, 20.0, 10.0, 10.0);
    }
}

impl SketchyEngine for Scribbler {
    fn point(&mut self, g: &mut dyn Primitives, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn point3(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn line(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn line3(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn ellipse(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn arc(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn rect(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn triangle(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn quad(
        &mut self,
        g: &mut dyn Primitives,
        _: f32,
        _: f32,
        _: f32,
        _: f32,
        _: f32,
        _: f32,
        _: f32,
        _: f32,
    ) {
        Self::scribble(g);
    }
    fn cube(&mut self, g: &mut dyn Primitives, _: f32) {
        Self::scribble(g);
    }
    fn box3(&mut self, g: &mut dyn Primitives, _: f32, _: f32, _: f32) {
        Self::scribble(g);
    }
    fn shape(&mut self, g: &mut dyn Primitives, _: &ShapeRecord) -> HandyResult<()> {
        Self::scribble(g);
        Ok(())
    }
}

fn alpha(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
    pixmap.pixel(x, y).map_or(0, |p| p.alpha())
}

fn is_blank(pixmap: &Pixmap) -> bool {
    pixmap.pixels().iter().all(|p| p.alpha() == 0)
}

#[test]
fn test_ellipse_goes_through_engine_once() {
    let mut sketch = Sketch::new(200, 200).unwrap();
    let recorder = Recorder::default();
    let calls = recorder.calls.clone();
    let mut handy = HandyDraw::new(&sketch, recorder).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    assert_eq!(sketch.graphics().kind(), SurfaceKind::Sketchy);
    assert!(!sketch.graphics().is_native());
    sketch.graphics().ellipse(100.0, 100.0, 50.0, 50.0);
    assert!(!sketch.graphics().is_native());
    handy.stop_handy(&mut sketch).unwrap();

    let calls = calls.borrow();
    assert_eq!(
        *calls,
        vec![Call {
            name: "ellipse",
            args: vec![100.0, 100.0, 50.0, 50.0],
            native: true,
        }]
    );

    let buffer = handy.buffer().unwrap();
    assert!(!is_blank(buffer.pixmap()));
    let result = sketch.graphics_ref().snapshot();
    assert_eq!(alpha(&result, 100, 100), 255);
    assert_eq!(alpha(&result, 10, 10), 0);
}

#[test]
fn test_shape_reaches_engine_as_one_record() {
    let mut sketch = Sketch::new(100, 100).unwrap();
    let recorder = Recorder::default();
    let calls = recorder.calls.clone();
    let shapes = recorder.shapes.clone();
    let mut handy = HandyDraw::new(&sketch, recorder).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    let g = sketch.graphics();
    g.begin_shape().unwrap();
    g.vertex(10.0, 10.0).unwrap();
    g.vertex(90.0, 10.0).unwrap();
    g.vertex(50.0, 80.0).unwrap();
    assert!(calls.borrow().is_empty());
    g.end_shape().unwrap();
    handy.stop_handy(&mut sketch).unwrap();

    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(
        *shapes.borrow(),
        vec![ShapeRecord {
            kind: ShapeKind::Polygon,
            vertices: vec![
                Vertex::new(10.0, 10.0),
                Vertex::new(90.0, 10.0),
                Vertex::new(50.0, 80.0),
            ],
            end: EndMode::Open,
        }]
    );
    assert_eq!(alpha(&sketch.graphics_ref().snapshot(), 50, 30), 255);
}

#[test]
fn test_shape_end_mode_and_3d_vertices_are_kept() {
    let mut sketch = Sketch::new(50, 50).unwrap();
    let recorder = Recorder::default();
    let shapes = recorder.shapes.clone();
    let mut handy = HandyDraw::new(&sketch, recorder).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    let g = sketch.graphics();
    g.begin_shape_with(ShapeKind::TriangleFan).unwrap();
    g.vertex3(1.0, 2.0, 3.0).unwrap();
    g.curve_vertex(4.0, 5.0).unwrap();
    g.curve_vertex3(6.0, 7.0, 8.0).unwrap();
    g.end_shape_with(EndMode::Close).unwrap();
    handy.stop_handy(&mut sketch).unwrap();

    let shapes = shapes.borrow();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].kind, ShapeKind::TriangleFan);
    assert_eq!(shapes[0].end, EndMode::Close);
    assert_eq!(
        shapes[0].vertices,
        vec![
            Vertex::new(1.0, 2.0).with_z(3.0),
            Vertex::curve(4.0, 5.0),
            Vertex::curve(6.0, 7.0).with_z(8.0),
        ]
    );
}

#[test]
fn test_degenerate_ellipse_calls_engine_but_draws_nothing() {
    let mut sketch = Sketch::new(100, 100).unwrap();
    let recorder = Recorder::default();
    let calls = recorder.calls.clone();
    let mut handy = HandyDraw::new(&sketch, recorder).unwrap();
    let before = sketch.graphics_ref().snapshot();

    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().ellipse(50.0, 50.0, 0.0, 0.1);
    handy.stop_handy(&mut sketch).unwrap();

    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(calls.borrow()[0].name, "ellipse");
    assert!(is_blank(handy.buffer().unwrap().pixmap()));
    assert_eq!(sketch.graphics_ref().snapshot().data(), before.data());
}

#[test]
fn test_empty_session_leaves_sketch_untouched() {
    let mut sketch = Sketch::new(60, 60).unwrap();
    sketch.graphics().background(Color::from_rgb8(200, 100, 50));
    sketch.graphics().rect(10.0, 10.0, 20.0, 20.0);
    let before = sketch.graphics_ref().snapshot();

    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();
    handy.start_handy(&mut sketch).unwrap();
    handy.stop_handy(&mut sketch).unwrap();

    assert!(is_blank(handy.buffer().unwrap().pixmap()));
    assert_eq!(sketch.graphics_ref().snapshot().data(), before.data());
}

#[test]
fn test_style_and_matrix_survive_engine_drawing() {
    let mut sketch = Sketch::new(100, 100).unwrap();
    {
        let g = sketch.graphics();
        g.fill(Color::from_rgb8(255, 0, 0));
        g.stroke_weight(3.0);
        g.translate(5.0, 7.0);
        g.rotate(0.25);
    }
    let style = sketch.graphics_ref().style().clone();
    let matrix = sketch.graphics_ref().matrix();

    let mut handy = HandyDraw::new(&sketch, Scribbler).unwrap();
    handy.start_handy(&mut sketch).unwrap();
    assert_eq!(sketch.graphics_ref().style(), &style);
    assert_eq!(sketch.graphics_ref().matrix(), matrix);
    sketch.graphics().point(1.0, 1.0);
    sketch.graphics().rect(10.0, 10.0, 20.0, 20.0);
    handy.stop_handy(&mut sketch).unwrap();

    assert_eq!(sketch.graphics_ref().style(), &style);
    assert_eq!(sketch.graphics_ref().matrix(), matrix);
}

#[test]
fn test_client_changes_during_session_are_carried_back() {
    let mut sketch = Sketch::new(40, 40).unwrap();
    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().stroke(Color::from_rgb8(0, 0, 255));
    sketch.graphics().translate(10.0, 0.0);
    let style = sketch.graphics_ref().style().clone();
    handy.stop_handy(&mut sketch).unwrap();

    assert_eq!(sketch.graphics_ref().style(), &style);
    assert_eq!(sketch.graphics_ref().matrix(), Affine::translate((10.0, 0.0)));
}

#[test]
fn test_session_inherits_transform_but_composites_untransformed() {
    let mut sketch = Sketch::new(100, 100).unwrap();
    sketch.graphics().translate(50.0, 50.0);
    sketch.graphics().no_stroke();

    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();
    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().ellipse(0.0, 0.0, 20.0, 20.0);
    handy.stop_handy(&mut sketch).unwrap();

    let result = sketch.graphics_ref().snapshot();
    assert_eq!(alpha(&result, 50, 50), 255);
    assert_eq!(alpha(&result, 0, 0), 0);
    assert_eq!(alpha(&result, 99, 99), 0);
}

#[test]
fn test_tint_is_ignored_while_compositing() {
    let mut sketch = Sketch::new(40, 40).unwrap();
    let tint = Color::from_rgba8(0, 0, 0, 0);
    sketch.graphics().tint(tint);
    sketch.graphics().no_stroke();

    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();
    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().rect(0.0, 0.0, 20.0, 20.0);
    handy.stop_handy(&mut sketch).unwrap();

    assert_eq!(alpha(&sketch.graphics_ref().snapshot(), 10, 10), 255);
    assert!(sketch.graphics_ref().style().tint.is_some());
}

#[test]
fn test_buffer_is_cleared_between_sessions() {
    let mut sketch = Sketch::new(40, 40).unwrap();
    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().rect(0.0, 0.0, 20.0, 20.0);
    handy.stop_handy(&mut sketch).unwrap();
    assert!(!is_blank(handy.buffer().unwrap().pixmap()));

    handy.start_handy(&mut sketch).unwrap();
    handy.stop_handy(&mut sketch).unwrap();
    assert!(is_blank(handy.buffer().unwrap().pixmap()));
}

#[test]
fn test_buffer_follows_sketch_size() {
    let mut sketch = Sketch::new(30, 30).unwrap();
    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();
    assert_eq!(handy.buffer().unwrap().size(), (30, 30));

    sketch.resize(64, 48).unwrap();
    handy.start_handy(&mut sketch).unwrap();
    assert_eq!(sketch.graphics_ref().size(), (64, 48));
    sketch.graphics().rect(50.0, 40.0, 10.0, 5.0);
    handy.stop_handy(&mut sketch).unwrap();

    assert_eq!(handy.buffer().unwrap().size(), (64, 48));
    assert_eq!(alpha(&sketch.graphics_ref().snapshot(), 55, 42), 255);
}

#[test]
fn test_guard_is_clear_after_stop() {
    let mut sketch = Sketch::new(20, 20).unwrap();
    let mut handy = HandyDraw::new(&sketch, Scribbler).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().line(0.0, 0.0, 10.0, 10.0);
    handy.stop_handy(&mut sketch).unwrap();

    let surface = handy.surface().unwrap();
    assert!(!surface.is_guarded());
    assert!(surface.engine().is_some());
}

#[test]
fn test_smooth_setting_is_propagated() {
    let mut sketch = Sketch::new(20, 20).unwrap();
    sketch.graphics().set_smooth(false);
    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    assert!(!sketch.graphics_ref().is_smooth());
    handy.stop_handy(&mut sketch).unwrap();
}

#[test]
fn test_misuse_is_reported() {
    let mut sketch = Sketch::new(20, 20).unwrap();
    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();

    assert!(matches!(handy.stop_handy(&mut sketch), Err(HandyError::NoSession)));
    handy.start_handy(&mut sketch).unwrap();
    assert!(matches!(handy.start_handy(&mut sketch), Err(HandyError::SessionActive)));
    assert!(handy.surface().is_none());
    handy.stop_handy(&mut sketch).unwrap();
    assert!(matches!(handy.stop_handy(&mut sketch), Err(HandyError::NoSession)));
}

/// A host surface from a backend other than the raster canvas.
struct ForeignSurface(Canvas);

impl Primitives for ForeignSurface {
    fn is_native(&self) -> bool {
        true
    }
    fn point(&mut self, x: f32, y: f32) {
        self.0.point(x, y);
    }
    fn point3(&mut self, x: f32, y: f32, z: f32) {
        self.0.point3(x, y, z);
    }
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.0.line(x1, y1, x2, y2);
    }
    fn line3(&mut self, x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) {
        self.0.line3(x1, y1, z1, x2, y2, z2);
    }
    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.0.ellipse(x, y, w, h);
    }
    fn arc(&mut self, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32) {
        self.0.arc(x, y, w, h, start, stop);
    }
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.0.rect(x, y, w, h);
    }
    fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.0.triangle(x1, y1, x2, y2, x3, y3);
    }
    fn quad(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, x4: f32, y4: f32) {
        self.0.quad(x1, y1, x2, y2, x3, y3, x4, y4);
    }
    fn cube(&mut self, size: f32) {
        self.0.cube(size);
    }
    fn box3(&mut self, w: f32, h: f32, d: f32) {
        self.0.box3(w, h, d);
    }
    fn begin_shape_with(&mut self, kind: ShapeKind) -> HandyResult<()> {
        self.0.begin_shape_with(kind)
    }
    fn vertex(&mut self, x: f32, y: f32) -> HandyResult<()> {
        self.0.vertex(x, y)
    }
    fn vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()> {
        self.0.vertex3(x, y, z)
    }
    fn curve_vertex(&mut self, x: f32, y: f32) -> HandyResult<()> {
        self.0.curve_vertex(x, y)
    }
    fn curve_vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()> {
        self.0.curve_vertex3(x, y, z)
    }
    fn end_shape_with(&mut self, mode: EndMode) -> HandyResult<()> {
        self.0.end_shape_with(mode)
    }
}

impl Surface for ForeignSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Other("foreign")
    }
    fn size(&self) -> (u32, u32) {
        self.0.size()
    }
    fn resize(&mut self, width: u32, height: u32) -> HandyResult<()> {
        self.0.resize(width, height)
    }
    fn begin_draw(&mut self) {
        self.0.begin_draw();
    }
    fn end_draw(&mut self) {
        self.0.end_draw();
    }
    fn style(&self) -> &Style {
        self.0.style()
    }
    fn style_mut(&mut self) -> &mut Style {
        self.0.style_mut()
    }
    fn matrix(&self) -> Affine {
        self.0.matrix()
    }
    fn set_matrix(&mut self, matrix: Affine) {
        self.0.set_matrix(matrix);
    }
    fn push_matrix(&mut self) {
        self.0.push_matrix();
    }
    fn pop_matrix(&mut self) {
        self.0.pop_matrix();
    }
    fn push_style(&mut self) {
        self.0.push_style();
    }
    fn pop_style(&mut self) {
        self.0.pop_style();
    }
    fn is_smooth(&self) -> bool {
        self.0.is_smooth()
    }
    fn set_smooth(&mut self, smooth: bool) {
        self.0.set_smooth(smooth);
    }
    fn background(&mut self, color: Color) {
        self.0.background(color);
    }
    fn image(&mut self, image: &Pixmap, x: f32, y: f32) {
        self.0.image(image, x, y);
    }
    fn snapshot(&self) -> Pixmap {
        self.0.snapshot()
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
        self
    }
}

#[test]
fn test_session_continues_over_foreign_backend() {
    let foreign = ForeignSurface(Canvas::new(50, 50).unwrap());
    let mut sketch = Sketch::with_graphics(Box::new(foreign));
    let mut handy = HandyDraw::new(&sketch, PlainEngine).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    assert!(handy.is_active());
    assert_eq!(sketch.graphics_ref().kind(), SurfaceKind::Sketchy);
    sketch.graphics().no_stroke();
    sketch.graphics().rect(10.0, 10.0, 20.0, 20.0);
    handy.stop_handy(&mut sketch).unwrap();

    assert_eq!(sketch.graphics_ref().kind(), SurfaceKind::Other("foreign"));
    let result = sketch.graphics_ref().snapshot();
    assert_eq!(alpha(&result, 20, 20), 255);
    assert_eq!(alpha(&result, 5, 5), 0);
}

#[test]
fn test_two_controllers_on_one_sketch() {
    let mut sketch = Sketch::new(40, 40).unwrap();
    let mut a = HandyDraw::new(&sketch, PlainEngine).unwrap();
    let mut b = HandyDraw::new(&sketch, PlainEngine).unwrap();

    a.start_handy(&mut sketch).unwrap();
    assert!(matches!(b.start_handy(&mut sketch), Err(HandyError::SessionActive)));
    sketch.graphics().rect(0.0, 0.0, 10.0, 10.0);
    a.stop_handy(&mut sketch).unwrap();
    assert!(matches!(b.stop_handy(&mut sketch), Err(HandyError::NoSession)));

    assert_eq!(sketch.graphics_ref().kind(), SurfaceKind::Raster);
    assert!(!is_blank(a.buffer().unwrap().pixmap()));
    assert!(is_blank(b.buffer().unwrap().pixmap()));

    b.start_handy(&mut sketch).unwrap();
    b.stop_handy(&mut sketch).unwrap();
    assert!(!a.is_active() && !b.is_active());
}

#[test]
fn test_unfinished_shape_is_dropped_at_stop() {
    let mut sketch = Sketch::new(40, 40).unwrap();
    let recorder = Recorder::default();
    let shapes = recorder.shapes.clone();
    let mut handy = HandyDraw::new(&sketch, recorder).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().begin_shape().unwrap();
    sketch.graphics().vertex(1.0, 1.0).unwrap();
    handy.stop_handy(&mut sketch).unwrap();

    handy.start_handy(&mut sketch).unwrap();
    sketch.graphics().begin_shape_with(ShapeKind::Lines).unwrap();
    sketch.graphics().vertex(0.0, 5.0).unwrap();
    sketch.graphics().vertex(40.0, 5.0).unwrap();
    sketch.graphics().end_shape().unwrap();
    handy.stop_handy(&mut sketch).unwrap();

    let shapes = shapes.borrow();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].kind, ShapeKind::Lines);
    assert_eq!(shapes[0].vertices, vec![Vertex::new(0.0, 5.0), Vertex::new(40.0, 5.0)]);
}
