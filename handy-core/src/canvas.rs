//! CPU raster canvas.
//!
//! [Canvas] is the native backend: every primitive is turned into a `kurbo`
//! path and rasterized with `tiny-skia` into an RGBA pixmap. It is both the
//! host's visible surface and the off-screen buffer of a sketchy session.

use std::path::Path;

use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};
use vello::kurbo::{Affine, Arc, BezPath, Circle, Ellipse, PathEl, Point, Rect, Shape, Vec2};
use vello::peniko::Color;

use crate::error::{HandyError, HandyResult};
use crate::primitives::Primitives;
use crate::shape::{EndMode, ShapeBuilder, ShapeKind, ShapeRecord, Vertex};
use crate::style::{rgba8, StrokeCap, StrokeJoin, Style};
use crate::surface::{Surface, SurfaceKind};

/// Flattening tolerance used when converting curves to paths.
const TOLERANCE: f64 = 0.1;

/// A raster drawing surface backed by a `tiny-skia` pixmap.
pub struct Canvas {
    pixmap: Pixmap,
    style: Style,
    matrix: Affine,
    matrix_stack: Vec<Affine>,
    style_stack: Vec<Style>,
    smooth: bool,
    drawing: bool,
    shape: ShapeBuilder,
}

impl Canvas {
    /// Create a transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> HandyResult<Self> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            style: Style::default(),
            matrix: Affine::IDENTITY,
            matrix_stack: Vec::new(),
            style_stack: Vec::new(),
            smooth: true,
            drawing: false,
            shape: ShapeBuilder::new(),
        })
    }

    /// Whether a drawing pass is in progress.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Drop a shape opened with `begin_shape` but never ended. Returns
    /// whether one was open.
    pub fn discard_shape(&mut self) -> bool {
        self.shape.discard()
    }

    /// Borrow the underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Copy the pixels into an `image` buffer with straight alpha.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.pixmap.width(), self.pixmap.height(), |x, y| {
            match self.pixmap.pixel(x, y) {
                Some(pixel) => {
                    let c = pixel.demultiply();
                    image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
                },
                None => image::Rgba([0, 0, 0, 0]),
            }
        })
    }

    /// Write the pixels to an image file. The format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> HandyResult<()> {
        self.to_rgba_image().save(path.as_ref())?;
        Ok(())
    }

    fn transform(&self) -> Transform {
        let [a, b, c, d, e, f] = self.matrix.as_coeffs();
        Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let [r, g, b, a] = rgba8(color);
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = self.smooth;
        paint
    }

    fn line_style(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.style.stroke_weight,
            line_cap: match self.style.stroke_cap {
                StrokeCap::Round => LineCap::Round,
                StrokeCap::Square => LineCap::Butt,
                StrokeCap::Project => LineCap::Square,
            },
            line_join: match self.style.stroke_join {
                StrokeJoin::Miter => LineJoin::Miter,
                StrokeJoin::Bevel => LineJoin::Bevel,
                StrokeJoin::Round => LineJoin::Round,
            },
            ..Default::default()
        }
    }

    fn fill_elements(&mut self, elements: impl IntoIterator<Item = PathEl>) {
        let Some(color) = self.style.fill else { return };
        let Some(path) = to_skia_path(elements) else { return };
        let paint = self.paint(color);
        let transform = self.transform();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    fn stroke_elements(&mut self, elements: impl IntoIterator<Item = PathEl>) {
        let Some(color) = self.style.stroke else { return };
        let Some(path) = to_skia_path(elements) else { return };
        let paint = self.paint(color);
        let stroke = self.line_style();
        let transform = self.transform();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, transform, None);
    }

    fn draw_shape(&mut self, shape: &impl Shape) {
        self.fill_elements(shape.path_elements(TOLERANCE));
        self.stroke_elements(shape.path_elements(TOLERANCE));
    }

    fn polygon(&mut self, points: &[Point]) {
        let mut path = BezPath::new();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                path.move_to(*p);
            } else {
                path.line_to(*p);
            }
        }
        path.close_path();
        self.draw_shape(&path);
    }

    fn draw_record(&mut self, record: &ShapeRecord) {
        let v = &record.vertices;
        let p = |i: usize| point(v[i].x, v[i].y);
        match record.kind {
            ShapeKind::Polygon => {
                let path = outline(v, record.end == EndMode::Close);
                self.fill_elements(path.iter());
                self.stroke_elements(path.iter());
            },
            ShapeKind::Points => {
                for vertex in v {
                    self.point(vertex.x, vertex.y);
                }
            },
            ShapeKind::Lines => {
                for pair in v.chunks_exact(2) {
                    self.line(pair[0].x, pair[0].y, pair[1].x, pair[1].y);
                }
            },
            ShapeKind::Triangles => {
                for i in (0..v.len() / 3).map(|t| t * 3) {
                    self.polygon(&[p(i), p(i + 1), p(i + 2)]);
                }
            },
            ShapeKind::TriangleFan => {
                for i in 1..v.len().saturating_sub(1) {
                    self.polygon(&[p(0), p(i), p(i + 1)]);
                }
            },
            ShapeKind::TriangleStrip => {
                for i in 0..v.len().saturating_sub(2) {
                    self.polygon(&[p(i), p(i + 1), p(i + 2)]);
                }
            },
            ShapeKind::Quads => {
                for i in (0..v.len() / 4).map(|q| q * 4) {
                    self.polygon(&[p(i), p(i + 1), p(i + 2), p(i + 3)]);
                }
            },
            ShapeKind::QuadStrip => {
                for i in (0..v.len().saturating_sub(3)).step_by(2) {
                    self.polygon(&[p(i), p(i + 1), p(i + 3), p(i + 2)]);
                }
            },
        }
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("style", &self.style)
            .field("matrix", &self.matrix)
            .field("smooth", &self.smooth)
            .field("drawing", &self.drawing)
            .finish()
    }
}

fn allocate(width: u32, height: u32) -> HandyResult<Pixmap> {
    Pixmap::new(width.max(1), height.max(1)).ok_or(HandyError::InvalidSize { width, height })
}

fn point(x: f32, y: f32) -> Point {
    Point::new(x as f64, y as f64)
}

fn to_skia_path(elements: impl IntoIterator<Item = PathEl>) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in elements {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Build the outline of a polygon shape. Runs of curve vertices become
/// Catmull-Rom splines whose first and last vertices act as control points.
fn outline(vertices: &[Vertex], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut i = 0;
    while i < vertices.len() {
        if vertices[i].curve {
            let end = vertices[i..]
                .iter()
                .position(|v| !v.curve)
                .map_or(vertices.len(), |n| i + n);
            curve_run(&mut path, &vertices[i..end]);
            i = end;
        } else {
            extend(&mut path, point(vertices[i].x, vertices[i].y));
            i += 1;
        }
    }
    if close && !path.elements().is_empty() {
        path.close_path();
    }
    path
}

fn extend(path: &mut BezPath, p: Point) {
    if path.elements().is_empty() {
        path.move_to(p);
    } else {
        path.line_to(p);
    }
}

fn curve_run(path: &mut BezPath, run: &[Vertex]) {
    // A spline segment needs a control vertex on each side.
    if run.len() < 4 {
        return;
    }
    let p: Vec<Point> = run.iter().map(|v| point(v.x, v.y)).collect();
    extend(path, p[1]);
    for i in 1..p.len() - 2 {
        let c1 = p[i] + (p[i + 1] - p[i - 1]) / 6.0;
        let c2 = p[i + 1] - (p[i + 2] - p[i]) / 6.0;
        path.curve_to(c1, c2, p[i + 1]);
    }
}

impl Primitives for Canvas {
    fn is_native(&self) -> bool {
        true
    }

    fn point(&mut self, x: f32, y: f32) {
        let Some(color) = self.style.stroke else { return };
        let radius = self.style.stroke_weight as f64 / 2.0;
        let center = point(x, y);
        let dot = match self.style.stroke_cap {
            StrokeCap::Round => to_skia_path(Circle::new(center, radius).path_elements(TOLERANCE)),
            StrokeCap::Square | StrokeCap::Project => {
                to_skia_path(Rect::from_center_size(center, (radius * 2.0, radius * 2.0)).path_elements(TOLERANCE))
            },
        };
        let Some(dot) = dot else { return };
        let paint = self.paint(color);
        let transform = self.transform();
        self.pixmap
            .fill_path(&dot, &paint, FillRule::Winding, transform, None);
    }

    fn point3(&mut self, x: f32, y: f32, _z: f32) {
        self.point(x, y);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.stroke_elements([
            PathEl::MoveTo(point(x1, y1)),
            PathEl::LineTo(point(x2, y2)),
        ]);
    }

    fn line3(&mut self, x1: f32, y1: f32, _z1: f32, x2: f32, y2: f32, _z2: f32) {
        self.line(x1, y1, x2, y2);
    }

    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let bounds = self.style.ellipse_mode.resolve(x, y, w, h);
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        self.draw_shape(&Ellipse::from_rect(bounds));
    }

    fn arc(&mut self, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32) {
        let bounds = self.style.ellipse_mode.resolve(x, y, w, h);
        let sweep = (stop - start) as f64;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 || !(sweep > 0.0) {
            return;
        }
        let arc = Arc {
            center: bounds.center(),
            radii: Vec2::new(bounds.width() / 2.0, bounds.height() / 2.0),
            start_angle: start as f64,
            sweep_angle: sweep.min(std::f64::consts::TAU),
            x_rotation: 0.0,
        };

        // Filled as a pie wedge, stroked as the open curve.
        let wedge = std::iter::once(PathEl::MoveTo(arc.center))
            .chain(arc.path_elements(TOLERANCE).map(|el| match el {
                PathEl::MoveTo(p) => PathEl::LineTo(p),
                el => el,
            }))
            .chain(std::iter::once(PathEl::ClosePath));
        self.fill_elements(wedge);
        self.stroke_elements(arc.path_elements(TOLERANCE));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let bounds = self.style.rect_mode.resolve(x, y, w, h);
        self.draw_shape(&bounds);
    }

    fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.polygon(&[point(x1, y1), point(x2, y2), point(x3, y3)]);
    }

    fn quad(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, x4: f32, y4: f32) {
        self.polygon(&[point(x1, y1), point(x2, y2), point(x3, y3), point(x4, y4)]);
    }

    fn cube(&mut self, size: f32) {
        self.box3(size, size, size);
    }

    // Orthographic view down the z axis: only the front face is visible.
    fn box3(&mut self, w: f32, h: f32, _d: f32) {
        let face = Rect::from_center_size(Point::ORIGIN, (w.abs() as f64, h.abs() as f64));
        self.draw_shape(&face);
    }

    fn begin_shape_with(&mut self, kind: ShapeKind) -> HandyResult<()> {
        self.shape.begin(kind)
    }

    fn vertex(&mut self, x: f32, y: f32) -> HandyResult<()> {
        self.shape.push(Vertex::new(x, y))
    }

    fn vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()> {
        self.shape.push(Vertex::new(x, y).with_z(z))
    }

    fn curve_vertex(&mut self, x: f32, y: f32) -> HandyResult<()> {
        self.shape.push(Vertex::curve(x, y))
    }

    fn curve_vertex3(&mut self, x: f32, y: f32, z: f32) -> HandyResult<()> {
        self.shape.push(Vertex::curve(x, y).with_z(z))
    }

    fn end_shape_with(&mut self, mode: EndMode) -> HandyResult<()> {
        let record = self.shape.finish(mode)?;
        self.draw_record(&record);
        Ok(())
    }
}

impl Surface for Canvas {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Raster
    }

    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn resize(&mut self, width: u32, height: u32) -> HandyResult<()> {
        self.pixmap = allocate(width, height)?;
        log::debug!("Canvas resized to {}x{}", width, height);
        Ok(())
    }

    fn begin_draw(&mut self) {
        self.drawing = true;
        self.matrix = Affine::IDENTITY;
    }

    fn end_draw(&mut self) {
        self.drawing = false;
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn matrix(&self) -> Affine {
        self.matrix
    }

    fn set_matrix(&mut self, matrix: Affine) {
        self.matrix = matrix;
    }

    fn push_matrix(&mut self) {
        self.matrix_stack.push(self.matrix);
    }

    fn pop_matrix(&mut self) {
        match self.matrix_stack.pop() {
            Some(matrix) => self.matrix = matrix,
            None => log::warn!("pop_matrix() called more often than push_matrix()"),
        }
    }

    fn push_style(&mut self) {
        self.style_stack.push(self.style.clone());
    }

    fn pop_style(&mut self) {
        match self.style_stack.pop() {
            Some(style) => self.style = style,
            None => log::warn!("pop_style() called more often than push_style()"),
        }
    }

    fn is_smooth(&self) -> bool {
        self.smooth
    }

    fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
    }

    fn background(&mut self, color: Color) {
        let [r, g, b, a] = rgba8(color);
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    fn image(&mut self, image: &Pixmap, x: f32, y: f32) {
        let transform = self.transform().pre_translate(x, y);
        let paint = PixmapPaint::default();
        match self.style.tint {
            Some(tint) => {
                let tinted = tinted(image, tint);
                self.pixmap
                    .draw_pixmap(0, 0, tinted.as_ref(), &paint, transform, None);
            },
            None => {
                self.pixmap
                    .draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
            },
        }
    }

    fn snapshot(&self) -> Pixmap {
        self.pixmap.clone()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
        self
    }
}

/// Multiply premultiplied pixels by a straight-alpha tint color.
fn tinted(image: &Pixmap, tint: Color) -> Pixmap {
    let [tr, tg, tb, ta] = rgba8(tint).map(u32::from);
    let mut out = image.clone();
    for px in out.data_mut().chunks_exact_mut(4) {
        px[0] = (px[0] as u32 * tr * ta / (255 * 255)) as u8;
        px[1] = (px[1] as u32 * tg * ta / (255 * 255)) as u8;
        px[2] = (px[2] as u32 * tb * ta / (255 * 255)) as u8;
        px[3] = (px[3] as u32 * ta / 255) as u8;
    }
    out
}
