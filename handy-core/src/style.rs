//! Drawing style state shared by every surface.
//!
//! A [Style] is the snapshot that gets copied between the host surface and the
//! sketchy buffer when a session starts and stops, so it holds everything the
//! primitives consult while drawing.

use vello::kurbo::Rect;
use vello::peniko::Color;

/// How the first four arguments of `ellipse`, `arc` and `rect` are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordMode {
    /// `(x, y)` is the centre, `(w, h)` the full size.
    #[default]
    Center,
    /// `(x, y)` is the centre, `(w, h)` the half size.
    Radius,
    /// `(x, y)` is the top-left corner, `(w, h)` the full size.
    Corner,
    /// `(x, y)` and `(w, h)` are two opposite corners.
    Corners,
}

impl CoordMode {
    /// Resolve the four coordinates into a normalized bounding box.
    pub fn resolve(self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        match self {
            CoordMode::Center => Rect::new(x - w / 2.0, y - h / 2.0, x + w / 2.0, y + h / 2.0),
            CoordMode::Radius => Rect::new(x - w, y - h, x + w, y + h),
            CoordMode::Corner => Rect::new(x, y, x + w, y + h),
            CoordMode::Corners => Rect::new(x, y, w, h),
        }
        .abs()
    }
}

/// Shape of the ends of stroked lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrokeCap {
    /// Semicircular ends.
    #[default]
    Round,
    /// Ends cut flush with the endpoints.
    Square,
    /// Square ends extended by half the stroke weight.
    Project,
}

/// Shape of the corners where stroked segments meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrokeJoin {
    /// Sharp corners.
    #[default]
    Miter,
    /// Cut-off corners.
    Bevel,
    /// Rounded corners.
    Round,
}

/// The complete drawing style of a surface.
#[derive(Clone, Debug)]
pub struct Style {
    /// Fill color, or [None] for `no_fill`.
    pub fill: Option<Color>,
    /// Stroke color, or [None] for `no_stroke`.
    pub stroke: Option<Color>,
    /// Stroke width in user units.
    pub stroke_weight: f32,
    /// Line cap.
    pub stroke_cap: StrokeCap,
    /// Line join.
    pub stroke_join: StrokeJoin,
    /// Interpretation of `ellipse` and `arc` coordinates.
    pub ellipse_mode: CoordMode,
    /// Interpretation of `rect` coordinates.
    pub rect_mode: CoordMode,
    /// Tint multiplied into blitted images, or [None] for `no_tint`.
    pub tint: Option<Color>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            stroke_weight: 1.0,
            stroke_cap: StrokeCap::Round,
            stroke_join: StrokeJoin::Miter,
            ellipse_mode: CoordMode::Center,
            rect_mode: CoordMode::Corner,
            tint: None,
        }
    }
}

// Colors are compared bit for bit so that a style round trip through a
// session can be checked exactly.
impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        same_color(self.fill, other.fill)
            && same_color(self.stroke, other.stroke)
            && self.stroke_weight.to_bits() == other.stroke_weight.to_bits()
            && self.stroke_cap == other.stroke_cap
            && self.stroke_join == other.stroke_join
            && self.ellipse_mode == other.ellipse_mode
            && self.rect_mode == other.rect_mode
            && same_color(self.tint, other.tint)
    }
}

fn same_color(a: Option<Color>, b: Option<Color>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.components.map(f32::to_bits) == b.components.map(f32::to_bits),
        (None, None) => true,
        _ => false,
    }
}

/// Quantize a color to 8-bit straight RGBA.
pub fn rgba8(color: Color) -> [u8; 4] {
    color
        .components
        .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
