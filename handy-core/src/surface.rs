//! The host drawing surface capability set.

use std::any::Any;

use tiny_skia::Pixmap;
use vello::kurbo::Affine;
use vello::peniko::Color;

use crate::error::HandyResult;
use crate::primitives::Primitives;
use crate::style::{CoordMode, StrokeCap, StrokeJoin, Style};

/// The backend behind a [Surface].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// The CPU raster canvas.
    Raster,
    /// A sketchy surface drawing into its own buffer.
    Sketchy,
    /// Any other backend. Sketchy sessions over these are unsupported.
    Other(&'static str),
}

/// A drawable surface with style, transform and pixel state.
///
/// Besides the [Primitives], a surface exposes everything a sketchy session
/// needs to mirror its state onto an off-screen buffer and to composite that
/// buffer back.
pub trait Surface: Primitives + Any {
    /// The backend type of this surface.
    fn kind(&self) -> SurfaceKind;

    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the pixel buffer, discarding its contents.
    fn resize(&mut self, width: u32, height: u32) -> HandyResult<()>;

    /// Start a drawing pass. Resets the transform matrix.
    fn begin_draw(&mut self);

    /// Finish a drawing pass.
    fn end_draw(&mut self);

    /// The current style.
    fn style(&self) -> &Style;

    /// Mutable access to the current style.
    fn style_mut(&mut self) -> &mut Style;

    /// The current transform matrix.
    fn matrix(&self) -> Affine;

    /// Replace the current transform matrix.
    fn set_matrix(&mut self, matrix: Affine);

    /// Save the transform matrix.
    fn push_matrix(&mut self);

    /// Restore the most recently saved transform matrix.
    fn pop_matrix(&mut self);

    /// Save the style.
    fn push_style(&mut self);

    /// Restore the most recently saved style.
    fn pop_style(&mut self);

    /// Whether shapes are anti-aliased.
    fn is_smooth(&self) -> bool;

    /// Turn anti-aliasing on or off.
    fn set_smooth(&mut self, smooth: bool);

    /// Replace every pixel with the given color.
    fn background(&mut self, color: Color);

    /// Draw an image with its top-left corner at `(x, y)`, multiplied by the current tint.
    fn image(&mut self, image: &Pixmap, x: f32, y: f32);

    /// Copy of the current pixels.
    fn snapshot(&self) -> Pixmap;

    /// Borrow this surface as [Any] so its concrete type can be checked.
    fn as_any(&self) -> &dyn Any;

    /// Convert a boxed surface into [Any] so it can be downcast.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Replace the whole style.
    fn set_style(&mut self, style: &Style) {
        *self.style_mut() = style.clone();
    }

    /// Set the fill color.
    fn fill(&mut self, color: Color) {
        self.style_mut().fill = Some(color);
    }

    /// Disable filling.
    fn no_fill(&mut self) {
        self.style_mut().fill = None;
    }

    /// Set the stroke color.
    fn stroke(&mut self, color: Color) {
        self.style_mut().stroke = Some(color);
    }

    /// Disable stroking.
    fn no_stroke(&mut self) {
        self.style_mut().stroke = None;
    }

    /// Set the stroke width.
    fn stroke_weight(&mut self, weight: f32) {
        self.style_mut().stroke_weight = weight;
    }

    /// Set the line cap.
    fn stroke_cap(&mut self, cap: StrokeCap) {
        self.style_mut().stroke_cap = cap;
    }

    /// Set the line join.
    fn stroke_join(&mut self, join: StrokeJoin) {
        self.style_mut().stroke_join = join;
    }

    /// Set how `ellipse` and `arc` coordinates are interpreted.
    fn ellipse_mode(&mut self, mode: CoordMode) {
        self.style_mut().ellipse_mode = mode;
    }

    /// Set how `rect` coordinates are interpreted.
    fn rect_mode(&mut self, mode: CoordMode) {
        self.style_mut().rect_mode = mode;
    }

    /// Set the tint applied to images.
    fn tint(&mut self, color: Color) {
        self.style_mut().tint = Some(color);
    }

    /// Disable tinting.
    fn no_tint(&mut self) {
        self.style_mut().tint = None;
    }

    /// Reset the transform matrix to identity.
    fn reset_matrix(&mut self) {
        self.set_matrix(Affine::IDENTITY);
    }

    /// Translate the coordinate system.
    fn translate(&mut self, x: f32, y: f32) {
        let m = self.matrix() * Affine::translate((x as f64, y as f64));
        self.set_matrix(m);
    }

    /// Rotate the coordinate system by an angle in radians.
    fn rotate(&mut self, angle: f32) {
        let m = self.matrix() * Affine::rotate(angle as f64);
        self.set_matrix(m);
    }

    /// Scale the coordinate system.
    fn scale(&mut self, sx: f32, sy: f32) {
        let m = self.matrix() * Affine::scale_non_uniform(sx as f64, sy as f64);
        self.set_matrix(m);
    }
}
