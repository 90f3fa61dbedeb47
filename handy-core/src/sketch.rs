//! The host application state a sketchy session attaches to.

use crate::canvas::Canvas;
use crate::error::HandyResult;
use crate::surface::Surface;

/// A drawing application with a single active surface.
///
/// All drawing goes through [graphics](Self::graphics). A sketchy session
/// temporarily swaps that surface out, so code that draws through the sketch
/// picks up sketchy rendering without any changes.
pub struct Sketch {
    width: u32,
    height: u32,
    graphics: Box<dyn Surface>,
}

impl Sketch {
    /// Create a sketch backed by a raster [Canvas].
    pub fn new(width: u32, height: u32) -> HandyResult<Self> {
        Ok(Self::with_graphics(Box::new(Canvas::new(width, height)?)))
    }

    /// Create a sketch drawing on the given surface. The sketch takes its
    /// size from the surface.
    pub fn with_graphics(graphics: Box<dyn Surface>) -> Self {
        let (width, height) = graphics.size();
        Self {
            width,
            height,
            graphics,
        }
    }

    /// Current width and height.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Current width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the sketch size and resize the active surface to match.
    pub fn resize(&mut self, width: u32, height: u32) -> HandyResult<()> {
        self.graphics.resize(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// The active surface.
    pub fn graphics(&mut self) -> &mut dyn Surface {
        self.graphics.as_mut()
    }

    /// The active surface, read-only.
    pub fn graphics_ref(&self) -> &dyn Surface {
        self.graphics.as_ref()
    }

    /// Install a new active surface and return the old one.
    pub fn replace_graphics(&mut self, graphics: Box<dyn Surface>) -> Box<dyn Surface> {
        std::mem::replace(&mut self.graphics, graphics)
    }
}

impl std::fmt::Debug for Sketch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketch")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("graphics", &self.graphics.kind())
            .finish()
    }
}
