//! The `begin_shape` / `vertex` / `end_shape` protocol.
//!
//! [ShapeBuilder] is an explicit state machine: it is either idle or building
//! one shape. Opening a second shape, or adding vertices and ending a shape
//! while idle, is reported as an error instead of being silently ignored.

use crate::error::{HandyError, HandyResult};
use crate::primitives::Primitives;

/// How the vertices of a shape are assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// One outline through every vertex.
    #[default]
    Polygon,
    /// Each vertex is a point.
    Points,
    /// Every two vertices form a line.
    Lines,
    /// Every three vertices form a triangle.
    Triangles,
    /// Triangles sharing the first vertex.
    TriangleFan,
    /// Each vertex forms a triangle with the two before it.
    TriangleStrip,
    /// Every four vertices form a quad.
    Quads,
    /// Each pair of vertices forms a quad with the pair before it.
    QuadStrip,
}

/// Whether `end_shape` closes the outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EndMode {
    /// Leave the outline open.
    #[default]
    Open,
    /// Connect the last vertex back to the first.
    Close,
}

/// A single vertex of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate, for vertices added through the 3D variants.
    pub z: Option<f32>,
    /// Whether this is a Catmull-Rom curve vertex.
    pub curve: bool,
}

impl Vertex {
    /// A straight 2D vertex.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            curve: false,
        }
    }

    /// A 2D curve vertex.
    pub fn curve(x: f32, y: f32) -> Self {
        Self {
            curve: true,
            ..Self::new(x, y)
        }
    }

    /// The same vertex with a z coordinate.
    pub fn with_z(self, z: f32) -> Self {
        Self { z: Some(z), ..self }
    }
}

/// A finished shape: everything between one `begin_shape` and its `end_shape`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeRecord {
    /// The mode passed to `begin_shape`.
    pub kind: ShapeKind,
    /// Vertices in the order they were issued.
    pub vertices: Vec<Vertex>,
    /// The mode passed to `end_shape`.
    pub end: EndMode,
}

impl ShapeRecord {
    /// Issue this shape again, vertex by vertex, onto another surface.
    pub fn replay(&self, g: &mut dyn Primitives) -> HandyResult<()> {
        g.begin_shape_with(self.kind)?;
        for v in &self.vertices {
            match (v.curve, v.z) {
                (false, None) => g.vertex(v.x, v.y)?,
                (false, Some(z)) => g.vertex3(v.x, v.y, z)?,
                (true, None) => g.curve_vertex(v.x, v.y)?,
                (true, Some(z)) => g.curve_vertex3(v.x, v.y, z)?,
            }
        }
        g.end_shape_with(self.end)
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Building {
        kind: ShapeKind,
        vertices: Vec<Vertex>,
    },
}

/// Collects vertices between `begin_shape` and `end_shape`.
#[derive(Debug, Default)]
pub struct ShapeBuilder {
    state: State,
}

impl ShapeBuilder {
    /// Create an idle builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a shape is currently open.
    pub fn is_building(&self) -> bool {
        matches!(self.state, State::Building { .. })
    }

    /// Open a new shape.
    pub fn begin(&mut self, kind: ShapeKind) -> HandyResult<()> {
        if self.is_building() {
            return Err(HandyError::ShapeAlreadyOpen);
        }
        self.state = State::Building {
            kind,
            vertices: Vec::new(),
        };
        Ok(())
    }

    /// Append a vertex to the open shape.
    pub fn push(&mut self, vertex: Vertex) -> HandyResult<()> {
        match &mut self.state {
            State::Building { vertices, .. } => {
                vertices.push(vertex);
                Ok(())
            },
            State::Idle => Err(HandyError::no_open_shape(if vertex.curve {
                "curve_vertex"
            } else {
                "vertex"
            })),
        }
    }

    /// Drop the open shape, if any. Returns whether one was open.
    pub fn discard(&mut self) -> bool {
        let open = self.is_building();
        self.state = State::Idle;
        open
    }

    /// Close the open shape and hand back its record, leaving the builder idle.
    pub fn finish(&mut self, end: EndMode) -> HandyResult<ShapeRecord> {
        match std::mem::take(&mut self.state) {
            State::Building { kind, vertices } => Ok(ShapeRecord {
                kind,
                vertices,
                end,
            }),
            State::Idle => Err(HandyError::no_open_shape("end_shape")),
        }
    }
}
