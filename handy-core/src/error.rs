//! # Error Types
//!
//! Errors raised by the drawing surfaces, the shape protocol and the sketchy
//! session lifecycle.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while drawing or managing a sketchy session.
#[derive(Error, Debug)]
pub enum HandyError {
    /// `begin_shape` was called while another shape was still open.
    #[error("begin_shape() called while a shape is already open")]
    ShapeAlreadyOpen,

    /// A vertex or `end_shape` call arrived without an open shape.
    #[error("{operation}() called without a matching begin_shape()")]
    NoOpenShape {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// `start_handy` was called while a session is already open.
    #[error("start_handy() called while a sketchy session is already active")]
    SessionActive,

    /// `stop_handy` was called without a matching `start_handy`.
    #[error("stop_handy() called without a matching start_handy()")]
    NoSession,

    /// The sketch's active surface was replaced while a session was open.
    #[error("the sketch's active surface is no longer the sketchy surface installed by start_handy()")]
    SurfaceSwapped,

    /// A pixel buffer of the requested size could not be allocated.
    #[error("Cannot allocate a {width}x{height} pixel buffer")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Engine configuration could not be parsed.
    #[error("Failed to parse engine config {path:?}: {details}")]
    ConfigParse {
        /// The file that failed to parse, if the config came from disk.
        path: Option<PathBuf>,
        /// Details about the parse error.
        details: String,
    },

    /// Exporting a buffer as an image failed.
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for handy operations.
pub type HandyResult<T> = Result<T, HandyError>;

impl HandyError {
    /// Create an error for a shape operation issued outside `begin_shape`/`end_shape`.
    pub fn no_open_shape(operation: &'static str) -> Self {
        Self::NoOpenShape { operation }
    }

    /// Create a config parse error.
    pub fn config_parse(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigParse {
            path,
            details: details.into(),
        }
    }
}
