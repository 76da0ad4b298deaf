//! Error types for LXFML reading.

use std::fmt;

use thiserror::Error;

use crate::Locator;

/// Errors that can occur when loading an LXFML document.
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well-formed XML.
    #[error("XML error at line {locator}: {message}")]
    Xml { message: String, locator: Locator },

    /// The document is well-formed but violates the LXFML structure.
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Result type for LXFML operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing a bone transform attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The attribute did not hold exactly twelve numbers.
    #[error("expected 12 transform values, got {0}")]
    Count(usize),

    /// One of the numbers was NaN or infinite.
    #[error("transform contains non-finite numbers")]
    NonFinite,
}

/// One message in a [`StructureError`] chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub message: String,
    pub locator: Option<Locator>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.locator {
            Some(locator) => write!(f, "line {}: {}", locator, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// A fatal structural or data error in an LXFML document.
///
/// Errors raised deep in the tree are wrapped by the element that was being
/// read, so the error carries a chain of frames. The chain is stored
/// innermost first; [`Display`](fmt::Display) shows the outermost frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureError {
    frames: Vec<Frame>,
}

impl StructureError {
    /// Create an error without position information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            frames: vec![Frame {
                message: message.into(),
                locator: None,
            }],
        }
    }

    /// Create an error positioned at `locator`.
    pub fn at(message: impl Into<String>, locator: Locator) -> Self {
        Self {
            frames: vec![Frame {
                message: message.into(),
                locator: Some(locator),
            }],
        }
    }

    /// Wrap this error with the position of the enclosing element.
    ///
    /// The outer frame repeats the current message; the original frame is
    /// kept as its cause.
    pub fn wrap(mut self, locator: Locator) -> Self {
        let message = self.message().to_owned();
        self.frames.push(Frame {
            message,
            locator: Some(locator),
        });
        self
    }

    /// The outermost message.
    pub fn message(&self) -> &str {
        self.frames.last().map_or("", |f| f.message.as_str())
    }

    /// Position of the outermost frame, if it has one.
    pub fn locator(&self) -> Option<Locator> {
        self.frames.last().and_then(|f| f.locator)
    }

    /// All frames, innermost first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The wrapped causes below the outermost frame, outermost to innermost.
    pub fn causes(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev().skip(1)
    }
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frames.last() {
            Some(frame) => frame.fmt(f),
            None => Ok(()),
        }
    }
}

impl std::error::Error for StructureError {}

impl From<TransformError> for StructureError {
    fn from(err: TransformError) -> Self {
        Self::new(err.to_string())
    }
}
