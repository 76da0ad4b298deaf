//! Model root and version metadata.

use std::fmt;

use crate::{Brick, Part};

/// LXFML format version taken from the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ModelVersion {
    /// Create a version triple.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The components as a `(major, minor, patch)` tuple.
    pub const fn as_tuple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    /// True when all three components are zero, i.e. nothing usable was read.
    pub const fn is_zero(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A parsed LXFML model.
///
/// The model exclusively owns its bricks, which own their parts, which own
/// their bones and materials.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    pub version: ModelVersion,
    pub bricks: Vec<Brick>,
}

impl Model {
    /// Create an empty model with the given version.
    pub fn new(version: ModelVersion) -> Self {
        Self {
            version,
            bricks: Vec::new(),
        }
    }

    /// Version as a `(major, minor, patch)` tuple.
    pub fn version(&self) -> (u32, u32, u32) {
        self.version.as_tuple()
    }

    /// Iterate every part of every brick, in document order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.bricks.iter().flat_map(|b| b.parts.iter())
    }

    /// Total number of parts.
    pub fn part_count(&self) -> usize {
        self.bricks.iter().map(|b| b.parts.len()).sum()
    }

    /// Total number of bones.
    pub fn bone_count(&self) -> usize {
        self.parts().map(|p| p.bones.len()).sum()
    }

    /// Total number of material assignments.
    pub fn material_count(&self) -> usize {
        self.parts().map(|p| p.materials.len()).sum()
    }
}
