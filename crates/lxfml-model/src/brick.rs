//! Brick - a top-level piece instance.

use crate::Part;

/// A physical piece instance, identified by its design catalog id.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Brick {
    pub design_id: i32,
    pub uuid: Option<String>,
    pub parts: Vec<Part>,
}

impl Brick {
    /// Create a brick with no parts.
    pub fn new(design_id: i32) -> Self {
        Self {
            design_id,
            ..Self::default()
        }
    }
}
