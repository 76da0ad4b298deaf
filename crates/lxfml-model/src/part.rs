//! Part - a sub-component of a brick.

use crate::{Bone, Material};

/// A sub-component of a [`Brick`](crate::Brick).
///
/// Parts carry their material assignments and one or more poses.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    pub design_id: i32,
    pub uuid: Option<String>,
    pub part_type: Option<String>,
    pub materials: Vec<Material>,
    pub bones: Vec<Bone>,
}

impl Part {
    /// Create a part with no materials and no bones.
    pub fn new(design_id: i32) -> Self {
        Self {
            design_id,
            ..Self::default()
        }
    }
}
