//! Bone (rigid-body pose).

use crate::Transform;

/// A pose positioning a [`Part`](crate::Part) in model space.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bone {
    pub uuid: Option<String>,
    pub transform: Transform,
}

impl Bone {
    /// Create a bone from a validated transform.
    pub fn new(uuid: Option<String>, transform: Transform) -> Self {
        Self { uuid, transform }
    }

    /// Always true: a [`Transform`] holds exactly twelve finite values.
    pub fn is_valid(&self) -> bool {
        self.transform.is_finite()
    }
}
