//! Material assignment.

use std::fmt;

/// A color assignment applied to a [`Part`](crate::Part).
///
/// `variant` is the optional decoration id that follows the color in the
/// `colorId:variant` attribute form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub color_id: i32,
    pub variant: Option<i32>,
}

impl Material {
    /// Create a material with no variant.
    pub const fn new(color_id: i32) -> Self {
        Self {
            color_id,
            variant: None,
        }
    }

    /// Create a material with a variant.
    pub const fn with_variant(color_id: i32, variant: i32) -> Self {
        Self {
            color_id,
            variant: Some(variant),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{}:{}", self.color_id, variant),
            None => write!(f, "{}", self.color_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Material::new(26).to_string(), "26");
        assert_eq!(Material::with_variant(26, 3).to_string(), "26:3");
    }
}
