//! Rigid-body transform stored as a row-major 3x4 affine matrix.

use std::fmt;

/// A row-major 3x4 affine matrix.
///
/// The layout is `[r00, r01, r02, tx, r10, r11, r12, ty, r20, r21, r22, tz]`:
/// three rows of rotation/scale with the translation in the last column.
///
/// A `Transform` can only be built from twelve finite values, so every
/// transform reachable from a [`Model`](crate::Model) is usable as-is.
#[derive(Clone, Copy, PartialEq)]
pub struct Transform {
    values: [f32; 12],
}

impl Transform {
    /// Number of values in a 3x4 matrix.
    pub const LEN: usize = 12;

    /// The identity transform.
    pub const IDENTITY: Self = Self {
        values: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0,
        ],
    };

    /// Create a transform from twelve values.
    ///
    /// Returns `None` if any value is NaN or infinite.
    pub fn new(values: [f32; 12]) -> Option<Self> {
        let transform = Self { values };
        transform.is_finite().then_some(transform)
    }

    /// Create a transform from a slice.
    ///
    /// Returns `None` unless the slice holds exactly twelve finite values.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        let values: [f32; 12] = values.try_into().ok()?;
        Self::new(values)
    }

    /// The raw row-major values.
    #[inline]
    pub const fn values(&self) -> &[f32; 12] {
        &self.values
    }

    /// Get one row (`0..3`) as `[x, y, z, translation]`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 3 or greater.
    pub fn row(&self, index: usize) -> [f32; 4] {
        assert!(index < 3, "row index {index} out of range for a 3x4 matrix");
        let start = index * 4;
        [
            self.values[start],
            self.values[start + 1],
            self.values[start + 2],
            self.values[start + 3],
        ]
    }

    /// The translation column.
    pub fn translation(&self) -> [f32; 3] {
        [self.values[3], self.values[7], self.values[11]]
    }

    /// Check that every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Expand to a row-major 4x4 homogeneous matrix.
    ///
    /// The last row is `0, 0, 0, 1`.
    pub fn to_matrix4(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out[..12].copy_from_slice(&self.values);
        out[15] = 1.0;
        out
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<[f32; 12]> for Transform {
    type Error = [f32; 12];

    fn try_from(values: [f32; 12]) -> Result<Self, Self::Error> {
        Self::new(values).ok_or(values)
    }
}

impl From<Transform> for [f32; 12] {
    fn from(transform: Transform) -> Self {
        transform.values
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl fmt::Display for Transform {
    /// Formats as the comma-separated list used by LXFML attributes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Transform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.values.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Transform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = <[f32; 12]>::deserialize(deserializer)?;
        Self::new(values)
            .ok_or_else(|| serde::de::Error::custom("transform contains non-finite numbers"))
    }
}
