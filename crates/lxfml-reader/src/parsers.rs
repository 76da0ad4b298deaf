//! Attribute value parsers.
//!
//! These are pure functions over raw attribute text. Malformed material
//! tokens and non-numeric transform tokens are dropped rather than reported;
//! only the shape of the final transform is enforced.

use lxfml_model::{Material, Transform};
use tracing::trace;

use crate::TransformError;

/// Parse an integer attribute, ignoring surrounding whitespace.
pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Parse a `materials` attribute.
///
/// The value is a comma-separated list of `colorId` or `colorId:variant`
/// tokens. Tokens that are not one or two integers are skipped.
///
/// ```
/// use lxfml_model::Material;
/// use lxfml_reader::parsers::parse_materials;
///
/// let materials = parse_materials(Some("5,3:7,bogus,2:x"));
/// assert_eq!(materials, [Material::new(5), Material::with_variant(3, 7)]);
/// ```
pub fn parse_materials(raw: Option<&str>) -> Vec<Material> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };

    let mut materials = Vec::new();
    for token in raw.split(',').filter(|t| !t.is_empty()) {
        let mut pieces = token.split(':');
        let material = match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(color), None, None) => parse_int(color).map(Material::new),
            (Some(color), Some(variant), None) => parse_int(color)
                .zip(parse_int(variant))
                .map(|(color, variant)| Material::with_variant(color, variant)),
            _ => None,
        };

        match material {
            Some(material) => materials.push(material),
            None => trace!(token, "dropping malformed material token"),
        }
    }

    materials
}

/// Parse a bone transform attribute into its numeric values.
///
/// Blank or absent input yields an empty list; deciding whether that is
/// acceptable is up to the caller. Otherwise the comma-separated tokens are
/// parsed as `f32` (tokens that are not numbers are skipped) and the result
/// must be exactly [`Transform::LEN`] finite values.
pub fn parse_transform(raw: Option<&str>) -> Result<Vec<f32>, TransformError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let mut values = Vec::with_capacity(Transform::LEN);
    for token in raw.split(',').filter(|t| !t.is_empty()) {
        match token.trim().parse::<f32>() {
            Ok(value) => values.push(value),
            Err(_) => trace!(token, "dropping non-numeric transform token"),
        }
    }

    if values.len() != Transform::LEN {
        return Err(TransformError::Count(values.len()));
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(TransformError::NonFinite);
    }

    Ok(values)
}
