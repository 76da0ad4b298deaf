//! Scene graph types for LEGO LXFML models.
//!
//! An LXFML document describes a digital LEGO model as a strict tree:
//!
//! - [`Model`] - version metadata plus an ordered list of bricks
//! - [`Brick`] - a physical piece instance identified by a design catalog id
//! - [`Part`] - a sub-component of a brick with material assignments and poses
//! - [`Bone`] - a rigid-body pose, stored as a validated [`Transform`]
//! - [`Material`] - a color id with an optional decoration variant
//!
//! Every value in this crate is plain owned data. There are no back references
//! and no shared nodes, so a model can be moved across threads freely.

mod bone;
mod brick;
mod material;
mod model;
mod part;
mod transform;

pub use bone::Bone;
pub use brick::Brick;
pub use material::Material;
pub use model::{Model, ModelVersion};
pub use part::Part;
pub use transform::Transform;
