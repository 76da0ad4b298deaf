//! LXFML - LEGO digital model reading library.
//!
//! This crate provides a unified interface to the LXFML crates:
//!
//! - [`lxfml_model`] - Scene graph types (model, bricks, parts, bones, materials)
//! - [`lxfml_reader`] - Streaming document reader and error types
//!
//! # Example
//!
//! ```no_run
//! use lxfml::prelude::*;
//!
//! let model = lxfml::load("castle.lxfml")?;
//! println!("{}: {} bricks", model.version, model.bricks.len());
//!
//! for part in model.parts() {
//!     for bone in &part.bones {
//!         println!("{} at {:?}", part.design_id, bone.transform.translation());
//!     }
//! }
//! # Ok::<(), lxfml::Error>(())
//! ```

// Re-export sub-crates
pub use lxfml_model as model;
pub use lxfml_reader as reader;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use lxfml_model::{Bone, Brick, Material, Model, ModelVersion, Part, Transform};
    pub use lxfml_reader::{Error, Locator, StructureError};
}

// Re-export commonly used items at the crate root
pub use lxfml_reader::{load, load_from_reader, load_from_str, Error, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
