//! Streaming reader for LEGO LXFML model documents.
//!
//! LXFML is the XML dialect used by LEGO digital design tools. This crate
//! walks the document once, front to back, and builds a validated
//! [`Model`](lxfml_model::Model):
//!
//! ```text
//! <LXFML versionMajor="8" versionMinor="0" versionPatch="0">
//!   <Bricks>
//!     <Brick designId="3001" uuid="...">
//!       <Part designId="3001" materials="21,5:2">
//!         <Bone transformation="1,0,0,0,0,1,0,0,0,0,1,0"/>
//!       </Part>
//!     </Brick>
//!   </Bricks>
//! </LXFML>
//! ```
//!
//! Element and attribute names are matched case-insensitively by local name.
//! Unknown elements are skipped together with their children.
//!
//! # Example
//!
//! ```no_run
//! let model = lxfml_reader::load("model.lxfml")?;
//!
//! println!("{} bricks, {} parts", model.bricks.len(), model.part_count());
//! # Ok::<(), lxfml_reader::Error>(())
//! ```
//!
//! # Errors
//!
//! A load either returns a fully valid model or fails. Structural problems
//! (missing root, missing `Bricks`, non-numeric `designId`, bad bone
//! transforms) are reported as [`StructureError`], which keeps the chain of
//! wrapped messages together with their line/column [`Locator`]s.

mod cursor;
mod document;
mod error;
mod locator;
mod node;

pub mod parsers;

pub use document::{load, load_from_reader, load_from_str};
pub use error::{Error, Frame, Result, StructureError, TransformError};
pub use locator::Locator;
