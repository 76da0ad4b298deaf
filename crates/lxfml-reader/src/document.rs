//! Document walker building a [`Model`] from the node stream.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lxfml_model::{Bone, Brick, Model, ModelVersion, Part, Transform};
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::node::{Element, Node};
use crate::parsers::{parse_int, parse_materials, parse_transform};
use crate::{Result, StructureError, TransformError};

const ROOT: &str = "LXFML";
const BRICKS: &str = "Bricks";
const BRICK: &str = "Brick";
const PART: &str = "Part";
const BONE: &str = "Bone";

/// Attribute names accepted for a bone transform, in priority order.
const TRANSFORM_ALIASES: [&str; 3] = ["transformation", "t", "transform"];

/// Load an LXFML file from disk.
///
/// Fails with [`Error::Io`](crate::Error::Io) if the file cannot be opened.
pub fn load(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading LXFML file");

    let file = File::open(path)?;
    load_from_reader(BufReader::new(file))
}

/// Load an LXFML document that is already in memory.
pub fn load_from_str(text: &str) -> Result<Model> {
    load_from_reader(text.as_bytes())
}

/// Load an LXFML document from any buffered source.
///
/// The source is read once, front to back, and dropped before returning.
pub fn load_from_reader<R: BufRead>(source: R) -> Result<Model> {
    let mut cursor = Cursor::new(source);
    let model = read_model(&mut cursor)?;

    debug!(
        version = %model.version,
        bricks = model.bricks.len(),
        parts = model.part_count(),
        "loaded LXFML model"
    );
    Ok(model)
}

fn read_model<R: BufRead>(cursor: &mut Cursor<R>) -> Result<Model> {
    let Some(root) = seek_root(cursor)? else {
        return Err(missing_root().into());
    };

    let mut model = Model::new(read_version(&root));
    if root.self_closing {
        return Ok(model);
    }

    let mut found_bricks = false;
    loop {
        match cursor.next()? {
            Node::Start(element) if element.is(BRICKS) => {
                found_bricks = true;
                let bricks = read_children(cursor, &element, BRICK, read_brick)?;
                model.bricks.extend(bricks);
            }
            Node::Start(element) => skip_unknown(cursor, &element)?,
            Node::End(_) => break,
            Node::Text => {}
            Node::Eof => return Err(cursor.unexpected_eof(ROOT)),
        }
    }

    if model.version.is_zero() && !found_bricks {
        return Err(missing_root().into());
    }

    if !found_bricks {
        return Err(StructureError::new("missing <Bricks> container in <LXFML>").into());
    }

    Ok(model)
}

/// Scan forward to the first `LXFML` start tag, wherever it is.
fn seek_root<R: BufRead>(cursor: &mut Cursor<R>) -> Result<Option<Element>> {
    loop {
        match cursor.next()? {
            Node::Start(element) if element.is(ROOT) => return Ok(Some(element)),
            Node::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn missing_root() -> StructureError {
    StructureError::new("missing <LXFML> root or version attributes")
}

/// Version attributes default to 0 when absent or not a non-negative integer.
fn read_version(root: &Element) -> ModelVersion {
    let component = |name: &str| {
        root.attribute(name)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0)
    };

    ModelVersion::new(
        component("versionMajor"),
        component("versionMinor"),
        component("versionPatch"),
    )
}

/// Read the children of `parent`, building one value per `child` element and
/// skipping everything else, up to the parent's end tag.
fn read_children<R, T, F>(
    cursor: &mut Cursor<R>,
    parent: &Element,
    child: &str,
    mut read: F,
) -> Result<Vec<T>>
where
    R: BufRead,
    F: FnMut(&mut Cursor<R>, Element) -> Result<T>,
{
    let mut items = Vec::new();
    if parent.self_closing {
        return Ok(items);
    }

    loop {
        match cursor.next()? {
            Node::Start(element) if element.is(child) => items.push(read(cursor, element)?),
            Node::Start(element) => skip_unknown(cursor, &element)?,
            Node::End(_) => return Ok(items),
            Node::Text => {}
            Node::Eof => return Err(cursor.unexpected_eof(&parent.name)),
        }
    }
}

fn skip_unknown<R: BufRead>(cursor: &mut Cursor<R>, element: &Element) -> Result<()> {
    debug!(
        element = %element.name,
        at = %element.locator,
        "skipping unknown element"
    );
    cursor.skip(element)
}

fn design_id(element: &Element, kind: &str) -> std::result::Result<i32, StructureError> {
    let raw = element.attribute("designId");
    raw.and_then(parse_int).ok_or_else(|| {
        StructureError::at(
            format!(
                "{} requires numeric designId, got '{}'",
                kind,
                raw.unwrap_or_default()
            ),
            element.locator,
        )
    })
}

fn owned_attribute(element: &Element, name: &str) -> Option<String> {
    element.attribute(name).map(str::to_owned)
}

fn read_brick<R: BufRead>(cursor: &mut Cursor<R>, element: Element) -> Result<Brick> {
    let mut brick = Brick::new(design_id(&element, BRICK)?);
    brick.uuid = owned_attribute(&element, "uuid");
    brick.parts = read_children(cursor, &element, PART, read_part)?;

    trace!(design_id = brick.design_id, parts = brick.parts.len(), "read brick");
    Ok(brick)
}

fn read_part<R: BufRead>(cursor: &mut Cursor<R>, element: Element) -> Result<Part> {
    let mut part = Part::new(design_id(&element, PART)?);
    part.uuid = owned_attribute(&element, "uuid");
    part.part_type = owned_attribute(&element, "type");
    part.materials = parse_materials(element.attribute("materials"));
    part.bones = read_children(cursor, &element, BONE, read_bone)?;

    trace!(
        design_id = part.design_id,
        materials = part.materials.len(),
        bones = part.bones.len(),
        "read part"
    );
    Ok(part)
}

fn read_bone<R: BufRead>(cursor: &mut Cursor<R>, element: Element) -> Result<Bone> {
    let raw = TRANSFORM_ALIASES
        .iter()
        .find_map(|alias| element.attribute(alias))
        .ok_or_else(|| {
            StructureError::at(
                "Bone requires 'transformation' attribute with 12 values",
                element.locator,
            )
        })?;

    let values = parse_transform(Some(raw))
        .map_err(|e| StructureError::from(e).wrap(element.locator))?;
    if values.len() != Transform::LEN {
        let err = TransformError::Count(values.len());
        return Err(StructureError::from(err).wrap(element.locator).into());
    }

    let uuid = owned_attribute(&element, "uuid");
    cursor.skip(&element)?;

    let transform = Transform::from_slice(&values).ok_or_else(|| {
        StructureError::at(
            "Bone transform contains non-finite values (NaN or Infinity)",
            element.locator,
        )
    })?;

    trace!(uuid = ?uuid, "read bone");
    Ok(Bone::new(uuid, transform))
}
