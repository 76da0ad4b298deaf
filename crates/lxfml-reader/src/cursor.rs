//! Forward-only cursor turning quick-xml events into [`Node`]s.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::locator::LineTracker;
use crate::node::{Attribute, Element, Node};
use crate::{Error, Locator, Result};

/// Streaming cursor over an XML document.
///
/// Comments, declarations, doctypes and processing instructions never
/// surface as nodes. Entities are not expanded beyond the predefined ones.
pub(crate) struct Cursor<R> {
    reader: Reader<LineTracker<R>>,
    buf: Vec<u8>,
}

impl<R: BufRead> Cursor<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(LineTracker::new(source));
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Advance to the next node.
    pub fn next(&mut self) -> Result<Node> {
        let reader = &mut self.reader;
        loop {
            self.buf.clear();
            let event = match reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    let offset = reader.error_position() as u64;
                    let locator = reader.get_mut().locate(offset);
                    return Err(Error::Xml {
                        message: e.to_string(),
                        locator,
                    });
                }
            };

            return match event {
                Event::Start(e) => read_element(reader, &e, false).map(Node::Start),
                Event::Empty(e) => read_element(reader, &e, true).map(Node::Start),
                Event::End(e) => Ok(Node::End(
                    String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                )),
                Event::Text(_) | Event::CData(_) => Ok(Node::Text),
                Event::Eof => Ok(Node::Eof),
                // Declarations, comments, doctypes and processing instructions
                _ => continue,
            };
        }
    }

    /// Consume the children of `element` up to and including its end tag.
    pub fn skip(&mut self, element: &Element) -> Result<()> {
        if element.self_closing {
            return Ok(());
        }

        let mut depth = 1usize;
        while depth > 0 {
            match self.next()? {
                Node::Start(child) if !child.self_closing => depth += 1,
                Node::End(_) => depth -= 1,
                Node::Eof => return Err(self.unexpected_eof(&element.name)),
                Node::Start(_) | Node::Text => {}
            }
        }
        Ok(())
    }

    /// Current position of the cursor.
    pub fn locator(&mut self) -> Locator {
        let offset = self.reader.buffer_position() as u64;
        self.reader.get_mut().locate(offset)
    }

    /// Error for input that ends while `name` is still open.
    pub fn unexpected_eof(&mut self, name: &str) -> Error {
        Error::Xml {
            message: format!("unexpected end of document inside <{}>", name),
            locator: self.locator(),
        }
    }
}

fn read_element<R: BufRead>(
    reader: &mut Reader<LineTracker<R>>,
    start: &BytesStart<'_>,
    self_closing: bool,
) -> Result<Element> {
    // The event ends just past '>'; step back over the tag to its name.
    let end = reader.buffer_position() as u64;
    let markup = start.len() as u64 + if self_closing { 3 } else { 2 };
    let locator = end
        .checked_sub(markup)
        .map_or(Locator::Unknown, |lt| reader.get_mut().locate(lt + 1));

    let xml_error = |message: String| Error::Xml { message, locator };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| xml_error(e.to_string()))?;
        attributes.push(Attribute {
            name: String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned(),
            value: value.into_owned(),
        });
    }

    Ok(Element {
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        self_closing,
        locator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(xml: &str) -> Vec<Node> {
        let mut cursor = Cursor::new(xml.as_bytes());
        let mut out = Vec::new();
        loop {
            let node = cursor.next().unwrap();
            let done = node == Node::Eof;
            out.push(node);
            if done {
                break;
            }
        }
        out
    }

    fn start(node: &Node) -> &Element {
        match node {
            Node::Start(e) => e,
            other => panic!("expected start node, got {:?}", other),
        }
    }

    #[test]
    fn test_events() {
        let xml = r#"<?xml version="1.0"?>
<!-- comment -->
<LXFML versionMajor="5">
  <Meta>text</Meta>
  <Bricks/>
</LXFML>"#;
        let nodes = nodes(xml);
        assert_eq!(nodes.len(), 7);

        let root = start(&nodes[0]);
        assert!(root.is("lxfml"));
        assert!(!root.self_closing);
        assert_eq!(root.attribute("versionmajor"), Some("5"));
        assert_eq!(root.locator, Locator::At { line: 3, column: 2 });

        assert!(start(&nodes[1]).is("Meta"));
        assert_eq!(nodes[2], Node::Text);
        assert_eq!(nodes[3], Node::End("Meta".into()));

        let bricks = start(&nodes[4]);
        assert!(bricks.self_closing);
        assert_eq!(bricks.locator, Locator::At { line: 5, column: 4 });

        assert_eq!(nodes[5], Node::End("LXFML".into()));
        assert_eq!(nodes[6], Node::Eof);
    }

    #[test]
    fn test_local_names_and_unescape() {
        let xml = r#"<x:Part xmlns:x="urn:x" x:uuid="a&amp;b" type="1x2"/>"#;
        let nodes = nodes(xml);
        let part = start(&nodes[0]);
        assert!(part.is("Part"));
        assert_eq!(part.attributes.len(), 2);
        assert_eq!(part.attribute("uuid"), Some("a&b"));
        assert_eq!(part.attribute("type"), Some("1x2"));
    }

    #[test]
    fn test_skip_subtree() {
        let xml = "<a><b><c/><d>t</d></b><e/></a>";
        let mut cursor = Cursor::new(xml.as_bytes());
        let a = cursor.next().unwrap();
        assert!(start(&a).is("a"));

        let b = cursor.next().unwrap();
        cursor.skip(start(&b)).unwrap();

        let e = cursor.next().unwrap();
        assert!(start(&e).is("e"));
        assert_eq!(cursor.next().unwrap(), Node::End("a".into()));
    }

    #[test]
    fn test_line_tracking_stays_bounded() {
        let mut xml = String::from(r#"<LXFML versionMajor="1"><Bricks>"#);
        for _ in 0..100_000 {
            xml.push_str("<X/>\n");
        }
        xml.push_str("</Bricks></LXFML>");

        let mut cursor = Cursor::new(xml.as_bytes());
        let mut last = Locator::Unknown;
        loop {
            match cursor.next().unwrap() {
                Node::Start(e) => last = e.locator,
                Node::Eof => break,
                _ => {}
            }
            assert!(cursor.reader.get_ref().tracked_newlines() <= 2);
        }
        assert_eq!(last, Locator::At { line: 100_000, column: 2 });
    }

    #[test]
    fn test_mismatched_end_tag() {
        let mut cursor = Cursor::new("<a><b></a>".as_bytes());
        cursor.next().unwrap();
        cursor.next().unwrap();
        assert!(matches!(cursor.next(), Err(Error::Xml { .. })));
    }
}
