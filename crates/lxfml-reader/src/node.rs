//! Node events produced by the document cursor.

use crate::Locator;

/// One step of the forward-only walk over an XML document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    /// A start tag, or a self-closing tag.
    Start(Element),
    /// An end tag, by local name.
    End(String),
    /// Character data between tags.
    Text,
    /// End of input.
    Eof,
}

/// A single attribute, by local name, with its value unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
    pub name: String,
    pub value: String,
}

/// An opened element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
    pub locator: Locator,
}

impl Element {
    /// Case-insensitive comparison against a local name.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Look up an attribute by case-insensitive local name.
    ///
    /// Only the first matching attribute is considered. A blank value is
    /// treated as absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
            .filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(attributes: &[(&str, &str)]) -> Element {
        Element {
            name: "Part".into(),
            attributes: attributes
                .iter()
                .map(|(name, value)| Attribute {
                    name: (*name).into(),
                    value: (*value).into(),
                })
                .collect(),
            self_closing: true,
            locator: Locator::Unknown,
        }
    }

    #[test]
    fn test_is_ignores_case() {
        let e = element(&[]);
        assert!(e.is("part"));
        assert!(e.is("PART"));
        assert!(!e.is("Parts"));
    }

    #[test]
    fn test_attribute_lookup() {
        let e = element(&[("DESIGNID", "3001"), ("uuid", "  "), ("designId", "42")]);
        assert_eq!(e.attribute("designid"), Some("3001"));
        assert_eq!(e.attribute("uuid"), None);
        assert_eq!(e.attribute("type"), None);
    }
}
