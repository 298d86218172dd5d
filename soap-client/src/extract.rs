//! Response-argument extraction.
//!
//! Gateway responses name their output arguments as `<ArgName>value</ArgName>`
//! elements inside the action response. The extraction seam lets callers pick
//! between the historical text scan and a structural XML lookup without
//! touching operation code.

use xmltree::{Element, XMLNode};

/// Extracts one named argument from a raw control response body.
pub trait ArgExtractor {
    fn extract(&self, body: &str, name: &str) -> Option<String>;
}

/// First-match, non-greedy scan for the literal `<Name>value</Name>`.
///
/// This is fragile against nested or duplicated tags of the same name, but
/// preserves the first-match-wins semantics gateways have been answering to.
/// An empty element does not match.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextScanExtractor;

impl ArgExtractor for TextScanExtractor {
    fn extract(&self, body: &str, name: &str) -> Option<String> {
        let open = format!("<{}>", name);
        let close = format!("</{}>", name);

        let start = body.find(&open)? + open.len();
        let end = body[start..].find(&close)? + start;
        if end == start {
            return None;
        }
        Some(body[start..end].to_string())
    }
}

/// Structural lookup: parse the body and return the text of the first
/// descendant element named `name`, in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeExtractor;

impl ArgExtractor for TreeExtractor {
    fn extract(&self, body: &str, name: &str) -> Option<String> {
        let root = Element::parse(body.as_bytes()).ok()?;
        let text = find_descendant(&root, name)?.get_text()?.to_string();
        if text.is_empty() {
            return None;
        }
        Some(text)
    }
}

fn find_descendant<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    if element.name == name {
        return Some(element);
    }
    for child in &element.children {
        if let XMLNode::Element(child) = child {
            if let Some(found) = find_descendant(child, name) {
                return Some(found);
            }
        }
    }
    None
}
