//! Minimal CSS selector support for locating page structure.
//!
//! Supported: type selectors, `#id`, `.class`, compounds of those
//! (`a.nav#home`) and the descendant combinator (`.panel-option a`).
//! Anything else is rejected at parse time rather than silently ignored.

use std::fmt;

use ego_tree::NodeRef;
use thiserror::Error;

use crate::document::{DomNode, ElementData};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,
    #[error("unsupported selector syntax `{found}` in `{selector}`")]
    Unsupported { selector: String, found: char },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl SimpleSelector {
    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| {
            element
                .classes()
                .any(|candidate| candidate.eq_ignore_ascii_case(class))
        })
    }
}

/// A parsed descendant chain, e.g. `.panel-option a` is two compounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<SimpleSelector>,
}

impl Selector {
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let source = raw.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let compounds = source
            .split_whitespace()
            .map(|part| parse_simple_selector(source, part))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: source.to_string(),
            compounds,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Right-to-left match: the node must satisfy the last compound and its
    /// ancestors must satisfy the remaining compounds in order.
    pub fn matches(&self, node: NodeRef<'_, DomNode>) -> bool {
        let Some((last, rest)) = self.compounds.split_last() else {
            return false;
        };
        let DomNode::Element(element) = node.value() else {
            return false;
        };
        if !last.matches(element) {
            return false;
        }
        let mut pending = rest.iter().rev().peekable();
        for ancestor in node.ancestors() {
            let Some(next) = pending.peek() else {
                break;
            };
            if let DomNode::Element(element) = ancestor.value() {
                if next.matches(element) {
                    pending.next();
                }
            }
        }
        pending.peek().is_none()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

fn parse_simple_selector(selector: &str, part: &str) -> Result<SimpleSelector, SelectorError> {
    let mut simple = SimpleSelector::default();
    let mut chars = part.chars().peekable();
    while let Some(ch) = chars.peek().copied() {
        let mut buffer = String::new();
        match ch {
            '.' | '#' => {
                chars.next();
                while let Some(next) = chars.peek().copied() {
                    if !is_ident_char(next) {
                        break;
                    }
                    buffer.push(next);
                    chars.next();
                }
                if buffer.is_empty() {
                    return Err(SelectorError::Unsupported {
                        selector: selector.to_string(),
                        found: ch,
                    });
                }
                if ch == '.' {
                    simple.classes.push(buffer.to_ascii_lowercase());
                } else {
                    simple.id = Some(buffer);
                }
            }
            '*' if simple.tag.is_none() => {
                chars.next();
            }
            c if is_ident_char(c) && simple.tag.is_none() && simple.id.is_none() => {
                while let Some(next) = chars.peek().copied() {
                    if !is_ident_char(next) {
                        break;
                    }
                    buffer.push(next);
                    chars.next();
                }
                simple.tag = Some(buffer.to_ascii_lowercase());
            }
            other => {
                return Err(SelectorError::Unsupported {
                    selector: selector.to_string(),
                    found: other,
                });
            }
        }
    }
    Ok(simple)
}
