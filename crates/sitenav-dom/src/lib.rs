//! Owned document tree for the site navigation widget.
//!
//! HTML is parsed once with `scraper` and copied into a mutable
//! `ego_tree::Tree` that the host mutates in response to view mutations.

pub mod document;
pub mod selector;

pub use document::{DomNode, ElementData, PageDocument};
pub use ego_tree::NodeId;
pub use selector::{Selector, SelectorError};
