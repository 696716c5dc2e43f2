use std::{collections::BTreeMap, ops::Deref, path::Path};

use anyhow::{Context, Result};
use ego_tree::{NodeId, NodeMut, NodeRef, Tree};
use scraper::{Html, Node};

use crate::selector::Selector;

/// Node payload of the owned page tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Document,
    Element(ElementData),
    Text(String),
}

/// Mutable element state: tag, attributes, inline style and form value.
///
/// The `style` attribute is split into `styles` at parse time so single
/// properties can be read and written without re-serializing the attribute.
///
/// The `value` attribute is the default value, as in a browser form control.
/// It seeds the live value until [`ElementData::set_value`] is called; after
/// that the two are independent and `attr("value")` keeps the default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    styles: BTreeMap<String, String>,
    value: String,
    value_dirty: bool,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    fn from_scraper(element: &scraper::node::Element) -> Self {
        let mut data = Self::new(element.name());
        for (name, value) in element.attrs() {
            data.set_attr(name, value);
        }
        data
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "style" => {
                self.styles = parse_declarations(value).collect();
                return;
            }
            "value" if !self.value_dirty => self.value = value.to_string(),
            _ => {}
        }
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((name, value.to_string())),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|candidate| candidate == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut list: Vec<&str> = self.classes().collect();
        list.push(class);
        let joined = list.join(" ");
        self.set_attr("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let joined = self
            .classes()
            .filter(|candidate| *candidate != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &joined);
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .get(&property.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles
            .insert(property.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    /// Inline `display` is the visibility flag the router toggles.
    pub fn is_displayed(&self) -> bool {
        self.style("display") != Some("none")
    }

    /// Current form value (the live `value` property).
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn default_value(&self) -> &str {
        self.attr("value").unwrap_or_default()
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.value_dirty = true;
    }
}

/// Owned, mutable document tree parsed from HTML.
///
/// Nodes removed by [`PageDocument::replace_children_with_html`] go to a free
/// list and are reused by later insertions, so the arena stays bounded by the
/// largest content the page has held at once. Ids of removed nodes must not be
/// used after the replacement.
#[derive(Debug, Clone)]
pub struct PageDocument {
    tree: Tree<DomNode>,
    free: Vec<NodeId>,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut tree = Tree::new(DomNode::Document);
        copy_children(parsed.tree.root(), tree.root_mut());
        Self {
            tree,
            free: Vec::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read HTML file '{}'", path.display()))?;
        Ok(Self::parse(&html))
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn node(&self, node: NodeId) -> Option<NodeRef<'_, DomNode>> {
        self.tree.get(node)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.tree.get(node)?.value() {
            DomNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Runs `update` against the element at `node`; `None` for non-elements.
    pub fn update_element<R>(
        &mut self,
        node: NodeId,
        update: impl FnOnce(&mut ElementData) -> R,
    ) -> Option<R> {
        let mut node = self.tree.get_mut(node)?;
        match node.value() {
            DomNode::Element(element) => Some(update(element)),
            _ => None,
        }
    }

    /// Attached elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .root()
            .descendants()
            .filter(|node| matches!(node.value(), DomNode::Element(_)))
            .map(|node| node.id())
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .find(|node| self.element(*node).and_then(ElementData::id) == Some(id))
    }

    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.tree
            .root()
            .descendants()
            .filter(|node| selector.matches(*node))
            .map(|node| node.id())
            .collect()
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let Some(node) = self.tree.get(node) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|child| match child.value() {
                DomNode::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True when `node` is `ancestor` or lies somewhere beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == node {
            return true;
        }
        self.tree
            .get(node)
            .is_some_and(|node| node.ancestors().any(|parent| parent.id() == ancestor))
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let node = self.tree.get(node)?;
        std::iter::once(node)
            .chain(node.ancestors())
            .find(|candidate| selector.matches(*candidate))
            .map(|candidate| candidate.id())
    }

    pub fn body(&self) -> NodeId {
        self.elements()
            .find(|node| self.element(*node).is_some_and(|e| e.tag() == "body"))
            .unwrap_or_else(|| self.root())
    }

    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> Option<NodeId> {
        self.append_node(parent, DomNode::Element(element))
    }

    /// Number of nodes held by the arena, attached, detached or free.
    pub fn arena_len(&self) -> usize {
        self.tree.nodes().len()
    }

    /// Replaces every child of `target` with the nodes parsed from `html`.
    pub fn replace_children_with_html(&mut self, target: NodeId, html: &str) -> bool {
        let Some(node) = self.tree.get(target) else {
            return false;
        };
        let removed: Vec<NodeId> = node
            .children()
            .flat_map(|child| child.descendants())
            .map(|descendant| descendant.id())
            .collect();
        // Pre-order reversed: every node is unlinked after its descendants,
        // leaving each freed node without parent, siblings or children.
        for id in removed.iter().rev() {
            if let Some(mut freed) = self.tree.get_mut(*id) {
                freed.detach();
                *freed.value() = DomNode::Text(String::new());
            }
        }
        self.free.extend(removed);

        let fragment = Html::parse_fragment(html);
        self.copy_fragment(*fragment.root_element(), target);
        true
    }

    fn append_node(&mut self, parent: NodeId, value: DomNode) -> Option<NodeId> {
        self.tree.get(parent)?;
        let id = match self.free.pop() {
            Some(id) => {
                let mut recycled = self.tree.get_mut(id)?;
                *recycled.value() = value;
                self.tree.get_mut(parent)?.append_id(id);
                id
            }
            None => self.tree.get_mut(parent)?.append(value).id(),
        };
        Some(id)
    }

    fn copy_fragment(&mut self, source: NodeRef<'_, Node>, parent: NodeId) {
        for child in source.children() {
            let Some(converted) = convert(child.value()) else {
                continue;
            };
            if let Some(appended) = self.append_node(parent, converted) {
                self.copy_fragment(child, appended);
            }
        }
    }
}

fn convert(node: &Node) -> Option<DomNode> {
    match node {
        Node::Element(element) => Some(DomNode::Element(ElementData::from_scraper(element))),
        Node::Text(text) => Some(DomNode::Text(text.deref().to_string())),
        _ => None,
    }
}

fn copy_children(source: NodeRef<'_, Node>, mut target: NodeMut<'_, DomNode>) {
    for child in source.children() {
        let Some(converted) = convert(child.value()) else {
            continue;
        };
        let appended = target.append(converted);
        copy_children(child, appended);
    }
}

fn parse_declarations(source: &str) -> impl Iterator<Item = (String, String)> + '_ {
    source.split(';').filter_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            return None;
        }
        Some((name, value.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_style_is_split_into_properties() {
        let doc = PageDocument::parse(
            r#"<div id="box" style="display: none; Width:10px;;bogus"></div>"#,
        );
        let node = doc.element_by_id("box").expect("box");
        let element = doc.element(node).expect("element");
        assert_eq!(element.style("display"), Some("none"));
        assert_eq!(element.style("width"), Some("10px"));
        assert!(!element.is_displayed());
        assert_eq!(element.attr("style"), None);
    }

    #[test]
    fn class_list_edits_preserve_other_classes() {
        let mut element = ElementData::new("a").with_attr("class", "nav  primary");
        element.add_class("active");
        element.add_class("active");
        assert_eq!(element.attr("class"), Some("nav primary active"));
        element.remove_class("primary");
        assert_eq!(element.attr("class"), Some("nav active"));
        assert!(element.has_class("active"));
    }

    #[test]
    fn input_value_is_seeded_from_attribute() {
        let doc = PageDocument::parse(r#"<input id="input" value="neet">"#);
        let node = doc.element_by_id("input").expect("input");
        assert_eq!(doc.element(node).map(ElementData::value), Some("neet"));
    }

    #[test]
    fn live_value_detaches_from_default_once_edited() {
        let mut element = ElementData::new("input").with_attr("value", "neet");
        element.set_attr("value", "jee");
        assert_eq!(element.value(), "jee");

        element.set_value("");
        assert_eq!(element.value(), "");
        assert_eq!(element.default_value(), "jee");

        element.set_attr("value", "nda");
        assert_eq!(element.value(), "");
        assert_eq!(element.attr("value"), Some("nda"));
    }

    #[test]
    fn contains_and_closest_walk_ancestors() {
        let doc = PageDocument::parse(
            r#"<div id="outer" class="box"><p><b id="inner">x</b></p></div><i id="other"></i>"#,
        );
        let outer = doc.element_by_id("outer").expect("outer");
        let inner = doc.element_by_id("inner").expect("inner");
        let other = doc.element_by_id("other").expect("other");
        assert!(doc.contains(outer, inner));
        assert!(doc.contains(outer, outer));
        assert!(!doc.contains(outer, other));

        let selector = Selector::parse(".box").expect("selector");
        assert_eq!(doc.closest(inner, &selector), Some(outer));
        assert_eq!(doc.closest(other, &selector), None);
    }

    #[test]
    fn replacing_children_detaches_previous_content() {
        let mut doc = PageDocument::parse(r#"<div id="list"><span id="old">old</span></div>"#);
        let list = doc.element_by_id("list").expect("list");
        assert!(doc.replace_children_with_html(list, r#"<p id="new">fresh</p>"#));
        assert_eq!(doc.element_by_id("old"), None);
        assert!(doc.element_by_id("new").is_some());
        assert_eq!(doc.text_content(list), "fresh");
    }

    #[test]
    fn repeated_replacement_reuses_freed_nodes() {
        let mut doc = PageDocument::parse(r#"<div id="list"></div>"#);
        let list = doc.element_by_id("list").expect("list");
        let long = r#"<p class="row">a</p><p class="row">b</p><p class="row">c</p>"#;
        let short = r#"<p class="row">only</p>"#;

        doc.replace_children_with_html(list, long);
        let high_water = doc.arena_len();
        for round in 0..200 {
            let html = if round % 2 == 0 { short } else { long };
            doc.replace_children_with_html(list, html);
        }
        assert_eq!(doc.arena_len(), high_water);
        assert_eq!(doc.text_content(list), "abc");
        let rows = doc.select(&Selector::parse(".row").expect("selector"));
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| doc.contains(list, *row)));
    }
}
