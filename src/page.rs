//! Binds a [`PageDocument`] to a [`SiteController`].
//!
//! Mounting inspects the document once and records a typed binding table
//! (page id to section node, control index to anchor node, input, results
//! panel). Afterwards events are classified against that table, handed to
//! the controller, and the returned mutations are written into the document.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use sitenav_config::SiteConfig;
use sitenav_core::{
    ClickTarget, Geometry, Key, MutationTarget, NavControl, PageId, SiteController, SiteLayout,
    Transition, UiEvent, ViewMutation,
};
use sitenav_dom::{ElementData, NodeId, PageDocument, Selector, SelectorError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MountError {
    #[error("invalid {role} selector: {source}")]
    Selector {
        role: &'static str,
        #[source]
        source: SelectorError,
    },
    #[error("could not attach the search results container")]
    ResultsContainer,
}

fn parse_selector(role: &'static str, raw: &str) -> Result<Selector, MountError> {
    Selector::parse(raw).map_err(|source| MountError::Selector { role, source })
}

#[derive(Debug)]
struct Bindings {
    sections: HashMap<PageId, NodeId>,
    controls: Vec<NodeId>,
    input: Option<NodeId>,
    results: NodeId,
    row_selector: Selector,
    active_class: String,
}

#[derive(Debug)]
pub struct SitePage {
    document: PageDocument,
    controller: SiteController,
    bindings: Bindings,
}

impl SitePage {
    /// Binds to `document` and runs startup (the home page is shown).
    pub fn mount(mut document: PageDocument, config: &SiteConfig) -> Result<Self, MountError> {
        let section_selector = parse_selector("section", &config.dom.section_selector)?;
        let nav_selector = parse_selector("navigation", &config.dom.nav_selector)?;
        let row_selector = parse_selector("result row", &format!(".{}", config.search.row_class))?;

        let mut sections = Vec::new();
        let mut section_nodes = HashMap::new();
        for node in document.select(&section_selector) {
            let Some(id) = document.element(node).and_then(ElementData::id) else {
                continue;
            };
            let page = PageId::from(id);
            if section_nodes.contains_key(&page) {
                warn!(page = %page, "duplicate section id; keeping the first");
                continue;
            }
            section_nodes.insert(page.clone(), node);
            sections.push(page);
        }

        let control_nodes = document.select(&nav_selector);
        let controls = control_nodes
            .iter()
            .map(|node| {
                let element = document.element(*node);
                NavControl::from_markup(
                    element.and_then(|e| e.attr("onclick")),
                    element.and_then(|e| e.attr("data-page")),
                    &document.text_content(*node),
                )
            })
            .collect();

        let input = document.element_by_id(&config.dom.input_id);
        let results = match document.element_by_id(&config.dom.results_id) {
            Some(node) => node,
            None => {
                let body = document.body();
                let container = ElementData::new("div").with_attr("id", &config.dom.results_id);
                document
                    .append_element(body, container)
                    .ok_or(MountError::ResultsContainer)?
            }
        };
        debug!(
            sections = sections.len(),
            controls = control_nodes.len(),
            search = input.is_some(),
            "mounted site page"
        );

        let layout = SiteLayout {
            sections,
            controls,
            has_search_input: input.is_some(),
        };
        let controller = SiteController::new(
            layout,
            config.router.clone(),
            config.search.clone(),
            config.catalog.clone(),
        );
        let mut page = Self {
            document,
            controller,
            bindings: Bindings {
                sections: section_nodes,
                controls: control_nodes,
                input,
                results,
                row_selector,
                active_class: config.dom.active_class.clone(),
            },
        };
        let startup = page.controller.start();
        page.apply(&startup.mutations);
        Ok(page)
    }

    pub fn from_file(path: &Path, config: &SiteConfig) -> Result<Self> {
        let document = PageDocument::from_file(path)?;
        Ok(Self::mount(document, config)?)
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn controller(&self) -> &SiteController {
        &self.controller
    }

    pub fn current_page(&self) -> Option<&PageId> {
        self.controller.router().current()
    }

    pub fn dropdown_visible(&self) -> bool {
        self.controller.dropdown_visible()
    }

    pub fn section_node(&self, page: &str) -> Option<NodeId> {
        self.bindings.sections.get(page).copied()
    }

    pub fn nav_controls(&self) -> &[NodeId] {
        &self.bindings.controls
    }

    pub fn search_input(&self) -> Option<NodeId> {
        self.bindings.input
    }

    pub fn results_container(&self) -> NodeId {
        self.bindings.results
    }

    /// Sections currently displayed, in document order.
    pub fn visible_sections(&self) -> Vec<PageId> {
        self.controller
            .router()
            .sections()
            .iter()
            .filter(|page| {
                self.section_node(page.as_str())
                    .and_then(|node| self.document.element(node))
                    .is_some_and(ElementData::is_displayed)
            })
            .cloned()
            .collect()
    }

    pub fn navigate_to(&mut self, page: &str) -> Transition {
        let transition = self.controller.navigate_to(page);
        self.apply(&transition.mutations);
        transition
    }

    pub fn click(&mut self, node: NodeId) -> Transition {
        let target = self.classify_click(node);
        self.dispatch(UiEvent::Click { target })
    }

    /// The user changed the search input's value. `geometry` is where the
    /// input sits right now; an opening dropdown is anchored to it.
    pub fn type_text(&mut self, value: &str, geometry: Geometry) -> Transition {
        let Some(input) = self.bindings.input else {
            return Transition::default();
        };
        self.document
            .update_element(input, |element| element.set_value(value));
        self.dispatch(UiEvent::Input {
            value: value.to_string(),
            geometry,
        })
    }

    /// Key pressed in the search input, named as in `KeyboardEvent.key`.
    pub fn press_key(&mut self, key: &str) -> Transition {
        if self.bindings.input.is_none() {
            return Transition::default();
        }
        self.dispatch(UiEvent::KeyDown {
            key: Key::from_name(key),
        })
    }

    pub fn resize(&mut self, geometry: Geometry) -> Transition {
        self.dispatch(UiEvent::Resize(geometry))
    }

    pub fn scroll(&mut self, geometry: Geometry) -> Transition {
        self.dispatch(UiEvent::Scroll(geometry))
    }

    fn dispatch(&mut self, event: UiEvent) -> Transition {
        let transition = self.controller.handle(event);
        self.apply(&transition.mutations);
        transition
    }

    fn classify_click(&self, node: NodeId) -> ClickTarget {
        let bindings = &self.bindings;
        if self.document.contains(bindings.results, node) {
            return match self.document.closest(node, &bindings.row_selector) {
                Some(row) if self.document.contains(bindings.results, row) => {
                    ClickTarget::ResultRow(
                        self.document
                            .element(row)
                            .and_then(|row| row.attr("data-link"))
                            .filter(|link| !link.is_empty())
                            .map(PageId::from),
                    )
                }
                _ => ClickTarget::SearchResults,
            };
        }
        if bindings.input == Some(node) {
            return ClickTarget::SearchInput;
        }
        bindings
            .controls
            .iter()
            .position(|control| self.document.contains(*control, node))
            .map_or(ClickTarget::Elsewhere, ClickTarget::NavControl)
    }

    fn apply(&mut self, mutations: &[ViewMutation]) {
        for mutation in mutations {
            match mutation {
                ViewMutation::SetVisible { target, visible } => {
                    let node = match target {
                        MutationTarget::Section(page) => self.section_node(page.as_str()),
                        MutationTarget::SearchResults => Some(self.bindings.results),
                    };
                    let display = if *visible { "block" } else { "none" };
                    if let Some(node) = node {
                        self.document
                            .update_element(node, |element| element.set_style("display", display));
                    }
                }
                ViewMutation::SetActive { control, active } => {
                    let Some(node) = self.bindings.controls.get(*control).copied() else {
                        continue;
                    };
                    let class = &self.bindings.active_class;
                    self.document.update_element(node, |element| {
                        if *active {
                            element.add_class(class);
                        } else {
                            element.remove_class(class);
                        }
                    });
                }
                ViewMutation::ReplaceResults { html } => {
                    self.document
                        .replace_children_with_html(self.bindings.results, html);
                }
                ViewMutation::PositionResults { left, top, width } => {
                    self.document.update_element(self.bindings.results, |element| {
                        element.set_style("position", "absolute");
                        element.set_style("left", &format!("{left}px"));
                        element.set_style("top", &format!("{top}px"));
                        element.set_style("width", &format!("{width}px"));
                    });
                }
                ViewMutation::StyleResults { declarations } => {
                    self.document.update_element(self.bindings.results, |element| {
                        for declaration in declarations {
                            element.set_style(&declaration.property, &declaration.value);
                        }
                    });
                }
                ViewMutation::SetInputValue { value } => {
                    if let Some(input) = self.bindings.input {
                        self.document
                            .update_element(input, |element| element.set_value(value));
                    }
                }
            }
        }
    }
}
