//! Incremental search dropdown state machine.
//!
//! `HIDDEN` and `SHOWING(matches)`; matches are recomputed on every keystroke
//! and the panel is re-anchored under the input whenever it is shown or the
//! viewport moves while it is visible. Every keystroke carries the input's
//! geometry at that moment, so the panel never opens at a stale position.

use tracing::debug;

use crate::catalog::{Catalog, PageEntry, PageId};
use crate::geometry::{Geometry, Placement};
use crate::mutation::{MutationTarget, ViewMutation};
use crate::search::{RenderedResults, SearchSettings};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropdownState {
    pub visible: bool,
    /// Current value of the search input.
    pub query: String,
    /// Matches for `query`, in catalog order.
    pub matches: Vec<PageEntry>,
}

#[derive(Debug, Clone)]
pub struct SearchDropdown {
    catalog: Catalog,
    settings: SearchSettings,
    state: DropdownState,
    geometry: Geometry,
}

impl SearchDropdown {
    pub fn new(catalog: Catalog, settings: SearchSettings) -> Self {
        Self {
            catalog,
            settings,
            state: DropdownState::default(),
            geometry: Geometry::default(),
        }
    }

    pub fn state(&self) -> &DropdownState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn placement(&self) -> Placement {
        Placement::below(&self.geometry, self.settings.offset_px)
    }

    /// Initial panel setup: static styling, starting hidden.
    pub fn install(&mut self, out: &mut Vec<ViewMutation>) {
        out.push(ViewMutation::StyleResults {
            declarations: self.settings.panel.declarations(),
        });
        self.hide(out);
    }

    pub fn find_matches(&self, query: &str) -> Vec<PageEntry> {
        self.catalog
            .find_matches(query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn on_input(&mut self, value: &str, geometry: Geometry, out: &mut Vec<ViewMutation>) {
        self.geometry = geometry;
        self.state.query = value.to_string();
        self.state.matches = self.find_matches(value);
        let rendered = RenderedResults::for_query(value, &self.state.matches);
        if !rendered.is_visible() {
            self.hide(out);
            return;
        }
        out.push(ViewMutation::ReplaceResults {
            html: rendered.to_html(&self.settings),
        });
        out.push(ViewMutation::position(self.placement()));
        out.push(ViewMutation::show(MutationTarget::SearchResults));
        self.state.visible = true;
        debug!(
            query = %self.state.query,
            matches = self.state.matches.len(),
            "search dropdown updated"
        );
    }

    /// Enter: pick the first match of the current query, then hide and clear.
    pub fn take_first_match(&mut self, out: &mut Vec<ViewMutation>) -> Option<PageId> {
        let first = self
            .catalog
            .find_matches(&self.state.query)
            .first()
            .map(|entry| entry.link.clone());
        self.dismiss(out);
        first
    }

    /// A row was chosen: hide and clear. The caller navigates.
    pub fn dismiss(&mut self, out: &mut Vec<ViewMutation>) {
        self.hide(out);
        self.state.query.clear();
        self.state.matches.clear();
        out.push(ViewMutation::SetInputValue {
            value: String::new(),
        });
    }

    /// Click outside both the input and the panel. The query is kept.
    pub fn on_outside_click(&mut self, out: &mut Vec<ViewMutation>) {
        if self.state.visible {
            self.hide(out);
        }
    }

    pub fn on_viewport_change(&mut self, geometry: Geometry, out: &mut Vec<ViewMutation>) {
        self.geometry = geometry;
        if self.state.visible {
            out.push(ViewMutation::position(self.placement()));
        }
    }

    fn hide(&mut self, out: &mut Vec<ViewMutation>) {
        self.state.visible = false;
        out.push(ViewMutation::hide(MutationTarget::SearchResults));
    }
}
