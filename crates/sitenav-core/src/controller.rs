//! Single owner of the router and dropdown state.
//!
//! Hosts build one controller per page, call [`SiteController::start`] once,
//! then feed it every UI event. Each call returns the mutations to apply.

use tracing::{debug, warn};

use crate::catalog::{Catalog, PageId};
use crate::dropdown::SearchDropdown;
use crate::event::{ClickTarget, Key, UiEvent};
use crate::mutation::ViewMutation;
use crate::nav::NavControl;
use crate::router::{NavigationOutcome, PageRouter, RouterSettings};
use crate::search::SearchSettings;

/// Structure the host found in its document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteLayout {
    /// Ids of the content sections, in document order.
    pub sections: Vec<PageId>,
    /// Navigation controls, in document order.
    pub controls: Vec<NavControl>,
    pub has_search_input: bool,
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub mutations: Vec<ViewMutation>,
    /// The host must suppress the event's default action.
    pub default_prevented: bool,
    pub navigation: Option<NavigationOutcome>,
}

#[derive(Debug, Clone)]
pub struct SiteController {
    settings: RouterSettings,
    router: PageRouter,
    search: Option<SearchDropdown>,
    started: bool,
}

impl SiteController {
    pub fn new(
        layout: SiteLayout,
        router_settings: RouterSettings,
        search_settings: SearchSettings,
        catalog: Catalog,
    ) -> Self {
        let search = if layout.has_search_input {
            Some(SearchDropdown::new(catalog, search_settings))
        } else {
            warn!("search input not found; search is disabled");
            None
        };
        Self {
            settings: router_settings,
            router: PageRouter::new(layout.sections, layout.controls),
            search,
            started: false,
        }
    }

    pub fn router(&self) -> &PageRouter {
        &self.router
    }

    pub fn search(&self) -> Option<&SearchDropdown> {
        self.search.as_ref()
    }

    pub fn dropdown_visible(&self) -> bool {
        self.search.as_ref().is_some_and(SearchDropdown::is_visible)
    }

    /// Startup: prepare the results panel and show the home page.
    /// Only the first call has any effect.
    pub fn start(&mut self) -> Transition {
        if self.started {
            warn!("site controller already started");
            return Transition::default();
        }
        self.started = true;
        let mut mutations = Vec::new();
        if let Some(search) = self.search.as_mut() {
            search.install(&mut mutations);
        }
        let home = self.settings.home.clone();
        let outcome = self.router.navigate_to(home.as_str(), &mut mutations);
        Transition {
            mutations,
            navigation: Some(outcome),
            ..Default::default()
        }
    }

    /// Navigate outside of any UI event.
    pub fn navigate_to(&mut self, page: &str) -> Transition {
        let mut mutations = Vec::new();
        let outcome = self.router.navigate_to(page, &mut mutations);
        Transition {
            mutations,
            navigation: Some(outcome),
            ..Default::default()
        }
    }

    pub fn handle(&mut self, event: UiEvent) -> Transition {
        let mut transition = Transition::default();
        match event {
            UiEvent::Input { value, geometry } => {
                if let Some(search) = self.search.as_mut() {
                    search.on_input(&value, geometry, &mut transition.mutations);
                }
            }
            UiEvent::KeyDown { key: Key::Enter } => {
                if let Some(search) = self.search.as_mut() {
                    transition.default_prevented = true;
                    if let Some(page) = search.take_first_match(&mut transition.mutations) {
                        navigate(&mut self.router, &page, &mut transition);
                    }
                }
            }
            UiEvent::KeyDown { key: Key::Other(_) } => {}
            UiEvent::Click { target } => self.handle_click(target, &mut transition),
            UiEvent::Resize(geometry) | UiEvent::Scroll(geometry) => {
                if let Some(search) = self.search.as_mut() {
                    search.on_viewport_change(geometry, &mut transition.mutations);
                }
            }
        }
        transition
    }

    fn handle_click(&mut self, target: ClickTarget, transition: &mut Transition) {
        match target {
            ClickTarget::NavControl(index) => {
                transition.default_prevented = true;
                match self.router.page_for_control(index) {
                    Some(page) => {
                        navigate(&mut self.router, &page, transition);
                    }
                    None => debug!(control = index, "navigation control has no page"),
                }
                // The control lies outside the input and the panel.
                if let Some(search) = self.search.as_mut() {
                    search.on_outside_click(&mut transition.mutations);
                }
            }
            ClickTarget::ResultRow(Some(page)) => {
                if let Some(search) = self.search.as_mut() {
                    navigate(&mut self.router, &page, transition);
                    search.dismiss(&mut transition.mutations);
                }
            }
            ClickTarget::ResultRow(None)
            | ClickTarget::SearchResults
            | ClickTarget::SearchInput => {}
            ClickTarget::Elsewhere => {
                if let Some(search) = self.search.as_mut() {
                    search.on_outside_click(&mut transition.mutations);
                }
            }
        }
    }
}

fn navigate(router: &mut PageRouter, page: &PageId, transition: &mut Transition) {
    let outcome = router.navigate_to(page.as_str(), &mut transition.mutations);
    transition.navigation = Some(outcome);
}
