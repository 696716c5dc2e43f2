//! Which content section is shown, and which navigation control is active.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::PageId;
use crate::mutation::{MutationTarget, ViewMutation};
use crate::nav::NavControl;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Page shown at startup.
    pub home: PageId,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            home: PageId::from("home"),
        }
    }
}

/// No history is kept: a navigation overwrites `current`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterState {
    pub current: Option<PageId>,
    pub active_control: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Shown(PageId),
    /// No section carries the id; every section is now hidden.
    Missing(PageId),
}

impl NavigationOutcome {
    pub fn is_shown(&self) -> bool {
        matches!(self, NavigationOutcome::Shown(_))
    }
}

#[derive(Debug, Clone)]
pub struct PageRouter {
    sections: Vec<PageId>,
    controls: Vec<NavControl>,
    state: RouterState,
}

impl PageRouter {
    pub fn new(sections: Vec<PageId>, controls: Vec<NavControl>) -> Self {
        Self {
            sections,
            controls,
            state: RouterState::default(),
        }
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn current(&self) -> Option<&PageId> {
        self.state.current.as_ref()
    }

    pub fn sections(&self) -> &[PageId] {
        &self.sections
    }

    pub fn controls(&self) -> &[NavControl] {
        &self.controls
    }

    pub fn has_section(&self, page: &str) -> bool {
        self.sections.iter().any(|section| section.as_str() == page)
    }

    /// First control, in enumeration order, that refers to `page`.
    pub fn active_control_for(&self, page: &PageId) -> Option<usize> {
        self.controls
            .iter()
            .position(|control| control.refers_to(page))
    }

    /// Page a click on the control at `index` navigates to.
    pub fn page_for_control(&self, index: usize) -> Option<PageId> {
        self.controls.get(index)?.target_page()
    }

    /// Hide every section, then show `page` if it exists, then move the
    /// active marker. Unknown ids leave nothing visible and nothing active.
    pub fn navigate_to(&mut self, page: &str, out: &mut Vec<ViewMutation>) -> NavigationOutcome {
        let page = PageId::from(page);
        out.extend(
            self.sections
                .iter()
                .map(|section| ViewMutation::hide(MutationTarget::Section(section.clone()))),
        );

        let outcome = if self.has_section(page.as_str()) {
            out.push(ViewMutation::show(MutationTarget::Section(page.clone())));
            self.state.current = Some(page.clone());
            debug!(page = %page, "navigated");
            NavigationOutcome::Shown(page.clone())
        } else {
            self.state.current = None;
            warn!(page = %page, "navigation target section not found");
            NavigationOutcome::Missing(page.clone())
        };

        out.extend((0..self.controls.len()).map(|control| ViewMutation::SetActive {
            control,
            active: false,
        }));
        self.state.active_control = if outcome.is_shown() {
            self.active_control_for(&page)
        } else {
            None
        };
        if let Some(control) = self.state.active_control {
            out.push(ViewMutation::SetActive {
                control,
                active: true,
            });
        }
        outcome
    }
}
