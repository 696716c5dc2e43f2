//! Page router and incremental search dropdown for a single-page site.
//!
//! Everything here is a state machine over plain data: hosts report what
//! they found in their document ([`SiteLayout`]) and forward UI events
//! ([`UiEvent`]); the controller answers with [`ViewMutation`]s for the host
//! to apply. Nothing in this crate touches a document tree.

pub mod catalog;
pub mod controller;
pub mod dropdown;
pub mod event;
pub mod geometry;
pub mod mutation;
pub mod nav;
pub mod router;
pub mod search;

pub use catalog::{Catalog, PageEntry, PageId};
pub use controller::{SiteController, SiteLayout, Transition};
pub use dropdown::{DropdownState, SearchDropdown};
pub use event::{ClickTarget, Key, UiEvent};
pub use geometry::{Geometry, Placement, Rect, ScrollOffset};
pub use mutation::{MutationTarget, StyleDeclaration, ViewMutation};
pub use nav::{NavControl, normalize_label};
pub use router::{NavigationOutcome, PageRouter, RouterSettings, RouterState};
pub use search::{PanelStyle, RenderedResults, SearchSettings};
