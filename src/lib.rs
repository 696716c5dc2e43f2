//! Single-page navigation and live search for a static site.
//!
//! [`SitePage`] mounts onto a parsed page, shows the home section, and keeps
//! the section visibility, the active navigation marker and the search
//! dropdown in sync as the host forwards UI events.

pub mod logging;
pub mod page;

pub use logging::init_tracing;
pub use page::{MountError, SitePage};
pub use sitenav_config::{ConfigError, DomBindings, SiteConfig};
pub use sitenav_core::{
    Catalog, ClickTarget, Geometry, NavigationOutcome, PageEntry, PageId, Rect, ScrollOffset,
    Transition,
};
pub use sitenav_dom::{NodeId, PageDocument, Selector};
