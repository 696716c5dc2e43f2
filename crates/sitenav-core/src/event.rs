//! UI events the host forwards to the controller.

use crate::catalog::PageId;
use crate::geometry::Geometry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        if name == "Enter" {
            Key::Enter
        } else {
            Key::Other(name.to_string())
        }
    }
}

/// What a click landed on, as classified by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the navigation control at this index.
    NavControl(usize),
    /// On a dropdown row; `None` for the placeholder row.
    ResultRow(Option<PageId>),
    /// Inside the dropdown but not on a row.
    SearchResults,
    /// The search input itself.
    SearchInput,
    Elsewhere,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The search input's value changed; `geometry` is the input's rectangle
    /// and the page scroll at that moment.
    Input { value: String, geometry: Geometry },
    /// Key pressed while the search input has focus.
    KeyDown { key: Key },
    Click { target: ClickTarget },
    Resize(Geometry),
    Scroll(Geometry),
}
