use serde::{Deserialize, Serialize};

use crate::catalog::PageId;
use crate::geometry::Placement;

/// Element a visibility change applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum MutationTarget {
    Section(PageId),
    SearchResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
}

impl StyleDeclaration {
    pub fn new(property: &str, value: impl Into<String>) -> Self {
        Self {
            property: property.to_string(),
            value: value.into(),
        }
    }
}

/// Document change requested by the controller.
///
/// Serde uses an internal tag `type` in snake_case so hosts running the
/// document elsewhere can receive mutations as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewMutation {
    /// Toggle the visibility flag (`display: block` / `none`).
    SetVisible {
        target: MutationTarget,
        visible: bool,
    },
    /// Add or remove the active marker on the navigation control at `control`
    /// (index in the order the host reported controls).
    SetActive { control: usize, active: bool },
    /// Replace the dropdown's content with pre-escaped markup.
    ReplaceResults { html: String },
    /// Absolutely position the dropdown at page coordinates.
    PositionResults { left: f64, top: f64, width: f64 },
    /// Static panel styling, emitted once when search starts.
    StyleResults {
        declarations: Vec<StyleDeclaration>,
    },
    /// Overwrite the search input's value.
    SetInputValue { value: String },
}

impl ViewMutation {
    pub fn show(target: MutationTarget) -> Self {
        Self::SetVisible {
            target,
            visible: true,
        }
    }

    pub fn hide(target: MutationTarget) -> Self {
        Self::SetVisible {
            target,
            visible: false,
        }
    }

    pub fn position(placement: Placement) -> Self {
        Self::PositionResults {
            left: placement.left,
            top: placement.top,
            width: placement.width,
        }
    }
}
