//! Dropdown rendering: settings, markup and escaping.

use serde::{Deserialize, Serialize};

use crate::catalog::{PageEntry, PageId};
use crate::mutation::StyleDeclaration;

/// Visual styling applied to the floating results panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    pub background: String,
    pub border: String,
    pub border_radius_px: f64,
    pub box_shadow: String,
    pub z_index: i32,
    pub max_height_px: f64,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            border: "1px solid rgba(0,0,0,0.08)".to_string(),
            border_radius_px: 8.0,
            box_shadow: "0 6px 20px rgba(12,24,40,0.12)".to_string(),
            z_index: 9999,
            max_height_px: 260.0,
        }
    }
}

impl PanelStyle {
    pub fn declarations(&self) -> Vec<StyleDeclaration> {
        vec![
            StyleDeclaration::new("background", self.background.clone()),
            StyleDeclaration::new("border", self.border.clone()),
            StyleDeclaration::new("border-radius", format!("{}px", self.border_radius_px)),
            StyleDeclaration::new("box-shadow", self.box_shadow.clone()),
            StyleDeclaration::new("z-index", self.z_index.to_string()),
            StyleDeclaration::new("max-height", format!("{}px", self.max_height_px)),
            StyleDeclaration::new("overflow-y", "auto"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Gap between the input's bottom edge and the dropdown.
    pub offset_px: f64,
    pub row_class: String,
    pub placeholder_class: String,
    pub no_results_text: String,
    pub panel: PanelStyle,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            offset_px: 6.0,
            row_class: "sr-row".to_string(),
            placeholder_class: "sr-no".to_string(),
            no_results_text: "No results found".to_string(),
            panel: PanelStyle::default(),
        }
    }
}

/// A selectable dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub link: PageId,
}

/// What the dropdown shows for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedResults {
    /// Blank query: the dropdown is not shown at all.
    Hidden,
    /// Non-blank query without matches: a single inert placeholder row.
    NoResults,
    Rows(Vec<ResultRow>),
}

impl RenderedResults {
    pub fn for_query(query: &str, matches: &[PageEntry]) -> Self {
        if query.trim().is_empty() {
            return RenderedResults::Hidden;
        }
        if matches.is_empty() {
            return RenderedResults::NoResults;
        }
        RenderedResults::Rows(
            matches
                .iter()
                .map(|entry| ResultRow {
                    title: entry.title.clone(),
                    link: entry.link.clone(),
                })
                .collect(),
        )
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, RenderedResults::Hidden)
    }

    /// Markup for the dropdown body. Titles are escaped so catalog text can
    /// never introduce elements.
    pub fn to_html(&self, settings: &SearchSettings) -> String {
        match self {
            RenderedResults::Hidden => String::new(),
            RenderedResults::NoResults => format!(
                r#"<div class="{}">{}</div>"#,
                escape_attribute(&settings.placeholder_class),
                escape_text(&settings.no_results_text)
            ),
            RenderedResults::Rows(rows) => rows
                .iter()
                .map(|row| {
                    format!(
                        r#"<div class="{}" data-link="{}">{}</div>"#,
                        escape_attribute(&settings.row_class),
                        escape_attribute(row.link.as_str()),
                        escape_text(&row.title)
                    )
                })
                .collect(),
        }
    }
}

pub fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn escape_attribute(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}
