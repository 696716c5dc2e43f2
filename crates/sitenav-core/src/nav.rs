//! Navigation controls and how they map to pages.
//!
//! A control's page association is resolved once, when the host reports the
//! control. The legacy `onclick="showPage('id')"` form is parsed here and
//! never looked at again.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::PageId;

/// Lower-case and drop all whitespace: `" About  Us "` becomes `"aboutus"`.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn handler_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"showPage\(['"]([^'"]+)['"]\)"#).expect("static handler pattern")
    })
}

/// Page id named by an inline `showPage('...')` handler, if any.
pub fn parse_handler(handler: &str) -> Option<PageId> {
    handler_pattern()
        .captures(handler)
        .and_then(|captures| captures.get(1))
        .map(|id| PageId::from(id.as_str()))
}

/// Typed association of one navigation control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavControl {
    /// Page named by the legacy inline handler.
    pub handler_page: Option<PageId>,
    /// Page named by the structured `data-page` attribute.
    pub data_page: Option<PageId>,
    /// Normalized visible label.
    pub label: String,
}

impl NavControl {
    pub fn from_markup(handler: Option<&str>, data_page: Option<&str>, text: &str) -> Self {
        Self {
            handler_page: handler.and_then(parse_handler),
            data_page: data_page
                .map(str::trim)
                .filter(|page| !page.is_empty())
                .map(PageId::from),
            label: normalize_label(text),
        }
    }

    /// Page a click on this control navigates to.
    pub fn target_page(&self) -> Option<PageId> {
        self.handler_page
            .clone()
            .or_else(|| self.data_page.clone())
            .or_else(|| (!self.label.is_empty()).then(|| PageId::new(self.label.clone())))
    }

    /// Whether this control should carry the active marker for `page`.
    pub fn refers_to(&self, page: &PageId) -> bool {
        self.handler_page.as_ref() == Some(page)
            || self.data_page.as_ref() == Some(page)
            || (!self.label.is_empty() && self.label == normalize_label(page.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_normalization_strips_all_whitespace() {
        assert_eq!(normalize_label("  About \n Us "), "aboutus");
        assert_eq!(normalize_label("CONTACT\tus"), "contactus");
        assert_eq!(normalize_label("   "), "");
    }

    #[test]
    fn handler_accepts_both_quote_styles() {
        assert_eq!(parse_handler("showPage('courses')"), Some("courses".into()));
        assert_eq!(
            parse_handler(r#"track(); showPage("results"); return false;"#),
            Some("results".into())
        );
        assert_eq!(parse_handler("showPage(courses)"), None);
        assert_eq!(parse_handler("openMenu('x')"), None);
    }

    #[test]
    fn click_target_prefers_handler_then_attribute_then_label() {
        let control = NavControl::from_markup(Some("showPage('a')"), Some("b"), "C");
        assert_eq!(control.target_page(), Some("a".into()));

        let control = NavControl::from_markup(None, Some(" b "), "C");
        assert_eq!(control.target_page(), Some("b".into()));

        let control = NavControl::from_markup(Some("alert(1)"), Some(""), "Contact Us");
        assert_eq!(control.target_page(), Some("contactus".into()));

        let control = NavControl::from_markup(None, None, "  ");
        assert_eq!(control.target_page(), None);
    }

    #[test]
    fn refers_to_checks_every_association() {
        let control = NavControl::from_markup(Some("showPage('home')"), Some("landing"), "Start");
        assert!(control.refers_to(&"home".into()));
        assert!(control.refers_to(&"landing".into()));
        assert!(control.refers_to(&"START".into()));
        assert!(!control.refers_to(&"hom".into()));
    }

    #[test]
    fn label_match_normalizes_page_id() {
        let control = NavControl::from_markup(None, None, "About Us");
        assert!(control.refers_to(&"About Us".into()));
        assert!(control.refers_to(&"aboutus".into()));
    }
}
