use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Opaque identifier of a content section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One searchable catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub link: PageId,
}

impl PageEntry {
    pub fn new(title: &str, keywords: &[&str], link: &str) -> Self {
        Self {
            title: title.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            link: PageId::from(link),
        }
    }

    /// `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(needle))
    }
}

/// Ordered, immutable list of searchable pages.
///
/// Several entries may share a `link`; they are sub-topics of one page and
/// are kept as separate rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<PageEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<PageEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search over titles and keywords.
    ///
    /// A blank query means "no search" and yields nothing. Results keep
    /// catalog declaration order.
    pub fn find_matches(&self, query: &str) -> Vec<&PageEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            PageEntry::new("Home", &["home", "landing"], "home"),
            PageEntry::new(
                "About Us",
                &["about", "vision", "mission", "recognition"],
                "aboutus",
            ),
            PageEntry::new(
                "PCP Sikar (Institutions)",
                &["pcp", "career pioneer", "pcp sikar"],
                "institutions",
            ),
            PageEntry::new(
                "Prince Academy (Institutions)",
                &["academy", "prince academy", "school", "cbse"],
                "institutions",
            ),
            PageEntry::new(
                "Prince Defence Academy (Institutions)",
                &["defence", "nda", "airforce", "navy"],
                "institutions",
            ),
            PageEntry::new(
                "Prince College (Institutions)",
                &["college", "bsc", "ba", "bcom", "mca"],
                "institutions",
            ),
            PageEntry::new("NEET Course", &["neet", "medical"], "courses"),
            PageEntry::new("IIT JEE Course", &["jee", "iit", "engineering"], "courses"),
            PageEntry::new("NDA Course", &["nda", "defence course"], "courses"),
            PageEntry::new(
                "Results",
                &["results", "toppers", "ranks", "selections"],
                "results",
            ),
            PageEntry::new(
                "Facilities",
                &["hostel", "library", "sports", "canteen", "medical"],
                "facilities",
            ),
            PageEntry::new(
                "Contact Us",
                &["contact", "email", "phone", "address", "admission"],
                "contactus",
            ),
        ])
    }
}
