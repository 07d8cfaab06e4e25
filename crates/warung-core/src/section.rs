//! # Presentation Sections
//!
//! Named groups of presentation regions. Each group is refreshed by one
//! sub-binding; document mutators report which groups they made stale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A group of regions refreshed together by one sub-binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Business name, tagline, description, owner, story
    Identity,
    /// Document title, meta description/keywords, Open Graph
    Metadata,
    /// Color palette variables and darkened variants
    Branding,
    /// Logo, hero, owner photo, favicon
    Imagery,
    /// Hours, greeting links, contact block, footer contact
    Contact,
    /// Delivery tiers, minimum order, payment methods
    Ordering,
    /// Menu category tabs
    Catalog,
    /// Social profile links
    Social,
    /// Embedded map
    Map,
    /// Active promotions
    Promotions,
    /// About-section highlights
    Highlights,
    /// Special experiences grid
    Experiences,
}

impl Section {
    /// Every section, in the order a full bind runs them
    pub const ALL: [Section; 12] = [
        Section::Branding,
        Section::Identity,
        Section::Metadata,
        Section::Imagery,
        Section::Contact,
        Section::Ordering,
        Section::Promotions,
        Section::Highlights,
        Section::Experiences,
        Section::Catalog,
        Section::Social,
        Section::Map,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Identity => "identity",
            Section::Metadata => "metadata",
            Section::Branding => "branding",
            Section::Imagery => "imagery",
            Section::Contact => "contact",
            Section::Ordering => "ordering",
            Section::Catalog => "catalog",
            Section::Social => "social",
            Section::Map => "map",
            Section::Promotions => "promotions",
            Section::Highlights => "highlights",
            Section::Experiences => "experiences",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections made stale by a document mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirtySections(BTreeSet<Section>);

impl DirtySections {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Every section is dirty (initial bind)
    pub fn all() -> Self {
        Section::ALL.iter().copied().collect()
    }

    pub fn mark(&mut self, section: Section) {
        self.0.insert(section);
    }

    /// Builder: mark a section
    pub fn with(mut self, section: Section) -> Self {
        self.mark(section);
        self
    }

    pub fn contains(&self, section: Section) -> bool {
        self.0.contains(&section)
    }

    pub fn merge(&mut self, other: DirtySections) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Section> for DirtySections {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
