//! # Presentation Regions
//!
//! The seam between the binding engine and whatever displays the page.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            Presentation (trait)              │
//! │  ├── contains()                              │
//! │  ├── set_text() / set_markup() / clear()     │
//! │  ├── set_attribute() / remove_attribute()    │
//! │  └── set_variable() / remove_variable()      │
//! └──────────────────────────────────────────────┘
//!                  ▲                ▲
//!          ┌───────┴──────┐  ┌──────┴───────┐
//!          │  RegionTree  │  │DomPresentation│
//!          │ (in memory)  │  │ (warung-wasm) │
//!          └──────────────┘  └──────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use warung_core::SiteResult;

/// A tree of addressable display regions.
///
/// Selectors name regions; a selector with no matching region is ignored by
/// every method. Variables are page-wide style variables (`--primary-color`).
pub trait Presentation {
    /// Whether `selector` addresses at least one region
    fn contains(&self, selector: &str) -> bool;

    /// Replace the region's content with plain text
    fn set_text(&mut self, selector: &str, text: &str);

    /// Replace the region's content with markup
    fn set_markup(&mut self, selector: &str, markup: &str);

    /// Empty the region
    fn clear(&mut self, selector: &str);

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str);

    fn remove_attribute(&mut self, selector: &str, name: &str);

    fn set_variable(&mut self, name: &str, value: &str);

    fn remove_variable(&mut self, name: &str);
}

/// Region content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Content {
    Text(String),
    Markup(String),
}

/// One declared region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// In-memory presentation tree.
///
/// Only declared regions accept writes, so it behaves like a page whose
/// markup lacks some slots. Serializes deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTree {
    regions: BTreeMap<String, Region>,
    variables: BTreeMap<String, String>,
}

impl RegionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree with the given regions declared and empty
    pub fn with_regions<'a>(selectors: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tree = Self::new();
        for selector in selectors {
            tree.declare(selector);
        }
        tree
    }

    /// Declare an empty region (no-op if it exists)
    pub fn declare(&mut self, selector: &str) {
        self.regions.entry(selector.to_string()).or_default();
    }

    /// Builder variant of [`RegionTree::declare`]
    pub fn with_region(mut self, selector: &str) -> Self {
        self.declare(selector);
        self
    }

    pub fn region(&self, selector: &str) -> Option<&Region> {
        self.regions.get(selector)
    }

    /// Text or markup currently in the region
    pub fn content(&self, selector: &str) -> Option<&str> {
        self.regions
            .get(selector)
            .and_then(|r| r.content.as_ref())
            .map(|c| match c {
                Content::Text(s) | Content::Markup(s) => s.as_str(),
            })
    }

    pub fn attribute(&self, selector: &str, name: &str) -> Option<&str> {
        self.regions
            .get(selector)
            .and_then(|r| r.attributes.get(name))
            .map(String::as_str)
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Serialized snapshot of every region and variable
    pub fn to_json(&self) -> SiteResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn region_mut(&mut self, selector: &str) -> Option<&mut Region> {
        self.regions.get_mut(selector)
    }
}

impl Presentation for RegionTree {
    fn contains(&self, selector: &str) -> bool {
        self.regions.contains_key(selector)
    }

    fn set_text(&mut self, selector: &str, text: &str) {
        if let Some(region) = self.region_mut(selector) {
            region.content = Some(Content::Text(text.to_string()));
        }
    }

    fn set_markup(&mut self, selector: &str, markup: &str) {
        if let Some(region) = self.region_mut(selector) {
            region.content = Some(Content::Markup(markup.to_string()));
        }
    }

    fn clear(&mut self, selector: &str) {
        if let Some(region) = self.region_mut(selector) {
            region.content = None;
        }
    }

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) {
        if let Some(region) = self.region_mut(selector) {
            region
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, selector: &str, name: &str) {
        if let Some(region) = self.region_mut(selector) {
            region.attributes.remove(name);
        }
    }

    fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    fn remove_variable(&mut self, name: &str) {
        self.variables.remove(name);
    }
}
