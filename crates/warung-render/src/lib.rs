//! # warung-render
//!
//! Binding engine for the warung site.
//!
//! The site document is projected onto a presentation through a static table
//! of bindings, one sub-binding per [`Section`](warung_core::Section):
//!
//! 1. **bind** - every section, used once at load
//! 2. **refresh** - only the sections a document mutator reported as dirty
//! 3. **bind_section** - one section in isolation
//!
//! Any type implementing [`Presentation`] can be bound: the in-memory
//! [`RegionTree`] used by the HTTP server and tests, or the browser DOM.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warung_render::{bind, page_regions, refresh};
//!
//! let mut page = page_regions();
//! bind(&doc, &mut page);
//!
//! // Operator renames the business: only identity, metadata and contact rebind
//! let dirty = doc.rename("Warung Bu Tini");
//! refresh(&dirty, &doc, &mut page);
//! ```

pub mod binding;
pub mod fields;
pub mod fragments;
pub mod region;

// Re-exports
pub use binding::{
    bind, bind_section, page_regions, refresh, region_selectors, BindReport, Binding, Slot,
    BINDINGS,
};
pub use fields::{Field, DARKEN_PERCENT};
pub use region::{Content, Presentation, Region, RegionTree};
