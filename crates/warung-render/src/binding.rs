//! # Render Binding
//!
//! Projects the site document onto presentation regions through a static
//! table of `(section, field, selector, slot)` rows. One field may feed
//! several regions. The table holds no state: every run re-derives region
//! content from the document, so binding twice gives the same page.
//!
//! ```text
//! SiteConfig ──resolve(field)──▶ Option<String> ──slot──▶ Presentation
//!                                   None ⇒ clear / remove
//! ```

use crate::fields::Field;
use crate::region::{Presentation, RegionTree};
use serde::Serialize;
use tracing::{debug, instrument};
use warung_core::{DirtySections, Section, SiteConfig};
use Field as F;
use Section as S;
use Slot::{Attribute, Markup, Text, Variable};

/// Where a resolved value goes in its region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Text content
    Text,
    /// Markup content
    Markup,
    /// A named attribute of the region
    Attribute(&'static str),
    /// A page-wide style variable; the selector is the variable name
    Variable,
}

/// One row of the binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub section: Section,
    pub field: Field,
    pub selector: &'static str,
    pub slot: Slot,
}

const fn row(section: Section, field: Field, selector: &'static str, slot: Slot) -> Binding {
    Binding {
        section,
        field,
        selector,
        slot,
    }
}

/// The page binding table, grouped by section
pub static BINDINGS: &[Binding] = &[
    row(S::Identity, F::BusinessName, ".logo-text", Text),
    row(S::Identity, F::BusinessName, ".footer-logo span", Text),
    row(S::Identity, F::BusinessName, ".footer-business-name", Text),
    row(S::Identity, F::HeroTitle, ".hero-title", Markup),
    row(S::Identity, F::HeroSubtitle, ".hero-subtitle", Text),
    row(S::Identity, F::OwnerName, ".chef-info h4", Text),
    row(S::Identity, F::OwnerTitle, ".chef-info p", Text),
    row(S::Identity, F::Story, ".story-text", Text),
    row(S::Identity, F::FooterDescription, ".footer-description", Text),
    row(S::Metadata, F::PageTitle, "title", Text),
    row(S::Metadata, F::PageTitle, r#"meta[property="og:title"]"#, Attribute("content")),
    row(S::Metadata, F::MetaDescription, r#"meta[name="description"]"#, Attribute("content")),
    row(
        S::Metadata,
        F::MetaDescription,
        r#"meta[property="og:description"]"#,
        Attribute("content"),
    ),
    row(S::Metadata, F::MetaKeywords, r#"meta[name="keywords"]"#, Attribute("content")),
    row(S::Metadata, F::OgImage, r#"meta[property="og:image"]"#, Attribute("content")),
    row(S::Metadata, F::Language, "html", Attribute("lang")),
    row(S::Branding, F::PrimaryColor, "--primary-color", Variable),
    row(S::Branding, F::SecondaryColor, "--secondary-color", Variable),
    row(S::Branding, F::AccentColor, "--accent-color", Variable),
    row(S::Branding, F::SuccessColor, "--success-color", Variable),
    row(S::Branding, F::PrimaryDark, "--primary-dark", Variable),
    row(S::Branding, F::SecondaryDark, "--secondary-dark", Variable),
    row(S::Imagery, F::Logo, ".logo", Attribute("src")),
    row(S::Imagery, F::Logo, ".footer-logo img", Attribute("src")),
    row(S::Imagery, F::HeroImage, ".hero-img", Attribute("src")),
    row(S::Imagery, F::OwnerPhoto, ".chef-img", Attribute("src")),
    row(S::Imagery, F::Favicon, r#"link[rel="icon"]"#, Attribute("href")),
    row(S::Imagery, F::Favicon, r#"link[rel="apple-touch-icon"]"#, Attribute("href")),
    row(S::Contact, F::OpeningHours, ".hero-hours", Text),
    row(S::Contact, F::PhoneLink, ".phone-link", Attribute("href")),
    row(S::Contact, F::GreetingLink, ".cta-nav", Attribute("href")),
    row(S::Contact, F::GreetingLink, ".whatsapp-float", Attribute("href")),
    row(S::Contact, F::ContactBlock, "#contact-info", Markup),
    row(S::Contact, F::FooterContact, "#footer-contact", Markup),
    row(S::Ordering, F::DeliveryBlock, "#delivery-info", Markup),
    row(S::Ordering, F::MinimumOrder, ".min-order", Text),
    row(S::Catalog, F::CategoryTabs, "#menu-tabs", Markup),
    row(S::Social, F::SocialLinks, "#footer-social", Markup),
    row(S::Map, F::MapEmbed, "#google-maps", Attribute("src")),
    row(S::Promotions, F::PromotionGrid, "#promo-grid", Markup),
    row(S::Highlights, F::HighlightGrid, "#about-features", Markup),
    row(S::Experiences, F::ExperienceGrid, "#experiences-grid", Markup),
];

/// Rows of one section
pub fn rows(section: Section) -> impl Iterator<Item = &'static Binding> {
    BINDINGS.iter().filter(move |b| b.section == section)
}

/// Every region selector the table writes to (variables excluded)
pub fn region_selectors() -> impl Iterator<Item = &'static str> {
    BINDINGS
        .iter()
        .filter(|b| b.slot != Slot::Variable)
        .map(|b| b.selector)
}

/// An empty in-memory page with every bound region declared
pub fn page_regions() -> RegionTree {
    RegionTree::with_regions(region_selectors())
}

/// What a binding pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindReport {
    /// Rows written with a value
    pub written: usize,
    /// Rows whose field was absent and whose target was cleared
    pub cleared: usize,
    /// Selectors with no region in the presentation
    pub missing: Vec<&'static str>,
}

impl BindReport {
    fn merge(&mut self, other: BindReport) {
        self.written += other.written;
        self.cleared += other.cleared;
        self.missing.extend(other.missing);
    }
}

/// Bind every section
#[instrument(skip_all)]
pub fn bind<P: Presentation + ?Sized>(doc: &SiteConfig, presentation: &mut P) -> BindReport {
    let mut report = BindReport::default();
    for section in Section::ALL {
        report.merge(bind_section(section, doc, presentation));
    }
    debug!(
        written = report.written,
        cleared = report.cleared,
        missing = report.missing.len(),
        "full bind complete"
    );
    report
}

/// Bind only the sections a mutator reported as dirty
#[instrument(skip_all, fields(sections = dirty.len()))]
pub fn refresh<P: Presentation + ?Sized>(
    dirty: &DirtySections,
    doc: &SiteConfig,
    presentation: &mut P,
) -> BindReport {
    let mut report = BindReport::default();
    for section in dirty.iter() {
        report.merge(bind_section(section, doc, presentation));
    }
    debug!(
        written = report.written,
        cleared = report.cleared,
        missing = report.missing.len(),
        "refresh complete"
    );
    report
}

/// Bind a single section
pub fn bind_section<P: Presentation + ?Sized>(
    section: Section,
    doc: &SiteConfig,
    presentation: &mut P,
) -> BindReport {
    let mut report = BindReport::default();
    for binding in rows(section) {
        apply(binding, doc, presentation, &mut report);
    }
    report
}

fn apply<P: Presentation + ?Sized>(
    binding: &Binding,
    doc: &SiteConfig,
    presentation: &mut P,
    report: &mut BindReport,
) {
    let selector = binding.selector;

    if binding.slot != Slot::Variable && !presentation.contains(selector) {
        debug!(selector, section = %binding.section, "region absent, skipping");
        report.missing.push(selector);
        return;
    }

    let value = binding.field.resolve(doc);
    if value.is_some() {
        report.written += 1;
    } else {
        report.cleared += 1;
    }

    match (binding.slot, value.as_deref()) {
        (Slot::Text, Some(text)) => presentation.set_text(selector, text),
        (Slot::Markup, Some(markup)) => presentation.set_markup(selector, markup),
        (Slot::Text | Slot::Markup, None) => presentation.clear(selector),
        (Slot::Attribute(name), Some(v)) => presentation.set_attribute(selector, name, v),
        (Slot::Attribute(name), None) => presentation.remove_attribute(selector, name),
        (Slot::Variable, Some(v)) => presentation.set_variable(selector, v),
        (Slot::Variable, None) => presentation.remove_variable(selector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use warung_core::Experience;

    const SITE: &str = r##"
        [identity]
        name = "Warung Mak Sari"
        tagline = "Masakan Rumahan Terlezat"
        description = "Cita rasa rumahan sejak dulu."
        owner_name = "Mak Sari"

        [contact]
        phone = "021-2345-6789"
        messaging_handle = "628123456789"

        [contact.social]
        instagram = "warungmaksari"

        [branding.colors]
        primary = "#FF6B35"
        secondary = "#CC2936"
        accent = "#FFD23F"

        [[catalog]]
        id = "makanan"
        label = "Makanan"
    "##;

    fn doc() -> SiteConfig {
        SiteConfig::from_toml(SITE).unwrap()
    }

    #[test]
    fn test_every_section_has_rows() {
        for section in Section::ALL {
            assert!(rows(section).next().is_some(), "no rows for {}", section);
        }
    }

    #[test]
    fn test_no_duplicate_targets() {
        let mut seen = HashSet::new();
        for b in BINDINGS {
            assert!(seen.insert((b.selector, b.slot)), "duplicate {}", b.selector);
        }
    }

    #[test]
    fn test_bind_is_idempotent() {
        let doc = doc();
        let mut page = page_regions();

        bind(&doc, &mut page);
        let first = page.to_json().unwrap();
        bind(&doc, &mut page);
        let second = page.to_json().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_name_fills_three_regions() {
        let mut page = page_regions();
        bind(&doc(), &mut page);

        for selector in [".logo-text", ".footer-logo span", ".footer-business-name"] {
            assert_eq!(page.content(selector), Some("Warung Mak Sari"));
        }
    }

    #[test]
    fn test_branding_variables() {
        let mut page = RegionTree::new();
        bind_section(Section::Branding, &doc(), &mut page);

        assert_eq!(page.variable("--primary-color"), Some("#FF6B35"));
        assert_eq!(page.variable("--primary-dark"), Some("#e5511b"));
        assert_eq!(page.variable("--success-color"), Some("#27AE60"));
    }

    #[test]
    fn test_absent_optional_clears_target() {
        let mut doc = doc();
        let mut page = page_regions();
        bind(&doc, &mut page);
        assert!(page.content(".chef-info h4").is_some());

        doc.identity.owner_name = None;
        bind_section(Section::Identity, &doc, &mut page);
        assert_eq!(page.content(".chef-info h4"), None);
        assert_eq!(page.content(".story-text"), None);
    }

    #[test]
    fn test_absent_social_handles_are_omitted() {
        let page = {
            let mut page = page_regions();
            bind(&doc(), &mut page);
            page
        };
        let social = page.content("#footer-social").unwrap();
        assert!(social.contains("instagram.com&#x2F;warungmaksari"));
        assert!(!social.contains("facebook"));
        assert!(!social.contains("tiktok"));
    }

    #[test]
    fn test_absent_region_is_noop() {
        let mut page = RegionTree::new().with_region(".logo-text");
        let report = bind(&doc(), &mut page);

        assert_eq!(page.content(".logo-text"), Some("Warung Mak Sari"));
        assert!(report.missing.contains(&"#menu-tabs"));
        assert_eq!(page.selectors().count(), 1);
    }

    #[test]
    fn test_missing_handle_still_renders() {
        let mut doc = doc();
        doc.contact.messaging_handle.clear();

        let mut page = page_regions();
        bind(&doc, &mut page);

        assert_eq!(page.content(".logo-text"), Some("Warung Mak Sari"));
        assert_eq!(page.attribute(".cta-nav", "href"), None);
        assert!(page.content("#contact-info").is_some());
    }

    #[test]
    fn test_experiences_grid_bound() {
        let mut doc = doc();
        let mut page = page_regions();
        bind(&doc, &mut page);
        assert_eq!(page.content("#experiences-grid"), None);

        doc.experiences.push(Experience {
            title: "Kelas Masak".into(),
            description: "Belajar rendang".into(),
            price: Some(350000),
            availability: None,
            badge: None,
            featured: true,
        });
        bind_section(Section::Experiences, &doc, &mut page);

        let grid = page.content("#experiences-grid").unwrap();
        assert!(grid.starts_with(r#"<div class="experience-card featured">"#));
        assert!(grid.contains("Rp 350.000"));
    }

    #[test]
    fn test_refresh_touches_only_dirty_sections() {
        let mut doc = doc();
        let mut page = page_regions();
        bind(&doc, &mut page);

        let dirty = doc.recolor("#112233", "#445566", "#778899");
        doc.identity.name = "Not Yet Rebound".into();
        refresh(&dirty, &doc, &mut page);

        assert_eq!(page.variable("--primary-color"), Some("#112233"));
        assert_eq!(page.content(".logo-text"), Some("Warung Mak Sari"));
    }

    #[test]
    fn test_rename_refreshes_name_and_greeting() {
        let mut doc = doc();
        let mut page = page_regions();
        bind(&doc, &mut page);

        let dirty = doc.rename("Warung Bu Tini");
        refresh(&dirty, &doc, &mut page);

        assert_eq!(page.content(".footer-business-name"), Some("Warung Bu Tini"));
        assert!(page
            .attribute(".whatsapp-float", "href")
            .unwrap()
            .contains("Warung%20Bu%20Tini"));
    }
}
