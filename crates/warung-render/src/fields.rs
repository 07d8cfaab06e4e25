//! # Bound Fields
//!
//! Every document value the page shows, as a closed set. Resolving a field
//! yields `None` when the document does not provide it; the binder then
//! clears the target instead of writing a placeholder.

use crate::fragments;
use warung_core::{darken, greeting_link, SiteConfig};

/// How much the derived "dark" palette variants are darkened, in percent
pub const DARKEN_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    // identity
    BusinessName,
    HeroTitle,
    HeroSubtitle,
    OwnerName,
    OwnerTitle,
    Story,
    FooterDescription,

    // metadata
    PageTitle,
    MetaDescription,
    MetaKeywords,
    OgImage,
    Language,

    // branding
    PrimaryColor,
    SecondaryColor,
    AccentColor,
    SuccessColor,
    PrimaryDark,
    SecondaryDark,

    // imagery
    Logo,
    HeroImage,
    OwnerPhoto,
    Favicon,

    // contact
    OpeningHours,
    PhoneLink,
    GreetingLink,
    ContactBlock,
    FooterContact,

    // ordering
    DeliveryBlock,
    MinimumOrder,

    CategoryTabs,
    SocialLinks,
    MapEmbed,
    PromotionGrid,
    HighlightGrid,
    ExperienceGrid,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(non_empty)
}

impl Field {
    /// Current value of this field in `doc`
    pub fn resolve(&self, doc: &SiteConfig) -> Option<String> {
        let identity = &doc.identity;
        let colors = &doc.branding.colors;
        let images = &doc.branding.images;

        match self {
            Field::BusinessName => non_empty(&identity.name),
            Field::HeroTitle => identity.tagline.as_deref().and_then(fragments::hero_title),
            Field::HeroSubtitle => present(&identity.description),
            Field::OwnerName => present(&identity.owner_name),
            Field::OwnerTitle => present(&identity.owner_title),
            Field::Story => present(&identity.story),
            Field::FooterDescription => footer_description(doc),

            Field::PageTitle => present(&doc.website.title).or_else(|| non_empty(&identity.name)),
            Field::MetaDescription => {
                present(&doc.website.description).or_else(|| present(&identity.description))
            }
            Field::MetaKeywords => present(&doc.website.keywords),
            Field::OgImage => present(&doc.website.og_image),
            Field::Language => present(&doc.website.language),

            Field::PrimaryColor => non_empty(&colors.primary),
            Field::SecondaryColor => non_empty(&colors.secondary),
            Field::AccentColor => non_empty(&colors.accent),
            Field::SuccessColor => non_empty(colors.success_or_default()),
            Field::PrimaryDark => darken(&colors.primary, DARKEN_PERCENT),
            Field::SecondaryDark => darken(&colors.secondary, DARKEN_PERCENT),

            Field::Logo => present(&images.logo),
            Field::HeroImage => present(&images.hero_background),
            Field::OwnerPhoto => present(&images.owner_photo),
            Field::Favicon => present(&images.favicon),

            Field::OpeningHours => doc
                .contact
                .hours
                .as_ref()
                .map(|h| format!("Buka: {} - {}", h.open, h.close)),
            Field::PhoneLink => fragments::tel_uri(&doc.contact.phone),
            Field::GreetingLink => {
                if doc.contact.messaging_handle.is_empty() {
                    None
                } else {
                    Some(greeting_link(doc))
                }
            }
            Field::ContactBlock => fragments::contact_block(doc),
            Field::FooterContact => fragments::footer_contact(doc),

            Field::DeliveryBlock => fragments::delivery_block(doc),
            Field::MinimumOrder => Some(format!(
                "Min. order {}",
                doc.ordering.currency.display(doc.ordering.minimum_order)
            )),

            Field::CategoryTabs => fragments::category_tabs(doc),
            Field::SocialLinks => fragments::social_links(doc),
            Field::MapEmbed => present(&doc.website.map_embed_url),
            Field::PromotionGrid => fragments::promotion_grid(doc),
            Field::HighlightGrid => fragments::highlight_grid(doc),
            Field::ExperienceGrid => fragments::experience_grid(doc),
        }
    }
}

// description, then the founding year when known
fn footer_description(doc: &SiteConfig) -> Option<String> {
    let description = present(&doc.identity.description);
    let since = present(&doc.identity.established).map(|year| format!("Melayani sejak {}.", year));

    match (description, since) {
        (Some(d), Some(s)) => Some(format!("{} {}", d, s)),
        (d, s) => d.or(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_variants() {
        let doc = SiteConfig::default();
        assert_eq!(Field::PrimaryDark.resolve(&doc).as_deref(), Some("#e5511b"));
        assert_eq!(Field::SuccessColor.resolve(&doc).as_deref(), Some("#27AE60"));
    }

    #[test]
    fn test_invalid_color_has_no_dark_variant() {
        let mut doc = SiteConfig::default();
        doc.branding.colors.secondary = "red".into();

        assert_eq!(Field::SecondaryColor.resolve(&doc).as_deref(), Some("red"));
        assert_eq!(Field::SecondaryDark.resolve(&doc), None);
    }

    #[test]
    fn test_page_title_falls_back_to_name() {
        let mut doc = SiteConfig::default();
        assert_eq!(Field::PageTitle.resolve(&doc), None);

        doc.identity.name = "Warung Mak Sari".into();
        assert_eq!(Field::PageTitle.resolve(&doc).as_deref(), Some("Warung Mak Sari"));

        doc.website.title = Some("Warung Mak Sari - Masakan Rumahan".into());
        assert_eq!(
            Field::PageTitle.resolve(&doc).as_deref(),
            Some("Warung Mak Sari - Masakan Rumahan")
        );
    }

    #[test]
    fn test_blank_optional_is_absent() {
        let mut doc = SiteConfig::default();
        doc.identity.owner_name = Some("   ".into());
        assert_eq!(Field::OwnerName.resolve(&doc), None);
    }

    #[test]
    fn test_greeting_link_needs_handle() {
        let mut doc = SiteConfig::default();
        doc.identity.name = "Warung".into();
        assert_eq!(Field::GreetingLink.resolve(&doc), None);

        doc.contact.messaging_handle = "628123456789".into();
        let link = Field::GreetingLink.resolve(&doc).unwrap();
        assert!(link.starts_with("https://wa.me/628123456789?text=Halo%20Warung"));
    }

    #[test]
    fn test_footer_description() {
        let mut doc = SiteConfig::default();
        doc.identity.established = Some("2003".into());
        assert_eq!(
            Field::FooterDescription.resolve(&doc).as_deref(),
            Some("Melayani sejak 2003.")
        );

        doc.identity.description = Some("Masakan rumahan terlezat.".into());
        assert_eq!(
            Field::FooterDescription.resolve(&doc).as_deref(),
            Some("Masakan rumahan terlezat. Melayani sejak 2003.")
        );
    }
}
