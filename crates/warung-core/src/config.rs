//! # Site Configuration
//!
//! The site document: identity, contact, branding, catalog, ordering policy
//! and feature flags for one business. Loaded once from `config/site.toml`.
//!
//! Optional content is `Option<T>`. Required strings (`identity.name`,
//! `contact.phone`, `contact.messaging_handle`) default to empty so a
//! broken document still loads and the validator can report what is missing.

use crate::error::SiteResult;
use crate::money::CurrencyFormat;
use crate::section::{DirtySections, Section};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// The whole site document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub identity: Identity,

    #[serde(default)]
    pub contact: Contact,

    #[serde(default)]
    pub branding: Branding,

    /// Menu category tabs, in display order
    #[serde(default)]
    pub catalog: Vec<Category>,

    #[serde(default)]
    pub ordering: OrderingPolicy,

    #[serde(default)]
    pub features: FeatureFlags,

    #[serde(default)]
    pub website: Website,

    #[serde(default)]
    pub messaging: MessagingChannel,

    #[serde(default)]
    pub promotions: Vec<Promotion>,

    #[serde(default)]
    pub highlights: Vec<Highlight>,

    /// Bookable special experiences (private dining, catering, classes)
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

/// Business identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Business name (required)
    #[serde(default)]
    pub name: String,

    /// Tagline; the last word is highlighted in the hero title
    #[serde(default)]
    pub tagline: Option<String>,

    /// Hero description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub owner_title: Option<String>,

    /// Year the business opened (e.g., "2003")
    #[serde(default)]
    pub established: Option<String>,

    /// About-section story
    #[serde(default)]
    pub story: Option<String>,
}

/// Contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Landline phone (required)
    #[serde(default)]
    pub phone: String,

    /// Messaging handle: digits only, country-code prefixed, no '+' (required)
    #[serde(default)]
    pub messaging_handle: String,

    /// Country mobile prefix the handle must start with
    #[serde(default = "default_handle_prefix")]
    pub handle_prefix: String,

    #[serde(default)]
    pub address: Option<Address>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub hours: Option<OperatingHours>,

    #[serde(default)]
    pub social: SocialHandles,
}

fn default_handle_prefix() -> String {
    "628".to_string()
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            phone: String::new(),
            messaging_handle: String::new(),
            handle_prefix: default_handle_prefix(),
            address: None,
            email: None,
            website: None,
            hours: None,
            social: SocialHandles::default(),
        }
    }
}

/// Street address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Landmark / directions
    #[serde(default)]
    pub notes: Option<String>,
}

impl Address {
    /// "street, city postal"
    pub fn one_line(&self) -> String {
        match &self.postal_code {
            Some(postal) => format!("{}, {} {}", self.street, self.city, postal),
            None => format!("{}, {}", self.street, self.city),
        }
    }
}

/// Operating hours ("HH:MM" strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub delivery_start: Option<String>,
    #[serde(default)]
    pub delivery_end: Option<String>,
}

impl OperatingHours {
    /// Delivery window, only when both ends are configured
    pub fn delivery_window(&self) -> Option<(&str, &str)> {
        match (&self.delivery_start, &self.delivery_end) {
            (Some(start), Some(end)) => Some((start.as_str(), end.as_str())),
            _ => None,
        }
    }
}

/// Social profile handles; an empty string counts as absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialHandles {
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub tiktok: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
}

impl SocialHandles {
    /// Configured profiles as (network, profile URL), in display order
    pub fn profiles(&self) -> Vec<(SocialNetwork, String)> {
        [
            (SocialNetwork::Instagram, &self.instagram),
            (SocialNetwork::Facebook, &self.facebook),
            (SocialNetwork::TikTok, &self.tiktok),
            (SocialNetwork::YouTube, &self.youtube),
        ]
        .into_iter()
        .filter_map(|(network, handle)| {
            handle
                .as_deref()
                .filter(|h| !h.trim().is_empty())
                .map(|h| (network, network.profile_url(h)))
        })
        .collect()
    }
}

/// Supported social networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Instagram,
    Facebook,
    TikTok,
    YouTube,
}

impl SocialNetwork {
    pub fn label(&self) -> &'static str {
        match self {
            SocialNetwork::Instagram => "Instagram",
            SocialNetwork::Facebook => "Facebook",
            SocialNetwork::TikTok => "TikTok",
            SocialNetwork::YouTube => "YouTube",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SocialNetwork::Instagram => "📸",
            SocialNetwork::Facebook => "📘",
            SocialNetwork::TikTok => "🎵",
            SocialNetwork::YouTube => "📺",
        }
    }

    pub fn profile_url(&self, handle: &str) -> String {
        match self {
            SocialNetwork::Instagram => format!("https://instagram.com/{}", handle),
            SocialNetwork::Facebook => format!("https://facebook.com/{}", handle),
            SocialNetwork::TikTok => format!("https://tiktok.com/@{}", handle),
            SocialNetwork::YouTube => format!("https://youtube.com/@{}", handle),
        }
    }
}

/// Visual branding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default)]
    pub colors: Palette,
    #[serde(default)]
    pub images: Images,
}

/// Color palette as `#RRGGBB` strings. Stored raw; the validator checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    #[serde(default)]
    pub success: Option<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#FF6B35".to_string(),
            secondary: "#CC2936".to_string(),
            accent: "#FFD23F".to_string(),
            success: None,
        }
    }
}

impl Palette {
    /// Fallback for the success color when none is configured
    pub const DEFAULT_SUCCESS: &'static str = "#27AE60";

    /// Every configured entry as (field name, value)
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
        ];
        if let Some(success) = &self.success {
            entries.push(("success", success.as_str()));
        }
        entries
    }

    pub fn success_or_default(&self) -> &str {
        self.success.as_deref().unwrap_or(Self::DEFAULT_SUCCESS)
    }
}

/// Image URIs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub hero_background: Option<String>,
    #[serde(default)]
    pub owner_photo: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
}

/// A menu category tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Ordering and delivery policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingPolicy {
    /// Whether delivery ordering is offered at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum cart total accepted at checkout
    #[serde(default = "default_minimum_order")]
    pub minimum_order: u64,

    /// Delivery fee tiers, nearest first
    #[serde(default)]
    pub delivery_tiers: Vec<DeliveryTier>,

    #[serde(default)]
    pub delivery_time: Option<DeliveryTime>,

    /// Accepted payment method labels
    #[serde(default)]
    pub payment_methods: Vec<String>,

    #[serde(default)]
    pub currency: CurrencyFormat,
}

fn default_minimum_order() -> u64 {
    25000
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            minimum_order: default_minimum_order(),
            delivery_tiers: Vec::new(),
            delivery_time: None,
            payment_methods: Vec::new(),
            currency: CurrencyFormat::default(),
        }
    }
}

/// One delivery fee tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTier {
    /// Distance band label (e.g., "0-3km")
    pub distance: String,
    pub fee: u64,
    /// Display override for the fee (e.g., "GRATIS")
    #[serde(default)]
    pub description: Option<String>,
}

/// Estimated delivery time in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub min: u32,
    pub max: u32,
}

/// Feature flags gating optional page sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default = "default_true")]
    pub show_about: bool,
    #[serde(default = "default_true")]
    pub show_gallery: bool,
    #[serde(default = "default_true")]
    pub show_testimonials: bool,
    #[serde(default = "default_true")]
    pub show_promo: bool,
    #[serde(default = "default_true")]
    pub show_delivery_info: bool,
    #[serde(default = "default_true")]
    pub show_contact_form: bool,
    /// Cart ordering; when off, order buttons hand off a single item directly
    #[serde(default = "default_true")]
    pub enable_cart: bool,
    #[serde(default = "default_true")]
    pub enable_messaging_order: bool,
    #[serde(default = "default_true")]
    pub show_prices: bool,
    #[serde(default = "default_true")]
    pub show_experiences: bool,
    /// Reservation form; when off, reservation requests are refused
    #[serde(default = "default_true")]
    pub enable_reservations: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            show_about: true,
            show_gallery: true,
            show_testimonials: true,
            show_promo: true,
            show_delivery_info: true,
            show_contact_form: true,
            enable_cart: true,
            enable_messaging_order: true,
            show_prices: true,
            show_experiences: true,
            enable_reservations: true,
        }
    }
}

/// Page metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Website {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub map_embed_url: Option<String>,
}

/// External messaging channel and the copy used in outbound messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagingChannel {
    /// Deep-link host (e.g., "wa.me")
    #[serde(default = "default_messaging_domain")]
    pub domain: String,

    #[serde(default)]
    pub copy: MessageCopy,
}

fn default_messaging_domain() -> String {
    "wa.me".to_string()
}

impl Default for MessagingChannel {
    fn default() -> Self {
        Self {
            domain: default_messaging_domain(),
            copy: MessageCopy::default(),
        }
    }
}

/// Fixed phrases of outbound messages. `{name}` expands to the business name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCopy {
    pub greeting: String,
    pub order_heading: String,
    pub details_heading: String,
    pub total_label: String,
    pub closing: String,
    pub direct_order_intro: String,
    pub direct_order_closing: String,
    pub inquiry_heading: String,
    pub name_label: String,
    pub phone_label: String,
    pub email_label: String,
    pub message_label: String,
    pub not_provided: String,
    pub reservation_heading: String,
    pub guest_heading: String,
    pub booking_heading: String,
    pub date_label: String,
    pub time_label: String,
    pub guests_label: String,
    pub occasion_label: String,
    pub requests_label: String,
    pub reservation_closing: String,
}

impl Default for MessageCopy {
    fn default() -> Self {
        Self {
            greeting: "Halo {name}, saya ingin bertanya tentang menu".to_string(),
            order_heading: "PESANAN BARU - {name}".to_string(),
            details_heading: "Detail Pesanan:".to_string(),
            total_label: "Total".to_string(),
            closing: "Mohon konfirmasi pesanan dan info pengiriman. Terima kasih! 🙏".to_string(),
            direct_order_intro: "Halo {name}, saya ingin pesan:".to_string(),
            direct_order_closing: "Mohon info untuk pengiriman. Terima kasih!".to_string(),
            inquiry_heading: "PESAN BARU DARI WEBSITE".to_string(),
            name_label: "Nama".to_string(),
            phone_label: "Telepon".to_string(),
            email_label: "Email".to_string(),
            message_label: "Pesan".to_string(),
            not_provided: "Tidak diisi".to_string(),
            reservation_heading: "RESERVASI - {name}".to_string(),
            guest_heading: "Data Tamu:".to_string(),
            booking_heading: "Detail Reservasi:".to_string(),
            date_label: "Tanggal".to_string(),
            time_label: "Jam".to_string(),
            guests_label: "Jumlah Tamu".to_string(),
            occasion_label: "Acara".to_string(),
            requests_label: "Permintaan Khusus".to_string(),
            reservation_closing: "Mohon konfirmasi ketersediaan. Terima kasih! 🙏".to_string(),
        }
    }
}

/// A promotion card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// An about-section highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
}

/// A special experience card. `price` is raw currency units; `None` shows no price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub price: Option<u64>,
    /// Free text, e.g. "Setiap Sabtu" or "Min. 20 porsi"
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl SiteConfig {
    /// Load the document from a TOML string
    pub fn from_toml(toml_str: &str) -> SiteResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load the document from a JSON string (browser embedding)
    pub fn from_json(json: &str) -> SiteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Expand `{name}` in a copy template
    pub fn expand(&self, template: &str) -> String {
        template.replace("{name}", &self.identity.name)
    }

    /// Active promotions only
    pub fn active_promotions(&self) -> impl Iterator<Item = &Promotion> {
        self.promotions.iter().filter(|p| p.active)
    }

    // -------------------------------------------------------------------------
    // Mutators: patch one field group in place and report the stale sections.
    // -------------------------------------------------------------------------

    /// Rename the business
    pub fn rename(&mut self, name: impl Into<String>) -> DirtySections {
        self.identity.name = name.into();
        // the name also appears in the page title and in the greeting deep-link
        DirtySections::new()
            .with(Section::Identity)
            .with(Section::Metadata)
            .with(Section::Contact)
    }

    /// Replace the primary, secondary and accent colors
    pub fn recolor(
        &mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
        accent: impl Into<String>,
    ) -> DirtySections {
        let colors = &mut self.branding.colors;
        colors.primary = primary.into();
        colors.secondary = secondary.into();
        colors.accent = accent.into();
        DirtySections::new().with(Section::Branding)
    }

    /// Change the messaging handle
    pub fn change_handle(&mut self, handle: impl Into<String>) -> DirtySections {
        self.contact.messaging_handle = handle.into();
        DirtySections::new()
            .with(Section::Contact)
            .with(Section::Social)
    }

    /// Change phone, messaging handle and email together
    pub fn change_contact(
        &mut self,
        phone: impl Into<String>,
        handle: impl Into<String>,
        email: Option<String>,
    ) -> DirtySections {
        self.contact.phone = phone.into();
        self.contact.email = email;
        self.change_handle(handle)
    }
}
