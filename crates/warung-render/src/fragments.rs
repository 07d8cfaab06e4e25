//! # Markup Fragments
//!
//! Builders for the composite regions (contact block, delivery block, tabs,
//! cards). Each builder shapes a small view of the document and renders it
//! through a Tera template; the `.html` template names keep autoescaping on,
//! so document values never reach the page as raw markup. A builder returns
//! `None` when it has nothing to show, so the region is cleared rather than
//! filled with an empty shell.

use serde::Serialize;
use std::sync::OnceLock;
use tera::{Context, Tera};
use tracing::{error, warn};
use warung_core::{chat_link, SiteConfig};

const HERO_TITLE: &str = r#"
{%- if lead %}{{ lead }} {% endif %}<span class="highlight">{{ last }}</span>
"#;

const INFO_ITEMS: &str = r#"
{%- for item in items -%}
<div class="{{ class }}-item"><span class="{{ class }}-icon">{{ item.icon -}}
</span><div class="{{ class }}-text"><h3>{{ item.heading }}</h3>
{%- if item.links -%}
<div class="social-links">
{%- for link in item.links -%}
<a href="{{ link.href }}" target="_blank">{{ link.label }}</a>
{%- endfor -%}
</div>
{%- else -%}
<p>
{%- for line in item.lines -%}
{%- if not loop.first %}<br>{% endif -%}
{%- if line.href -%}
<a href="{{ line.href }}"{% if line.external %} target="_blank"{% endif %}>{{ line.text }}</a>
{%- else -%}
{{ line.text }}
{%- endif -%}
{%- endfor -%}
</p>
{%- endif -%}
</div></div>
{%- endfor -%}
"#;

const FOOTER_CONTACT: &str = r#"
{%- for line in lines -%}
<p>
{%- if line.prefix %}{{ line.prefix }} {% endif -%}
{%- if line.href -%}
<a href="{{ line.href }}"{% if line.external %} target="_blank"{% endif %}>{{ line.text }}</a>
{%- else -%}
{{ line.text }}
{%- endif -%}
</p>
{%- endfor -%}
"#;

const CATEGORY_TABS: &str = r#"
{%- for category in catalog -%}
<button class="tab-btn{% if loop.first %} active{% endif %}" data-tab="{{ category.id }}">
{%- if category.icon %}{{ category.icon }} {% endif %}{{ category.label }}</button>
{%- endfor -%}
"#;

const SOCIAL_LINKS: &str = r#"
{%- for link in links -%}
<a href="{{ link.href }}" target="_blank" aria-label="{{ link.label }}">{{ link.icon }}</a>
{%- endfor -%}
"#;

const PROMOTION_GRID: &str = r#"
{%- for promo in promotions -%}
<div class="promo-card">
{%- if promo.badge %}<div class="promo-badge">{{ promo.badge }}</div>{% endif -%}
<h3>{{ promo.title }}</h3><p>{{ promo.description }}</p>
{%- if promo.code %}<div class="promo-code">{{ promo.code }}</div>{% endif -%}
</div>
{%- endfor -%}
"#;

const HIGHLIGHT_GRID: &str = r#"
{%- for item in highlights -%}
<div class="feature-item">
{%- if item.icon %}<span class="feature-icon">{{ item.icon }}</span>{% endif -%}
<div class="feature-text"><h4>{{ item.title }}</h4><p>{{ item.description }}</p></div></div>
{%- endfor -%}
"#;

const EXPERIENCE_GRID: &str = r#"
{%- for card in experiences -%}
<div class="experience-card{% if card.featured %} featured{% endif %}">
{%- if card.badge %}<div class="experience-badge">{{ card.badge }}</div>{% endif -%}
<h3 class="experience-title">{{ card.title -}}
</h3><p class="experience-description">{{ card.description }}</p>
{%- if card.price %}<div class="experience-price">{{ card.price }}</div>{% endif -%}
{%- if card.availability -%}
<div class="experience-availability">{{ card.availability }}</div>
{%- endif -%}
</div>
{%- endfor -%}
"#;

fn templates() -> Option<&'static Tera> {
    static TEMPLATES: OnceLock<Option<Tera>> = OnceLock::new();
    TEMPLATES
        .get_or_init(|| {
            let mut tera = Tera::default();
            let added = tera.add_raw_templates([
                ("hero_title.html", HERO_TITLE),
                ("info_items.html", INFO_ITEMS),
                ("footer_contact.html", FOOTER_CONTACT),
                ("category_tabs.html", CATEGORY_TABS),
                ("social_links.html", SOCIAL_LINKS),
                ("promotion_grid.html", PROMOTION_GRID),
                ("highlight_grid.html", HIGHLIGHT_GRID),
                ("experience_grid.html", EXPERIENCE_GRID),
            ]);
            match added {
                Ok(()) => Some(tera),
                Err(e) => {
                    error!(error = %e, "fragment templates failed to load");
                    None
                }
            }
        })
        .as_ref()
}

fn render(name: &str, context: &Context) -> Option<String> {
    match templates()?.render(name, context) {
        Ok(markup) => Some(markup.trim().to_string()),
        Err(e) => {
            warn!(template = name, error = %e, "fragment render failed");
            None
        }
    }
}

fn render_non_empty(name: &str, context: &Context) -> Option<String> {
    render(name, context).filter(|markup| !markup.is_empty())
}

/// One line of an info item, optionally a link
#[derive(Debug, Default, Serialize)]
struct Line {
    prefix: Option<&'static str>,
    text: String,
    href: Option<String>,
    external: bool,
}

impl Line {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn link(text: impl Into<String>, href: String) -> Self {
        Self {
            text: text.into(),
            href: Some(href),
            ..Self::default()
        }
    }

    fn external(text: impl Into<String>, href: String) -> Self {
        Self {
            external: true,
            ..Self::link(text, href)
        }
    }

    fn prefixed(self, prefix: &'static str) -> Self {
        Self {
            prefix: Some(prefix),
            ..self
        }
    }
}

#[derive(Debug, Serialize)]
struct ProfileLink {
    href: String,
    label: &'static str,
    icon: &'static str,
}

#[derive(Debug, Serialize)]
struct InfoItem {
    icon: &'static str,
    heading: &'static str,
    lines: Vec<Line>,
    links: Vec<ProfileLink>,
}

impl InfoItem {
    fn new(icon: &'static str, heading: &'static str, lines: Vec<Line>) -> Self {
        Self {
            icon,
            heading,
            lines,
            links: Vec::new(),
        }
    }
}

fn info_items(class: &str, items: &[InfoItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut context = Context::new();
    context.insert("class", class);
    context.insert("items", items);
    render("info_items.html", &context)
}

/// Tagline with its last word wrapped in a highlight span
pub fn hero_title(tagline: &str) -> Option<String> {
    let mut words: Vec<&str> = tagline.split_whitespace().collect();
    let last = words.pop()?;

    let mut context = Context::new();
    context.insert("lead", &words.join(" "));
    context.insert("last", last);
    render("hero_title.html", &context)
}

/// `tel:` URI with separators stripped
pub fn tel_uri(phone: &str) -> Option<String> {
    let dialable: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if dialable.is_empty() {
        None
    } else {
        Some(format!("tel:{}", dialable))
    }
}

fn messaging_line(doc: &SiteConfig, text: String) -> Option<Line> {
    let handle = &doc.contact.messaging_handle;
    if handle.is_empty() {
        return None;
    }
    Some(Line::external(text, chat_link(&doc.messaging.domain, handle)))
}

fn phone_line(phone: &str) -> Option<Line> {
    tel_uri(phone).map(|uri| Line::link(phone, uri))
}

/// Contact section: address, phone and messaging, hours, social profiles
pub fn contact_block(doc: &SiteConfig) -> Option<String> {
    let contact = &doc.contact;
    let mut items = Vec::new();

    if let Some(address) = &contact.address {
        let mut lines = vec![Line::text(address.one_line())];
        lines.extend(address.notes.as_deref().map(Line::text));
        items.push(InfoItem::new("📍", "Alamat", lines));
    }

    let mut reach: Vec<Line> = phone_line(&contact.phone).into_iter().collect();
    let whatsapp = format!("+{} (WhatsApp)", contact.messaging_handle);
    reach.extend(messaging_line(doc, whatsapp));
    if let Some(email) = contact.email.as_deref().filter(|e| !e.is_empty()) {
        reach.push(Line::link(email, format!("mailto:{}", email)));
    }
    if !reach.is_empty() {
        items.push(InfoItem::new("📞", "Telepon", reach));
    }

    if let Some(hours) = &contact.hours {
        let days = hours.days.as_deref().unwrap_or("Senin - Minggu");
        let mut lines = vec![Line::text(format!(
            "{}: {} - {}",
            days, hours.open, hours.close
        ))];
        if let Some((start, end)) = hours.delivery_window() {
            lines.push(Line::text(format!("Delivery: {} - {}", start, end)));
        }
        items.push(InfoItem::new("🕐", "Jam Buka", lines));
    }

    let links: Vec<ProfileLink> = contact
        .social
        .profiles()
        .into_iter()
        .map(|(network, href)| ProfileLink {
            href,
            label: network.label(),
            icon: network.icon(),
        })
        .collect();
    if !links.is_empty() {
        items.push(InfoItem {
            links,
            ..InfoItem::new("📱", "Media Sosial", Vec::new())
        });
    }

    info_items("contact", &items)
}

/// Compact contact lines for the footer
pub fn footer_contact(doc: &SiteConfig) -> Option<String> {
    let contact = &doc.contact;
    let mut lines = Vec::new();

    if let Some(address) = &contact.address {
        lines.push(Line::text(address.one_line()).prefixed("📍"));
    }
    lines.extend(phone_line(&contact.phone).map(|l| l.prefixed("📞")));
    let handle = format!("+{}", contact.messaging_handle);
    lines.extend(messaging_line(doc, handle).map(|l| l.prefixed("💬")));
    if let Some(hours) = &contact.hours {
        let days = hours.days.as_deref().unwrap_or("Setiap Hari");
        let text = format!("{} - {} ({})", hours.open, hours.close, days);
        lines.push(Line::text(text).prefixed("🕐"));
    }

    if lines.is_empty() {
        return None;
    }
    let mut context = Context::new();
    context.insert("lines", &lines);
    render("footer_contact.html", &context)
}

/// Delivery area, window, fee tiers and payment methods
pub fn delivery_block(doc: &SiteConfig) -> Option<String> {
    let ordering = &doc.ordering;
    if !ordering.enabled {
        return None;
    }
    let currency = &ordering.currency;
    let mut items = Vec::new();

    let mut timing = Vec::new();
    if let Some(hours) = &doc.contact.hours {
        if let Some((start, end)) = hours.delivery_window() {
            let days = hours.days.as_deref().unwrap_or("Senin - Minggu");
            timing.push(Line::text(format!("{}: {} - {}", days, start, end)));
        }
    }
    if let Some(time) = ordering.delivery_time {
        timing.push(Line::text(format!(
            "Estimasi pengiriman: {}-{} menit",
            time.min, time.max
        )));
    }
    if !timing.is_empty() {
        items.push(InfoItem::new("⏰", "Waktu Delivery", timing));
    }

    let mut fees: Vec<Line> = ordering
        .delivery_tiers
        .iter()
        .map(|tier| {
            let fee = match &tier.description {
                Some(description) => description.clone(),
                None => currency.display(tier.fee),
            };
            Line::text(format!("• {}: {}", tier.distance, fee))
        })
        .collect();
    fees.push(Line::text(format!(
        "• Min. order: {}",
        currency.display(ordering.minimum_order)
    )));
    items.push(InfoItem::new("💰", "Ongkos Kirim", fees));

    if !ordering.payment_methods.is_empty() {
        let methods = Line::text(ordering.payment_methods.join(", "));
        items.push(InfoItem::new("💳", "Metode Pembayaran", vec![methods]));
    }

    info_items("delivery", &items)
}

/// Menu category tab buttons; the first tab starts active
pub fn category_tabs(doc: &SiteConfig) -> Option<String> {
    if doc.catalog.is_empty() {
        return None;
    }
    let mut context = Context::new();
    context.insert("catalog", &doc.catalog);
    render("category_tabs.html", &context)
}

/// Footer social icons, plus the messaging link when a handle is set
pub fn social_links(doc: &SiteConfig) -> Option<String> {
    let mut links: Vec<ProfileLink> = doc
        .contact
        .social
        .profiles()
        .into_iter()
        .map(|(network, href)| ProfileLink {
            href,
            label: network.label(),
            icon: network.icon(),
        })
        .collect();

    let handle = &doc.contact.messaging_handle;
    if !handle.is_empty() {
        links.push(ProfileLink {
            href: chat_link(&doc.messaging.domain, handle),
            label: "WhatsApp",
            icon: "💬",
        });
    }

    if links.is_empty() {
        return None;
    }
    let mut context = Context::new();
    context.insert("links", &links);
    render("social_links.html", &context)
}

/// Cards for active promotions
pub fn promotion_grid(doc: &SiteConfig) -> Option<String> {
    let promotions: Vec<_> = doc.active_promotions().collect();
    if promotions.is_empty() {
        return None;
    }
    let mut context = Context::new();
    context.insert("promotions", &promotions);
    render_non_empty("promotion_grid.html", &context)
}

/// About-section highlight items
pub fn highlight_grid(doc: &SiteConfig) -> Option<String> {
    if doc.highlights.is_empty() {
        return None;
    }
    let mut context = Context::new();
    context.insert("highlights", &doc.highlights);
    render_non_empty("highlight_grid.html", &context)
}

#[derive(Debug, Serialize)]
struct ExperienceCard<'a> {
    title: &'a str,
    description: &'a str,
    price: Option<String>,
    availability: Option<&'a str>,
    badge: Option<&'a str>,
    featured: bool,
}

/// Special experience cards; featured cards carry an extra class
pub fn experience_grid(doc: &SiteConfig) -> Option<String> {
    let currency = &doc.ordering.currency;
    let cards: Vec<ExperienceCard<'_>> = doc
        .experiences
        .iter()
        .map(|e| ExperienceCard {
            title: &e.title,
            description: &e.description,
            price: e.price.map(|p| currency.display(p)),
            availability: e.availability.as_deref(),
            badge: e.badge.as_deref(),
            featured: e.featured,
        })
        .collect();

    if cards.is_empty() {
        return None;
    }
    let mut context = Context::new();
    context.insert("experiences", &cards);
    render_non_empty("experience_grid.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warung_core::{Address, Category, Experience, Highlight, OperatingHours, Promotion};

    fn doc() -> SiteConfig {
        let mut doc = SiteConfig::default();
        doc.identity.name = "Warung Mak Sari".into();
        doc.contact.phone = "021-2345-6789".into();
        doc.contact.messaging_handle = "628123456789".into();
        doc
    }

    fn promotion(title: &str) -> Promotion {
        Promotion {
            title: title.into(),
            description: "Untuk radius 3km".into(),
            code: None,
            badge: None,
            active: true,
        }
    }

    #[test]
    fn test_templates_load() {
        assert!(templates().is_some());
    }

    #[test]
    fn test_hero_title_highlights_last_word() {
        assert_eq!(
            hero_title("Masakan Rumahan Terlezat").as_deref(),
            Some(r#"Masakan Rumahan <span class="highlight">Terlezat</span>"#)
        );
        assert_eq!(
            hero_title("Enak").as_deref(),
            Some(r#"<span class="highlight">Enak</span>"#)
        );
        assert_eq!(hero_title("   "), None);
    }

    #[test]
    fn test_tel_uri() {
        assert_eq!(tel_uri("021-2345-6789").as_deref(), Some("tel:02123456789"));
        assert_eq!(tel_uri(""), None);
    }

    #[test]
    fn test_contact_block_omits_absent_parts() {
        let block = contact_block(&doc()).unwrap();
        assert!(block.contains(r#"<a href="tel:02123456789">021-2345-6789</a>"#));
        let whatsapp = r#"href="https:&#x2F;&#x2F;wa.me&#x2F;628123456789" target="_blank""#;
        assert!(block.contains(whatsapp));
        assert!(!block.contains("Alamat"));
        assert!(!block.contains("Media Sosial"));

        let mut doc = doc();
        doc.contact.address = Some(Address {
            street: "Jl. Kebon Jeruk No. 12".into(),
            city: "Jakarta".into(),
            postal_code: Some("11530".into()),
            notes: None,
        });
        doc.contact.hours = Some(OperatingHours {
            open: "07:00".into(),
            close: "21:00".into(),
            days: None,
            delivery_start: Some("10:00".into()),
            delivery_end: Some("20:00".into()),
        });
        let block = contact_block(&doc).unwrap();
        assert!(block.contains("<p>Jl. Kebon Jeruk No. 12, Jakarta 11530</p>"));
        let hours = "<p>Senin - Minggu: 07:00 - 21:00<br>Delivery: 10:00 - 20:00</p>";
        assert!(block.contains(hours));
    }

    #[test]
    fn test_contact_block_empty_document() {
        assert_eq!(contact_block(&SiteConfig::default()), None);
        assert_eq!(footer_contact(&SiteConfig::default()), None);
    }

    #[test]
    fn test_footer_contact_lines() {
        let footer = footer_contact(&doc()).unwrap();
        assert!(footer.starts_with(r#"<p>📞 <a href="tel:02123456789">021-2345-6789</a></p>"#));
        assert!(footer.contains("<p>💬 <a href="));
    }

    #[test]
    fn test_social_links_skip_absent_handles() {
        let mut doc = doc();
        doc.contact.social.instagram = Some("warungmaksari".into());
        doc.contact.social.facebook = Some("".into());

        let links = social_links(&doc).unwrap();
        assert!(links.contains("https:&#x2F;&#x2F;instagram.com&#x2F;warungmaksari"));
        assert!(!links.contains("facebook"));
        assert!(links.contains(r#"aria-label="WhatsApp""#));

        doc.contact.messaging_handle.clear();
        doc.contact.social.instagram = None;
        assert_eq!(social_links(&doc), None);
    }

    #[test]
    fn test_category_tabs() {
        let mut doc = doc();
        assert_eq!(category_tabs(&doc), None);

        doc.catalog = vec![
            Category {
                id: "makanan".into(),
                label: "Makanan".into(),
                icon: Some("🍛".into()),
            },
            Category {
                id: "minuman".into(),
                label: "Minuman".into(),
                icon: None,
            },
        ];
        assert_eq!(
            category_tabs(&doc).as_deref(),
            Some(concat!(
                r#"<button class="tab-btn active" data-tab="makanan">🍛 Makanan</button>"#,
                r#"<button class="tab-btn" data-tab="minuman">Minuman</button>"#,
            ))
        );
    }

    #[test]
    fn test_delivery_block_includes_minimum_order() {
        let block = delivery_block(&doc()).unwrap();
        assert!(block.contains("• Min. order: Rp 25.000"));
        assert!(block.starts_with(r#"<div class="delivery-item">"#));

        let mut doc = doc();
        doc.ordering.enabled = false;
        assert_eq!(delivery_block(&doc), None);
    }

    #[test]
    fn test_promotion_grid_active_only() {
        let mut doc = doc();
        doc.promotions = vec![promotion("Gratis Ongkir")];
        doc.promotions[0].active = false;
        assert_eq!(promotion_grid(&doc), None);

        doc.promotions[0].active = true;
        doc.promotions[0].code = Some("HEMAT10".into());
        assert_eq!(
            promotion_grid(&doc).as_deref(),
            Some(concat!(
                r#"<div class="promo-card"><h3>Gratis Ongkir</h3><p>Untuk radius 3km</p>"#,
                r#"<div class="promo-code">HEMAT10</div></div>"#,
            ))
        );
    }

    #[test]
    fn test_document_values_are_escaped() {
        let mut doc = doc();
        doc.promotions = vec![promotion(r#"<b>"Sate" & Soto</b>"#)];
        doc.highlights = vec![Highlight {
            icon: None,
            title: "<script>alert(1)</script>".into(),
            description: "Aman".into(),
        }];

        let grid = promotion_grid(&doc).unwrap();
        assert!(grid.contains("<h3>&lt;b&gt;&quot;Sate&quot; &amp; Soto&lt;&#x2F;b&gt;</h3>"));
        let features = highlight_grid(&doc).unwrap();
        assert!(!features.contains("<script>"));
        assert!(features.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_experience_grid() {
        let mut doc = doc();
        assert_eq!(experience_grid(&doc), None);

        doc.experiences = vec![
            Experience {
                title: "Kelas Masak".into(),
                description: "Belajar rendang bersama Mak Sari".into(),
                price: Some(350000),
                availability: Some("Setiap Sabtu".into()),
                badge: Some("Baru".into()),
                featured: true,
            },
            Experience {
                title: "Katering".into(),
                description: "Untuk acara kantor".into(),
                price: None,
                availability: None,
                badge: None,
                featured: false,
            },
        ];

        let grid = experience_grid(&doc).unwrap();
        assert!(grid.starts_with(concat!(
            r#"<div class="experience-card featured">"#,
            r#"<div class="experience-badge">Baru</div>"#,
            r#"<h3 class="experience-title">Kelas Masak</h3>"#,
        )));
        assert!(grid.contains(r#"<div class="experience-price">Rp 350.000</div>"#));
        assert!(grid.contains(r#"<div class="experience-availability">Setiap Sabtu</div>"#));
        assert!(grid.ends_with(
            r#"<p class="experience-description">Untuk acara kantor</p></div>"#
        ));
        assert_eq!(grid.matches("experience-price").count(), 1);
    }
}
