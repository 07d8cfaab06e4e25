//! # warung-core
//!
//! Core types for the warung site engine.
//!
//! This crate provides:
//! - `SiteConfig`, the single site document every region is bound from
//! - `validate` for non-fatal configuration findings
//! - `Cart` and `LineItem` for the visitor's order
//! - `compose` and friends for the outbound order message and deep-link
//! - `compose_reservation` for table and experience bookings
//! - `Session` for the checkout lifecycle shared by all front ends
//! - `SiteError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use warung_core::{compose, Cart, CheckoutOutcome, SiteConfig};
//!
//! let doc = SiteConfig::from_toml(&std::fs::read_to_string("config/site.toml")?)?;
//!
//! let mut cart = Cart::new();
//! cart.add("Nasi Gudeg", 15000);
//! cart.add("Es Jeruk", 7000);
//!
//! match compose(&cart, &doc) {
//!     CheckoutOutcome::Composed { external_url, .. } => open(external_url),
//!     CheckoutOutcome::Rejected(reason) => alert(reason.user_message(&doc.ordering.currency)),
//! }
//! ```

pub mod cart;
pub mod checkout;
pub mod color;
pub mod config;
pub mod error;
pub mod inquiry;
pub mod message;
pub mod money;
pub mod reservation;
pub mod section;
pub mod session;
pub mod validate;

// Re-exports for convenience
pub use cart::{Cart, CartLine, CartSummary, LineItem};
pub use checkout::{
    compose, compose_direct_order, greeting_link, order_message, CheckoutOutcome, Rejection,
};
pub use color::{darken, HexColor};
pub use config::{
    Address, Branding, Category, Contact, DeliveryTier, DeliveryTime, Experience, FeatureFlags,
    Highlight, Identity, Images, MessageCopy, MessagingChannel, OperatingHours, OrderingPolicy,
    Palette, Promotion, SiteConfig, SocialHandles, SocialNetwork, Website,
};
pub use error::{SiteError, SiteResult};
pub use inquiry::{compose_inquiry, Inquiry};
pub use message::{chat_link, deep_link, encode_component, OutboundMessage};
pub use money::CurrencyFormat;
pub use reservation::{compose_reservation, Reservation};
pub use section::{DirtySections, Section};
pub use session::{CartCommand, CheckoutPhase, Session, SessionEvent, SessionView};
pub use validate::{validate, Finding, FindingKind};
