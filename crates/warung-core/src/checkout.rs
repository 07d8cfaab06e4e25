//! # Checkout Composer
//!
//! Turns a cart and the site document into the outbound order message and
//! its deep-link, or a rejection. Composing never touches the cart: clearing
//! it after a confirmed handoff is the caller's job, since the visitor can
//! still dismiss the messaging app.

use crate::cart::Cart;
use crate::config::SiteConfig;
use crate::message::{MessageBuilder, OutboundMessage};
use crate::money::CurrencyFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a checkout was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Nothing in the cart
    EmptyCart,
    /// Cart total is under the configured minimum
    BelowMinimumOrder { minimum: u64, total: u64 },
}

impl Rejection {
    /// Text shown to the visitor
    pub fn user_message(&self, currency: &CurrencyFormat) -> String {
        match self {
            Rejection::EmptyCart => "Keranjang masih kosong!".to_string(),
            Rejection::BelowMinimumOrder { minimum, .. } => {
                format!("Minimum order {}", currency.display(*minimum))
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyCart => write!(f, "cart is empty"),
            Rejection::BelowMinimumOrder { minimum, total } => {
                write!(f, "total {} is below minimum order {}", total, minimum)
            }
        }
    }
}

/// Result of composing a checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Rejected(Rejection),
    Composed {
        message: String,
        external_url: String,
    },
}

impl CheckoutOutcome {
    pub fn is_composed(&self) -> bool {
        matches!(self, CheckoutOutcome::Composed { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            CheckoutOutcome::Rejected(reason) => Some(*reason),
            CheckoutOutcome::Composed { .. } => None,
        }
    }
}

impl From<OutboundMessage> for CheckoutOutcome {
    fn from(outbound: OutboundMessage) -> Self {
        CheckoutOutcome::Composed {
            message: outbound.message,
            external_url: outbound.external_url,
        }
    }
}

/// Compose the order message for `cart`
pub fn compose(cart: &Cart, doc: &SiteConfig) -> CheckoutOutcome {
    if cart.is_empty() {
        return CheckoutOutcome::Rejected(Rejection::EmptyCart);
    }

    let total = cart.total();
    let minimum = doc.ordering.minimum_order;
    if total < minimum {
        return CheckoutOutcome::Rejected(Rejection::BelowMinimumOrder { minimum, total });
    }

    let message = order_message(cart, doc);
    OutboundMessage::new(
        &doc.messaging.domain,
        &doc.contact.messaging_handle,
        message,
    )
    .into()
}

/// Build the order message text. Deterministic for a given cart and document.
pub fn order_message(cart: &Cart, doc: &SiteConfig) -> String {
    let copy = &doc.messaging.copy;
    let currency = &doc.ordering.currency;

    let mut builder = MessageBuilder::new()
        .bold(doc.expand(&copy.order_heading))
        .blank()
        .bold(&copy.details_heading);

    for item in cart.items() {
        builder = builder.line(format!(
            "• {} × {} = {}",
            item.label,
            item.quantity,
            currency.display(item.total())
        ));
    }

    builder
        .blank()
        .bold(format!("{}: {}", copy.total_label, currency.display(cart.total())))
        .blank()
        .line(doc.expand(&copy.closing))
        .build()
}

/// Hand off a single item without a cart (used when the cart feature is off)
pub fn compose_direct_order(label: &str, unit_price: u64, doc: &SiteConfig) -> OutboundMessage {
    let copy = &doc.messaging.copy;
    let message = MessageBuilder::new()
        .line(doc.expand(&copy.direct_order_intro))
        .blank()
        .line(format!(
            "• {} - {}",
            label,
            doc.ordering.currency.display(unit_price)
        ))
        .blank()
        .line(doc.expand(&copy.direct_order_closing))
        .build();

    OutboundMessage::new(&doc.messaging.domain, &doc.contact.messaging_handle, message)
}

/// Greeting deep-link used by the call-to-action buttons
pub fn greeting_link(doc: &SiteConfig) -> String {
    crate::message::deep_link(
        &doc.messaging.domain,
        &doc.contact.messaging_handle,
        &doc.expand(&doc.messaging.copy.greeting),
    )
}
