//! # Checkout Session
//!
//! One visitor's cart plus the checkout lifecycle around it. Front ends turn
//! their UI events into [`CartCommand`]s and apply them here; nothing in this
//! module knows how events are sourced.
//!
//! ```text
//!  Idle ──add──▶ Populating ──open_review──▶ Reviewing ──checkout──▶ AwaitingHandoff
//!   ▲                ▲                          │  ▲                    │      │
//!   │                └──────── mutation ────────┘  └─── rejected ───────┘      │
//!   │                                              └──── cancel_handoff ◀──────┤
//!   └──────────────────── confirm_handoff (cart cleared) ◀────────────────────┘
//! ```

use crate::cart::{Cart, CartSummary};
use crate::checkout::{compose, CheckoutOutcome, Rejection};
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::message::OutboundMessage;
use crate::money::CurrencyFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the visitor is in the checkout lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Empty cart
    #[default]
    Idle,
    /// Cart has items, checkout not opened
    Populating,
    /// Checkout view open
    Reviewing,
    /// Message composed and handed to the messaging app; outcome unknown
    AwaitingHandoff,
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutPhase::Idle => "idle",
            CheckoutPhase::Populating => "populating",
            CheckoutPhase::Reviewing => "reviewing",
            CheckoutPhase::AwaitingHandoff => "awaiting_handoff",
        };
        f.write_str(name)
    }
}

/// A visitor action, already decoupled from the UI event that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CartCommand {
    Add { label: String, unit_price: u64 },
    SetQuantity { label: String, quantity: i64 },
    Remove { label: String },
    OpenReview,
    CloseReview,
    Checkout,
    ConfirmHandoff,
    CancelHandoff,
}

impl CartCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add { .. } => "add",
            CartCommand::SetQuantity { .. } => "set_quantity",
            CartCommand::Remove { .. } => "remove",
            CartCommand::OpenReview => "open_review",
            CartCommand::CloseReview => "close_review",
            CartCommand::Checkout => "checkout",
            CartCommand::ConfirmHandoff => "confirm_handoff",
            CartCommand::CancelHandoff => "cancel_handoff",
        }
    }
}

/// What applying a command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    CartChanged,
    /// Edit of a label not in the cart, or to the quantity it already has
    CartUnchanged,
    ReviewOpened,
    ReviewClosed,
    CheckoutRejected(Rejection),
    CheckoutComposed(OutboundMessage),
    HandoffConfirmed,
    HandoffCancelled,
}

/// One visitor session
#[derive(Debug, Clone, Default)]
pub struct Session {
    cart: Cart,
    phase: CheckoutPhase,
    pending: Option<OutboundMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Message handed off and not yet confirmed or cancelled
    pub fn pending(&self) -> Option<&OutboundMessage> {
        self.pending.as_ref()
    }

    /// Apply one command
    pub fn apply(&mut self, command: CartCommand, doc: &SiteConfig) -> SiteResult<SessionEvent> {
        match command {
            CartCommand::Add { label, unit_price } => {
                self.cart.add(&label, unit_price);
                Ok(self.after_mutation())
            }
            CartCommand::SetQuantity { label, quantity } => {
                let changed = self.cart.set_quantity(&label, quantity);
                Ok(self.after_edit(changed))
            }
            CartCommand::Remove { label } => {
                let changed = self.cart.remove(&label);
                Ok(self.after_edit(changed))
            }
            CartCommand::OpenReview => {
                self.pending = None;
                self.phase = CheckoutPhase::Reviewing;
                Ok(SessionEvent::ReviewOpened)
            }
            CartCommand::CloseReview => {
                self.pending = None;
                self.phase = self.resting_phase();
                Ok(SessionEvent::ReviewClosed)
            }
            CartCommand::Checkout => Ok(self.checkout(doc)),
            CartCommand::ConfirmHandoff => {
                self.expect_handoff("confirm_handoff")?;
                self.cart.clear();
                self.pending = None;
                self.phase = CheckoutPhase::Idle;
                Ok(SessionEvent::HandoffConfirmed)
            }
            CartCommand::CancelHandoff => {
                self.expect_handoff("cancel_handoff")?;
                self.pending = None;
                self.phase = CheckoutPhase::Reviewing;
                Ok(SessionEvent::HandoffCancelled)
            }
        }
    }

    /// Display view of the session
    pub fn view(&self, currency: &CurrencyFormat) -> SessionView {
        SessionView {
            phase: self.phase,
            cart: self.cart.summary(currency),
            pending: self.pending.clone(),
        }
    }

    fn checkout(&mut self, doc: &SiteConfig) -> SessionEvent {
        match compose(&self.cart, doc) {
            CheckoutOutcome::Rejected(reason) => {
                self.pending = None;
                self.phase = CheckoutPhase::Reviewing;
                SessionEvent::CheckoutRejected(reason)
            }
            CheckoutOutcome::Composed {
                message,
                external_url,
            } => {
                let outbound = OutboundMessage {
                    message,
                    external_url,
                };
                self.pending = Some(outbound.clone());
                self.phase = CheckoutPhase::AwaitingHandoff;
                SessionEvent::CheckoutComposed(outbound)
            }
        }
    }

    // A dismissed messaging app never reports back, so a cart edit while a
    // handoff is pending silently abandons that handoff.
    fn after_edit(&mut self, changed: bool) -> SessionEvent {
        // a stale button on a label no longer in the cart leaves the phase alone
        if changed {
            self.after_mutation()
        } else {
            SessionEvent::CartUnchanged
        }
    }

    fn after_mutation(&mut self) -> SessionEvent {
        self.pending = None;
        self.phase = self.resting_phase();
        SessionEvent::CartChanged
    }

    fn resting_phase(&self) -> CheckoutPhase {
        if self.cart.is_empty() {
            CheckoutPhase::Idle
        } else {
            CheckoutPhase::Populating
        }
    }

    fn expect_handoff(&self, command: &str) -> SiteResult<()> {
        if self.phase == CheckoutPhase::AwaitingHandoff {
            Ok(())
        } else {
            Err(SiteError::InvalidTransition {
                command: command.to_string(),
                phase: self.phase.to_string(),
            })
        }
    }
}

/// Serializable session state for front ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: CheckoutPhase,
    pub cart: CartSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<OutboundMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SiteConfig {
        let mut doc = SiteConfig::default();
        doc.identity.name = "Warung Mak Sari".into();
        doc.contact.messaging_handle = "628123456789".into();
        doc.ordering.minimum_order = 25000;
        doc
    }

    fn add(label: &str, unit_price: u64) -> CartCommand {
        CartCommand::Add {
            label: label.into(),
            unit_price,
        }
    }

    #[test]
    fn test_full_lifecycle() {
        let doc = doc();
        let mut session = Session::new();
        assert_eq!(session.phase(), CheckoutPhase::Idle);

        session.apply(add("Ayam Bakar", 20000), &doc).unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Populating);

        session.apply(CartCommand::OpenReview, &doc).unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Reviewing);

        let event = session.apply(CartCommand::Checkout, &doc).unwrap();
        assert!(matches!(
            event,
            SessionEvent::CheckoutRejected(Rejection::BelowMinimumOrder { .. })
        ));
        assert_eq!(session.phase(), CheckoutPhase::Reviewing);
        assert_eq!(session.cart().total(), 20000);

        session.apply(add("Es Kelapa", 10000), &doc).unwrap();
        let event = session.apply(CartCommand::Checkout, &doc).unwrap();
        assert!(matches!(event, SessionEvent::CheckoutComposed(_)));
        assert_eq!(session.phase(), CheckoutPhase::AwaitingHandoff);
        assert!(session.pending().is_some());
        // cart survives until the handoff is confirmed
        assert_eq!(session.cart().total(), 30000);

        session.apply(CartCommand::ConfirmHandoff, &doc).unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Idle);
        assert!(session.cart().is_empty());
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_cancel_handoff_keeps_cart() {
        let doc = doc();
        let mut session = Session::new();
        session.apply(add("Gado-Gado", 30000), &doc).unwrap();
        session.apply(CartCommand::Checkout, &doc).unwrap();

        let event = session.apply(CartCommand::CancelHandoff, &doc).unwrap();
        assert_eq!(event, SessionEvent::HandoffCancelled);
        assert_eq!(session.phase(), CheckoutPhase::Reviewing);
        assert_eq!(session.cart().total(), 30000);
    }

    #[test]
    fn test_confirm_without_handoff_is_rejected() {
        let mut session = Session::new();
        let err = session.apply(CartCommand::ConfirmHandoff, &doc()).unwrap_err();
        assert!(matches!(err, SiteError::InvalidTransition { .. }));
    }

    #[test]
    fn test_edit_during_handoff_abandons_it() {
        let doc = doc();
        let mut session = Session::new();
        session.apply(add("Pecel Lele", 30000), &doc).unwrap();
        session.apply(CartCommand::Checkout, &doc).unwrap();

        session
            .apply(
                CartCommand::SetQuantity {
                    label: "Pecel Lele".into(),
                    quantity: 2,
                },
                &doc,
            )
            .unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Populating);
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_stale_edit_during_handoff_keeps_it() {
        let doc = doc();
        let mut session = Session::new();
        session.apply(add("Pecel Lele", 30000), &doc).unwrap();
        session.apply(CartCommand::Checkout, &doc).unwrap();
        let pending = session.pending().cloned();

        let event = session
            .apply(
                CartCommand::Remove {
                    label: "Ayam Geprek".into(),
                },
                &doc,
            )
            .unwrap();
        assert_eq!(event, SessionEvent::CartUnchanged);

        let event = session
            .apply(
                CartCommand::SetQuantity {
                    label: "Ayam Geprek".into(),
                    quantity: 3,
                },
                &doc,
            )
            .unwrap();
        assert_eq!(event, SessionEvent::CartUnchanged);

        assert_eq!(session.phase(), CheckoutPhase::AwaitingHandoff);
        assert_eq!(session.pending().cloned(), pending);
    }

    #[test]
    fn test_stale_remove_keeps_review_open() {
        let doc = doc();
        let mut session = Session::new();
        session.apply(add("Soto Betawi", 28000), &doc).unwrap();
        session.apply(CartCommand::OpenReview, &doc).unwrap();

        session
            .apply(
                CartCommand::Remove {
                    label: "Soto Padang".into(),
                },
                &doc,
            )
            .unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Reviewing);
    }

    #[test]
    fn test_removing_last_item_returns_to_idle() {
        let doc = doc();
        let mut session = Session::new();
        session.apply(add("Kopi Tubruk", 6000), &doc).unwrap();
        session
            .apply(
                CartCommand::Remove {
                    label: "Kopi Tubruk".into(),
                },
                &doc,
            )
            .unwrap();
        assert_eq!(session.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn test_empty_checkout_rejected() {
        let mut session = Session::new();
        let event = session.apply(CartCommand::Checkout, &doc()).unwrap();
        assert_eq!(event, SessionEvent::CheckoutRejected(Rejection::EmptyCart));
    }

    #[test]
    fn test_command_json_shape() {
        let command: CartCommand =
            serde_json::from_str(r#"{"command":"set_quantity","label":"Es Teh","quantity":0}"#)
                .unwrap();
        assert_eq!(
            command,
            CartCommand::SetQuantity {
                label: "Es Teh".into(),
                quantity: 0
            }
        );
        assert_eq!(command.name(), "set_quantity");
    }

    #[test]
    fn test_view() {
        let doc = doc();
        let mut session = Session::new();
        session.apply(add("Es Teh", 5000), &doc).unwrap();

        let view = session.view(&doc.ordering.currency);
        assert_eq!(view.phase, CheckoutPhase::Populating);
        assert_eq!(view.cart.total_display, "Rp 5.000");
        assert!(view.pending.is_none());
    }
}
