//! # Reservation Requests
//!
//! Table bookings and special-experience requests. Like the inquiry form it
//! carries no cart state; the composed message goes out through the same
//! deep-link as an order.

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::message::{MessageBuilder, OutboundMessage};
use serde::{Deserialize, Serialize};

/// A reservation form submission. Date and time are kept as the visitor typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub guests: u32,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub requests: Option<String>,
}

impl Reservation {
    /// Name, phone, date and time are required, and at least one guest
    pub fn check(&self) -> SiteResult<()> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("date", &self.date),
            ("time", &self.time),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SiteError::InvalidReservation { field });
            }
        }
        if self.guests == 0 {
            return Err(SiteError::InvalidReservation { field: "guests" });
        }
        Ok(())
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Compose the reservation message and deep-link
pub fn compose_reservation(
    reservation: &Reservation,
    doc: &SiteConfig,
) -> SiteResult<OutboundMessage> {
    if !doc.features.enable_reservations {
        return Err(SiteError::ReservationsDisabled);
    }
    reservation.check()?;

    let copy = &doc.messaging.copy;
    let mut builder = MessageBuilder::new()
        .bold(doc.expand(&copy.reservation_heading))
        .blank()
        .bold(&copy.guest_heading)
        .field(&copy.name_label, reservation.name.trim())
        .field(&copy.phone_label, reservation.phone.trim())
        .blank()
        .bold(&copy.booking_heading)
        .field(&copy.date_label, reservation.date.trim())
        .field(&copy.time_label, reservation.time.trim())
        .field(&copy.guests_label, &reservation.guests.to_string());

    if let Some(occasion) = filled(&reservation.occasion) {
        builder = builder.field(&copy.occasion_label, occasion);
    }
    if let Some(requests) = filled(&reservation.requests) {
        builder = builder
            .blank()
            .bold(format!("{}:", copy.requests_label))
            .line(requests);
    }

    let message = builder.blank().line(&copy.reservation_closing).build();

    Ok(OutboundMessage::new(
        &doc.messaging.domain,
        &doc.contact.messaging_handle,
        message,
    ))
}
