//! # Inquiry Messages
//!
//! The free-text contact form. It carries no cart state and reuses the
//! outbound message contract of the checkout composer.

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::message::{MessageBuilder, OutboundMessage};
use serde::{Deserialize, Serialize};

/// A contact form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub message: String,
}

impl Inquiry {
    /// Name, phone and message are required
    pub fn check(&self) -> SiteResult<()> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("message", &self.message),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SiteError::InvalidInquiry { field });
            }
        }
        Ok(())
    }
}

/// Compose the inquiry message and deep-link
pub fn compose_inquiry(inquiry: &Inquiry, doc: &SiteConfig) -> SiteResult<OutboundMessage> {
    inquiry.check()?;

    let copy = &doc.messaging.copy;
    let email = inquiry
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(copy.not_provided.as_str());

    let message = MessageBuilder::new()
        .bold(doc.expand(&copy.inquiry_heading))
        .blank()
        .field(&copy.name_label, inquiry.name.trim())
        .field(&copy.phone_label, inquiry.phone.trim())
        .field(&copy.email_label, email)
        .blank()
        .bold(format!("{}:", copy.message_label))
        .line(inquiry.message.trim())
        .build();

    Ok(OutboundMessage::new(
        &doc.messaging.domain,
        &doc.contact.messaging_handle,
        message,
    ))
}
