//! # Outbound Messages
//!
//! Line-oriented message assembly and the messaging deep-link. Shared by the
//! cart checkout, the direct single-item order and the inquiry form.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters left unescaped by ECMAScript `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A composed message and the deep-link that carries it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub message: String,
    pub external_url: String,
}

impl OutboundMessage {
    pub fn new(domain: &str, handle: &str, message: String) -> Self {
        let external_url = deep_link(domain, handle, &message);
        Self {
            message,
            external_url,
        }
    }
}

/// Percent-encode `text` the way `encodeURIComponent` does
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// `https://<domain>/<handle>?text=<encoded text>`
pub fn deep_link(domain: &str, handle: &str, text: &str) -> String {
    format!("https://{}/{}?text={}", domain, handle, encode_component(text))
}

/// `https://<domain>/<handle>` without a prefilled message
pub fn chat_link(domain: &str, handle: &str) -> String {
    format!("https://{}/{}", domain, handle)
}

/// Builds a message one line at a time. Bold spans use the `*text*` markup
/// the messaging channel understands.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    lines: Vec<String>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn bold(self, text: impl AsRef<str>) -> Self {
        let text = format!("*{}*", text.as_ref());
        self.line(text)
    }

    /// `*label:* value`
    pub fn field(self, label: &str, value: &str) -> Self {
        let text = format!("*{}:* {}", label, value);
        self.line(text)
    }

    pub fn blank(self) -> Self {
        self.line(String::new())
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}
