//! # Document Validation
//!
//! Checks a site document once at load. Every check runs; findings are
//! reported, never raised. Callers log them and keep rendering.

use crate::color::HexColor;
use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of problem found in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A required field is empty
    MissingField,
    /// Messaging handle is not digits-only with the country prefix
    BadHandleFormat,
    /// Palette entry is not `#RRGGBB`
    BadColorFormat,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// Dotted field path (e.g., "branding.colors.primary")
    pub field: String,
    pub message: String,
}

impl Finding {
    fn new(kind: FindingKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a site document. An empty list means the document is accepted.
pub fn validate(doc: &SiteConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    check_required(doc, &mut findings);
    check_handle(doc, &mut findings);
    check_colors(doc, &mut findings);
    findings
}

fn check_required(doc: &SiteConfig, findings: &mut Vec<Finding>) {
    let required = [
        ("identity.name", &doc.identity.name, "Business name is required"),
        (
            "contact.messaging_handle",
            &doc.contact.messaging_handle,
            "Messaging handle is required",
        ),
        ("contact.phone", &doc.contact.phone, "Phone number is required"),
    ];

    for (field, value, message) in required {
        if value.trim().is_empty() {
            findings.push(Finding::new(FindingKind::MissingField, field, message));
        }
    }
}

fn check_handle(doc: &SiteConfig, findings: &mut Vec<Finding>) {
    let handle = &doc.contact.messaging_handle;
    let prefix = &doc.contact.handle_prefix;

    // an empty handle is already a MissingField
    if handle.is_empty() {
        return;
    }

    if !handle.chars().all(|c| c.is_ascii_digit()) || !handle.starts_with(prefix.as_str()) {
        findings.push(Finding::new(
            FindingKind::BadHandleFormat,
            "contact.messaging_handle",
            format!(
                "Messaging handle should be digits only and start with {} (got {})",
                prefix, handle
            ),
        ));
    }
}

fn check_colors(doc: &SiteConfig, findings: &mut Vec<Finding>) {
    for (name, value) in doc.branding.colors.entries() {
        if !HexColor::is_valid(value) {
            findings.push(Finding::new(
                FindingKind::BadColorFormat,
                format!("branding.colors.{}", name),
                format!("Color {} should be in hex format like #FF6B35 (got {:?})", name, value),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;

    fn valid_doc() -> SiteConfig {
        let mut doc = SiteConfig::default();
        doc.identity.name = "Warung Mak Sari".into();
        doc.contact.phone = "021-2345-6789".into();
        doc.contact.messaging_handle = "628123456789".into();
        doc
    }

    fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
        findings.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn test_valid_document_has_no_findings() {
        assert!(validate(&valid_doc()).is_empty());
    }

    #[test]
    fn test_missing_messaging_handle() {
        let mut doc = valid_doc();
        doc.contact.messaging_handle.clear();

        let findings = validate(&doc);
        assert_eq!(kinds(&findings), vec![FindingKind::MissingField]);
        assert_eq!(findings[0].field, "contact.messaging_handle");
    }

    #[test]
    fn test_all_required_fields_reported() {
        let findings = validate(&SiteConfig::default());
        let missing = findings
            .iter()
            .filter(|f| f.kind == FindingKind::MissingField)
            .count();
        assert_eq!(missing, 3);
    }

    #[test]
    fn test_handle_with_wrong_prefix() {
        let mut doc = valid_doc();
        doc.contact.messaging_handle = "6512345678".into();
        assert_eq!(kinds(&validate(&doc)), vec![FindingKind::BadHandleFormat]);
    }

    #[test]
    fn test_handle_with_plus_sign() {
        let mut doc = valid_doc();
        doc.contact.messaging_handle = "+628123456789".into();
        assert_eq!(kinds(&validate(&doc)), vec![FindingKind::BadHandleFormat]);
    }

    #[test]
    fn test_every_bad_color_is_reported() {
        let mut doc = valid_doc();
        doc.branding.colors = Palette {
            primary: "orange".into(),
            secondary: "#CC2936".into(),
            accent: "#FFD".into(),
            success: Some("27AE60".into()),
        };

        let findings = validate(&doc);
        let fields: Vec<_> = findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "branding.colors.primary",
                "branding.colors.accent",
                "branding.colors.success"
            ]
        );
        assert!(findings.iter().all(|f| f.kind == FindingKind::BadColorFormat));
    }

    #[test]
    fn test_checks_are_independent() {
        let mut doc = SiteConfig::default();
        doc.contact.messaging_handle = "0812".into();
        doc.branding.colors.primary = "red".into();

        let found = kinds(&validate(&doc));
        assert!(found.contains(&FindingKind::MissingField));
        assert!(found.contains(&FindingKind::BadHandleFormat));
        assert!(found.contains(&FindingKind::BadColorFormat));
    }
}
