//! # Money Formatting
//!
//! Single-currency integer amounts (no minor units) and their locale display.
//! Amounts are whole Rupiah by default; `25000` displays as `Rp 25.000`.

use serde::{Deserialize, Serialize};

/// How amounts are displayed: symbol prefix and thousands separator.
/// Fraction digits are never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Currency symbol placed before the amount (e.g., "Rp")
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Thousands group separator (e.g., '.' for id-ID)
    #[serde(default = "default_group_separator")]
    pub group_separator: char,
}

fn default_symbol() -> String {
    "Rp".to_string()
}

fn default_group_separator() -> char {
    '.'
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            group_separator: default_group_separator(),
        }
    }
}

impl CurrencyFormat {
    /// Format an amount for display (e.g., "Rp 25.000")
    pub fn display(&self, amount: u64) -> String {
        format!("{} {}", self.symbol, group_digits(amount, self.group_separator))
    }
}

/// Insert `separator` between every group of three digits, counting from the right.
pub fn group_digits(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    grouped
}
