//! # Cart Types
//!
//! The visitor's cart: line items keyed by label, kept in insertion order.
//! Operations on labels that are no longer in the cart are no-ops, so stale
//! UI buttons never fail. Arithmetic saturates, so hostile prices or
//! quantities cap at the numeric maximum instead of wrapping.

use crate::money::CurrencyFormat;
use serde::{Deserialize, Serialize};

/// A line item in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Menu item label (unique within a cart)
    pub label: String,

    /// Unit price in whole currency units
    pub unit_price: u64,

    /// Quantity (always >= 1 while in the cart)
    pub quantity: u32,
}

impl LineItem {
    pub fn new(label: impl Into<String>, unit_price: u64) -> Self {
        Self {
            label: label.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Calculate the total price for this line item
    pub fn total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// The visitor's cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of `label`. An existing item keeps its unit price and
    /// gains one quantity; otherwise a new item is appended.
    pub fn add(&mut self, label: &str, unit_price: u64) -> &Self {
        match self.position(label) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
            }
            None => self.items.push(LineItem::new(label, unit_price)),
        }
        self
    }

    /// Set the quantity of `label`. Zero or less removes the item.
    /// Never creates an item. Returns whether the cart changed.
    pub fn set_quantity(&mut self, label: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(label);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.position(label) {
            Some(index) if self.items[index].quantity != quantity => {
                self.items[index].quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove `label` if present. Returns whether it was there.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.label != label);
        self.items.len() != before
    }

    /// Sum of unit price times quantity over current items
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.total()))
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, label: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.label == label)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Check if cart is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all items
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Display view of the cart
    pub fn summary(&self, currency: &CurrencyFormat) -> CartSummary {
        let lines = self
            .items
            .iter()
            .map(|item| CartLine {
                label: item.label.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.total(),
                unit_price_display: currency.display(item.unit_price),
                line_total_display: currency.display(item.total()),
            })
            .collect();

        let total = self.total();
        CartSummary {
            lines,
            item_count: self.item_count(),
            total,
            total_display: currency.display(total),
        }
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.items.iter().position(|item| item.label == label)
    }
}

/// One cart row ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub label: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
    pub unit_price_display: String,
    pub line_total_display: String,
}

/// Cart state for a display refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub total: u64,
    pub total_display: String,
}
