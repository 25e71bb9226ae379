//! # Cart Domain Types
//!
//! Core domain types for the Souk cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Types                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductSnapshot │   │    CartItem     │   │   CartSummary   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  total_items    │       │
//! │  │  name           │   │  quantity       │   │  total_cost     │       │
//! │  │  price          │   │  selected_opts  │   └─────────────────┘       │
//! │  │  discount_price │   │  product (snap) │                             │
//! │  │  cover_image    │   │  added_at       │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │     LineKey     │       │
//! │                                              │  ─────────────  │       │
//! │                                              │  product_id     │       │
//! │                                              │  options        │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Identity
//! A cart line is identified by `(product_id, selected_options)`. Two lines
//! with the same product but different options are distinct entries.
//! `SelectedOptions` is a `BTreeMap` newtype: sorted by construction, so the
//! identity comparison is canonical and independent of the order options
//! were picked in; no serialize-and-compare.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Snapshot
// =============================================================================

/// Frozen copy of catalog data carried on a cart line.
///
/// ## Snapshot Pattern
/// The cart displays consistent data even if the vendor edits the product
/// after it was added: price, name and image are captured at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSnapshot {
    /// Product identifier assigned by the catalog.
    pub id: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Base price in kobo at time of adding (frozen).
    pub price: Money,

    /// Discounted price, when the vendor is running a promotion.
    /// The running summary does NOT consume this field; see [`crate::summary`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Money>,

    /// Cover image URL for cart display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl ProductSnapshot {
    /// Creates a snapshot with no discount and no cover image.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        ProductSnapshot {
            id: id.into(),
            name: name.into(),
            price,
            discount_price: None,
            cover_image: None,
        }
    }

    /// The price used for aggregate calculations: the base price.
    ///
    /// This is the single consistently-chosen unit price. Discount-aware
    /// totals are a separate display path (`summary::discount_total`), kept
    /// distinct until product decides whether the running summary should
    /// reflect promotions.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.price
    }
}

// =============================================================================
// Selected Options
// =============================================================================

/// The option choices attached to a cart line (e.g. `size → "m"`).
///
/// Backed by a `BTreeMap`, so iteration order (and therefore equality,
/// hashing and [`SelectedOptions::canonical_key`]) is independent of
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedOptions(BTreeMap<String, String>);

impl SelectedOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        SelectedOptions(BTreeMap::new())
    }

    /// Builder-style insertion.
    ///
    /// ## Example
    /// ```rust
    /// use souk_core::types::SelectedOptions;
    ///
    /// let opts = SelectedOptions::new()
    ///     .with("size", "m")
    ///     .with("color", "indigo");
    /// assert_eq!(opts.get("size"), Some("m"));
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Looks up a chosen value by option name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether any options were chosen.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of chosen options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Canonical `name=value;...` rendering, sorted by option name.
    ///
    /// Stable across insertion orders; used for logging and as a composite
    /// key component.
    pub fn canonical_key(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.0 {
            if !out.is_empty() {
                out.push(';');
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl FromIterator<(String, String)> for SelectedOptions {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        SelectedOptions(iter.into_iter().collect())
    }
}

// =============================================================================
// Line Key
// =============================================================================

/// The identity of a cart line: product plus chosen options.
///
/// Two lines with equal `LineKey`s are the same line; a mutation on an
/// existing key updates the line in place rather than appending.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: String,
    pub options: SelectedOptions,
}

impl LineKey {
    pub fn new(product_id: impl Into<String>, options: SelectedOptions) -> Self {
        LineKey {
            product_id: product_id.into(),
            options,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: String,

    /// Quantity in cart. Always ≥ 1; a line at quantity zero is removed,
    /// never stored.
    pub quantity: i64,

    /// Option choices that distinguish this line from other lines of the
    /// same product.
    #[serde(default)]
    pub selected_options: SelectedOptions,

    /// Frozen product data at time of adding.
    pub product: ProductSnapshot,

    /// When this line was first added.
    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line from a product snapshot and quantity.
    pub fn new(product: &ProductSnapshot, quantity: i64, options: SelectedOptions) -> Self {
        CartItem {
            product_id: product.id.clone(),
            quantity,
            selected_options: options,
            product: product.clone(),
            added_at: Utc::now(),
        }
    }

    /// The unit price used in aggregate calculations (base price).
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.unit_price()
    }

    /// Line total: unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// This line's identity key.
    pub fn line_key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.selected_options.clone())
    }

    /// Whether this line matches the given identity without allocating.
    pub fn matches_line(&self, product_id: &str, options: &SelectedOptions) -> bool {
        self.product_id == product_id && &self.selected_options == options
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Aggregate totals derived from the item list.
///
/// ## Invariants
/// - `total_items` equals the sum of `quantity` over the items
/// - `total_cost` equals the sum of `quantity × unit price` over the items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Total units across all lines.
    pub total_items: i64,

    /// Total cost across all lines, at base prices.
    pub total_cost: Money,
}

impl CartSummary {
    /// The summary of an empty cart.
    pub const fn empty() -> Self {
        CartSummary {
            total_items: 0,
            total_cost: Money::zero(),
        }
    }

    /// Whether this summary describes an empty cart.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0 && self.total_cost.is_zero()
    }
}

impl Default for CartSummary {
    fn default() -> Self {
        CartSummary::empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tote(price_kobo: i64) -> ProductSnapshot {
        ProductSnapshot::new("p-1", "Ankara Tote", Money::from_kobo(price_kobo))
    }

    #[test]
    fn test_options_identity_is_order_independent() {
        let a = SelectedOptions::new().with("size", "m").with("color", "indigo");
        let b = SelectedOptions::new().with("color", "indigo").with("size", "m");

        assert_eq!(a, b);
        assert_eq!(a.canonical_key(), "color=indigo;size=m");
        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn test_distinct_options_are_distinct_lines() {
        let product = tote(100_000);
        let small = CartItem::new(&product, 1, SelectedOptions::new().with("size", "s"));
        let medium = CartItem::new(&product, 1, SelectedOptions::new().with("size", "m"));

        assert_ne!(small.line_key(), medium.line_key());
        assert!(small.matches_line("p-1", &SelectedOptions::new().with("size", "s")));
        assert!(!small.matches_line("p-1", &SelectedOptions::new().with("size", "m")));
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(&tote(100_000), 3, SelectedOptions::default());
        assert_eq!(item.line_total(), Money::from_kobo(300_000));
    }

    #[test]
    fn test_unit_price_ignores_discount() {
        let mut product = tote(100_000);
        product.discount_price = Some(Money::from_kobo(80_000));

        let item = CartItem::new(&product, 1, SelectedOptions::default());
        assert_eq!(item.unit_price(), Money::from_kobo(100_000));
    }

    #[test]
    fn test_item_wire_shape_is_camel_case() {
        let item = CartItem::new(
            &tote(100_000),
            2,
            SelectedOptions::new().with("size", "m"),
        );
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["productId"], "p-1");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["selectedOptions"]["size"], "m");
        assert_eq!(json["product"]["price"], 100_000);
        assert!(json["product"].get("discountPrice").is_none());
    }

    #[test]
    fn test_summary_empty() {
        let summary = CartSummary::empty();
        assert!(summary.is_empty());
        assert_eq!(summary, CartSummary::default());
    }
}
