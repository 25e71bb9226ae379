//! # Summary Calculations
//!
//! Pure derivation of aggregate totals from the item list.
//!
//! ## Two Price Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Totals Derivation                                    │
//! │                                                                         │
//! │  items ──► summarize() ───────────► CartSummary { items, cost }        │
//! │    │                                (base prices: the running           │
//! │    │                                 summary the store maintains)       │
//! │    │                                                                    │
//! │    └────► discount_total() ───────► promotion savings                  │
//! │           payable_total()  ───────► cost − savings                     │
//! │                                (cart-page display path, recomputed      │
//! │                                 per render, never merged into the       │
//! │                                 running summary)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two paths are intentionally distinct: whether the running summary
//! should reflect promotions is an open product decision, and the math is
//! kept separate so unifying later is a one-line change at the call site.

use crate::money::Money;
use crate::types::{CartItem, CartSummary};

/// Computes the aggregate totals for an item list from scratch.
///
/// Deterministic and side-effect free. The store calls this after the
/// initial fetch and uses delta arithmetic for individual mutations; the
/// two must always agree (see the tests in `souk-cart`).
///
/// ## Example
/// ```rust
/// use souk_core::money::Money;
/// use souk_core::summary::summarize;
/// use souk_core::types::{CartItem, ProductSnapshot, SelectedOptions};
///
/// let product = ProductSnapshot::new("p-5", "Gele Wrap", Money::from_kobo(100_000));
/// let items = vec![CartItem::new(&product, 2, SelectedOptions::default())];
///
/// let summary = summarize(&items);
/// assert_eq!(summary.total_items, 2);
/// assert_eq!(summary.total_cost, Money::from_kobo(200_000));
/// ```
pub fn summarize(items: &[CartItem]) -> CartSummary {
    let mut total_items = 0;
    let mut total_cost = Money::zero();

    for item in items {
        total_items += item.quantity;
        total_cost += item.line_total();
    }

    CartSummary {
        total_items,
        total_cost,
    }
}

/// Promotion savings across the item list.
///
/// Sums `(price − discount_price) × quantity` over lines that carry a
/// discount price. Lines without one contribute nothing.
pub fn discount_total(items: &[CartItem]) -> Money {
    let mut savings = Money::zero();

    for item in items {
        if let Some(discounted) = item.product.discount_price {
            savings += (item.product.price - discounted).multiply_quantity(item.quantity);
        }
    }

    savings
}

/// What the customer actually pays: base-price total minus promotion savings.
pub fn payable_total(items: &[CartItem]) -> Money {
    summarize(items).total_cost - discount_total(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductSnapshot, SelectedOptions};

    fn item(id: &str, price_kobo: i64, quantity: i64) -> CartItem {
        let product = ProductSnapshot::new(id, format!("Product {}", id), Money::from_kobo(price_kobo));
        CartItem::new(&product, quantity, SelectedOptions::default())
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), CartSummary::empty());
    }

    #[test]
    fn test_summarize_sums_quantities_and_line_totals() {
        let items = vec![item("a", 100_000, 2), item("b", 50_000, 4)];

        let summary = summarize(&items);
        assert_eq!(summary.total_items, 6);
        assert_eq!(summary.total_cost, Money::from_kobo(400_000));
    }

    #[test]
    fn test_summarize_uses_base_price_even_with_discount() {
        let mut discounted = item("a", 100_000, 4);
        discounted.product.discount_price = Some(Money::from_kobo(50_000));

        let summary = summarize(std::slice::from_ref(&discounted));
        assert_eq!(summary.total_cost, Money::from_kobo(400_000));
    }

    #[test]
    fn test_discount_total() {
        let plain = item("a", 100_000, 2);
        let mut promoted = item("b", 100_000, 4);
        promoted.product.discount_price = Some(Money::from_kobo(50_000));

        let items = vec![plain, promoted];
        assert_eq!(discount_total(&items), Money::from_kobo(200_000));
        assert_eq!(payable_total(&items), Money::from_kobo(400_000));
    }

    #[test]
    fn test_payable_total_without_discounts_equals_total_cost() {
        let items = vec![item("a", 100_000, 2), item("b", 25_000, 1)];
        assert_eq!(payable_total(&items), summarize(&items).total_cost);
    }
}
