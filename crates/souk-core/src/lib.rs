//! # souk-core: Pure Cart Logic for the Souk Storefront
//!
//! This crate is the **heart** of the Souk cart. It contains the cart's data
//! model and derived-total math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Souk Cart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Storefront Frontend                           │   │
//! │  │    Header Badge ──► Cart Page ──► Product Pages                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartView snapshots                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                souk-cart (CartStore + REST client)              │   │
//! │  │    fetch_cart, add_to_cart, update_quantity, remove, clear     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ souk-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  summary  │  │ validation│  │   │
//! │  │   │ CartItem  │  │   Money   │  │ summarize │  │   rules   │  │   │
//! │  │   │ LineKey   │  │  (kobo)   │  │ discounts │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart domain types (CartItem, CartSummary, ProductSnapshot)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`summary`] - Derived-total calculations over the item list
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in kobo (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use souk_core::money::Money;
//! use souk_core::summary::summarize;
//! use souk_core::types::{CartItem, ProductSnapshot, SelectedOptions};
//!
//! let product = ProductSnapshot::new("p-5", "Ankara Tote", Money::from_kobo(100_000));
//! let item = CartItem::new(&product, 2, SelectedOptions::default());
//!
//! let summary = summarize(std::slice::from_ref(&item));
//! assert_eq!(summary.total_items, 2);
//! assert_eq!(summary.total_cost, Money::from_kobo(200_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use souk_core::Money` instead of
// `use souk_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use summary::{discount_total, payable_total, summarize};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum quantity for a single cart line.
///
/// Every mutation that carries a quantity is rejected locally below this
/// value, before any network traffic is issued.
pub const MIN_ITEM_QUANTITY: i64 = 1;
