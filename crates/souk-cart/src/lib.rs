//! # souk-cart: Cart Sync Engine for the Souk Storefront
//!
//! This crate keeps a local, UI-facing cart consistent with the
//! authoritative server-side cart across a sequence of asynchronous,
//! possibly-overlapping mutations.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Sync Architecture                            │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   CartStore (store.rs)                           │  │
//! │  │                                                                  │  │
//! │  │  Canonical client-side snapshot: items + summary + in_flight     │  │
//! │  │  + last_error. Confirm-then-merge: local state changes only      │  │
//! │  │  after the server confirms, so failures have nothing to undo.    │  │
//! │  │  Delta totals arithmetic, always equal to a from-scratch pass.   │  │
//! │  │  Generation fencing discards stale overlapping responses.        │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ RemoteCart trait                        │
//! │         ┌─────────────────────┴─────────────────────┐                  │
//! │         ▼                                           ▼                   │
//! │  ┌────────────────┐                       ┌────────────────────────┐   │
//! │  │ HttpCartClient │                       │  Scripted test stubs   │   │
//! │  │ (client.rs)    │                       │  (#[cfg(test)])        │   │
//! │  │                │                       │                        │   │
//! │  │ GET    /cart   │                       │ gates, failures,       │   │
//! │  │ POST   /cart   │                       │ call recording         │   │
//! │  │ DELETE /cart/item/{id}                 └────────────────────────┘   │
//! │  │ PATCH  /cart/item/{id}                                              │
//! │  │ DELETE /cart/clear                                                  │
//! │  └────────────────┘                                                    │
//! │                                                                         │
//! │  CONSUMERS (header badge, cart page, product pages):                   │
//! │  • view()        - read-only CartView snapshot                         │
//! │  • cart_count()  - selector over summary.total_items                   │
//! │  • with_items()  - borrow the lines (discount display path)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `CartStore` state container and `CartView` snapshots
//! - [`client`] - `RemoteCart` contract and the reqwest-backed HTTP client
//! - [`config`] - `CartClientConfig` (env > file > defaults)
//! - [`error`] - `CartError` taxonomy (validation / server / transport)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use souk_cart::{CartClientConfig, CartStore};
//! use souk_core::types::{ProductSnapshot, SelectedOptions};
//!
//! let config = CartClientConfig::load_or_default(None).with_session(token);
//! let store = CartStore::from_config(&config)?;
//!
//! store.fetch_cart().await?;
//! store.add_to_cart(&product, 2, SelectedOptions::default()).await?;
//! println!("badge: {}", store.cart_count());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{CartPayload, ConfirmedItem, HttpCartClient, RemoteCart};
pub use config::CartClientConfig;
pub use error::{CartError, CartResult};
pub use store::{CartStore, CartView};
