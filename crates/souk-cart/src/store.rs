//! # Cart Store
//!
//! The stateful core of the cart: holds the canonical client-side snapshot,
//! applies each mutation with confirm-then-merge, and keeps the derived
//! totals consistent after every settled operation.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Confirm-Then-Merge                                   │
//! │                                                                         │
//! │  Consumer                CartStore                 RemoteCart           │
//! │  ────────                ─────────                 ──────────           │
//! │                                                                         │
//! │  add_to_cart() ────────► guard inputs                                   │
//! │                          capture fence, pending+1                       │
//! │                          ──────────────────────────► POST /cart         │
//! │                          (suspended, lock NOT held)                     │
//! │                          ◄────────────────────────── confirmed item     │
//! │                          fence still current?                           │
//! │                          ├─ yes: merge + delta totals, pending-1        │
//! │                          └─ no:  discard response,    pending-1         │
//! │  CartView ◄───────────── snapshot clone                                 │
//! │                                                                         │
//! │  On failure: record last_error, pending-1. Nothing to roll back:        │
//! │  local state was never touched speculatively.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fencing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Overlapping requests complete in network-response order, not           │
//! │  issuance order. Each line mutation captures a per-product generation   │
//! │  at issuance; wholesale operations (fetch, clear) capture a store       │
//! │  epoch. A response merges only if its token is still the latest for     │
//! │  its scope:                                                             │
//! │                                                                         │
//! │    update #1 (gen 3) ──────────────────────────► resolves last          │
//! │    update #2 (gen 4) ────────► resolves first, merges                   │
//! │    #1 resumes: gen 3 ≠ latest 4 → discarded                             │
//! │                                                                         │
//! │  Merges against identities that no longer exist are no-ops either way.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! The snapshot lives behind a `std::sync::Mutex` held only for synchronous
//! merge sections, never across an await. Consumers receive cloned
//! [`CartView`]s and never mutate state directly.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use souk_core::summary::summarize;
use souk_core::types::{CartItem, CartSummary, ProductSnapshot, SelectedOptions};
use souk_core::validation::{validate_product_id, validate_quantity};

use crate::client::{CartPayload, ConfirmedItem, HttpCartClient, RemoteCart};
use crate::config::CartClientConfig;
use crate::error::{CartError, CartResult};

// =============================================================================
// Fallback Messages
// =============================================================================
// Shown when a failure carries no server message (e.g. transport failures).

const FETCH_FALLBACK: &str = "Failed to fetch cart";
const ADD_FALLBACK: &str = "Failed to add item to cart";
const REMOVE_FALLBACK: &str = "Failed to remove item";
const UPDATE_FALLBACK: &str = "Failed to update quantity";
const CLEAR_FALLBACK: &str = "Failed to clear cart";

// =============================================================================
// Cart View
// =============================================================================

/// Read-only snapshot handed to consumers.
///
/// `in_flight` and `last_error` are presentation hints (spinner, banner);
/// the store stays fully usable while either is set.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    /// Cart lines in insertion order.
    pub items: Vec<CartItem>,

    /// Derived totals. Always consistent with `items`.
    pub summary: CartSummary,

    /// Whether any operation is still awaiting its response.
    pub in_flight: bool,

    /// Message from the most recent failure; cleared by the next success.
    pub last_error: Option<String>,
}

// =============================================================================
// Fence Tokens
// =============================================================================

/// Token captured at issuance; checked at application time.
#[derive(Debug)]
struct Fence {
    /// Store epoch at issuance (bumped by wholesale operations).
    epoch: u64,
    /// For line mutations: the product id and its generation at issuance.
    line: Option<(String, u64)>,
}

// =============================================================================
// Store Internals
// =============================================================================

#[derive(Default)]
struct StoreInner {
    items: Vec<CartItem>,
    summary: CartSummary,
    last_error: Option<String>,
    /// Operations issued but not yet settled.
    pending: u32,
    /// Bumped when a wholesale operation (fetch, clear) is issued.
    epoch: u64,
    /// Latest issued generation per product id.
    line_gens: HashMap<String, u64>,
}

impl StoreInner {
    fn view(&self) -> CartView {
        CartView {
            items: self.items.clone(),
            summary: self.summary,
            in_flight: self.pending > 0,
            last_error: self.last_error.clone(),
        }
    }

    /// Whether a response carrying this fence may still merge.
    fn fence_current(&self, fence: &Fence) -> bool {
        if self.epoch != fence.epoch {
            return false;
        }

        match &fence.line {
            None => true,
            Some((product_id, generation)) => {
                self.line_gens.get(product_id) == Some(generation)
            }
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The canonical client-side cart, synchronized against a [`RemoteCart`].
///
/// Generic over the transport so tests drive it with a scripted in-memory
/// implementation. Production code uses [`CartStore::from_config`].
pub struct CartStore<C: RemoteCart> {
    client: C,
    inner: Mutex<StoreInner>,
}

impl CartStore<HttpCartClient> {
    /// Builds a store wired to the HTTP client described by `config`.
    pub fn from_config(config: &CartClientConfig) -> CartResult<Self> {
        Ok(CartStore::new(HttpCartClient::new(config)?))
    }
}

impl<C: RemoteCart> CartStore<C> {
    /// Creates an empty, idle store. Call [`CartStore::fetch_cart`] to
    /// populate it with the server's view.
    pub fn new(client: C) -> Self {
        CartStore {
            client,
            inner: Mutex::new(StoreInner::default()),
        }
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// Current snapshot for consumers.
    pub fn view(&self) -> CartView {
        self.lock().view()
    }

    /// Header-badge count: a selector over `summary.total_items`, not a
    /// separately maintained state slice, so it can never lag the summary.
    pub fn cart_count(&self) -> i64 {
        self.lock().summary.total_items
    }

    /// Runs a closure against the item list without cloning it.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let savings = store.with_items(souk_core::summary::discount_total);
    /// ```
    pub fn with_items<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[CartItem]) -> R,
    {
        let inner = self.lock();
        f(&inner.items)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Unconditional full refresh from the server.
    ///
    /// On success the server's view replaces items and summary wholesale
    /// and `last_error` clears. On failure the prior snapshot stays
    /// untouched.
    pub async fn fetch_cart(&self) -> CartResult<CartView> {
        debug!("fetch_cart");
        let fence = self.begin_wholesale();

        match self.client.fetch().await {
            Ok(payload) => Ok(self.apply_fetch(payload, fence)),
            Err(err) => Err(self.record_failure(err, FETCH_FALLBACK)),
        }
    }

    /// Adds `quantity` units of `product` with the chosen options.
    ///
    /// An existing line with the same `(product id, options)` identity is
    /// incremented in place; otherwise the server-confirmed line is
    /// appended with the given product snapshot frozen onto it.
    pub async fn add_to_cart(
        &self,
        product: &ProductSnapshot,
        quantity: i64,
        options: SelectedOptions,
    ) -> CartResult<CartView> {
        debug!(product_id = %product.id, quantity, "add_to_cart");
        self.guard(validate_quantity(quantity))?;
        self.guard(validate_product_id(&product.id))?;

        let fence = self.begin_line(&product.id);

        match self.client.add(&product.id, quantity, &options).await {
            Ok(confirmed) => Ok(self.apply_add(product, quantity, options, confirmed, fence)),
            Err(err) => Err(self.record_failure(err, ADD_FALLBACK)),
        }
    }

    /// Removes the line for `product_id`.
    ///
    /// A missing line is already-consistent state, not an error: the
    /// operation still succeeds and the snapshot is unchanged.
    pub async fn remove_from_cart(&self, product_id: &str) -> CartResult<CartView> {
        debug!(product_id, "remove_from_cart");
        self.guard(validate_product_id(product_id))?;

        let fence = self.begin_line(product_id);

        match self.client.remove(product_id).await {
            Ok(()) => Ok(self.apply_remove(product_id, fence)),
            Err(err) => Err(self.record_failure(err, REMOVE_FALLBACK)),
        }
    }

    /// Sets the line for `product_id` to `new_quantity`.
    ///
    /// Quantities below 1 fast-fail locally; no network call is issued.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        new_quantity: i64,
    ) -> CartResult<CartView> {
        debug!(product_id, new_quantity, "update_quantity");
        self.guard(validate_quantity(new_quantity))?;
        self.guard(validate_product_id(product_id))?;

        let fence = self.begin_line(product_id);

        match self.client.update_quantity(product_id, new_quantity).await {
            Ok(()) => Ok(self.apply_update(product_id, new_quantity, fence)),
            Err(err) => Err(self.record_failure(err, UPDATE_FALLBACK)),
        }
    }

    /// Empties the cart.
    ///
    /// Resets to empty items and a zero summary regardless of prior state;
    /// clearing an already-empty cart is a no-op success.
    pub async fn clear_cart(&self) -> CartResult<CartView> {
        debug!("clear_cart");
        let fence = self.begin_wholesale();

        match self.client.clear().await {
            Ok(()) => Ok(self.apply_clear(fence)),
            Err(err) => Err(self.record_failure(err, CLEAR_FALLBACK)),
        }
    }

    // =========================================================================
    // Issuance (lock held briefly, released before the network await)
    // =========================================================================

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("cart mutex poisoned")
    }

    /// Rejects invalid input before any network traffic, mirroring the
    /// message into `last_error` for passive consumers.
    fn guard(&self, check: Result<(), souk_core::ValidationError>) -> CartResult<()> {
        check.map_err(|err| {
            let mut inner = self.lock();
            inner.last_error = Some(err.to_string());
            CartError::from(err)
        })
    }

    fn begin_line(&self, product_id: &str) -> Fence {
        let mut inner = self.lock();
        inner.pending += 1;

        let generation = *inner
            .line_gens
            .entry(product_id.to_string())
            .and_modify(|g| *g += 1)
            .or_insert(1);

        Fence {
            epoch: inner.epoch,
            line: Some((product_id.to_string(), generation)),
        }
    }

    fn begin_wholesale(&self) -> Fence {
        let mut inner = self.lock();
        inner.pending += 1;
        inner.epoch += 1;

        Fence {
            epoch: inner.epoch,
            line: None,
        }
    }

    // =========================================================================
    // Application (at resume time, against the snapshot as it is NOW)
    // =========================================================================

    fn apply_fetch(&self, payload: CartPayload, fence: Fence) -> CartView {
        let mut inner = self.lock();
        inner.pending -= 1;

        if !inner.fence_current(&fence) {
            warn!("discarding stale fetch response");
            return inner.view();
        }

        let summary = payload
            .summary
            .unwrap_or_else(|| summarize(&payload.items));

        inner.items = payload.items;
        inner.summary = summary;
        inner.last_error = None;
        inner.view()
    }

    fn apply_add(
        &self,
        product: &ProductSnapshot,
        quantity: i64,
        options: SelectedOptions,
        confirmed: ConfirmedItem,
        fence: Fence,
    ) -> CartView {
        let mut inner = self.lock();
        inner.pending -= 1;

        if !inner.fence_current(&fence) {
            warn!(product_id = %product.id, "discarding stale add response");
            return inner.view();
        }

        match inner
            .items
            .iter_mut()
            .find(|item| item.matches_line(&product.id, &options))
        {
            Some(line) => line.quantity += quantity,
            None => {
                let mut line = CartItem::new(product, confirmed.quantity, options);
                line.added_at = confirmed.added_at;
                inner.items.push(line);
            }
        }

        inner.summary.total_items += quantity;
        inner.summary.total_cost += product.unit_price().multiply_quantity(quantity);
        inner.last_error = None;
        inner.view()
    }

    fn apply_remove(&self, product_id: &str, fence: Fence) -> CartView {
        let mut inner = self.lock();
        inner.pending -= 1;

        if !inner.fence_current(&fence) {
            warn!(product_id, "discarding stale remove response");
            return inner.view();
        }

        if let Some(position) = inner
            .items
            .iter()
            .position(|item| item.product_id == product_id)
        {
            let line = inner.items.remove(position);
            inner.summary.total_items -= line.quantity;
            inner.summary.total_cost -= line.line_total();
        }
        // Absent line: the server and this snapshot already agree.

        inner.last_error = None;
        inner.view()
    }

    fn apply_update(&self, product_id: &str, new_quantity: i64, fence: Fence) -> CartView {
        let mut inner = self.lock();
        inner.pending -= 1;

        if !inner.fence_current(&fence) {
            warn!(product_id, "discarding stale update response");
            return inner.view();
        }

        if let Some(position) = inner
            .items
            .iter()
            .position(|item| item.product_id == product_id)
        {
            let diff = new_quantity - inner.items[position].quantity;
            let unit_price = inner.items[position].unit_price();

            inner.items[position].quantity = new_quantity;
            inner.summary.total_items += diff;
            inner.summary.total_cost += unit_price.multiply_quantity(diff);
        }
        // Absent line (e.g. removed while this request was in flight): no-op.

        inner.last_error = None;
        inner.view()
    }

    fn apply_clear(&self, fence: Fence) -> CartView {
        let mut inner = self.lock();
        inner.pending -= 1;

        if !inner.fence_current(&fence) {
            warn!("discarding stale clear response");
            return inner.view();
        }

        inner.items.clear();
        inner.summary = CartSummary::empty();
        inner.last_error = None;
        inner.view()
    }

    /// Failure path shared by every operation: the mutation was never
    /// applied locally, so there is nothing to undo, only record.
    fn record_failure(&self, err: CartError, fallback: &str) -> CartError {
        warn!(error = %err, "cart operation failed");

        let mut inner = self.lock();
        inner.pending -= 1;
        inner.last_error = Some(err.user_message(fallback));
        err
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
