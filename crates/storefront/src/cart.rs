//! The pharmacy's order basket.
//!
//! `Cart` is an explicitly owned state container: routes pull it out of the
//! session, mutate it, and write it back before rendering, so every
//! consumer (cart page, toolbar badge) observes the new totals within the
//! same request. Nothing here is global - tests get a fresh instance each.
//!
//! Uniqueness invariant: at most one line per `(medicinal_id, deposit_id)`
//! pair; repeated additions merge by incrementing the quantity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_core::{DepositId, MedicinalId};

/// The badge shows an exact count up to this many items, then "9+".
const BADGE_CAP: u32 = 9;

/// One line entry in the pending order basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The medicine being ordered.
    pub medicinal_id: MedicinalId,
    /// Display name (brand name as listed by the deposit).
    pub name: String,
    /// Unit price at the time the item was added.
    pub unit_price: Decimal,
    /// Number of units; always >= 1 while the entry exists.
    pub quantity: u32,
    /// The deposit that owns the listing.
    pub deposit_id: DepositId,
}

impl CartItem {
    /// Line total for this entry.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Session-scoped basket of [`CartItem`]s.
///
/// Lives for the browser tab/session only; checkout clears it, and no
/// persistence survives a server restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item, merging with an existing `(medicinal, deposit)` line.
    ///
    /// Zero-quantity additions are ignored so the merge can never produce
    /// an entry with quantity zero.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }

        match self.find_mut(&item.medicinal_id, &item.deposit_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
    }

    /// Overwrite the quantity of a line; a quantity of zero removes it.
    pub fn set_quantity(&mut self, medicinal_id: &MedicinalId, deposit_id: &DepositId, qty: u32) {
        if qty == 0 {
            self.remove(medicinal_id, deposit_id);
            return;
        }

        if let Some(existing) = self.find_mut(medicinal_id, deposit_id) {
            existing.quantity = qty;
        }
    }

    /// Delete a line if present; absent lines are a no-op, not an error.
    pub fn remove(&mut self, medicinal_id: &MedicinalId, deposit_id: &DepositId) {
        self.items
            .retain(|i| !(i.medicinal_id == *medicinal_id && i.deposit_id == *deposit_id));
    }

    /// Empty the cart (after a successful checkout).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Live sum of quantities across all lines.
    ///
    /// Always computed from the lines themselves - there is no cached
    /// counter to go stale.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Live sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Toolbar badge text: the exact count, capped at "9+".
    #[must_use]
    pub fn badge_label(&self) -> String {
        let total = self.total_items();
        if total > BADGE_CAP {
            format!("{BADGE_CAP}+")
        } else {
            total.to_string()
        }
    }

    fn find_mut(
        &mut self,
        medicinal_id: &MedicinalId,
        deposit_id: &DepositId,
    ) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|i| i.medicinal_id == *medicinal_id && i.deposit_id == *deposit_id)
    }
}
