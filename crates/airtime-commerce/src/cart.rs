//! Cart and line item types.
//!
//! A line item snapshots the deal's prices (including the hidden
//! `network_price` / `markup_amount`) at the moment it is added, so a
//! later catalog refresh cannot retroactively reprice a cart.

use crate::deal::Deal;
use crate::error::CommerceError;
use crate::ids::{CartId, CustomerId, DealId, LineItemId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 999;

/// A deal selected for purchase, with prices frozen at selection time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Catalog deal this was created from.
    pub deal_id: DealId,
    /// Carrier, denormalized for display.
    pub carrier: String,
    /// Deal description shown to the buyer.
    pub description: String,
    /// Quantity.
    pub quantity: i64,
    /// Per-unit customer price at selection time.
    pub discounted_price: Money,
    /// Hidden: per-unit wholesale cost at selection time.
    pub network_price: Money,
    /// Hidden: per-unit profit pool at selection time.
    pub markup_amount: Money,
}

impl CartLineItem {
    /// Snapshot a catalog deal into a line item.
    pub fn from_deal(deal: &Deal, quantity: i64) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        Ok(Self {
            id: LineItemId::generate(),
            deal_id: deal.id.clone(),
            carrier: deal.carrier.clone(),
            description: format!("{} {} {}", deal.carrier, deal.face_value, deal.kind.as_str()),
            quantity,
            discounted_price: deal.discounted_price,
            network_price: deal.effective_network_price(),
            markup_amount: deal.effective_markup(),
        })
    }

    /// Customer price for the whole line (`discounted_price * quantity`).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.discounted_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// Wholesale cost for the whole line.
    pub fn line_network_cost(&self) -> Result<Money, CommerceError> {
        self.network_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// Profit pool for the whole line.
    pub fn line_markup(&self) -> Result<Money, CommerceError> {
        self.markup_amount
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Customer the cart belongs to, when known.
    pub customer_id: Option<CustomerId>,
    /// Items in the cart.
    pub items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self {
            id: CartId::generate(),
            customer_id: None,
            items: Vec::new(),
        }
    }

    /// Create a cart for a known customer.
    pub fn for_customer(customer_id: CustomerId) -> Self {
        let mut cart = Self::new();
        cart.customer_id = Some(customer_id);
        cart
    }

    /// Add a deal to the cart.
    ///
    /// Adding the same deal again increases the existing line's quantity.
    pub fn add_deal(&mut self, deal: &Deal, quantity: i64) -> Result<LineItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.deal_id == deal.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::InvalidQuantity(new_quantity));
            }
            existing.quantity = new_quantity;
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let item = CartLineItem::from_deal(deal, quantity)?;
        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.items.len() < len_before
    }

    /// Clear all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::DealBuilder;

    fn deal() -> Deal {
        DealBuilder::new(
            "deal-1",
            "Vodacom",
            Money::from_rands(100.0),
            Money::from_rands(90.0),
        )
        .network_price(Money::from_rands(70.0))
        .build()
    }

    #[test]
    fn test_cart_add_deal() {
        let mut cart = Cart::new();
        cart.add_deal(&deal(), 2).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_add_same_deal_increases_quantity() {
        let mut cart = Cart::new();
        let d = deal();
        cart.add_deal(&d, 1).unwrap();
        cart.add_deal(&d, 2).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_line_item_snapshots_hidden_prices() {
        let mut cart = Cart::new();
        let mut d = deal();
        cart.add_deal(&d, 1).unwrap();

        // A "refresh" repricing the deal must not touch the carted copy.
        d.discounted_price = Money::from_rands(50.0);
        d.network_price = Some(Money::from_rands(10.0));

        let item = &cart.items[0];
        assert_eq!(item.discounted_price, Money::from_rands(90.0));
        assert_eq!(item.network_price, Money::from_rands(70.0));
        assert_eq!(item.markup_amount, Money::from_rands(20.0));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let id = cart.add_deal(&deal(), 1).unwrap();
        assert!(cart.remove_item(&id));
        assert!(cart.is_empty());
        assert!(!cart.remove_item(&id));
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        assert!(cart.add_deal(&deal(), 0).is_err());
        assert!(cart.add_deal(&deal(), -3).is_err());
        assert!(cart.add_deal(&deal(), MAX_QUANTITY_PER_ITEM + 1).is_err());
    }

    #[test]
    fn test_line_totals() {
        let item = CartLineItem::from_deal(&deal(), 3).unwrap();
        assert_eq!(item.line_total().unwrap(), Money::from_rands(270.0));
        assert_eq!(item.line_network_cost().unwrap(), Money::from_rands(210.0));
        assert_eq!(item.line_markup().unwrap(), Money::from_rands(60.0));
    }
}
