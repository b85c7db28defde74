//! Domain types and pricing logic for the airtime resale platform.
//!
//! This crate provides the money-bearing core of the marketplace:
//!
//! - **Deal**: scraped catalog entries with hidden wholesale/markup fields
//! - **Cart**: line items that snapshot prices at selection time
//! - **Pricing**: customer totals and the three-way profit split
//!
//! # Example
//!
//! ```rust,ignore
//! use airtime_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_deal(&deal, 1)?;
//!
//! let totals = compute_totals(
//!     &cart.items,
//!     PurchaseContext::SelfPurchase,
//!     &RateConfig::default(),
//! )?;
//! println!("Charge: {}", totals.total);
//! ```

pub mod cart;
pub mod deal;
pub mod error;
pub mod ids;
pub mod money;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    pub use crate::deal::{Availability, Deal, DealBuilder, DealKind, Demand};

    pub use crate::cart::{Cart, CartLineItem};

    pub use crate::pricing::{
        compute_totals, CartTotals, ProfitAllocation, PurchaseContext, RateConfig, RecipientReward,
    };
}
