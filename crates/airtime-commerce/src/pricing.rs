//! Cart pricing and profit allocation.
//!
//! Pure computation: given the carted line items, the purchase context,
//! and the platform rate configuration, produce the customer price and the
//! split of the markup pool. The split is exhaustive by construction —
//! admin profit is always the remainder of the pool — so the populated
//! fields of an allocation sum to the pool to the cent.

use crate::cart::CartLineItem;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Platform rate configuration.
///
/// Rates are percentages (0–100). The vendor commission default applies
/// when a vendor's profile carries no rate of its own; the reward rates
/// are taken of the customer price and capped by the markup pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateConfig {
    /// Commission a vendor earns on the markup when no per-vendor rate
    /// is configured.
    pub default_commission_percent: f64,
    /// Cashback on self-purchases, as a share of customer price.
    pub cashback_percent: f64,
    /// Gift reward when the recipient is a registered customer.
    pub registered_recipient_reward_percent: f64,
    /// Gift reward when the recipient is not registered.
    pub unregistered_recipient_reward_percent: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            default_commission_percent: 10.0,
            cashback_percent: 2.5,
            registered_recipient_reward_percent: 5.0,
            unregistered_recipient_reward_percent: 2.5,
        }
    }
}

/// Who is buying, and for whom.
///
/// A closed union rather than a pair of booleans so the allocation match
/// below is checkably exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PurchaseContext {
    /// A vendor buying stock; commission from the vendor's profile, or
    /// the platform default when absent.
    Vendor { commission_percent: Option<f64> },
    /// A customer buying for their own number.
    SelfPurchase,
    /// A customer gifting to someone else's number.
    ThirdPartyGift { recipient_registered: bool },
}

/// Reward side of a third-party gift split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recipient", rename_all = "snake_case")]
pub enum RecipientReward {
    /// Recipient is an existing registered customer.
    RegisteredCustomer(Money),
    /// Recipient is unknown to the platform.
    Unregistered(Money),
}

impl RecipientReward {
    /// The reward amount regardless of recipient kind.
    pub fn amount(&self) -> Money {
        match self {
            RecipientReward::RegisteredCustomer(m) | RecipientReward::Unregistered(m) => *m,
        }
    }
}

/// How one pricing computation divided the markup pool.
///
/// Exactly one variant per computation; the fields of the populated
/// variant sum to the cart's total markup, to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "split", rename_all = "snake_case")]
pub enum ProfitAllocation {
    /// Vendor purchase: vendor commission vs. platform.
    Vendor {
        vendor_profit: Money,
        admin_profit: Money,
    },
    /// Self purchase: customer cashback vs. platform.
    SelfPurchase {
        customer_cashback: Money,
        admin_profit: Money,
    },
    /// Gift purchase: recipient reward vs. platform.
    ThirdPartyGift {
        recipient_reward: RecipientReward,
        admin_profit: Money,
    },
}

impl ProfitAllocation {
    /// Sum of the allocation's populated monetary fields.
    pub fn allocated_total(&self) -> Money {
        match self {
            ProfitAllocation::Vendor {
                vendor_profit,
                admin_profit,
            } => *vendor_profit + *admin_profit,
            ProfitAllocation::SelfPurchase {
                customer_cashback,
                admin_profit,
            } => *customer_cashback + *admin_profit,
            ProfitAllocation::ThirdPartyGift {
                recipient_reward,
                admin_profit,
            } => recipient_reward.amount() + *admin_profit,
        }
    }

    /// The platform's share.
    pub fn admin_profit(&self) -> Money {
        match self {
            ProfitAllocation::Vendor { admin_profit, .. }
            | ProfitAllocation::SelfPurchase { admin_profit, .. }
            | ProfitAllocation::ThirdPartyGift { admin_profit, .. } => *admin_profit,
        }
    }
}

/// Output of one pricing computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of hidden wholesale costs (missing treated as zero).
    pub network_cost: Money,
    /// Sum of discounted prices; what the buyer is charged.
    pub customer_price: Money,
    /// Sum of hidden markups; the pool that was split.
    pub total_markup: Money,
    /// How the pool was divided.
    pub allocation: ProfitAllocation,
    /// Amount charged; always equals `customer_price`.
    pub total: Money,
}

/// Compute customer totals and the profit split for a cart.
///
/// Pure over its inputs. Fails only on input errors (empty cart,
/// arithmetic overflow); rate misconfiguration is clamped and logged
/// rather than propagated.
pub fn compute_totals(
    items: &[CartLineItem],
    context: PurchaseContext,
    rates: &RateConfig,
) -> Result<CartTotals, CommerceError> {
    if items.is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    let mut network_cost = Money::zero();
    let mut customer_price = Money::zero();
    let mut total_markup = Money::zero();
    for item in items {
        network_cost = network_cost
            .try_add(item.line_network_cost()?)
            .ok_or(CommerceError::Overflow)?;
        customer_price = customer_price
            .try_add(item.line_total()?)
            .ok_or(CommerceError::Overflow)?;
        total_markup = total_markup
            .try_add(item.line_markup()?)
            .ok_or(CommerceError::Overflow)?;
    }

    if customer_price < network_cost {
        // Negative-margin carts are a catalog data-quality problem, not
        // a pricing failure.
        warn!(
            customer_price = %customer_price,
            network_cost = %network_cost,
            "cart prices below wholesale cost"
        );
    }

    // The allocatable pool is never negative even if the catalog carried
    // a bad markup; the reported total_markup keeps the raw sum.
    let pool = if total_markup.is_negative() {
        error!(total_markup = %total_markup, "negative markup pool clamped to zero");
        debug_assert!(false, "negative markup pool");
        Money::zero()
    } else {
        total_markup
    };

    let allocation = match context {
        PurchaseContext::Vendor { commission_percent } => {
            let rate = clamped_rate(
                commission_percent.unwrap_or(rates.default_commission_percent),
                "vendor commission",
            );
            let vendor_profit = pool.percentage(rate).clamp_to(pool);
            ProfitAllocation::Vendor {
                vendor_profit,
                admin_profit: pool - vendor_profit,
            }
        }
        PurchaseContext::SelfPurchase => {
            let rate = clamped_rate(rates.cashback_percent, "cashback");
            let customer_cashback = customer_price.percentage(rate).clamp_to(pool);
            ProfitAllocation::SelfPurchase {
                customer_cashback,
                admin_profit: pool - customer_cashback,
            }
        }
        PurchaseContext::ThirdPartyGift {
            recipient_registered,
        } => {
            let (rate, label) = if recipient_registered {
                (rates.registered_recipient_reward_percent, "registered reward")
            } else {
                (
                    rates.unregistered_recipient_reward_percent,
                    "unregistered reward",
                )
            };
            let reward = customer_price
                .percentage(clamped_rate(rate, label))
                .clamp_to(pool);
            let recipient_reward = if recipient_registered {
                RecipientReward::RegisteredCustomer(reward)
            } else {
                RecipientReward::Unregistered(reward)
            };
            ProfitAllocation::ThirdPartyGift {
                recipient_reward,
                admin_profit: pool - reward,
            }
        }
    };

    debug_assert_eq!(allocation.allocated_total(), pool, "allocation sum mismatch");

    Ok(CartTotals {
        network_cost,
        customer_price,
        total_markup,
        allocation,
        total: customer_price,
    })
}

/// Clamp a configured rate into the valid 0–100 range, logging when the
/// configuration was out of bounds.
fn clamped_rate(rate: f64, label: &str) -> f64 {
    if !(0.0..=100.0).contains(&rate) {
        error!(rate, label, "rate outside 0-100, clamping");
        debug_assert!(false, "rate outside 0-100");
        if rate.is_nan() {
            return 0.0;
        }
        return rate.clamp(0.0, 100.0);
    }
    rate
}
