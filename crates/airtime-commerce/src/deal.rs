//! Catalog deal types.
//!
//! A [`Deal`] is one resellable airtime/data entry from the scraped
//! catalog. Deals are replaced wholesale on each catalog refresh and are
//! read-only to the pricing engine; the two hidden money fields
//! (`network_price`, `markup_amount`) are never shown to the buyer.

use crate::error::CommerceError;
use crate::ids::DealId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of product the deal delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealKind {
    /// Prepaid airtime credit.
    Airtime,
    /// Mobile data.
    Data,
    /// Combined airtime + data bundle.
    Bundle,
}

impl DealKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealKind::Airtime => "airtime",
            DealKind::Data => "data",
            DealKind::Bundle => "bundle",
        }
    }
}

/// How much stock the vendor reports for a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    InStock,
    Limited,
    SoldOut,
}

/// How heavily a deal is being bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Demand {
    Low,
    #[default]
    Medium,
    High,
}

/// A purchasable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    /// Unique deal identifier within the catalog.
    pub id: DealId,
    /// Carrier the credit is redeemed on (e.g., "Vodacom").
    pub carrier: String,
    /// Face value of the airtime/data delivered.
    pub face_value: Money,
    /// Undiscounted price.
    pub original_price: Money,
    /// Price the customer is charged.
    pub discounted_price: Money,
    /// Advertised discount, percent of original price.
    pub discount_percentage: i64,
    /// Vendor offering the deal.
    pub vendor: String,
    /// Stock level reported by the vendor.
    pub availability: Availability,
    /// Demand tier.
    pub demand: Demand,
    /// Product kind.
    pub kind: DealKind,
    /// Optional bonus copy (e.g., "plus 500MB night data").
    pub bonus: Option<String>,
    /// When the deal stops being sellable, if known.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the deal passed the platform's verification checks.
    pub verified: bool,
    /// Hidden: wholesale cost paid to the carrier. Never shown to buyers.
    pub network_price: Option<Money>,
    /// Hidden: profit pool (`discounted_price - network_price`).
    pub markup_amount: Option<Money>,
}

impl Deal {
    /// Wholesale cost, treating a missing value as zero.
    pub fn effective_network_price(&self) -> Money {
        self.network_price.unwrap_or_else(Money::zero)
    }

    /// Profit pool for this deal, treating a missing value as zero.
    ///
    /// Prefers the stored `markup_amount`; falls back to deriving it from
    /// the discounted price when only the wholesale cost is present.
    pub fn effective_markup(&self) -> Money {
        match (self.markup_amount, self.network_price) {
            (Some(markup), _) => markup,
            (None, Some(network)) => self.discounted_price - network,
            (None, None) => Money::zero(),
        }
    }

    /// Check whether the deal has passed its expiry timestamp.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|t| t <= now).unwrap_or(false)
    }

    /// Validate the deal's internal invariants.
    ///
    /// Violations indicate bad catalog data, not a recoverable pricing
    /// condition, so the caller decides whether to drop or surface them.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.discounted_price > self.original_price {
            return Err(self.invalid("discounted price exceeds original price"));
        }
        if let (Some(markup), Some(_)) = (self.markup_amount, self.network_price) {
            if markup.is_negative() {
                return Err(self.invalid("negative markup"));
            }
        }
        let expected = discount_percentage_for(self.original_price, self.discounted_price);
        if self.discount_percentage != expected {
            return Err(self.invalid("discount percentage does not match prices"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> CommerceError {
        CommerceError::InvalidDeal {
            id: self.id.as_str().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Discount percentage implied by a pair of prices, rounded to the
/// nearest whole percent. Zero when the original price is zero.
pub fn discount_percentage_for(original: Money, discounted: Money) -> i64 {
    if original.cents == 0 {
        return 0;
    }
    let saved = (original.cents - discounted.cents) as f64;
    (100.0 * saved / original.cents as f64).round() as i64
}

/// Builder-style constructor for catalog and test data.
#[derive(Debug, Clone)]
pub struct DealBuilder {
    deal: Deal,
}

impl DealBuilder {
    /// Start a deal with the mandatory pricing fields. The discount
    /// percentage is derived from the prices.
    pub fn new(
        id: impl Into<DealId>,
        carrier: impl Into<String>,
        original_price: Money,
        discounted_price: Money,
    ) -> Self {
        Self {
            deal: Deal {
                id: id.into(),
                carrier: carrier.into(),
                face_value: original_price,
                original_price,
                discounted_price,
                discount_percentage: discount_percentage_for(original_price, discounted_price),
                vendor: String::new(),
                availability: Availability::default(),
                demand: Demand::default(),
                kind: DealKind::Airtime,
                bonus: None,
                expires_at: None,
                verified: false,
                network_price: None,
                markup_amount: None,
            },
        }
    }

    pub fn face_value(mut self, value: Money) -> Self {
        self.deal.face_value = value;
        self
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.deal.vendor = vendor.into();
        self
    }

    pub fn kind(mut self, kind: DealKind) -> Self {
        self.deal.kind = kind;
        self
    }

    pub fn availability(mut self, availability: Availability) -> Self {
        self.deal.availability = availability;
        self
    }

    pub fn demand(mut self, demand: Demand) -> Self {
        self.deal.demand = demand;
        self
    }

    pub fn bonus(mut self, bonus: impl Into<String>) -> Self {
        self.deal.bonus = Some(bonus.into());
        self
    }

    pub fn expires_at(mut self, when: DateTime<Utc>) -> Self {
        self.deal.expires_at = Some(when);
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.deal.verified = verified;
        self
    }

    /// Set the wholesale cost and derive the markup from it.
    pub fn network_price(mut self, network: Money) -> Self {
        self.deal.network_price = Some(network);
        self.deal.markup_amount = Some(self.deal.discounted_price - network);
        self
    }

    /// Override the markup independently of the wholesale cost.
    pub fn markup_amount(mut self, markup: Money) -> Self {
        self.deal.markup_amount = Some(markup);
        self
    }

    pub fn build(self) -> Deal {
        self.deal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn deal() -> Deal {
        DealBuilder::new(
            "deal-1",
            "Vodacom",
            Money::from_rands(100.0),
            Money::from_rands(90.0),
        )
        .vendor("AirSupply")
        .network_price(Money::from_rands(70.0))
        .build()
    }

    #[test]
    fn test_deal_valid() {
        assert!(deal().validate().is_ok());
    }

    #[test]
    fn test_deal_discount_percentage_derived() {
        let d = deal();
        assert_eq!(d.discount_percentage, 10);
    }

    #[test]
    fn test_discount_percentage_rounds() {
        // 100 -> 66.66: 33.34% off, rounds to 33
        assert_eq!(
            discount_percentage_for(Money::from_rands(100.0), Money::from_rands(66.66)),
            33
        );
        assert_eq!(discount_percentage_for(Money::zero(), Money::zero()), 0);
    }

    #[test]
    fn test_deal_markup_from_network_price() {
        let d = deal();
        assert_eq!(d.effective_markup(), Money::from_rands(20.0));
        assert_eq!(d.effective_network_price(), Money::from_rands(70.0));
    }

    #[test]
    fn test_deal_missing_hidden_fields_are_zero() {
        let d = DealBuilder::new(
            "deal-2",
            "MTN",
            Money::from_rands(50.0),
            Money::from_rands(45.0),
        )
        .build();
        assert_eq!(d.effective_markup(), Money::zero());
        assert_eq!(d.effective_network_price(), Money::zero());
    }

    #[test]
    fn test_deal_invalid_when_discounted_above_original() {
        let d = DealBuilder::new(
            "deal-3",
            "MTN",
            Money::from_rands(50.0),
            Money::from_rands(55.0),
        )
        .build();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_deal_invalid_when_percentage_mismatched() {
        let mut d = deal();
        d.discount_percentage = 50;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_deal_expiry() {
        let now = Utc::now();
        let mut d = deal();
        assert!(!d.is_expired(now));

        d.expires_at = Some(now - Duration::hours(1));
        assert!(d.is_expired(now));

        d.expires_at = Some(now + Duration::hours(1));
        assert!(!d.is_expired(now));
    }
}
