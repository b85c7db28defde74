//! Built-in sample catalog.
//!
//! Fallback data so the storefront is never empty when the deal source
//! cannot be reached on first load. A later successful fetch replaces it.

use airtime_commerce::deal::{Availability, Deal, DealBuilder, DealKind, Demand};
use airtime_commerce::money::Money;

/// The static fallback catalog.
pub fn sample_catalog() -> Vec<Deal> {
    vec![
        DealBuilder::new(
            "sample-vodacom-r100",
            "Vodacom",
            Money::from_rands(100.0),
            Money::from_rands(90.0),
        )
        .vendor("AirSupply Trading")
        .kind(DealKind::Airtime)
        .demand(Demand::High)
        .verified(true)
        .network_price(Money::from_rands(78.0))
        .build(),
        DealBuilder::new(
            "sample-vodacom-1gb",
            "Vodacom",
            Money::from_rands(149.0),
            Money::from_rands(129.0),
        )
        .vendor("AirSupply Trading")
        .kind(DealKind::Data)
        .bonus("plus 1GB night data")
        .verified(true)
        .network_price(Money::from_rands(112.0))
        .build(),
        DealBuilder::new(
            "sample-mtn-r50",
            "MTN",
            Money::from_rands(50.0),
            Money::from_rands(44.0),
        )
        .vendor("Mzansi Mobile")
        .kind(DealKind::Airtime)
        .verified(true)
        .network_price(Money::from_rands(38.5))
        .build(),
        DealBuilder::new(
            "sample-mtn-2gb",
            "MTN",
            Money::from_rands(199.0),
            Money::from_rands(165.0),
        )
        .vendor("Mzansi Mobile")
        .kind(DealKind::Data)
        .demand(Demand::High)
        .availability(Availability::Limited)
        .verified(true)
        .network_price(Money::from_rands(142.0))
        .build(),
        DealBuilder::new(
            "sample-cellc-r100",
            "Cell C",
            Money::from_rands(100.0),
            Money::from_rands(85.0),
        )
        .vendor("Kasi Connect")
        .kind(DealKind::Airtime)
        .demand(Demand::Low)
        .verified(true)
        .network_price(Money::from_rands(74.0))
        .build(),
        DealBuilder::new(
            "sample-telkom-bundle",
            "Telkom Mobile",
            Money::from_rands(120.0),
            Money::from_rands(102.0),
        )
        .vendor("Kasi Connect")
        .kind(DealKind::Bundle)
        .bonus("R50 airtime + 1GB data")
        .verified(true)
        .network_price(Money::from_rands(88.0))
        .build(),
    ]
}
