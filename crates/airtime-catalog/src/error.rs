//! Catalog error types.

use thiserror::Error;

/// Errors that can occur refreshing the deal catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Fetching the current catalog failed.
    #[error("Deal source unavailable: {0}")]
    SourceUnavailable(String),

    /// The upstream scrape trigger failed.
    #[error("Scrape trigger failed: {0}")]
    ScrapeFailed(String),

    /// Another refresh is already in flight; this trigger was dropped.
    #[error("A catalog refresh is already in flight")]
    RefreshInFlight,
}
