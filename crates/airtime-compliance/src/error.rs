//! Compliance error types.

use thiserror::Error;

/// Errors from the external compliance registry.
///
/// "Number not found" is a normal lookup outcome, not an error; only
/// genuine failures (network, backend) are represented here.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry could not be reached.
    #[error("Compliance registry unavailable: {0}")]
    Unavailable(String),

    /// The registry answered with something unusable.
    #[error("Compliance registry returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors from compliance support state (consent store access etc.).
#[derive(Error, Debug)]
pub enum ComplianceError {
    /// The session/consent store failed.
    #[error("Store error: {0}")]
    Store(#[from] airtime_store::StoreError),
}
