//! Phone network classification and RICA compliance gating.
//!
//! Two layers:
//!
//! - **network**: pure prefix-table classification of South African
//!   mobile numbers — no I/O, never fails.
//! - **gate**: the checkout-time compliance decision, combining a
//!   caller-supplied registered-number fast path with an external
//!   registry lookup, degrading to consent-gated acceptance when the
//!   registry cannot answer.

pub mod error;
pub mod gate;
pub mod network;
pub mod registry;

pub use error::{ComplianceError, RegistryError};
pub use gate::{ComplianceGate, ComplianceStatus, PhoneComplianceRecord};
pub use registry::{
    ComplianceRegistry, RegisteredNumbers, RegistrationRecord, SessionVerifiedNumber,
};
