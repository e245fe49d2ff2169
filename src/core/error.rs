//! Error types for the calculation engine
//!
//! Only invalid input parameters surface as errors. Infeasible designs and
//! numeric domain failures degrade into valid [`SamplingResult`] values
//! instead (see `search` and `dist`).
//!
//! [`SamplingResult`]: crate::core::model::SamplingResult

use thiserror::Error;

use crate::core::model::{MAX_C_VALUE, MAX_LOT_SIZE};

/// Parameter validation failures, rejected before any search begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("AQL must be a percentage strictly between 0 and 100, got {0}")]
    InvalidAql(f64),

    #[error("LTPD must be a percentage strictly between 0 and 100, got {0}")]
    InvalidLtpd(f64),

    #[error("producer's risk (alpha) must be a percentage strictly between 0 and 100, got {0}")]
    InvalidAlpha(f64),

    #[error("consumer's risk (beta) must be a percentage strictly between 0 and 100, got {0}")]
    InvalidBeta(f64),

    #[error("lot size must be between 1 and {MAX_LOT_SIZE}, got {0}")]
    InvalidLotSize(u64),

    #[error("acceptance number must be at most {MAX_C_VALUE}, got {0}")]
    InvalidCValue(u32),
}
