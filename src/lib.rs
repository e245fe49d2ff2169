//! SQC: Statistical Quality Control sampling toolkit
//!
//! Computes AQL/LTPD acceptance-sampling plans: minimum sample size under
//! producer/consumer risk constraints, operating characteristic curves, and
//! historical-data-driven parameter adjustment.

pub mod cli;
pub mod core;
pub mod report;
