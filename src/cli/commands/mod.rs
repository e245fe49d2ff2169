//! CLI command implementations

pub mod alternatives;
pub mod oc;
pub mod plan;
pub mod simulate;
