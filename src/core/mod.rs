//! Core module - the sampling-plan calculation engine

pub mod advisor;
pub mod cache;
pub mod dist;
pub mod engine;
pub mod error;
pub mod history;
pub mod model;
pub mod oc;
pub mod search;
pub mod simulate;
pub mod tier;

pub use advisor::{explore_alternatives, Alternative, AlternativeChange};
pub use cache::{PlanCache, PlanKey, DEFAULT_PLAN_CACHE_CAPACITY};
pub use dist::{select_model, DistCache, ProbabilityModel};
pub use engine::PlanEngine;
pub use error::PlanError;
pub use history::{Adjustment, AdjustmentPolicy, InspectionSeverity, SeverityAssessment};
pub use model::{
    CategoryCount, HistoricalAggregate, HistoricalContext, OcPoint, SampleSize, SamplingRequest,
    SamplingResult,
};
pub use oc::{generate_curve, OC_DEFECT_RATE_GRID};
pub use search::{find_min_sample_size, SearchResult, PRACTICAL_SEARCH_LIMIT};
pub use simulate::{simulate_plan, SimulationReport};
pub use tier::{plan_sample_size, LotTier};
