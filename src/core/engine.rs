//! Plan calculation facade
//!
//! Wires the pipeline together: validate -> adjust by history -> tiered
//! search (through the bounded result cache) -> OC curve. Owns both caches
//! explicitly; there is no module-global state.

use crate::core::advisor::{explore_alternatives, Alternative};
use crate::core::cache::{PlanCache, PlanKey};
use crate::core::dist::DistCache;
use crate::core::error::PlanError;
use crate::core::history::{AdjustmentPolicy, SeverityAssessment};
use crate::core::model::{HistoricalContext, OcPoint, SamplingRequest, SamplingResult};
use crate::core::oc::generate_curve;
use crate::core::tier::plan_sample_size;

/// Synchronous sampling-plan engine. One instance per worker; wrap in a
/// mutex if shared, since cache eviction mutates internal state.
#[derive(Debug, Default)]
pub struct PlanEngine {
    dist: DistCache,
    plans: PlanCache,
    policy: AdjustmentPolicy,
    searches: u64,
}

impl PlanEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AdjustmentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &AdjustmentPolicy {
        &self.policy
    }

    /// How many times the underlying search has actually run. Cached
    /// requests do not increment this.
    pub fn search_invocations(&self) -> u64 {
        self.searches
    }

    /// Calculate a sampling plan for the request, optionally adjusted by
    /// historical defect data.
    ///
    /// Invalid parameters are the only error path; infeasible designs and
    /// numeric failures come back as renderable [`SamplingResult`] states.
    pub fn calculate(
        &mut self,
        request: &SamplingRequest,
        history: Option<&HistoricalContext>,
    ) -> Result<SamplingResult, PlanError> {
        request.validate()?;

        let no_history = HistoricalContext::default();
        let history = history.unwrap_or(&no_history);
        let adjustment = self.policy.adjust(request.aql, request.ltpd, history);

        let key = PlanKey::new(
            adjustment.aql,
            adjustment.ltpd,
            request.alpha,
            request.beta,
            request.c_value,
            request.lot_size,
        );
        let cached = self.plans.get(&key).cloned();
        let search = match cached {
            Some(hit) => hit,
            None => {
                self.searches += 1;
                let fresh = plan_sample_size(
                    &mut self.dist,
                    adjustment.aql,
                    adjustment.ltpd,
                    request.alpha,
                    request.beta,
                    request.c_value,
                    request.lot_size,
                );
                self.plans.insert(key, fresh.clone());
                fresh
            }
        };

        let oc_curve = generate_curve(
            &mut self.dist,
            &search.sample_size,
            request.c_value,
            request.lot_size,
        );

        Ok(SamplingResult {
            sample_size: search.sample_size,
            warning: search.warning,
            oc_curve,
            original_aql: request.aql,
            original_ltpd: request.ltpd,
            adjusted_aql: adjustment.aql,
            adjusted_ltpd: adjustment.ltpd,
            adjustment_rationale: adjustment.rationale,
            severity: SeverityAssessment::from_history(history),
        })
    }

    /// Probe the alternative menu around the (adjusted) request.
    pub fn alternatives(
        &mut self,
        request: &SamplingRequest,
        history: Option<&HistoricalContext>,
    ) -> Result<Vec<Alternative>, PlanError> {
        request.validate()?;

        let no_history = HistoricalContext::default();
        let history = history.unwrap_or(&no_history);
        let adjustment = self.policy.adjust(request.aql, request.ltpd, history);

        Ok(explore_alternatives(
            &mut self.dist,
            adjustment.aql,
            adjustment.ltpd,
            request.alpha,
            request.beta,
            request.c_value,
            request.lot_size,
        ))
    }

    /// OC curve for an explicit plan, bypassing the search.
    pub fn oc_curve(&mut self, sample_size: u64, c_value: u32, lot_size: u64) -> Vec<OcPoint> {
        generate_curve(
            &mut self.dist,
            &crate::core::model::SampleSize::Exact(sample_size),
            c_value,
            lot_size,
        )
    }

    /// Acceptance probability for an explicit plan, in [0, 1].
    pub fn acceptance_probability(
        &mut self,
        sample_size: u64,
        c_value: u32,
        lot_size: u64,
        defect_rate_percent: f64,
    ) -> f64 {
        self.dist
            .acceptance_probability(sample_size, c_value, lot_size, defect_rate_percent)
    }

    /// Shared probability cache, for collaborators that evaluate directly.
    pub fn dist_mut(&mut self) -> &mut DistCache {
        &mut self.dist
    }
}
