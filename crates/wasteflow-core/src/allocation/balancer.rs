//! Two-of-three slider rebalancing.

use super::precedence::{Partners, PrecedenceRule};
use super::AllocationState;
use crate::data::Pathway;
use crate::error::DashboardError;

/// Clamp a raw slider reading into `[0, 100]`.
pub fn clamp_percent(raw: i32) -> i64 {
    i64::from(raw).clamp(0, i64::from(AllocationState::TOTAL))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Balancer {
    rule: PrecedenceRule,
}

impl Balancer {
    pub fn new(rule: PrecedenceRule) -> Self {
        Self { rule }
    }

    /// Apply one slider edit to `prior`.
    ///
    /// The edited value is clamped, the secondary partner is lowered only if
    /// the pair would exceed 100, and the remainder takes what is left.
    /// A result that breaks the sum invariant is returned as
    /// `InconsistentAllocation`; the caller keeps `prior`.
    pub fn rebalance(
        &self,
        prior: &AllocationState,
        edited: Pathway,
        raw: i32,
    ) -> Result<AllocationState, DashboardError> {
        let total = i64::from(AllocationState::TOTAL);
        let v = clamp_percent(raw);
        if v != i64::from(raw) {
            log::debug!("{edited:?} slider value {raw} clamped to {v}");
        }

        let Partners { secondary, remainder } = self.rule.partners(edited);
        let mut next = prior.values().map(|_, &x| i64::from(x));
        next[edited] = v;
        if v + next[secondary] > total {
            next[secondary] = total - v;
        }
        next[remainder] = total - v - next[secondary];

        AllocationState::from_signed(next).inspect_err(|e| {
            log::error!("rebalance of {edited:?} to {v} from {prior:?} rejected: {e}");
        })
    }
}
