//! Flow redistributor: re-splits one sector's historical total across the
//! pathways according to an allocation. Total mass is conserved.

use crate::allocation::AllocationState;
use crate::data::{BaselineData, FlowTable, PerPathway, Sector};

/// `total(sector) × pct(pathway) / 100` for each pathway.
pub fn redistribute(
    baseline: &BaselineData,
    sector: Sector,
    allocation: &AllocationState,
) -> PerPathway<f64> {
    let total = baseline.sector_total(sector);
    PerPathway::from_fn(|p| total * allocation.fraction(p))
}

/// Single-sector flow table for the impact calculator.
pub fn redistributed_table(
    baseline: &BaselineData,
    sector: Sector,
    allocation: &AllocationState,
) -> FlowTable {
    FlowTable::single(sector, redistribute(baseline, sector, allocation))
}
