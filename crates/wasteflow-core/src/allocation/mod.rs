//! Allocation balancer.
//!
//! Holds the three disposal percentages of a single selected sector and keeps
//! them summing to exactly 100 across slider edits and selection changes.
//! In the aggregate view no allocation exists and the sliders are disabled.

pub mod balancer;
pub mod precedence;

pub use balancer::{clamp_percent, Balancer};
pub use precedence::{Partners, PrecedenceRule};

use serde::Serialize;

use crate::data::{PerPathway, Pathway};
use crate::error::DashboardError;
use crate::selection::Selection;

/// Per-slider interactivity, as consumed by the front end.
pub type EditableFlags = PerPathway<bool>;

/// A settled percentage split. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllocationState(PerPathway<u8>);

impl AllocationState {
    pub const TOTAL: u8 = 100;

    pub fn new(landfill: u8, combustion: u8, compost: u8) -> Result<Self, DashboardError> {
        Self::try_from_values(PerPathway::new(landfill, combustion, compost))
    }

    pub fn try_from_values(values: PerPathway<u8>) -> Result<Self, DashboardError> {
        Self::from_signed(values.map(|_, &v| i64::from(v)))
    }

    /// Checked conversion from an intermediate balancing result.
    pub(crate) fn from_signed(values: PerPathway<i64>) -> Result<Self, DashboardError> {
        let sum: i64 = values.iter().map(|(_, &v)| v).sum();
        let in_range = values
            .iter()
            .all(|(_, &v)| (0..=i64::from(Self::TOTAL)).contains(&v));
        if sum != i64::from(Self::TOTAL) || !in_range {
            return Err(DashboardError::InconsistentAllocation {
                landfill: values.landfill,
                combustion: values.combustion,
                compost: values.compost,
                sum,
            });
        }
        Ok(Self(values.map(|_, &v| v as u8)))
    }

    #[inline]
    pub fn get(&self, pathway: Pathway) -> u8 {
        self.0[pathway]
    }

    pub fn values(&self) -> &PerPathway<u8> {
        &self.0
    }

    /// Share of the sector total routed to `pathway`, in [0, 1].
    pub fn fraction(&self, pathway: Pathway) -> f64 {
        f64::from(self.get(pathway)) / f64::from(Self::TOTAL)
    }
}

/// Sliders are interactive only when a concrete sector is selected.
pub fn is_editable(selection: Selection) -> bool {
    !selection.is_aggregate()
}

pub fn editable_flags(selection: Selection) -> EditableFlags {
    let editable = is_editable(selection);
    PerPathway::new(editable, editable, editable)
}
