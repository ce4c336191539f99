use serde::{Deserialize, Serialize};

use crate::data::Sector;

/// The active dropdown subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// All sectors combined, historical data only.
    #[default]
    Aggregate,
    Sector(Sector),
}

impl Selection {
    pub fn is_aggregate(self) -> bool {
        matches!(self, Selection::Aggregate)
    }
}
