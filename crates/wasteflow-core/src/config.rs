//! Injected dashboard configuration: labels, per-sector default splits, and
//! the slider precedence rule. Defaults reproduce the production dashboard.
//! Deserialised from JSON; any omitted field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationState, PrecedenceRule};
use crate::data::{PerPathway, PerSector, Sector};
use crate::error::DashboardError;
use crate::selection::Selection;

/// Display strings for the flow diagram and impact chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Name of the aggregate view, also its dropdown value.
    pub aggregate: String,
    pub sectors: PerSector<String>,
    pub pathways: PerPathway<String>,
    pub ghg_series: String,
    pub cost_series: String,
    pub ghg_axis: String,
    pub cost_axis: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            aggregate: "Most Recent Data".to_string(),
            sectors: PerSector::new(
                "Retail".to_string(),
                "Restaurants+hotels".to_string(),
                "Residential".to_string(),
            ),
            pathways: PerPathway::new(
                "Landfill".to_string(),
                "Combustion".to_string(),
                "Compost".to_string(),
            ),
            ghg_series: "GHG emission (M kg CO₂e)".to_string(),
            cost_series: "Cost (M $)".to_string(),
            ghg_axis: "GHG Emission (M kg CO₂e)".to_string(),
            cost_axis: "Cost (M $)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub labels: Labels,
    /// Slider positions applied when a sector is selected, in percent.
    pub default_splits: PerSector<PerPathway<u8>>,
    pub precedence: PrecedenceRule,
    /// Divisor applied to impact values for chart display.
    pub display_scale: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            default_splits: PerSector::new(
                PerPathway::new(49, 16, 35),
                PerPathway::new(79, 19, 2),
                PerPathway::new(78, 18, 4),
            ),
            precedence: PrecedenceRule::dashboard(),
            display_scale: 1e6,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DashboardError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DashboardError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("loaded dashboard config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        for (sector, split) in self.default_splits.iter() {
            AllocationState::try_from_values(*split).map_err(|e| {
                DashboardError::InvalidConfig(format!("default split for {sector:?}: {e}"))
            })?;
        }
        self.precedence.validate()?;
        if !(self.display_scale.is_finite() && self.display_scale > 0.0) {
            return Err(DashboardError::InvalidConfig(format!(
                "display_scale must be positive and finite, got {}",
                self.display_scale
            )));
        }
        Ok(())
    }

    /// Fixed historical split for `sector`.
    pub fn default_allocation(&self, sector: Sector) -> Result<AllocationState, DashboardError> {
        AllocationState::try_from_values(self.default_splits[sector])
    }

    pub fn sector_label(&self, sector: Sector) -> &str {
        &self.labels.sectors[sector]
    }

    /// Map a raw dropdown value onto a `Selection`.
    ///
    /// Accepts the aggregate label, `aggregate`, sector keys and configured
    /// sector labels, case-insensitively.
    pub fn parse_selection(&self, raw: &str) -> Result<Selection, DashboardError> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case(&self.labels.aggregate) || value.eq_ignore_ascii_case("aggregate") {
            return Ok(Selection::Aggregate);
        }
        if let Some((sector, _)) = self
            .labels
            .sectors
            .iter()
            .find(|(_, label)| value.eq_ignore_ascii_case(label))
        {
            return Ok(Selection::Sector(sector));
        }
        value.parse::<Sector>().map(Selection::Sector).map_err(|_| {
            log::debug!("rejecting unknown selection '{raw}'");
            DashboardError::UnknownSelection(raw.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        DashboardConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = DashboardConfig::from_json_str(
            r#"{ "labels": { "aggregate": "All Sectors" }, "display_scale": 1000.0 }"#,
        )
        .unwrap();
        assert_eq!(cfg.labels.aggregate, "All Sectors");
        assert_eq!(cfg.labels.sectors.retail, "Retail");
        assert_eq!(cfg.display_scale, 1000.0);
        assert_eq!(cfg.default_splits, DashboardConfig::default().default_splits);
    }

    #[test]
    fn bad_default_split_is_rejected() {
        let err = DashboardConfig::from_json_str(
            r#"{ "default_splits": {
                "retail":       { "landfill": 50, "combustion": 16, "compost": 35 },
                "food_service": { "landfill": 79, "combustion": 19, "compost": 2 },
                "residential":  { "landfill": 78, "combustion": 18, "compost": 4 }
            } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let err = DashboardConfig::from_json_str(r#"{ "display_scale": 0.0 }"#).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DashboardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = DashboardConfig::from_path("/nonexistent/wasteflow.json").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigRead { .. }));
    }

    #[test]
    fn parse_selection_accepts_dropdown_values() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.parse_selection("Most Recent Data").unwrap(), Selection::Aggregate);
        assert_eq!(cfg.parse_selection("aggregate").unwrap(), Selection::Aggregate);
        assert_eq!(
            cfg.parse_selection("restaurants+hotels").unwrap(),
            Selection::Sector(Sector::FoodService)
        );
        assert_eq!(cfg.parse_selection("Retail").unwrap(), Selection::Sector(Sector::Retail));
        assert!(matches!(
            cfg.parse_selection("industrial"),
            Err(DashboardError::UnknownSelection(s)) if s == "industrial"
        ));
    }
}
