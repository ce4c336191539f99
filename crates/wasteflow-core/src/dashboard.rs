//! Dashboard controller: owns the selection/allocation state and runs one
//! input event at a time through balancer → redistributor → impact
//! calculator → view-model assembler.

use serde::{Deserialize, Serialize};

use crate::allocation::{editable_flags, AllocationState, Balancer, EditableFlags};
use crate::config::DashboardConfig;
use crate::data::{BaselineData, Pathway, Sector};
use crate::error::DashboardError;
use crate::impact::{compute_impacts, ImpactResult};
use crate::selection::Selection;
use crate::view_model::{assemble, ViewModel};

// ── State ─────────────────────────────────────────────────────────────────────

/// Selection plus the allocation that applies to it.
/// `allocation` is `Some` exactly when a concrete sector is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardState {
    selection: Selection,
    allocation: Option<AllocationState>,
}

impl DashboardState {
    pub fn aggregate() -> Self {
        Self::default()
    }

    pub fn for_sector(sector: Sector, allocation: AllocationState) -> Self {
        Self { selection: Selection::Sector(sector), allocation: Some(allocation) }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn allocation(&self) -> Option<&AllocationState> {
        self.allocation.as_ref()
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// One user input, already validated at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum DashboardEvent {
    SelectionChanged { selection: Selection },
    SliderMoved { pathway: Pathway, value: i32 },
}

/// What the front end needs after a dropdown change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub allocation: Option<AllocationState>,
    pub editable: EditableFlags,
}

// ── Controller ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    baseline: BaselineData,
    balancer: Balancer,
    baseline_impacts: ImpactResult,
    state: DashboardState,
}

impl Dashboard {
    /// Starts in the aggregate view with no active allocation.
    pub fn new(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: DashboardConfig) -> Self {
        let baseline = BaselineData::standard();
        let baseline_impacts = compute_impacts(&baseline.table(), &baseline.factors);
        Self {
            balancer: Balancer::new(config.precedence),
            config,
            baseline,
            baseline_impacts,
            state: DashboardState::aggregate(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn baseline(&self) -> &BaselineData {
        &self.baseline
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Switch subset. A sector always resets to its configured default split,
    /// discarding earlier slider positions; the aggregate view deactivates
    /// the allocation.
    pub fn set_selection(&mut self, selection: Selection) -> SelectionOutcome {
        let allocation = match selection {
            Selection::Aggregate => None,
            Selection::Sector(sector) => match self.config.default_allocation(sector) {
                Ok(a) => Some(a),
                Err(e) => {
                    log::error!("default split for {sector:?} rejected: {e}");
                    return self.selection_outcome();
                }
            },
        };
        self.state = DashboardState { selection, allocation };
        log::debug!("selection -> {selection:?}, allocation {allocation:?}");
        self.selection_outcome()
    }

    /// Apply one slider edit. Rejected in the aggregate view; a balancer
    /// defect leaves the prior allocation in place.
    pub fn set_allocation(
        &mut self,
        pathway: Pathway,
        raw: i32,
    ) -> Result<AllocationState, DashboardError> {
        let prior = match self.state.allocation {
            Some(a) if !self.state.selection.is_aggregate() => a,
            _ => return Err(DashboardError::NotEditable),
        };
        let next = self.balancer.rebalance(&prior, pathway, raw)?;
        self.state.allocation = Some(next);
        log::debug!("{pathway:?} slider -> {raw}, allocation {next:?}");
        Ok(next)
    }

    /// Route an explicit event and return the refreshed view.
    pub fn handle(&mut self, event: DashboardEvent) -> Result<ViewModel, DashboardError> {
        match event {
            DashboardEvent::SelectionChanged { selection } => {
                self.set_selection(selection);
            }
            DashboardEvent::SliderMoved { pathway, value } => {
                self.set_allocation(pathway, value)?;
            }
        }
        Ok(self.view_model())
    }

    /// Snapshot of the current state. No side effects.
    pub fn view_model(&self) -> ViewModel {
        assemble(&self.config, &self.baseline, &self.state, &self.baseline_impacts)
    }

    fn selection_outcome(&self) -> SelectionOutcome {
        SelectionOutcome {
            allocation: self.state.allocation,
            editable: editable_flags(self.state.selection),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::with_config(DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{Partners, PrecedenceRule};
    use crate::data::PerPathway;

    #[test]
    fn starts_in_aggregate_view() {
        let d = Dashboard::default();
        assert_eq!(d.state().selection(), Selection::Aggregate);
        assert!(d.state().allocation().is_none());
    }

    #[test]
    fn sliders_rejected_in_aggregate_view() {
        let mut d = Dashboard::default();
        let err = d.set_allocation(Pathway::Landfill, 50).unwrap_err();
        assert!(matches!(err, DashboardError::NotEditable));
        assert!(d.state().allocation().is_none());
    }

    #[test]
    fn selection_resets_to_default_split() {
        let mut d = Dashboard::default();
        let out = d.set_selection(Selection::Sector(Sector::FoodService));
        assert_eq!(out.allocation, Some(AllocationState::new(79, 19, 2).unwrap()));
        assert_eq!(out.editable, PerPathway::new(true, true, true));
        d.set_allocation(Pathway::Compost, 60).unwrap();
        let out = d.set_selection(Selection::Sector(Sector::FoodService));
        assert_eq!(out.allocation, Some(AllocationState::new(79, 19, 2).unwrap()));
    }

    #[test]
    fn handle_routes_events() {
        let mut d = Dashboard::default();
        let vm = d
            .handle(DashboardEvent::SelectionChanged { selection: Selection::Sector(Sector::Retail) })
            .unwrap();
        assert_eq!(vm.flow_diagram.edges.len(), 3);
        let vm = d
            .handle(DashboardEvent::SliderMoved { pathway: Pathway::Compost, value: 50 })
            .unwrap();
        // compost edit: combustion secondary (16 fits), landfill remainder.
        assert_eq!(vm.allocation, Some(AllocationState::new(34, 16, 50).unwrap()));
    }

    #[test]
    fn event_deserialises_from_tagged_json() {
        let e: DashboardEvent =
            serde_json::from_str(r#"{ "event": "slider_moved", "pathway": "landfill", "value": 90 }"#)
                .unwrap();
        assert_eq!(e, DashboardEvent::SliderMoved { pathway: Pathway::Landfill, value: 90 });
        let e: DashboardEvent = serde_json::from_str(
            r#"{ "event": "selection_changed", "selection": { "sector": "residential" } }"#,
        )
        .unwrap();
        assert_eq!(
            e,
            DashboardEvent::SelectionChanged { selection: Selection::Sector(Sector::Residential) }
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = DashboardConfig::default();
        config.precedence.0.landfill = Partners::new(Pathway::Landfill, Pathway::Compost);
        assert!(Dashboard::new(config).is_err());
        assert!(Dashboard::new(DashboardConfig {
            precedence: PrecedenceRule::cyclic(),
            ..DashboardConfig::default()
        })
        .is_ok());
    }
}
