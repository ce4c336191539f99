//! View model assembler: packages the flow-diagram edges and the
//! impact-comparison bars for the current selection and allocation.
//!
//! Output is a pure function of `(config, baseline, state)`.

use serde::Serialize;

use crate::allocation::{editable_flags, AllocationState, EditableFlags};
use crate::config::DashboardConfig;
use crate::dashboard::DashboardState;
use crate::data::{BaselineData, FlowTable, Pathway, Sector};
use crate::impact::{compute_impacts, Impact, ImpactResult};
use crate::redistribute::{redistribute, redistributed_table};
use crate::selection::Selection;

// ── Flow diagram ─────────────────────────────────────────────────────────────

/// One sector → pathway link. `source`/`target` index into `FlowDiagram::nodes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub sector: Sector,
    pub pathway: Pathway,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDiagram {
    pub title: String,
    pub nodes: Vec<String>,
    pub edges: Vec<FlowEdge>,
}

// ── Impact chart ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "sector")]
pub enum BarRole {
    /// One sector's historical impact (aggregate view).
    Sector(Sector),
    /// All sectors combined (aggregate view).
    Total,
    /// Selected sector under the current allocation.
    Adjusted,
    /// Selected sector under its measured flows.
    Historical,
}

/// A GHG/cost bar pair on the dual-axis chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactBar {
    pub label: String,
    pub role: BarRole,
    pub impact: Impact,
    /// `impact.ghg / display_scale`.
    pub ghg_display: f64,
    /// `impact.cost / display_scale`.
    pub cost_display: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactChart {
    pub title: String,
    pub ghg_series: String,
    pub cost_series: String,
    pub ghg_axis: String,
    pub cost_axis: String,
    pub bars: Vec<ImpactBar>,
}

/// Render-ready snapshot of the whole dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub selection: Selection,
    pub allocation: Option<AllocationState>,
    pub editable: EditableFlags,
    pub flow_diagram: FlowDiagram,
    pub impact_chart: ImpactChart,
}

// ── Assembly ─────────────────────────────────────────────────────────────────

/// Build the view model. `baseline_impacts` must be the impacts of the full
/// baseline table; it never changes, so callers compute it once.
pub fn assemble(
    config: &DashboardConfig,
    baseline: &BaselineData,
    state: &DashboardState,
    baseline_impacts: &ImpactResult,
) -> ViewModel {
    let (flow_diagram, impact_chart) = match (state.selection(), state.allocation()) {
        (Selection::Sector(sector), Some(allocation)) => (
            sector_flow_diagram(config, baseline, sector, allocation),
            sector_impact_chart(config, baseline, sector, allocation),
        ),
        _ => (
            aggregate_flow_diagram(config, baseline),
            aggregate_impact_chart(config, baseline_impacts),
        ),
    };

    ViewModel {
        selection: state.selection(),
        allocation: state.allocation().copied(),
        editable: editable_flags(state.selection()),
        flow_diagram,
        impact_chart,
    }
}

/// Nodes: sectors 0..3, pathways 3..6. Edges grouped by pathway.
fn aggregate_flow_diagram(config: &DashboardConfig, baseline: &BaselineData) -> FlowDiagram {
    let labels = &config.labels;
    let nodes = Sector::ALL
        .iter()
        .map(|&s| labels.sectors[s].clone())
        .chain(Pathway::ALL.iter().map(|&p| labels.pathways[p].clone()))
        .collect();

    let edges = Pathway::ALL
        .iter()
        .flat_map(|&p| {
            Sector::ALL.iter().map(move |&s| FlowEdge {
                source: s.index(),
                target: Sector::COUNT + p.index(),
                sector: s,
                pathway: p,
                value: baseline.flow(s, p),
            })
        })
        .collect();

    FlowDiagram {
        title: format!("{} Combined Waste Flow Diagram", labels.aggregate),
        nodes,
        edges,
    }
}

/// Nodes: the sector at 0, pathways 1..4.
fn sector_flow_diagram(
    config: &DashboardConfig,
    baseline: &BaselineData,
    sector: Sector,
    allocation: &AllocationState,
) -> FlowDiagram {
    let labels = &config.labels;
    let flows = redistribute(baseline, sector, allocation);
    let nodes = std::iter::once(labels.sectors[sector].clone())
        .chain(Pathway::ALL.iter().map(|&p| labels.pathways[p].clone()))
        .collect();
    let edges = flows
        .iter()
        .map(|(p, &value)| FlowEdge { source: 0, target: 1 + p.index(), sector, pathway: p, value })
        .collect();

    FlowDiagram {
        title: format!("{} Waste Flow Diagram", labels.sectors[sector]),
        nodes,
        edges,
    }
}

fn bar(config: &DashboardConfig, label: String, role: BarRole, impact: Impact) -> ImpactBar {
    ImpactBar {
        label,
        role,
        impact,
        ghg_display: impact.ghg / config.display_scale,
        cost_display: impact.cost / config.display_scale,
    }
}

fn chart(config: &DashboardConfig, title: String, bars: Vec<ImpactBar>) -> ImpactChart {
    let labels = &config.labels;
    ImpactChart {
        title,
        ghg_series: labels.ghg_series.clone(),
        cost_series: labels.cost_series.clone(),
        ghg_axis: labels.ghg_axis.clone(),
        cost_axis: labels.cost_axis.clone(),
        bars,
    }
}

/// One bar pair per sector plus the combined total.
fn aggregate_impact_chart(config: &DashboardConfig, impacts: &ImpactResult) -> ImpactChart {
    let labels = &config.labels;
    let mut bars: Vec<ImpactBar> = impacts
        .iter()
        .map(|(s, i)| bar(config, labels.sectors[s].clone(), BarRole::Sector(s), i))
        .collect();
    bars.push(bar(
        config,
        format!("{} (Baseline)", labels.aggregate),
        BarRole::Total,
        impacts.total(),
    ));

    chart(config, format!("Impact Metrics: {} Combined", labels.aggregate), bars)
}

/// Adjusted vs. historical impact for one sector, both via the impact calculator.
fn sector_impact_chart(
    config: &DashboardConfig,
    baseline: &BaselineData,
    sector: Sector,
    allocation: &AllocationState,
) -> ImpactChart {
    let labels = &config.labels;
    let name = &labels.sectors[sector];
    let impact_of = |table: FlowTable| {
        compute_impacts(&table, &baseline.factors)
            .get(sector)
            .unwrap_or_default()
    };
    let adjusted = impact_of(redistributed_table(baseline, sector, allocation));
    let historical = impact_of(baseline.sector_table(sector));

    let bars = vec![
        bar(config, format!("{name} (per ton - Adjusted)"), BarRole::Adjusted, adjusted),
        bar(
            config,
            format!("{name} (per ton - {})", labels.aggregate),
            BarRole::Historical,
            historical,
        ),
    ];
    chart(config, format!("Impact Metrics: {name}"), bars)
}
