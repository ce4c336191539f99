//! Reactive engine behind the food-waste impact dashboard.
//!
//! Event flow: a dropdown or slider event updates the [`Dashboard`] state,
//! the allocation balancer settles the split, the flow redistributor and
//! impact calculator derive new figures, and the view-model assembler
//! packages them for rendering.

pub mod allocation;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod impact;
pub mod redistribute;
pub mod selection;
pub mod view_model;

pub use allocation::{AllocationState, Balancer, PrecedenceRule};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardEvent, DashboardState, SelectionOutcome};
pub use data::{BaselineData, FlowTable, Pathway, PerPathway, PerSector, Sector};
pub use error::DashboardError;
pub use impact::{compute_impacts, Impact, ImpactResult};
pub use selection::Selection;
pub use view_model::ViewModel;
