//! Baseline data store: sector/pathway enums, fixed-size typed tables, and the
//! compiled-in historical flow volumes with their GHG and cost factors.
//!
//! Every table here is indexed by the enums rather than by string keys, so a
//! lookup for an unknown (sector, pathway) pair cannot be written.

use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Waste-generating category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Retail,
    FoodService,
    Residential,
}

impl Sector {
    pub const COUNT: usize = 3;
    pub const ALL: [Sector; Self::COUNT] = [Sector::Retail, Sector::FoodService, Sector::Residential];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Sector::Retail => 0,
            Sector::FoodService => 1,
            Sector::Residential => 2,
        }
    }
}

impl FromStr for Sector {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retail" => Ok(Sector::Retail),
            "restaurants+hotels" | "food-service" | "foodservice" | "food_service" => {
                Ok(Sector::FoodService)
            }
            "residential" => Ok(Sector::Residential),
            _ => Err(DashboardError::UnknownSelection(s.to_string())),
        }
    }
}

/// Disposal method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathway {
    Landfill,
    Combustion,
    Compost,
}

impl Pathway {
    pub const COUNT: usize = 3;
    pub const ALL: [Pathway; Self::COUNT] = [Pathway::Landfill, Pathway::Combustion, Pathway::Compost];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Pathway::Landfill => 0,
            Pathway::Combustion => 1,
            Pathway::Compost => 2,
        }
    }
}

impl FromStr for Pathway {
    type Err = DashboardError;

    /// Accepts the bare key or the slider id (`landfill-slider`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.strip_suffix("-slider").unwrap_or(&lower) {
            "landfill" => Ok(Pathway::Landfill),
            "combustion" => Ok(Pathway::Combustion),
            "compost" => Ok(Pathway::Compost),
            _ => Err(DashboardError::UnknownPathway(s.to_string())),
        }
    }
}

// ── Typed tables ──────────────────────────────────────────────────────────────

/// One value per disposal pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerPathway<T> {
    pub landfill: T,
    pub combustion: T,
    pub compost: T,
}

impl<T> PerPathway<T> {
    pub const fn new(landfill: T, combustion: T, compost: T) -> Self {
        Self { landfill, combustion, compost }
    }

    pub fn from_fn(mut f: impl FnMut(Pathway) -> T) -> Self {
        Self {
            landfill: f(Pathway::Landfill),
            combustion: f(Pathway::Combustion),
            compost: f(Pathway::Compost),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Pathway, &T) -> U) -> PerPathway<U> {
        PerPathway::from_fn(|p| f(p, &self[p]))
    }

    /// Iterate in `Pathway::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Pathway, &T)> + '_ {
        Pathway::ALL.into_iter().map(move |p| (p, &self[p]))
    }
}

impl PerPathway<f64> {
    pub fn sum(&self) -> f64 {
        self.landfill + self.combustion + self.compost
    }
}

impl<T> Index<Pathway> for PerPathway<T> {
    type Output = T;

    fn index(&self, p: Pathway) -> &T {
        match p {
            Pathway::Landfill => &self.landfill,
            Pathway::Combustion => &self.combustion,
            Pathway::Compost => &self.compost,
        }
    }
}

impl<T> IndexMut<Pathway> for PerPathway<T> {
    fn index_mut(&mut self, p: Pathway) -> &mut T {
        match p {
            Pathway::Landfill => &mut self.landfill,
            Pathway::Combustion => &mut self.combustion,
            Pathway::Compost => &mut self.compost,
        }
    }
}

/// One value per source sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerSector<T> {
    pub retail: T,
    pub food_service: T,
    pub residential: T,
}

impl<T> PerSector<T> {
    pub const fn new(retail: T, food_service: T, residential: T) -> Self {
        Self { retail, food_service, residential }
    }

    pub fn from_fn(mut f: impl FnMut(Sector) -> T) -> Self {
        Self {
            retail: f(Sector::Retail),
            food_service: f(Sector::FoodService),
            residential: f(Sector::Residential),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Sector, &T) -> U) -> PerSector<U> {
        PerSector::from_fn(|s| f(s, &self[s]))
    }

    /// Iterate in `Sector::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Sector, &T)> + '_ {
        Sector::ALL.into_iter().map(move |s| (s, &self[s]))
    }
}

impl<T> Index<Sector> for PerSector<T> {
    type Output = T;

    fn index(&self, s: Sector) -> &T {
        match s {
            Sector::Retail => &self.retail,
            Sector::FoodService => &self.food_service,
            Sector::Residential => &self.residential,
        }
    }
}

impl<T> IndexMut<Sector> for PerSector<T> {
    fn index_mut(&mut self, s: Sector) -> &mut T {
        match s {
            Sector::Retail => &mut self.retail,
            Sector::FoodService => &mut self.food_service,
            Sector::Residential => &mut self.residential,
        }
    }
}

// ── Flow tables ───────────────────────────────────────────────────────────────

/// Flow volumes (mass) for a subset of sectors. Absent sectors are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowTable {
    rows: PerSector<Option<PerPathway<f64>>>,
}

impl FlowTable {
    /// All three sectors.
    pub fn full(volumes: &PerSector<PerPathway<f64>>) -> Self {
        Self { rows: volumes.map(|_, row| Some(*row)) }
    }

    /// A table restricted to one sector.
    pub fn single(sector: Sector, flows: PerPathway<f64>) -> Self {
        let mut rows = PerSector::<Option<PerPathway<f64>>>::default();
        rows[sector] = Some(flows);
        Self { rows }
    }

    pub fn row(&self, sector: Sector) -> Option<&PerPathway<f64>> {
        self.rows[sector].as_ref()
    }

    pub fn get(&self, sector: Sector, pathway: Pathway) -> Option<f64> {
        self.row(sector).map(|r| r[pathway])
    }

    /// Sectors present in the table, in `Sector::ALL` order.
    pub fn sectors(&self) -> impl Iterator<Item = Sector> + '_ {
        Sector::ALL.into_iter().filter(move |&s| self.rows[s].is_some())
    }

    pub fn sector_total(&self, sector: Sector) -> Option<f64> {
        self.row(sector).map(|r| r.sum())
    }

    /// Every volume multiplied by `k`.
    pub fn scaled(&self, k: f64) -> Self {
        Self {
            rows: self.rows.map(|_, row| row.map(|r| r.map(|_, v| v * k))),
        }
    }
}

// ── Baseline ──────────────────────────────────────────────────────────────────

/// Signed per-unit-mass coefficients. Negative values are net offsets.
pub type FactorTable = PerPathway<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorTables {
    /// kg CO₂e per unit mass.
    pub ghg: FactorTable,
    /// $ per unit mass.
    pub cost: FactorTable,
}

pub const GHG_FACTORS: FactorTable = PerPathway::new(0.50146, -0.13426, -0.15213);
pub const COST_FACTORS: FactorTable = PerPathway::new(69.7, 69.7, 9.7);

/// Most recent measured disposal volumes.
pub const BASELINE_FLOWS: PerSector<PerPathway<f64>> = PerSector::new(
    PerPathway::new(2_712_077.0, 881_432.0, 1_900_141.0),
    PerPathway::new(14_008_021.0, 3_416_734.0, 252_512.0),
    PerPathway::new(17_532_332.0, 4_010_257.0, 977_975.0),
);

/// Immutable historical dataset. Built once, shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineData {
    pub flows: PerSector<PerPathway<f64>>,
    pub factors: FactorTables,
}

impl BaselineData {
    pub fn standard() -> Self {
        Self {
            flows: BASELINE_FLOWS,
            factors: FactorTables { ghg: GHG_FACTORS, cost: COST_FACTORS },
        }
    }

    pub fn flow(&self, sector: Sector, pathway: Pathway) -> f64 {
        self.flows[sector][pathway]
    }

    /// Total historical volume of one sector across all pathways.
    pub fn sector_total(&self, sector: Sector) -> f64 {
        self.flows[sector].sum()
    }

    pub fn table(&self) -> FlowTable {
        FlowTable::full(&self.flows)
    }

    pub fn sector_table(&self, sector: Sector) -> FlowTable {
        FlowTable::single(sector, self.flows[sector])
    }
}

impl Default for BaselineData {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_indices_match_all_order() {
        for (i, s) in Sector::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
        for (i, p) in Pathway::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn parse_dropdown_and_slider_ids() {
        assert_eq!("restaurants+hotels".parse::<Sector>().unwrap(), Sector::FoodService);
        assert_eq!("Residential".parse::<Sector>().unwrap(), Sector::Residential);
        assert_eq!("compost-slider".parse::<Pathway>().unwrap(), Pathway::Compost);
        assert_eq!(" LANDFILL ".parse::<Pathway>().unwrap(), Pathway::Landfill);
        assert!("bakery".parse::<Sector>().is_err());
        assert!("recycling".parse::<Pathway>().is_err());
    }

    #[test]
    fn baseline_has_nine_entries_and_expected_totals() {
        let b = BaselineData::standard();
        let table = b.table();
        let mut n = 0;
        for s in table.sectors() {
            for p in Pathway::ALL {
                assert!(table.get(s, p).unwrap() >= 0.0);
                n += 1;
            }
        }
        assert_eq!(n, 9);
        assert_eq!(b.sector_total(Sector::Residential), 22_520_564.0);
        assert_eq!(b.flow(Sector::FoodService, Pathway::Compost), 252_512.0);
    }

    #[test]
    fn single_table_hides_other_sectors() {
        let b = BaselineData::standard();
        let t = b.sector_table(Sector::Retail);
        assert_eq!(t.sectors().collect::<Vec<_>>(), vec![Sector::Retail]);
        assert!(t.get(Sector::Residential, Pathway::Landfill).is_none());
        assert_eq!(t.sector_total(Sector::Retail), Some(b.sector_total(Sector::Retail)));
    }

    #[test]
    fn per_pathway_serialises_with_named_keys() {
        let json = serde_json::to_value(PerPathway::new(49u8, 16, 35)).unwrap();
        assert_eq!(json["landfill"], 49);
        assert_eq!(json["compost"], 35);
    }
}
