//! Impact calculator.
//!
//! `ghg = Σ flow × ghg_factor`, `cost = Σ flow × cost_factor`, per sector.
//! The same formula serves the full baseline table and a single redistributed
//! sector.

use serde::Serialize;

use crate::data::{FactorTables, FlowTable, PerPathway, PerSector, Sector};

/// GHG (kg CO₂e) and cost ($) for one sector. Both signed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Impact {
    pub ghg: f64,
    pub cost: f64,
}

impl std::ops::Add for Impact {
    type Output = Impact;

    fn add(self, rhs: Impact) -> Impact {
        Impact { ghg: self.ghg + rhs.ghg, cost: self.cost + rhs.cost }
    }
}

/// Impacts for the sectors present in the source flow table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    by_sector: PerSector<Option<Impact>>,
}

impl ImpactResult {
    pub fn get(&self, sector: Sector) -> Option<Impact> {
        self.by_sector[sector]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sector, Impact)> + '_ {
        self.by_sector.iter().filter_map(|(s, i)| i.map(|i| (s, i)))
    }

    /// Sum across every present sector.
    pub fn total(&self) -> Impact {
        self.iter().fold(Impact::default(), |acc, (_, i)| acc + i)
    }
}

/// Impact of one sector's flows.
pub fn sector_impact(flows: &PerPathway<f64>, factors: &FactorTables) -> Impact {
    flows.iter().fold(Impact::default(), |acc, (p, &v)| Impact {
        ghg: acc.ghg + v * factors.ghg[p],
        cost: acc.cost + v * factors.cost[p],
    })
}

pub fn compute_impacts(table: &FlowTable, factors: &FactorTables) -> ImpactResult {
    ImpactResult {
        by_sector: PerSector::from_fn(|s| table.row(s).map(|row| sector_impact(row, factors))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BaselineData;
    use approx::assert_abs_diff_eq;

    #[test]
    fn retail_baseline_matches_hand_formula() {
        let b = BaselineData::standard();
        let r = compute_impacts(&b.table(), &b.factors);
        let retail = r.get(Sector::Retail).unwrap();
        let ghg = 2_712_077.0 * 0.50146 + 881_432.0 * -0.13426 + 1_900_141.0 * -0.15213;
        let cost = 2_712_077.0 * 69.7 + 881_432.0 * 69.7 + 1_900_141.0 * 9.7;
        assert_abs_diff_eq!(retail.ghg, ghg, epsilon = 1e-3);
        assert_abs_diff_eq!(retail.cost, cost, epsilon = 1e-3);
    }

    #[test]
    fn total_sums_present_sectors() {
        let b = BaselineData::standard();
        let r = compute_impacts(&b.table(), &b.factors);
        let by_hand = Sector::ALL
            .iter()
            .map(|&s| r.get(s).unwrap())
            .fold(Impact::default(), |a, i| a + i);
        assert_eq!(r.total(), by_hand);
        assert_eq!(r.iter().count(), 3);
    }

    #[test]
    fn single_sector_table_yields_single_result() {
        let b = BaselineData::standard();
        let r = compute_impacts(&b.sector_table(Sector::Residential), &b.factors);
        assert!(r.get(Sector::Retail).is_none());
        assert_eq!(r.total(), r.get(Sector::Residential).unwrap());
        assert_eq!(
            r.get(Sector::Residential).unwrap(),
            sector_impact(&b.flows.residential, &b.factors)
        );
    }

    #[test]
    fn impact_is_linear_in_flow() {
        let b = BaselineData::standard();
        let base = compute_impacts(&b.table(), &b.factors);
        for k in [0.0, 0.5, 2.0, 10.0] {
            let scaled = compute_impacts(&b.table().scaled(k), &b.factors);
            for (s, i) in base.iter() {
                let j = scaled.get(s).unwrap();
                assert_abs_diff_eq!(j.ghg, i.ghg * k, epsilon = 1e-6 * i.ghg.abs().max(1.0));
                assert_abs_diff_eq!(j.cost, i.cost * k, epsilon = 1e-6 * i.cost.abs().max(1.0));
            }
        }
    }
}
