//! Which pathways give way when one slider moves.

use serde::{Deserialize, Serialize};

use crate::data::{PerPathway, Pathway};
use crate::error::DashboardError;

/// The two pathways that react to an edit of a third.
///
/// `secondary` keeps its value unless the edit pushes the pair over 100, in
/// which case it is clamped down. `remainder` always absorbs the slack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partners {
    pub secondary: Pathway,
    pub remainder: Pathway,
}

impl Partners {
    pub const fn new(secondary: Pathway, remainder: Pathway) -> Self {
        Self { secondary, remainder }
    }
}

/// Per edited pathway, its `(secondary, remainder)` partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecedenceRule(pub PerPathway<Partners>);

impl PrecedenceRule {
    /// Landfill is the remainder for compost and combustion edits; a landfill
    /// edit leaves compost alone and lets combustion absorb the change.
    pub const fn dashboard() -> Self {
        Self(PerPathway::new(
            Partners::new(Pathway::Compost, Pathway::Combustion),
            Partners::new(Pathway::Compost, Pathway::Landfill),
            Partners::new(Pathway::Combustion, Pathway::Landfill),
        ))
    }

    /// Landfill → Combustion → Compost → Landfill: the next pathway in the
    /// cycle is secondary, the one after it is the remainder.
    pub const fn cyclic() -> Self {
        Self(PerPathway::new(
            Partners::new(Pathway::Combustion, Pathway::Compost),
            Partners::new(Pathway::Compost, Pathway::Landfill),
            Partners::new(Pathway::Landfill, Pathway::Combustion),
        ))
    }

    pub fn partners(&self, edited: Pathway) -> Partners {
        self.0[edited]
    }

    /// Every edited pathway must name the other two, each exactly once.
    pub fn validate(&self) -> Result<(), DashboardError> {
        for (edited, p) in self.0.iter() {
            if p.secondary == edited || p.remainder == edited || p.secondary == p.remainder {
                return Err(DashboardError::InvalidConfig(format!(
                    "precedence for {edited:?} must name the two other pathways, got secondary={:?} remainder={:?}",
                    p.secondary, p.remainder
                )));
            }
        }
        Ok(())
    }
}

impl Default for PrecedenceRule {
    fn default() -> Self {
        Self::dashboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_rules_are_valid() {
        PrecedenceRule::dashboard().validate().unwrap();
        PrecedenceRule::cyclic().validate().unwrap();
    }

    #[test]
    fn rule_naming_edited_pathway_is_rejected() {
        let mut rule = PrecedenceRule::cyclic();
        rule.0.compost = Partners::new(Pathway::Compost, Pathway::Landfill);
        assert!(matches!(rule.validate(), Err(DashboardError::InvalidConfig(_))));
    }

    #[test]
    fn rule_deserialises_from_lowercase_keys() {
        let json = r#"{
            "landfill":   { "secondary": "combustion", "remainder": "compost" },
            "combustion": { "secondary": "compost",    "remainder": "landfill" },
            "compost":    { "secondary": "landfill",   "remainder": "combustion" }
        }"#;
        let rule: PrecedenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule, PrecedenceRule::cyclic());
    }
}
