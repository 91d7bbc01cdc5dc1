//! efficiency.rs
//! Cost-effectiveness pairing shapes, as delivered by the action list query.

use serde::{Deserialize, Serialize};

use super::node::NodeRef;
use super::series::{Unit, YearValue};

/// Cumulative cost/impact series of one action under a pairing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionEfficiency {
    pub action: NodeRef,
    pub cost_values: Vec<YearValue>,
    pub impact_values: Vec<YearValue>,
    /// Scales the ratio into the display unit (e.g. per resident).
    /// Absent divisor means the action cannot be rated.
    pub efficiency_divisor: Option<f64>,
}

/// One way of ranking actions by cost-effectiveness: which node's values
/// count as cost, which as impact, and how the ratio is scaled and capped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionEfficiencyPair {
    pub id: Option<String>,
    pub label: Option<String>,
    pub cost_node: Option<NodeRef>,
    pub impact_node: Option<NodeRef>,
    pub cost_unit: Option<Unit>,
    pub impact_unit: Option<Unit>,
    pub efficiency_unit: Option<Unit>,
    /// Flip the sign of summed costs (a saved cost reads as negative).
    pub invert_cost: bool,
    /// Flip the sign of summed impacts (a reduction reads as positive).
    pub invert_impact: bool,
    /// Actions whose |efficiency| exceeds this are left off the plot.
    pub plot_limit_efficiency: Option<f64>,
    pub actions: Vec<ActionEfficiency>,
}

impl ActionEfficiencyPair {
    /// The per-action entry for a given action node, if this pairing has one.
    pub fn entry_for(&self, action_id: &str) -> Option<&ActionEfficiency> {
        self.actions.iter().find(|e| e.action.id == action_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_pair_shape() {
        let raw = r#"{
            "id": "cost_per_co2",
            "label": "Cost per reduced tCO2e",
            "invertImpact": true,
            "plotLimitEfficiency": 2000,
            "costNode": {"id": "total_costs", "name": "Total costs"},
            "actions": [{
                "action": {"id": "solar"},
                "costValues": [{"year": 2025, "value": -3.5}],
                "impactValues": [{"year": 2025, "value": 1.2}],
                "efficiencyDivisor": 0.001
            }]
        }"#;
        let pair: ActionEfficiencyPair = serde_json::from_str(raw).unwrap();
        assert!(pair.invert_impact);
        assert!(!pair.invert_cost);
        assert_eq!(pair.plot_limit_efficiency, Some(2000.0));
        let entry = pair.entry_for("solar").unwrap();
        assert_eq!(entry.cost_values[0].value, Some(-3.5));
        assert!(pair.entry_for("wind").is_none());
    }
}
