//! pathways_core
//!
//! The computation core of an emissions-scenario dashboard: turns GraphQL
//! response shapes (metrics with historical/forecast year series, outcome
//! and action nodes in a causal hierarchy, cost-effectiveness pairings)
//! into the derived numbers the views render.
//!
//! The crate owns no transport, storage or rendering. Its contract is
//! simple: deserialize one query response into [`model::InstanceData`],
//! wrap the nodes in an [`graph::OutcomeGraph`], and derive figures
//! through [`computation`], [`analysis`] and [`display`]. Everything is a
//! pure function or an explicitly-owned store; a refetch replaces the
//! whole model.

pub mod analysis;
pub mod computation;
pub mod display;
pub mod graph;
pub mod model;
pub mod session;
pub mod validation;

pub use computation::{Derivation, DerivedLedger};
pub use graph::{GraphError, GraphId, OutcomeGraph};
pub use model::{InstanceData, Metric, ModelError, Node, Parameter, Scenario, Settings, YearValue};
pub use session::{Session, SessionEvent, SubscriberId};
pub use validation::{ValidationError, Validator};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{augment_actions, decompose, mac_actions, sort_actions, SortActionsBy};
    use crate::computation::aggregate;
    use crate::model::active_scenario;

    const PAYLOAD: &str = r#"{
        "instance": {
            "id": "demo",
            "minimumHistoricalYear": 2010,
            "maximumHistoricalYear": 2023,
            "targetYear": 2035
        },
        "scenarios": [
            {"id": "baseline", "name": "Baseline", "isDefault": true},
            {"id": "ambitious", "name": "Ambitious", "isActive": true}
        ],
        "nodes": [
            {
                "id": "net_emissions",
                "name": "Net emissions",
                "quantity": "emissions",
                "inputNodes": [{"id": "transport"}, {"id": "heating"}],
                "metric": {
                    "historicalValues": [{"year": 2023, "value": 100.0}],
                    "forecastValues": [{"year": 2035, "value": 55.0}]
                }
            },
            {
                "id": "transport",
                "name": "Transport",
                "metric": {
                    "historicalValues": [{"year": 2023, "value": 40.0}],
                    "forecastValues": [{"year": 2035, "value": 25.0}]
                }
            },
            {
                "id": "heating",
                "name": "Heating",
                "metric": {
                    "historicalValues": [{"year": 2023, "value": 60.0}],
                    "forecastValues": [{"year": 2035, "value": 30.0}]
                }
            }
        ],
        "actions": [
            {
                "id": "bike_lanes",
                "name": "Bike lanes",
                "isAction": true,
                "parameters": [
                    {"__typename": "BoolParameterType", "id": "bike_lanes.enabled", "boolValue": true}
                ],
                "impactMetric": {
                    "forecastValues": [{"year": 2030, "value": -2.0}, {"year": 2035, "value": -3.0}]
                }
            }
        ],
        "actionEfficiencyPairs": [
            {
                "label": "Cost per reduced tCO2e",
                "invertImpact": true,
                "actions": [
                    {
                        "action": {"id": "bike_lanes"},
                        "costValues": [{"year": 2030, "value": 10.0}],
                        "impactValues": [{"year": 2030, "value": -2.0}],
                        "efficiencyDivisor": 1.0
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_end_to_end_dashboard_derivations() {
        let data = InstanceData::from_json(PAYLOAD).unwrap();
        let settings = data.settings();
        let mut session = Session::new(settings);
        assert_eq!(session.year_range(), (2023, 2035));
        assert_eq!(active_scenario(&data.scenarios).unwrap().id, "ambitious");

        let graph = OutcomeGraph::build(data.nodes.clone());
        Validator::new(&graph).validate().unwrap();

        // Outcome drill-down: cards under the root, decomposed at the
        // range end, with the percent-change status figure.
        let root = graph.id_of("net_emissions").unwrap();
        let cards = graph.card_nodes(root);
        let card_nodes = graph.resolve(&cards);
        let (start, end) = session.year_range();
        let bar = decompose(&card_nodes, end);
        assert_eq!(bar.total, 55.0);
        assert_eq!(bar.positive.len(), 2);

        let root_node = graph.node(root);
        let change = aggregate::percent_change(
            aggregate::metric_value(root_node, start).or(Some(0.0)),
            aggregate::metric_value(root_node, end),
        );
        assert_eq!(change, Some(-45));

        // Action list with the efficiency pairing active.
        let pair = data.action_efficiency_pairs.first();
        let mut views = augment_actions(&data.actions, pair, session.year_range());
        assert_eq!(views[0].cumulative_impact, Some(2.0));
        assert_eq!(views[0].cumulative_cost, Some(10.0));
        assert_eq!(views[0].cumulative_efficiency, Some(5.0));
        assert!(views[0].is_enabled);
        sort_actions(&mut views, SortActionsBy::CumulativeEfficiency, true);
        assert_eq!(mac_actions(&views, pair.unwrap()).len(), 1);

        // Scenario switch: the memoized figures get dropped.
        let mut ledger = DerivedLedger::new();
        ledger.get_or_compute(root_node, Derivation::Point { year: end });
        session.set_active_scenario(Some("baseline".into()));
        ledger.clear();
        assert!(ledger.is_empty());
    }
}
