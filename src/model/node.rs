//! node.rs
//! The outcome/action node view model.

use serde::{Deserialize, Serialize};

use super::params::{self, Parameter};
use super::series::{Metric, Unit};

/// Fallback for nodes without an explicit ordering weight.
pub const DEFAULT_NODE_ORDER: i32 = 100;

/// A bare reference to another node, as the API delivers hierarchy links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeRef {
    pub id: String,
    pub name: Option<String>,
}

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), name: None }
    }
}

/// Grouping tag for actions (e.g. a sector), used for filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionGroup {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<String>,
}

/// An entity in the causal hierarchy: an outcome (sector) or an action.
///
/// Wraps a `Metric` plus an optional `impact_metric` (the derived causal
/// effect of an action), identity and display attributes, and id links to
/// the nodes feeding into it. Read-only; the whole set is recreated on
/// every query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub color: Option<String>,
    pub order: Option<i32>,
    /// What the metric measures ("emissions", "energy", ...). Free-form
    /// upstream vocabulary, deliberately not an enum.
    pub quantity: Option<String>,
    pub is_action: bool,
    pub decision_level: Option<String>,
    pub unit: Option<Unit>,
    pub metric: Option<Metric>,
    pub impact_metric: Option<Metric>,
    pub input_nodes: Vec<NodeRef>,
    pub output_nodes: Vec<NodeRef>,
    pub parameters: Vec<Parameter>,
    pub group: Option<ActionGroup>,
}

impl Node {
    /// Short name when present, full name otherwise.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }

    pub fn order_weight(&self) -> i32 {
        self.order.unwrap_or(DEFAULT_NODE_ORDER)
    }

    /// Whether this action's enable switch is on. Nodes without a switch
    /// parameter count as disabled.
    pub fn is_enabled(&self) -> bool {
        params::is_enabled(&self.id, &self.parameters)
    }
}
