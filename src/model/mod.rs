//! View models for the GraphQL response shapes the dashboard consumes.
//!
//! Everything here is a read-only snapshot of one query response. There is
//! no local mutation: a refetch replaces the whole set.

pub mod efficiency;
pub mod node;
pub mod params;
pub mod scenario;
pub mod series;

pub use efficiency::{ActionEfficiency, ActionEfficiencyPair};
pub use node::{ActionGroup, Node, NodeRef, DEFAULT_NODE_ORDER};
pub use params::Parameter;
pub use scenario::{active_scenario, Instance, Scenario, Settings};
pub use series::{values_between, Metric, Unit, YearValue};

use serde::{Deserialize, Serialize};

pub use self::error::ModelError;
mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum ModelError {
        #[error("instance payload is not valid JSON: {0}")]
        Parse(#[from] serde_json::Error),
    }
}

/// Everything one page query delivers: the node set, efficiency pairings,
/// scenarios and the instance configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceData {
    pub instance: Option<Instance>,
    pub nodes: Vec<Node>,
    pub actions: Vec<Node>,
    pub action_efficiency_pairs: Vec<ActionEfficiencyPair>,
    pub scenarios: Vec<Scenario>,
    pub parameters: Vec<Parameter>,
}

impl InstanceData {
    /// Parses a raw JSON response body (the `data` object of the query).
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolved year settings, defaulting to an empty span when the
    /// payload carried no instance block.
    pub fn settings(&self) -> Settings {
        match &self.instance {
            Some(instance) => Settings::from_instance(instance),
            None => Settings::new(0, 0, 0),
        }
    }

    pub fn has_efficiency(&self) -> bool {
        !self.action_efficiency_pairs.is_empty()
    }
}
