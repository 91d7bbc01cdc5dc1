//! params.rs
//! Action parameter variants, dispatched on the GraphQL `__typename`.

use serde::{Deserialize, Serialize};

use super::node::NodeRef;
use super::series::Unit;

/// One parameter attached to an action node.
///
/// The API models parameters as a union discriminated by `__typename`;
/// here that becomes a tagged sum type so consumers match exhaustively
/// instead of comparing type-name strings. Unrecognized variants collapse
/// into `Unknown` rather than failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Parameter {
    #[serde(rename = "BoolParameterType", rename_all = "camelCase")]
    Bool {
        id: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        bool_value: Option<bool>,
        #[serde(default)]
        is_customized: bool,
        #[serde(default)]
        node: Option<NodeRef>,
    },
    #[serde(rename = "NumberParameterType", rename_all = "camelCase")]
    Number {
        id: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        number_value: Option<f64>,
        #[serde(default)]
        min_value: Option<f64>,
        #[serde(default)]
        max_value: Option<f64>,
        #[serde(default)]
        unit: Option<Unit>,
        #[serde(default)]
        is_customized: bool,
    },
    #[serde(rename = "StringParameterType", rename_all = "camelCase")]
    String {
        id: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        string_value: Option<String>,
        #[serde(default)]
        is_customized: bool,
    },
    #[serde(other)]
    Unknown,
}

impl Parameter {
    pub fn id(&self) -> Option<&str> {
        match self {
            Parameter::Bool { id, .. }
            | Parameter::Number { id, .. }
            | Parameter::String { id, .. } => Some(id),
            Parameter::Unknown => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Parameter::Bool { .. })
    }
}

/// The enable switch of an action: the bool parameter whose id is
/// `<node id>.enabled`.
pub fn enabled_switch<'a>(node_id: &str, params: &'a [Parameter]) -> Option<&'a Parameter> {
    params.iter().find(|p| match p {
        Parameter::Bool { id, .. } => id.len() == node_id.len() + ".enabled".len()
            && id.starts_with(node_id)
            && id.ends_with(".enabled"),
        _ => false,
    })
}

/// Whether the action's enable switch is on. No switch means disabled.
pub fn is_enabled(node_id: &str, params: &[Parameter]) -> bool {
    match enabled_switch(node_id, params) {
        Some(Parameter::Bool { bool_value, .. }) => bool_value.unwrap_or(false),
        _ => false,
    }
}

/// Splits a parameter list into the first bool switch (the widget rendered
/// first, gating the rest) and everything else.
pub fn split_switch(params: &[Parameter]) -> (Option<&Parameter>, Vec<&Parameter>) {
    let switch = params.iter().find(|p| p.is_bool());
    let others = params
        .iter()
        .filter(|p| match (switch, p.id()) {
            (Some(s), Some(id)) => s.id() != Some(id),
            _ => true,
        })
        .collect();
    (switch, others)
}
