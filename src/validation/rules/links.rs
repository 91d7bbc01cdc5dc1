//! Rule for hierarchy link consistency.
use crate::graph::OutcomeGraph;
use crate::model::Node;
use crate::validation::error::{ValidationError, ValidationErrorType};

/// Reports self-references on one node.
pub(crate) fn validate_node_links(node: &Node) -> Option<ValidationError> {
    if node.input_nodes.iter().any(|input| input.id == node.id) {
        return Some(ValidationError {
            node_id: node.id.clone(),
            error_type: ValidationErrorType::SelfReference,
            message: format!("node '{}' lists itself as an input", node.id),
        });
    }
    None
}

/// Reports every input reference the graph could not resolve at build time.
pub(crate) fn validate_dangling(graph: &OutcomeGraph) -> Vec<ValidationError> {
    graph
        .dangling_inputs()
        .iter()
        .map(|(consumer, missing)| ValidationError {
            node_id: consumer.clone(),
            error_type: ValidationErrorType::DanglingInputRef,
            message: format!("input '{}' of node '{}' is not in the loaded set", missing, consumer),
        })
        .collect()
}
