//! The central validator that orchestrates the execution of all validation rules.
use super::error::ValidationError;
use super::rules::{links, series};
use crate::graph::OutcomeGraph;

/// The orchestrator for structural checks on a loaded instance.
///
/// Holds a reference to the graph and iterates its nodes, applying every
/// rule and collecting all defects before anything is displayed. Like a
/// linter: reporting, never fixing, never aborting the load.
pub struct Validator<'a> {
    graph: &'a OutcomeGraph,
}

impl<'a> Validator<'a> {
    pub fn new(graph: &'a OutcomeGraph) -> Self {
        Self { graph }
    }

    /// Executes all registered rules against the graph.
    ///
    /// # Returns
    /// - `Ok(())` if no defects are found.
    /// - `Err(Vec<ValidationError>)` with every defect discovered.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Rules are local to a node, so a plain iteration is sufficient;
        // no topological order needed.
        for node in self.graph.nodes() {
            if let Some(err) = links::validate_node_links(node) {
                errors.push(err);
            }
            errors.extend(series::validate_series(node));
        }
        errors.extend(links::validate_dangling(self.graph));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
