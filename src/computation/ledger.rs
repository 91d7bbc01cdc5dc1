//! ledger.rs
//! Explicit memoization of derived values.
//!
//! The surrounding application recomputes derived figures every time the
//! year range or scenario changes; this ledger caches them keyed by their
//! actual inputs (node identity + derivation) instead of relying on any
//! re-render machinery. Invalidation is the owner's responsibility: clear
//! on refetch, drop a node's entries when only it changed.

use std::collections::HashMap;

use crate::computation::aggregate;
use crate::model::Node;

/// A derived figure, identified by the inputs that determine it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derivation {
    /// Metric value at one year.
    Point { year: i32 },
    /// Sum over both series within an inclusive year range.
    CumulativeBetween { start: i32, end: i32 },
    /// Rounded percent change between two point values.
    Change { base_year: i32, target_year: i32 },
}

#[derive(Debug, Clone, Default)]
pub struct DerivedLedger {
    values: HashMap<(String, Derivation), Option<f64>>,
    hits: u64,
    misses: u64,
}

impl DerivedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached figure, computing and storing it on first use.
    ///
    /// The node's metric is treated as immutable for the lifetime of its
    /// entries; a refetched node set requires `clear` (or per-node
    /// invalidation) before reuse.
    pub fn get_or_compute(&mut self, node: &Node, derivation: Derivation) -> Option<f64> {
        let key = (node.id.clone(), derivation);
        if let Some(cached) = self.values.get(&key) {
            self.hits += 1;
            return *cached;
        }
        self.misses += 1;
        let computed = compute(node, derivation);
        self.values.insert(key, computed);
        computed
    }

    /// Drops every entry belonging to one node.
    pub fn invalidate_node(&mut self, node_id: &str) {
        self.values.retain(|(id, _), _| id != node_id);
    }

    /// Forgets everything. Counters survive; they describe the session,
    /// not the current cache generation.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn compute(node: &Node, derivation: Derivation) -> Option<f64> {
    let metric = node.metric.as_ref();
    match derivation {
        Derivation::Point { year } => metric.and_then(|m| aggregate::point_value(m, year)),
        Derivation::CumulativeBetween { start, end } => {
            Some(metric.map_or(0.0, |m| aggregate::sum_between(m, start, end)))
        }
        Derivation::Change { base_year, target_year } => {
            let m = metric?;
            let base = aggregate::point_value(m, base_year).or(Some(0.0));
            let end = aggregate::point_value(m, target_year);
            aggregate::percent_change(base, end).map(|c| c as f64)
        }
    }
}
