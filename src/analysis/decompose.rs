//! decompose.rs
//! Stacked-bar decomposition of sibling outcome nodes at one year.
//!
//! Emissions can go negative (sinks, offsets); the bar renders positive
//! segments left of a separator and negative ones right of it, each sized
//! by its share of the plain sum of all values.

use crate::computation::aggregate;
use crate::model::Node;

#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub node_id: String,
    pub color: Option<String>,
    /// The metric value at the decomposition year, if any.
    pub value: Option<f64>,
    /// Share of the total, always non-negative; `0` for missing values
    /// and for a degenerate (zero) total.
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decomposition {
    pub year: i32,
    /// Sum over all sibling values, negatives included.
    pub total: f64,
    pub positive: Vec<BarSegment>,
    pub negative: Vec<BarSegment>,
}

impl Decomposition {
    pub fn positive_total(&self) -> f64 {
        self.positive.iter().filter_map(|s| s.value).sum()
    }

    pub fn negative_total(&self) -> f64 {
        self.negative.iter().filter_map(|s| s.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Splits the siblings into positive and negative segments, preserving
/// their incoming order within each side. A node without a value at the
/// year stays in the positive run with a zero-width segment, so the card
/// deck and the bar keep matching indexes.
pub fn decompose(nodes: &[&Node], year: i32) -> Decomposition {
    let total = aggregate::outcome_total(nodes, year);
    let mut decomposition = Decomposition { year, total, ..Default::default() };

    for node in nodes {
        let value = aggregate::metric_value(node, year);
        let negative = value.map_or(false, |v| v < 0.0);
        let proportion = match value {
            Some(v) if negative => aggregate::proportion_of_total(-v, total),
            Some(v) => aggregate::proportion_of_total(v, total),
            None => 0.0,
        };
        let segment = BarSegment {
            node_id: node.id.clone(),
            color: node.color.clone(),
            value,
            proportion,
        };
        if negative {
            decomposition.negative.push(segment);
        } else {
            decomposition.positive.push(segment);
        }
    }
    decomposition
}
