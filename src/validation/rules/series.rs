//! Rule for metric series shape.
use std::collections::HashSet;

use crate::model::{Node, YearValue};
use crate::validation::error::{ValidationError, ValidationErrorType};

/// Checks the node's own metric: duplicate years inside one series and
/// metrics that carry no data at all. At most one error per defect kind
/// and series, to keep reports readable on badly broken payloads.
pub(crate) fn validate_series(node: &Node) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(metric) = &node.metric else {
        return errors;
    };

    for (label, series) in [
        ("historical", &metric.historical_values),
        ("forecast", &metric.forecast_values),
        ("baseline forecast", &metric.baseline_forecast_values),
    ] {
        if let Some(year) = first_duplicate_year(series) {
            errors.push(ValidationError {
                node_id: node.id.clone(),
                error_type: ValidationErrorType::DuplicateYear,
                message: format!(
                    "node '{}': year {} appears more than once in the {} series",
                    node.id, year, label
                ),
            });
        }
    }

    if metric.historical_values.is_empty() && metric.forecast_values.is_empty() {
        errors.push(ValidationError {
            node_id: node.id.clone(),
            error_type: ValidationErrorType::EmptyMetric,
            message: format!("node '{}' has a metric with no data points", node.id),
        });
    }
    errors
}

fn first_duplicate_year(series: &[YearValue]) -> Option<i32> {
    let mut seen = HashSet::with_capacity(series.len());
    series.iter().map(|p| p.year).find(|&year| !seen.insert(year))
}
