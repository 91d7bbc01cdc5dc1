//! aggregate.rs
//! The metric aggregation kernels: stateless pure functions turning raw
//! year/value series into the derived numbers the dashboard renders.
//!
//! Every function is total over its input domain. Missing data resolves to
//! `None` or `0`, degenerate ratios to `None` or `inf`; nothing here ever
//! errors, because a blank figure beats a crashed page. Out-of-domain
//! ranges keep returning the empty-range result for compatibility with the
//! callers this replaces; misuse is surfaced through `log::debug!` only.

use crate::model::{Metric, Node, YearValue};

/// The value of a metric at an exact year, historical series searched
/// before forecast. No interpolation: either the year is present or the
/// result is `None`. A matched point with an absent value is still the
/// match, so a null historical point shadows a forecast value.
pub fn point_value(metric: &Metric, year: i32) -> Option<f64> {
    metric.point(year).and_then(|p| p.value)
}

/// The forecast-series value at an exact year (the "yearly effect" figure,
/// which deliberately ignores historical data).
pub fn forecast_value(metric: &Metric, year: i32) -> Option<f64> {
    metric.forecast_values.iter().find(|p| p.year == year).and_then(|p| p.value)
}

/// Sums all points of both series with `start <= year <= end`.
///
/// Points without a value are skipped, not coerced to zero. The sum crosses
/// the historical/forecast boundary without any joining adjustment; a year
/// present in both series is counted twice, exactly as the flat
/// concatenation upstream did. An empty range yields `0.0`.
pub fn sum_between(metric: &Metric, start: i32, end: i32) -> f64 {
    check_range(start, end, "sum_between");
    metric
        .iter_points()
        .filter(|p| p.year >= start && p.year <= end)
        .filter_map(|p| p.value)
        .sum()
}

/// `sum_between` over a bare series (efficiency pairs deliver cost and
/// impact as plain arrays rather than metrics).
pub fn sum_values_between(series: &[YearValue], start: i32, end: i32) -> f64 {
    check_range(start, end, "sum_values_between");
    series
        .iter()
        .filter(|p| p.year >= start && p.year <= end)
        .filter_map(|p| p.value)
        .sum()
}

/// Cumulative sum of the whole forecast series.
pub fn sum_forecast(metric: &Metric) -> f64 {
    metric.forecast_values.iter().filter_map(|p| p.value).sum()
}

/// Percent change from `base` to `end`, rounded to the nearest integer.
///
/// `None` when there is no baseline to compare against (`base` absent or
/// zero). An absent `end` counts as `0`, matching the card displays where
/// a missing current-year value reads as "down to nothing".
pub fn percent_change(base: Option<f64>, end: Option<f64>) -> Option<i64> {
    let base = base?;
    if base == 0.0 {
        return None;
    }
    let end = end.unwrap_or(0.0);
    Some((((end - base) / base) * 100.0).round() as i64)
}

/// `value / total`, with a zero total resolving to `0.0` rather than an
/// infinity. Feeds stacked-bar segment widths, where a degenerate total
/// must collapse the bar instead of blowing up the layout.
pub fn proportion_of_total(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        value / total
    }
}

/// The metric value of a node at a year; `None` when the node carries no
/// metric at all.
pub fn metric_value(node: &Node, year: i32) -> Option<f64> {
    node.metric.as_ref().and_then(|m| point_value(m, year))
}

/// The impact-metric value of a node at a year, missing resolving to `0`.
pub fn impact_value(node: &Node, year: i32) -> f64 {
    node.impact_metric
        .as_ref()
        .and_then(|m| point_value(m, year))
        .unwrap_or(0.0)
}

/// Total across a flat list of sibling nodes at one year, missing values
/// counting as `0`.
pub fn outcome_total(nodes: &[&Node], year: i32) -> f64 {
    nodes.iter().map(|n| metric_value(n, year).unwrap_or(0.0)).sum()
}

/// Cost per unit of impact, scaled by the display divisor:
/// `cost / |impact| / divisor`.
///
/// Guarding the divisor and the impact against zero is the caller's job; a
/// zero impact yields `inf`, which upstream treats as an unratable action.
pub fn efficiency_ratio(cumulative_cost: f64, cumulative_impact: f64, divisor: f64) -> f64 {
    cumulative_cost / cumulative_impact.abs() / divisor
}

#[inline]
fn check_range(start: i32, end: i32, op: &str) {
    if start > end {
        log::debug!("{op}: empty range, start {start} > end {end}");
    }
}
