//! series.rs
//! Year/value series and the `Metric` response shape.

use serde::{Deserialize, Serialize};

/// One observed or projected data point of a metric.
///
/// Upstream data guarantees neither sort order nor contiguous years, and a
/// point may carry no value at all (`value: null` in the payload). Absent
/// values are distinct from zero: they contribute nothing to sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearValue {
    pub year: i32,
    #[serde(default)]
    pub value: Option<f64>,
}

impl YearValue {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value: Some(value) }
    }

    pub fn empty(year: i32) -> Self {
        Self { year, value: None }
    }
}

/// Display unit of a metric, as delivered by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Unit {
    pub short: Option<String>,
    pub html_short: Option<String>,
    pub long: Option<String>,
}

impl Unit {
    /// The plain-text rendering, preferring the short form.
    pub fn label(&self) -> &str {
        self.short
            .as_deref()
            .or(self.html_short.as_deref())
            .or(self.long.as_deref())
            .unwrap_or("")
    }
}

/// A named quantity with historical and forecast series plus a unit.
///
/// Immutable snapshot per query response; never mutated locally. The
/// historical and forecast series may overlap at the baseline year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metric {
    pub id: Option<String>,
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub historical_values: Vec<YearValue>,
    pub forecast_values: Vec<YearValue>,
    pub baseline_forecast_values: Vec<YearValue>,
}

impl Metric {
    /// Finds the point for an exact year, searching historical values before
    /// forecast values. The first match wins even when its value is absent,
    /// so a null historical point shadows a forecast point at the same year.
    pub fn point(&self, year: i32) -> Option<&YearValue> {
        self.historical_values
            .iter()
            .find(|p| p.year == year)
            .or_else(|| self.forecast_values.iter().find(|p| p.year == year))
    }

    /// All points, historical first. No deduplication of overlapping years.
    pub fn iter_points(&self) -> impl Iterator<Item = &YearValue> {
        self.historical_values.iter().chain(self.forecast_values.iter())
    }

    /// The minimum-year historical point (the comparison baseline).
    /// Series are unsorted, so this scans rather than indexing the front.
    pub fn earliest_historical(&self) -> Option<&YearValue> {
        self.historical_values.iter().min_by_key(|p| p.year)
    }

    /// The maximum-year historical point (the last measured observation).
    pub fn latest_historical(&self) -> Option<&YearValue> {
        self.historical_values.iter().max_by_key(|p| p.year)
    }

    pub fn last_historical_year(&self) -> Option<i32> {
        self.latest_historical().map(|p| p.year)
    }

    pub fn first_forecast_year(&self) -> Option<i32> {
        self.forecast_values.iter().map(|p| p.year).min()
    }

    /// Whether a year lies strictly after the last measured observation.
    /// With no historical data everything counts as forecast.
    pub fn is_forecast_year(&self, year: i32) -> bool {
        self.last_historical_year().map_or(true, |last| year > last)
    }

    /// The forecast series extended with the last historical point, ordered
    /// by year. Gives charts a gap-free handoff between the two series
    /// without touching the aggregation semantics.
    pub fn joined_forecast(&self) -> Vec<YearValue> {
        let mut joined = self.forecast_values.clone();
        if let Some(last) = self.latest_historical() {
            joined.push(*last);
        }
        joined.sort_by_key(|p| p.year);
        joined
    }
}

/// In-range filter over a bare series, preserving input order.
pub fn values_between(series: &[YearValue], start: i32, end: i32) -> impl Iterator<Item = &YearValue> {
    series.iter().filter(move |p| p.year >= start && p.year <= end)
}
