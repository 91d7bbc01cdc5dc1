//! scenario.rs
//! Scenarios and the instance-level year configuration.

use serde::{Deserialize, Serialize};

/// A named parameter configuration selectable by the user. Activation is a
/// server-side mutation; the client only reads the flags back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub is_default: bool,
}

/// The scenario to display: the active one, falling back to the default.
pub fn active_scenario(scenarios: &[Scenario]) -> Option<&Scenario> {
    scenarios
        .iter()
        .find(|s| s.is_active)
        .or_else(|| scenarios.iter().find(|s| s.is_default))
}

/// Deployment-level configuration delivered with every page query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instance {
    pub id: String,
    pub name: Option<String>,
    pub minimum_historical_year: Option<i32>,
    pub maximum_historical_year: Option<i32>,
    pub reference_year: Option<i32>,
    pub target_year: Option<i32>,
}

/// The resolved year span the dashboard operates in.
///
/// `latest_metric_year` is the newest measured year (the natural start of
/// the display range); `max_year` is the scenario horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub min_year: i32,
    pub max_year: i32,
    pub latest_metric_year: i32,
    pub reference_year: Option<i32>,
}

impl Settings {
    pub fn new(min_year: i32, max_year: i32, latest_metric_year: i32) -> Self {
        Self { min_year, max_year, latest_metric_year, reference_year: None }
    }

    /// Resolves the instance config, filling gaps from neighboring fields.
    pub fn from_instance(instance: &Instance) -> Self {
        let latest = instance
            .maximum_historical_year
            .or(instance.reference_year)
            .or(instance.minimum_historical_year)
            .unwrap_or(0);
        let min_year = instance.minimum_historical_year.unwrap_or(latest);
        let max_year = instance.target_year.unwrap_or(latest);
        Self {
            min_year,
            max_year,
            latest_metric_year: latest,
            reference_year: instance.reference_year,
        }
    }

    /// The range shown before the user touches the selector:
    /// last measured year through the scenario horizon.
    pub fn default_year_range(&self) -> (i32, i32) {
        (self.latest_metric_year, self.max_year)
    }

    pub fn contains_year(&self, year: i32) -> bool {
        year >= self.min_year && year <= self.max_year
    }

    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.min_year, self.max_year)
    }
}
