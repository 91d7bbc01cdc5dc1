//! table.rs
//! Year-by-year data table behind each outcome card.
//!
//! Historical rows come first, then forecast rows, both restricted to the
//! active range. Sub-node columns look a value up in the series of the
//! same kind, so a sub-node's forecast never leaks into a historical row.

use std::fmt;

use crate::model::{values_between, Node, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Historical,
    Forecast,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps the width flags of table layouts working
        match self {
            SeriesKind::Historical => f.pad("Historical"),
            SeriesKind::Forecast => f.pad("Forecast"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub year: i32,
    pub kind: SeriesKind,
    /// One entry per sub-node column, `None` where the sub-node has no
    /// point of the matching kind at this year.
    pub sub_values: Vec<Option<f64>>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub title: String,
    pub unit: Option<Unit>,
    /// Sub-node display names, in the caller's deck order.
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Derives the table for a node and its sub-node columns over `[start, end]`.
pub fn build_table(node: &Node, sub_nodes: &[&Node], start: i32, end: i32) -> DataTable {
    let columns = sub_nodes.iter().map(|n| n.display_name().to_string()).collect();
    let mut rows = Vec::new();

    if let Some(metric) = &node.metric {
        for point in values_between(&metric.historical_values, start, end) {
            rows.push(row(SeriesKind::Historical, point.year, point.value, sub_nodes));
        }
        for point in values_between(&metric.forecast_values, start, end) {
            rows.push(row(SeriesKind::Forecast, point.year, point.value, sub_nodes));
        }
    }

    DataTable {
        title: node.display_name().to_string(),
        unit: node.metric.as_ref().and_then(|m| m.unit.clone()),
        columns,
        rows,
    }
}

fn row(kind: SeriesKind, year: i32, value: Option<f64>, sub_nodes: &[&Node]) -> TableRow {
    let sub_values = sub_nodes
        .iter()
        .map(|sub| {
            let metric = sub.metric.as_ref()?;
            let series = match kind {
                SeriesKind::Historical => &metric.historical_values,
                SeriesKind::Forecast => &metric.forecast_values,
            };
            series.iter().find(|p| p.year == year).and_then(|p| p.value)
        })
        .collect();
    TableRow { year, kind, sub_values, value }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{:<6} {:<10}", "Year", "Type")?;
        for column in &self.columns {
            write!(f, " {:>12}", column)?;
        }
        writeln!(f, " {:>12} {}", "Total", self.unit.as_ref().map_or("", |u| u.label()))?;

        for row in &self.rows {
            write!(f, "{:<6} {:<10}", row.year, row.kind)?;
            for sub in &row.sub_values {
                write!(f, " {:>12}", cell(*sub))?;
            }
            writeln!(f, " {:>12}", cell(row.value))?;
        }
        Ok(())
    }
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}
