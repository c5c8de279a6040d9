//! Reshaping a dataset into table rows, chart series and the pie aggregate.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    data::{DatasetResponse, YearLabel},
    view::format,
};

/// One table line per (drug, year).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub drug: String,
    pub year: YearLabel,
    pub total: f64,
    pub avg: f64,
    #[serde(skip)]
    pub visible: bool,
}

impl TableRow {
    pub fn total_display(&self) -> String {
        format::currency(self.total)
    }

    pub fn avg_display(&self) -> String {
        format::currency(self.avg)
    }
}

/// Total-spending values of one drug, prior to colour assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub label: String,
    pub years: Vec<YearLabel>,
    pub values: Vec<f64>,
}

/// Per-drug sum of total spending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PieAggregate(IndexMap<String, f64>);

impl PieAggregate {
    pub fn get(&self, drug: &str) -> Option<f64> {
        self.0.get(drug).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(drug, total)| (drug.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, drug: &str, value: f64) {
        *self.0.entry(drug.to_string()).or_insert(0.0) += value;
    }
}

/// Everything the view derives from one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shaped {
    pub rows: Vec<TableRow>,
    pub drugs: Vec<String>,
    /// Label axis for line and bar charts, taken from the first drug.
    pub labels: Vec<YearLabel>,
    pub series: Vec<SeriesData>,
    pub pie: PieAggregate,
}

impl Shaped {
    /// First drug whose year axis differs from the shared label axis.
    pub fn misaligned_drug(&self) -> Option<&str> {
        self.series
            .iter()
            .find(|series| series.years != self.labels)
            .map(|series| series.label.as_str())
    }
}

/// Walk drugs in response order and derive rows, series and the pie aggregate.
pub fn shape(dataset: &DatasetResponse) -> Shaped {
    let mut shaped = Shaped::default();
    for (idx, (drug, series)) in dataset.iter().enumerate() {
        if idx == 0 {
            shaped.labels = series.years().to_vec();
        }
        shaped.drugs.push(drug.to_string());
        shaped.pie.add(drug, 0.0);
        for (year, total, avg) in series.points() {
            shaped.rows.push(TableRow {
                drug: drug.to_string(),
                year: year.clone(),
                total,
                avg,
                visible: true,
            });
            shaped.pie.add(drug, total);
        }
        shaped.series.push(SeriesData {
            label: drug.to_string(),
            years: series.years().to_vec(),
            values: series.total_spending().to_vec(),
        });
    }
    shaped
}
