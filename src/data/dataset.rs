//! Prediction dataset as returned by the `/predict` endpoint.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::view::ViewError;

/// Year label on a drug series. The endpoint emits integers, older dumps used strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearLabel {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(year) => write!(f, "{year}"),
            Self::Text(label) => f.write_str(label),
        }
    }
}

impl From<i64> for YearLabel {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

/// Parallel-indexed spending predictions for one drug.
///
/// `years[i]`, `total_spending[i]` and `avg_spending[i]` describe the same year.
/// Deserialisation rejects series whose sequences differ in length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDrugSeries")]
pub struct DrugSeries {
    years: Vec<YearLabel>,
    total_spending: Vec<f64>,
    avg_spending: Vec<f64>,
}

#[derive(Deserialize)]
struct RawDrugSeries {
    years: Vec<YearLabel>,
    total_spending: Vec<f64>,
    avg_spending: Vec<f64>,
}

impl TryFrom<RawDrugSeries> for DrugSeries {
    type Error = String;

    fn try_from(raw: RawDrugSeries) -> Result<Self, Self::Error> {
        let years = raw.years.len();
        if raw.total_spending.len() != years || raw.avg_spending.len() != years {
            return Err(format!(
                "series lengths differ: {years} years, {} totals, {} averages",
                raw.total_spending.len(),
                raw.avg_spending.len()
            ));
        }
        Ok(Self {
            years: raw.years,
            total_spending: raw.total_spending,
            avg_spending: raw.avg_spending,
        })
    }
}

impl DrugSeries {
    /// Build a series, checking the parallel-length invariant.
    pub fn new(
        years: Vec<YearLabel>,
        total_spending: Vec<f64>,
        avg_spending: Vec<f64>,
    ) -> Result<Self, ViewError> {
        RawDrugSeries {
            years,
            total_spending,
            avg_spending,
        }
        .try_into()
        .map_err(ViewError::FetchOrParse)
    }

    pub fn years(&self) -> &[YearLabel] {
        &self.years
    }

    pub fn total_spending(&self) -> &[f64] {
        &self.total_spending
    }

    /// Iterate `(year, total, avg)` triples in index order.
    pub fn points(&self) -> impl Iterator<Item = (&YearLabel, f64, f64)> + '_ {
        self.years
            .iter()
            .zip(self.total_spending.iter().copied())
            .zip(self.avg_spending.iter().copied())
            .map(|((year, total), avg)| (year, total, avg))
    }
}

/// Drug name → series, in the order the endpoint listed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetResponse {
    drugs: IndexMap<String, DrugSeries>,
}

impl DatasetResponse {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, ViewError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn get(&self, drug: &str) -> Option<&DrugSeries> {
        self.drugs.get(drug)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DrugSeries)> + '_ {
        self.drugs.iter().map(|(name, series)| (name.as_str(), series))
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}

impl FromIterator<(String, DrugSeries)> for DatasetResponse {
    fn from_iter<T: IntoIterator<Item = (String, DrugSeries)>>(iter: T) -> Self {
        Self {
            drugs: iter.into_iter().collect(),
        }
    }
}
