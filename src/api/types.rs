//! Shared DTOs for JSON responses.

use serde::Serialize;

use crate::view::{charts::ChartConfig, transform::TableRow};

#[derive(Debug, Clone, Serialize)]
pub struct RowDto {
    pub drug: String,
    pub year: String,
    pub total_spending: f64,
    pub avg_spending: f64,
}

impl From<&TableRow> for RowDto {
    fn from(row: &TableRow) -> Self {
        Self {
            drug: row.drug.clone(),
            year: row.year.to_string(),
            total_spending: row.total,
            avg_spending: row.avg,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PieSliceDto {
    pub drug: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartDto {
    pub canvas: String,
    pub config: ChartConfig,
}
