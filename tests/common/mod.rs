#![allow(dead_code)]

use drug_spend_view::{
    data::{DatasetResponse, DatasetSource},
    ui::SvgSurface,
    view::{PredictionView, ViewError},
};
use rand::{rngs::StdRng, SeedableRng};

pub const DRUG_A: &str = r#"{
    "DrugA": {"years": [2020, 2021], "total_spending": [10, 20], "avg_spending": [5, 10]}
}"#;

pub const TWO_DRUGS: &str = r#"{
    "Zeta": {"years": [2023, 2024, 2025], "total_spending": [300.5, 310.25, 320], "avg_spending": [30, 31, 32]},
    "Alpha": {"years": [2023, 2024, 2025], "total_spending": [100, 110, 120], "avg_spending": [10, 11, 12]}
}"#;

pub const MISALIGNED: &str = r#"{
    "DrugA": {"years": [2023, 2024, 2025], "total_spending": [1, 2, 3], "avg_spending": [1, 1, 1]},
    "DrugB": {"years": [2023, 2024], "total_spending": [4, 5], "avg_spending": [2, 2]}
}"#;

/// Hands out a canned dataset or failure.
pub struct Fixed(pub Result<DatasetResponse, String>);

impl Fixed {
    pub fn json(body: &str) -> Self {
        Self(Ok(DatasetResponse::from_json(body).expect("fixture parses")))
    }

    pub fn failing(message: &str) -> Self {
        Self(Err(message.to_string()))
    }
}

impl DatasetSource for Fixed {
    async fn fetch(&self) -> Result<DatasetResponse, ViewError> {
        self.0.clone().map_err(ViewError::FetchOrParse)
    }
}

pub fn seeded_view() -> PredictionView<SvgSurface> {
    PredictionView::with_rng(SvgSurface::new(), StdRng::seed_from_u64(7))
}

pub async fn loaded_view(body: &str) -> PredictionView<SvgSurface> {
    let mut view = seeded_view();
    view.load(&Fixed::json(body)).await;
    view
}
