//! HTTP route handlers for Axum.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    api::types::{ChartDto, PieSliceDto, RowDto},
    ui,
    view::{charts::ChartKind, filter::FilterSelection, ViewError},
};

use super::AppState;

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub drug: Option<String>,
}

/// The prediction page. `?drug=` applies the filter before rendering.
pub async fn page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Html<String>> {
    let mut view = state.view.lock().await;
    if let Some(drug) = query.drug {
        view.filter_table(FilterSelection::from(drug.as_str()));
    }
    ui::render_page(&view, &state.settings.predict_url)
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn show_charts(State(state): State<AppState>) -> ApiResult<Redirect> {
    let mut view = state.view.lock().await;
    match view.show_charts() {
        Ok(()) => Ok(Redirect::to("/")),
        Err(err) => {
            warn!(%err, "show charts rejected");
            let status = match err {
                ViewError::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
                ViewError::InconsistentAxis { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, err.to_string()))
        }
    }
}

pub async fn list_rows(State(state): State<AppState>) -> Json<Vec<RowDto>> {
    let view = state.view.lock().await;
    Json(view.visible_rows().map(RowDto::from).collect())
}

pub async fn pie(State(state): State<AppState>) -> Json<Vec<PieSliceDto>> {
    let view = state.view.lock().await;
    Json(
        view.pie()
            .iter()
            .map(|(drug, total)| PieSliceDto {
                drug: drug.to_string(),
                total,
            })
            .collect(),
    )
}

pub async fn chart_configs(State(state): State<AppState>) -> Json<Vec<ChartDto>> {
    let view = state.view.lock().await;
    Json(
        ChartKind::ALL
            .into_iter()
            .filter_map(|kind| view.chart(kind))
            .map(|handle| ChartDto {
                canvas: handle.canvas().to_string(),
                config: handle.config().clone(),
            })
            .collect(),
    )
}
