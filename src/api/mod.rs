//! HTTP layer serving the prediction page and its JSON views.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::Mutex, task::JoinHandle};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::Settings, data::DatasetSource, ui::SvgSurface, view::PredictionView};

pub type SharedView = Arc<Mutex<PredictionView<SvgSurface>>>;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub view: SharedView,
}

impl AppState {
    pub fn new(settings: Settings, view: PredictionView<SvgSurface>) -> Self {
        Self {
            settings,
            view: Arc::new(Mutex::new(view)),
        }
    }
}

/// Routes for the page, the show-charts action and the JSON views.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::page))
        .route("/charts", post(routes::show_charts))
        .route("/api/rows", get(routes::list_rows))
        .route("/api/pie", get(routes::pie))
        .route("/api/charts", get(routes::chart_configs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fetch in the background and settle the shared view once the endpoint
/// answers. The page keeps rendering the `Loading` view meanwhile.
pub fn spawn_load<D>(view: SharedView, source: D) -> JoinHandle<()>
where
    D: DatasetSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = source.fetch().await;
        view.lock().await.apply_fetch_result(result);
    })
}

pub async fn serve<D>(settings: Settings, source: D, host: String, port: u16) -> Result<()>
where
    D: DatasetSource + Send + Sync + 'static,
{
    let state = AppState::new(settings, PredictionView::new(SvgSurface::new()));
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "serving prediction view");

    spawn_load(state.view.clone(), source);
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
