//! The prediction view: loads a dataset once, shapes it and reacts to the
//! filter and show-charts actions.
//!
//! ```text
//! Loading ──load ok──▶ Loaded ──show_charts──▶ ChartsVisible ⟲ show_charts
//!    └────load err───▶ FetchFailed
//! ```

pub mod charts;
pub mod filter;
pub mod format;
pub mod transform;

use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::data::{DatasetResponse, DatasetSource};

use self::{
    charts::{ChartConfig, ChartHandle, ChartKind, ChartSlot, ChartSurface},
    filter::FilterSelection,
    transform::{PieAggregate, Shaped, TableRow},
};

#[derive(Debug, Error)]
pub enum ViewError {
    /// Network error, error status, malformed body or inconsistent series.
    #[error("failed to fetch or parse prediction dataset: {0}")]
    FetchOrParse(String),
    #[error("drug `{drug}` does not share the year axis of `{first}`")]
    InconsistentAxis { drug: String, first: String },
    #[error("prediction dataset has not been loaded")]
    NotLoaded,
    #[error("canvas `{0}` already holds a live chart")]
    CanvasInUse(String),
    #[error("failed to render chart: {0}")]
    Render(#[from] askama::Error),
}

impl From<reqwest::Error> for ViewError {
    fn from(err: reqwest::Error) -> Self {
        Self::FetchOrParse(err.to_string())
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        Self::FetchOrParse(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Loaded,
    ChartsVisible,
    FetchFailed,
}

impl ViewState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded | Self::ChartsVisible)
    }
}

#[derive(Debug, Default)]
struct ChartSlots {
    line: ChartSlot,
    bar: ChartSlot,
    pie: ChartSlot,
}

impl ChartSlots {
    fn slot_mut(&mut self, kind: ChartKind) -> &mut ChartSlot {
        match kind {
            ChartKind::Line => &mut self.line,
            ChartKind::Bar => &mut self.bar,
            ChartKind::Pie => &mut self.pie,
        }
    }

    fn slot(&self, kind: ChartKind) -> &ChartSlot {
        match kind {
            ChartKind::Line => &self.line,
            ChartKind::Bar => &self.bar,
            ChartKind::Pie => &self.pie,
        }
    }
}

/// View model behind the prediction page.
#[derive(Debug)]
pub struct PredictionView<S> {
    state: ViewState,
    shaped: Shaped,
    selection: FilterSelection,
    surface: S,
    charts: ChartSlots,
    rng: StdRng,
}

impl<S: ChartSurface> PredictionView<S> {
    pub fn new(surface: S) -> Self {
        Self::with_rng(surface, StdRng::from_entropy())
    }

    /// Use a caller-provided random source for chart colours.
    pub fn with_rng(surface: S, rng: StdRng) -> Self {
        Self {
            state: ViewState::Loading,
            shaped: Shaped::default(),
            selection: FilterSelection::All,
            surface,
            charts: ChartSlots::default(),
            rng,
        }
    }

    /// Fetch the dataset once and populate rows and filter options.
    /// Failures are logged and leave the view empty.
    #[instrument(skip_all)]
    pub async fn load<D: DatasetSource>(&mut self, source: &D) {
        if !self.awaiting_dataset() {
            return;
        }
        let result = source.fetch().await;
        self.apply_fetch_result(result);
    }

    /// Settle a fetch that ran outside the view. Only acts while `Loading`.
    pub fn apply_fetch_result(&mut self, result: Result<DatasetResponse, ViewError>) {
        if !self.awaiting_dataset() {
            return;
        }
        match result {
            Ok(dataset) => self.populate(&dataset),
            Err(err) => {
                error!(%err, "could not load prediction dataset");
                self.state = ViewState::FetchFailed;
            }
        }
    }

    fn awaiting_dataset(&self) -> bool {
        if self.state != ViewState::Loading {
            warn!(state = ?self.state, "prediction view already loaded; ignoring reload");
            return false;
        }
        true
    }

    fn populate(&mut self, dataset: &DatasetResponse) {
        self.shaped = transform::shape(dataset);
        self.selection = FilterSelection::All;
        self.state = ViewState::Loaded;
        info!(
            drugs = self.shaped.drugs.len(),
            rows = self.shaped.rows.len(),
            "prediction dataset loaded"
        );
    }

    /// Show only rows of the selected drug, or every row for `all`.
    pub fn filter_table(&mut self, selection: FilterSelection) {
        for row in &mut self.shaped.rows {
            row.visible = selection.matches(&row.drug);
        }
        self.selection = selection;
    }

    /// Draw line, bar and pie charts, disposing of any previous ones first.
    #[instrument(skip(self))]
    pub fn show_charts(&mut self) -> Result<(), ViewError> {
        if !self.state.is_loaded() {
            return Err(ViewError::NotLoaded);
        }
        if let Some(drug) = self.shaped.misaligned_drug() {
            let first = self.shaped.drugs.first().cloned().unwrap_or_default();
            return Err(ViewError::InconsistentAxis {
                drug: drug.to_string(),
                first,
            });
        }
        for kind in ChartKind::ALL {
            let config = ChartConfig::build(kind, &self.shaped, &mut self.rng);
            self.charts
                .slot_mut(kind)
                .replace(&mut self.surface, kind.canvas_id(), config)?;
        }
        self.state = ViewState::ChartsVisible;
        info!("charts rendered");
        Ok(())
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.shaped.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> + '_ {
        self.shaped.rows.iter().filter(|row| row.visible)
    }

    /// Drug names for the filter select, in response order.
    pub fn filter_options(&self) -> &[String] {
        &self.shaped.drugs
    }

    pub fn pie(&self) -> &PieAggregate {
        &self.shaped.pie
    }

    pub fn charts_visible(&self) -> bool {
        self.state == ViewState::ChartsVisible
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&ChartHandle> {
        self.charts.slot(kind).handle()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
