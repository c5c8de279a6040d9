//! HTML page rendering and the SVG chart surface.

pub mod svg;

use askama::Template;
use chrono::Utc;

use crate::view::{
    charts::ChartKind, filter::FilterSelection, transform::TableRow, PredictionView,
};

pub use svg::SvgSurface;

pub struct FilterOption<'a> {
    pub value: &'a str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "view.html")]
pub struct PageTemplate<'a> {
    pub rows: &'a [TableRow],
    pub options: Vec<FilterOption<'a>>,
    pub all_selected: bool,
    pub charts_visible: bool,
    pub line_chart: &'a str,
    pub bar_chart: &'a str,
    pub pie_chart: &'a str,
    pub endpoint: &'a str,
    pub generated_at: String,
}

impl<'a> PageTemplate<'a> {
    /// Snapshot the current state of `view`.
    pub fn from_view(view: &'a PredictionView<SvgSurface>, endpoint: &'a str) -> Self {
        let selection = view.selection();
        let chart = move |kind: ChartKind| view.surface().svg(kind.canvas_id()).unwrap_or_default();
        Self {
            rows: view.rows(),
            options: view
                .filter_options()
                .iter()
                .map(|drug| FilterOption {
                    value: drug.as_str(),
                    selected: matches!(selection, FilterSelection::Drug(d) if d == drug),
                })
                .collect(),
            all_selected: *selection == FilterSelection::All,
            charts_visible: view.charts_visible(),
            line_chart: chart(ChartKind::Line),
            bar_chart: chart(ChartKind::Bar),
            pie_chart: chart(ChartKind::Pie),
            endpoint,
            generated_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        }
    }
}

/// Render the full prediction page for `view`.
pub fn render_page(
    view: &PredictionView<SvgSurface>,
    endpoint: &str,
) -> Result<String, askama::Error> {
    PageTemplate::from_view(view, endpoint).render()
}
