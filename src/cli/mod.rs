//! Command-line interface wiring for drug-spend-view.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::instrument;

use crate::{
    config::Settings,
    data::HttpSource,
    ui::SvgSurface,
    view::{filter::FilterSelection, PredictionView},
};

pub mod export;
pub mod render;
pub mod serve;
pub mod show;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Drug spending prediction viewer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Render(args) => render::run(args, settings).await,
            Commands::Show(args) => show::run(args, settings).await,
            Commands::Export(args) => export::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the prediction page over HTTP.
    Serve(serve::Args),
    /// Write the prediction page to an HTML file.
    Render(render::Args),
    /// Print predictions per drug.
    Show(show::Args),
    /// Write table rows as CSV.
    Export(export::Args),
}

/// Build a view and run its single load against the configured endpoint.
#[instrument(skip(settings), fields(url = %settings.predict_url))]
pub async fn load_view(settings: &Settings) -> Result<PredictionView<SvgSurface>> {
    let source = HttpSource::from_settings(settings)?;
    let mut view = PredictionView::new(SvgSurface::new());
    view.load(&source).await;
    Ok(view)
}

/// Parse an optional `--drug` flag into a filter selection.
pub fn selection(drug: Option<&str>) -> FilterSelection {
    drug.map(FilterSelection::from).unwrap_or_default()
}
