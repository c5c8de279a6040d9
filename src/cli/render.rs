//! CLI entry-point for writing the prediction page to disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{cli, config::Settings, ui};

/// Args for the `render` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Output file (default `<OUTPUTS_DIR>/predictions.html`).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Only show rows of this drug (`all` for every drug).
    #[arg(long)]
    pub drug: Option<String>,
    /// Render the charts as if "show charts" had been pressed.
    #[arg(long)]
    pub charts: bool,
    /// Override the prediction endpoint.
    #[arg(long)]
    pub url: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let settings = settings.with_predict_url(args.url);
    let mut view = cli::load_view(&settings).await?;
    view.filter_table(cli::selection(args.drug.as_deref()));
    if args.charts {
        if let Err(err) = view.show_charts() {
            warn!(%err, "charts not rendered");
        }
    }

    let html = ui::render_page(&view, &settings.predict_url).context("rendering page")?;
    let out_path = args
        .out
        .unwrap_or_else(|| settings.join_output("predictions.html"));
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, html).with_context(|| format!("write {out_path:?}"))?;
    info!(path = %out_path.display(), rows = view.rows().len(), "wrote prediction page");
    Ok(())
}
