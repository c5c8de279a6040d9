//! CLI entry-point exporting table rows as CSV.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use csv::Writer;
use tracing::{info, instrument};

use crate::{
    cli,
    config::Settings,
    view::{transform::TableRow, ViewState},
};

/// Args for the `export` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Output file (default `<OUTPUTS_DIR>/predictions.csv`).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Only export rows of this drug.
    #[arg(long)]
    pub drug: Option<String>,
    /// Override the prediction endpoint.
    #[arg(long)]
    pub url: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let settings = settings.with_predict_url(args.url);
    let mut view = cli::load_view(&settings).await?;
    if view.state() == ViewState::FetchFailed {
        bail!("prediction dataset unavailable at {}", settings.predict_url);
    }
    view.filter_table(cli::selection(args.drug.as_deref()));

    let out_path = args
        .out
        .unwrap_or_else(|| settings.join_output("predictions.csv"));
    let written = write_rows(&out_path, view.visible_rows())?;
    info!(path = %out_path.display(), rows = written, "exported prediction rows");
    Ok(())
}

/// Write rows with a `drug,year,total_spending,avg_spending` header.
pub fn write_rows<'a>(
    path: &Path,
    rows: impl IntoIterator<Item = &'a TableRow>,
) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = Writer::from_path(path).with_context(|| format!("create {path:?}"))?;
    writer.write_record(["drug", "year", "total_spending", "avg_spending"])?;
    let mut count = 0;
    for row in rows {
        writer.write_record([
            row.drug.clone(),
            row.year.to_string(),
            row.total.to_string(),
            row.avg.to_string(),
        ])?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
