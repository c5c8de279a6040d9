//! CLI entry-point printing per-drug predictions.

use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli,
    config::Settings,
    view::{format::currency_grouped, ViewState},
};

/// Args for the `show` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Only print this drug.
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

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for drug in view.filter_options() {
        let mut rows = view.visible_rows().filter(|row| &row.drug == drug).peekable();
        if rows.peek().is_none() {
            continue;
        }
        writeln!(out, "\nPredictions for {drug}:")?;
        for row in rows {
            writeln!(out, "Year {}:", row.year)?;
            writeln!(out, "  Predicted Total Spending: {}", currency_grouped(row.total))?;
            writeln!(
                out,
                "  Predicted Avg Spending per Beneficiary: {}",
                currency_grouped(row.avg)
            )?;
        }
    }
    Ok(())
}
