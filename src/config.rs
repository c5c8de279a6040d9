//! Runtime configuration for drug-spend-view.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:5000/predict";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Endpoint serving the prediction dataset.
    pub predict_url: String,
    /// Root folder for rendered pages and exports.
    pub outputs_dir: PathBuf,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let predict_url =
            env::var("PREDICT_URL").unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string());
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            predict_url,
            outputs_dir,
            log_level,
        })
    }

    /// Same settings pointing at another endpoint.
    pub fn with_predict_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.predict_url = url;
        }
        self
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
