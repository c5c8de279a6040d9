//! Retrieval of prediction datasets.

use std::future::Future;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::{config::Settings, data::dataset::DatasetResponse, view::ViewError};

/// Anything that can hand the view one dataset.
pub trait DatasetSource {
    fn fetch(&self) -> impl Future<Output = Result<DatasetResponse, ViewError>> + Send;
}

/// `GET`s the dataset from the prediction endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, ViewError> {
        Ok(Self {
            client: http_client()?,
            url: url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ViewError> {
        Self::new(settings.predict_url.clone())
    }
}

impl DatasetSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<DatasetResponse, ViewError> {
        let resp = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = resp.text().await?;
        debug!(bytes = body.len(), "received prediction body");
        DatasetResponse::from_json(&body)
    }
}

fn http_client() -> Result<Client, ViewError> {
    Ok(Client::builder()
        .user_agent(concat!("drug-spend-view/", env!("CARGO_PKG_VERSION")))
        .gzip(true)
        .brotli(true)
        .build()?)
}
