//! Dataset model and retrieval layer.

pub mod dataset;
pub mod source;

pub use dataset::{DatasetResponse, DrugSeries, YearLabel};
pub use source::{DatasetSource, HttpSource};
