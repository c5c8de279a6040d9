//! Viewer for drug-spending prediction datasets: fetches the `/predict`
//! dataset, shapes it into a table and charts, and serves or renders the page.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod ui;
pub mod view;
