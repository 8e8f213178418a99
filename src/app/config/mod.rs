//! Loading `dagster-chart.toml`.
//!
//! Parsing and defaults live in `domain::render_config`.

mod load_config;

pub use load_config::load_config;
