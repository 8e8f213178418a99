//! dagster-chart: render and check the instance ConfigMap of the Dagster Helm chart.
//!
//! Typed [`DagsterHelmValues`] go in; parsed [`ConfigMap`]s holding
//! `dagster.yaml` come out. Rendering runs against the chart embedded in this
//! crate, or against an on-disk chart through the `helm` binary.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

use std::path::{Path, PathBuf};

use adapters::EmbeddedChartRenderer;

pub use adapters::HelmCommandRenderer;
pub use app::commands::render::{INSTANCE_TEMPLATE, InstanceTemplate, RenderedManifest};
pub use domain::instance::{ClassSpec, InstanceDocument};
pub use domain::values;
pub use domain::{AppError, ConfigMap, DagsterHelmValues, ReleaseInfo, RenderConfig};
pub use ports::ChartRenderer;

/// Template shim over the embedded chart with the default release.
pub fn embedded_template() -> Result<InstanceTemplate<EmbeddedChartRenderer>, AppError> {
    Ok(InstanceTemplate::new(EmbeddedChartRenderer::new()?))
}

/// Render the instance ConfigMap(s) for `values` with the embedded chart.
pub fn render_instance(values: &DagsterHelmValues) -> Result<Vec<ConfigMap>, AppError> {
    embedded_template()?.render(values)
}

/// `values.schema.json` as pretty-printed JSON.
pub fn values_schema_json() -> Result<String, AppError> {
    app::commands::schema::show()
}

/// Write `values.schema.json` into `chart_dir`.
pub fn apply_values_schema(chart_dir: &Path) -> Result<PathBuf, AppError> {
    app::commands::schema::apply(chart_dir)
}
