use serde_yaml::Value;

use crate::domain::{AppError, ReleaseInfo};

/// Renders chart templates into Kubernetes manifests.
pub trait ChartRenderer {
    /// The chart's own `values.yaml`.
    fn default_values(&self) -> Result<Value, AppError>;

    /// Render one template with `values` layered over the chart defaults.
    ///
    /// `values` are the caller's values only. The renderer does the layering
    /// itself, the way `helm template --values` does, so explicit nulls still
    /// delete chart defaults.
    ///
    /// Returns the manifest text exactly as `helm template --show-only`
    /// would print it: possibly several `---`-separated documents.
    fn render(&self, values: &Value, release: &ReleaseInfo, template: &str)
    -> Result<String, AppError>;
}
