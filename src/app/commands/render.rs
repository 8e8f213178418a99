//! Rendering the instance ConfigMap from typed or raw values.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::values::merge;
use crate::domain::{AppError, ConfigMap, DagsterHelmValues, ReleaseInfo, parse_config_maps};
use crate::ports::ChartRenderer;

/// Template holding the instance ConfigMap.
pub const INSTANCE_TEMPLATE: &str = "templates/configmap-instance.yaml";

/// Renders one chart template for a set of values and parses the result.
///
/// Values are layered over the chart's `values.yaml`, validated, rendered by
/// the configured [`ChartRenderer`] and split into ConfigMaps. Every
/// rendered `dagster.yaml` is checked so built-in classes only carry config
/// fields they accept.
#[derive(Debug, Clone)]
pub struct InstanceTemplate<R: ChartRenderer> {
    renderer: R,
    output: String,
    release: ReleaseInfo,
}

/// Raw manifest text together with the ConfigMaps parsed out of it.
#[derive(Debug, Clone)]
pub struct RenderedManifest {
    pub manifest: String,
    pub config_maps: Vec<ConfigMap>,
}

impl<R: ChartRenderer> InstanceTemplate<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer, output: INSTANCE_TEMPLATE.to_string(), release: ReleaseInfo::default() }
    }

    pub fn with_release(mut self, release: ReleaseInfo) -> Self {
        self.release = release;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn render(&self, values: &DagsterHelmValues) -> Result<Vec<ConfigMap>, AppError> {
        self.render_value(values.to_yaml_value()?)
    }

    /// Render from an untyped values document, e.g. one read from a file.
    pub fn render_value(&self, values: serde_yaml::Value) -> Result<Vec<ConfigMap>, AppError> {
        Ok(self.render_manifest(values)?.config_maps)
    }

    pub fn render_manifest(&self, values: serde_yaml::Value) -> Result<RenderedManifest, AppError> {
        self.release.validate()?;

        // Merged here for validation only; the renderer layers `values` itself.
        let merged = merge::coalesce(self.renderer.default_values()?, values.clone());
        DagsterHelmValues::from_yaml_value(merged)?.validate()?;

        let manifest = self.renderer.render(&values, &self.release, &self.output)?;
        let config_maps = parse_config_maps(&manifest)?;
        for config_map in &config_maps {
            config_map.instance()?.check_builtin_fields()?;
        }

        info!(
            template = %self.output,
            release = %self.release.name,
            config_maps = config_maps.len(),
            "rendered instance template"
        );
        Ok(RenderedManifest { manifest, config_maps })
    }
}

/// What the `render` command should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderOutput {
    #[default]
    Manifest,
    Checksum,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Values files, merged in order.
    pub values_files: Vec<PathBuf>,
    pub output: RenderOutput,
}

/// Execute the render command: merge the values files and render them.
pub fn execute<R: ChartRenderer>(
    template: &InstanceTemplate<R>,
    options: &RenderOptions,
) -> Result<String, AppError> {
    let values = read_values_files(&options.values_files)?;
    let rendered = template.render_manifest(values)?;

    match options.output {
        RenderOutput::Manifest => Ok(rendered.manifest),
        RenderOutput::Checksum => {
            let mut lines = Vec::with_capacity(rendered.config_maps.len());
            for config_map in &rendered.config_maps {
                lines.push(format!("{}  {}", config_map.instance_checksum()?, config_map.metadata.name));
            }
            Ok(lines.join("\n") + "\n")
        }
    }
}

fn read_values_files(paths: &[PathBuf]) -> Result<serde_yaml::Value, AppError> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_file() {
            return Err(AppError::ValuesFileNotFound(path.display().to_string()));
        }
        debug!(path = %path.display(), "reading values file");
        let content = fs::read_to_string(path)?;
        let document: serde_yaml::Value = serde_yaml::from_str(&content)?;
        if !(document.is_mapping() || document.is_null()) {
            return Err(AppError::invalid_values(
                path.display().to_string(),
                "values file must contain a mapping",
            ));
        }
        documents.push(document);
    }
    Ok(merge::layer_all(documents))
}
