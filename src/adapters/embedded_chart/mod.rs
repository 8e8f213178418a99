//! The chart's instance templates, embedded in the binary and rendered with
//! minijinja instead of Helm.

mod asset_collect;
mod template_engine;

use std::collections::BTreeMap;

use include_dir::{Dir, include_dir};
use minijinja::{Value, context};
use tracing::debug;

use crate::domain::instance::{
    BUILTIN_CLASSES, DAGSTER_HOME_ENV, INSTANCE_CONFIG_MAP_ENV, PG_PASSWORD_ENV,
    PG_PASSWORD_SECRET_ENV, RUN_ENV_CONFIG_MAP_ENV,
};
use crate::domain::values::merge;
use crate::domain::{AppError, ChartMetadata, DagsterHelmValues, ReleaseInfo};
use crate::ports::ChartRenderer;

use self::asset_collect::{ChartSourceFile, collect_chart_sources, find_source};
use self::template_engine::{build_template_environment, render_template_by_name};

static CHART_ASSET_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/chart");

const CHART_FILE: &str = "Chart.yaml";
const VALUES_FILE: &str = "values.yaml";

/// Renders the embedded copy of the chart.
#[derive(Debug, Clone)]
pub struct EmbeddedChartRenderer {
    sources: Vec<ChartSourceFile>,
    chart: ChartMetadata,
}

impl EmbeddedChartRenderer {
    pub fn new() -> Result<Self, AppError> {
        let sources = collect_chart_sources(&CHART_ASSET_DIR)?;
        let chart: ChartMetadata = serde_yaml::from_str(&find_source(&sources, CHART_FILE)?.content)?;
        Ok(Self { sources, chart })
    }

    pub fn chart(&self) -> &ChartMetadata {
        &self.chart
    }

    /// Names of the templates that render to manifests.
    pub fn template_names(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter(|source| source.is_template() && !source.is_partial())
            .map(|source| source.template_name())
            .collect()
    }

    fn build_context(
        &self,
        values: &serde_yaml::Value,
        release: &ReleaseInfo,
    ) -> Result<Value, AppError> {
        let merged = merge::coalesce(self.default_values()?, values.clone());
        let typed = DagsterHelmValues::from_yaml_value(merged.clone())?;

        let fullname = self.chart.fullname(
            release,
            typed.name_override.as_deref(),
            typed.fullname_override.as_deref(),
        );
        let service_account_name =
            typed.service_account.clone().unwrap_or_default().resolved_name(&fullname);
        let postgresql_host = typed
            .postgresql
            .as_ref()
            .and_then(|postgresql| postgresql.hostname(&fullname))
            .unwrap_or_default();

        let classes: BTreeMap<&str, BTreeMap<&str, &str>> = BUILTIN_CLASSES
            .iter()
            .map(|spec| (spec.class, BTreeMap::from([("module", spec.module), ("class", spec.class)])))
            .collect();

        Ok(context! {
            Values => Value::from_serialize(&merged),
            Release => context! {
                Name => &release.name,
                Namespace => &release.namespace,
                Service => "Helm",
            },
            Chart => context! {
                Name => &self.chart.name,
                Version => &self.chart.version,
                Label => self.chart.label(),
            },
            name => self.chart.short_name(typed.name_override.as_deref()),
            fullname => fullname,
            service_account_name => service_account_name,
            postgresql_host => postgresql_host,
            classes => classes,
            env => context! {
                pg_password => PG_PASSWORD_ENV,
                dagster_home => DAGSTER_HOME_ENV,
                instance_config_map => INSTANCE_CONFIG_MAP_ENV,
                pg_password_secret => PG_PASSWORD_SECRET_ENV,
                run_env_config_map => RUN_ENV_CONFIG_MAP_ENV,
            },
        })
    }
}

impl ChartRenderer for EmbeddedChartRenderer {
    fn default_values(&self) -> Result<serde_yaml::Value, AppError> {
        Ok(serde_yaml::from_str(&find_source(&self.sources, VALUES_FILE)?.content)?)
    }

    fn render(
        &self,
        values: &serde_yaml::Value,
        release: &ReleaseInfo,
        template: &str,
    ) -> Result<String, AppError> {
        let env = build_template_environment(&self.sources)?;
        let ctx = self.build_context(values, release)?;
        debug!(template = %template, release = %release.name, "rendering embedded chart template");

        let rendered = render_template_by_name(&env, template, &ctx)?;
        Ok(format!("---\n# Source: {}/{}\n{}\n", self.chart.name, template, rendered.trim_end()))
    }
}
