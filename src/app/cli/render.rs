//! Render command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::adapters::{EmbeddedChartRenderer, HelmCommandRenderer};
use crate::app::commands::render::{self, InstanceTemplate, RenderOptions, RenderOutput};
use crate::domain::{AppError, ReleaseInfo};

#[derive(Args)]
pub struct RenderArgs {
    /// Values file; repeat to layer several, later files win
    #[arg(short = 'f', long = "values")]
    values: Vec<PathBuf>,
    /// Release name (defaults to release-name)
    #[arg(long)]
    release_name: Option<String>,
    /// Release namespace
    #[arg(short = 'n', long)]
    namespace: Option<String>,
    /// Render an on-disk chart with the helm binary instead of the embedded chart
    #[arg(long)]
    helm: bool,
    /// Chart directory for --helm
    #[arg(long, requires = "helm")]
    chart_dir: Option<PathBuf>,
    /// Print the SHA-256 of each rendered dagster.yaml instead of the manifest
    #[arg(long)]
    checksum: bool,
    /// Render configuration (defaults to ./dagster-chart.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let cwd = std::env::current_dir()?;
    let config = crate::app::config::load_config(args.config.as_deref(), &cwd)?;

    let release = ReleaseInfo::new(
        args.release_name.unwrap_or(config.release.name),
        args.namespace.unwrap_or(config.release.namespace),
    );
    let options = RenderOptions {
        values_files: args.values,
        output: if args.checksum { RenderOutput::Checksum } else { RenderOutput::Manifest },
    };

    let output = if args.helm {
        let chart_dir = args.chart_dir.or(config.helm.chart_dir).ok_or_else(|| {
            AppError::config_error("--chart-dir (or helm.chart_dir in the config) is required with --helm")
        })?;
        let renderer =
            HelmCommandRenderer::new(config.helm.binary, chart_dir).with_subcharts(config.helm.subcharts);
        render::execute(&InstanceTemplate::new(renderer).with_release(release), &options)?
    } else {
        let renderer = EmbeddedChartRenderer::new()?;
        render::execute(&InstanceTemplate::new(renderer).with_release(release), &options)?
    };

    print!("{}", output);
    Ok(())
}
