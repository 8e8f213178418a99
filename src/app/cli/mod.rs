//! CLI Adapter.

mod render;
mod schema;

use clap::{Parser, Subcommand};

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "dagster-chart")]
#[command(version)]
#[command(about = "Render and check the Dagster instance ConfigMap of the Helm chart", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the instance ConfigMap for a set of values files
    #[clap(visible_alias = "r")]
    Render(render::RenderArgs),
    /// Inspect or install values.schema.json
    Schema {
        #[command(subcommand)]
        command: schema::SchemaCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    crate::app::logging::init();
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Render(args) => render::run_render(args),
        Commands::Schema { command } => schema::run_schema(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
