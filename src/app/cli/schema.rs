//! Schema command implementation.

use std::path::PathBuf;

use clap::Subcommand;

use crate::domain::AppError;

#[derive(Subcommand)]
pub enum SchemaCommands {
    /// Print values.schema.json
    Show,
    /// Write values.schema.json into a chart directory
    Apply {
        /// Chart directory containing Chart.yaml
        #[arg(long)]
        chart_dir: PathBuf,
    },
}

pub fn run_schema(command: SchemaCommands) -> Result<(), AppError> {
    match command {
        SchemaCommands::Show => {
            print!("{}", crate::app::commands::schema::show()?);
        }
        SchemaCommands::Apply { chart_dir } => {
            let path = crate::app::commands::schema::apply(&chart_dir)?;
            println!("✅ Wrote {}", path.display());
        }
    }
    Ok(())
}
