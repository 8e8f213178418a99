pub mod embedded_chart;
pub mod helm_command;

pub use embedded_chart::EmbeddedChartRenderer;
pub use helm_command::HelmCommandRenderer;
