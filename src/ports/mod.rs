mod chart_renderer;

pub use chart_renderer::ChartRenderer;
