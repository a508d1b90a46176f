pub mod metrics;
pub mod renderer;

pub use self::metrics::{get_metrics, init_metrics};
pub use renderer::{ChartRenderer, PlottersRenderer};
