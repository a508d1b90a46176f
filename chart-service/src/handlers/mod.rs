pub mod chart;
pub mod health;
pub mod home;
pub mod metrics;

pub use chart::{render_chart, ChartPage};
pub use health::health_check;
pub use home::{home, WELCOME_MESSAGE};
pub use self::metrics::metrics_endpoint;
