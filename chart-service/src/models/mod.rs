pub mod chart_request;

pub use chart_request::ChartRequest;
