use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use validator::Validate;

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 500;
pub const DEFAULT_TITLE: &str = "Gráfico dos Valores Informados";
pub const DEFAULT_X_LABEL: &str = "Índice";
pub const DEFAULT_Y_LABEL: &str = "Valor";
pub const DEFAULT_MAX_VALUES: usize = 10_000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ChartServiceConfig {
    pub common: core_config::Config,
    pub chart: ChartSettings,
    pub limits: LimitSettings,
}

/// How every chart is drawn. Shared read-only by all requests.
#[derive(Debug, Clone, Validate)]
pub struct ChartSettings {
    #[validate(range(min = 200, max = 4096))]
    pub width: u32,
    #[validate(range(min = 200, max = 4096))]
    pub height: u32,
    #[validate(length(min = 1))]
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct LimitSettings {
    #[validate(range(min = 1))]
    pub max_values: usize,
    #[validate(range(min = 1))]
    pub max_body_bytes: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_values: DEFAULT_MAX_VALUES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ChartServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        let config = ChartServiceConfig {
            common,
            chart: ChartSettings {
                width: get_env("CHART_WIDTH", DEFAULT_WIDTH)?,
                height: get_env("CHART_HEIGHT", DEFAULT_HEIGHT)?,
                title: get_env("CHART_TITLE", DEFAULT_TITLE.to_string())?,
                x_label: get_env("CHART_X_LABEL", DEFAULT_X_LABEL.to_string())?,
                y_label: get_env("CHART_Y_LABEL", DEFAULT_Y_LABEL.to_string())?,
            },
            limits: LimitSettings {
                max_values: get_env("CHART_MAX_VALUES", DEFAULT_MAX_VALUES)?,
                max_body_bytes: get_env("CHART_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            },
        };

        config.ensure_valid()?;
        Ok(config)
    }

    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.chart.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

impl Default for ChartServiceConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            chart: ChartSettings::default(),
            limits: LimitSettings::default(),
        }
    }
}

fn get_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}
