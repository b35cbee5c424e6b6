use std::{path::PathBuf, time::Duration};

use config::{Config, ConfigError, File};
use serde::Deserialize;
use strum::{AsRefStr, EnumString};
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Two `[latitude, longitude]` corners of an area to receive messages for.
pub type BoundingBox = [[f64; 2]; 2];

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub api_key: Option<String>,
    pub api_address: String,
    pub bounding_boxes: Vec<BoundingBox>,
    pub message_types: Vec<String>,
    pub snapshot_path: PathBuf,
    /// How long a session listens to the stream before writing the snapshot.
    #[serde(with = "humantime_serde")]
    pub listen_window: Duration,
    /// Maximum wait for a single message before the stream is considered quiet.
    #[serde(with = "humantime_serde")]
    pub receive_timeout: Duration,
    /// Vessels not seen within this window are dropped from the snapshot.
    #[serde(with = "humantime_serde")]
    pub retention: Duration,
    #[serde(with = "humantime_serde")]
    pub reconnect_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub max_reconnect_delay: Duration,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Local,
    Development,
    Production,
    Test,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let environment: Environment = match std::env::var("APP_ENVIRONMENT") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Message(format!("invalid APP_ENVIRONMENT: '{v}'")))?,
            Err(_) => Environment::Local,
        };

        let environment_name = environment.as_ref().to_lowercase();

        Config::builder()
            .add_source(File::with_name(&format!("config/{environment_name}")).required(true))
            .add_source(
                File::with_name(&format!("config/{environment_name}.secret")).required(false),
            )
            .add_source(config::Environment::with_prefix("AIS_CONSUMER").separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }

    /// Installs the global tracing subscriber, `RUST_LOG` takes precedence over `log_level`.
    pub fn init_tracer(&self) {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from(Level::from(&self.log_level)).into())
            .from_env_lossy();

        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

impl From<&LogLevel> for Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}
