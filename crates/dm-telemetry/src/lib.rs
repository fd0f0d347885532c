//! # DM Telemetry
//!
//! Observability for the posting host.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` fmt layer (plain or JSON) with `EnvFilter`
//! - **Metrics**: Prometheus counters and histograms, text exposition
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dm_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // ...
//!     println!("{}", dm_telemetry::gather_metrics()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DM_SERVICE_NAME` | `dmcy-host` | Service name in logs |
//! | `DM_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `DM_JSON_LOGS` | `false` | JSON log output |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{
    gather_metrics, register_metrics, HistogramTimer, ACTIONS_EXECUTED, TRANSACTIONS_ABORTED,
    TRANSACTIONS_APPLIED, TRANSACTION_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Prometheus registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install logging.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)?;
    Ok(())
}
