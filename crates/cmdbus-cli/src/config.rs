//! Host configuration
//!
//! Loaded from an optional TOML file:
//!
//! ```toml
//! [logging]
//! profile = "production"
//!
//! [[metrics.scopes]]
//! name = "core"
//! instruments = [
//!     { name = "latency", kind = "histogram" },
//!     { name = "events", kind = "counter" },
//! ]
//! ```

use std::path::Path;

use cmdbus_core::logging_facility::Profile;
use cmdbus_core::{ExError, ExErrorKind};
use cmdbus_metrics::InstrumentKind;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    pub scopes: Vec<ScopeConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeConfig {
    pub name: String,
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentConfig {
    pub name: String,
    pub kind: InstrumentKind,
}

impl HostConfig {
    /// Parse configuration text
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Config` when the text is not valid configuration TOML.
    pub fn from_toml(text: &str) -> Result<Self, ExError> {
        toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(e.to_string())
        })
    }
}

/// Load configuration; no path or a missing file yields the defaults
///
/// # Errors
///
/// `ExErrorKind::Io` if the file exists but cannot be read,
/// `ExErrorKind::Config` if it cannot be parsed.
pub fn load(path: Option<&Path>) -> Result<HostConfig, ExError> {
    let Some(path) = path else {
        return Ok(HostConfig::default());
    };
    if !path.exists() {
        return Ok(HostConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("load_config")
            .with_message(format!("{}: {}", path.display(), e))
    })?;
    HostConfig::from_toml(&text).map_err(|e| {
        let message = format!("{}: {}", path.display(), e.message());
        e.with_message(message)
    })
}
