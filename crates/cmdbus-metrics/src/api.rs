//! Backend boundary for the metrics commands.

use thiserror::Error;

/// Failures reported by a metrics backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Scope '{scope}' not found")]
    ScopeNotFound { scope: String },

    #[error("Instrument '{instrument}' not found in scope '{scope}'")]
    InstrumentNotFound { scope: String, instrument: String },

    #[error("Instrument '{instrument}' already exists in scope '{scope}'")]
    InstrumentExists { scope: String, instrument: String },

    #[error("Metrics backend unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Management operations exposed over the command registry
///
/// Handlers hold an `Arc<dyn MetricsManagerApi>`; implementations own their
/// own synchronization.
pub trait MetricsManagerApi: Send + Sync {
    /// Every scope and instrument as JSON text
    fn dump(&self) -> Result<String, MetricsError>;

    /// One scope as JSON text
    fn get(&self, scope: &str) -> Result<String, MetricsError>;

    /// Enable or disable one instrument
    fn enable(&self, scope: &str, instrument: &str, enabled: bool) -> Result<(), MetricsError>;

    /// Flat listing of instruments as JSON text
    fn list(&self) -> Result<String, MetricsError>;

    /// Exercise the pipeline with a synthetic measurement
    fn test(&self);
}
