//! Registry bootstrap

use std::sync::Arc;

use cmdbus_core::{ExError, ExErrorKind, Registry};
use cmdbus_metrics::{register_handlers, InMemoryMetricsManager};
use tracing::{error, info};

use crate::config::HostConfig;

/// Build the metrics backend from configuration and register every command
///
/// # Errors
///
/// `ExErrorKind::Config` for an invalid scope table; registration errors
/// are returned unchanged and must abort startup.
pub fn bootstrap(config: &HostConfig) -> Result<Registry, ExError> {
    let metrics = Arc::new(InMemoryMetricsManager::new());
    for scope in &config.metrics.scopes {
        metrics.add_scope(&scope.name).map_err(config_error)?;
        for instrument in &scope.instruments {
            metrics
                .add_instrument(&scope.name, &instrument.name, instrument.kind)
                .map_err(config_error)?;
        }
    }

    let mut builder = Registry::builder();
    if let Err(e) = register_handlers(metrics, &mut builder) {
        error!(err_code = e.code(), error = %e, "startup aborted");
        return Err(e);
    }

    let registry = builder.build();
    info!(commands = registry.len(), "registry ready");
    Ok(registry)
}

fn config_error(err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("bootstrap")
        .with_message(err.to_string())
}
