//! `metrics/*` command handlers and their registration.

use std::sync::Arc;

use cmdbus_core::errors::{ExError, ExErrorKind};
use cmdbus_core::{handler_fn, BusinessError, CommandHandler, Empty, JsonText, RegistryBuilder};
use tracing::info;

use crate::api::{MetricsError, MetricsManagerApi};
use crate::messages::{
    DumpRequest, EnableRequest, GetRequest, ListRequest, TestRequest, ValueResponse,
};

pub const CMD_DUMP: &str = "metrics/dump";
pub const CMD_GET: &str = "metrics/get";
pub const CMD_ENABLE: &str = "metrics/enable";
pub const CMD_LIST: &str = "metrics/list";
pub const CMD_TEST: &str = "metrics/test";

fn business(err: MetricsError) -> BusinessError {
    BusinessError::new(err.to_string())
}

pub fn metrics_dump_cmd(api: Arc<dyn MetricsManagerApi>) -> impl CommandHandler {
    handler_fn(move |_: DumpRequest| {
        let dump = api.dump().map_err(business)?;
        Ok(ValueResponse {
            value: JsonText::new(dump),
        })
    })
}

pub fn metrics_get_cmd(api: Arc<dyn MetricsManagerApi>) -> impl CommandHandler {
    handler_fn(move |req: GetRequest| {
        let name = req.name.unwrap_or_default();
        let scope = api.get(&name).map_err(business)?;
        Ok(ValueResponse {
            value: JsonText::new(scope),
        })
    })
}

pub fn metrics_enable_cmd(api: Arc<dyn MetricsManagerApi>) -> impl CommandHandler {
    handler_fn(move |req: EnableRequest| {
        let scope = req.scope_name.unwrap_or_default();
        let instrument = req.instrument_name.unwrap_or_default();
        let enabled = req.status.unwrap_or_default();

        api.enable(&scope, &instrument, enabled).map_err(business)?;
        Ok(Empty {})
    })
}

pub fn metrics_list_cmd(api: Arc<dyn MetricsManagerApi>) -> impl CommandHandler {
    handler_fn(move |_: ListRequest| {
        let listing = api.list().map_err(business)?;
        Ok(ValueResponse {
            value: JsonText::new(listing),
        })
    })
}

pub fn metrics_test_cmd(api: Arc<dyn MetricsManagerApi>) -> impl CommandHandler {
    handler_fn(move |_: TestRequest| {
        api.test();
        Ok(Empty {})
    })
}

/// Register every `metrics/*` command against `api`
///
/// # Errors
///
/// Fails with `ExErrorKind::Registration` if any command cannot be
/// registered; the cause is attached as the source.
pub fn register_handlers(
    api: Arc<dyn MetricsManagerApi>,
    registry: &mut RegistryBuilder,
) -> Result<(), ExError> {
    let mut register_all = || -> cmdbus_core::Result<()> {
        registry.register(CMD_DUMP, metrics_dump_cmd(api.clone()))?;
        registry.register(CMD_GET, metrics_get_cmd(api.clone()))?;
        registry.register(CMD_ENABLE, metrics_enable_cmd(api.clone()))?;
        registry.register(CMD_LIST, metrics_list_cmd(api.clone()))?;
        registry.register(CMD_TEST, metrics_test_cmd(api.clone()))?;
        Ok(())
    };

    register_all().map_err(|e| {
        let message = format!("metrics API commands could not be registered: {}", e);
        ExError::new(ExErrorKind::Registration)
            .with_op("register_handlers")
            .with_message(message)
            .with_source(e.into())
    })?;

    info!("metrics API registered");
    Ok(())
}
