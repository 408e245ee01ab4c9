use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cmdbus_core::{handler_fn, BusinessError, CommandHandler, Empty, RequiredField, Validate};
use serde::{Deserialize, Serialize};

/// Request with three required fields, checked in declared order
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigureRequest {
    pub zone: Option<String>,
    pub device: Option<String>,
    pub enabled: Option<bool>,
}

impl Validate for ConfigureRequest {
    const REQUIRED: &'static [RequiredField<Self>] = &[
        RequiredField {
            label: "zone",
            present: |r: &ConfigureRequest| r.zone.is_some(),
        },
        RequiredField {
            label: "device",
            present: |r: &ConfigureRequest| r.device.is_some(),
        },
        RequiredField {
            label: "enabled",
            present: |r: &ConfigureRequest| r.enabled.is_some(),
        },
    ];
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoParams {}

impl Validate for NoParams {}

#[derive(Debug, Serialize)]
pub struct Counted {
    pub calls: usize,
}

/// Counts how often the backend behind a handler is reached
#[derive(Default, Clone)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn hit(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handler that refuses zone "locked" and otherwise succeeds
#[allow(dead_code)]
pub fn configure_handler(counter: CallCounter) -> impl CommandHandler {
    handler_fn(move |req: ConfigureRequest| {
        counter.hit();
        if req.zone.as_deref() == Some("locked") {
            return Err(BusinessError::new("Zone 'locked' is read-only"));
        }
        Ok(Empty {})
    })
}

/// Handler returning how many times it has been called
#[allow(dead_code)]
pub fn counting_handler(counter: CallCounter) -> impl CommandHandler {
    handler_fn(move |_: NoParams| Ok(Counted { calls: counter.hit() }))
}

/// Handler that always panics
#[allow(dead_code)]
pub fn panicking_handler(counter: CallCounter) -> impl CommandHandler {
    handler_fn(move |_: NoParams| -> cmdbus_core::HandlerResult<Empty> {
        counter.hit();
        panic!("simulated internal failure")
    })
}
