//! Dispatch pipeline tests: decode → validate → handle → encode/translate.

mod common;

use common::{configure_handler, counting_handler, panicking_handler, CallCounter};

use cmdbus_core::{Registry, ResponseCode, WireRequest};
use serde_json::json;

fn registry_with(counter: &CallCounter) -> Registry {
    let mut builder = Registry::builder();
    builder
        .register("device/configure", configure_handler(counter.clone()))
        .unwrap();
    builder
        .register("device/count", counting_handler(counter.clone()))
        .unwrap();
    builder
        .register("device/crash", panicking_handler(counter.clone()))
        .unwrap();
    builder.build()
}

#[test]
fn test_well_formed_request_calls_backend_once() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    let resp = registry.dispatch(&WireRequest::new(
        "device/configure",
        json!({"zone": "north", "device": "d1", "enabled": true}),
    ));

    assert!(resp.is_ok());
    assert_eq!(resp.data, json!({"status": "OK"}));
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_missing_fields_reported_in_declared_order() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    let cases = [
        (json!({}), "Missing /zone"),
        (json!({"device": "d1", "enabled": false}), "Missing /zone"),
        (json!({"zone": "n", "enabled": false}), "Missing /device"),
        (json!({"zone": "n", "device": "d1"}), "Missing /enabled"),
    ];

    for (params, expected) in cases {
        let resp = registry.dispatch(&WireRequest::new("device/configure", params));
        assert_eq!(resp.status(), Some("ERROR"));
        assert_eq!(resp.error_message(), Some(expected));
        assert_eq!(resp.error, ResponseCode::Ok.as_i32());
    }
    assert_eq!(counter.count(), 0, "backend must not be reached");
}

#[test]
fn test_decode_error_precedes_validation() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    // `enabled` has the wrong type and `device` is missing; decode wins.
    let resp = registry.dispatch(&WireRequest::new(
        "device/configure",
        json!({"zone": "n", "enabled": "yes"}),
    ));

    assert_eq!(resp.status(), Some("ERROR"));
    let message = resp.error_message().unwrap();
    assert!(message.starts_with("Invalid parameters for 'device/configure'"));
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_unknown_parameter_is_rejected() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    let resp = registry.dispatch(&WireRequest::new("device/count", json!({"extra": 1})));

    assert_eq!(resp.status(), Some("ERROR"));
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_business_error_message_verbatim() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    let resp = registry.dispatch(&WireRequest::new(
        "device/configure",
        json!({"zone": "locked", "device": "d1", "enabled": true}),
    ));

    assert_eq!(
        resp.data,
        json!({"status": "ERROR", "error": "Zone 'locked' is read-only"})
    );
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_unknown_command_degrades_gracefully() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    let resp = registry.dispatch(&WireRequest::new("device/reboot", json!({})));

    assert_eq!(resp.error, ResponseCode::UnknownCommand.as_i32());
    assert_eq!(resp.status(), Some("ERROR"));
    assert_eq!(
        resp.error_message(),
        Some("Command \"device/reboot\" not found")
    );
}

#[test]
fn test_panicking_handler_is_contained() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    let resp = registry.dispatch(&WireRequest::new("device/crash", json!({})));
    assert_eq!(resp.status(), Some("ERROR"));
    assert_eq!(resp.error_message(), Some("simulated internal failure"));

    // Shared state is intact: an unrelated command still works.
    let resp = registry.dispatch(&WireRequest::new("device/count", json!({})));
    assert!(resp.is_ok());
    assert_eq!(resp.data, json!({"status": "OK", "calls": 2}));
}

#[test]
fn test_distinct_names_dispatch_independently() {
    let first = CallCounter::default();
    let second = CallCounter::default();

    let mut builder = Registry::builder();
    builder
        .register("a/count", counting_handler(first.clone()))
        .unwrap();
    builder
        .register("b/count", counting_handler(second.clone()))
        .unwrap();
    let registry = builder.build();

    registry.dispatch(&WireRequest::new("a/count", json!({})));
    registry.dispatch(&WireRequest::new("a/count", json!({})));
    registry.dispatch(&WireRequest::new("b/count", json!({})));

    assert_eq!(first.count(), 2);
    assert_eq!(second.count(), 1);
}

#[test]
fn test_dispatch_json_round_trip() {
    let counter = CallCounter::default();
    let registry = registry_with(&counter);

    let resp = registry.dispatch_json(
        r#"{"version":1,"command":"device/count","origin":{"name":"tests","module":"core"}}"#,
    );

    let line: serde_json::Value = serde_json::from_str(&resp.to_json()).unwrap();
    assert_eq!(line, json!({"error": 0, "data": {"status": "OK", "calls": 1}}));
}

#[test]
fn test_concurrent_dispatch_shares_registry() {
    let counter = CallCounter::default();
    let registry = std::sync::Arc::new(registry_with(&counter));

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let registry = registry.clone();
            scope.spawn(move || {
                for i in 0..25 {
                    let resp = if (worker + i) % 5 == 0 {
                        registry.dispatch(&WireRequest::new("device/crash", json!({})))
                    } else {
                        registry.dispatch(&WireRequest::new(
                            "device/configure",
                            json!({"zone": "z", "device": format!("d{}", i), "enabled": true}),
                        ))
                    };
                    let expect_ok = (worker + i) % 5 != 0;
                    assert_eq!(resp.is_ok(), expect_ok);
                }
            });
        }
    });

    assert_eq!(counter.count(), 8 * 25);
}
