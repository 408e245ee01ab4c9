//! Typed request/response schemas for `metrics/*` commands
//!
//! Field names follow the lowerCamel JSON mapping; the all-lowercase
//! spellings are accepted as aliases.

use cmdbus_core::{JsonText, RequiredField, Validate};
use serde::{Deserialize, Serialize};

/// `metrics/dump`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpRequest {}

impl Validate for DumpRequest {}

/// `metrics/get`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetRequest {
    pub name: Option<String>,
}

impl Validate for GetRequest {
    const REQUIRED: &'static [RequiredField<Self>] = &[RequiredField {
        label: "name",
        present: |r: &GetRequest| r.name.is_some(),
    }];
}

/// `metrics/enable`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnableRequest {
    #[serde(alias = "scopename")]
    pub scope_name: Option<String>,
    #[serde(alias = "instrumentname")]
    pub instrument_name: Option<String>,
    pub status: Option<bool>,
}

impl Validate for EnableRequest {
    // Order is part of the observable contract.
    const REQUIRED: &'static [RequiredField<Self>] = &[
        RequiredField {
            label: "scope name",
            present: |r: &EnableRequest| r.scope_name.is_some(),
        },
        RequiredField {
            label: "instrument name",
            present: |r: &EnableRequest| r.instrument_name.is_some(),
        },
        RequiredField {
            label: "status",
            present: |r: &EnableRequest| r.status.is_some(),
        },
    ];
}

/// `metrics/list`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListRequest {}

impl Validate for ListRequest {}

/// `metrics/test`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestRequest {}

impl Validate for TestRequest {}

/// Payload of `metrics/dump`, `metrics/get` and `metrics/list`
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse {
    pub value: JsonText,
}
