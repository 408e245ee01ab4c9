//! In-memory metrics backend
//!
//! A small reference implementation of [`MetricsManagerApi`]: named scopes
//! holding named instruments that can be toggled and fed measurements.
//! Used by the CLI host and by tests that need a real backend.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{MetricsError, MetricsManagerApi};

/// Scope and instrument touched by `metrics/test`
pub const TEST_SCOPE: &str = "test";
pub const TEST_INSTRUMENT: &str = "testCounter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Counter,
    Gauge,
    Histogram,
}

#[derive(Debug, Clone)]
struct Instrument {
    kind: InstrumentKind,
    enabled: bool,
    count: u64,
    sum: f64,
    last: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl Instrument {
    fn new(kind: InstrumentKind) -> Self {
        Self {
            kind,
            enabled: true,
            count: 0,
            sum: 0.0,
            last: None,
            min: None,
            max: None,
        }
    }

    fn record(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.last = Some(value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    fn to_json(&self) -> Value {
        match self.kind {
            InstrumentKind::Counter => json!({
                "type": self.kind,
                "enabled": self.enabled,
                "value": self.sum,
            }),
            InstrumentKind::Gauge => json!({
                "type": self.kind,
                "enabled": self.enabled,
                "value": self.last,
            }),
            InstrumentKind::Histogram => json!({
                "type": self.kind,
                "enabled": self.enabled,
                "count": self.count,
                "sum": self.sum,
                "min": self.min,
                "max": self.max,
            }),
        }
    }
}

type Scopes = BTreeMap<String, BTreeMap<String, Instrument>>;

/// Thread-safe in-memory backend
#[derive(Debug, Default)]
pub struct InMemoryMetricsManager {
    scopes: RwLock<Scopes>,
}

impl InMemoryMetricsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scope; existing scopes are left untouched
    pub fn add_scope(&self, scope: &str) -> Result<(), MetricsError> {
        self.write()?.entry(scope.to_string()).or_default();
        Ok(())
    }

    /// Create an instrument, creating its scope on first use
    pub fn add_instrument(
        &self,
        scope: &str,
        instrument: &str,
        kind: InstrumentKind,
    ) -> Result<(), MetricsError> {
        let mut scopes = self.write()?;
        let instruments = scopes.entry(scope.to_string()).or_default();
        if instruments.contains_key(instrument) {
            return Err(MetricsError::InstrumentExists {
                scope: scope.to_string(),
                instrument: instrument.to_string(),
            });
        }
        instruments.insert(instrument.to_string(), Instrument::new(kind));
        Ok(())
    }

    /// Feed a measurement; returns false when the instrument is disabled
    pub fn record(&self, scope: &str, instrument: &str, value: f64) -> Result<bool, MetricsError> {
        let mut scopes = self.write()?;
        let entry = lookup_mut(&mut scopes, scope, instrument)?;
        if !entry.enabled {
            return Ok(false);
        }
        entry.record(value);
        Ok(true)
    }

    /// Whether an instrument is currently enabled
    pub fn is_enabled(&self, scope: &str, instrument: &str) -> Result<bool, MetricsError> {
        let scopes = self.read()?;
        scopes
            .get(scope)
            .and_then(|instruments| instruments.get(instrument))
            .map(|entry| entry.enabled)
            .ok_or_else(|| MetricsError::InstrumentNotFound {
                scope: scope.to_string(),
                instrument: instrument.to_string(),
            })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Scopes>, MetricsError> {
        self.scopes.read().map_err(|_| MetricsError::Unavailable {
            reason: "scope table lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Scopes>, MetricsError> {
        self.scopes.write().map_err(|_| MetricsError::Unavailable {
            reason: "scope table lock poisoned".to_string(),
        })
    }
}

fn lookup_mut<'a>(
    scopes: &'a mut Scopes,
    scope: &str,
    instrument: &str,
) -> Result<&'a mut Instrument, MetricsError> {
    scopes
        .get_mut(scope)
        .ok_or_else(|| MetricsError::ScopeNotFound {
            scope: scope.to_string(),
        })?
        .get_mut(instrument)
        .ok_or_else(|| MetricsError::InstrumentNotFound {
            scope: scope.to_string(),
            instrument: instrument.to_string(),
        })
}

fn scope_json(instruments: &BTreeMap<String, Instrument>) -> Value {
    Value::Object(
        instruments
            .iter()
            .map(|(name, instrument)| (name.clone(), instrument.to_json()))
            .collect(),
    )
}

impl MetricsManagerApi for InMemoryMetricsManager {
    fn dump(&self) -> Result<String, MetricsError> {
        let scopes = self.read()?;
        let dump: serde_json::Map<String, Value> = scopes
            .iter()
            .map(|(name, instruments)| (name.clone(), scope_json(instruments)))
            .collect();
        Ok(Value::Object(dump).to_string())
    }

    fn get(&self, scope: &str) -> Result<String, MetricsError> {
        let scopes = self.read()?;
        let instruments = scopes.get(scope).ok_or_else(|| MetricsError::ScopeNotFound {
            scope: scope.to_string(),
        })?;
        Ok(scope_json(instruments).to_string())
    }

    fn enable(&self, scope: &str, instrument: &str, enabled: bool) -> Result<(), MetricsError> {
        let mut scopes = self.write()?;
        lookup_mut(&mut scopes, scope, instrument)?.enabled = enabled;
        debug!(scope, instrument, enabled, "instrument status changed");
        Ok(())
    }

    fn list(&self) -> Result<String, MetricsError> {
        let scopes = self.read()?;
        let listing: Vec<Value> = scopes
            .iter()
            .flat_map(|(scope, instruments)| {
                instruments.iter().map(move |(name, instrument)| {
                    let status = if instrument.enabled {
                        "enabled"
                    } else {
                        "disabled"
                    };
                    json!({
                        "scope": scope,
                        "name": name,
                        "type": instrument.kind,
                        "status": status,
                    })
                })
            })
            .collect();
        Ok(Value::Array(listing).to_string())
    }

    fn test(&self) {
        let outcome = self
            .add_instrument(TEST_SCOPE, TEST_INSTRUMENT, InstrumentKind::Counter)
            .or_else(|e| match e {
                MetricsError::InstrumentExists { .. } => Ok(()),
                other => Err(other),
            })
            .and_then(|_| self.record(TEST_SCOPE, TEST_INSTRUMENT, 1.0));

        match outcome {
            Ok(recorded) => debug!(recorded, "test measurement"),
            Err(e) => debug!(error = %e, "test measurement failed"),
        }
    }
}
