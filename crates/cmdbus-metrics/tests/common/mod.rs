use std::sync::{Arc, Mutex};

use cmdbus_core::Registry;
use cmdbus_metrics::{register_handlers, MetricsError, MetricsManagerApi};

/// A backend call as seen by the spy
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Dump,
    Get(String),
    Enable(String, String, bool),
    List,
    Test,
}

/// Records every call; answers from canned values
#[derive(Default)]
pub struct SpyMetrics {
    calls: Mutex<Vec<Call>>,
    pub dump_json: Mutex<String>,
    pub fail_with: Mutex<Option<MetricsError>>,
    pub panic_on_test: bool,
}

impl SpyMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            dump_json: Mutex::new(r#"{"core":{"latency":{"enabled":true}}}"#.to_string()),
            ..Default::default()
        })
    }

    #[allow(dead_code)]
    pub fn panicking() -> Arc<Self> {
        Arc::new(Self {
            panic_on_test: true,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn fail_next_with(&self, err: MetricsError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    #[allow(dead_code)]
    pub fn set_dump(&self, json: &str) {
        *self.dump_json.lock().unwrap() = json.to_string();
    }

    fn record(&self, call: Call) -> Result<(), MetricsError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl MetricsManagerApi for SpyMetrics {
    fn dump(&self) -> Result<String, MetricsError> {
        self.record(Call::Dump)?;
        Ok(self.dump_json.lock().unwrap().clone())
    }

    fn get(&self, scope: &str) -> Result<String, MetricsError> {
        self.record(Call::Get(scope.to_string()))?;
        Ok(r#"{"latency":{"enabled":true}}"#.to_string())
    }

    fn enable(&self, scope: &str, instrument: &str, enabled: bool) -> Result<(), MetricsError> {
        self.record(Call::Enable(scope.to_string(), instrument.to_string(), enabled))
    }

    fn list(&self) -> Result<String, MetricsError> {
        self.record(Call::List)?;
        Ok("[]".to_string())
    }

    fn test(&self) {
        self.calls.lock().unwrap().push(Call::Test);
        if self.panic_on_test {
            panic!("metrics self-test failed");
        }
    }
}

/// Registry with the metrics commands bound to `spy`
pub fn registry_for(spy: &Arc<SpyMetrics>) -> Registry {
    let mut builder = Registry::builder();
    register_handlers(spy.clone(), &mut builder).unwrap();
    builder.build()
}
