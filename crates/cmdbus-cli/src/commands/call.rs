//! One-shot command invocation

use clap::Args;
use cmdbus_core::{Registry, WireRequest};
use serde_json::Value;

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Command name, e.g. `metrics/dump`
    pub command: String,

    /// Parameters as a JSON object
    #[arg(long, short)]
    pub params: Option<String>,

    /// Origin name recorded in the logs
    #[arg(long, default_value = "cmdbus-cli")]
    pub origin: String,
}

/// Dispatch one request and print the wire response on stdout
///
/// A response that does not report success is an error.
pub fn execute(args: CallArgs, registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    let parameters = match args.params.as_deref() {
        Some(raw) => serde_json::from_str::<Value>(raw)
            .map_err(|e| format!("--params is not valid JSON: {}", e))?,
        None => Value::Null,
    };

    let request = WireRequest::new(args.command, parameters).with_origin(args.origin, "call");
    let response = registry.dispatch(&request);
    println!("{}", response.to_json());

    if response.is_ok() {
        Ok(())
    } else {
        Err(format!(
            "command '{}' failed: {}",
            request.command,
            response.error_message().unwrap_or("unknown error")
        )
        .into())
    }
}
