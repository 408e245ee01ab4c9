//! cmdbus metrics - management commands for the metrics subsystem
//!
//! Exposes `metrics/dump`, `metrics/get`, `metrics/enable`, `metrics/list`
//! and `metrics/test` over the command registry. The backend is injected as
//! an `Arc<dyn MetricsManagerApi>`; `InMemoryMetricsManager` is a reference
//! implementation.

pub mod api;
pub mod handlers;
pub mod manager;
pub mod messages;

pub use api::{MetricsError, MetricsManagerApi};
pub use handlers::register_handlers;
pub use manager::{InMemoryMetricsManager, InstrumentKind};
