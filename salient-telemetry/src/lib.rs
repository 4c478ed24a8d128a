//! # salient-telemetry
//!
//! Logging for Salient binaries and tests.
//!
//! - [`init_telemetry`] installs a global `tracing-subscriber` `fmt`
//!   subscriber writing to stderr, human-readable or JSON, filtered by
//!   `RUST_LOG` or the configured level
//! - [`capture`] runs a closure under a thread-local subscriber that records
//!   events in memory, so tests can assert on what was logged
//!
//! ```rust,no_run
//! use salient_telemetry::{TelemetryConfig, init_telemetry};
//!
//! init_telemetry(&TelemetryConfig::from_verbosity(1).with_json(true))?;
//! tracing::info!("ready");
//! # Ok::<(), salient_telemetry::TelemetryError>(())
//! ```

pub mod capture;
mod init;

pub use capture::{CaptureLayer, CapturedEvent, EventStore, capture};
pub use init::{
    Result, TelemetryConfig, TelemetryError, init_telemetry, parse_filter, verbosity_filter,
};
