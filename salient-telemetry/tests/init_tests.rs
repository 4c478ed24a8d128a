//! Global initialisation; kept in its own test binary because it installs a
//! process-wide subscriber.

use salient_telemetry::{TelemetryConfig, TelemetryError, init_telemetry};

#[test]
fn second_initialization_is_an_error() {
    let config = TelemetryConfig::from_verbosity(0);
    init_telemetry(&config).unwrap();
    tracing::warn!("telemetry smoke test");
    assert!(matches!(
        init_telemetry(&config.with_json(true)),
        Err(TelemetryError::AlreadyInitialized(_))
    ));
}
