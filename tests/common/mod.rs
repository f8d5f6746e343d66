#![allow(dead_code)]

use std::time::Duration;

use payaza::{EndpointUrls, PayazaClient, PayazaConfig};
use wiremock::MockServer;

pub fn test_config(server: &MockServer) -> PayazaConfig {
    let mut config = PayazaConfig {
        endpoints: EndpointUrls::with_base(&server.uri()),
        timeout: Duration::from_secs(5),
        transaction_pin: Some("1234".to_string()),
        ..PayazaConfig::default()
    };
    config.add_account("primary", "primary-test-key");
    config.add_account("premium", "premium-test-key");
    config
}

pub fn test_client(server: &MockServer) -> PayazaClient {
    PayazaClient::new(test_config(server)).expect("client should build from test config")
}

/// A client pointed at a port nothing listens on, to exercise
/// connection-level failures.
pub fn unreachable_client() -> PayazaClient {
    let mut config = PayazaConfig {
        endpoints: EndpointUrls::with_base("http://127.0.0.1:9"),
        timeout: Duration::from_secs(1),
        ..PayazaConfig::default()
    };
    config.add_account("primary", "primary-test-key");
    PayazaClient::new(config).expect("client should build from test config")
}
