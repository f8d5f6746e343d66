//! Client facade binding one merchant account and environment to the three
//! resource clients.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::PayazaConfig;
use crate::error::{PayazaError, PayazaResult};
use crate::resources::{Accounts, Cards, Payouts};
use crate::response::GatewayResponse;
use crate::types::Environment;
use crate::urls::{Endpoint, EndpointUrls};

const SDK_USER_AGENT: &str = concat!("payaza-sdk/", env!("CARGO_PKG_VERSION"));

/// One credential, one environment.
///
/// The facade owns the HTTP client (with the authorization and tenant headers
/// baked in) and lends itself to the resource clients. It holds no mutable
/// state, so it can be shared freely across tasks.
#[derive(Debug)]
pub struct PayazaClient {
    http: reqwest::Client,
    environment: Environment,
    endpoints: EndpointUrls,
    transaction_pin: Option<String>,
}

impl PayazaClient {
    /// Build a client for the configured default account.
    pub fn new(config: PayazaConfig) -> PayazaResult<Self> {
        let default_account = config.default_account.clone();
        Self::for_account(config, &default_account)
    }

    /// Build a client for a specific named account, e.g. to run payouts from
    /// "primary" while charging cards on "premium".
    pub fn for_account(config: PayazaConfig, name: &str) -> PayazaResult<Self> {
        let (token, environment) = config.resolve_account(name)?;

        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&format!("Payaza {token}"))
            .map_err(|_| PayazaError::configuration("Account key produced an invalid header"))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            HeaderName::from_static("x-tenantid"),
            HeaderValue::from_static(environment.tenant()),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                PayazaError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!(account = name, environment = %environment, "payaza client initialized");

        Ok(Self {
            http,
            environment,
            endpoints: config.endpoints,
            transaction_pin: config.transaction_pin,
        })
    }

    pub fn cards(&self) -> Cards<'_> {
        Cards::new(self)
    }

    pub fn payouts(&self) -> Payouts<'_> {
        Payouts::new(self)
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub(crate) fn transaction_pin(&self) -> Option<&str> {
        self.transaction_pin.as_deref()
    }

    pub(crate) fn url(&self, endpoint: Endpoint) -> PayazaResult<String> {
        self.endpoints.resolve(endpoint, self.environment)
    }

    pub(crate) async fn post_json(
        &self,
        url: &str,
        payload: &Value,
        connect_message: &str,
    ) -> PayazaResult<GatewayResponse> {
        let request = self.http.post(url).json(payload);
        self.execute(request, url, connect_message).await
    }

    pub(crate) async fn get_json(
        &self,
        url: &str,
        query: Option<&[(&str, String)]>,
        connect_message: &str,
    ) -> PayazaResult<GatewayResponse> {
        let mut request = self.http.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }
        self.execute(request, url, connect_message).await
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
        connect_message: &str,
    ) -> PayazaResult<GatewayResponse> {
        let response = request.send().await.map_err(|e| {
            warn!(url, error = %e, "request to payment gateway failed");
            PayazaError::connection(connect_message)
        })?;

        let status = response.status().as_u16();
        // Non-JSON bodies become Null so the classifier reports a gateway
        // error instead of this layer panicking or retrying.
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        debug!(url, status, "gateway response received");
        Ok(GatewayResponse { status, body })
    }
}
