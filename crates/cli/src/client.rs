//! HTTP implementation of the remote platform API
//!
//! Maps the core collaborator traits onto the platform's REST endpoints.
//! All calls are blocking and made once; failures come back as `ApiError`
//! so the core can report them as remote errors.

use crate::error::{CliError, CliResult};
use edgectl_core::api::{CreateInput, EndpointApi, EndpointKey, UpdateInput, VersionApi};
use edgectl_core::endpoint::Endpoint;
use edgectl_core::{ApiError, ApiResult, Version};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const USER_AGENT: &str = concat!("edgectl/", env!("EDGECTL_VERSION"));

/// Blocking client for the platform API
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    detail: Option<String>,
}

/// Request body for create and update: optional name plus resource fields
#[derive(Serialize)]
struct NamedBody<'a, F: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(flatten)]
    fields: &'a F,
}

impl HttpClient {
    /// Build a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid base URL or the
    /// underlying HTTP client can't be constructed.
    pub fn new(endpoint: &str, token: Option<String>, timeout: Duration) -> CliResult<Self> {
        let parsed = Url::parse(endpoint)
            .map_err(|e| CliError::Config(format!("Invalid API endpoint '{endpoint}': {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(CliError::Config(format!(
                "Invalid API endpoint '{endpoint}': not a base URL"
            )));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// The underlying HTTP client, shared with the beacon.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Build `<endpoint>/<segments...>`, escaping each segment.
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ApiError::new(format!("invalid API endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::new("invalid API endpoint: not a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn endpoint_url(&self, kind: &str, service_id: &str, version: u32, name: Option<&str>) -> ApiResult<Url> {
        let version = version.to_string();
        let mut segments = vec!["service", service_id, "version", version.as_str(), "logging", kind];
        if let Some(name) = name {
            segments.push(name);
        }
        self.url(&segments)
    }

    fn authorize(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ApiError::new("no API token provided"))?;
        Ok(request.bearer_auth(token))
    }

    /// Send a request and return the status and body of a 2xx response.
    fn execute(&self, request: RequestBuilder) -> ApiResult<(StatusCode, String)> {
        let request = self.authorize(request)?;
        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        tracing::debug!(status = status.as_u16(), "API response");

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }
        Ok((status, body))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let (status, body) = self.execute(request)?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::with_status(status.as_u16(), format!("error decoding API response: {e}"))
        })
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::new(err.to_string())
}

/// Turn a non-2xx response into an `ApiError`, preferring the body's own message.
fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let msg = parsed.msg.filter(|m| !m.is_empty());
    let detail = parsed.detail.filter(|d| !d.is_empty());

    let message = match (msg, detail) {
        (Some(msg), Some(detail)) => format!("{msg}: {detail}"),
        (Some(msg), None) => msg,
        (None, Some(detail)) => detail,
        (None, None) => format!("HTTP {}", status.as_u16()),
    };
    ApiError::with_status(status.as_u16(), message)
}

impl VersionApi for HttpClient {
    fn list_versions(&self, service_id: &str) -> ApiResult<Vec<Version>> {
        let url = self.url(&["service", service_id, "version"])?;
        tracing::debug!(%url, "listing versions");
        self.send(self.http.get(url))
    }

    fn clone_version(&self, service_id: &str, version: u32) -> ApiResult<Version> {
        let number = version.to_string();
        let url = self.url(&["service", service_id, "version", number.as_str(), "clone"])?;
        tracing::debug!(%url, "cloning version");
        self.send(self.http.put(url))
    }
}

impl<E> EndpointApi<E> for HttpClient
where
    E: Endpoint + DeserializeOwned,
    E::CreateFields: Serialize,
    E::UpdateFields: Serialize,
{
    fn create_endpoint(&self, input: &CreateInput<E::CreateFields>) -> ApiResult<E> {
        let url = self.endpoint_url(E::KIND, &input.service_id, input.service_version, None)?;
        let body = NamedBody {
            name: Some(&input.name),
            fields: &input.fields,
        };
        tracing::debug!(%url, "creating endpoint");
        self.send(self.http.post(url).json(&body))
    }

    fn update_endpoint(&self, input: &UpdateInput<E::UpdateFields>) -> ApiResult<E> {
        let key = &input.key;
        let url = self.endpoint_url(E::KIND, &key.service_id, key.service_version, Some(&key.name))?;
        let body = NamedBody {
            name: input.new_name.as_deref(),
            fields: &input.fields,
        };
        tracing::debug!(%url, "updating endpoint");
        self.send(self.http.put(url).json(&body))
    }

    fn delete_endpoint(&self, key: &EndpointKey) -> ApiResult<()> {
        let url = self.endpoint_url(E::KIND, &key.service_id, key.service_version, Some(&key.name))?;
        tracing::debug!(%url, "deleting endpoint");
        self.execute(self.http.delete(url)).map(|_| ())
    }

    fn get_endpoint(&self, key: &EndpointKey) -> ApiResult<E> {
        let url = self.endpoint_url(E::KIND, &key.service_id, key.service_version, Some(&key.name))?;
        tracing::debug!(%url, "fetching endpoint");
        self.send(self.http.get(url))
    }

    fn list_endpoints(&self, service_id: &str, service_version: u32) -> ApiResult<Vec<E>> {
        let url = self.endpoint_url(E::KIND, service_id, service_version, None)?;
        tracing::debug!(%url, "listing endpoints");
        self.send(self.http.get(url))
    }
}
