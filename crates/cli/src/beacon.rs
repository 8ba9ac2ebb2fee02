//! Notification beacon
//!
//! Best-effort events posted to the notification relay after a command
//! changes a service. Callers decide whether a failure matters; the
//! logging commands only log it.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Serialize;
use serde_json::{Map, Value};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAIL: &str = "fail";

/// One event as sent to the relay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    #[serde(rename = "event")]
    pub name: String,
    pub status: String,
    pub payload: Map<String, Value>,
}

impl Event {
    pub fn new(name: impl Into<String>, status: &str) -> Self {
        Self {
            name: name.into(),
            status: status.to_string(),
            payload: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }
}

/// `<relay>/cli/<service_id>/notify`
fn notify_url(relay: &str, service_id: &str) -> Result<Url> {
    let mut url = Url::parse(relay).with_context(|| format!("invalid relay URL '{relay}'"))?;
    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("invalid relay URL '{relay}'"))?
        .pop_if_empty()
        .extend(["cli", service_id, "notify"]);
    Ok(url)
}

/// POST `event` to the relay for `service_id`.
pub fn notify(client: &Client, relay: &str, service_id: &str, event: &Event) -> Result<()> {
    let url = notify_url(relay, service_id)?;
    tracing::debug!(%url, event = %event.name, "sending beacon");

    let response = client
        .post(url.clone())
        .json(event)
        .send()
        .with_context(|| format!("requesting {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("relay returned HTTP {} for {url}", status.as_u16());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serialization() {
        let event = Event::new("logging.newrelic.create", STATUS_SUCCESS)
            .with("version", 3)
            .with("name", "foo");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "logging.newrelic.create",
                "status": "success",
                "payload": {"version": 3, "name": "foo"}
            })
        );
    }

    #[test]
    fn test_empty_payload_is_an_object() {
        let event = Event::new("logging.newrelic.delete", STATUS_FAIL);
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"event":"logging.newrelic.delete","status":"fail","payload":{}}"#
        );
    }

    #[test]
    fn test_notify_url() {
        let url = notify_url("https://relay.example.com", "SU1Z0isxPaozGVKXdv0eY").unwrap();
        assert_eq!(
            url.as_str(),
            "https://relay.example.com/cli/SU1Z0isxPaozGVKXdv0eY/notify"
        );

        let url = notify_url("https://relay.example.com/base/", "a b").unwrap();
        assert_eq!(url.as_str(), "https://relay.example.com/base/cli/a%20b/notify");
    }

    #[test]
    fn test_notify_url_invalid_relay() {
        assert!(notify_url("relay", "123").is_err());
    }

    #[test]
    fn test_notify_unreachable_relay_is_an_error() {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(1))
            .build()
            .unwrap();
        let event = Event::new("logging.newrelic.create", STATUS_SUCCESS);
        assert!(notify(&client, "http://127.0.0.1:9", "123", &event).is_err());
    }
}
