//! Test helpers for unit tests
//!
//! An in-memory stand-in for the remote platform that records every call,
//! so tests can assert both on results and on what would have hit the network.

use std::cell::{Cell, RefCell};

use chrono::{TimeZone, Utc};

use crate::api::{CreateInput, EndpointApi, EndpointKey, UpdateInput, VersionApi};
use crate::endpoint::Timestamps;
use crate::error::{ApiError, ApiResult};
use crate::newrelic::{NewRelic, NewRelicFields};
use crate::version::Version;

/// Version 1 active, version 2 locked, version 3 editable.
pub fn standard_versions() -> Vec<Version> {
    vec![
        Version::new(1, true, false),
        Version::new(2, false, true),
        Version::new(3, false, false),
    ]
}

/// An endpoint with fixed timestamps and empty optional fields
pub fn sample_endpoint(name: &str, service_id: &str, version: u32) -> NewRelic {
    let ts = Utc.with_ymd_and_hms(2021, 6, 15, 23, 0, 0).unwrap();
    NewRelic {
        name: name.to_string(),
        service_id: service_id.to_string(),
        service_version: version,
        timestamps: Timestamps {
            created_at: Some(ts),
            updated_at: Some(ts),
            deleted_at: Some(ts),
        },
        ..NewRelic::default()
    }
}

/// A call that would have changed remote state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Create {
        service_id: String,
        version: u32,
        name: String,
    },
    Update {
        service_id: String,
        version: u32,
        name: String,
        new_name: Option<String>,
    },
    Delete {
        service_id: String,
        version: u32,
        name: String,
    },
}

pub struct FakeApi {
    versions: Vec<Version>,
    clone_result: Option<u32>,
    list_versions_error: Option<String>,
    clone_error: Option<String>,
    endpoint_error: Option<String>,
    list_versions_calls: Cell<usize>,
    clone_calls: Cell<usize>,
    mutations: RefCell<Vec<RecordedCall>>,
}

impl FakeApi {
    pub fn new(versions: Vec<Version>) -> Self {
        Self {
            versions,
            clone_result: None,
            list_versions_error: None,
            clone_error: None,
            endpoint_error: None,
            list_versions_calls: Cell::new(0),
            clone_calls: Cell::new(0),
            mutations: RefCell::new(Vec::new()),
        }
    }

    pub fn with_clone_result(mut self, number: u32) -> Self {
        self.clone_result = Some(number);
        self
    }

    pub fn failing_list_versions(mut self, message: &str) -> Self {
        self.list_versions_error = Some(message.to_string());
        self
    }

    pub fn failing_clone(mut self, message: &str) -> Self {
        self.clone_error = Some(message.to_string());
        self
    }

    /// Make every endpoint call (create, update, delete, get, list) fail.
    pub fn failing_endpoint_calls(mut self, message: &str) -> Self {
        self.endpoint_error = Some(message.to_string());
        self
    }

    pub fn list_versions_calls(&self) -> usize {
        self.list_versions_calls.get()
    }

    pub fn clone_calls(&self) -> usize {
        self.clone_calls.get()
    }

    pub fn mutations(&self) -> Vec<RecordedCall> {
        self.mutations.borrow().clone()
    }

    fn endpoint_result(&self) -> ApiResult<()> {
        match &self.endpoint_error {
            Some(message) => Err(ApiError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl VersionApi for FakeApi {
    fn list_versions(&self, _service_id: &str) -> ApiResult<Vec<Version>> {
        self.list_versions_calls.set(self.list_versions_calls.get() + 1);
        match &self.list_versions_error {
            Some(message) => Err(ApiError::new(message.clone())),
            None => Ok(self.versions.clone()),
        }
    }

    fn clone_version(&self, _service_id: &str, version: u32) -> ApiResult<Version> {
        self.clone_calls.set(self.clone_calls.get() + 1);
        if let Some(message) = &self.clone_error {
            return Err(ApiError::new(message.clone()));
        }
        let next = self.versions.iter().map(|v| v.number).max().unwrap_or(version) + 1;
        Ok(Version::new(self.clone_result.unwrap_or(next), false, false))
    }
}

impl EndpointApi<NewRelic> for FakeApi {
    fn create_endpoint(&self, input: &CreateInput<NewRelicFields>) -> ApiResult<NewRelic> {
        self.mutations.borrow_mut().push(RecordedCall::Create {
            service_id: input.service_id.clone(),
            version: input.service_version,
            name: input.name.clone(),
        });
        self.endpoint_result()?;
        Ok(sample_endpoint(
            &input.name,
            &input.service_id,
            input.service_version,
        ))
    }

    fn update_endpoint(&self, input: &UpdateInput<NewRelicFields>) -> ApiResult<NewRelic> {
        self.mutations.borrow_mut().push(RecordedCall::Update {
            service_id: input.key.service_id.clone(),
            version: input.key.service_version,
            name: input.key.name.clone(),
            new_name: input.new_name.clone(),
        });
        self.endpoint_result()?;
        let name = input.new_name.as_deref().unwrap_or(&input.key.name);
        Ok(sample_endpoint(
            name,
            &input.key.service_id,
            input.key.service_version,
        ))
    }

    fn delete_endpoint(&self, key: &EndpointKey) -> ApiResult<()> {
        self.mutations.borrow_mut().push(RecordedCall::Delete {
            service_id: key.service_id.clone(),
            version: key.service_version,
            name: key.name.clone(),
        });
        self.endpoint_result()
    }

    fn get_endpoint(&self, key: &EndpointKey) -> ApiResult<NewRelic> {
        self.endpoint_result()?;
        let mut endpoint = sample_endpoint(&key.name, &key.service_id, key.service_version);
        endpoint.token = "abc".to_string();
        Ok(endpoint)
    }

    fn list_endpoints(&self, service_id: &str, service_version: u32) -> ApiResult<Vec<NewRelic>> {
        self.endpoint_result()?;
        Ok(vec![
            sample_endpoint("foo", service_id, service_version),
            sample_endpoint("bar", service_id, service_version),
        ])
    }
}
