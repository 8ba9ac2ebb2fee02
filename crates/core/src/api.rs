/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Remote collaborator interfaces. Every call is blocking and all-or-nothing;
 * nothing here retries.
 */

use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::error::ApiResult;
use crate::version::Version;

/// Service version operations
pub trait VersionApi {
    /// All versions of a service, in any order. An empty list is valid.
    fn list_versions(&self, service_id: &str) -> ApiResult<Vec<Version>>;

    /// Clone `version` into a new editable version and return the clone.
    fn clone_version(&self, service_id: &str, version: u32) -> ApiResult<Version>;
}

/// Identifies one endpoint on one service version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointKey {
    pub service_id: String,
    pub service_version: u32,
    pub name: String,
}

/// Request to create an endpoint on the working version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInput<F> {
    pub service_id: String,
    pub service_version: u32,
    pub name: String,
    pub fields: F,
}

/// Request to update (and optionally rename) an endpoint on the working version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInput<F> {
    pub key: EndpointKey,
    pub new_name: Option<String>,
    pub fields: F,
}

/// CRUD operations for one endpoint type.
pub trait EndpointApi<E: Endpoint> {
    fn create_endpoint(&self, input: &CreateInput<E::CreateFields>) -> ApiResult<E>;

    fn update_endpoint(&self, input: &UpdateInput<E::UpdateFields>) -> ApiResult<E>;

    fn delete_endpoint(&self, key: &EndpointKey) -> ApiResult<()>;

    fn get_endpoint(&self, key: &EndpointKey) -> ApiResult<E>;

    fn list_endpoints(&self, service_id: &str, service_version: u32) -> ApiResult<Vec<E>>;
}
