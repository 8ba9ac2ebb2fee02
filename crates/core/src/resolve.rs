/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Service ID resolution. Works on values the caller already gathered
 * (flag, environment, project manifest); no I/O happens here.
 */

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Environment variable consulted for a service ID
pub const SERVICE_ID_ENV: &str = "EDGECTL_SERVICE_ID";

/// Project manifest file consulted for a service ID
pub const MANIFEST_FILE: &str = "edgectl.yaml";

/// Where a service ID came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceIdSource {
    Flag,
    Environment,
    Manifest,
}

impl fmt::Display for ServiceIdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("--service-id"),
            Self::Environment => f.write_str(SERVICE_ID_ENV),
            Self::Manifest => f.write_str(MANIFEST_FILE),
        }
    }
}

/// Candidate service IDs, one per source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceIdCandidates {
    pub flag: Option<String>,
    pub environment: Option<String>,
    pub manifest: Option<String>,
}

impl ServiceIdCandidates {
    pub fn from_flag(id: impl Into<String>) -> Self {
        Self {
            flag: Some(id.into()),
            ..Self::default()
        }
    }
}

/// A service ID together with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedService {
    pub id: String,
    pub source: ServiceIdSource,
}

impl ResolvedService {
    /// Diagnostic line, e.g. `Service ID (via --service-id): 123`
    pub fn describe_source(&self) -> String {
        format!("Service ID (via {}): {}", self.source, self.id)
    }
}

/// Pick the service ID: flag, then environment, then manifest.
///
/// # Errors
///
/// Returns `MissingServiceId` when every source is absent or blank.
pub fn resolve_service_id(candidates: &ServiceIdCandidates) -> CoreResult<ResolvedService> {
    let ordered = [
        (&candidates.flag, ServiceIdSource::Flag),
        (&candidates.environment, ServiceIdSource::Environment),
        (&candidates.manifest, ServiceIdSource::Manifest),
    ];

    for (value, source) in ordered {
        if let Some(id) = value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            tracing::debug!(service_id = id, %source, "resolved service ID");
            return Ok(ResolvedService {
                id: id.to_string(),
                source,
            });
        }
    }

    Err(CoreError::MissingServiceId)
}
