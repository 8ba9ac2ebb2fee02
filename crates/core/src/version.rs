/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Service versions, version selectors and the version state classifier.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::VersionApi;
use crate::error::{CoreError, CoreResult};

/// A service version as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub number: u32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Version {
    pub fn new(number: u32, active: bool, locked: bool) -> Self {
        Self {
            number,
            active,
            locked,
        }
    }

    /// Lifecycle state of this version. Active wins over locked.
    pub fn state(&self) -> VersionState {
        if self.active {
            VersionState::Active
        } else if self.locked {
            VersionState::Locked
        } else {
            VersionState::Editable
        }
    }
}

/// Lifecycle state of a service version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionState {
    Active,
    Locked,
    Editable,
}

impl VersionState {
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Editable)
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Locked => "locked",
            Self::Editable => "editable",
        };
        f.write_str(s)
    }
}

/// What the `--version` flag asked for
///
/// Numbers are not range-checked; zero, negative or oversized values reach
/// the lookup and come back as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector {
    Number(i64),
    Latest,
    Active,
}

impl VersionSelector {
    /// Parse a raw `--version` value: a version number, `latest` or `active`.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "active" => Ok(Self::Active),
            _ => trimmed
                .parse::<i64>()
                .map(Self::Number)
                .map_err(|e| CoreError::InvalidFlagValue {
                    flag: "version",
                    value: raw.to_string(),
                    reason: format!("expected 'latest', 'active' or a version number ({e})"),
                }),
        }
    }

    fn matches(self, versions: &[Version]) -> Option<&Version> {
        match self {
            Self::Number(n) => versions.iter().find(|v| i64::from(v.number) == n),
            Self::Latest => versions.iter().max_by_key(|v| v.number),
            Self::Active => versions.iter().find(|v| v.active),
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "version {n}"),
            Self::Latest => f.write_str("latest version"),
            Self::Active => f.write_str("active version"),
        }
    }
}

/// Fetch the versions of `service_id` and pick the one `selector` names.
///
/// This is the only `ListVersions` call an invocation makes; the returned
/// record is what the classifier and the autoclone gate work from.
///
/// # Errors
///
/// Returns `VersionNotFound` when nothing matches, or the remote error if the
/// listing itself fails.
pub fn lookup<A>(api: &A, service_id: &str, selector: VersionSelector) -> CoreResult<Version>
where
    A: VersionApi + ?Sized,
{
    let versions = api.list_versions(service_id)?;
    tracing::debug!(
        service_id,
        count = versions.len(),
        %selector,
        "resolving service version"
    );
    selector
        .matches(&versions)
        .cloned()
        .ok_or_else(|| CoreError::VersionNotFound {
            service_id: service_id.to_string(),
            selector: selector.to_string(),
        })
}

/// Classify version `number` of `service_id`.
///
/// # Errors
///
/// Returns `VersionNotFound` if the service has no version with that number.
pub fn classify<A>(api: &A, service_id: &str, number: u32) -> CoreResult<VersionState>
where
    A: VersionApi + ?Sized,
{
    lookup(api, service_id, VersionSelector::Number(i64::from(number))).map(|v| v.state())
}
