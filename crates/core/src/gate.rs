/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Autoclone gate: decides which version a mutation is sent to.
 */

use crate::api::VersionApi;
use crate::error::{CoreError, CoreResult};
use crate::version::Version;

/// Outcome of a successful pass through the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The resolved version is editable and is used as-is.
    InPlace { version: u32 },
    /// The resolved version was cloned; the clone is the working version.
    Cloned { from: u32, to: u32 },
}

impl GateDecision {
    /// The version the mutation must target
    pub fn working_version(&self) -> u32 {
        match *self {
            Self::InPlace { version } => version,
            Self::Cloned { to, .. } => to,
        }
    }
}

/// Run the gate for `version` of `service_id`.
///
/// Editable versions pass through untouched. Active or locked versions are
/// cloned when `autoclone` is set and rejected otherwise. A failed clone is
/// returned as the remote error it is; no retry, no rollback.
///
/// # Errors
///
/// Returns `VersionNotEditable` or the clone collaborator's error.
pub fn run<A>(api: &A, service_id: &str, version: &Version, autoclone: bool) -> CoreResult<GateDecision>
where
    A: VersionApi + ?Sized,
{
    let state = version.state();
    if state.is_editable() {
        return Ok(GateDecision::InPlace {
            version: version.number,
        });
    }
    if !autoclone {
        return Err(CoreError::VersionNotEditable {
            version: version.number,
            state,
        });
    }

    let clone = api.clone_version(service_id, version.number)?;
    tracing::info!(
        service_id,
        from = version.number,
        to = clone.number,
        %state,
        "cloned non-editable service version"
    );
    Ok(GateDecision::Cloned {
        from: version.number,
        to: clone.number,
    })
}
