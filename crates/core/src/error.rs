/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

use crate::version::VersionState;

/// Top-level error type for the versioned-mutation workflow
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("error parsing arguments: required flag --{0} not provided")]
    MissingRequiredFlag(&'static str),

    #[error("error parsing arguments: invalid value '{value}' for --{flag}: {reason}")]
    InvalidFlagValue {
        flag: &'static str,
        value: String,
        reason: String,
    },

    #[error("error reading service: no service ID found")]
    MissingServiceId,

    #[error("error matching service version: {selector} not found for service {service_id}")]
    VersionNotFound {
        service_id: String,
        selector: String,
    },

    #[error("service version {version} is {state}")]
    VersionNotEditable { version: u32, state: VersionState },

    #[error("{0}")]
    RemoteOperationFailed(#[from] ApiError),

    #[error("error rendering output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CoreError {
    /// True for errors raised while validating flags, before any lookup.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredFlag(_) | Self::InvalidFlagValue { .. }
        )
    }

    /// HTTP status of a remote failure, if the platform answered with one
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            Self::RemoteOperationFailed(e) => e.status(),
            _ => None,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Failure reported by a remote collaborator.
///
/// The message is surfaced to the user verbatim, so implementations should
/// put the platform's own wording in it rather than wrapping it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
