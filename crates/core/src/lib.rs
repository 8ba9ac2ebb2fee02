//! edgectl Core Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library implements the versioned-mutation workflow behind every
//! `edgectl` resource command: resolve the service, resolve the version,
//! clone it when it is not editable and `--autoclone` was given, call the
//! remote collaborator once, and render the result.
//!
//! It performs no I/O of its own. The remote platform is reached through the
//! [`api::VersionApi`] and [`api::EndpointApi`] traits, which the CLI crate
//! implements over HTTP.
//!
//! # Example
//!
//! ```rust,no_run
//! use edgectl_core::api::{EndpointApi, VersionApi};
//! use edgectl_core::newrelic::{NewRelic, NewRelicArgs};
//! use edgectl_core::resolve::ServiceIdCandidates;
//! use edgectl_core::workflow::{self, Invocation};
//!
//! fn create_endpoint<A>(api: &A) -> Result<(), edgectl_core::CoreError>
//! where
//!     A: VersionApi + EndpointApi<NewRelic>,
//! {
//!     let invocation = Invocation {
//!         service: ServiceIdCandidates::from_flag("123"),
//!         version: Some("3".to_string()),
//!         ..Invocation::default()
//!     };
//!     let args = NewRelicArgs {
//!         key: Some("abc".to_string()),
//!         ..NewRelicArgs::default()
//!     };
//!     let outcome = workflow::create::<NewRelic, _>(api, &invocation, Some("foo".to_string()), args)?;
//!     print!("{}", outcome.output);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod endpoint;
pub mod error;
pub mod gate;
pub mod newrelic;
pub mod render;
pub mod resolve;
pub mod version;
pub mod workflow;

#[cfg(test)]
mod test_helpers;

// Re-export error types for public API
pub use error::{ApiError, ApiResult, CoreError, CoreResult};
pub use version::{Version, VersionSelector, VersionState};
