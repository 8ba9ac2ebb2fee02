/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * The generic resource command adapter. Every endpoint type goes through
 * the same sequence: validate flags, resolve the service, resolve the
 * version, run the autoclone gate (mutations only), call the remote
 * collaborator once, render.
 */

use crate::api::{CreateInput, EndpointApi, EndpointKey, UpdateInput, VersionApi};
use crate::endpoint::Endpoint;
use crate::error::{CoreError, CoreResult};
use crate::gate::{self, GateDecision};
use crate::render;
use crate::resolve::{resolve_service_id, ResolvedService, ServiceIdCandidates};
use crate::version::{self, Version, VersionSelector};

/// Flag values shared by every endpoint subcommand
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub service: ServiceIdCandidates,
    /// Raw `--version` value
    pub version: Option<String>,
    pub autoclone: bool,
    pub verbose: bool,
    pub json: bool,
    /// Connection/profile lines shown ahead of verbose read output
    pub diagnostics: Vec<String>,
}

/// Resolved state for one command execution
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub service: ResolvedService,
    pub input_version: Version,
    pub decision: Option<GateDecision>,
}

impl InvocationContext {
    /// The version remote calls are sent to
    pub fn working_version(&self) -> u32 {
        self.decision
            .map_or(self.input_version.number, |d| d.working_version())
    }
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub service_id: String,
    pub version: u32,
    pub output: String,
}

fn require<T>(flag: &'static str, value: Option<T>) -> CoreResult<T> {
    value.ok_or(CoreError::MissingRequiredFlag(flag))
}

fn require_name(name: Option<String>) -> CoreResult<String> {
    require("name", name.filter(|n| !n.is_empty()))
}

fn require_version(invocation: &Invocation) -> CoreResult<VersionSelector> {
    let raw = require("version", invocation.version.as_deref())?;
    VersionSelector::parse(raw)
}

fn resolve<A>(api: &A, invocation: &Invocation, selector: VersionSelector) -> CoreResult<InvocationContext>
where
    A: VersionApi + ?Sized,
{
    let service = resolve_service_id(&invocation.service)?;
    let input_version = version::lookup(api, &service.id, selector)?;
    Ok(InvocationContext {
        service,
        input_version,
        decision: None,
    })
}

fn resolve_for_mutation<A>(
    api: &A,
    invocation: &Invocation,
    selector: VersionSelector,
) -> CoreResult<InvocationContext>
where
    A: VersionApi + ?Sized,
{
    let mut ctx = resolve(api, invocation, selector)?;
    let decision = gate::run(api, &ctx.service.id, &ctx.input_version, invocation.autoclone)?;
    ctx.decision = Some(decision);
    Ok(ctx)
}

fn mutation_output(invocation: &Invocation, ctx: &InvocationContext, confirmation: String) -> String {
    match ctx.decision {
        Some(GateDecision::Cloned { from, to }) if invocation.verbose => {
            let mut out = render::autoclone_notice(from, to);
            out.push_str(&confirmation);
            out
        }
        _ => confirmation,
    }
}

/// Create an endpoint on the working version.
///
/// # Errors
///
/// Any error in the taxonomy; nothing is created unless every earlier step succeeded.
pub fn create<E, A>(
    api: &A,
    invocation: &Invocation,
    name: Option<String>,
    args: E::CreateArgs,
) -> CoreResult<Outcome>
where
    E: Endpoint,
    A: VersionApi + EndpointApi<E> + ?Sized,
{
    let name = require_name(name)?;
    let selector = require_version(invocation)?;
    let fields = E::create_fields(args)?;

    let ctx = resolve_for_mutation(api, invocation, selector)?;
    let input = CreateInput {
        service_id: ctx.service.id.clone(),
        service_version: ctx.working_version(),
        name,
        fields,
    };
    tracing::debug!(kind = E::KIND, name = %input.name, version = input.service_version, "creating endpoint");
    let created = api.create_endpoint(&input)?;

    let confirmation = render::created(
        E::LABEL,
        created.name(),
        created.service_id(),
        created.service_version(),
    );
    Ok(Outcome {
        service_id: ctx.service.id.clone(),
        version: ctx.working_version(),
        output: mutation_output(invocation, &ctx, confirmation),
    })
}

/// Update (and optionally rename) an endpoint on the working version.
///
/// # Errors
///
/// Any error in the taxonomy.
pub fn update<E, A>(
    api: &A,
    invocation: &Invocation,
    name: Option<String>,
    new_name: Option<String>,
    args: E::UpdateArgs,
) -> CoreResult<Outcome>
where
    E: Endpoint,
    A: VersionApi + EndpointApi<E> + ?Sized,
{
    let name = require_name(name)?;
    let selector = require_version(invocation)?;
    let fields = E::update_fields(args)?;

    let ctx = resolve_for_mutation(api, invocation, selector)?;
    let input = UpdateInput {
        key: EndpointKey {
            service_id: ctx.service.id.clone(),
            service_version: ctx.working_version(),
            name,
        },
        new_name: new_name.filter(|n| !n.is_empty()),
        fields,
    };
    tracing::debug!(kind = E::KIND, name = %input.key.name, version = input.key.service_version, "updating endpoint");
    let updated = api.update_endpoint(&input)?;

    let confirmation = render::updated(
        E::LABEL,
        updated.name(),
        Some(input.key.name.as_str()),
        updated.service_id(),
        updated.service_version(),
    );
    Ok(Outcome {
        service_id: ctx.service.id.clone(),
        version: ctx.working_version(),
        output: mutation_output(invocation, &ctx, confirmation),
    })
}

/// Delete an endpoint from the working version.
///
/// # Errors
///
/// Any error in the taxonomy.
pub fn delete<E, A>(api: &A, invocation: &Invocation, name: Option<String>) -> CoreResult<Outcome>
where
    E: Endpoint,
    A: VersionApi + EndpointApi<E> + ?Sized,
{
    let name = require_name(name)?;
    let selector = require_version(invocation)?;

    let ctx = resolve_for_mutation(api, invocation, selector)?;
    let key = EndpointKey {
        service_id: ctx.service.id.clone(),
        service_version: ctx.working_version(),
        name,
    };
    tracing::debug!(kind = E::KIND, name = %key.name, version = key.service_version, "deleting endpoint");
    api.delete_endpoint(&key)?;

    let confirmation = render::deleted(E::LABEL, &key.name, &key.service_id, key.service_version);
    Ok(Outcome {
        service_id: key.service_id.clone(),
        version: key.service_version,
        output: mutation_output(invocation, &ctx, confirmation),
    })
}

/// Show one endpoint. Read-only: never gates on editability.
///
/// # Errors
///
/// Flag, service, version or remote errors.
pub fn describe<E, A>(api: &A, invocation: &Invocation, name: Option<String>) -> CoreResult<Outcome>
where
    E: Endpoint,
    A: VersionApi + EndpointApi<E> + ?Sized,
{
    let name = require_name(name)?;
    let selector = require_version(invocation)?;

    let ctx = resolve(api, invocation, selector)?;
    let key = EndpointKey {
        service_id: ctx.service.id.clone(),
        service_version: ctx.working_version(),
        name,
    };
    let endpoint = api.get_endpoint(&key)?;

    let output = if invocation.json {
        render::json(&endpoint)?
    } else if invocation.verbose {
        render::endpoint_detail(&invocation.diagnostics, &endpoint)
    } else {
        render::endpoint_detail(&[], &endpoint)
    };
    Ok(Outcome {
        service_id: key.service_id,
        version: key.service_version,
        output,
    })
}

/// List every endpoint of type `E` on a service version, in remote order.
///
/// # Errors
///
/// Flag, service, version or remote errors.
pub fn list<E, A>(api: &A, invocation: &Invocation) -> CoreResult<Outcome>
where
    E: Endpoint,
    A: VersionApi + EndpointApi<E> + ?Sized,
{
    let selector = require_version(invocation)?;

    let ctx = resolve(api, invocation, selector)?;
    let version = ctx.working_version();
    let endpoints = api.list_endpoints(&ctx.service.id, version)?;

    let output = if invocation.json {
        render::json(&endpoints)?
    } else if invocation.verbose {
        render::endpoint_list_verbose(&invocation.diagnostics, &ctx.service, version, &endpoints)
    } else {
        render::endpoint_table(&endpoints)
    };
    Ok(Outcome {
        service_id: ctx.service.id,
        version,
        output,
    })
}
