//! New Relic logging endpoint commands
//!
//! `edgectl logging newrelic {create|update|delete|describe|list}`.

use crate::beacon::{self, Event, STATUS_FAIL, STATUS_SUCCESS};
use crate::context::{GlobalContext, GlobalOptions};
use crate::error::{CliError, CliResult};
use chrono::Utc;
use edgectl_core::endpoint::Endpoint;
use edgectl_core::newrelic::{NewRelic, NewRelicArgs};
use edgectl_core::resolve::resolve_service_id;
use edgectl_core::workflow::{self, Invocation, Outcome};
use std::io::{self, Write};

/// Flags shared by every New Relic subcommand
#[derive(Debug, Clone, Default)]
pub struct Target {
    pub service_id: Option<String>,
    pub version: Option<String>,
    pub autoclone: bool,
    pub verbose: bool,
    pub json: bool,
}

/// New Relic subcommands
#[derive(Debug, Clone)]
pub enum NewRelicSubcommand {
    Create {
        name: Option<String>,
        fields: NewRelicArgs,
    },
    Update {
        name: Option<String>,
        new_name: Option<String>,
        fields: NewRelicArgs,
    },
    Delete {
        name: Option<String>,
    },
    Describe {
        name: Option<String>,
    },
    List,
}

impl NewRelicSubcommand {
    fn operation(&self) -> &'static str {
        match self {
            NewRelicSubcommand::Create { .. } => "create",
            NewRelicSubcommand::Update { .. } => "update",
            NewRelicSubcommand::Delete { .. } => "delete",
            NewRelicSubcommand::Describe { .. } => "describe",
            NewRelicSubcommand::List => "list",
        }
    }

    fn is_mutation(&self) -> bool {
        matches!(
            self,
            NewRelicSubcommand::Create { .. }
                | NewRelicSubcommand::Update { .. }
                | NewRelicSubcommand::Delete { .. }
        )
    }
}

/// Options for New Relic commands
pub struct Options {
    pub target: Target,
    pub subcommand: NewRelicSubcommand,
}

/// Run a New Relic command
pub fn run(global: &GlobalOptions, options: &Options) -> i32 {
    match run_inner(global, options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn run_inner(global: &GlobalOptions, options: &Options) -> CliResult<()> {
    let ctx = GlobalContext::load(global)?;
    let invocation = invocation(&ctx, &options.target);

    let outcome = match execute(&ctx, &invocation, &options.subcommand) {
        Ok(outcome) => outcome,
        Err(e) => {
            if options.subcommand.is_mutation() {
                report_failure(&ctx, &invocation, &options.subcommand, &e);
            }
            return Err(e);
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(outcome.output.as_bytes())?;
    stdout.flush()?;

    if options.subcommand.is_mutation() {
        let event = Event::new(event_name(&options.subcommand), STATUS_SUCCESS)
            .with("version", outcome.version);
        send_beacon(&ctx, &outcome.service_id, event);
    }
    Ok(())
}

fn invocation(ctx: &GlobalContext, target: &Target) -> Invocation {
    Invocation {
        service: ctx.candidates(target.service_id.clone()),
        version: target.version.clone(),
        autoclone: target.autoclone,
        verbose: target.verbose,
        json: target.json,
        diagnostics: ctx.diagnostics.clone(),
    }
}

fn execute(
    ctx: &GlobalContext,
    invocation: &Invocation,
    subcommand: &NewRelicSubcommand,
) -> CliResult<Outcome> {
    let api = &ctx.client;
    let outcome = match subcommand {
        NewRelicSubcommand::Create { name, fields } => {
            workflow::create::<NewRelic, _>(api, invocation, name.clone(), fields.clone())?
        }
        NewRelicSubcommand::Update {
            name,
            new_name,
            fields,
        } => workflow::update::<NewRelic, _>(
            api,
            invocation,
            name.clone(),
            new_name.clone(),
            fields.clone(),
        )?,
        NewRelicSubcommand::Delete { name } => {
            workflow::delete::<NewRelic, _>(api, invocation, name.clone())?
        }
        NewRelicSubcommand::Describe { name } => {
            workflow::describe::<NewRelic, _>(api, invocation, name.clone())?
        }
        NewRelicSubcommand::List => workflow::list::<NewRelic, _>(api, invocation)?,
    };
    Ok(outcome)
}

fn event_name(subcommand: &NewRelicSubcommand) -> String {
    format!("logging.{}.{}", NewRelic::KIND, subcommand.operation())
}

/// Failed mutations are reported only when the error came after flag
/// validation and the service is known.
fn report_failure(
    ctx: &GlobalContext,
    invocation: &Invocation,
    subcommand: &NewRelicSubcommand,
    error: &CliError,
) {
    let status = match error {
        CliError::Core(core) if core.is_argument_error() => return,
        CliError::Core(core) => core.remote_status(),
        _ => None,
    };
    let Ok(service) = resolve_service_id(&invocation.service) else {
        return;
    };

    let mut event = Event::new(event_name(subcommand), STATUS_FAIL).with("error", error.to_string());
    if let Some(status) = status {
        event = event.with("http_status", status);
    }
    send_beacon(ctx, &service.id, event);
}

/// Best-effort notification; failures are only logged.
fn send_beacon(ctx: &GlobalContext, service_id: &str, event: Event) {
    if !ctx.beacon.enabled {
        return;
    }

    let event = event.with("sent_at", Utc::now().to_rfc3339());
    if let Err(e) = beacon::notify(ctx.client.http(), &ctx.beacon.relay, service_id, &event) {
        tracing::warn!(error = %e, event = %event.name, "beacon notification failed");
    }
}
