//! edgectl CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod beacon;
mod client;
mod commands;
mod context;
mod error;
mod utils;

#[cfg(test)]
mod test_helpers;

use clap::{Args, CommandFactory, Parser, Subcommand};
use commands::{completion, newrelic};
use context::GlobalOptions;
use edgectl_core::newrelic::NewRelicArgs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "EDGECTL_LOG";

/// edgectl - Manage logging endpoints on versioned edge services
#[derive(Parser)]
#[command(name = "edgectl")]
#[command(about = "edgectl - Manage logging endpoints on versioned edge services", long_about = None)]
#[command(version = env!("EDGECTL_VERSION"))]
struct Cli {
    /// API token (overrides EDGECTL_API_TOKEN and config profiles)
    #[arg(long, global = true)]
    token: Option<String>,
    /// API endpoint (overrides EDGECTL_API_ENDPOINT and the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Config profile to take the API token from
    #[arg(long, global = true)]
    profile: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage logging endpoints
    Logging {
        #[command(subcommand)]
        provider: LoggingProvider,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum LoggingProvider {
    /// New Relic Logs endpoints
    Newrelic {
        #[command(subcommand)]
        action: NewRelicAction,
    },
}

/// Service and version selection
#[derive(Args)]
struct TargetArgs {
    /// Service ID (falls back to EDGECTL_SERVICE_ID, then edgectl.yaml)
    #[arg(long, short = 's')]
    service_id: Option<String>,
    /// Service version: a number, 'latest' or 'active'
    #[arg(long = "version", value_name = "VERSION", allow_negative_numbers = true)]
    service_version: Option<String>,
    /// Show API and service diagnostics
    #[arg(long)]
    verbose: bool,
}

/// Flags that mutate a service version
#[derive(Args)]
struct MutationArgs {
    #[command(flatten)]
    target: TargetArgs,
    /// Clone the version first if it is active or locked
    #[arg(long)]
    autoclone: bool,
    /// Endpoint name
    #[arg(long, short = 'n')]
    name: Option<String>,
}

/// Flags that read a service version
#[derive(Args)]
struct ReadArgs {
    #[command(flatten)]
    target: TargetArgs,
    /// Print JSON instead of text
    #[arg(long, conflicts_with = "verbose")]
    json: bool,
}

/// New Relic endpoint settings
#[derive(Args)]
struct NewRelicFieldArgs {
    /// New Relic Insert API key
    #[arg(long)]
    key: Option<String>,
    /// Apache-style log format string
    #[arg(long)]
    format: Option<String>,
    /// Log format version (1 or 2)
    #[arg(long)]
    format_version: Option<u8>,
    /// Where the log line is placed in generated config (none, waf_debug)
    #[arg(long)]
    placement: Option<String>,
    /// New Relic region (US, EU)
    #[arg(long)]
    region: Option<String>,
    /// Name of an existing condition that gates logging
    #[arg(long)]
    response_condition: Option<String>,
}

impl From<NewRelicFieldArgs> for NewRelicArgs {
    fn from(args: NewRelicFieldArgs) -> Self {
        NewRelicArgs {
            key: args.key,
            format: args.format,
            format_version: args.format_version,
            placement: args.placement,
            region: args.region,
            response_condition: args.response_condition,
        }
    }
}

#[derive(Subcommand)]
enum NewRelicAction {
    /// Create a New Relic logging endpoint on a service version
    Create {
        #[command(flatten)]
        common: MutationArgs,
        #[command(flatten)]
        fields: NewRelicFieldArgs,
    },
    /// Update a New Relic logging endpoint on a service version
    Update {
        #[command(flatten)]
        common: MutationArgs,
        /// New name for the endpoint
        #[arg(long)]
        new_name: Option<String>,
        #[command(flatten)]
        fields: NewRelicFieldArgs,
    },
    /// Delete a New Relic logging endpoint from a service version
    Delete {
        #[command(flatten)]
        common: MutationArgs,
    },
    /// Show a New Relic logging endpoint
    Describe {
        #[command(flatten)]
        common: ReadArgs,
        /// Endpoint name
        #[arg(long, short = 'n')]
        name: Option<String>,
    },
    /// List New Relic logging endpoints on a service version
    List {
        #[command(flatten)]
        common: ReadArgs,
    },
}

impl TargetArgs {
    fn into_target(self, autoclone: bool, json: bool) -> newrelic::Target {
        newrelic::Target {
            service_id: self.service_id,
            version: self.service_version,
            autoclone,
            verbose: self.verbose,
            json,
        }
    }
}

fn newrelic_options(action: NewRelicAction) -> newrelic::Options {
    use newrelic::NewRelicSubcommand as Sub;

    let (target, subcommand) = match action {
        NewRelicAction::Create { common, fields } => (
            common.target.into_target(common.autoclone, false),
            Sub::Create {
                name: common.name,
                fields: fields.into(),
            },
        ),
        NewRelicAction::Update {
            common,
            new_name,
            fields,
        } => (
            common.target.into_target(common.autoclone, false),
            Sub::Update {
                name: common.name,
                new_name,
                fields: fields.into(),
            },
        ),
        NewRelicAction::Delete { common } => (
            common.target.into_target(common.autoclone, false),
            Sub::Delete { name: common.name },
        ),
        NewRelicAction::Describe { common, name } => (
            common.target.into_target(false, common.json),
            Sub::Describe { name },
        ),
        NewRelicAction::List { common } => (
            common.target.into_target(false, common.json),
            Sub::List,
        ),
    };

    newrelic::Options { target, subcommand }
}

/// The full command tree, used for completions.
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let global = GlobalOptions {
        token: cli.token,
        endpoint: cli.endpoint,
        profile: cli.profile,
    };

    let exit_code = match cli.command {
        Commands::Logging { provider } => match provider {
            LoggingProvider::Newrelic { action } => {
                let opts = newrelic_options(action);
                newrelic::run(&global, &opts)
            }
        },
        Commands::Completion { shell } => {
            let opts = completion::Options { shell };
            completion::run(&opts)
        }
    };

    std::process::exit(exit_code);
}
