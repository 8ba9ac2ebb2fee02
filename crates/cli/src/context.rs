//! Per-invocation context shared by every remote command
//!
//! Built once in `main` from the global flags, the environment, the user
//! config and the project manifest.

use crate::client::HttpClient;
use crate::error::CliResult;
use crate::utils::config::{self, BeaconConfig, UserConfig, DEFAULT_ENDPOINT};
use edgectl_core::resolve::{ServiceIdCandidates, SERVICE_ID_ENV};
use std::fmt;
use std::time::Duration;

pub const TOKEN_ENV: &str = "EDGECTL_API_TOKEN";
pub const ENDPOINT_ENV: &str = "EDGECTL_API_ENDPOINT";

/// Global flags accepted before any command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    pub profile: Option<String>,
}

/// Where the API token came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Environment,
    Profile(String),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "--token"),
            TokenSource::Environment => write!(f, "{TOKEN_ENV}"),
            TokenSource::Profile(name) => write!(f, "config file (profile: {name})"),
        }
    }
}

/// Values read from the environment, kept separate so tests can supply them.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    pub service_id: Option<String>,
}

impl Environment {
    pub fn from_process() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            token: read(TOKEN_ENV),
            endpoint: read(ENDPOINT_ENV),
            service_id: read(SERVICE_ID_ENV),
        }
    }
}

/// Endpoint, credentials and their provenance, before any client exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub token: Option<(String, TokenSource)>,
    pub timeout: Duration,
}

impl Settings {
    /// Apply flag > environment > config precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if `--profile` names a profile the config doesn't have.
    pub fn resolve(
        options: &GlobalOptions,
        environment: &Environment,
        user_config: &UserConfig,
    ) -> CliResult<Self> {
        let endpoint = options
            .endpoint
            .clone()
            .or_else(|| environment.endpoint.clone())
            .or_else(|| user_config.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let token = if let Some(token) = &options.token {
            Some((token.clone(), TokenSource::Flag))
        } else if let Some(token) = &environment.token {
            Some((token.clone(), TokenSource::Environment))
        } else {
            user_config
                .profile(options.profile.as_deref())?
                .map(|(name, profile)| (profile.token.clone(), TokenSource::Profile(name.to_string())))
        };

        Ok(Self {
            endpoint,
            token,
            timeout: Duration::from_secs(user_config.timeout_secs),
        })
    }

    /// Lines shown at the top of `--verbose` output.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = vec![format!("API endpoint: {}", self.endpoint)];
        match &self.token {
            Some((_, source)) => lines.push(format!("API token provided via {source}")),
            None => lines.push("API token not provided".to_string()),
        }
        lines
    }
}

/// Everything a remote command needs beyond its own flags
pub struct GlobalContext {
    pub client: HttpClient,
    pub diagnostics: Vec<String>,
    pub env_service_id: Option<String>,
    pub manifest_service_id: Option<String>,
    pub beacon: BeaconConfig,
}

impl GlobalContext {
    /// Load config, environment and manifest, and build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable or malformed config files, an unknown
    /// profile, or an invalid API endpoint.
    pub fn load(options: &GlobalOptions) -> CliResult<Self> {
        let user_config = match config::user_config_path() {
            Some(path) => config::read_user_config(&path)?,
            None => UserConfig::default(),
        };
        let environment = Environment::from_process();
        let manifest = config::read_manifest(&config::manifest_path())?;

        Self::build(options, environment, &user_config, manifest.and_then(|m| m.service_id))
    }

    fn build(
        options: &GlobalOptions,
        environment: Environment,
        user_config: &UserConfig,
        manifest_service_id: Option<String>,
    ) -> CliResult<Self> {
        let settings = Settings::resolve(options, &environment, user_config)?;
        tracing::debug!(endpoint = %settings.endpoint, "resolved API settings");

        let diagnostics = settings.diagnostics();
        let token = settings.token.map(|(token, _)| token);
        let client = HttpClient::new(&settings.endpoint, token, settings.timeout)?;

        Ok(Self {
            client,
            diagnostics,
            env_service_id: environment.service_id,
            manifest_service_id,
            beacon: user_config.beacon.clone(),
        })
    }

    /// Service ID candidates for a command given its `--service-id` flag.
    pub fn candidates(&self, flag: Option<String>) -> ServiceIdCandidates {
        ServiceIdCandidates {
            flag,
            environment: self.env_service_id.clone(),
            manifest: self.manifest_service_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> UserConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_settings_defaults() {
        let settings =
            Settings::resolve(&GlobalOptions::default(), &Environment::default(), &UserConfig::default())
                .unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.token, None);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(
            settings.diagnostics(),
            vec![
                format!("API endpoint: {DEFAULT_ENDPOINT}"),
                "API token not provided".to_string()
            ]
        );
    }

    #[test]
    fn test_token_precedence() {
        let user_config = config("profiles:\n  user:\n    token: from-config\n");
        let environment = Environment {
            token: Some("from-env".to_string()),
            ..Environment::default()
        };
        let options = GlobalOptions {
            token: Some("from-flag".to_string()),
            ..GlobalOptions::default()
        };

        let settings = Settings::resolve(&options, &environment, &user_config).unwrap();
        assert_eq!(settings.token, Some(("from-flag".to_string(), TokenSource::Flag)));

        let settings = Settings::resolve(&GlobalOptions::default(), &environment, &user_config).unwrap();
        assert_eq!(
            settings.token,
            Some(("from-env".to_string(), TokenSource::Environment))
        );

        let settings =
            Settings::resolve(&GlobalOptions::default(), &Environment::default(), &user_config).unwrap();
        assert_eq!(
            settings.token,
            Some(("from-config".to_string(), TokenSource::Profile("user".to_string())))
        );
        assert_eq!(
            settings.diagnostics()[1],
            "API token provided via config file (profile: user)"
        );
    }

    #[test]
    fn test_named_profile() {
        let user_config = config(
            "profiles:\n  user:\n    token: one\n    default: true\n  ci:\n    token: two\n",
        );
        let options = GlobalOptions {
            profile: Some("ci".to_string()),
            ..GlobalOptions::default()
        };
        let settings = Settings::resolve(&options, &Environment::default(), &user_config).unwrap();
        assert_eq!(
            settings.token,
            Some(("two".to_string(), TokenSource::Profile("ci".to_string())))
        );

        let options = GlobalOptions {
            profile: Some("missing".to_string()),
            ..GlobalOptions::default()
        };
        assert!(Settings::resolve(&options, &Environment::default(), &user_config).is_err());
    }

    #[test]
    fn test_endpoint_precedence() {
        let user_config = config("endpoint: https://config.example.com\ntimeout_secs: 5\n");
        let environment = Environment {
            endpoint: Some("https://env.example.com".to_string()),
            ..Environment::default()
        };
        let options = GlobalOptions {
            endpoint: Some("https://flag.example.com".to_string()),
            ..GlobalOptions::default()
        };

        let settings = Settings::resolve(&options, &environment, &user_config).unwrap();
        assert_eq!(settings.endpoint, "https://flag.example.com");

        let settings = Settings::resolve(&GlobalOptions::default(), &environment, &user_config).unwrap();
        assert_eq!(settings.endpoint, "https://env.example.com");

        let settings =
            Settings::resolve(&GlobalOptions::default(), &Environment::default(), &user_config).unwrap();
        assert_eq!(settings.endpoint, "https://config.example.com");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_token_source_display() {
        assert_eq!(TokenSource::Flag.to_string(), "--token");
        assert_eq!(TokenSource::Environment.to_string(), "EDGECTL_API_TOKEN");
        assert_eq!(
            TokenSource::Profile("user".to_string()).to_string(),
            "config file (profile: user)"
        );
    }

    #[test]
    fn test_context_candidates() {
        let environment = Environment {
            service_id: Some("env-id".to_string()),
            ..Environment::default()
        };
        let ctx = GlobalContext::build(
            &GlobalOptions::default(),
            environment,
            &UserConfig::default(),
            Some("manifest-id".to_string()),
        )
        .unwrap();

        let candidates = ctx.candidates(Some("flag-id".to_string()));
        assert_eq!(candidates.flag.as_deref(), Some("flag-id"));
        assert_eq!(candidates.environment.as_deref(), Some("env-id"));
        assert_eq!(candidates.manifest.as_deref(), Some("manifest-id"));
        assert!(!ctx.beacon.enabled);
    }

    #[test]
    fn test_context_rejects_bad_endpoint() {
        let options = GlobalOptions {
            endpoint: Some("not a url".to_string()),
            ..GlobalOptions::default()
        };
        let result = GlobalContext::build(&options, Environment::default(), &UserConfig::default(), None);
        assert!(result.is_err());
    }
}
