//! Configuration resolution
//!
//! [`resolve`] merges three explicit sources into one [`EffectiveConfig`].
//! Each field is resolved on its own, highest precedence first:
//!
//! 1. command-line argument
//! 2. configuration file
//! 3. environment variable
//! 4. built-in default
//!
//! Nothing here reads the process environment or the config file itself;
//! callers capture both up front with [`Environment::capture`] and
//! [`load_config_file`](super::load_config_file). The only filesystem access
//! is the read-only existence check on the resolved local path.

use super::loader::{ConfigFile, ConfigSource};
use super::settings::{EffectiveConfig, OutputMode, Token, Visibility};
use crate::constants;
use crate::errors::ConfigError;
use crate::workflow::ActionKind;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Settings supplied on the command line for this invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOverrides {
    /// The action being run; decides which settings are mandatory
    pub action: ActionKind,
    pub token: Option<Token>,
    pub repo_name: Option<String>,
    pub description: Option<String>,
    pub private: Option<bool>,
    pub push_after_create: Option<bool>,
    pub local_path: Option<PathBuf>,
    pub branch: Option<String>,
    pub output: Option<OutputMode>,
}

impl CliOverrides {
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            token: None,
            repo_name: None,
            description: None,
            private: None,
            push_after_create: None,
            local_path: None,
            branch: None,
            output: None,
        }
    }
}

/// Snapshot of the environment variables gitflow reads, plus the working directory
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    working_dir: PathBuf,
}

impl Environment {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: BTreeMap::new(),
            working_dir: working_dir.into(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Capture the current process environment and working directory
    pub fn capture() -> std::io::Result<Self> {
        let mut environment = Self::new(std::env::current_dir()?);
        for key in constants::env::ALL {
            if let Ok(value) = std::env::var(key) {
                environment.vars.insert((*key).to_string(), value);
            }
        }
        Ok(environment)
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("vars", &self.vars.keys().collect::<Vec<_>>())
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

/// Merge command-line, file and environment settings into an [`EffectiveConfig`]
///
/// # Errors
/// - [`ConfigError::InvalidFormat`] if the file contents do not parse
/// - [`ConfigError::InvalidValue`] for an unparseable boolean or output mode
/// - [`ConfigError::MissingToken`] if the action calls the host and no source has a token
/// - [`ConfigError::MissingRepositoryName`] if the action needs a repository name
/// - [`ConfigError::InvalidPath`] if the resolved local path is not an existing directory
pub fn resolve(
    cli: &CliOverrides,
    env: &Environment,
    file: Option<&ConfigSource>,
) -> Result<EffectiveConfig, ConfigError> {
    let file = match file {
        Some(source) => ConfigFile::parse(source)?,
        None => ConfigFile::default(),
    };

    let token = pick(
        cli.token.as_ref().map(|t| t.expose().to_string()),
        file.token.clone(),
        env.var(constants::env::TOKEN),
    )
    .map(Token::new);

    let repo_name = pick(
        cli.repo_name.clone(),
        file.repo_name.clone(),
        env.var(constants::env::REPO_NAME),
    );

    let description = pick(
        cli.description.clone(),
        file.description.clone(),
        env.var(constants::env::DESCRIPTION),
    );

    let branch = pick(
        cli.branch.clone(),
        file.branch.clone(),
        env.var(constants::env::BRANCH),
    )
    .unwrap_or_else(|| constants::git::DEFAULT_BRANCH.to_string());

    let private = pick_bool(
        constants::env::PRIVATE,
        cli.private,
        file.private,
        env.var(constants::env::PRIVATE),
    )?
    .unwrap_or(false);

    let push_after_create = pick_bool(
        constants::env::PUSH,
        cli.push_after_create,
        file.push_code,
        env.var(constants::env::PUSH),
    )?
    .unwrap_or(true);

    let output_mode = match (cli.output, file.output.as_deref()) {
        (Some(mode), _) => mode,
        (None, Some(raw)) => parse_output("output", raw)?,
        (None, None) => match non_empty(env.var(constants::env::OUTPUT)) {
            Some(raw) => parse_output(constants::env::OUTPUT, raw)?,
            None => OutputMode::default(),
        },
    };

    let local_path = match (cli.local_path.clone(), file.local_path.as_deref()) {
        (Some(path), _) => Some(path),
        (None, Some(path)) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => non_empty(env.var(constants::env::PATH)).map(PathBuf::from),
    };
    let local_path = match local_path {
        Some(path) => env.working_dir().join(path),
        None => env.working_dir().to_path_buf(),
    };

    if cli.action.requires_remote() && token.is_none() {
        return Err(ConfigError::MissingToken);
    }

    if cli.action.requires_repo_name() && repo_name.is_none() {
        return Err(ConfigError::MissingRepositoryName);
    }

    if !local_path.is_dir() {
        return Err(ConfigError::InvalidPath(local_path.display().to_string()));
    }

    Ok(EffectiveConfig {
        token,
        repo_name,
        description,
        visibility: if private {
            Visibility::Private
        } else {
            Visibility::Public
        },
        local_path,
        branch,
        push_after_create,
        output_mode,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// First non-blank value in precedence order
fn pick(cli: Option<String>, file: Option<String>, env: Option<&str>) -> Option<String> {
    cli.filter(|v| !v.trim().is_empty())
        .or_else(|| file.filter(|v| !v.trim().is_empty()))
        .or_else(|| non_empty(env).map(str::to_string))
}

fn pick_bool(
    field: &str,
    cli: Option<bool>,
    file: Option<bool>,
    env: Option<&str>,
) -> Result<Option<bool>, ConfigError> {
    if let Some(value) = cli.or(file) {
        return Ok(Some(value));
    }

    match non_empty(env) {
        Some(raw) => parse_bool(field, raw).map(Some),
        None => Ok(None),
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_output(field: &str, raw: &str) -> Result<OutputMode, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
