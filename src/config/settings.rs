//! Resolved settings for one invocation

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A GitHub access token
///
/// `Debug` never prints the secret, so a token can sit inside structs that
/// derive `Debug` without leaking into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret, for the HTTP client only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

impl FromStr for OutputMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            _ => Err(()),
        }
    }
}

/// Fully resolved, immutable settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    /// Present whenever the requested action talks to the host
    pub token: Option<Token>,
    pub repo_name: Option<String>,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub local_path: PathBuf,
    pub branch: String,
    pub push_after_create: bool,
    pub output_mode: OutputMode,
}
