//! Configuration management module

pub mod loader;
pub mod resolver;
pub mod settings;

pub use loader::{ConfigFile, ConfigSource, load_config_file};
pub use resolver::{CliOverrides, Environment, resolve};
pub use settings::{EffectiveConfig, OutputMode, Token, Visibility};
