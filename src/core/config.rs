//! Configuration module for desktop-attach
//!
//! Behaviour is fixed by `ShellProfile`; only the ambient logging settings
//! can be adjusted, through `DESKTOP_ATTACH_*` environment variables.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::logging::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DESKTOP_ATTACH";

/// Separator between nested keys, e.g. `DESKTOP_ATTACH_LOG__LEVEL`
pub const ENV_SEPARATOR: &str = "__";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings
    #[serde(default)]
    pub log: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment
    pub fn from_vars<I, K, V>(vars: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_environment(Self::environment().source(Some(map)))
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
    }

    fn from_environment(env: config::Environment) -> std::result::Result<Self, ConfigError> {
        let settings = config::Config::builder().add_source(env).build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Well-known window classes and the message used to locate the desktop host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellProfile {
    /// Class of the top-level desktop shell window
    pub shell_class: String,
    /// Class of the background-hosting window
    pub host_class: String,
    /// Class of the shell view container the host must contain
    pub view_class: String,
    /// Undocumented message asking the shell to create the host window
    pub spawn_message: u32,
}

impl ShellProfile {
    pub const SHELL_CLASS: &'static str = "Progman";
    pub const HOST_CLASS: &'static str = "WorkerW";
    pub const VIEW_CLASS: &'static str = "SHELLDLL_DefView";
    pub const SPAWN_HOST_MESSAGE: u32 = 0x052C;
}

impl Default for ShellProfile {
    fn default() -> Self {
        Self {
            shell_class: Self::SHELL_CLASS.to_string(),
            host_class: Self::HOST_CLASS.to_string(),
            view_class: Self::VIEW_CLASS.to_string(),
            spawn_message: Self::SPAWN_HOST_MESSAGE,
        }
    }
}
