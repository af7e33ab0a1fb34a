//! Process-wide settings
//!
//! Settings are read once at start-up from environment variables and shared
//! read-only by every scenario. A `.env` file in the working directory fills
//! in whatever the process environment leaves unset.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ApplicationError, ApplicationResult};

/// Enables debug mode for every scenario when set to `true`.
pub const ENV_DEBUG: &str = "APISTEP_DEBUG";
/// Base URL of the application under test.
pub const ENV_MY_APP_URL: &str = "APISTEP_MY_APP_URL";
/// Directory of JSON schemas, relative to the working directory.
pub const ENV_JSON_SCHEMA_DIR: &str = "APISTEP_JSON_SCHEMA_DIR";
/// Prefix of extra values saved into every scenario cache.
pub const ENV_VAR_PREFIX: &str = "APISTEP_VAR_";

/// File of `KEY=value` lines read from the working directory, if present.
pub const DOTENV_FILE: &str = ".env";

/// Cache key the base URL is saved under at the start of every scenario.
pub const MY_APP_URL_KEY: &str = "MY_APP_URL";

/// Read-only settings shared by all scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Debug mode each scenario starts with.
    pub debug: bool,
    /// Base URL saved under [`MY_APP_URL_KEY`].
    pub base_url: String,
    /// Directory relative schema references are resolved against.
    pub schema_dir: PathBuf,
    /// Extra values saved into every scenario cache, keyed by cache key.
    pub bootstrap: BTreeMap<String, String>,
}

impl Settings {
    /// Reads settings from the process environment and the working directory's `.env`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the working directory cannot be
    /// determined or `.env` exists but cannot be parsed.
    pub fn from_env() -> ApplicationResult<Self> {
        let working_dir = std::env::current_dir().map_err(|e| {
            ApplicationError::Configuration(format!("cannot read working directory: {e}"))
        })?;
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        Self::from_dir(&working_dir, vars)
    }

    /// Builds settings from `working_dir/.env` overlaid with `process_vars`.
    ///
    /// A variable set in both places takes the process value. A missing
    /// `.env` is not an error.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `.env` exists but cannot be read or parsed.
    pub fn from_dir<I, K, V>(working_dir: &Path, process_vars: I) -> ApplicationResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let file_vars = read_dotenv(&working_dir.join(DOTENV_FILE))?;
        let process_vars = process_vars.into_iter().map(|(k, v)| (k.into(), v.into()));
        Ok(Self::from_vars(working_dir, file_vars.into_iter().chain(process_vars)))
    }

    /// Builds settings from an explicit set of variables.
    ///
    /// `APISTEP_DEBUG` is true only for a case-insensitive `true`. Unset
    /// variables fall back to defaults.
    #[must_use]
    pub fn from_vars<I, K, V>(working_dir: &Path, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut settings = Self {
            schema_dir: working_dir.to_path_buf(),
            ..Self::default()
        };

        for (key, value) in vars {
            let (key, value) = (key.into(), value.into());
            match key.as_str() {
                ENV_DEBUG => settings.debug = value.eq_ignore_ascii_case("true"),
                ENV_MY_APP_URL => settings.base_url = value,
                ENV_JSON_SCHEMA_DIR => settings.schema_dir = working_dir.join(value),
                _ => {
                    if let Some(name) = key.strip_prefix(ENV_VAR_PREFIX).filter(|n| !n.is_empty()) {
                        settings.bootstrap.insert(name.to_string(), value);
                    }
                }
            }
        }

        settings
    }
}

fn read_dotenv(path: &Path) -> ApplicationResult<Vec<(String, String)>> {
    let invalid = |e: dotenvy::Error| ApplicationError::Configuration(format!("cannot load {}: {e}", path.display()));
    let vars = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.collect::<Result<Vec<_>, _>>().map_err(invalid)?,
        Err(e) if e.not_found() => return Ok(Vec::new()),
        Err(e) => return Err(invalid(e)),
    };
    tracing::debug!(path = %path.display(), count = vars.len(), "Loaded dotenv file");
    Ok(vars)
}
