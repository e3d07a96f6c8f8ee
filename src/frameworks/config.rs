use serde::Deserialize;
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::interface_adapters::clients::DEFAULT_BASE_URL;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// Optional TOML settings file; environment variables override it.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey => {
                write!(f, "AIRTABLE_API_KEY must be set (env or config file)")
            }
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// Loads settings from the optional file (flag or AIRTABLE_CONFIG) and the environment.
pub fn load(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = config_path
        .map(Path::to_path_buf)
        .or_else(|| env::var_os("AIRTABLE_CONFIG").map(PathBuf::from));

    let file = match path {
        Some(path) => read_settings_file(&path)?,
        None => FileSettings::default(),
    };

    resolve(file, |key| env::var(key).ok())
}

pub fn read_settings_file(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve(
    file: FileSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    // A blank env var (e.g. `AIRTABLE_API_KEY=` in .env) counts as unset.
    let api_key = non_blank(lookup("AIRTABLE_API_KEY"))
        .or_else(|| non_blank(file.api_key))
        .ok_or(ConfigError::MissingApiKey)?;

    let base_url = non_blank(lookup("AIRTABLE_BASE_URL"))
        .or_else(|| non_blank(file.base_url))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Zero would time out every request; treat it like an unparsable value.
    let millis = lookup("AIRTABLE_TIMEOUT_MS")
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .or(file.timeout_ms.filter(|millis| *millis > 0))
        .unwrap_or(DEFAULT_TIMEOUT_MS);

    Ok(Settings {
        api_key,
        base_url,
        timeout: Duration::from_millis(millis),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
