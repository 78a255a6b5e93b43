use crate::error::{ApiError, ApiResult};
use rtf_model::RestConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI settings. A TOML file looks like:
///
/// ```toml
/// serialize_require = true
///
/// [rest]
/// base_url = "https://host/Relativity.REST/api"
/// timeout = 30
/// username = "admin"
/// password = "secret"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rest: RestConfig,
    /// Serialise concurrent name-based requires within this process.
    pub serialize_require: bool,
}

impl Settings {
    /// Reads `path` when given, otherwise the `RTF_*` environment variables.
    pub fn load(path: Option<&Path>) -> ApiResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self {
                rest: RestConfig::from_env().map_err(ApiError::validation)?,
                ..Self::default()
            }),
        }
    }

    pub fn from_file(path: &Path) -> ApiResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            ApiError::validation(format!("cannot read {}: {}", path.display(), err))
        })?;
        let settings: Settings = toml::from_str(&contents).map_err(|err| {
            ApiError::validation(format!("invalid settings in {}: {}", path.display(), err))
        })?;
        settings.rest.validate().map_err(ApiError::validation)?;
        Ok(settings)
    }
}
