use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;

use crate::endpoint::{BackendEndpoint, EndpointError};

pub const DEFAULT_CONFIG_FILE: &str = "recall.toml";
pub const BACKEND_URL_ENV: &str = "RECALL_BACKEND_URL";
pub const ENVIRONMENT_ENV: &str = "RECALL_ENV";
pub const HOSTING_ENVIRONMENT_ENV: &str = "VERCEL_ENV";
pub const PRODUCTION_BACKEND_URL: &str = "https://recall-ai-app.vercel.app/api";
pub const LOCAL_BACKEND_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployEnvironment {
    Production,
    Local,
}

impl DeployEnvironment {
    fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Local
        }
    }

    pub fn default_backend_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BACKEND_URL,
            Self::Local => LOCAL_BACKEND_URL,
        }
    }
}

/// Contents of `recall.toml`. Both keys are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

/// Reads `path` if it exists. A missing file yields defaults; an unreadable
/// or malformed file is an error.
pub fn load_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FileSettings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
    };

    toml::from_str(&raw).with_context(|| format!("failed to parse '{}'", path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendUrlSource {
    CommandLine,
    Environment,
    ConfigFile,
    Default(DeployEnvironment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBackend {
    pub endpoint: BackendEndpoint,
    pub source: BackendUrlSource,
}

/// Picks the backend base URL. First match wins:
/// command line, `RECALL_BACKEND_URL`, `backend_url` in the config file,
/// then the default for the deploy environment.
pub fn resolve_backend(
    cli_override: Option<&str>,
    file: &FileSettings,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedBackend, EndpointError> {
    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let explicit = non_blank(cli_override.map(str::to_string))
        .map(|url| (url, BackendUrlSource::CommandLine))
        .or_else(|| non_blank(env(BACKEND_URL_ENV)).map(|url| (url, BackendUrlSource::Environment)))
        .or_else(|| non_blank(file.backend_url.clone()).map(|url| (url, BackendUrlSource::ConfigFile)));

    let (raw, source) = match explicit {
        Some(found) => found,
        None => {
            let environment = deploy_environment(file, &env);
            (
                environment.default_backend_url().to_string(),
                BackendUrlSource::Default(environment),
            )
        }
    };

    Ok(ResolvedBackend {
        endpoint: BackendEndpoint::parse(&raw)?,
        source,
    })
}

/// Same as [`resolve_backend`] reading the process environment.
pub fn resolve_backend_from_process(
    cli_override: Option<&str>,
    file: &FileSettings,
) -> Result<ResolvedBackend, EndpointError> {
    resolve_backend(cli_override, file, |name| std::env::var(name).ok())
}

fn deploy_environment(file: &FileSettings, env: &impl Fn(&str) -> Option<String>) -> DeployEnvironment {
    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    non_blank(env(ENVIRONMENT_ENV))
        .or_else(|| non_blank(env(HOSTING_ENVIRONMENT_ENV)))
        .or_else(|| non_blank(file.environment.clone()))
        .map(|label| DeployEnvironment::from_label(&label))
        .unwrap_or(DeployEnvironment::Local)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
