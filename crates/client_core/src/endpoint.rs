use std::fmt;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("backend url is empty")]
    Empty,
    #[error("backend url '{raw}' is not a valid absolute url: {source}")]
    Invalid {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend url '{raw}' must use http or https, not '{scheme}'")]
    UnsupportedScheme { raw: String, scheme: String },
}

/// The three operations the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Upload,
    Prompt,
    Quiz,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Upload => "/upload",
            Self::Prompt => "/prompt",
            Self::Quiz => "/quiz",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Validated backend origin (plus optional path prefix such as `/api`),
/// stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoint {
    base: String,
}

impl BackendEndpoint {
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EndpointError::Empty);
        }

        let parsed = Url::parse(trimmed).map_err(|source| EndpointError::Invalid {
            raw: trimmed.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme {
                raw: trimmed.to_string(),
                scheme: parsed.scheme().to_string(),
            });
        }

        Ok(Self {
            base: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base, endpoint.path())
    }

    pub fn is_local(&self) -> bool {
        Url::parse(&self.base)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
            .map(|host| host == "localhost" || host == "127.0.0.1" || host == "[::1]")
            .unwrap_or(false)
    }
}

impl fmt::Display for BackendEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
