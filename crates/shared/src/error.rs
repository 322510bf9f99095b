use serde::{Deserialize, Serialize};

/// `detail` as the backend emits it: either a bare string or an object with
/// its own `status`/`message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Structured {
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

/// Body of a non-2xx response. Every field is optional; anything the client
/// cannot interpret collapses to the caller's generic fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendErrorBody {
    /// Nested `detail.message` or a string `detail`, whichever is present.
    pub fn detail_message(&self) -> Option<&str> {
        match self.detail.as_ref()? {
            ErrorDetail::Text(text) => non_empty(text),
            ErrorDetail::Structured { message, .. } => message.as_deref().and_then(non_empty),
        }
    }

    /// Only the nested `detail.message`; a string `detail` is ignored.
    pub fn structured_detail_message(&self) -> Option<&str> {
        match self.detail.as_ref()? {
            ErrorDetail::Text(_) => None,
            ErrorDetail::Structured { message, .. } => message.as_deref().and_then(non_empty),
        }
    }
}

fn non_empty(text: &str) -> Option<&str> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
