//! Backend-to-UI events and error modeling for the desktop controller.

use client_core::ClientError;
use shared::{domain::QuizQuestion, protocol::UploadSummary};

use crate::controller::reducer::RequestTag;

pub enum UiEvent {
    Error(UiError),
    UploadFinished {
        tag: RequestTag,
        result: Result<UploadSummary, UiError>,
    },
    QueryFinished {
        tag: RequestTag,
        result: Result<String, UiError>,
    },
    QuizFinished {
        tag: RequestTag,
        result: Result<Vec<QuizQuestion>, UiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Backend,
    Validation,
    LocalFile,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Upload,
    Query,
    Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport { .. } => UiErrorCategory::Transport,
            ClientError::Status { .. } | ClientError::Rejected { .. } => UiErrorCategory::Backend,
            ClientError::InvalidPayload { .. } => UiErrorCategory::Validation,
            ClientError::File { .. } => UiErrorCategory::LocalFile,
        };
        Self {
            category,
            context,
            message: err.user_message(),
        }
    }

    /// Failure of the backend worker itself, before any request ran.
    pub fn worker_startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context: UiErrorContext::BackendStartup,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Backend => "Backend",
        UiErrorCategory::Validation => "Invalid response",
        UiErrorCategory::LocalFile => "File",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use client_core::Endpoint;

    use super::*;

    #[test]
    fn client_errors_map_to_categories_and_keep_user_message() {
        let status = ClientError::Status {
            endpoint: Endpoint::Upload,
            status: 400,
            message: "bad pdf".to_string(),
        };
        let err = UiError::from_client_error(UiErrorContext::Upload, &status);
        assert_eq!(err.category(), UiErrorCategory::Backend);
        assert_eq!(err.context(), UiErrorContext::Upload);
        assert_eq!(err.message(), "bad pdf");

        let invalid = ClientError::InvalidPayload {
            endpoint: Endpoint::Quiz,
            reason: "Server returned invalid quiz data format".to_string(),
        };
        let err = UiError::from_client_error(UiErrorContext::Quiz, &invalid);
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err_label(err.category()), "Invalid response");

        let file = ClientError::File {
            path: PathBuf::from("notes.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let err = UiError::from_client_error(UiErrorContext::Upload, &file);
        assert_eq!(err.category(), UiErrorCategory::LocalFile);
    }

    #[test]
    fn worker_startup_errors_are_unexpected() {
        let err = UiError::worker_startup("failed to build runtime");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
        assert_eq!(err_label(err.category()), "Unexpected");
    }
}
