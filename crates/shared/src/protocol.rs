use serde::{Deserialize, Serialize};

use crate::domain::SUCCESS_STATUS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub splits: Option<u64>,
}

impl UploadResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// What the client keeps from an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub file_name: String,
    pub message: String,
    pub splits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl PromptResponse {
    /// `response` wins over `message`; an empty value counts as absent.
    pub fn display_text(&self) -> String {
        [self.response.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_success_requires_exact_status() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"status":"success","message":"ok","splits":3}"#)
                .expect("upload response");
        assert!(ok.is_success());
        assert_eq!(ok.splits, Some(3));

        let other: UploadResponse =
            serde_json::from_str(r#"{"status":"Success"}"#).expect("upload response");
        assert!(!other.is_success());
        assert_eq!(other.message, None);
    }

    #[test]
    fn prompt_display_prefers_response_over_message() {
        let both = PromptResponse {
            response: Some("answer".to_string()),
            message: Some("note".to_string()),
            ..PromptResponse::default()
        };
        assert_eq!(both.display_text(), "answer");

        let empty_response = PromptResponse {
            response: Some(String::new()),
            message: Some("note".to_string()),
            ..PromptResponse::default()
        };
        assert_eq!(empty_response.display_text(), "note");

        assert_eq!(PromptResponse::default().display_text(), "");
    }
}
