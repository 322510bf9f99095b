//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

use crate::controller::reducer::RequestTag;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    UploadDocument { tag: RequestTag, path: PathBuf },
    Ask { tag: RequestTag, prompt: String },
    GenerateQuiz { tag: RequestTag },
}

impl BackendCommand {
    pub fn tag(&self) -> RequestTag {
        match self {
            Self::UploadDocument { tag, .. } | Self::Ask { tag, .. } | Self::GenerateQuiz { tag } => {
                *tag
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::UploadDocument { .. } => "upload_document",
            Self::Ask { .. } => "ask",
            Self::GenerateQuiz { .. } => "generate_quiz",
        }
    }
}
