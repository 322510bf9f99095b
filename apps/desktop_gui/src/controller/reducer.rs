//! Reducer-style application state: UI actions and backend events in, state
//! transitions and backend commands out.

use std::{collections::BTreeMap, path::PathBuf};

use client_core::{Direction, QuizAction, QuizSession};
use shared::protocol::UploadSummary;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Upload,
    Query,
    Quiz,
}

/// Identifies one dispatched request. Sequence numbers increase across all
/// operations for the lifetime of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub operation: Operation,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SelectFile(PathBuf),
    SubmitUpload,
    EditQuery(String),
    SubmitQuery,
    GenerateQuiz,
    SelectAnswer { index: usize, choice: String },
    ToggleExplanation { index: usize },
    Navigate(Direction),
    SubmitQuiz,
    DismissAlert,
    DismissBanner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub selected_file: Option<PathBuf>,
    pub last_upload: Option<UploadSummary>,
    pub query_input: String,
    /// Text of the response panel: the backend answer or the inline error.
    pub response: Option<String>,
    pub quiz: QuizSession,
    /// Modal message that must be acknowledged (upload failures).
    pub alert: Option<String>,
    pub status: String,
    pub status_banner: Option<StatusBanner>,
    outstanding: BTreeMap<Operation, u64>,
    next_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_file: None,
            last_upload: None,
            query_input: String::new(),
            response: None,
            quiz: QuizSession::default(),
            alert: None,
            status: "Upload your study material to begin".to_string(),
            status_banner: None,
            outstanding: BTreeMap::new(),
            next_seq: 1,
        }
    }
}

impl AppState {
    /// The loading gate: true while any request is outstanding.
    pub fn is_loading(&self) -> bool {
        !self.outstanding.is_empty()
    }

    pub fn is_outstanding(&self, operation: Operation) -> bool {
        self.outstanding.contains_key(&operation)
    }

    pub fn can_submit_upload(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading()
    }

    pub fn can_submit_query(&self) -> bool {
        !self.query_input.trim().is_empty() && !self.is_loading()
    }

    pub fn apply(&mut self, action: UiAction) -> Option<BackendCommand> {
        match action {
            UiAction::SelectFile(path) => {
                self.status = format!("Selected {}", display_name(&path));
                self.selected_file = Some(path);
                None
            }
            UiAction::SubmitUpload => {
                let path = self.selected_file.clone()?;
                if self.is_loading() {
                    return None;
                }
                let tag = self.begin(Operation::Upload);
                self.status = format!("Uploading {}", display_name(&path));
                Some(BackendCommand::UploadDocument { tag, path })
            }
            UiAction::EditQuery(text) => {
                self.query_input = text;
                None
            }
            UiAction::SubmitQuery => {
                if self.query_input.trim().is_empty() {
                    return None;
                }
                let tag = self.begin(Operation::Query);
                self.status = "Asking the backend".to_string();
                Some(BackendCommand::Ask {
                    tag,
                    prompt: self.query_input.clone(),
                })
            }
            UiAction::GenerateQuiz => {
                let tag = self.begin(Operation::Quiz);
                self.quiz = std::mem::take(&mut self.quiz).reduce(QuizAction::GenerationStarted);
                self.status = "Generating quiz".to_string();
                Some(BackendCommand::GenerateQuiz { tag })
            }
            UiAction::SelectAnswer { index, choice } => {
                self.reduce_quiz(QuizAction::SelectAnswer { index, choice });
                None
            }
            UiAction::ToggleExplanation { index } => {
                self.reduce_quiz(QuizAction::ToggleExplanation { index });
                None
            }
            UiAction::Navigate(direction) => {
                self.reduce_quiz(QuizAction::Navigate(direction));
                None
            }
            UiAction::SubmitQuiz => {
                self.reduce_quiz(QuizAction::Submit);
                if let (Some(score), Some(percent)) = (self.quiz.score(), self.quiz.score_percent()) {
                    self.status = format!("Quiz submitted: {score}/{} ({percent}%)", self.quiz.len());
                }
                None
            }
            UiAction::DismissAlert => {
                self.alert = None;
                None
            }
            UiAction::DismissBanner => {
                self.status_banner = None;
                None
            }
        }
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Error(err) => {
                tracing::warn!(context = ?err.context(), "backend worker error: {}", err.message());
                self.status = format!("{} error: {}", err_label(err.category()), err.message());
                self.show_banner(err.message().to_string());
            }
            UiEvent::UploadFinished { tag, result } => {
                if !self.settle(tag) {
                    return;
                }
                match result {
                    Ok(summary) => {
                        self.status = format!(
                            "{} ({} sections processed)",
                            non_empty_or(&summary.message, "Document uploaded"),
                            summary.splits
                        );
                        self.last_upload = Some(summary);
                    }
                    Err(err) => {
                        self.status = format!("Upload failed: {}", err.message());
                        self.alert = Some(err.message().to_string());
                    }
                }
            }
            UiEvent::QueryFinished { tag, result } => {
                if !self.settle(tag) {
                    return;
                }
                match result {
                    Ok(text) => {
                        self.status = "Response received".to_string();
                        self.response = Some(text);
                    }
                    Err(err) => {
                        self.status = format!("Query failed: {}", err.message());
                        self.response = Some(format!("Error processing query: {}", err.message()));
                    }
                }
            }
            UiEvent::QuizFinished { tag, result } => {
                if !self.settle(tag) {
                    return;
                }
                match result {
                    Ok(questions) => {
                        self.status = format!("Quiz ready: {} questions", questions.len());
                        self.reduce_quiz(QuizAction::GenerationSucceeded(questions));
                    }
                    Err(err) => {
                        self.reduce_quiz(QuizAction::GenerationFailed);
                        self.status = format!("Quiz generation failed: {}", err.message());
                        self.show_banner(err.message().to_string());
                    }
                }
            }
        }
    }

    /// Releases a request that never reached the backend worker.
    pub fn abandon(&mut self, tag: RequestTag, reason: &str) {
        if !self.settle(tag) {
            return;
        }
        if tag.operation == Operation::Quiz {
            self.reduce_quiz(QuizAction::GenerationFailed);
        }
        self.status = reason.to_string();
        self.show_banner(reason.to_string());
    }

    fn begin(&mut self, operation: Operation) -> RequestTag {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(previous) = self.outstanding.insert(operation, seq) {
            tracing::debug!(?operation, previous, seq, "superseding outstanding request");
        }
        RequestTag { operation, seq }
    }

    /// Clears the outstanding entry for `tag`. Returns false when a newer
    /// request for the same operation has been dispatched since.
    fn settle(&mut self, tag: RequestTag) -> bool {
        if self.outstanding.get(&tag.operation) == Some(&tag.seq) {
            self.outstanding.remove(&tag.operation);
            true
        } else {
            tracing::debug!(operation = ?tag.operation, seq = tag.seq, "dropping stale result");
            false
        }
    }

    fn reduce_quiz(&mut self, action: QuizAction) {
        self.quiz = std::mem::take(&mut self.quiz).reduce(action);
    }

    fn show_banner(&mut self, message: String) {
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message,
        });
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn non_empty_or<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.is_empty() {
        fallback
    } else {
        text
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
