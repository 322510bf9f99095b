use std::path::PathBuf;

use client_core::{ClientError, Endpoint, QuizPhase};
use shared::domain::QuizQuestion;

use super::*;
use crate::controller::events::{UiError, UiErrorContext};

fn question(text: &str, answer: &str) -> QuizQuestion {
    QuizQuestion {
        status: "success".to_string(),
        question_type: "mc".to_string(),
        question: text.to_string(),
        choices: vec!["A".to_string(), "B".to_string()],
        answer: answer.to_string(),
        explanation: format!("{answer} is right"),
    }
}

fn backend_error(message: &str) -> UiError {
    let err = ClientError::Status {
        endpoint: Endpoint::Prompt,
        status: 500,
        message: message.to_string(),
    };
    UiError::from_client_error(UiErrorContext::Query, &err)
}

fn expect_tag(command: Option<BackendCommand>) -> RequestTag {
    command.expect("command dispatched").tag()
}

#[test]
fn upload_without_selected_file_is_a_no_op() {
    let mut state = AppState::default();
    assert!(!state.can_submit_upload());
    assert!(state.apply(UiAction::SubmitUpload).is_none());
    assert!(!state.is_loading());
}

#[test]
fn upload_dispatches_selected_path_and_gates_further_uploads() {
    let mut state = AppState::default();
    state.apply(UiAction::SelectFile(PathBuf::from("/tmp/notes.pdf")));
    assert!(state.can_submit_upload());

    let command = state.apply(UiAction::SubmitUpload);
    match &command {
        Some(BackendCommand::UploadDocument { path, tag }) => {
            assert_eq!(path, &PathBuf::from("/tmp/notes.pdf"));
            assert_eq!(tag.operation, Operation::Upload);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(state.is_loading());
    assert!(state.is_outstanding(Operation::Upload));
    assert!(!state.can_submit_upload());
    assert!(state.apply(UiAction::SubmitUpload).is_none());
}

#[test]
fn upload_success_records_summary_and_clears_loading() {
    let mut state = AppState::default();
    state.apply(UiAction::SelectFile(PathBuf::from("notes.pdf")));
    let tag = expect_tag(state.apply(UiAction::SubmitUpload));

    state.apply_event(UiEvent::UploadFinished {
        tag,
        result: Ok(UploadSummary {
            file_name: "notes.pdf".to_string(),
            message: "File processed successfully".to_string(),
            splits: 12,
        }),
    });

    assert!(!state.is_loading());
    assert_eq!(state.status, "File processed successfully (12 sections processed)");
    assert_eq!(
        state.last_upload.as_ref().map(|s| s.file_name.as_str()),
        Some("notes.pdf")
    );
    assert!(state.alert.is_none());
}

#[test]
fn upload_failure_raises_alert_until_dismissed() {
    let mut state = AppState::default();
    state.apply(UiAction::SelectFile(PathBuf::from("notes.pdf")));
    let tag = expect_tag(state.apply(UiAction::SubmitUpload));

    state.apply_event(UiEvent::UploadFinished {
        tag,
        result: Err(backend_error("bad pdf")),
    });

    assert!(!state.is_loading());
    assert_eq!(state.alert.as_deref(), Some("bad pdf"));
    assert!(state.last_upload.is_none());

    state.apply(UiAction::DismissAlert);
    assert!(state.alert.is_none());
}

#[test]
fn blank_query_is_not_sent() {
    let mut state = AppState::default();
    state.apply(UiAction::EditQuery("   \n".to_string()));
    assert!(!state.can_submit_query());
    assert!(state.apply(UiAction::SubmitQuery).is_none());
    assert!(!state.is_loading());
}

#[test]
fn query_sends_untrimmed_prompt_and_shows_response() {
    let mut state = AppState::default();
    state.apply(UiAction::EditQuery("  What is photosynthesis?".to_string()));

    let command = state.apply(UiAction::SubmitQuery);
    let tag = match command {
        Some(BackendCommand::Ask { tag, prompt }) => {
            assert_eq!(prompt, "  What is photosynthesis?");
            tag
        }
        other => panic!("unexpected command: {other:?}"),
    };
    assert!(state.is_loading());

    state.apply_event(UiEvent::QueryFinished {
        tag,
        result: Ok("Light to chemical energy.".to_string()),
    });
    assert!(!state.is_loading());
    assert_eq!(state.response.as_deref(), Some("Light to chemical energy."));
}

#[test]
fn query_failure_is_rendered_inline() {
    let mut state = AppState::default();
    state.apply(UiAction::EditQuery("Explain".to_string()));
    let tag = expect_tag(state.apply(UiAction::SubmitQuery));

    state.apply_event(UiEvent::QueryFinished {
        tag,
        result: Err(backend_error("Unknown error occurred")),
    });
    assert_eq!(
        state.response.as_deref(),
        Some("Error processing query: Unknown error occurred")
    );
    assert!(state.alert.is_none());
    assert!(state.status_banner.is_none());
}

#[test]
fn quiz_generation_then_submit_reports_score() {
    let mut state = AppState::default();
    let tag = expect_tag(state.apply(UiAction::GenerateQuiz));
    assert_eq!(state.quiz.phase(), QuizPhase::Loading);

    state.apply_event(UiEvent::QuizFinished {
        tag,
        result: Ok(vec![question("Q1", "A"), question("Q2", "B")]),
    });
    assert!(!state.is_loading());
    assert_eq!(state.quiz.phase(), QuizPhase::Ready);

    state.apply(UiAction::SelectAnswer {
        index: 0,
        choice: "A".to_string(),
    });
    state.apply(UiAction::Navigate(Direction::Next));
    state.apply(UiAction::SelectAnswer {
        index: 1,
        choice: "A".to_string(),
    });
    state.apply(UiAction::SubmitQuiz);

    assert_eq!(state.quiz.phase(), QuizPhase::Submitted);
    assert_eq!(state.quiz.score(), Some(1));
    assert_eq!(state.status, "Quiz submitted: 1/2 (50%)");
}

#[test]
fn stale_quiz_result_is_dropped_after_regeneration() {
    let mut state = AppState::default();
    let first = expect_tag(state.apply(UiAction::GenerateQuiz));
    let second = expect_tag(state.apply(UiAction::GenerateQuiz));
    assert!(second.seq > first.seq);

    state.apply_event(UiEvent::QuizFinished {
        tag: first,
        result: Ok(vec![question("stale", "A")]),
    });
    assert!(state.is_loading());
    assert!(state.quiz.is_empty());

    state.apply_event(UiEvent::QuizFinished {
        tag: second,
        result: Ok(vec![question("fresh", "B")]),
    });
    assert!(!state.is_loading());
    assert_eq!(state.quiz.questions()[0].question, "fresh");
}

#[test]
fn quiz_failure_empties_quiz_and_shows_banner() {
    let mut state = AppState::default();
    let tag = expect_tag(state.apply(UiAction::GenerateQuiz));

    state.apply_event(UiEvent::QuizFinished {
        tag,
        result: Err(backend_error("Server returned invalid quiz data format")),
    });

    assert!(!state.is_loading());
    assert_eq!(state.quiz.phase(), QuizPhase::Empty);
    assert_eq!(
        state.status_banner.as_ref().map(|b| b.message.as_str()),
        Some("Server returned invalid quiz data format")
    );

    state.apply(UiAction::DismissBanner);
    assert!(state.status_banner.is_none());
}

#[test]
fn loading_stays_set_until_every_request_settles() {
    let mut state = AppState::default();
    state.apply(UiAction::EditQuery("q".to_string()));
    let query = expect_tag(state.apply(UiAction::SubmitQuery));
    let quiz = expect_tag(state.apply(UiAction::GenerateQuiz));

    state.apply_event(UiEvent::QueryFinished {
        tag: query,
        result: Ok("a".to_string()),
    });
    assert!(state.is_loading());

    state.apply_event(UiEvent::QuizFinished {
        tag: quiz,
        result: Ok(vec![question("Q1", "A")]),
    });
    assert!(!state.is_loading());
}

#[test]
fn abandoned_request_releases_loading_gate() {
    let mut state = AppState::default();
    let tag = expect_tag(state.apply(UiAction::GenerateQuiz));

    state.abandon(tag, "UI command queue is full; please retry");

    assert!(!state.is_loading());
    assert_eq!(state.quiz.phase(), QuizPhase::Empty);
    assert_eq!(state.status, "UI command queue is full; please retry");
    assert!(state.status_banner.is_some());
}

#[test]
fn worker_error_event_sets_banner_with_category_label() {
    let mut state = AppState::default();
    let err = UiError::worker_startup("backend worker startup failure: failed to build runtime");

    state.apply_event(UiEvent::Error(err));
    assert_eq!(
        state.status,
        "Unexpected error: backend worker startup failure: failed to build runtime"
    );
    assert!(state.status_banner.is_some());
}
