//! Shape validation for the quiz endpoint's response body.

use serde_json::Value;
use shared::domain::QuizQuestion;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizPayloadError {
    #[error("Server returned invalid quiz data format")]
    NotAnArray,
    #[error("Invalid quiz question format received from server")]
    MalformedQuestion { index: usize, reason: String },
}

/// Accepts only a JSON array whose every element is an object carrying all
/// question fields with the right types. One bad element rejects the batch.
pub fn parse_quiz_payload(payload: Value) -> Result<Vec<QuizQuestion>, QuizPayloadError> {
    let Value::Array(elements) = payload else {
        return Err(QuizPayloadError::NotAnArray);
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if !element.is_object() {
                return Err(QuizPayloadError::MalformedQuestion {
                    index,
                    reason: "element is not an object".to_string(),
                });
            }
            serde_json::from_value::<QuizQuestion>(element).map_err(|err| {
                QuizPayloadError::MalformedQuestion {
                    index,
                    reason: err.to_string(),
                }
            })
        })
        .collect()
}
