use serde::{Deserialize, Serialize};

/// Status value the backend stamps on every generated question and on a
/// successful upload.
pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    Other,
}

impl QuestionKind {
    pub fn from_wire(question_type: &str) -> Self {
        match question_type {
            "mc" => Self::MultipleChoice,
            "truefalse" => Self::TrueFalse,
            _ => Self::Other,
        }
    }
}

/// One generated question exactly as the quiz endpoint returns it.
///
/// `answer` is expected to equal one of `choices`; the backend owns that
/// contract and the client never checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub status: String,
    pub question_type: String,
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn kind(&self) -> QuestionKind {
        QuestionKind::from_wire(&self.question_type)
    }

    pub fn kind_label(&self) -> &str {
        match self.kind() {
            QuestionKind::MultipleChoice => "Multiple choice",
            QuestionKind::TrueFalse => "True or false",
            QuestionKind::Other => &self.question_type,
        }
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(question_type: &str) -> QuizQuestion {
        QuizQuestion {
            status: SUCCESS_STATUS.to_string(),
            question_type: question_type.to_string(),
            question: "Is the sky blue?".to_string(),
            choices: vec!["True".to_string(), "False".to_string()],
            answer: "True".to_string(),
            explanation: "Rayleigh scattering.".to_string(),
        }
    }

    #[test]
    fn labels_known_and_unknown_question_types() {
        assert_eq!(question("mc").kind_label(), "Multiple choice");
        assert_eq!(question("truefalse").kind_label(), "True or false");
        assert_eq!(question("short_answer").kind_label(), "short_answer");
    }

    #[test]
    fn correctness_is_exact_string_equality() {
        let q = question("truefalse");
        assert!(q.is_correct("True"));
        assert!(!q.is_correct("true"));
        assert!(!q.is_correct("True "));
    }
}
