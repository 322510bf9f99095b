//! Quiz session state machine.
//!
//! The session is a plain value; [`QuizSession::reduce`] consumes it together
//! with one [`QuizAction`] and returns the next session, so every transition
//! can be exercised without a UI or a backend.

use std::collections::BTreeMap;

use shared::domain::QuizQuestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No questions loaded.
    Empty,
    /// A generation request is outstanding.
    Loading,
    /// Questions loaded, nothing answered yet.
    Ready,
    InProgress,
    /// Every question has an answer but the quiz is not scored yet.
    Complete,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizAction {
    GenerationStarted,
    GenerationSucceeded(Vec<QuizQuestion>),
    GenerationFailed,
    SelectAnswer { index: usize, choice: String },
    ToggleExplanation { index: usize },
    Navigate(Direction),
    Submit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    selected_answers: BTreeMap<usize, String>,
    explanation_visible: BTreeMap<usize, bool>,
    submitted: bool,
    score: Option<usize>,
    generating: bool,
}

impl QuizSession {
    pub fn with_questions(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn reduce(mut self, action: QuizAction) -> Self {
        match action {
            QuizAction::GenerationStarted => {
                // Old questions stay visible under the loading gate; all
                // per-question progress is dropped immediately.
                self.clear_progress();
                self.generating = true;
                self
            }
            QuizAction::GenerationSucceeded(questions) => Self::with_questions(questions),
            QuizAction::GenerationFailed => Self::default(),
            QuizAction::SelectAnswer { index, choice } => {
                if self.submitted || self.generating || index >= self.questions.len() {
                    return self;
                }
                self.selected_answers.insert(index, choice);
                self
            }
            QuizAction::ToggleExplanation { index } => {
                if index < self.questions.len() {
                    let visible = self.explanation_visible.entry(index).or_insert(false);
                    *visible = !*visible;
                }
                self
            }
            QuizAction::Navigate(direction) => {
                let last = self.questions.len().saturating_sub(1);
                self.current_index = match direction {
                    Direction::Previous => self.current_index.saturating_sub(1),
                    Direction::Next => (self.current_index + 1).min(last),
                };
                self
            }
            QuizAction::Submit => {
                if self.questions.is_empty() || self.generating {
                    return self;
                }
                let score = self
                    .questions
                    .iter()
                    .enumerate()
                    .filter(|(index, question)| {
                        self.selected_answers
                            .get(index)
                            .is_some_and(|choice| question.is_correct(choice))
                    })
                    .count();
                self.score = Some(score);
                self.submitted = true;
                self.explanation_visible = (0..self.questions.len()).map(|i| (i, true)).collect();
                self
            }
        }
    }

    fn clear_progress(&mut self) {
        self.current_index = 0;
        self.selected_answers.clear();
        self.explanation_visible.clear();
        self.submitted = false;
        self.score = None;
    }

    pub fn phase(&self) -> QuizPhase {
        if self.generating {
            QuizPhase::Loading
        } else if self.questions.is_empty() {
            QuizPhase::Empty
        } else if self.submitted {
            QuizPhase::Submitted
        } else if self.is_complete() {
            QuizPhase::Complete
        } else if self.selected_answers.is_empty() {
            QuizPhase::Ready
        } else {
            QuizPhase::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty()
            && (0..self.questions.len()).all(|index| self.selected_answers.contains_key(&index))
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        !self.questions.is_empty() && self.current_index == self.questions.len() - 1
    }

    pub fn selected_answer(&self, index: usize) -> Option<&str> {
        self.selected_answers.get(&index).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.selected_answers.len()
    }

    pub fn is_explanation_visible(&self, index: usize) -> bool {
        self.explanation_visible.get(&index).copied().unwrap_or(false)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn score(&self) -> Option<usize> {
        self.score
    }

    /// Score as a whole percentage of the question count.
    pub fn score_percent(&self) -> Option<u32> {
        let score = self.score?;
        if self.questions.is_empty() {
            return None;
        }
        Some(((score as f64 / self.questions.len() as f64) * 100.0).round() as u32)
    }

    pub fn progress_label(&self) -> Option<String> {
        (!self.questions.is_empty())
            .then(|| format!("Question {} of {}", self.current_index + 1, self.questions.len()))
    }

    /// Whether the view should offer the submit affordance right now.
    pub fn can_submit(&self) -> bool {
        self.is_last() && self.is_complete() && !self.submitted && !self.generating
    }
}

#[cfg(test)]
#[path = "tests/quiz_tests.rs"]
mod tests;
