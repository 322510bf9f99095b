//! Panel renderers. Each reads `AppState` and pushes `UiAction`s; none of
//! them mutate state directly.

use client_core::{Direction, QuizPhase, QuizSession};
use eframe::egui;

use crate::controller::reducer::{AppState, Operation, StatusBannerSeverity, UiAction};
use crate::ui::{markdown, theme::StudyPalette};

pub fn upload_sidebar(ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    ui.heading("Study material");
    ui.add_space(6.0);

    if ui
        .add_enabled(!state.is_loading(), egui::Button::new("Choose PDF..."))
        .clicked()
    {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()
        {
            actions.push(UiAction::SelectFile(path));
        }
    }

    match state.selected_file.as_ref().and_then(|p| p.file_name()) {
        Some(name) => {
            ui.label(egui::RichText::new(name.to_string_lossy()).strong());
        }
        None => {
            ui.weak("No file selected");
        }
    }

    ui.add_space(6.0);
    let upload_label = if state.is_outstanding(Operation::Upload) {
        "Uploading..."
    } else {
        "Upload"
    };
    if ui
        .add_enabled(state.can_submit_upload(), egui::Button::new(upload_label))
        .clicked()
    {
        actions.push(UiAction::SubmitUpload);
    }

    if let Some(summary) = &state.last_upload {
        ui.add_space(12.0);
        ui.separator();
        ui.label(egui::RichText::new("Last upload").strong());
        ui.label(&summary.file_name);
        if !summary.message.is_empty() {
            ui.weak(&summary.message);
        }
        ui.weak(format!("{} sections indexed", summary.splits));
    }
}

pub fn status_banner(ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    let Some(banner) = &state.status_banner else {
        return;
    };
    let (fill, stroke) = match banner.severity {
        StatusBannerSeverity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
    };

    egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        actions.push(UiAction::DismissBanner);
                    }
                });
            });
        });
    ui.add_space(8.0);
}

pub fn query_panel(ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    ui.heading("Ask a question");
    ui.add_space(4.0);

    let mut query_buf = state.query_input.clone();
    let response = ui.add_enabled(
        !state.is_loading(),
        egui::TextEdit::multiline(&mut query_buf)
            .id_salt("query_input")
            .hint_text("Ask anything about your uploaded material")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        actions.push(UiAction::EditQuery(query_buf));
    }

    let submit_with_keyboard = response.has_focus()
        && ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.command);
    let ask_clicked = ui
        .add_enabled(state.can_submit_query(), egui::Button::new("Ask"))
        .clicked();
    if ask_clicked || (submit_with_keyboard && state.can_submit_query()) {
        actions.push(UiAction::SubmitQuery);
    }
}

/// The correct answer and explanation for `index`, once the quiz is
/// submitted and that question's explanation is toggled on.
pub fn revealed_answer(quiz: &QuizSession, index: usize) -> Option<(String, &str)> {
    if !quiz.is_submitted() || !quiz.is_explanation_visible(index) {
        return None;
    }
    let question = quiz.questions().get(index)?;
    Some((
        format!("Correct Answer: {}", question.answer),
        question.explanation.as_str(),
    ))
}

pub fn response_panel(ui: &mut egui::Ui, state: &AppState, palette: StudyPalette) {
    let Some(text) = &state.response else {
        return;
    };
    ui.add_space(8.0);
    egui::Frame::new()
        .fill(palette.card_background)
        .corner_radius(10)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Response").strong());
            ui.add_space(4.0);
            markdown::render_markdown(ui, text);
        });
}

pub fn quiz_panel(
    ui: &mut egui::Ui,
    state: &AppState,
    palette: StudyPalette,
    actions: &mut Vec<UiAction>,
) {
    let quiz = &state.quiz;
    ui.horizontal(|ui| {
        ui.heading("Quiz");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if quiz.is_empty() {
                "Generate Quiz"
            } else {
                "New Quiz"
            };
            if ui
                .add_enabled(!state.is_loading(), egui::Button::new(label))
                .clicked()
            {
                actions.push(UiAction::GenerateQuiz);
            }
        });
    });
    ui.add_space(4.0);

    match quiz.phase() {
        QuizPhase::Empty => {
            ui.weak("Generate a quiz from your uploaded material.");
            return;
        }
        QuizPhase::Loading => {
            ui.weak("Generating quiz...");
            return;
        }
        QuizPhase::Ready | QuizPhase::InProgress | QuizPhase::Complete | QuizPhase::Submitted => {}
    }

    let index = quiz.current_index();
    let Some(question) = quiz.current_question() else {
        return;
    };
    let submitted = quiz.is_submitted();
    let selected = quiz.selected_answer(index);

    egui::Frame::new()
        .fill(palette.card_background)
        .corner_radius(10)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                if let Some(progress) = quiz.progress_label() {
                    ui.label(egui::RichText::new(progress).strong());
                }
                ui.label(egui::RichText::new(question.kind_label()).color(palette.muted_text));
            });
            ui.add_space(6.0);
            ui.label(egui::RichText::new(&question.question).size(16.0));
            ui.add_space(6.0);

            for choice in &question.choices {
                let is_selected = selected == Some(choice.as_str());
                let mut text = egui::RichText::new(choice);
                if submitted && question.is_correct(choice) {
                    text = text.color(palette.correct);
                } else if submitted && is_selected {
                    text = text.color(palette.incorrect);
                }
                let clicked = ui
                    .add_enabled(!submitted, egui::RadioButton::new(is_selected, text))
                    .clicked();
                if clicked && !is_selected {
                    actions.push(UiAction::SelectAnswer {
                        index,
                        choice: choice.clone(),
                    });
                }
            }

            if submitted {
                ui.add_space(6.0);
                let toggle_label = if quiz.is_explanation_visible(index) {
                    "Hide Explanation"
                } else {
                    "Show Explanation"
                };
                if ui.button(toggle_label).clicked() {
                    actions.push(UiAction::ToggleExplanation { index });
                }
                if let Some((answer_line, explanation)) = revealed_answer(quiz, index) {
                    ui.label(egui::RichText::new(answer_line).strong());
                    ui.label(egui::RichText::new(explanation).italics());
                }
            }
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!quiz.is_first(), egui::Button::new("Previous"))
            .clicked()
        {
            actions.push(UiAction::Navigate(Direction::Previous));
        }
        if ui
            .add_enabled(!quiz.is_last(), egui::Button::new("Next"))
            .clicked()
        {
            actions.push(UiAction::Navigate(Direction::Next));
        }
        if !submitted {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("{} of {} answered", quiz.answered_count(), quiz.len()));
                if ui
                    .add_enabled(quiz.can_submit(), egui::Button::new("Submit Quiz"))
                    .clicked()
                {
                    actions.push(UiAction::SubmitQuiz);
                }
            });
        }
    });

    if let (Some(score), Some(percent)) = (quiz.score(), quiz.score_percent()) {
        ui.add_space(10.0);
        ui.label(
            egui::RichText::new(format!(
                "You got {score} out of {} questions correct! ({percent}%)",
                quiz.len()
            ))
            .strong()
            .size(16.0),
        );
    }
}

pub fn loading_overlay(ctx: &egui::Context, state: &AppState) {
    if !state.is_loading() {
        return;
    }
    egui::Area::new(egui::Id::new("loading_overlay"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processing your request...");
                });
            });
        });
}

pub fn alert_window(ctx: &egui::Context, state: &AppState, actions: &mut Vec<UiAction>) {
    let Some(message) = &state.alert else {
        return;
    };
    egui::Window::new("Upload failed")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                actions.push(UiAction::DismissAlert);
            }
        });
}

#[cfg(test)]
mod tests {
    use client_core::QuizAction;
    use shared::domain::QuizQuestion;

    use super::*;

    fn submitted_quiz() -> QuizSession {
        let question = QuizQuestion {
            status: "success".to_string(),
            question_type: "truefalse".to_string(),
            question: "The sky is green.".to_string(),
            choices: vec!["True".to_string(), "False".to_string()],
            answer: "False".to_string(),
            explanation: "It is blue.".to_string(),
        };
        QuizSession::with_questions(vec![question])
            .reduce(QuizAction::SelectAnswer {
                index: 0,
                choice: "True".to_string(),
            })
            .reduce(QuizAction::Submit)
    }

    #[test]
    fn answer_is_revealed_only_with_visible_explanation() {
        let quiz = submitted_quiz();
        assert_eq!(
            revealed_answer(&quiz, 0),
            Some(("Correct Answer: False".to_string(), "It is blue."))
        );

        let hidden = quiz.reduce(QuizAction::ToggleExplanation { index: 0 });
        assert_eq!(revealed_answer(&hidden, 0), None);
    }

    #[test]
    fn answer_stays_hidden_before_submission() {
        let quiz = submitted_quiz().reduce(QuizAction::GenerationStarted);
        assert_eq!(revealed_answer(&quiz, 0), None);
    }
}
