//! App shell: drains backend events, renders panels, and turns the actions
//! they emit into state transitions and backend commands.

use std::time::Duration;

use client_core::config::{BackendUrlSource, DeployEnvironment};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{AppState, UiAction},
};
use crate::ui::{
    panels,
    theme::{palette_for_theme, visuals_for_theme, ThemePreset, ThemeSettings},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub backend_url: String,
    pub source: BackendUrlSource,
}

impl StartupConfig {
    pub fn source_label(&self) -> &'static str {
        match self.source {
            BackendUrlSource::CommandLine => "command line",
            BackendUrlSource::Environment => "environment",
            BackendUrlSource::ConfigFile => "config file",
            BackendUrlSource::Default(DeployEnvironment::Production) => "production default",
            BackendUrlSource::Default(DeployEnvironment::Local) => "local default",
        }
    }
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
    startup: StartupConfig,
    theme: ThemeSettings,
    applied_theme: Option<ThemeSettings>,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, startup: StartupConfig) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: AppState::default(),
            startup,
            theme: ThemeSettings::default(),
            applied_theme: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply_event(event);
        }
    }

    pub fn run_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            let Some(cmd) = self.state.apply(action) else {
                continue;
            };
            let tag = cmd.tag();
            if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
                self.state.abandon(tag, err.user_message());
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals_for_theme(self.theme);
        style.visuals.widgets.inactive.bg_stroke =
            egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
        style.visuals.widgets.active.bg_stroke =
            egui::Stroke::new(1.2, style.visuals.selection.bg_fill.gamma_multiply(0.9));
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        ctx.set_style(style);

        self.applied_theme = Some(self.theme);
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Recall");
                ui.weak(format!(
                    "{} ({})",
                    self.startup.backend_url,
                    self.startup.source_label()
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::ComboBox::from_id_salt("theme_preset")
                        .selected_text(self.theme.preset.label())
                        .show_ui(ui, |ui| {
                            for preset in [ThemePreset::StudyDark, ThemePreset::EguiLight] {
                                ui.selectable_value(&mut self.theme.preset, preset, preset.label());
                            }
                        });
                });
            });
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);
        let palette = palette_for_theme(self.theme);
        let mut actions = Vec::new();

        self.show_top_bar(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.is_loading() {
                    ui.spinner();
                }
                ui.label(&self.state.status);
            });
        });

        egui::SidePanel::left("upload_sidebar")
            .resizable(false)
            .default_width(240.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .fill(palette.sidebar_background)
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| panels::upload_sidebar(ui, &self.state, &mut actions));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::status_banner(ui, &self.state, &mut actions);
                panels::query_panel(ui, &self.state, &mut actions);
                panels::response_panel(ui, &self.state, palette);
                ui.add_space(16.0);
                ui.separator();
                panels::quiz_panel(ui, &self.state, palette, &mut actions);
            });
        });

        panels::loading_overlay(ctx, &self.state);
        panels::alert_window(ctx, &self.state, &mut actions);

        self.run_actions(actions);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
