//! Visual theme for the study window.

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    StudyDark,
    EguiLight,
}

impl ThemePreset {
    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::StudyDark => "Dark",
            ThemePreset::EguiLight => "Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSettings {
    pub preset: ThemePreset,
    pub accent_color: egui::Color32,
    pub panel_rounding: u8,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            preset: ThemePreset::StudyDark,
            accent_color: egui::Color32::from_rgb(88, 101, 242),
            panel_rounding: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudyPalette {
    pub app_background: egui::Color32,
    pub sidebar_background: egui::Color32,
    pub card_background: egui::Color32,
    pub correct: egui::Color32,
    pub incorrect: egui::Color32,
    pub muted_text: egui::Color32,
}

pub fn palette_for_theme(theme: ThemeSettings) -> StudyPalette {
    match theme.preset {
        ThemePreset::StudyDark => StudyPalette {
            app_background: egui::Color32::from_rgb(26, 26, 30),
            sidebar_background: egui::Color32::from_rgb(18, 18, 20),
            card_background: lighten_color(egui::Color32::from_rgb(26, 26, 30), 0.06),
            correct: egui::Color32::from_rgb(67, 160, 71),
            incorrect: egui::Color32::from_rgb(229, 57, 53),
            muted_text: egui::Color32::from_rgb(129, 130, 138),
        },
        ThemePreset::EguiLight => {
            let visuals = egui::Visuals::light();
            StudyPalette {
                app_background: visuals.panel_fill,
                sidebar_background: visuals.faint_bg_color,
                card_background: visuals.extreme_bg_color,
                correct: egui::Color32::from_rgb(46, 125, 50),
                incorrect: egui::Color32::from_rgb(198, 40, 40),
                muted_text: visuals.weak_text_color(),
            }
        }
    }
}

pub fn visuals_for_theme(theme: ThemeSettings) -> egui::Visuals {
    let mut visuals = match theme.preset {
        ThemePreset::StudyDark => {
            let palette = palette_for_theme(theme);
            let mut v = egui::Visuals::dark();
            v.override_text_color = Some(egui::Color32::from_rgb(236, 237, 240));
            v.window_fill = palette.card_background;
            v.panel_fill = palette.app_background;
            v.extreme_bg_color = palette.sidebar_background;
            v.faint_bg_color = egui::Color32::from_rgb(29, 29, 30);
            v
        }
        ThemePreset::EguiLight => egui::Visuals::light(),
    };

    visuals.hyperlink_color = theme.accent_color;
    visuals.selection.bg_fill = theme.accent_color;
    visuals.widgets.active.bg_fill = theme.accent_color;
    visuals.widgets.hovered.bg_fill = theme.accent_color.gamma_multiply(0.85);

    let radius = egui::CornerRadius::same(theme.panel_rounding);
    visuals.widgets.noninteractive.corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;
    visuals.widgets.open.corner_radius = radius;

    visuals
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}
