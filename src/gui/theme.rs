//! Application theme.

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

/// Color palette.
pub struct Colors;

impl Colors {
    pub const BG_DARK: Color32 = Color32::from_rgb(16, 18, 24);
    pub const BG_CARD: Color32 = Color32::from_rgb(26, 30, 40);
    pub const BG_HOVER: Color32 = Color32::from_rgb(36, 42, 56);
    pub const ACCENT: Color32 = Color32::from_rgb(86, 156, 214);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(235, 238, 245);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 160, 180);
    pub const SUCCESS: Color32 = Color32::from_rgb(110, 200, 140);
    pub const ERROR: Color32 = Color32::from_rgb(236, 112, 112);
    pub const BORDER: Color32 = Color32::from_rgb(52, 60, 78);
}

/// Dark style used by the whole application.
pub fn dark_theme() -> Style {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();

    visuals.panel_fill = Colors::BG_DARK;
    visuals.window_fill = Colors::BG_CARD;
    visuals.extreme_bg_color = Colors::BG_DARK;
    visuals.faint_bg_color = Colors::BG_CARD;

    visuals.widgets.noninteractive.bg_fill = Colors::BG_CARD;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Colors::TEXT_SECONDARY);
    visuals.widgets.noninteractive.corner_radius = CornerRadius::same(6);

    visuals.widgets.inactive.bg_fill = Colors::BG_CARD;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Colors::TEXT_PRIMARY);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(6);

    visuals.widgets.hovered.bg_fill = Colors::BG_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Colors::TEXT_PRIMARY);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(6);

    visuals.widgets.active.bg_fill = Colors::ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Colors::TEXT_PRIMARY);
    visuals.widgets.active.corner_radius = CornerRadius::same(6);

    visuals.selection.bg_fill = Colors::ACCENT.gamma_multiply(0.5);
    visuals.selection.stroke = Stroke::new(1.0, Colors::ACCENT);

    style.visuals = visuals;

    style
}
