use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Widget color table for one theme. The values are the classic ImageFlow
/// palette (VS-style dark grays, Fluent blue accent).
pub struct Theme {
    pub bg: egui::Color32,
    pub fg: egui::Color32,
    pub weak_fg: egui::Color32,
    pub panel_bg: egui::Color32,
    pub entry_bg: egui::Color32,
    pub button_bg: egui::Color32,
    pub border: egui::Color32,
    pub accent: egui::Color32,
    pub accent_fg: egui::Color32,
    pub success: egui::Color32,
    pub danger: egui::Color32,
}

pub const LIGHT: Theme = Theme {
    bg: egui::Color32::from_rgb(255, 255, 255),
    fg: egui::Color32::from_rgb(0, 0, 0),
    weak_fg: egui::Color32::from_rgb(107, 114, 128),
    panel_bg: egui::Color32::from_rgb(240, 240, 240),
    entry_bg: egui::Color32::from_rgb(255, 255, 255),
    button_bg: egui::Color32::from_rgb(240, 240, 240),
    border: egui::Color32::from_rgb(209, 213, 219),
    accent: egui::Color32::from_rgb(0, 120, 212),
    accent_fg: egui::Color32::from_rgb(255, 255, 255),
    success: egui::Color32::from_rgb(34, 197, 94),
    danger: egui::Color32::from_rgb(239, 68, 68),
};

pub const DARK: Theme = Theme {
    bg: egui::Color32::from_rgb(45, 45, 48),
    fg: egui::Color32::from_rgb(255, 255, 255),
    weak_fg: egui::Color32::from_rgb(161, 161, 170),
    panel_bg: egui::Color32::from_rgb(45, 45, 48),
    entry_bg: egui::Color32::from_rgb(60, 60, 60),
    button_bg: egui::Color32::from_rgb(64, 64, 64),
    border: egui::Color32::from_rgb(82, 82, 86),
    accent: egui::Color32::from_rgb(0, 122, 204),
    accent_fg: egui::Color32::from_rgb(255, 255, 255),
    success: egui::Color32::from_rgb(34, 197, 94),
    danger: egui::Color32::from_rgb(239, 68, 68),
};

pub fn theme(mode: ThemeMode) -> &'static Theme {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}

pub fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
    let mut style = (*ctx.style()).clone();
    let t = theme(mode);

    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(4);

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(10);

    style.visuals.dark_mode = matches!(mode, ThemeMode::Dark);

    style.visuals.panel_fill = t.bg;
    style.visuals.window_fill = t.bg;
    style.visuals.faint_bg_color = t.panel_bg;
    style.visuals.extreme_bg_color = t.entry_bg;

    style.visuals.widgets.noninteractive.bg_fill = t.panel_bg;
    style.visuals.widgets.noninteractive.weak_bg_fill = t.panel_bg;
    style.visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, t.border);
    style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, t.fg);

    style.visuals.widgets.inactive.bg_fill = t.button_bg;
    style.visuals.widgets.inactive.weak_bg_fill = t.button_bg;
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, t.border);
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, t.fg);

    style.visuals.widgets.hovered.bg_fill = t.accent;
    style.visuals.widgets.hovered.weak_bg_fill = t.accent;
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, t.accent);
    style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, t.accent_fg);

    style.visuals.widgets.active.bg_fill = t.accent;
    style.visuals.widgets.active.weak_bg_fill = t.accent;
    style.visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, t.accent);
    style.visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, t.accent_fg);

    style.visuals.selection.bg_fill = t.accent;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, t.accent_fg);
    style.visuals.hyperlink_color = t.accent;

    ctx.set_style(style);
}

/// Accent-filled button for the primary action of a panel.
pub fn accent_button(ui: &mut egui::Ui, text: &str, mode: ThemeMode) -> egui::Response {
    let t = theme(mode);

    ui.scope(|ui| {
        let style = ui.style_mut();
        style.visuals.widgets.inactive.bg_fill = t.accent;
        style.visuals.widgets.inactive.weak_bg_fill = t.accent;
        style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, t.accent_fg);
        style.visuals.widgets.inactive.bg_stroke = egui::Stroke::NONE;

        style.visuals.widgets.hovered.bg_fill = t.accent.gamma_multiply(1.15);
        style.visuals.widgets.hovered.weak_bg_fill = t.accent.gamma_multiply(1.15);
        style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, t.accent_fg);
        style.visuals.widgets.hovered.bg_stroke = egui::Stroke::NONE;

        style.visuals.widgets.active.bg_fill = t.accent;
        style.visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, t.accent_fg);
        style.visuals.widgets.active.bg_stroke = egui::Stroke::NONE;

        let button = egui::Button::new(egui::RichText::new(text).size(15.0).color(t.accent_fg))
            .min_size(egui::vec2(140.0, 36.0))
            .corner_radius(6.0);

        ui.add(button)
    })
    .inner
}
