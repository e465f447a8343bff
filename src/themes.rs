use egui::style::{Selection, WidgetVisuals, Widgets};
use egui::{Color32, FontFamily, FontId, Stroke, Style, TextStyle, Visuals};

pub mod ral;
use ral::RAL_COLORS;

/// Categorical series colours, assigned to a panel's series in order.
///
/// Leaves out `RAL 2009`, the accent, and the greys used for chrome.
pub const SERIES_PALETTE: &[u16] = &[
    5005, // signal blue
    2010, // signal orange
    6032, // signal green
    3020, // traffic red
    4008, // signal violet
    5015, // sky blue
    1003, // signal yellow
];

pub fn series_color(index: usize) -> Color32 {
    ral(SERIES_PALETTE[index % SERIES_PALETTE.len()])
}

// Color utilities: simple sRGB linear interpolation for quick palette derivation
pub fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let r = (a.r() as f32 * (1.0 - t) + b.r() as f32 * t).round() as u8;
    let g = (a.g() as f32 * (1.0 - t) + b.g() as f32 * t).round() as u8;
    let bch = (a.b() as f32 * (1.0 - t) + b.b() as f32 * t).round() as u8;
    Color32::from_rgb(r, g, bch)
}

pub fn ral(num: u16) -> Color32 {
    RAL_COLORS
        .iter()
        .find(|(code, _, _)| *code == num)
        .map(|(_, _, c)| *c)
        .unwrap_or(Color32::from_rgb(0, 0, 0))
}

/// Flat visuals for charts: no rounding, thin borders, grid lines a step
/// away from the background.
pub fn chart_visuals(
    foreground: Color32,
    background: Color32,
    accent: Color32,
    mut base_visuals: Visuals,
) -> Visuals {
    let border = blend(foreground, background, 0.4);
    let weak_text = blend(foreground, background, 0.55);
    let faint = blend(background, foreground, 0.06);

    base_visuals.window_fill = background;
    base_visuals.panel_fill = background;
    base_visuals.override_text_color = Some(foreground);
    base_visuals.weak_text_color = Some(weak_text);
    base_visuals.faint_bg_color = faint;
    base_visuals.extreme_bg_color = background;
    base_visuals.selection = Selection {
        bg_fill: blend(background, foreground, 0.12),
        stroke: Stroke::new(1.5, accent),
    };
    base_visuals.window_stroke = Stroke::new(1.0, border);

    let chrome = |stroke: Stroke| WidgetVisuals {
        bg_fill: background,
        weak_bg_fill: background,
        bg_stroke: stroke,
        fg_stroke: Stroke::new(1.0, foreground),
        corner_radius: 0.0.into(),
        expansion: 0.0,
    };
    base_visuals.widgets = Widgets {
        noninteractive: chrome(Stroke::new(1.0, border)),
        inactive: chrome(Stroke::new(1.0, border)),
        hovered: chrome(Stroke::new(1.4, border)),
        active: chrome(Stroke::new(1.4, accent)),
        open: chrome(Stroke::new(1.4, accent)),
    };
    base_visuals.window_shadow = egui::epaint::Shadow::NONE;
    base_visuals.popup_shadow = egui::epaint::Shadow::NONE;

    base_visuals
}

pub fn chart_light() -> Style {
    let mut style = Style {
        text_styles: chart_text_styles().into_iter().collect(),
        ..Default::default()
    };
    style.visuals = chart_visuals(ral(9011), ral(9003), ral(2009), Visuals::light());
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style
}

pub fn chart_dark() -> Style {
    let mut style = Style {
        text_styles: chart_text_styles().into_iter().collect(),
        ..Default::default()
    };
    style.visuals = chart_visuals(ral(9003), ral(9004), ral(2009), Visuals::dark());
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style
}

pub fn chart_text_styles() -> Vec<(TextStyle, FontId)> {
    vec![
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(11.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(10.0, FontFamily::Proportional)),
    ]
}

/// Registers both chart styles on `ctx` and selects `theme`.
pub fn install(ctx: &egui::Context, theme: egui::ThemePreference) {
    ctx.set_style_of(egui::Theme::Light, chart_light());
    ctx.set_style_of(egui::Theme::Dark, chart_dark());
    ctx.set_theme(theme);
}
