use eframe::egui::{
    self, pos2, vec2, Rect, Response, Sense, Stroke, TextStyle, Ui, Widget,
};

use crate::figure::Series;

const SWATCH_WIDTH: f32 = 18.0;
const SWATCH_GAP: f32 = 6.0;
const COLUMN_GAP: f32 = 14.0;
const ROW_GAP: f32 = 2.0;
const PADDING: f32 = 6.0;

/// Boxed legend laid out row-major in a fixed number of columns.
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct Legend<'a> {
    series: &'a [Series],
    columns: usize,
}

impl<'a> Legend<'a> {
    pub fn new(series: &'a [Series], columns: usize) -> Self {
        Self {
            series,
            columns: columns.max(1),
        }
    }
}

impl Widget for Legend<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Legend { series, columns } = self;

        let font_id = TextStyle::Body.resolve(ui.style());
        let ink = ui.visuals().text_color();
        let outline = ui.visuals().widgets.noninteractive.bg_stroke;
        let galleys: Vec<_> = series
            .iter()
            .map(|s| {
                ui.painter()
                    .layout_no_wrap(s.label.clone(), font_id.clone(), ink)
            })
            .collect();

        let row_height = galleys
            .iter()
            .map(|galley| galley.size().y)
            .fold(0.0, f32::max);
        let rows = series.len().div_ceil(columns);
        let mut column_widths = vec![0.0f32; columns];
        for (i, galley) in galleys.iter().enumerate() {
            let entry_width = SWATCH_WIDTH + SWATCH_GAP + galley.size().x;
            column_widths[i % columns] = column_widths[i % columns].max(entry_width);
        }

        let width = column_widths.iter().sum::<f32>()
            + COLUMN_GAP * (columns.saturating_sub(1) as f32)
            + 2.0 * PADDING;
        let height = rows as f32 * row_height
            + ROW_GAP * (rows.saturating_sub(1) as f32)
            + 2.0 * PADDING;
        let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
        if !ui.is_rect_visible(rect) {
            return response;
        }

        let painter = ui.painter().with_clip_rect(rect);
        painter.rect_stroke(rect, 0.0, outline, egui::StrokeKind::Inside);

        for (i, (entry, galley)) in series.iter().zip(galleys).enumerate() {
            let row = i / columns;
            let column = i % columns;
            let left = rect.left()
                + PADDING
                + column_widths[..column].iter().sum::<f32>()
                + COLUMN_GAP * column as f32;
            let top = rect.top() + PADDING + row as f32 * (row_height + ROW_GAP);
            let entry_rect = Rect::from_min_size(pos2(left, top), vec2(SWATCH_WIDTH, row_height));

            painter.line_segment(
                [entry_rect.left_center(), entry_rect.right_center()],
                Stroke::new(2.0, entry.color),
            );
            painter.galley(
                pos2(entry_rect.right() + SWATCH_GAP, top),
                galley,
                ink,
            );
        }

        response
    }
}
