use eframe::egui::{self, FontId, Stroke, StrokeKind};

use crate::deck::Slide;
use crate::render::images::{self, TextureCache};
use crate::render::{self, RegionEdits, RenderMode};
use crate::theme::Theme;

/// Title on top, body text on the left, image (or a placeholder) on the
/// right.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &mut egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    mode: RenderMode,
    textures: &mut TextureCache,
    opacity: f32,
    scale: f32,
) -> RegionEdits {
    let padding = 60.0 * scale;
    let content_rect = rect.shrink(padding);

    let title_font = FontId::proportional(theme.title_size * 0.6 * scale);
    let body_font = FontId::proportional(theme.body_size * scale);
    let title_color = Theme::with_opacity(theme.title_color, opacity);
    let body_color = Theme::with_opacity(theme.body_color, opacity);

    let title_height = theme.title_size * 0.6 * scale * 1.6;
    let title_rect = egui::Rect::from_min_size(
        content_rect.min,
        egui::vec2(content_rect.width(), title_height),
    );
    let below = egui::Rect::from_min_max(
        egui::pos2(content_rect.left(), title_rect.bottom() + 20.0 * scale),
        content_rect.max,
    );

    let gap = 24.0 * scale;
    let column_width = (below.width() - gap) / 2.0;
    let left_rect = egui::Rect::from_min_size(below.min, egui::vec2(column_width, below.height()));
    let right_rect = egui::Rect::from_min_max(
        egui::pos2(left_rect.right() + gap, below.top()),
        below.max,
    );

    match &slide.image {
        Some(image) => {
            let texture = textures.texture(ui.ctx(), image);
            images::paint_contain(ui, &texture, right_rect, opacity);
        }
        None => {
            let muted = Theme::with_opacity(theme.muted(), opacity);
            ui.painter().rect_stroke(
                right_rect,
                6.0 * scale,
                Stroke::new(1.5 * scale, muted),
                StrokeKind::Inside,
            );
            let galley = ui.painter().layout_no_wrap(
                "No image".to_string(),
                FontId::proportional(theme.body_size * 0.8 * scale),
                muted,
            );
            let pos = egui::pos2(
                right_rect.center().x - galley.rect.width() / 2.0,
                right_rect.center().y - galley.rect.height() / 2.0,
            );
            ui.painter().galley(pos, galley, muted);
        }
    }

    RegionEdits {
        title: render::text_region(
            ui,
            slide,
            "title",
            title_rect,
            &slide.title,
            title_font,
            title_color,
            "Click to add title",
            false,
            mode,
        ),
        content: render::text_region(
            ui,
            slide,
            "left",
            left_rect,
            &slide.content,
            body_font,
            body_color,
            "Click to add text",
            false,
            mode,
        ),
    }
}
