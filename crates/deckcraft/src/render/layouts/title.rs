use eframe::egui::{self, FontId};

use crate::deck::Slide;
use crate::render::{self, RegionEdits, RenderMode};
use crate::theme::Theme;

/// Centered title over a centered subtitle.
pub fn render(
    ui: &mut egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    mode: RenderMode,
    opacity: f32,
    scale: f32,
) -> RegionEdits {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);

    let title_font = FontId::proportional(theme.title_size * scale);
    let subtitle_font = FontId::proportional(theme.subtitle_size * scale);
    let title_color = Theme::with_opacity(theme.title_color, opacity);
    let subtitle_color = Theme::with_opacity(theme.body_color, opacity);

    let title_height = theme.title_size * scale * 2.2;
    let title_rect = egui::Rect::from_min_max(
        egui::pos2(content_rect.left(), content_rect.center().y - title_height),
        egui::pos2(content_rect.right(), content_rect.center().y - 10.0 * scale),
    );
    let subtitle_rect = egui::Rect::from_min_max(
        egui::pos2(content_rect.left(), content_rect.center().y + 10.0 * scale),
        egui::pos2(
            content_rect.right(),
            content_rect.center().y + theme.subtitle_size * scale * 3.0,
        ),
    );

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
            true,
            mode,
        ),
        content: render::text_region(
            ui,
            slide,
            "subtitle",
            subtitle_rect,
            &slide.content,
            subtitle_font,
            subtitle_color,
            "Click to add subtitle",
            true,
            mode,
        ),
    }
}
