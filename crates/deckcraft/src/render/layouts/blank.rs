use eframe::egui::{self, FontId};

use crate::deck::Slide;
use crate::render::images::{self, TextureCache};
use crate::render::{self, RegionEdits, RenderMode};
use crate::theme::Theme;

/// With an image: the image full-bleed and nothing else; text regions
/// stay hidden even when they hold text. Without one: a centered title
/// and body pair.
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
    if let Some(image) = &slide.image {
        let texture = textures.texture(ui.ctx(), image);
        images::paint_cover(ui, &texture, rect, opacity);
        return RegionEdits::default();
    }

    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);

    let title_font = FontId::proportional(theme.title_size * 0.7 * scale);
    let body_font = FontId::proportional(theme.body_size * scale);
    let title_color = Theme::with_opacity(theme.title_color, opacity);
    let body_color = Theme::with_opacity(theme.body_color, opacity);

    let title_height = theme.title_size * 0.7 * scale * 1.8;
    let title_rect = egui::Rect::from_min_max(
        egui::pos2(content_rect.left(), content_rect.center().y - title_height),
        egui::pos2(content_rect.right(), content_rect.center().y - 8.0 * scale),
    );
    let body_rect = egui::Rect::from_min_max(
        egui::pos2(content_rect.left(), content_rect.center().y + 8.0 * scale),
        content_rect.max,
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
            "body",
            body_rect,
            &slide.content,
            body_font,
            body_color,
            "Click to add text",
            true,
            mode,
        ),
    }
}
