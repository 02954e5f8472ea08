use eframe::egui::{self, FontId};

use crate::deck::Slide;
use crate::render::images::{self, TextureCache};
use crate::render::{self, RegionEdits, RenderMode};
use crate::theme::Theme;

/// Title on top, body text below, with an optional side image on the
/// right when the slide carries one.
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

    // Body takes the full width unless an image claims the right side.
    let body_rect = if slide.image.is_some() {
        egui::Rect::from_min_max(
            below.min,
            egui::pos2(below.left() + below.width() * 0.6, below.bottom()),
        )
    } else {
        below
    };

    if let Some(image) = &slide.image {
        let image_rect = egui::Rect::from_min_max(
            egui::pos2(below.left() + below.width() * 0.64, below.top()),
            below.max,
        );
        let texture = textures.texture(ui.ctx(), image);
        images::paint_contain(ui, &texture, image_rect, opacity);
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
            "body",
            body_rect,
            &slide.content,
            body_font,
            body_color,
            "Click to add text",
            false,
            mode,
        ),
    }
}
