use eframe::egui::{self, FontId, Stroke, StrokeKind};

use crate::deck::Slide;
use crate::render::images::{self, TextureCache};
use crate::render::{RegionEdits, RenderMode};
use crate::theme::Theme;

/// A single full-bleed image region. Without an image, an instructional
/// placeholder.
#[allow(clippy::too_many_arguments)]
pub fn render(
    ui: &mut egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    _mode: RenderMode,
    textures: &mut TextureCache,
    opacity: f32,
    scale: f32,
) -> RegionEdits {
    match &slide.image {
        Some(image) => {
            let texture = textures.texture(ui.ctx(), image);
            images::paint_cover(ui, &texture, rect, opacity);
        }
        None => {
            let muted = Theme::with_opacity(theme.muted(), opacity);
            let inner = rect.shrink(60.0 * scale);
            ui.painter().rect_stroke(
                inner,
                8.0 * scale,
                Stroke::new(2.0 * scale, muted),
                StrokeKind::Inside,
            );
            let galley = ui.painter().layout_no_wrap(
                "Insert an image from the toolbar".to_string(),
                FontId::proportional(theme.body_size * scale),
                muted,
            );
            let pos = egui::pos2(
                inner.center().x - galley.rect.width() / 2.0,
                inner.center().y - galley.rect.height() / 2.0,
            );
            ui.painter().galley(pos, galley, muted);
        }
    }
    RegionEdits::default()
}
