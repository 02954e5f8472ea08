use std::collections::HashMap;

use eframe::egui;

use crate::deck::{ImageId, SlideImage};

/// GPU textures for embedded slide images, keyed by payload identity.
/// Payloads are immutable, so an entry never needs refreshing.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<ImageId, egui::TextureHandle>,
}

impl TextureCache {
    pub fn texture(&mut self, ctx: &egui::Context, image: &SlideImage) -> egui::TextureHandle {
        self.textures
            .entry(image.id)
            .or_insert_with(|| {
                let color = egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba);
                ctx.load_texture(
                    format!("slide-image-{:?}", image.id),
                    color,
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone()
    }

    /// Drop textures whose payloads are no longer referenced by any slide.
    pub fn retain_live(&mut self, live: impl Fn(ImageId) -> bool) {
        self.textures.retain(|id, _| live(*id));
    }
}

/// Paint a texture scaled to fit inside `rect`, centered, preserving
/// aspect ratio.
pub fn paint_contain(
    ui: &egui::Ui,
    texture: &egui::TextureHandle,
    rect: egui::Rect,
    opacity: f32,
) {
    let size = texture.size_vec2();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let scale = (rect.width() / size.x).min(rect.height() / size.y);
    let draw_rect = egui::Rect::from_center_size(rect.center(), size * scale);
    paint_at(ui, texture, draw_rect, opacity);
}

/// Paint a texture covering all of `rect`, centered, preserving aspect
/// ratio. Overflow is clipped to the rect.
pub fn paint_cover(ui: &egui::Ui, texture: &egui::TextureHandle, rect: egui::Rect, opacity: f32) {
    let size = texture.size_vec2();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let scale = (rect.width() / size.x).max(rect.height() / size.y);
    let draw_rect = egui::Rect::from_center_size(rect.center(), size * scale);
    let painter = ui.painter().with_clip_rect(rect);
    painter.image(
        texture.id(),
        draw_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE.gamma_multiply(opacity),
    );
}

fn paint_at(ui: &egui::Ui, texture: &egui::TextureHandle, rect: egui::Rect, opacity: f32) {
    ui.painter().image(
        texture.id(),
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE.gamma_multiply(opacity),
    );
}
