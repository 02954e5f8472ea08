pub mod effects;
pub mod images;
pub mod layouts;

use eframe::egui::{self, Align, FontId, TextEdit};

use crate::deck::{Layout, Slide};
use crate::theme::Theme;

use images::TextureCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Text regions are editable in place.
    Editor,
    /// Static read-only rendering at playback typography scale.
    Playback,
}

/// Text changes coming back from in-place editing. Always empty in
/// playback mode.
#[derive(Debug, Default)]
pub struct RegionEdits {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Render a single slide into `rect` using its layout.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    ui: &mut egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    mode: RenderMode,
    textures: &mut TextureCache,
    opacity: f32,
    scale: f32,
) -> RegionEdits {
    if theme.paints_background() {
        ui.painter()
            .rect_filled(rect, 0.0, Theme::with_opacity(theme.background, opacity));
    }

    match slide.layout {
        Layout::Title => layouts::title::render(ui, slide, theme, rect, mode, opacity, scale),
        Layout::Content => {
            layouts::content::render(ui, slide, theme, rect, mode, textures, opacity, scale)
        }
        Layout::TwoColumn => {
            layouts::two_column::render(ui, slide, theme, rect, mode, textures, opacity, scale)
        }
        Layout::Image => {
            layouts::image_slide::render(ui, slide, theme, rect, mode, textures, opacity, scale)
        }
        Layout::Blank => {
            layouts::blank::render(ui, slide, theme, rect, mode, textures, opacity, scale)
        }
    }
}

/// One text region: an in-place editor in editor mode, a painted galley
/// in playback. Returns the new text when the user changed it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn text_region(
    ui: &mut egui::Ui,
    slide: &Slide,
    salt: &str,
    rect: egui::Rect,
    text: &str,
    font: FontId,
    color: egui::Color32,
    hint: &str,
    centered: bool,
    mode: RenderMode,
) -> Option<String> {
    match mode {
        RenderMode::Editor => {
            let mut buffer = text.to_string();
            let align = if centered { Align::Center } else { Align::Min };
            let response = ui.put(
                rect,
                TextEdit::multiline(&mut buffer)
                    .id_salt((salt, slide.id))
                    .font(font)
                    .text_color(color)
                    .hint_text(hint)
                    .horizontal_align(align)
                    .frame(false),
            );
            response.changed().then_some(buffer)
        }
        RenderMode::Playback => {
            if !text.is_empty() {
                draw_wrapped(ui, text, font, color, rect, centered);
            }
            None
        }
    }
}

/// Paint wrapped static text into a rect, top-aligned, optionally
/// horizontally centered.
pub(crate) fn draw_wrapped(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: egui::Color32,
    rect: egui::Rect,
    centered: bool,
) {
    let galley = ui
        .painter()
        .layout(text.to_string(), font, color, rect.width());
    let x = if centered {
        rect.center().x - galley.rect.width() / 2.0
    } else {
        rect.left()
    };
    ui.painter()
        .galley(egui::pos2(x, rect.top()), galley, color);
}
