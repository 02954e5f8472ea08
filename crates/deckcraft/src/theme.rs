use eframe::egui::Color32;

use crate::deck::Template;

/// Colors and typography for one slide template. Selecting a template
/// changes colors only, never which regions a layout exposes.
#[derive(Debug, Clone)]
pub struct Theme {
    pub template: Template,
    pub background: Color32,
    pub title_color: Color32,
    pub body_color: Color32,
    pub accent: Color32,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn from_template(template: Template) -> Self {
        let (background, title_color, body_color, accent) = match template {
            Template::Default => (
                Color32::WHITE,
                Color32::from_rgb(0x1A, 0x1A, 0x2E),
                Color32::from_rgb(0x33, 0x33, 0x33),
                Color32::from_rgb(0x0F, 0x34, 0x60),
            ),
            Template::Blue => (
                Color32::from_rgb(0x1E, 0x3A, 0x5F),
                Color32::WHITE,
                Color32::from_rgb(0xD6, 0xE4, 0xF0),
                Color32::from_rgb(0x5C, 0xB8, 0xFF),
            ),
            Template::Dark => (
                Color32::from_rgb(0x1E, 0x1E, 0x1E),
                Color32::WHITE,
                Color32::from_rgb(0xC8, 0xC8, 0xC8),
                Color32::from_rgb(0x52, 0x94, 0xE2),
            ),
            Template::Green => (
                Color32::from_rgb(0x1B, 0x4D, 0x3E),
                Color32::WHITE,
                Color32::from_rgb(0xD2, 0xE7, 0xD6),
                Color32::from_rgb(0x5C, 0xDB, 0x95),
            ),
            Template::Orange => (
                Color32::from_rgb(0x8A, 0x3B, 0x12),
                Color32::WHITE,
                Color32::from_rgb(0xFB, 0xE3, 0xD0),
                Color32::from_rgb(0xE8, 0xA8, 0x38),
            ),
            Template::Purple => (
                Color32::from_rgb(0x3E, 0x2A, 0x5C),
                Color32::WHITE,
                Color32::from_rgb(0xE2, 0xD9, 0xF0),
                Color32::from_rgb(0xC0, 0x7E, 0xF1),
            ),
        };
        Self {
            template,
            background,
            title_color,
            body_color,
            accent,
            title_size: 64.0,
            subtitle_size: 32.0,
            body_size: 26.0,
        }
    }

    /// Whether the canvas paints its background. The default template
    /// leaves it unpainted so exports keep a transparent background.
    pub fn paints_background(&self) -> bool {
        self.template != Template::Default
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Muted variant of the body color, for placeholders and chrome.
    pub fn muted(&self) -> Color32 {
        Self::with_opacity(self.body_color, 0.45)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_a_theme() {
        for template in Template::ALL {
            let theme = Theme::from_template(template);
            assert_eq!(theme.template, template);
            assert_ne!(theme.background, theme.title_color);
        }
    }

    #[test]
    fn test_only_default_skips_background() {
        for template in Template::ALL {
            let theme = Theme::from_template(template);
            assert_eq!(theme.paints_background(), template != Template::Default);
        }
    }
}
