use std::path::Path;

use anyhow::{Context as _, Result};
use eframe::egui;
use image::RgbaImage;
use image::imageops::FilterType;
use log::info;

/// Exports render at twice the logical resolution.
pub const EXPORT_PIXELS_PER_POINT: f32 = 2.0;

/// Deterministic export name from the 0-based slide index (`slide-1.png`
/// for the first slide).
pub fn export_filename(index: usize) -> String {
    format!("slide-{}.png", index + 1)
}

/// Crop a viewport screenshot to the canvas region and write it as a PNG
/// at 2x logical pixel density. With `clear_color` set, the background
/// region in that color becomes transparent (the default template exports
/// with a transparent background); matching pixels enclosed by slide
/// content are left untouched. The PNG is encoded fully in memory first,
/// so a failure leaves nothing on disk.
pub fn save_region(
    screenshot: &egui::ColorImage,
    region: egui::Rect,
    pixels_per_point: f32,
    clear_color: Option<egui::Color32>,
    path: &Path,
) -> Result<()> {
    let target_w = (region.width() * EXPORT_PIXELS_PER_POINT).round() as u32;
    let target_h = (region.height() * EXPORT_PIXELS_PER_POINT).round() as u32;
    anyhow::ensure!(target_w > 0 && target_h > 0, "empty export region");

    let cropped = screenshot.region(&region, Some(pixels_per_point));
    let width = cropped.width() as u32;
    let height = cropped.height() as u32;
    anyhow::ensure!(width > 0 && height > 0, "screenshot missed the canvas region");

    let clear_mask = clear_color.map(|clear| background_mask(&cropped, clear));
    let mut rgba = Vec::with_capacity(cropped.pixels.len() * 4);
    for (i, pixel) in cropped.pixels.iter().enumerate() {
        if clear_mask.as_ref().is_some_and(|mask| mask[i]) {
            rgba.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            rgba.extend_from_slice(&[pixel.r(), pixel.g(), pixel.b(), pixel.a()]);
        }
    }

    let img =
        RgbaImage::from_raw(width, height, rgba).context("screenshot buffer size mismatch")?;
    let img = if (width, height) != (target_w, target_h) {
        image::imageops::resize(&img, target_w, target_h, FilterType::CatmullRom)
    } else {
        img
    };

    let mut bytes: Vec<u8> = Vec::new();
    {
        use image::ImageEncoder as _;
        let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
        encoder.write_image(img.as_raw(), target_w, target_h, image::ExtendedColorType::Rgba8)?;
    }
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("exported {}x{} to {}", target_w, target_h, path.display());
    Ok(())
}

/// Pixels in the clear color that are reachable from the image border,
/// grown inward with 4-way connectivity. Only this region is the stage
/// background; same-colored pixels enclosed by content stay opaque.
fn background_mask(image: &egui::ColorImage, clear: egui::Color32) -> Vec<bool> {
    let (w, h) = (image.width(), image.height());
    let mut mask = vec![false; w * h];
    let mut stack: Vec<usize> = Vec::new();

    let mut seed = |idx: usize, mask: &mut Vec<bool>, stack: &mut Vec<usize>| {
        if !mask[idx] && image.pixels[idx] == clear {
            mask[idx] = true;
            stack.push(idx);
        }
    };
    for x in 0..w {
        seed(x, &mut mask, &mut stack);
        seed((h - 1) * w + x, &mut mask, &mut stack);
    }
    for y in 0..h {
        seed(y * w, &mut mask, &mut stack);
        seed(y * w + (w - 1), &mut mask, &mut stack);
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % w, idx / w);
        let mut visit = |nidx: usize| {
            if !mask[nidx] && image.pixels[nidx] == clear {
                mask[nidx] = true;
                stack.push(nidx);
            }
        };
        if x > 0 {
            visit(idx - 1);
        }
        if x + 1 < w {
            visit(idx + 1);
        }
        if y > 0 {
            visit(idx - w);
        }
        if y + 1 < h {
            visit(idx + w);
        }
    }
    mask
}
