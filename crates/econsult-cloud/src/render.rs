//! PNG rendering of a computed word-cloud layout.
//!
//! Glyphs come from a system TTF located at startup (`ECONSULT_FONT`
//! override, then common Linux/macOS candidates). When no font can be
//! loaded the renderer degrades to solid placeholder blocks so the image
//! endpoint still works; the interactive layout is unaffected either way.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use tracing::warn;

use crate::layout::{compute_layout, word_box, WordPlacement};
use econsult_core::{Error, Result, WordCloudSettings};
use econsult_text::FALLBACK_TERMS;

/// Fixed color palette, cycled in placement order.
const PALETTE: &[[u8; 4]] = &[
    [59, 130, 246, 255],  // blue
    [239, 68, 68, 255],   // red
    [34, 197, 94, 255],   // green
    [245, 158, 11, 255],  // amber
    [100, 116, 139, 255], // slate
    [168, 85, 247, 255],  // purple
];

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Candidate system font paths, probed in order.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
];

/// Rendered cloud: the bitmap plus the placements that produced it.
pub struct WordCloudArt {
    pub image: RgbaImage,
    pub words: Vec<WordPlacement>,
}

/// Word-cloud renderer bound to a canvas size and (optionally) a font.
pub struct WordCloudRenderer {
    width: u32,
    height: u32,
    font: Option<FontVec>,
}

impl WordCloudRenderer {
    pub fn new(settings: &WordCloudSettings) -> Self {
        let font = load_font();
        if font.is_none() {
            warn!("No TTF font found; word-cloud images will use placeholder blocks");
        }
        Self {
            width: settings.width,
            height: settings.height,
            font,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Compute placements only. Empty input substitutes the fallback terms.
    pub fn layout(&self, freqs: &[(String, f64)]) -> Vec<WordPlacement> {
        if freqs.is_empty() {
            let fallback: Vec<(String, f64)> = FALLBACK_TERMS
                .iter()
                .map(|&(t, w)| (t.to_string(), w))
                .collect();
            return compute_layout(&fallback, self.width, self.height);
        }
        compute_layout(freqs, self.width, self.height)
    }

    /// One placement pass feeding both the bitmap and the layout records.
    pub fn generate(&self, freqs: &[(String, f64)]) -> WordCloudArt {
        let words = self.layout(freqs);
        let mut image = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);

        for (i, word) in words.iter().enumerate() {
            let color = Rgba(PALETTE[i % PALETTE.len()]);
            match &self.font {
                Some(font) => self.draw_word(&mut image, font, word, color),
                None => self.draw_placeholder(&mut image, word, color),
            }
        }

        WordCloudArt { image, words }
    }

    /// Render the cloud and write the PNG to `path`, overwriting any prior
    /// file. Returns the layout that was rendered.
    pub fn render_to(&self, path: &Path, freqs: &[(String, f64)]) -> Result<Vec<WordPlacement>> {
        let art = self.generate(freqs);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        art.image
            .save(path)
            .map_err(|e| Error::Render(format!("failed to write {}: {}", path.display(), e)))?;
        Ok(art.words)
    }

    fn draw_word(&self, image: &mut RgbaImage, font: &FontVec, word: &WordPlacement, color: Rgba<u8>) {
        let (box_w, box_h) = word_box(&word.text, word.font_size, 0);
        let glyph_buf = rasterize_word(font, &word.text, word.font_size, box_w as u32, box_h as u32, color);

        if word.orientation == 90 {
            // Rotate 90 degrees clockwise into the vertical box.
            for (sx, sy, px) in glyph_buf.enumerate_pixels() {
                if px.0[3] == 0 {
                    continue;
                }
                let dx = word.x + (box_h as i64 - 1 - sy as i64) as i32;
                let dy = word.y + sx as i32;
                blend_pixel(image, dx, dy, *px);
            }
        } else {
            for (sx, sy, px) in glyph_buf.enumerate_pixels() {
                if px.0[3] == 0 {
                    continue;
                }
                blend_pixel(image, word.x + sx as i32, word.y + sy as i32, *px);
            }
        }
    }

    fn draw_placeholder(&self, image: &mut RgbaImage, word: &WordPlacement, color: Rgba<u8>) {
        let (w, h) = word_box(&word.text, word.font_size, word.orientation);
        for dy in 1..h.saturating_sub(1) {
            for dx in 1..w.saturating_sub(1) {
                blend_pixel(image, word.x + dx, word.y + dy, color);
            }
        }
    }
}

/// Rasterize one horizontal word into an alpha-blended buffer.
fn rasterize_word(
    font: &FontVec,
    text: &str,
    font_size: u32,
    buf_w: u32,
    buf_h: u32,
    color: Rgba<u8>,
) -> RgbaImage {
    let mut buf = RgbaImage::from_pixel(buf_w, buf_h, Rgba([0, 0, 0, 0]));
    let scale = PxScale::from(font_size as f32);
    let scaled = font.as_scaled(scale);

    let mut caret = 0.0f32;
    let baseline = scaled.ascent();
    let mut prev: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev_id) = prev {
            caret += scaled.kern(prev_id, id);
        }
        let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x < 0 || y < 0 || x >= buf_w as i32 || y >= buf_h as i32 {
                    return;
                }
                let alpha = (coverage * color.0[3] as f32) as u8;
                if alpha > 0 {
                    buf.put_pixel(
                        x as u32,
                        y as u32,
                        Rgba([color.0[0], color.0[1], color.0[2], alpha]),
                    );
                }
            });
        }
    }

    buf
}

fn blend_pixel(image: &mut RgbaImage, x: i32, y: i32, px: Rgba<u8>) {
    if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
        return;
    }
    let alpha = px.0[3] as f32 / 255.0;
    let dest = image.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        dest.0[c] = (px.0[c] as f32 * alpha + dest.0[c] as f32 * (1.0 - alpha)) as u8;
    }
    dest.0[3] = 255;
}

/// Probe `ECONSULT_FONT` and well-known system paths for a usable TTF.
fn load_font() -> Option<FontVec> {
    let mut candidates: Vec<String> = Vec::new();
    if let Ok(path) = std::env::var("ECONSULT_FONT") {
        candidates.push(path);
    }
    candidates.extend(FONT_CANDIDATES.iter().map(|s| s.to_string()));

    for path in candidates {
        if let Ok(bytes) = std::fs::read(&path) {
            match FontVec::try_from_vec(bytes) {
                Ok(font) => {
                    tracing::info!("Word-cloud font: {}", path);
                    return Some(font);
                }
                Err(e) => warn!("Skipping unusable font {}: {}", path, e),
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> WordCloudSettings {
        WordCloudSettings::default()
    }

    fn freqs(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|&(t, w)| (t.to_string(), w)).collect()
    }

    #[test]
    fn test_empty_freqs_uses_fallback_terms() {
        let renderer = WordCloudRenderer::new(&settings());
        let words = renderer.layout(&[]);
        let terms: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert!(terms.contains(&"feedback"));
        assert!(terms.contains(&"policy"));
        assert!(terms.contains(&"comment"));
    }

    #[test]
    fn test_generate_image_dimensions() {
        let renderer = WordCloudRenderer::new(&settings());
        let art = renderer.generate(&freqs(&[("policy", 4.0), ("clause", 2.0)]));
        assert_eq!(art.image.width(), 900);
        assert_eq!(art.image.height(), 500);
        assert_eq!(art.words.len(), 2);
    }

    #[test]
    fn test_generate_marks_canvas() {
        let renderer = WordCloudRenderer::new(&settings());
        let art = renderer.generate(&freqs(&[("policy", 4.0)]));
        let touched = art
            .image
            .pixels()
            .any(|p| p.0 != [255, 255, 255, 255]);
        assert!(touched, "rendering left the canvas blank");
    }

    #[test]
    fn test_render_to_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("static").join("wordcloud.png");
        let renderer = WordCloudRenderer::new(&settings());

        let words = renderer
            .render_to(&path, &freqs(&[("policy", 4.0), ("clause", 2.0)]))
            .unwrap();
        assert!(path.exists());
        assert_eq!(words.len(), 2);

        // Overwrite on the next run.
        renderer.render_to(&path, &freqs(&[("other", 1.0)])).unwrap();
        assert!(path.exists());
    }
}
