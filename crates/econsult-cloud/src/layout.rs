//! Deterministic space-filling word placement.
//!
//! Words are placed largest-first along an archimedean spiral from the
//! canvas center, checking candidate boxes against everything already
//! placed. Horizontal placement is tried first with a vertical retry.
//! No randomness: identical frequencies always produce identical layouts,
//! so clients can re-render the same arrangement.

use serde::Serialize;

/// Smallest font used for the lightest word.
pub const MIN_FONT_SIZE: u32 = 16;
/// Largest font used for the heaviest word.
pub const MAX_FONT_SIZE: u32 = 96;

/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Gap kept between placed word boxes, in pixels.
const BOX_MARGIN: i32 = 2;
/// Spiral granularity.
const SPIRAL_ANGLE_STEP: f64 = 0.35;
const SPIRAL_RADIUS_STEP: f64 = 0.55;
const SPIRAL_MAX_STEPS: usize = 3000;

/// Per-word rendering metadata, reproducible client-side.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WordPlacement {
    pub text: String,
    pub font_size: u32,
    /// Left edge of the word box.
    pub x: i32,
    /// Top edge of the word box.
    pub y: i32,
    /// 0 = horizontal, 90 = vertical.
    pub orientation: u32,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w + BOX_MARGIN
            && other.x < self.x + self.w + BOX_MARGIN
            && self.y < other.y + other.h + BOX_MARGIN
            && other.y < self.y + self.h + BOX_MARGIN
    }
}

/// Pixel box occupied by a word at a given size and orientation.
pub fn word_box(text: &str, font_size: u32, orientation: u32) -> (i32, i32) {
    let advance = (CHAR_WIDTH_RATIO * font_size as f64 * text.chars().count() as f64).ceil() as i32;
    let line = font_size as i32 + 4;
    if orientation == 90 {
        (line, advance)
    } else {
        (advance, line)
    }
}

/// Compute placements for `freqs` (term, weight) on a `width`×`height`
/// canvas. Words that cannot be placed without overlap are skipped.
pub fn compute_layout(freqs: &[(String, f64)], width: u32, height: u32) -> Vec<WordPlacement> {
    let mut ranked: Vec<(&str, f64)> = freqs.iter().map(|(t, w)| (t.as_str(), *w)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(b.0))
    });

    let max_weight = ranked.first().map(|&(_, w)| w).unwrap_or(1.0);
    let min_weight = ranked.last().map(|&(_, w)| w).unwrap_or(1.0);
    let span = max_weight - min_weight;

    let mut placed: Vec<Rect> = Vec::new();
    let mut out = Vec::new();

    for (term, weight) in ranked {
        // Equal weights all render at full size.
        let ratio = if span < f64::EPSILON {
            1.0
        } else {
            (weight - min_weight) / span
        };
        let font_size =
            MIN_FONT_SIZE + (ratio * (MAX_FONT_SIZE - MIN_FONT_SIZE) as f64).round() as u32;

        let hit = [0u32, 90].iter().find_map(|&orientation| {
            let (w, h) = word_box(term, font_size, orientation);
            spiral_place(w, h, width, height, &placed).map(|rect| (orientation, rect))
        });

        if let Some((orientation, rect)) = hit {
            placed.push(rect);
            out.push(WordPlacement {
                text: term.to_string(),
                font_size,
                x: rect.x,
                y: rect.y,
                orientation,
            });
        }
    }

    out
}

/// Walk the spiral until a free position is found for a `w`×`h` box.
fn spiral_place(w: i32, h: i32, width: u32, height: u32, placed: &[Rect]) -> Option<Rect> {
    if w > width as i32 || h > height as i32 {
        return None;
    }

    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;

    for step in 0..SPIRAL_MAX_STEPS {
        let angle = step as f64 * SPIRAL_ANGLE_STEP;
        let radius = step as f64 * SPIRAL_RADIUS_STEP;
        let x = (cx + radius * angle.cos() - w as f64 / 2.0).round() as i32;
        let y = (cy + radius * angle.sin() - h as f64 / 2.0).round() as i32;

        let rect = Rect { x, y, w, h };
        if x < 0 || y < 0 || x + w > width as i32 || y + h > height as i32 {
            continue;
        }
        if placed.iter().all(|p| !rect.intersects(p)) {
            return Some(rect);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freqs(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|&(t, w)| (t.to_string(), w)).collect()
    }

    #[test]
    fn test_deterministic() {
        let input = freqs(&[("policy", 12.0), ("tariff", 6.0), ("clause", 3.0)]);
        let a = compute_layout(&input, 900, 500);
        let b = compute_layout(&input, 900, 500);
        assert_eq!(a, b);
    }

    #[test]
    fn test_within_bounds_and_nonempty() {
        let input = freqs(&[("feedback", 5.0), ("policy", 3.0), ("comment", 1.0)]);
        let words = compute_layout(&input, 900, 500);
        assert!(!words.is_empty());
        for word in &words {
            let (w, h) = word_box(&word.text, word.font_size, word.orientation);
            assert!(word.x >= 0 && word.y >= 0);
            assert!(word.x + w <= 900);
            assert!(word.y + h <= 500);
        }
    }

    #[test]
    fn test_no_overlaps() {
        let input = freqs(&[
            ("alpha", 10.0),
            ("bravo", 8.0),
            ("charlie", 6.0),
            ("delta", 4.0),
            ("echo", 2.0),
        ]);
        let words = compute_layout(&input, 900, 500);
        for (i, a) in words.iter().enumerate() {
            for b in words.iter().skip(i + 1) {
                let (aw, ah) = word_box(&a.text, a.font_size, a.orientation);
                let (bw, bh) = word_box(&b.text, b.font_size, b.orientation);
                let overlap = a.x < b.x + bw && b.x < a.x + aw && a.y < b.y + bh && b.y < a.y + ah;
                assert!(!overlap, "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn test_heaviest_word_gets_largest_font() {
        let input = freqs(&[("major", 20.0), ("minor", 1.0)]);
        let words = compute_layout(&input, 900, 500);
        let major = words.iter().find(|w| w.text == "major").unwrap();
        let minor = words.iter().find(|w| w.text == "minor").unwrap();
        assert_eq!(major.font_size, MAX_FONT_SIZE);
        assert_eq!(minor.font_size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_oversized_word_skipped() {
        let input = freqs(&[("a-very-long-term-that-cannot-possibly-fit", 10.0)]);
        let words = compute_layout(&input, 60, 40);
        assert!(words.is_empty());
    }
}
