use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, HIRAGANA_FONTS, LATIN_FONTS};
use image::RgbaImage;
use log::debug;

use crate::error::WatermarkError;

/// Side of one built-in bitmap glyph cell, before scaling.
const BITMAP_CELL: u32 = 8;

/// The font the watermark is drawn with.
pub enum WatermarkFont {
    /// A TrueType/OpenType face loaded from disk. `size` is the em size in
    /// pixels; `scale` is the equivalent ab_glyph line-height scale.
    Outline {
        font: FontArc,
        size: f32,
        scale: PxScale,
        source: PathBuf,
    },
    /// The built-in 8×8 bitmap font, upscaled by an integer factor.
    Bitmap { scale: u32 },
}

/// Pixel extent of a rendered string. Both sides are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextBounds {
    pub width: u32,
    pub height: u32,
}

impl TextBounds {
    fn clamped(width: u32, height: u32) -> Self {
        Self { width: width.max(1), height: height.max(1) }
    }
}

/// Pick the first candidate font file that loads, or fall back to the
/// built-in bitmap font. Never fails: unusable candidates are skipped.
pub fn resolve_font<P: AsRef<Path>>(candidates: &[P], size: f32, fallback_scale: u32) -> WatermarkFont {
    for candidate in candidates {
        let path = candidate.as_ref();
        match load_font_file(path) {
            Ok(font) => {
                let scale = em_px_scale(&font, size);
                debug!("using font {} at {}px (scale {:.2})", path.display(), size, scale.y);
                return WatermarkFont::Outline { font, size, scale, source: path.to_path_buf() };
            }
            Err(e) => debug!("skipping {}", e),
        }
    }
    debug!("no font candidate loaded, using built-in bitmap font (x{})", fallback_scale.max(1));
    WatermarkFont::Bitmap { scale: fallback_scale.max(1) }
}

/// Read and parse one font file. Collections (`.ttc`) yield their first face.
pub fn load_font_file(path: &Path) -> Result<FontArc, WatermarkError> {
    let bytes = std::fs::read(path).map_err(|e| WatermarkError::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    FontArc::try_from_vec(bytes).map_err(|e| WatermarkError::Font {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// ab_glyph scales by line height (ascent − descent); convert an em size in
/// pixels to that scale so glyph advances match a `size`-pixel font.
pub fn em_px_scale(font: &FontArc, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(em_px * font.height_unscaled() / units),
        _ => PxScale::from(em_px),
    }
}

impl WatermarkFont {
    /// Short human description for log lines.
    pub fn describe(&self) -> String {
        match self {
            WatermarkFont::Outline { size, source, .. } => format!("{} @ {}px", source.display(), size),
            WatermarkFont::Bitmap { scale } => format!("built-in 8x8 bitmap x{}", scale),
        }
    }

    /// Bounding box of `text` as it would be stamped.
    pub fn measure(&self, text: &str) -> TextBounds {
        match self {
            WatermarkFont::Outline { font, scale, .. } => {
                let (min_x, min_y, max_x, max_y) = outline_extent(font, text, *scale);
                if min_x >= max_x || min_y >= max_y {
                    return TextBounds::clamped(0, 0);
                }
                TextBounds::clamped((max_x - min_x).round() as u32, (max_y - min_y).round() as u32)
            }
            WatermarkFont::Bitmap { scale } => {
                let chars = text.chars().count() as u32;
                TextBounds::clamped(chars * BITMAP_CELL * scale, BITMAP_CELL * scale)
            }
        }
    }

    /// Rasterize `text` once into a reusable coverage stamp.
    pub fn rasterize(&self, text: &str) -> TextStamp {
        let bounds = self.measure(text);
        let coverage = match self {
            WatermarkFont::Outline { font, scale, .. } => outline_coverage(font, text, *scale),
            WatermarkFont::Bitmap { scale } => bitmap_coverage(text, *scale),
        };
        TextStamp { coverage, bounds }
    }
}

/// Lay out a single line left-aligned at x=0 with the baseline at `ascent`.
/// Returns `(glyph, x, baseline_y)` triples.
fn layout_line(font: &FontArc, text: &str, scale: PxScale) -> Vec<(GlyphId, f32, f32)> {
    let scaled = font.as_scaled(scale);
    let ascent = scaled.ascent();

    let mut glyphs = Vec::new();
    let mut cursor_x = 0.0f32;
    let mut last_glyph: Option<GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = last_glyph {
            cursor_x += scaled.kern(prev, glyph_id);
        }
        glyphs.push((glyph_id, cursor_x, ascent));
        cursor_x += scaled.h_advance(glyph_id);
        last_glyph = Some(glyph_id);
    }
    glyphs
}

/// Union of the pixel bounds of every outlined glyph: `(min_x, min_y, max_x, max_y)`.
fn outline_extent(font: &FontArc, text: &str, scale: PxScale) -> (f32, f32, f32, f32) {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;

    for (glyph_id, gx, gy) in layout_line(font, text, scale) {
        let glyph = glyph_id.with_scale_and_position(scale, point(gx, gy));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let b = outlined.px_bounds();
            min_x = min_x.min(b.min.x);
            min_y = min_y.min(b.min.y);
            max_x = max_x.max(b.max.x);
            max_y = max_y.max(b.max.y);
        }
    }
    (min_x, min_y, max_x, max_y)
}

fn outline_coverage(font: &FontArc, text: &str, scale: PxScale) -> Vec<(i32, i32, f32)> {
    let mut coverage = Vec::new();
    for (glyph_id, gx, gy) in layout_line(font, text, scale) {
        let glyph = glyph_id.with_scale_and_position(scale, point(gx, gy));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let b = outlined.px_bounds();
            let (bx, by) = (b.min.x as i32, b.min.y as i32);
            outlined.draw(|px, py, cov| {
                if cov > 0.0 {
                    coverage.push((bx + px as i32, by + py as i32, cov));
                }
            });
        }
    }
    coverage
}

/// 8×8 glyph for `ch` from the basic, Latin-1, Greek or Hiragana sets;
/// anything else (CJK ideographs, full-width punctuation) becomes `?`.
fn bitmap_glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| HIRAGANA_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
}

/// Nearest-neighbour upscale of the 8×8 glyph bits.
fn bitmap_coverage(text: &str, scale: u32) -> Vec<(i32, i32, f32)> {
    let scale = scale.max(1);
    let cell = (BITMAP_CELL * scale) as i32;
    let mut coverage = Vec::new();

    for (idx, ch) in text.chars().enumerate() {
        let Some(glyph) = bitmap_glyph(ch) else {
            continue;
        };
        let cursor_x = idx as i32 * cell;
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..BITMAP_CELL {
                // bit 0 is the leftmost column
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let base_x = cursor_x + (col * scale) as i32;
                let base_y = row as i32 * scale as i32;
                for dy in 0..scale as i32 {
                    for dx in 0..scale as i32 {
                        coverage.push((base_x + dx, base_y + dy, 1.0));
                    }
                }
            }
        }
    }
    coverage
}

/// A pre-rasterized text run that can be stamped many times.
///
/// Coverage coordinates are relative to the layout origin (top-left of the
/// line box, baseline at the font's ascent).
pub struct TextStamp {
    coverage: Vec<(i32, i32, f32)>,
    pub bounds: TextBounds,
}

impl TextStamp {
    /// Number of covered pixels in one stamp.
    pub fn pixel_count(&self) -> usize {
        self.coverage.len()
    }

    /// Stamp onto `canvas` with the layout origin at `(x, y)`.
    ///
    /// Each pixel takes `color` with alpha `color[3] × coverage`; where stamps
    /// overlap the larger alpha wins, so the layer never exceeds `color[3]`.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        for &(px, py, cov) in &self.coverage {
            let cx = x + px;
            let cy = y + py;
            if cx < 0 || cy < 0 || cx >= w || cy >= h {
                continue;
            }
            let a = (color[3] as f32 * cov.min(1.0)).round() as u8;
            if a == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            if dst[3] < a {
                *dst = image::Rgba([color[0], color[1], color[2], a]);
            }
        }
    }
}
