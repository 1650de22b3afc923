// ============================================================================
// WATERMARK CONFIGURATION — fixed constants for one watermarking run
// ============================================================================

use std::path::PathBuf;

/// Immutable settings handed to the watermark pipeline.
///
/// The CLI always runs with [`WatermarkConfig::default`]; the struct exists so
/// the pipeline never reaches for module-level constants and tests can tweak a
/// single knob (e.g. an empty font list to force the built-in font).
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkConfig {
    /// Text stamped across the image.
    pub text: String,
    /// Counter-clockwise rotation of the tiled layer, in degrees.
    pub angle_degrees: f32,
    /// RGB fill of the stamped glyphs.
    pub fill: [u8; 3],
    /// Alpha of the stamped glyphs (25 of 255, roughly a tenth).
    pub opacity: u8,
    /// Lower bound for the outline font pixel size.
    pub min_font_size: u32,
    /// Font size scales as `width / font_size_divisor`.
    pub font_size_divisor: u32,
    /// Horizontal gap between stamps as a multiple of the text width.
    pub horizontal_pad_factor: f32,
    /// Vertical gap between rows as a multiple of the text height.
    pub vertical_pad_factor: f32,
    /// Integer upscale of the 8×8 built-in font. Independent of `font_size_for`.
    pub fallback_scale: u32,
    /// Font files tried in order; the first one that parses wins.
    pub font_candidates: Vec<PathBuf>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            text: "Innomad 一挪迈（X: @innomad_io）".to_string(),
            angle_degrees: 30.0,
            fill: [120, 120, 120],
            opacity: 25,
            min_font_size: 24,
            font_size_divisor: 30,
            horizontal_pad_factor: 1.2,
            vertical_pad_factor: 5.0,
            fallback_scale: 2,
            font_candidates: default_font_candidates(),
        }
    }
}

impl WatermarkConfig {
    /// Pixel size for the outline font on an image `width` pixels wide:
    /// `max(min_font_size, floor(width / font_size_divisor))`.
    pub fn font_size_for(&self, width: u32) -> f32 {
        let scaled = width / self.font_size_divisor.max(1);
        scaled.max(self.min_font_size) as f32
    }

    /// Stamp colour including the watermark alpha.
    pub fn fill_rgba(&self) -> [u8; 4] {
        [self.fill[0], self.fill[1], self.fill[2], self.opacity]
    }
}

/// CJK-capable faces first (the text mixes Latin and Chinese), then the
/// common Latin sans fonts, which render the ASCII part only.
fn default_font_candidates() -> Vec<PathBuf> {
    [
        // macOS
        "/Library/Fonts/Arial Unicode.ttf",
        "/System/Library/Fonts/STHeiti Medium.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        // Linux
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
        // Windows
        "C:\\Windows\\Fonts\\msyh.ttc",
        // Latin-only
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "C:\\Windows\\Fonts\\arialbd.ttf",
        "arial.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}
