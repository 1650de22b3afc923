// ============================================================================
// WATERMARK PIPELINE — font → tiles → rotate/crop → composite → PNG
// ============================================================================

use std::path::Path;
use std::time::Instant;

use image::{RgbImage, RgbaImage};
use log::debug;

use crate::config::WatermarkConfig;
use crate::error::Result;
use crate::io::{load_image, write_png};
use crate::ops::composite::{composite_over, flatten_to_rgb};
use crate::ops::text::resolve_font;
use crate::ops::tiles::build_tile_layer;
use crate::ops::transform::rotate_and_crop;

/// Watermark an in-memory image. The result always has the source's dimensions.
pub fn apply_watermark(source: &RgbaImage, config: &WatermarkConfig) -> RgbImage {
    let (w, h) = source.dimensions();
    let start = Instant::now();

    // -- Step 1: Font -----------------------------------------------------
    let font = resolve_font(&config.font_candidates, config.font_size_for(w), config.fallback_scale);
    debug!("font: {}", font.describe());

    // -- Step 2: Tile layer -----------------------------------------------
    let layer = build_tile_layer(&font, config, w, h);

    // -- Step 3: Rotate + crop back to W×H --------------------------------
    let overlay = rotate_and_crop(&layer.image, config.angle_degrees, w, h);
    drop(layer);

    // -- Step 4: Composite + flatten --------------------------------------
    let mut base = source.clone();
    composite_over(&mut base, &overlay);
    let out = flatten_to_rgb(base);

    debug!("watermarked {}x{} in {:.0}ms", w, h, start.elapsed().as_secs_f64() * 1000.0);
    out
}

/// Read `input`, watermark it and write a PNG to `output`.
pub fn watermark_file(input: &Path, output: &Path, config: &WatermarkConfig) -> Result<()> {
    let source = load_image(input)?;
    debug!("loaded {} ({}x{})", input.display(), source.width(), source.height());
    let result = apply_watermark(&source, config);
    write_png(&result, output)
}
