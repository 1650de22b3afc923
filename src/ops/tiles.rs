// ============================================================================
// TILE LAYER — repeated watermark text on an oversized transparent canvas
// ============================================================================

use image::RgbaImage;
use log::debug;

use crate::config::WatermarkConfig;
use crate::ops::text::{TextBounds, WatermarkFont};

/// Side of the square working canvas for a `width × height` image:
/// twice the rounded-up diagonal, so any rotation about the center still
/// covers the centered `width × height` crop.
pub fn canvas_side(width: u32, height: u32) -> u32 {
    let (w, h) = (width as f64, height as f64);
    let diag = (w * w + h * h).sqrt().ceil() as u32;
    diag.saturating_mul(2)
}

/// The stamping lattice on a square canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    pub side: u32,
    /// Distance between stamp origins along x (text width + horizontal pad).
    pub step_x: u32,
    /// Distance between stamp origins along y (text height + vertical pad).
    pub step_y: u32,
}

impl TileGrid {
    /// Derive the lattice from measured text. Steps never drop below 1 px.
    pub fn new(side: u32, bounds: TextBounds, horizontal_pad_factor: f32, vertical_pad_factor: f32) -> Self {
        let pad_x = (bounds.width as f32 * horizontal_pad_factor).round().max(0.0) as u32;
        let pad_y = (bounds.height as f32 * vertical_pad_factor).round().max(0.0) as u32;
        Self {
            side,
            step_x: bounds.width.saturating_add(pad_x).max(1),
            step_y: bounds.height.saturating_add(pad_y).max(1),
        }
    }

    pub fn columns(&self) -> u32 {
        self.side.div_ceil(self.step_x)
    }

    pub fn rows(&self) -> u32 {
        self.side.div_ceil(self.step_y)
    }

    /// Total stamps: `ceil(side / step_x) × ceil(side / step_y)`.
    pub fn count(&self) -> u64 {
        self.columns() as u64 * self.rows() as u64
    }

    /// Stamp origins in row-major order.
    pub fn origins(&self) -> impl Iterator<Item = (u32, u32)> {
        let (side, step_x, step_y) = (self.side, self.step_x as usize, self.step_y as usize);
        (0..side)
            .step_by(step_y)
            .flat_map(move |y| (0..side).step_by(step_x).map(move |x| (x, y)))
    }
}

/// The stamped canvas plus the geometry it was built from.
pub struct TileLayer {
    pub image: RgbaImage,
    pub grid: TileGrid,
    pub bounds: TextBounds,
}

/// Build the transparent tile canvas for a `width × height` source image.
pub fn build_tile_layer(font: &WatermarkFont, config: &WatermarkConfig, width: u32, height: u32) -> TileLayer {
    let stamp = font.rasterize(&config.text);
    let bounds = stamp.bounds;
    let side = canvas_side(width, height);
    let grid = TileGrid::new(side, bounds, config.horizontal_pad_factor, config.vertical_pad_factor);

    debug!(
        "tile canvas {}x{}, text {}x{}, step {}x{}, {} stamps",
        side, side, bounds.width, bounds.height, grid.step_x, grid.step_y, grid.count()
    );

    let mut image = RgbaImage::new(side, side);
    let color = config.fill_rgba();
    for (x, y) in grid.origins() {
        stamp.draw(&mut image, x as i32, y as i32, color);
    }

    TileLayer { image, grid, bounds }
}
