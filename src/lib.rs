//! Tilemark — stamp a tiled, rotated, translucent text watermark onto an image.
//!
//! The work happens in [`pipeline::apply_watermark`]:
//! resolve a font, stamp the text grid on a diagonal-safe canvas, rotate it,
//! crop it back to the source size, alpha-composite and flatten to RGB.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logger;
pub mod ops;
pub mod pipeline;

pub use config::WatermarkConfig;
pub use error::{Result, WatermarkError};
pub use pipeline::{apply_watermark, watermark_file};
