use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage, RgbaImage};

use crate::error::{Result, WatermarkError};

/// Decode any raster format the `image` crate understands into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|source| WatermarkError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Encode `image` as PNG at `path`, creating or truncating the file.
/// The extension of `path` is ignored: output is always PNG.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    let io_err = |source: std::io::Error| WatermarkError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    PngEncoder::new(&mut writer)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .map_err(|source| WatermarkError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    writer.flush().map_err(io_err)
}
