// ============================================================================
// TRANSFORM OPERATIONS — rotate about center, center crop
// ============================================================================

use image::{imageops, Rgba, RgbaImage};

/// Top-left corner of a centered `width × height` window inside `img`.
pub fn center_crop_origin(img_w: u32, img_h: u32, width: u32, height: u32) -> (u32, u32) {
    (
        (img_w / 2).saturating_sub(width / 2),
        (img_h / 2).saturating_sub(height / 2),
    )
}

/// Rotate `src` counter-clockwise by `degrees` about its center.
///
/// The output has the same size as the input: corners that rotate out are
/// clipped and uncovered regions stay transparent. Sampling is bilinear.
pub fn rotate_about_center(src: &RgbaImage, degrees: f32) -> RgbaImage {
    rotate_window(src, degrees, 0, 0, src.width(), src.height())
}

/// Extract the centered `width × height` rectangle of `img`.
pub fn crop_center(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (left, top) = center_crop_origin(img.width(), img.height(), width, height);
    imageops::crop_imm(img, left, top, width, height).to_image()
}

/// `crop_center(&rotate_about_center(src, degrees), width, height)` without
/// materialising the full rotated canvas; only the crop window is sampled.
pub fn rotate_and_crop(src: &RgbaImage, degrees: f32, width: u32, height: u32) -> RgbaImage {
    let (left, top) = center_crop_origin(src.width(), src.height(), width, height);
    let width = width.min(src.width().saturating_sub(left));
    let height = height.min(src.height().saturating_sub(top));
    rotate_window(src, degrees, left, top, width, height)
}

/// Rotate `src` about its center and return the `width × height` window whose
/// top-left corner sits at `(left, top)` in rotated-canvas coordinates.
fn rotate_window(src: &RgbaImage, degrees: f32, left: u32, top: u32, width: u32, height: u32) -> RgbaImage {
    let mut dst = RgbaImage::new(width, height);
    let cx = src.width() as f32 * 0.5;
    let cy = src.height() as f32 * 0.5;

    // Inverse map: destination pixel center → source position.
    // A visual counter-clockwise turn in y-down space.
    let (s, c) = degrees.to_radians().sin_cos();

    for (dx, dy, px) in dst.enumerate_pixels_mut() {
        let u = (left + dx) as f32 + 0.5 - cx;
        let v = (top + dy) as f32 + 0.5 - cy;
        let src_x = u * c - v * s + cx - 0.5;
        let src_y = u * s + v * c + cy - 0.5;
        *px = bilinear_sample(src, src_x, src_y);
    }
    dst
}

/// Bilinear interpolation sampling from an RgbaImage; outside is transparent.
fn bilinear_sample(img: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let sample = |sx: i32, sy: i32| -> [f32; 4] {
        if sx < 0 || sy < 0 || sx >= img.width() as i32 || sy >= img.height() as i32 {
            [0.0; 4]
        } else {
            let p = img.get_pixel(sx as u32, sy as u32);
            [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32]
        }
    };

    let tl = sample(x0, y0);
    let tr = sample(x0 + 1, y0);
    let bl = sample(x0, y0 + 1);
    let br = sample(x0 + 1, y0 + 1);

    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = lerp(tl[c], tr[c], fx);
        let bot = lerp(bl[c], br[c], fx);
        out[c] = lerp(top, bot, fy).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}
