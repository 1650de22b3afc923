// ============================================================================
// COMPOSITING — "over" blend of the watermark onto the source, flatten to RGB
// ============================================================================

use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

/// Straight-alpha "over": `top` on `base`.
///
/// `out_a = a_t + a_b (1 − a_t)`
/// `out_c = (c_t a_t + c_b a_b (1 − a_t)) / out_a`
pub fn blend_over(base: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    // Fast path: fully transparent top pixel — nothing to blend
    if top[3] == 0 {
        return base;
    }
    // Fast path: fully opaque top pixel replaces the base
    if top[3] == 255 {
        return top;
    }

    let top_a = top[3] as f32 / 255.0;
    let base_a = base[3] as f32 / 255.0;
    let out_a = top_a + base_a * (1.0 - top_a);

    let channel = |t: u8, b: u8| -> u8 {
        let t = t as f32 / 255.0;
        let b = b as f32 / 255.0;
        let c = (t * top_a + b * base_a * (1.0 - top_a)) / out_a;
        (c * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(top[0], base[0]),
        channel(top[1], base[1]),
        channel(top[2], base[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Blend `overlay` onto `base` in place. Both images must share dimensions;
/// any excess on either side is ignored.
pub fn composite_over(base: &mut RgbaImage, overlay: &RgbaImage) {
    let w = base.width().min(overlay.width());
    let h = base.height().min(overlay.height());
    for y in 0..h {
        for x in 0..w {
            let top = *overlay.get_pixel(x, y);
            let px = base.get_pixel_mut(x, y);
            *px = blend_over(*px, top);
        }
    }
}

/// Drop the alpha channel.
pub fn flatten_to_rgb(image: RgbaImage) -> RgbImage {
    DynamicImage::ImageRgba8(image).to_rgb8()
}
