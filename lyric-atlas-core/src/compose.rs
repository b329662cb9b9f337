//! Atlas bitmap assembly.
//!
//! Packed cell bitmaps are copied into a single texture and a blue drop
//! shadow is laid underneath. All work happens on premultiplied RGBA;
//! [`unpremultiply`] converts to straight alpha for image files.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use lyric_atlas_config::DropShadowConfig;

use crate::packer::PackedAtlas;

/// Copy every cell bitmap into a texture of the atlas size.
///
/// Overlapping pixels keep the per-channel maximum. Cells are clipped at
/// the texture edges.
pub fn compose_atlas(atlas: &PackedAtlas) -> RgbaImage {
    let mut canvas = RgbaImage::new(atlas.texture_size.width, atlas.texture_size.height);

    for packed in &atlas.glyphs {
        let Some(bitmap) = &packed.bitmap else {
            continue;
        };
        let origin_x = packed.cell_origin.0.round() as i64;
        let origin_y = packed.cell_origin.1.round() as i64;
        blit_max(&mut canvas, bitmap, origin_x, origin_y);
    }

    canvas
}

/// Compose the atlas and apply the drop shadow when it is enabled.
pub fn render_atlas(atlas: &PackedAtlas, shadow: &DropShadowConfig) -> RgbaImage {
    let canvas = compose_atlas(atlas);
    if shadow.enabled {
        apply_drop_shadow(&canvas, shadow)
    } else {
        canvas
    }
}

fn blit_max(canvas: &mut RgbaImage, cell: &RgbaImage, origin_x: i64, origin_y: i64) {
    let (canvas_w, canvas_h) = (i64::from(canvas.width()), i64::from(canvas.height()));
    for (x, y, pixel) in cell.enumerate_pixels() {
        let tx = origin_x + i64::from(x);
        let ty = origin_y + i64::from(y);
        if tx < 0 || ty < 0 || tx >= canvas_w || ty >= canvas_h {
            continue;
        }
        let target = canvas.get_pixel_mut(tx as u32, ty as u32);
        for (dst, src) in target.0.iter_mut().zip(pixel.0) {
            *dst = (*dst).max(src);
        }
    }
}

/// Pixel offset of the shadow; 0 degrees points right, angles grow
/// counter-clockwise, so 310 lands below and to the right.
pub fn shadow_offset(direction: f64, depth: f64) -> (i64, i64) {
    let radians = direction.to_radians();
    let dx = (radians.cos() * depth).round() as i64;
    let dy = (-radians.sin() * depth).round() as i64;
    (dx, dy)
}

/// Draw a blurred blue copy of `canvas`'s coverage beneath it.
pub fn apply_drop_shadow(canvas: &RgbaImage, shadow: &DropShadowConfig) -> RgbaImage {
    let (width, height) = canvas.dimensions();
    let (dx, dy) = shadow_offset(shadow.direction, shadow.depth);

    let mut mask = GrayImage::new(width, height);
    for (x, y, pixel) in canvas.enumerate_pixels() {
        let tx = i64::from(x) + dx;
        let ty = i64::from(y) + dy;
        if tx < 0 || ty < 0 || tx >= i64::from(width) || ty >= i64::from(height) {
            continue;
        }
        mask.put_pixel(tx as u32, ty as u32, Luma([pixel.0[3]]));
    }

    let sigma = (shadow.blur_radius / 2.0) as f32;
    let mask = if sigma > 0.0 {
        image::imageops::blur(&mask, sigma)
    } else {
        mask
    };

    let opacity = shadow.opacity.clamp(0.0, 1.0);
    let mut out = RgbaImage::new(width, height);
    for (x, y, target) in out.enumerate_pixels_mut() {
        let shadow_alpha = (f64::from(mask.get_pixel(x, y).0[0]) * opacity).round() as u8;
        let below = Rgba([0, 0, shadow_alpha, shadow_alpha]);
        *target = over(*canvas.get_pixel(x, y), below);
    }
    out
}

/// Premultiplied source-over.
fn over(top: Rgba<u8>, bottom: Rgba<u8>) -> Rgba<u8> {
    let remaining = 255 - u16::from(top.0[3]);
    let mut out = [0u8; 4];
    for (i, value) in out.iter_mut().enumerate() {
        let blended = u16::from(top.0[i]) + (u16::from(bottom.0[i]) * remaining + 127) / 255;
        *value = blended.min(255) as u8;
    }
    Rgba(out)
}

/// Convert premultiplied RGBA to straight alpha in place.
pub fn unpremultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = u32::from(pixel.0[3]);
        if alpha == 0 || alpha == 255 {
            continue;
        }
        for channel in &mut pixel.0[..3] {
            *channel = ((u32::from(*channel) * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
}
