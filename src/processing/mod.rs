use anyhow::{Context, Result};
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, Rgba, RgbaImage};
use std::io::Cursor;

/// Pixels within this squared RGB distance of the estimated background color
/// are cleared to transparent.
const BACKGROUND_DISTANCE_SQ: u32 = 3 * 48 * 48;

/// Strip a flat backdrop from an uploaded thumbnail.
///
/// The background color is estimated from the border pixels, matching pixels
/// get their alpha zeroed, and the result is encoded as lossless WebP since
/// WebP keeps the alpha channel intact.
pub fn remove_background(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes).context("Failed to decode uploaded image")?;
    let mut rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let background = estimate_background(&rgba);
    for pixel in rgba.pixels_mut() {
        if distance_sq(pixel, &background) <= BACKGROUND_DISTANCE_SQ {
            pixel.0[3] = 0;
        }
    }

    let mut out = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut out)
        .encode(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
        .context("Failed to encode WebP output")?;
    Ok(out.into_inner())
}

/// Average color of the image border. Thumbnails are shot on a flat backdrop,
/// so the frame is a representative background sample.
fn estimate_background(rgba: &RgbaImage) -> Rgba<u8> {
    let (width, height) = rgba.dimensions();
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    let mut sample = |x: u32, y: u32, sum: &mut [u64; 3], count: &mut u64| {
        let pixel = rgba.get_pixel(x, y);
        for channel in 0..3 {
            sum[channel] += u64::from(pixel.0[channel]);
        }
        *count += 1;
    };

    for x in 0..width {
        sample(x, 0, &mut sum, &mut count);
        sample(x, height - 1, &mut sum, &mut count);
    }
    for y in 0..height {
        sample(0, y, &mut sum, &mut count);
        sample(width - 1, y, &mut sum, &mut count);
    }

    Rgba([
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
        255,
    ])
}

fn distance_sq(a: &Rgba<u8>, b: &Rgba<u8>) -> u32 {
    (0..3)
        .map(|channel| {
            let diff = i32::from(a.0[channel]) - i32::from(b.0[channel]);
            (diff * diff) as u32
        })
        .sum()
}
