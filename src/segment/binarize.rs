// Stage 1: border padding, grayscale conversion, fixed-threshold binarization

use image::{GrayImage, Luma, RgbImage, imageops};

use crate::error::PlateSegError;

/// Foreground value in a binarized image.
pub const FOREGROUND: u8 = 255;
/// Background value in a binarized image.
pub const BACKGROUND: u8 = 0;

/// Dimensions of `width x height` after padding, or `None` on `u32` overflow.
pub fn padded_dimensions(width: u32, height: u32, border: u32) -> Option<(u32, u32)> {
    let extra = border.checked_mul(2)?;
    Some((width.checked_add(extra)?, height.checked_add(extra)?))
}

/// Surround `img` with a black border `border` pixels wide on every side.
pub fn pad_border(img: &RgbImage, border: u32) -> crate::error::Result<RgbImage> {
    let (width, height) = padded_dimensions(img.width(), img.height(), border).ok_or_else(|| {
        PlateSegError::invalid_input(format!(
            "border {border} overflows padded size of {}x{} image",
            img.width(),
            img.height()
        ))
    })?;
    let mut padded = RgbImage::new(width, height);
    imageops::replace(&mut padded, img, i64::from(border), i64::from(border));
    Ok(padded)
}

/// Convert an RGB image to 8-bit grayscale using BT.601 luma weights.
///
/// Fixed-point with 14 fractional bits and round-half-up, so results match
/// the usual `0.299 R + 0.587 G + 0.114 B` conversion to the nearest integer.
pub fn to_gray(img: &RgbImage) -> GrayImage {
    const R_W: u32 = 4899;
    const G_W: u32 = 9617;
    const B_W: u32 = 1868;
    const SHIFT: u32 = 14;

    let mut gray = GrayImage::new(img.width(), img.height());
    for (dst, src) in gray.pixels_mut().zip(img.pixels()) {
        let [r, g, b] = src.0;
        let y = (u32::from(r) * R_W + u32::from(g) * G_W + u32::from(b) * B_W + (1 << (SHIFT - 1)))
            >> SHIFT;
        // Weights sum to 1 << SHIFT, so y <= 255.
        *dst = Luma([y as u8]);
    }
    gray
}

/// Pixels strictly above `threshold` become [`FOREGROUND`], all others [`BACKGROUND`].
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = gray.clone();
    for p in out.pixels_mut() {
        p.0[0] = if p.0[0] > threshold {
            FOREGROUND
        } else {
            BACKGROUND
        };
    }
    out
}

/// Pad, convert and binarize in one go.
pub fn prepare(img: &RgbImage, border: u32, threshold: u8) -> crate::error::Result<GrayImage> {
    let padded = pad_border(img, border)?;
    Ok(binarize(&to_gray(&padded), threshold))
}
