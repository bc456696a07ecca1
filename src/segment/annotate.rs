// Debug overlay: segment rectangles on a copy of the padded color image

use image::{Rgb, RgbImage};

use super::CharacterSegment;
use super::binarize::pad_border;

/// Rectangle colour used for segment outlines.
pub const OUTLINE: Rgb<u8> = Rgb([0, 255, 0]);

/// Draw a one-pixel outline around every segment.
///
/// Segment coordinates live in padded space, so `original` is padded with the
/// same `border` first. The input image is left untouched.
pub fn annotate_segments(
    original: &RgbImage,
    border: u32,
    segments: &[CharacterSegment],
) -> crate::error::Result<RgbImage> {
    let mut canvas = pad_border(original, border)?;
    for seg in segments {
        draw_outline(
            &mut canvas,
            seg.column_start,
            seg.band.start,
            seg.column_end,
            seg.band.end,
        );
    }
    Ok(canvas)
}

/// Outline with inclusive corners `(x0, y0)`..`(x1, y1)`, clipped to the canvas.
fn draw_outline(canvas: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let x1 = x1.min(w - 1);
    let y1 = y1.min(h - 1);

    for x in x0..=x1 {
        canvas.put_pixel(x, y0, OUTLINE);
        canvas.put_pixel(x, y1, OUTLINE);
    }
    for y in y0..=y1 {
        canvas.put_pixel(x0, y, OUTLINE);
        canvas.put_pixel(x1, y, OUTLINE);
    }
}
