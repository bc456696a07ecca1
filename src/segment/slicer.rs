// Stage 5: character slicing

use image::{GrayImage, imageops};

use super::CharacterSegment;
use super::band::Band;

/// Cut `binary` into per-character crops between consecutive column boundaries.
///
/// A pair `(start, end)` survives only when it is wider than `min_width` and
/// `column_mask[start]` marks the start of a foreground run. Crops span the
/// full `band` vertically and are returned left to right.
pub fn slice_characters(
    binary: &GrayImage,
    column_mask: &[bool],
    column_boundaries: &[u32],
    band: Band,
    min_width: u32,
) -> Vec<CharacterSegment> {
    column_boundaries
        .windows(2)
        .filter_map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            if end - start <= min_width {
                return None;
            }
            if !column_mask.get(start as usize).copied().unwrap_or(false) {
                return None;
            }
            let image =
                imageops::crop_imm(binary, start, band.start, end - start, band.height()).to_image();
            Some(CharacterSegment {
                column_start: start,
                column_end: end,
                band,
                image,
            })
        })
        .collect()
}
