//! License-plate character segmentation by histogram of pixel projection.
//!
//! Pipeline: pad + binarize -> column/row projection profiles -> boundary
//! lists -> character band -> per-character crops.

pub mod annotate;
pub mod band;
pub mod binarize;
pub mod boundary;
pub mod profile;
pub mod slicer;

use image::{DynamicImage, GrayImage, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::error::PlateSegError;
use band::Band;

/// Empirically tuned segmentation constants.
///
/// Tuned for one camera and lighting setup; never derived from the image.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentParams {
    /// Width of the black border added on every side before analysis.
    pub border: u32,
    /// Gray values strictly above this become foreground.
    pub binarize_threshold: u8,
    /// Normalized column sums strictly above this count as glyph columns.
    pub column_threshold: f64,
    /// Normalized row sums strictly above this count as glyph rows.
    pub row_threshold: f64,
    /// Column runs this wide or narrower are discarded as noise.
    pub min_char_width: u32,
}

/// Largest accepted border width in pixels.
pub const MAX_BORDER: u32 = 1024;

impl SegmentParams {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.border > MAX_BORDER {
            return Err(PlateSegError::invalid_input(format!(
                "border must be at most {MAX_BORDER} pixels, got {}",
                self.border
            )));
        }
        for (name, value) in [
            ("column_threshold", self.column_threshold),
            ("row_threshold", self.row_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlateSegError::invalid_input(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SegmentParams {
    fn default() -> Self {
        SegmentParams {
            border: 3,
            binarize_threshold: 120,
            column_threshold: 15.0,
            row_threshold: 20.0,
            min_char_width: 5,
        }
    }
}

/// One candidate glyph, cropped from the binarized image.
///
/// Coordinates are in padded-image space (offset by `SegmentParams::border`).
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSegment {
    pub column_start: u32,
    pub column_end: u32,
    pub band: Band,
    pub image: GrayImage,
}

impl CharacterSegment {
    pub fn width(&self) -> u32 {
        self.column_end - self.column_start
    }

    pub fn height(&self) -> u32 {
        self.band.height()
    }
}

/// Why a plate could not be segmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentFailure {
    #[error("character band undetermined: found {row_boundaries} row boundaries, need at least 2")]
    DegenerateBand { row_boundaries: usize },
}

/// Result of one segmentation call.
///
/// `Segments` with an empty list means "no characters"; `band` is `None`
/// when no row structure was found at all. `Failed` means the plate is
/// unreadable.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    Segments {
        band: Option<Band>,
        segments: Vec<CharacterSegment>,
    },
    Failed(SegmentFailure),
}

impl SegmentOutcome {
    fn empty() -> Self {
        SegmentOutcome::Segments {
            band: None,
            segments: Vec::new(),
        }
    }

    /// Segments on success, empty slice on failure.
    pub fn segments(&self) -> &[CharacterSegment] {
        match self {
            SegmentOutcome::Segments { segments, .. } => segments,
            SegmentOutcome::Failed(_) => &[],
        }
    }

    /// The selected character band, if one was found.
    pub fn band(&self) -> Option<Band> {
        match self {
            SegmentOutcome::Segments { band, .. } => *band,
            SegmentOutcome::Failed(_) => None,
        }
    }

    pub fn into_segments(self) -> Option<Vec<CharacterSegment>> {
        match self {
            SegmentOutcome::Segments { segments, .. } => Some(segments),
            SegmentOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SegmentOutcome::Failed(_))
    }
}

/// Split a cropped plate image into left-to-right character segments.
///
/// Returns `Err` for a zero-area input or parameters rejected by
/// [`SegmentParams::validate`].
pub fn segment_plate(
    img: &RgbImage,
    params: &SegmentParams,
) -> crate::error::Result<SegmentOutcome> {
    if img.width() == 0 || img.height() == 0 {
        return Err(PlateSegError::invalid_input(format!(
            "plate image has zero area ({}x{})",
            img.width(),
            img.height()
        )));
    }
    params.validate()?;

    let binary = binarize::prepare(img, params.border, params.binarize_threshold)?;

    let column_mask =
        profile::threshold_mask(&profile::column_profile(&binary), params.column_threshold);
    let row_mask = profile::threshold_mask(&profile::row_profile(&binary), params.row_threshold);

    let column_boundaries = boundary::transitions(&column_mask);
    let row_boundaries = boundary::transitions(&row_mask);

    debug!(
        width = binary.width(),
        height = binary.height(),
        column_boundaries = column_boundaries.len(),
        row_boundaries = row_boundaries.len(),
        "projection boundaries"
    );

    if column_boundaries.is_empty() || row_boundaries.is_empty() {
        return Ok(SegmentOutcome::empty());
    }

    let Some(band) = band::select_band(&row_boundaries) else {
        return Ok(SegmentOutcome::Failed(SegmentFailure::DegenerateBand {
            row_boundaries: row_boundaries.len(),
        }));
    };
    debug!(start = band.start, end = band.end, "character band");

    let segments = slicer::slice_characters(
        &binary,
        &column_mask,
        &column_boundaries,
        band,
        params.min_char_width,
    );
    debug!(count = segments.len(), "character segments");

    Ok(SegmentOutcome::Segments {
        band: Some(band),
        segments,
    })
}

/// [`segment_plate`] for any decoded image; converts to RGB first.
pub fn segment_dynamic(
    img: &DynamicImage,
    params: &SegmentParams,
) -> crate::error::Result<SegmentOutcome> {
    segment_plate(&img.to_rgb8(), params)
}
