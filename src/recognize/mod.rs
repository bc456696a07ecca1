//! Glyph preparation and label decoding for a per-character classifier.
//!
//! The classifier itself is external; it is reached through
//! [`GlyphClassifier`].

use std::fmt;

use image::{GrayImage, imageops};
use tracing::debug;

use crate::error::PlateSegError;
use crate::segment::CharacterSegment;

/// Class index order produced by the glyph classifier.
pub const LABELS: &str = "0123456789T";

/// Side length of the square classifier input.
pub const DEFAULT_GLYPH_SIZE: u32 = 28;

/// Classifier input: `size x size x 3`, HWC order, raw 0-255 intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTensor {
    pub size: u32,
    pub data: Vec<f32>,
}

impl GlyphTensor {
    /// `[height, width, channels]`
    pub fn shape(&self) -> [usize; 3] {
        [self.size as usize, self.size as usize, 3]
    }
}

/// One decoded glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphLabel {
    Digit(u8),
    /// The `T` marker printed between digit groups on the plate.
    RegionMarker,
}

impl GlyphLabel {
    pub fn from_class(index: usize) -> crate::error::Result<Self> {
        match LABELS.as_bytes().get(index) {
            Some(b'T') => Ok(GlyphLabel::RegionMarker),
            Some(&c) => Ok(GlyphLabel::Digit(c - b'0')),
            None => Err(PlateSegError::classifier(format!(
                "class index {index} out of range (expected 0..{})",
                LABELS.len()
            ))),
        }
    }
}

impl fmt::Display for GlyphLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphLabel::Digit(d) => write!(f, "{d}"),
            GlyphLabel::RegionMarker => f.write_str("T"),
        }
    }
}

/// A per-glyph classifier returning a class index into [`LABELS`].
pub trait GlyphClassifier {
    fn classify(&self, glyph: &GlyphTensor) -> crate::error::Result<usize>;
}

impl<F> GlyphClassifier for F
where
    F: Fn(&GlyphTensor) -> crate::error::Result<usize>,
{
    fn classify(&self, glyph: &GlyphTensor) -> crate::error::Result<usize> {
        self(glyph)
    }
}

#[derive(Debug, Clone)]
pub struct RecognitionParams {
    pub glyph_size: u32,
    /// Text substituted for the region marker in the plate string.
    pub region_name: String,
}

impl Default for RecognitionParams {
    fn default() -> Self {
        RecognitionParams {
            glyph_size: DEFAULT_GLYPH_SIZE,
            region_name: "Tunisia".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlateReading {
    pub labels: Vec<GlyphLabel>,
    pub text: String,
}

/// Resize a binary glyph to `size x size` (bilinear) and replicate it into
/// three channels.
pub fn prepare_glyph(glyph: &GrayImage, size: u32) -> GlyphTensor {
    let resized = imageops::resize(glyph, size, size, imageops::FilterType::Triangle);
    let data = resized
        .pixels()
        .flat_map(|p| {
            let v = f32::from(p.0[0]);
            [v, v, v]
        })
        .collect();
    GlyphTensor { size, data }
}

/// Join labels into plate text, expanding the region marker to ` {region_name} `.
pub fn plate_text(labels: &[GlyphLabel], region_name: &str) -> String {
    labels
        .iter()
        .map(|l| match l {
            GlyphLabel::Digit(d) => d.to_string(),
            GlyphLabel::RegionMarker => format!(" {region_name} "),
        })
        .collect()
}

/// Classify every segment in order and assemble the plate reading.
pub fn recognize_plate(
    segments: &[CharacterSegment],
    classifier: &dyn GlyphClassifier,
    params: &RecognitionParams,
) -> crate::error::Result<PlateReading> {
    if params.glyph_size == 0 {
        return Err(PlateSegError::config("glyph_size must be positive"));
    }

    let labels = segments
        .iter()
        .map(|seg| {
            let tensor = prepare_glyph(&seg.image, params.glyph_size);
            GlyphLabel::from_class(classifier.classify(&tensor)?)
        })
        .collect::<crate::error::Result<Vec<_>>>()?;

    let text = plate_text(&labels, &params.region_name);
    debug!(glyphs = labels.len(), text = %text, "plate recognized");

    Ok(PlateReading { labels, text })
}
