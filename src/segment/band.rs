// Stage 4: character row band selection

use serde::Serialize;

/// Half-open row range `[start, end)` holding the character row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub start: u32,
    pub end: u32,
}

impl Band {
    pub fn height(&self) -> u32 {
        self.end - self.start
    }
}

/// Pick the consecutive boundary pair with the largest gap.
///
/// Ties keep the first pair seen. Returns `None` with fewer than two
/// boundaries.
pub fn select_band(row_boundaries: &[u32]) -> Option<Band> {
    let mut best: Option<Band> = None;
    for pair in row_boundaries.windows(2) {
        let candidate = Band {
            start: pair[0],
            end: pair[1],
        };
        match best {
            Some(b) if candidate.height() <= b.height() => {}
            _ => best = Some(candidate),
        }
    }
    best
}
