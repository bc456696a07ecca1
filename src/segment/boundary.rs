// Stage 3: run-length boundary extraction

/// Indices at which `mask` changes value.
///
/// The value at index 0 is the reference state; it is never itself recorded.
/// The returned indices are strictly increasing.
pub fn transitions(mask: &[bool]) -> Vec<u32> {
    let Some(&first) = mask.first() else {
        return Vec::new();
    };

    let mut state = first;
    let mut out = Vec::new();
    for (i, &v) in mask.iter().enumerate() {
        if v != state {
            state = v;
            out.push(i as u32);
        }
    }
    out
}
