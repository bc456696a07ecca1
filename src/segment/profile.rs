// Stage 2: projection profiles

use image::GrayImage;

/// Sum of each column divided by the image height.
pub fn column_profile(binary: &GrayImage) -> Vec<f64> {
    let (width, height) = binary.dimensions();
    let mut sums = vec![0u64; width as usize];
    for (x, _, p) in binary.enumerate_pixels() {
        sums[x as usize] += u64::from(p.0[0]);
    }
    normalize(sums, height)
}

/// Sum of each row divided by the image width.
pub fn row_profile(binary: &GrayImage) -> Vec<f64> {
    let (width, height) = binary.dimensions();
    let mut sums = vec![0u64; height as usize];
    for (_, y, p) in binary.enumerate_pixels() {
        sums[y as usize] += u64::from(p.0[0]);
    }
    normalize(sums, width)
}

fn normalize(sums: Vec<u64>, divisor: u32) -> Vec<f64> {
    let d = f64::from(divisor.max(1));
    sums.into_iter().map(|s| s as f64 / d).collect()
}

/// Values strictly above `threshold` map to `true`.
pub fn threshold_mask(profile: &[f64], threshold: f64) -> Vec<bool> {
    profile.iter().map(|&v| v > threshold).collect()
}
