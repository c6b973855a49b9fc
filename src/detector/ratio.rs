/// Run-length ratio test with a direction pre-filter.
///
/// A positive `p` asks whether `a ≈ p·b`, a negative `p` whether
/// `b ≈ |p|·a`. The larger of the two lengths must sit on the side `p`
/// names (ties allowed) before the division is done, and the ratio must
/// land strictly inside `|p|·(1 ± tolerance)`.
pub fn cmp(a: u32, b: u32, p: i32, tolerance: f64) -> bool {
    if p == 0 {
        return false;
    }

    let (num, den) = if p > 0 { (a, b) } else { (b, a) };
    if num < den || den == 0 {
        return false;
    }

    let target = p.unsigned_abs() as f64;
    let ratio = num as f64 / den as f64;
    target * (1.0 - tolerance) < ratio && ratio < target * (1.0 + tolerance)
}

/// `a` and `b` within tolerance of each other, either way round
pub fn about_equal(a: u32, b: u32, tolerance: f64) -> bool {
    cmp(a, b, 1, tolerance) || cmp(a, b, -1, tolerance)
}
