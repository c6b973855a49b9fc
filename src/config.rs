//! Detection and crop parameters.
//!
//! Defaults reproduce the fixed constants of the detector. `from_env` lets a
//! deployment override them through `QR_TRIM_*` variables without a rebuild.

use std::env;

/// Allowed relative deviation around every target run ratio
pub const RATIO_TOLERANCE: f64 = 0.5;
/// Fixed global binarization threshold (strictly above is white)
pub const THRESHOLD: u8 = 0xff / 2;
/// Any run this long or longer disqualifies a window
pub const MAX_RUN_LENGTH: u32 = 80;
/// Candidates closer than this (pixels) are the same physical mark
pub const MIN_SEPARATION: f64 = 200.0;
/// Scanning stops once this many distinct marks are accepted
pub const MAX_FINDERS: usize = 4;
/// Fewer accepted marks than this is a parse error
pub const MIN_FINDERS: usize = 3;
/// Padding per axis is `span / PAD_DIVISOR` (20%)
pub const PAD_DIVISOR: u32 = 5;

/// Tunables for [`crate::detect_and_crop_with`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrimConfig {
    /// Binarization threshold
    pub threshold: u8,
    /// Ratio tolerance used by every run comparison
    pub tolerance: f64,
    /// Exclusive upper bound on run length inside a signature window
    pub max_run_length: u32,
    /// Minimum distance between two accepted marks
    pub min_separation: f64,
    /// Accepted-set cap that ends the scan
    pub max_finders: usize,
    /// Accepted-set size required for success
    pub min_finders: usize,
    /// Padding divisor applied to each axis span
    pub pad_divisor: u32,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
            tolerance: RATIO_TOLERANCE,
            max_run_length: MAX_RUN_LENGTH,
            min_separation: MIN_SEPARATION,
            max_finders: MAX_FINDERS,
            min_finders: MIN_FINDERS,
            pad_divisor: PAD_DIVISOR,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl TrimConfig {
    /// Defaults overlaid with `QR_TRIM_*` environment variables.
    ///
    /// Unparseable values are ignored. Counts are clamped so that
    /// `1 <= min_finders <= max_finders`.
    pub fn from_env() -> Self {
        let d = Self::default();
        let max_finders = parse_env("QR_TRIM_MAX_FINDERS", d.max_finders).max(1);
        Self {
            threshold: parse_env("QR_TRIM_THRESHOLD", d.threshold),
            tolerance: parse_env("QR_TRIM_TOLERANCE", d.tolerance).clamp(0.0, 1.0),
            max_run_length: parse_env("QR_TRIM_MAX_RUN", d.max_run_length),
            min_separation: parse_env("QR_TRIM_MIN_SEPARATION", d.min_separation).max(0.0),
            max_finders,
            min_finders: parse_env("QR_TRIM_MIN_FINDERS", d.min_finders).clamp(1, max_finders),
            pad_divisor: parse_env("QR_TRIM_PAD_DIVISOR", d.pad_divisor).max(1),
        }
    }
}
