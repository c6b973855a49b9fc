//! qr_trim - crop a photo down to the QR symbol in it
//!
//! Finds the square finder marks of a QR-style symbol by scanning image
//! columns for the 1:1:3:1:1 black/white run signature, then crops the
//! binarized photo to a padded box around those marks. The result is meant
//! to be handed to a real decoder; nothing here decodes payload data.
//!
//! Only vertical runs are inspected, so marks rotated far from upright are
//! not found.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detection and crop parameters
pub mod config;
/// Finder detection (run scanning, de-duplication, cropping)
pub mod detector;
/// Error type
pub mod error;
/// Core data structures (candidates, runs, bounds)
pub mod models;
/// Helpers for the command-line tool (file I/O, statistics)
pub mod tools;
/// Grayscale conversion and binarization
pub mod utils;

pub use config::{
    MAX_FINDERS, MAX_RUN_LENGTH, MIN_FINDERS, MIN_SEPARATION, PAD_DIVISOR, RATIO_TOLERANCE,
    THRESHOLD, TrimConfig,
};
pub use error::{Result, TrimError};
pub use models::{FinderBounds, FinderCandidate};

use detector::crop::crop;
use detector::dedup::FinderSet;
use detector::finder::{RunScanner, SignatureParams};
use image::{DynamicImage, GrayImage};
use tracing::debug;
use utils::binarization::binarize;

/// Binary level for black pixels
pub const BLACK: u8 = 0x00;
/// Binary level for white pixels
pub const WHITE: u8 = 0xff;

/// Accepted finder marks and the padded box around them
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Distinct marks in the order they were found
    pub finders: Vec<FinderCandidate>,
    /// Bounding box and padding
    pub bounds: FinderBounds,
}

/// Binarize `image`, find the finder marks and crop to them with default
/// parameters.
///
/// # Errors
/// [`TrimError::Parse`] when fewer than three distinct marks are found.
pub fn detect_and_crop(image: &DynamicImage) -> Result<GrayImage> {
    detect_and_crop_with(image, &TrimConfig::default())
}

/// [`detect_and_crop`] with explicit parameters
pub fn detect_and_crop_with(image: &DynamicImage, config: &TrimConfig) -> Result<GrayImage> {
    // Step 1: Fixed-threshold binarization
    let binary = binarize(image, config.threshold);

    // Step 2: Scan columns and collect distinct marks
    let detection = locate(&binary, config)?;

    // Step 3: Crop the padded box
    Ok(crop(&binary, &detection.bounds))
}

/// Scan a binary image until `config.max_finders` distinct marks are
/// accepted or every column has been read
pub fn locate_finders(binary: &GrayImage, config: &TrimConfig) -> FinderSet {
    let params = SignatureParams {
        tolerance: config.tolerance,
        max_run_length: config.max_run_length,
    };
    let mut set = FinderSet::new(config.min_separation, config.max_finders);
    let pulled = set.fill_from(RunScanner::with_params(binary, params));
    debug!(
        candidates = pulled,
        accepted = set.len(),
        "finder scan finished"
    );
    set
}

/// Find the marks in a binary image and compute the crop box.
///
/// # Errors
/// [`TrimError::Parse`] when fewer than `config.min_finders` marks are found.
pub fn locate(binary: &GrayImage, config: &TrimConfig) -> Result<Detection> {
    let set = locate_finders(binary, config);
    let parse_error = TrimError::Parse {
        found: set.len(),
        required: config.min_finders,
    };
    if set.len() < config.min_finders {
        return Err(parse_error);
    }

    let finders = set.into_vec();
    let bounds = FinderBounds::from_candidates(&finders, config.pad_divisor).ok_or(parse_error)?;
    debug!(
        min_x = bounds.min_x,
        max_x = bounds.max_x,
        min_y = bounds.min_y,
        max_y = bounds.max_y,
        pad_x = bounds.pad_x,
        pad_y = bounds.pad_y,
        "finder bounds"
    );
    Ok(Detection { finders, bounds })
}

/// Reusable front end holding a [`TrimConfig`]
#[derive(Debug, Clone, Default)]
pub struct Trimmer {
    config: TrimConfig,
}

impl Trimmer {
    /// Trimmer with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmer with explicit parameters
    pub fn with_config(config: TrimConfig) -> Self {
        Self { config }
    }

    /// Active parameters
    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    /// Binarize, locate and crop
    pub fn trim(&self, image: &DynamicImage) -> Result<GrayImage> {
        detect_and_crop_with(image, &self.config)
    }

    /// Binarize and locate without cropping
    pub fn locate(&self, image: &DynamicImage) -> Result<Detection> {
        locate(&binarize(image, self.config.threshold), &self.config)
    }
}
