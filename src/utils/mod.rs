//! Utility functions for image processing
//!
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Fixed-threshold binarization

/// Fixed global threshold binarization
pub mod binarization;
/// RGB(A) to luminance
pub mod grayscale;
