//! Finder pattern detection and cropping
//!
//! - Ratio rule for comparing run lengths
//! - Column run scanner for the 1:1:3:1:1 signature
//! - Spatial de-duplication of scanner hits
//! - Padded crop around the accepted marks

/// Padded crop of the binary image
pub mod crop;
/// De-duplication of candidates into a bounded finder set
pub mod dedup;
/// Column run scanning for the finder signature
pub mod finder;
/// Signed, tolerance-bounded run-length ratio test
pub mod ratio;
