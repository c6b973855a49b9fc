//! Core data structures

/// Finder bounding box and crop rectangle
pub mod bounds;
/// Finder candidate location
pub mod point;
/// Column run
pub mod run;

pub use bounds::FinderBounds;
pub use point::FinderCandidate;
pub use run::Run;
