/// Pixel location where a column scan matched the finder signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FinderCandidate {
    /// Column of the scan line
    pub x: u32,
    /// Start row of the last run in the matching window
    pub y: u32,
}

impl FinderCandidate {
    /// Create a new candidate
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another candidate
    pub fn distance(&self, other: &FinderCandidate) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (no sqrt)
    pub fn distance_squared(&self, other: &FinderCandidate) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx * dx + dy * dy
    }
}
