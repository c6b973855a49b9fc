use super::FinderCandidate;

/// Axis-aligned box around the accepted finder locations, plus the padding
/// that grows it into the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderBounds {
    /// Smallest candidate x
    pub min_x: u32,
    /// Largest candidate x
    pub max_x: u32,
    /// Smallest candidate y
    pub min_y: u32,
    /// Largest candidate y
    pub max_y: u32,
    /// Horizontal padding on each side
    pub pad_x: u32,
    /// Vertical padding on each side
    pub pad_y: u32,
}

impl FinderBounds {
    /// Compute the bounds of `candidates`, padding each axis by
    /// `floor(span / pad_divisor)`. Returns `None` for an empty slice.
    pub fn from_candidates(candidates: &[FinderCandidate], pad_divisor: u32) -> Option<Self> {
        let mut xs: Vec<u32> = candidates.iter().map(|c| c.x).collect();
        let mut ys: Vec<u32> = candidates.iter().map(|c| c.y).collect();
        xs.sort_unstable();
        ys.sort_unstable();

        let (min_x, max_x) = (*xs.first()?, *xs.last()?);
        let (min_y, max_y) = (*ys.first()?, *ys.last()?);

        let divisor = pad_divisor.max(1);
        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
            pad_x: (max_x - min_x) / divisor,
            pad_y: (max_y - min_y) / divisor,
        })
    }

    /// Horizontal span between the outermost candidates
    pub fn span_x(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Vertical span between the outermost candidates
    pub fn span_y(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Width of the padded rectangle
    pub fn width(&self) -> u32 {
        2 * self.pad_x + self.span_x()
    }

    /// Height of the padded rectangle
    pub fn height(&self) -> u32 {
        2 * self.pad_y + self.span_y()
    }

    /// Source origin of the crop, clamped so it never precedes (0, 0)
    pub fn origin(&self) -> (u32, u32) {
        (
            self.min_x.saturating_sub(self.pad_x),
            self.min_y.saturating_sub(self.pad_y),
        )
    }
}
