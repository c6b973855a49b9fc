/// Maximal vertical stretch of same-valued pixels in one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Run {
    /// Column the run lives in
    pub x: u32,
    /// First row of the run
    pub y: u32,
    /// Number of pixels
    pub len: u32,
    /// Binary level of every pixel in the run (0 or 255)
    pub level: u8,
}

impl Run {
    /// Open a one-pixel run at `(x, y)`
    pub fn start(x: u32, y: u32, level: u8) -> Self {
        Self { x, y, len: 1, level }
    }

    /// Whether the run is black
    pub fn is_black(&self) -> bool {
        self.level == crate::BLACK
    }
}
