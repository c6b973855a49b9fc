/// Finder pattern detection by 1:1:3:1:1 run-length scanning down each column
use image::GrayImage;

use super::ratio::{about_equal, cmp};
use crate::models::{FinderCandidate, Run};

const WINDOW_LEN: usize = 5;

/// Fixed-capacity queue of the most recently closed runs in a column.
/// Pushing into a full window evicts the oldest run.
#[derive(Debug, Clone, Default)]
pub struct RunWindow {
    runs: [Run; WINDOW_LEN],
    len: usize,
}

impl RunWindow {
    /// Runs in one finder signature
    pub const CAPACITY: usize = WINDOW_LEN;

    /// Empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `run`, returning the evicted oldest run if the window was full
    pub fn push(&mut self, run: Run) -> Option<Run> {
        if self.len < Self::CAPACITY {
            self.runs[self.len] = run;
            self.len += 1;
            return None;
        }
        let evicted = self.runs[0];
        self.runs.rotate_left(1);
        self.runs[Self::CAPACITY - 1] = run;
        Some(evicted)
    }

    /// Number of runs held
    pub fn len(&self) -> usize {
        self.len
    }

    /// No runs held
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Holds exactly `CAPACITY` runs
    pub fn is_full(&self) -> bool {
        self.len == Self::CAPACITY
    }

    /// Drop every run
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Runs, oldest first
    pub fn as_slice(&self) -> &[Run] {
        &self.runs[..self.len]
    }
}

/// Run-shape limits for a signature match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureParams {
    /// Ratio tolerance
    pub tolerance: f64,
    /// Every run must be strictly shorter than this
    pub max_run_length: u32,
}

impl Default for SignatureParams {
    fn default() -> Self {
        Self {
            tolerance: crate::RATIO_TOLERANCE,
            max_run_length: crate::MAX_RUN_LENGTH,
        }
    }
}

/// Does a full window read black/white/black/white/black in 1:1:3:1:1?
///
/// The leading pair is compared first since it rejects most windows.
pub fn matches_signature(runs: &[Run], params: &SignatureParams) -> bool {
    let [r0, r1, r2, r3, r4] = match runs {
        [a, b, c, d, e] => [a, b, c, d, e],
        _ => return false,
    };
    let tol = params.tolerance;

    if !about_equal(r0.len, r1.len, tol) {
        return false;
    }
    if runs.iter().any(|r| r.len >= params.max_run_length) {
        return false;
    }
    if !(r0.is_black() && !r1.is_black() && r2.is_black() && !r3.is_black() && r4.is_black()) {
        return false;
    }

    cmp(r0.len, r2.len, -3, tol)
        && cmp(r1.len, r2.len, -3, tol)
        && cmp(r2.len, r3.len, 3, tol)
        && cmp(r2.len, r4.len, 3, tol)
        && about_equal(r3.len, r4.len, tol)
}

/// Column-major scan of a binary image yielding one candidate per window
/// that matches the finder signature.
///
/// Columns run left to right, rows top to bottom. The run still open at
/// the bottom of a column is never closed and so never tested. The caller
/// decides when to stop pulling.
pub struct RunScanner<'a> {
    image: &'a GrayImage,
    params: SignatureParams,
    x: u32,
    y: u32,
    current: Run,
    window: RunWindow,
}

impl<'a> RunScanner<'a> {
    /// Scanner with the default signature limits
    pub fn new(image: &'a GrayImage) -> Self {
        Self::with_params(image, SignatureParams::default())
    }

    /// Scanner with explicit signature limits
    pub fn with_params(image: &'a GrayImage, params: SignatureParams) -> Self {
        Self {
            image,
            params,
            x: 0,
            y: 0,
            current: Run::default(),
            window: RunWindow::new(),
        }
    }

    #[inline]
    fn level(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[0]
    }
}

impl Iterator for RunScanner<'_> {
    type Item = FinderCandidate;

    fn next(&mut self) -> Option<FinderCandidate> {
        let (width, height) = self.image.dimensions();
        if height == 0 {
            return None;
        }

        while self.x < width {
            let x = self.x;
            if self.y == 0 {
                self.current = Run::start(x, 0, self.level(x, 0));
                self.window.clear();
                self.y = 1;
            }

            while self.y < height {
                let y = self.y;
                self.y += 1;

                let level = self.level(x, y);
                if level == self.current.level {
                    self.current.len += 1;
                    continue;
                }

                let closed = std::mem::replace(&mut self.current, Run::start(x, y, level));
                self.window.push(closed);
                if self.window.is_full() && matches_signature(self.window.as_slice(), &self.params)
                {
                    let row = self.window.as_slice()[RunWindow::CAPACITY - 1].y;
                    return Some(FinderCandidate::new(x, row));
                }
            }

            self.x += 1;
            self.y = 0;
        }

        None
    }
}

impl std::iter::FusedIterator for RunScanner<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BLACK, WHITE};
    use image::Luma;

    fn runs(lengths: &[u32], first_black: bool) -> Vec<Run> {
        let mut y = 0;
        lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| {
                let black = (i % 2 == 0) == first_black;
                let run = Run {
                    x: 0,
                    y,
                    len,
                    level: if black { BLACK } else { WHITE },
                };
                y += len;
                run
            })
            .collect()
    }

    /// Paint black runs of `lengths` (alternating with white) into column `x`
    /// starting at row `y0` on a white image.
    fn paint_column(img: &mut GrayImage, x: u32, y0: u32, lengths: &[u32]) {
        let mut y = y0;
        for (i, &len) in lengths.iter().enumerate() {
            if i % 2 == 0 {
                for yy in y..y + len {
                    img.put_pixel(x, yy, Luma([BLACK]));
                }
            }
            y += len;
        }
    }

    #[test]
    fn test_window_push_evicts_oldest() {
        let mut window = RunWindow::new();
        assert!(window.is_empty());
        for i in 0..5 {
            assert_eq!(window.push(Run::start(0, i, BLACK)), None);
        }
        assert!(window.is_full());
        let evicted = window.push(Run::start(0, 5, WHITE));
        assert_eq!(evicted.map(|r| r.y), Some(0));
        let ys: Vec<u32> = window.as_slice().iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![1, 2, 3, 4, 5]);
        assert_eq!(window.len(), 5);

        window.clear();
        assert!(window.is_empty());
        assert!(window.as_slice().is_empty());
    }

    #[test]
    fn test_signature_accepts_ideal_pattern() {
        let params = SignatureParams::default();
        assert!(matches_signature(&runs(&[3, 3, 9, 3, 3], true), &params));
        assert!(matches_signature(&runs(&[10, 10, 30, 10, 10], true), &params));
        assert!(matches_signature(&runs(&[4, 3, 10, 3, 4], true), &params));
    }

    #[test]
    fn test_signature_rejects() {
        let params = SignatureParams::default();
        // Starts with white
        assert!(!matches_signature(&runs(&[3, 3, 9, 3, 3], false), &params));
        // Leading pair too far apart
        assert!(!matches_signature(&runs(&[3, 6, 9, 3, 3], true), &params));
        // Center not three times the rest
        assert!(!matches_signature(&runs(&[3, 3, 4, 3, 3], true), &params));
        // Run at the length ceiling
        assert!(!matches_signature(&runs(&[30, 30, 80, 30, 30], true), &params));
        assert!(matches_signature(&runs(&[26, 26, 79, 26, 26], true), &params));
        // Too few runs
        assert!(!matches_signature(&runs(&[3, 3, 9, 3], true), &params));
    }

    #[test]
    fn test_scanner_finds_column_pattern() {
        let mut img = GrayImage::from_pixel(8, 40, Luma([WHITE]));
        // white 5, then B3 W3 B9 W3 B3, then white tail
        paint_column(&mut img, 2, 5, &[3, 3, 9, 3, 3]);

        let hits: Vec<_> = RunScanner::new(&img).collect();
        // Last black run starts at row 5 + 3 + 3 + 9 + 3 = 23
        assert_eq!(hits, vec![FinderCandidate::new(2, 23)]);
    }

    #[test]
    fn test_scanner_needs_closed_last_run() {
        // Final black run touches the bottom edge and is never closed
        let mut img = GrayImage::from_pixel(1, 21, Luma([WHITE]));
        paint_column(&mut img, 0, 0, &[3, 3, 9, 3, 3]);
        assert_eq!(RunScanner::new(&img).count(), 0);

        let mut img = GrayImage::from_pixel(1, 22, Luma([WHITE]));
        paint_column(&mut img, 0, 0, &[3, 3, 9, 3, 3]);
        assert_eq!(
            RunScanner::new(&img).collect::<Vec<_>>(),
            vec![FinderCandidate::new(0, 18)]
        );
    }

    #[test]
    fn test_scanner_uniform_and_degenerate() {
        let blank = GrayImage::from_pixel(50, 50, Luma([WHITE]));
        assert_eq!(RunScanner::new(&blank).count(), 0);

        let tiny = GrayImage::from_pixel(1, 1, Luma([BLACK]));
        assert_eq!(RunScanner::new(&tiny).count(), 0);

        let empty = GrayImage::new(0, 0);
        assert_eq!(RunScanner::new(&empty).count(), 0);
    }

    #[test]
    fn test_scanner_is_lazy_and_fused() {
        let mut img = GrayImage::from_pixel(4, 30, Luma([WHITE]));
        for x in 0..4 {
            paint_column(&mut img, x, 2, &[3, 3, 9, 3, 3]);
        }

        let mut scanner = RunScanner::new(&img);
        assert_eq!(scanner.next(), Some(FinderCandidate::new(0, 20)));
        assert_eq!(scanner.next(), Some(FinderCandidate::new(1, 20)));
        assert_eq!(scanner.by_ref().count(), 2);
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_scanner_ignores_horizontal_patterns() {
        let mut img = GrayImage::from_pixel(40, 5, Luma([WHITE]));
        let mut x = 5;
        for (i, len) in [3u32, 3, 9, 3, 3].into_iter().enumerate() {
            if i % 2 == 0 {
                for xx in x..x + len {
                    for y in 0..5 {
                        img.put_pixel(xx, y, Luma([BLACK]));
                    }
                }
            }
            x += len;
        }
        assert_eq!(RunScanner::new(&img).count(), 0);
    }
}
