use crate::{BLACK, WHITE};
use image::{DynamicImage, GrayImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions picked up when walking an image directory
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Decode an image file.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage, image::ImageError> {
    image::open(path)
}

/// Encode a grayscale image, picking the format from the extension.
///
/// Paths without an extension are written as JPEG.
pub fn save_gray<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<(), image::ImageError> {
    let path = path.as_ref();
    let format = match path.extension() {
        Some(_) => ImageFormat::from_path(path)?,
        None => ImageFormat::Jpeg,
    };
    image.save_with_format(path, format)
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Count of pixels that are neither black nor white.
    pub other_pixels: usize,
    /// Total pixels in the image.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(gray: &GrayImage) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray.as_raw() {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let len = gray.as_raw().len();
    if len == 0 {
        return GrayStats {
            min: 0,
            max: 0,
            avg: 0,
        };
    }
    GrayStats {
        min,
        max,
        avg: (sum / len as u64) as u8,
    }
}

/// Compute black pixel stats for a binary image.
pub fn binary_stats(binary: &GrayImage) -> BinaryStats {
    let mut black = 0usize;
    let mut other = 0usize;
    for &v in binary.as_raw() {
        match v {
            BLACK => black += 1,
            WHITE => {}
            _ => other += 1,
        }
    }
    let total = binary.as_raw().len();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        other_pixels: other,
        total_pixels: total,
        black_ratio: ratio,
    }
}

/// Image files under `root` (recursive), sorted, optionally truncated.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                    images.push(path);
                }
            }
        }
    }

    images
}

/// Where a batch run writes the crop of `input`: same relative path under
/// `out_dir` with `.extension` appended. The source extension is kept, so
/// `scan.png` and `scan.jpg` never share a destination.
pub fn output_path(root: &Path, input: &Path, out_dir: &Path, extension: &str) -> PathBuf {
    let rel = input
        .strip_prefix(root)
        .unwrap_or_else(|_| Path::new(input.file_name().unwrap_or(input.as_os_str())));
    let mut name = out_dir.join(rel).into_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("qr_trim_tools_{nanos}_{sequence}"));
        fs::create_dir_all(&dir).expect("failed to create temp dir");
        dir
    }

    #[test]
    fn test_grayscale_stats() {
        let gray = GrayImage::from_raw(2, 2, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(
            grayscale_stats(&gray),
            GrayStats {
                min: 10,
                max: 40,
                avg: 25
            }
        );
        let empty = GrayImage::new(0, 0);
        assert_eq!(grayscale_stats(&empty).max, 0);
    }

    #[test]
    fn test_binary_stats() {
        let binary = GrayImage::from_raw(2, 2, vec![BLACK, WHITE, BLACK, 7]).unwrap();
        let stats = binary_stats(&binary);
        assert_eq!(stats.black_pixels, 2);
        assert_eq!(stats.other_pixels, 1);
        assert_eq!(stats.total_pixels, 4);
        assert!((stats.black_ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_output_path() {
        let p = output_path(
            Path::new("/data/in"),
            Path::new("/data/in/a/b.png"),
            Path::new("/out"),
            "jpg",
        );
        assert_eq!(p, PathBuf::from("/out/a/b.png.jpg"));
    }

    #[test]
    fn test_output_path_keeps_sources_apart() {
        let root = Path::new("/in");
        let out = Path::new("/out");
        let png = output_path(root, Path::new("/in/scan.png"), out, "jpg");
        let jpg = output_path(root, Path::new("/in/scan.jpg"), out, "jpg");
        assert_ne!(png, jpg);
        assert_eq!(jpg, PathBuf::from("/out/scan.jpg.jpg"));

        let outside = output_path(root, Path::new("/elsewhere/x.bmp"), out, "png");
        assert_eq!(outside, PathBuf::from("/out/x.bmp.png"));
    }

    #[test]
    fn test_save_and_collect() {
        let dir = temp_dir();
        let img = GrayImage::from_pixel(4, 4, Luma([WHITE]));
        save_gray(&img, dir.join("one.png")).unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        save_gray(&img, dir.join("nested/two.bmp")).unwrap();
        save_gray(&img, dir.join("nested/three")).unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();

        let found: Vec<PathBuf> = dataset_iter(&dir, None).collect();
        assert_eq!(found, vec![dir.join("nested/two.bmp"), dir.join("one.png")]);
        assert_eq!(dataset_iter(&dir, Some(1)).count(), 1);

        // Extensionless output is JPEG
        let bytes = fs::read(dir.join("nested/three")).unwrap();
        assert_eq!(&bytes[..2], &[0xff, 0xd8]);

        let loaded = load_image(dir.join("one.png")).unwrap();
        assert_eq!(loaded.to_luma8(), img);
        let _ = fs::remove_dir_all(dir);
    }
}
