use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use qr_trim::tools::{
    binary_stats, dataset_iter, grayscale_stats, load_image, output_path, save_gray,
};
use qr_trim::utils::binarization::threshold_binarize;
use qr_trim::utils::grayscale::to_luma;
use qr_trim::{TrimConfig, Trimmer, locate};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrtrim", version, about = "Crop photos down to the QR symbol they contain")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop one image to its finder patterns
    Trim {
        #[arg(long)]
        image: PathBuf,
        /// Output file; format follows the extension, JPEG if none
        #[arg(long, default_value = "qr.jpeg")]
        out: PathBuf,
        #[command(flatten)]
        tune: TuneArgs,
    },
    /// Print stats, finder locations and the crop box for one image
    Detect {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        tune: TuneArgs,
    },
    /// Crop every image under a directory in parallel
    Batch {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
        /// Extension appended to each source file name for written crops
        #[arg(long, default_value = "jpg")]
        ext: String,
        #[command(flatten)]
        tune: TuneArgs,
    },
}

/// Overrides applied on top of `QR_TRIM_*` environment settings
#[derive(Debug, Clone, Args)]
struct TuneArgs {
    /// Binarization threshold (luminance above is white)
    #[arg(long)]
    threshold: Option<u8>,
    /// Relative tolerance for run ratios
    #[arg(long)]
    tolerance: Option<f64>,
    /// Runs this long or longer reject a window
    #[arg(long)]
    max_run_length: Option<u32>,
    /// Minimum distance in pixels between distinct marks
    #[arg(long)]
    min_separation: Option<f64>,
}

impl TuneArgs {
    fn config(&self) -> TrimConfig {
        let mut config = TrimConfig::from_env();
        if let Some(v) = self.threshold {
            config.threshold = v;
        }
        if let Some(v) = self.tolerance {
            config.tolerance = v;
        }
        if let Some(v) = self.max_run_length {
            config.max_run_length = v;
        }
        if let Some(v) = self.min_separation {
            config.min_separation = v;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Trim { image, out, tune } => trim_cmd(&image, &out, &tune.config()),
        Command::Detect { image, tune } => detect_cmd(&image, &tune.config()),
        Command::Batch {
            root,
            out_dir,
            limit,
            ext,
            tune,
        } => batch_cmd(&root, &out_dir, limit, &ext, &tune.config()),
    }
}

fn trim_cmd(image: &Path, out: &Path, config: &TrimConfig) -> Result<()> {
    tracing::info!("Loading image: {}", image.display());
    let input = load_image(image).with_context(|| format!("failed to load {}", image.display()))?;
    tracing::info!("Image size: {}x{}", input.width(), input.height());

    let start = Instant::now();
    let cropped = Trimmer::with_config(config.clone())
        .trim(&input)
        .with_context(|| format!("no QR symbol found in {}", image.display()))?;
    tracing::info!(
        "Cropped to {}x{} in {:.2?}",
        cropped.width(),
        cropped.height(),
        start.elapsed()
    );

    save_gray(&cropped, out).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!("Result written to {}", out.display());
    Ok(())
}

fn detect_cmd(image: &Path, config: &TrimConfig) -> Result<()> {
    let input = load_image(image).with_context(|| format!("failed to load {}", image.display()))?;
    println!("Image: {} ({}x{})", image.display(), input.width(), input.height());

    let gray = to_luma(&input);
    let gray_stats = grayscale_stats(&gray);
    println!(
        "Grayscale range: {}-{}, average: {}",
        gray_stats.min, gray_stats.max, gray_stats.avg
    );

    let binary = threshold_binarize(&gray, config.threshold);
    let stats = binary_stats(&binary);
    println!(
        "Binary: black_pixels={} total={} black_ratio={:.2}%",
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );

    let detection = locate(&binary, config)?;
    println!("Found {} finder patterns", detection.finders.len());
    for (i, p) in detection.finders.iter().enumerate() {
        println!("  Pattern {}: ({}, {})", i, p.x, p.y);
    }
    let b = detection.bounds;
    let (ox, oy) = b.origin();
    println!(
        "Bounds: x={}..{} y={}..{} pad=({}, {}) crop={}x{} at ({}, {})",
        b.min_x,
        b.max_x,
        b.min_y,
        b.max_y,
        b.pad_x,
        b.pad_y,
        b.width(),
        b.height(),
        ox,
        oy
    );
    Ok(())
}

fn batch_cmd(
    root: &Path,
    out_dir: &Path,
    limit: Option<usize>,
    ext: &str,
    config: &TrimConfig,
) -> Result<()> {
    if !root.exists() {
        bail!("input root not found: {}", root.display());
    }

    let images: Vec<PathBuf> = dataset_iter(root, limit).collect();
    if images.is_empty() {
        println!("No images found under {}", root.display());
        return Ok(());
    }

    let trimmer = Trimmer::with_config(config.clone());
    let start = Instant::now();
    let results: Vec<(PathBuf, Result<PathBuf>)> = images
        .into_par_iter()
        .map(|path| {
            let result = trim_one(&trimmer, root, &path, out_dir, ext);
            (path, result)
        })
        .collect();

    let mut failed = 0usize;
    for (path, result) in &results {
        match result {
            Ok(out) => println!("{} -> {}", path.display(), out.display()),
            Err(err) => {
                failed += 1;
                println!("{} -> failed: {:#}", path.display(), err);
            }
        }
    }

    let total = results.len();
    println!(
        "Trimmed {}/{} images in {:.2?}",
        total - failed,
        total,
        start.elapsed()
    );
    if failed > 0 {
        bail!("{failed} of {total} images failed");
    }
    Ok(())
}

fn trim_one(
    trimmer: &Trimmer,
    root: &Path,
    path: &Path,
    out_dir: &Path,
    ext: &str,
) -> Result<PathBuf> {
    let input = load_image(path).context("failed to load")?;
    let cropped = trimmer.trim(&input)?;
    let out = output_path(root, path, out_dir, ext);
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    save_gray(&cropped, &out).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(out)
}
