//! mochi-gif2bitmap
//!
//! Converts animated GIFs into Rust modules of packed 1-bpp frames for the
//! Mochi animation table.
//!
//! ```text
//! mochi-gif2bitmap wink.gif                      # writes wink_bitmap.rs
//! mochi-gif2bitmap wink.gif -w 128 -H 64 -t 100
//! mochi-gif2bitmap gifs/ --batch --output-dir bitmaps/
//! ```

mod convert;
mod emit;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use convert::Converter;

#[derive(Parser, Debug)]
#[command(version, about = "Convert animated GIFs into 1-bpp Rust bitmap modules")]
struct Cli {
    /// GIF file, or a directory of GIFs with --batch
    input: PathBuf,

    /// Output .rs file (single-file mode)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Target width in pixels
    #[arg(short, long, default_value_t = 128)]
    width: u32,

    /// Target height in pixels
    #[arg(short = 'H', long, default_value_t = 64)]
    height: u32,

    /// Luma threshold; brighter pixels are lit
    #[arg(short, long, default_value_t = 128)]
    threshold: u8,

    /// Stop after this many frames
    #[arg(short, long)]
    max_frames: Option<usize>,

    /// Convert every .gif in the input directory
    #[arg(short, long)]
    batch: bool,

    /// Output directory for --batch (default: <input>/bitmaps)
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.width == 0 || cli.height == 0 {
        bail!("width and height must be non-zero");
    }
    let converter = Converter {
        width: cli.width,
        height: cli.height,
        threshold: cli.threshold,
    };

    if cli.batch {
        run_batch(&cli, &converter)
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output(&cli.input, None));
        convert_file(&converter, &cli.input, &output, cli.max_frames)
    }
}

fn run_batch(cli: &Cli, converter: &Converter) -> Result<()> {
    if !cli.input.is_dir() {
        bail!("{} is not a directory", cli.input.display());
    }
    let gifs = find_gifs(&cli.input)?;
    if gifs.is_empty() {
        bail!("no GIF files found in {}", cli.input.display());
    }
    let out_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| cli.input.join("bitmaps"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    log::info!("found {} GIF files", gifs.len());
    let mut converted = 0;
    for gif in &gifs {
        let output = default_output(gif, Some(&out_dir));
        match convert_file(converter, gif, &output, cli.max_frames) {
            Ok(()) => converted += 1,
            Err(e) => log::error!("{}: {:#}", gif.display(), e),
        }
    }
    log::info!(
        "{}/{} files converted into {}",
        converted,
        gifs.len(),
        out_dir.display()
    );
    Ok(())
}

fn convert_file(
    converter: &Converter,
    input: &Path,
    output: &Path,
    max_frames: Option<usize>,
) -> Result<()> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    log::info!("processing {}", input.display());

    let frames = converter
        .convert_gif(BufReader::new(file), max_frames)
        .with_context(|| format!("converting {}", input.display()))?;

    let source = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let module = emit::rust_module(&source, converter.width, converter.height, &frames);
    fs::write(output, module).with_context(|| format!("writing {}", output.display()))?;

    let total: u32 = frames.iter().map(|f| u32::from(f.duration_ms)).sum();
    log::info!(
        "wrote {} ({} frames, {} bytes, {} ms loop)",
        output.display(),
        frames.len(),
        frames.len() * converter.bitmap_len(),
        total
    );
    Ok(())
}

/// `<dir>/<module>_bitmap.rs`, next to the input unless `dir` is given.
fn default_output(input: &Path, dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = format!("{}_bitmap.rs", emit::module_name(&stem));
    match dir {
        Some(dir) => dir.join(file),
        None => input.with_file_name(file),
    }
}

/// `.gif` files directly inside `dir`, sorted by name.
fn find_gifs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut gifs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let is_gif = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
        if path.is_file() && is_gif {
            gifs.push(path);
        }
    }
    gifs.sort();
    Ok(gifs)
}
