//! # Headliner CLI
//!
//! Command-line interface for rendering marketing creatives.
//!
//! ## Usage
//!
//! ```bash
//! # Square, portrait and landscape creatives into ./out
//! headliner render --image hero.jpg --headline "Summer sale" --out out
//!
//! # Brand color, logo and a single ratio
//! headliner render --image hero.jpg --headline "Summer sale" \
//!     --ratio 4:5 --brand-color "#FF8800" --logo logo.png --out out
//!
//! # Tuned constants and debug logging
//! headliner render --image hero.jpg --headline "Hi" --config tuning.json --out out --verbose
//! ```

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use headliner::{
    BrandSpec, CreativeRenderer, EngineConfig, HeadlinerError, Ratio, asset,
    text::{FontProvider, bitmap::BitmapFontProvider, ttf::TtfFontProvider},
};

/// Headliner - Marketing creative renderer
#[derive(Parser, Debug)]
#[command(name = "headliner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one creative per aspect ratio
    Render {
        /// Base image (a neutral placeholder is used if it cannot be loaded)
        #[arg(long, value_name = "FILE")]
        image: PathBuf,

        /// Headline text
        #[arg(long)]
        headline: String,

        /// Target aspect ratio as a:b (repeatable)
        #[arg(long = "ratio", value_name = "A:B", default_values_t = [Ratio::SQUARE, Ratio::PORTRAIT_9_16, Ratio::LANDSCAPE_16_9])]
        ratios: Vec<Ratio>,

        /// Brand color as #RRGGBB (repeatable; the first tints the band)
        #[arg(long = "brand-color", value_name = "HEX")]
        brand_colors: Vec<String>,

        /// Logo image
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// TrueType font (defaults to bundled Inter or a system font)
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// JSON file overriding engine constants
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// Debug logging
        #[arg(long, short)]
        verbose: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), HeadlinerError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            image,
            headline,
            ratios,
            brand_colors,
            logo,
            font,
            config,
            out,
            verbose,
        } => {
            init_logging(verbose);

            let config = match config {
                Some(path) => EngineConfig::from_json_file(&path)?,
                None => EngineConfig::default(),
            };
            let renderer = CreativeRenderer::new(config);

            let base = match asset::load_asset(&image, asset::DEFAULT_MIN_ASSET_PX) {
                Ok(img) => img,
                Err(e) => {
                    tracing::warn!(error = %e, "using placeholder image");
                    asset::placeholder(asset::DEFAULT_PLACEHOLDER_SIZE, asset::DEFAULT_PLACEHOLDER_SIZE)
                }
            };

            let mut brand = BrandSpec::new(brand_colors);
            if let Some(path) = logo {
                match std::fs::read(&path) {
                    Ok(bytes) => brand = brand.with_logo_bytes(&bytes),
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "continuing without logo"),
                }
            }

            std::fs::create_dir_all(&out)?;

            let job = Job {
                renderer: &renderer,
                base: &base,
                headline: &headline,
                brand: &brand,
                out: &out,
            };
            let written = match font {
                Some(path) => job.run(&ratios, &TtfFontProvider::from_path(&path)?)?,
                None => match TtfFontProvider::discover(&TtfFontProvider::default_candidates()) {
                    Ok(fonts) => job.run(&ratios, &fonts)?,
                    Err(e) => {
                        tracing::warn!(error = %e, "falling back to bitmap font");
                        job.run(&ratios, &BitmapFontProvider)?
                    }
                },
            };

            for path in written {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// Inputs shared by every ratio of one render invocation.
struct Job<'a> {
    renderer: &'a CreativeRenderer,
    base: &'a image::DynamicImage,
    headline: &'a str,
    brand: &'a BrandSpec,
    out: &'a Path,
}

impl Job<'_> {
    /// Render all ratios in parallel; returns written paths in ratio order.
    fn run<P: FontProvider + Sync>(&self, ratios: &[Ratio], fonts: &P) -> Result<Vec<PathBuf>, HeadlinerError> {
        ratios
            .par_iter()
            .map(|&ratio| {
                let creative = self.renderer.render(self.base, ratio, self.headline, self.brand, fonts);
                let path = self.out.join(format!("{}.png", ratio.folder_name()));
                creative
                    .save(&path)
                    .map_err(|e| HeadlinerError::Image(format!("Failed to save {}: {}", path.display(), e)))?;
                tracing::info!(%ratio, path = %path.display(), "wrote creative");
                Ok(path)
            })
            .collect()
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("headliner=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("headliner=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
