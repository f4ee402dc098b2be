//! planisphere CLI
//!
//! Renders the star wheel, holder, alt/az grid and instruction document for
//! one latitude into an output directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use planisphere::{Catalog, Config};

/// Make a printable planisphere for your latitude.
#[derive(Parser, Debug)]
#[command(name = "planisphere")]
#[command(version = planisphere::VERSION)]
#[command(about = "Make a printable planisphere for your latitude")]
#[command(after_help = "EXAMPLES:
  # Planisphere for London, written to ./output
  planisphere --latitude 52

  # Southern hemisphere, dark theme
  planisphere --latitude -35 --theme dark --output-dir sydney
")]
struct Cli {
    /// Latitude in degrees, negative for the southern hemisphere
    #[arg(long, allow_negative_numbers = true, value_name = "DEG")]
    latitude: f64,

    /// Directory to write the parts into [default: output]
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Colour theme [default, dark]
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,

    /// JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bright star catalog to use instead of the bundled one
    #[arg(long, value_name = "FILE")]
    stars: Option<PathBuf>,

    /// Constellation stick figures to use instead of the bundled ones
    #[arg(long, value_name = "FILE")]
    stick_figures: Option<PathBuf>,

    /// Constellation name positions to use instead of the bundled ones
    #[arg(long, value_name = "FILE")]
    constellation_names: Option<PathBuf>,

    /// CSV of extra objects to mark on the wheel
    #[arg(long, value_name = "FILE")]
    custom_objects: Option<PathBuf>,

    /// Faintest magnitude drawn [default: 4.0]
    #[arg(short = 'm', long, allow_negative_numbers = true, value_name = "MAG")]
    magnitude_limit: Option<f64>,

    /// Log debug detail to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Config file values, overridden by anything given on the command line
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(limit) = self.magnitude_limit {
            config.magnitude_limit = limit;
        }
        if let Some(path) = &self.stars {
            config.catalogs.stars = Some(path.clone());
        }
        if let Some(path) = &self.stick_figures {
            config.catalogs.stick_figures = Some(path.clone());
        }
        if let Some(path) = &self.constellation_names {
            config.catalogs.constellation_names = Some(path.clone());
        }
        if let Some(path) = &self.custom_objects {
            config.catalogs.custom_objects = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "planisphere=debug" } else { "planisphere=info" };
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()));

    // stdout carries the list of written files
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config()?;
    let settings = config.settings_for(cli.latitude)?;
    let catalog = Catalog::load(&config.catalogs).context("Failed to load catalogs")?;

    let written = planisphere::generate(&settings, &catalog, &config.output_dir)
        .with_context(|| format!("Failed to write planisphere to {}", config.output_dir.display()))?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
