//! Catalog Module - static sky data
//!
//! Read-only inputs for the star wheel, supplied as delimited text files:
//!
//! - [`stars`]: bright star positions and magnitudes
//! - [`constellations`]: stick-figure segments and name positions
//! - [`custom`]: user-supplied extra objects (CSV, sexagesimal coordinates)
//!
//! Copies of the standard catalogs are compiled in, so the generator needs no
//! input files unless a [`CatalogPaths`] override points elsewhere.
//!
//! Any malformed row rejects the whole file; there is no partial loading.

pub mod constellations;
pub mod custom;
pub mod stars;

use std::fs::File;
use std::path::Path;

use crate::core::error::{PlanisphereError, Result};
use crate::core::models::CatalogPaths;

pub use constellations::{parse_constellation_names, parse_stick_figures, ConstellationName, StickSegment};
pub use custom::{parse_custom_objects, parse_dms, parse_hms, CustomObject};
pub use stars::{parse_bright_stars, BrightStar};

const BUNDLED_STARS: &str = include_str!("../../data/bright_stars.dat");
const BUNDLED_STICK_FIGURES: &str = include_str!("../../data/constellation_lines.dat");
const BUNDLED_CONSTELLATION_NAMES: &str = include_str!("../../data/constellation_names.dat");
const BUNDLED_CUSTOM_OBJECTS: &str = include_str!("../../data/custom_objects.csv");

/// Everything drawn on the star wheel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub stars: Vec<BrightStar>,
    pub stick_figures: Vec<StickSegment>,
    pub constellation_names: Vec<ConstellationName>,
    pub custom_objects: Vec<CustomObject>,
}

impl Catalog {
    /// The catalogs shipped with the crate
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            stars: parse_bright_stars(BUNDLED_STARS, "bright_stars.dat")?,
            stick_figures: parse_stick_figures(BUNDLED_STICK_FIGURES, "constellation_lines.dat")?,
            constellation_names: parse_constellation_names(
                BUNDLED_CONSTELLATION_NAMES,
                "constellation_names.dat",
            )?,
            custom_objects: parse_custom_objects(BUNDLED_CUSTOM_OBJECTS.as_bytes(), "custom_objects.csv")?,
        })
    }

    /// Load catalogs, taking each from its override path when one is given
    /// and from the bundled copy otherwise.
    pub fn load(paths: &CatalogPaths) -> Result<Self> {
        let stars = match &paths.stars {
            Some(path) => parse_bright_stars(&read_catalog(path)?, &display_name(path))?,
            None => parse_bright_stars(BUNDLED_STARS, "bright_stars.dat")?,
        };

        let stick_figures = match &paths.stick_figures {
            Some(path) => parse_stick_figures(&read_catalog(path)?, &display_name(path))?,
            None => parse_stick_figures(BUNDLED_STICK_FIGURES, "constellation_lines.dat")?,
        };

        let constellation_names = match &paths.constellation_names {
            Some(path) => parse_constellation_names(&read_catalog(path)?, &display_name(path))?,
            None => parse_constellation_names(BUNDLED_CONSTELLATION_NAMES, "constellation_names.dat")?,
        };

        let custom_objects = match &paths.custom_objects {
            Some(path) => {
                let file = open_catalog(path)?;
                parse_custom_objects(file, &display_name(path))?
            }
            None => parse_custom_objects(BUNDLED_CUSTOM_OBJECTS.as_bytes(), "custom_objects.csv")?,
        };

        tracing::debug!(
            stars = stars.len(),
            segments = stick_figures.len(),
            names = constellation_names.len(),
            custom = custom_objects.len(),
            "catalogs loaded"
        );

        Ok(Self {
            stars,
            stick_figures,
            constellation_names,
            custom_objects,
        })
    }
}

fn open_catalog(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(PlanisphereError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

fn read_catalog(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(PlanisphereError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

/// Non-blank, non-comment lines with their 1-based line numbers
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse a float column, naming the column in the error
pub(crate) fn parse_field(value: &str, column: &str, source_name: &str, line: usize) -> Result<f64> {
    let parsed: f64 = value.parse().map_err(|_| {
        PlanisphereError::malformed_row(
            source_name,
            line,
            format!("{} '{}' is not a number", column, value),
        )
    })?;
    if !parsed.is_finite() {
        return Err(PlanisphereError::malformed_row(
            source_name,
            line,
            format!("{} '{}' is not finite", column, value),
        ));
    }
    Ok(parsed)
}

/// Check an RA (degrees) / declination pair is on the sky
pub(crate) fn check_position(ra_deg: f64, dec_deg: f64, source_name: &str, line: usize) -> Result<()> {
    if !(0.0..=360.0).contains(&ra_deg) {
        return Err(PlanisphereError::malformed_row(
            source_name,
            line,
            format!("right ascension {} outside 0..360 degrees", ra_deg),
        ));
    }
    if !(-90.0..=90.0).contains(&dec_deg) {
        return Err(PlanisphereError::malformed_row(
            source_name,
            line,
            format!("declination {} outside -90..90 degrees", dec_deg),
        ));
    }
    Ok(())
}
