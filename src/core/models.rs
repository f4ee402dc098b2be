//! Core data models for the planisphere generator
//!
//! This module contains the settings every renderer receives and the
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{PlanisphereError, Result};
use crate::render::theme::Theme;

/// Planispheres closer to the equator than this don't really work.
pub const EQUATORIAL_BAND_DEG: f64 = 10.0;

/// Fainter stars are left off the wheel unless configured otherwise.
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 4.0;

/// Which way up the sky is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// +1 in the north, -1 in the south; southern charts are the northern
    /// construction applied to a sky flipped in RA and declination.
    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North => 1.0,
            Hemisphere::South => -1.0,
        }
    }

    /// Suffix used in filenames and titles
    pub fn suffix(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

/// Validated settings shared by every component
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    latitude: f64,
    /// Colour theme
    pub theme: Theme,
    /// Stars fainter than this are not drawn
    pub magnitude_limit: f64,
}

impl Settings {
    /// Create settings for a latitude, rejecting the equatorial band and
    /// anything outside [-90, 90].
    pub fn new(latitude: f64) -> Result<Self> {
        validate_latitude(latitude)?;
        Ok(Self {
            latitude,
            theme: Theme::default(),
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
        })
    }

    /// Set the colour theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the magnitude limit
    pub fn with_magnitude_limit(mut self, limit: f64) -> Self {
        self.magnitude_limit = limit;
        self
    }

    /// Signed latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Absolute latitude in degrees; all projections work with this
    pub fn abs_latitude(&self) -> f64 {
        self.latitude.abs()
    }

    pub fn hemisphere(&self) -> Hemisphere {
        if self.latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    /// Filename stem such as `52N` or `35S`
    pub fn part_stem(&self) -> String {
        format!(
            "{:02}{}",
            self.abs_latitude().round() as i64,
            self.hemisphere().suffix()
        )
    }

    /// Human-readable latitude, e.g. `52°N`
    pub fn latitude_label(&self) -> String {
        format!(
            "{}°{}",
            self.abs_latitude().round() as i64,
            self.hemisphere().suffix()
        )
    }
}

/// Reject latitudes the planisphere construction can't handle
pub fn validate_latitude(latitude: f64) -> Result<()> {
    if !latitude.is_finite() || latitude.abs() > 90.0 {
        return Err(PlanisphereError::LatitudeOutOfRange { latitude });
    }
    if latitude.abs() < EQUATORIAL_BAND_DEG {
        return Err(PlanisphereError::EquatorialLatitude {
            latitude,
            band: EQUATORIAL_BAND_DEG,
        });
    }
    Ok(())
}

/// Optional overrides for the bundled catalogs
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogPaths {
    #[serde(default)]
    pub stars: Option<PathBuf>,
    #[serde(default)]
    pub stick_figures: Option<PathBuf>,
    #[serde(default)]
    pub constellation_names: Option<PathBuf>,
    #[serde(default)]
    pub custom_objects: Option<PathBuf>,
}

/// Configuration loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Theme name ("default" or "dark")
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Faintest magnitude drawn on the wheel
    #[serde(default = "default_magnitude_limit")]
    pub magnitude_limit: f64,
    /// Directory the parts are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Catalog overrides
    #[serde(default)]
    pub catalogs: CatalogPaths,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_magnitude_limit() -> f64 {
    DEFAULT_MAGNITUDE_LIMIT
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            magnitude_limit: default_magnitude_limit(),
            output_dir: default_output_dir(),
            catalogs: CatalogPaths::default(),
        }
    }
}

impl Config {
    /// Load a config file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PlanisphereError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde can't
    pub fn validate(&self) -> Result<()> {
        if !self.magnitude_limit.is_finite() {
            return Err(PlanisphereError::invalid_config(
                "magnitude_limit must be a finite number",
            ));
        }
        Theme::from_name(&self.theme)?;
        Ok(())
    }

    /// Build renderer settings for one latitude
    pub fn settings_for(&self, latitude: f64) -> Result<Settings> {
        Ok(Settings::new(latitude)?
            .with_theme(Theme::from_name(&self.theme)?)
            .with_magnitude_limit(self.magnitude_limit))
    }
}
