//! Core module for the planisphere generator
//!
//! # Architecture
//!
//! - `models`: Settings, hemisphere and the configuration file format
//! - `error`: Error types using thiserror

pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::{PlanisphereError, Result, ResultExt};
pub use models::{
    validate_latitude, CatalogPaths, Config, Hemisphere, Settings, DEFAULT_MAGNITUDE_LIMIT,
    EQUATORIAL_BAND_DEG,
};
