//! Astro Module - where things go on the page
//!
//! # Architecture
//!
//! ```text
//! (ra, dec) ──flip for hemisphere──► radius(dec) ──► wheel_position
//! (alt, az) ──► (hour angle, dec) ──────────────────► holder_position
//! date ──► sky rotation at midnight ────────────────► calendar ring angle
//! ```
//!
//! All page lengths are millimetres; all angles handed across module
//! boundaries are degrees unless the name says otherwise.

pub mod calendar;
pub mod projection;

use std::f64::consts::PI;

pub use calendar::{julian_day, midnight_sidereal_angle, sky_rotation, Month, MONTHS};
pub use projection::{alt_az_to_ha_dec, ha_dec_to_alt_az, Point, Projection};

// =============================================================================
// Units
// =============================================================================

pub const UNIT_MM: f64 = 1.0;
pub const UNIT_CM: f64 = 10.0 * UNIT_MM;
pub const UNIT_DEG: f64 = PI / 180.0;
pub const UNIT_REV: f64 = 2.0 * PI;

// =============================================================================
// Wheel dimensions
// =============================================================================

/// Outer radius of the star wheel
pub const R_1: f64 = 75.0 * UNIT_MM;

/// Width of the calendar ring around the star chart
pub const R_GAP: f64 = 12.0 * UNIT_MM;

/// Radius of the star chart inside the calendar ring
pub const R_2: f64 = R_1 - R_GAP;

/// Radius of the hole for the paper fastener
pub const CENTRAL_HOLE_SIZE: f64 = 1.5 * UNIT_MM;

/// Width of the time-of-day ring on the holder, outside the wheel
pub const HOLDER_RING: f64 = 12.0 * UNIT_MM;
