//! Altitude/azimuth overlay
//!
//! Printed on transparent film and fixed over the holder window, so the
//! altitude and azimuth of any star in the window can be read off.

use tracing::debug;

use super::canvas::{BoundingBox, Canvas};
use super::{layers, Component};
use crate::astro::{Point, Projection, R_1, R_2, UNIT_MM};
use crate::core::error::Result;
use crate::core::models::{Hemisphere, Settings};
use crate::formats::{HAlign, Style, TextStyle, VAlign};

/// Sampling step along each grid line, degrees
const SAMPLE_STEP: usize = 2;

const ZENITH_CROSS: f64 = 1.5 * UNIT_MM;
const LABEL_SIZE: f64 = 1.8;

/// Altitude/azimuth grid for one latitude
pub struct AltAzGrid<'a> {
    settings: &'a Settings,
    projection: Projection,
}

impl<'a> AltAzGrid<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            projection: Projection::new(settings),
        }
    }

    /// Line of constant altitude, all the way round in azimuth
    pub fn altitude_circle(&self, alt: f64) -> Vec<Point> {
        (0..360)
            .step_by(SAMPLE_STEP)
            .map(|az| self.projection.alt_az_position(alt, az as f64))
            .collect()
    }

    /// Line of constant azimuth from the horizon up to the zenith
    pub fn azimuth_line(&self, az: f64) -> Vec<Point> {
        (0..=90)
            .step_by(SAMPLE_STEP)
            .map(|alt| self.projection.alt_az_position(alt as f64, az))
            .collect()
    }

    pub fn zenith(&self) -> Point {
        self.projection.alt_az_position(90.0, 0.0)
    }
}

impl Component for AltAzGrid<'_> {
    fn default_filename(&self) -> &'static str {
        "alt_az_grid"
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::square(R_1 + 4.0 * UNIT_MM)
    }

    fn title(&self) -> String {
        format!("Altitude/azimuth grid for latitude {}", self.settings.latitude_label())
    }

    fn render(&self, canvas: &mut Canvas) -> Result<()> {
        debug!("Rendering alt/az grid for {}", self.settings.latitude_label());
        let palette = self.settings.theme.palette();
        let grid = Style::stroke(palette.grid);
        let ink = palette.edge;

        canvas.begin_layer(layers::BACKGROUND);
        canvas.circle(Point::default(), R_2, Style::stroke(ink));
        canvas.end_group();

        canvas.begin_clip(R_2);
        canvas.begin_layer(layers::GRID);
        for alt in (0..90).step_by(10) {
            let style = if alt == 0 { Style::stroke(ink) } else { grid };
            canvas.polyline(self.altitude_circle(alt as f64), true, style);
        }
        for az in (0..360).step_by(30) {
            canvas.polyline(self.azimuth_line(az as f64), false, grid);
        }

        let zenith = self.zenith();
        let zenith_style = Style::stroke(ink);
        canvas.line(zenith.offset(-ZENITH_CROSS, 0.0), zenith.offset(ZENITH_CROSS, 0.0), zenith_style);
        canvas.line(zenith.offset(0.0, -ZENITH_CROSS), zenith.offset(0.0, ZENITH_CROSS), zenith_style);
        canvas.end_group();

        // Altitudes read along the meridian below the zenith
        canvas.begin_layer(layers::TEXT);
        let meridian_az = match self.settings.hemisphere() {
            Hemisphere::North => 180.0,
            Hemisphere::South => 0.0,
        };
        for alt in (10..90).step_by(10) {
            let at = self.projection.alt_az_position(alt as f64, meridian_az);
            canvas.text(
                format!("{}°", alt),
                at.offset(1.0 * UNIT_MM, 0.0),
                TextStyle::new(LABEL_SIZE, ink).aligned(HAlign::Start, VAlign::Middle),
            );
        }
        canvas.end_group();
        canvas.end_group();
        Ok(())
    }
}
