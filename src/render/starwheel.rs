//! The star wheel
//!
//! A disc carrying the sky in polar projection, surrounded by a calendar
//! ring. The wheel turns under the holder; setting a date on the ring
//! against a time on the holder brings the right stars into the window.

use tracing::debug;

use super::canvas::{outward_rotation, BoundingBox, Canvas};
use super::labels::{Label, LabelPlacer};
use super::{layers, Component};
use crate::astro::{
    midnight_sidereal_angle, Point, Projection, CENTRAL_HOLE_SIZE, MONTHS, R_1, R_2, UNIT_CM, UNIT_MM,
};
use crate::catalog::Catalog;
use crate::core::error::Result;
use crate::core::models::Settings;
use crate::formats::{HAlign, Style, TextStyle, VAlign};

/// Stick-figure segments longer than this are too distorted to draw
const MAX_STICK_LENGTH: f64 = 4.0 * UNIT_CM;

/// Disc radius per magnitude below 5
const STAR_SCALE: f64 = 0.18 * UNIT_MM;

/// Smallest star disc, for magnitude limits fainter than 5
const MIN_STAR_RADIUS: f64 = 0.05 * UNIT_MM;

const CROSS_SIZE: f64 = 1.0 * UNIT_MM;
const CROSS_LINE_WIDTH: f64 = 0.3;

const NAME_SIZE: f64 = 2.0;
const MONTH_SIZE: f64 = 3.4;
const DAY_NUMBER_SIZE: f64 = 1.8;

/// Gap either side of a day tick between the digits of its number
const DIGIT_GAP: f64 = 0.2 * UNIT_MM;

/// Star wheel for one latitude
pub struct StarWheel<'a> {
    settings: &'a Settings,
    catalog: &'a Catalog,
    projection: Projection,
}

impl<'a> StarWheel<'a> {
    pub fn new(settings: &'a Settings, catalog: &'a Catalog) -> Self {
        Self {
            settings,
            catalog,
            projection: Projection::new(settings),
        }
    }

    /// Polar angle of a calendar mark; `None` only for dates that don't exist
    fn date_angle(&self, month: u32, day: u32, hour: u32) -> Option<f64> {
        let theta = midnight_sidereal_angle(month, day, hour)?;
        Some(-self.settings.hemisphere().sign() * theta)
    }

    fn draw_disc(&self, canvas: &mut Canvas) {
        let palette = self.settings.theme.palette();
        let shading_inner = R_1 * 0.55 + R_2 * 0.45;

        canvas.begin_layer(layers::BACKGROUND);
        canvas.circle(
            Point::default(),
            R_1,
            Style::fill(palette.background).with_stroke(palette.edge),
        );
        canvas.ring(shading_inner, R_1, Style::fill(palette.shading));
        canvas.circle(Point::default(), CENTRAL_HOLE_SIZE, Style::stroke(palette.edge));
        canvas.end_group();
    }

    fn draw_declination_circles(&self, canvas: &mut Canvas) {
        let palette = self.settings.theme.palette();

        canvas.begin_layer(layers::GRID);
        for dec in (-80..85).step_by(15) {
            let r = self.projection.radius(dec as f64);
            if r > R_2 {
                continue;
            }
            canvas.circle(Point::default(), r, Style::stroke(palette.grid));
        }
        canvas.end_group();
    }

    fn draw_stick_figures(&self, canvas: &mut Canvas) {
        let style = Style::stroke(self.settings.theme.palette().stick).dotted();

        canvas.begin_layer(layers::STICK_FIGURES);
        for segment in &self.catalog.stick_figures {
            let (Some(p1), Some(p2)) = (
                self.projection.wheel_position(segment.ra1_deg, segment.dec1_deg),
                self.projection.wheel_position(segment.ra2_deg, segment.dec2_deg),
            ) else {
                continue;
            };

            if p1.distance(&p2) > MAX_STICK_LENGTH {
                debug!("Skipping long {} segment", segment.constellation);
                continue;
            }
            canvas.line(p1, p2, style);
        }
        canvas.end_group();
    }

    fn draw_stars(&self, canvas: &mut Canvas) {
        let style = Style::fill(self.settings.theme.palette().star);
        let limit = self.settings.magnitude_limit;

        canvas.begin_layer(layers::STARS);
        for star in &self.catalog.stars {
            let (true, Some(mag)) = (star.is_brighter_than(limit), star.mag) else {
                continue;
            };
            if let Some(at) = self.projection.wheel_position(star.ra_deg, star.dec_deg) {
                let radius = (STAR_SCALE * (5.0 - mag)).max(MIN_STAR_RADIUS);
                canvas.circle(at, radius, style);
            }
        }
        canvas.end_group();
    }

    fn draw_custom_objects(&self, canvas: &mut Canvas) {
        let style = Style::stroke(self.settings.theme.palette().dso).with_line_width(CROSS_LINE_WIDTH);
        let half = CROSS_SIZE / 2.0;

        canvas.begin_layer(layers::CUSTOM_OBJECTS);
        for object in &self.catalog.custom_objects {
            if object.mag > self.settings.magnitude_limit {
                debug!("{} is fainter than the magnitude limit", object.id);
                continue;
            }
            let Some(at) = self.projection.wheel_position(object.ra_deg, object.dec_deg) else {
                debug!("{} never rises at this latitude", object.id);
                continue;
            };
            canvas.line(at.offset(-half, 0.0), at.offset(half, 0.0), style);
            canvas.line(at.offset(0.0, -half), at.offset(0.0, half), style);
        }
        canvas.end_group();
    }

    fn draw_constellation_names(&self, canvas: &mut Canvas) {
        let color = self.settings.theme.palette().constellation;

        let mut placer = LabelPlacer::new(R_2);
        for name in &self.catalog.constellation_names {
            if let Some(at) = self.projection.wheel_position(name.ra_deg(), name.dec_deg) {
                // Longest names are placed first
                let priority = name.name.chars().count() as i32;
                placer.add(
                    Label::new(name.name.clone(), at, NAME_SIZE)
                        .with_rotation(outward_rotation(at.angle()))
                        .with_priority(priority),
                );
            }
        }

        canvas.begin_layer(layers::CONSTELLATION_NAMES);
        for label in placer.place() {
            let style = TextStyle::new(label.size, color).rotated(label.rotation);
            canvas.text(label.text, label.position, style);
        }
        canvas.end_group();
    }

    fn draw_calendar(&self, canvas: &mut Canvas) {
        let color = self.settings.theme.palette().date;
        let tick = Style::stroke(color);

        // Day ticks run outward from the chart edge
        let r_3 = R_1 * 0.1 + R_2 * 0.9;
        let r_4 = R_1 * 0.2 + R_2 * 0.8;
        let r_month = R_1 * 0.65 + R_2 * 0.35;
        let r_6 = R_1 * 0.4 + R_2 * 0.6;

        canvas.begin_layer(layers::CALENDAR);

        for (index, month) in MONTHS.iter().enumerate() {
            let number = index as u32 + 1;

            if let Some(angle) = self.date_angle(number, month.days / 2, 12) {
                canvas.arc_text(month.name, r_month, angle, TextStyle::new(MONTH_SIZE, color));
            }

            for day in 1..=month.days {
                let Some(angle) = self.date_angle(number, day, 0) else {
                    continue;
                };
                let outer = if day == month.days {
                    R_1
                } else if day % 5 == 0 {
                    r_4
                } else {
                    r_3
                };
                canvas.line(Point::from_polar(R_2, angle), Point::from_polar(outer, angle), tick);
            }

            for day in [10, 20, month.days] {
                let Some(angle) = self.date_angle(number, day, 0) else {
                    continue;
                };
                self.draw_day_number(canvas, day, angle, r_6);
            }
        }

        canvas.circle(Point::default(), R_2, Style::stroke(color));
        canvas.end_group();
    }

    /// The two digits of a day number sit either side of its tick
    fn draw_day_number(&self, canvas: &mut Canvas, day: u32, angle: f64, radius: f64) {
        let style = TextStyle::new(DAY_NUMBER_SIZE, self.settings.theme.palette().date)
            .rotated(outward_rotation(angle));
        let gap = DIGIT_GAP / radius;

        // Text reads towards decreasing polar angle
        canvas.text(
            (day / 10).to_string(),
            Point::from_polar(radius, angle + gap),
            style.aligned(HAlign::End, VAlign::Middle),
        );
        canvas.text(
            (day % 10).to_string(),
            Point::from_polar(radius, angle - gap),
            style.aligned(HAlign::Start, VAlign::Middle),
        );
    }
}

impl Component for StarWheel<'_> {
    fn default_filename(&self) -> &'static str {
        "starwheel"
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::square(R_1 + 4.0 * UNIT_MM)
    }

    fn title(&self) -> String {
        format!("Star wheel for latitude {}", self.settings.latitude_label())
    }

    fn render(&self, canvas: &mut Canvas) -> Result<()> {
        debug!(
            "Rendering star wheel for {} ({} stars, {} segments)",
            self.settings.latitude_label(),
            self.catalog.stars.len(),
            self.catalog.stick_figures.len()
        );

        self.draw_disc(canvas);

        canvas.begin_clip(R_2);
        self.draw_declination_circles(canvas);
        self.draw_stick_figures(canvas);
        self.draw_stars(canvas);
        self.draw_custom_objects(canvas);
        self.draw_constellation_names(canvas);
        canvas.end_group();

        self.draw_calendar(canvas);
        Ok(())
    }
}
