//! The holder
//!
//! Card the star wheel turns behind. The horizon window shows the part of
//! the wheel above the horizon; four slots between the chart edge and the
//! wheel rim show the calendar ring, and the time-of-day scale runs around
//! the outside. A handle below the disc carries the title.

use tracing::debug;

use super::canvas::{arc_points, outward_rotation, BoundingBox, Canvas};
use super::{layers, Component};
use crate::astro::{Point, Projection, CENTRAL_HOLE_SIZE, HOLDER_RING, R_1, R_2, UNIT_DEG, UNIT_MM, UNIT_REV};
use crate::core::error::Result;
use crate::core::models::Settings;
use crate::formats::{Style, TextStyle};

/// Outer radius of the holder disc
const R_HOLDER: f64 = R_1 + HOLDER_RING;

/// Width of the card left between neighbouring date slots
const BRIDGE_WIDTH: f64 = 8.0 * UNIT_MM;

/// Horizon sampling, one point per degree of azimuth
const HORIZON_STEPS: usize = 360;

/// Compass letters sit this far inside the window from the horizon
const COMPASS_INSET: f64 = 4.0 * UNIT_MM;

const COMPASS_POINTS: [(&str, f64); 8] = [
    ("N", 0.0),
    ("NE", 45.0),
    ("E", 90.0),
    ("SE", 135.0),
    ("S", 180.0),
    ("SW", 225.0),
    ("W", 270.0),
    ("NW", 315.0),
];

const HANDLE_HALF_WIDTH: f64 = 0.6 * R_HOLDER;
const HANDLE_DEPTH: f64 = 24.0 * UNIT_MM;

const HOUR_LABEL_SIZE: f64 = 3.0;
const COMPASS_SIZE: f64 = 3.0;
const TITLE_SIZE: f64 = 6.0;
const NOTE_SIZE: f64 = 2.0;

/// Holder for one latitude
pub struct Holder<'a> {
    settings: &'a Settings,
    projection: Projection,
}

impl<'a> Holder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            projection: Projection::new(settings),
        }
    }

    /// Where the handle joins the disc
    fn fold_y() -> f64 {
        (R_HOLDER * R_HOLDER - HANDLE_HALF_WIDTH * HANDLE_HALF_WIDTH).sqrt()
    }

    /// Outline of the disc and its handle, as one closed path
    fn outline() -> Vec<Point> {
        let fold_y = Self::fold_y();
        let handle_bottom = R_HOLDER + HANDLE_DEPTH;
        let start = HANDLE_HALF_WIDTH.atan2(fold_y);

        let mut points = arc_points(R_HOLDER, start, UNIT_REV - start);
        points.push(Point::new(-HANDLE_HALF_WIDTH, handle_bottom));
        points.push(Point::new(HANDLE_HALF_WIDTH, handle_bottom));
        points
    }

    /// Closed outlines of the four date slots, bridged at the quarter points
    pub fn date_slots() -> Vec<Vec<Point>> {
        let bridge = BRIDGE_WIDTH / 2.0 / R_2;
        (0..4)
            .map(|quarter| {
                let from = quarter as f64 * 90.0 * UNIT_DEG + bridge;
                let to = (quarter + 1) as f64 * 90.0 * UNIT_DEG - bridge;
                let mut slot = arc_points(R_2, from, to);
                slot.extend(arc_points(R_1, to, from));
                slot
            })
            .collect()
    }

    /// Polar angle of a local time on the time ring, hours after midnight
    pub fn time_angle(&self, hours: f64) -> f64 {
        self.settings.hemisphere().sign() * hours * 15.0 * UNIT_DEG
    }

    fn draw_cut_lines(&self, canvas: &mut Canvas) {
        let edge = Style::stroke(self.settings.theme.palette().edge);

        canvas.begin_layer(layers::CUT_LINES);
        canvas.polyline(Self::outline(), true, edge);
        canvas.polyline(self.projection.horizon(HORIZON_STEPS), true, edge);
        for slot in Self::date_slots() {
            canvas.polyline(slot, true, edge);
        }
        canvas.circle(Point::default(), CENTRAL_HOLE_SIZE, edge);

        let fold_y = Self::fold_y();
        canvas.line(
            Point::new(-HANDLE_HALF_WIDTH, fold_y),
            Point::new(HANDLE_HALF_WIDTH, fold_y),
            edge.dotted(),
        );
        canvas.end_group();
    }

    fn draw_time_ring(&self, canvas: &mut Canvas) {
        let color = self.settings.theme.palette().date;
        let tick = Style::stroke(color);

        canvas.begin_layer(layers::TIME_RING);
        for step in 0..24 * 6 {
            let angle = self.time_angle(step as f64 / 6.0);
            let length = match step % 6 {
                0 => 3.0,
                3 => 2.0,
                _ => 1.2,
            } * UNIT_MM;
            canvas.line(
                Point::from_polar(R_1, angle),
                Point::from_polar(R_1 + length, angle),
                tick,
            );
        }

        let label_radius = R_1 + HOLDER_RING * 0.6;
        for hour in 0..24 {
            let angle = self.time_angle(hour as f64);
            canvas.text(
                format!("{}h", hour),
                Point::from_polar(label_radius, angle),
                TextStyle::new(HOUR_LABEL_SIZE, color).rotated(outward_rotation(angle)),
            );
        }
        canvas.end_group();
    }

    fn draw_compass(&self, canvas: &mut Canvas) {
        let color = self.settings.theme.palette().edge;
        let horizon = self.projection.horizon(HORIZON_STEPS);
        let centroid = Point::new(
            horizon.iter().map(|p| p.x).sum::<f64>() / horizon.len() as f64,
            horizon.iter().map(|p| p.y).sum::<f64>() / horizon.len() as f64,
        );

        canvas.begin_layer(layers::COMPASS);
        for (name, azimuth) in COMPASS_POINTS {
            let on_horizon = self.projection.alt_az_position(0.0, azimuth);
            let distance = on_horizon.distance(&centroid);
            let at = if distance > COMPASS_INSET {
                let scale = COMPASS_INSET / distance;
                on_horizon.offset(
                    (centroid.x - on_horizon.x) * scale,
                    (centroid.y - on_horizon.y) * scale,
                )
            } else {
                centroid
            };
            canvas.text(name, at, TextStyle::new(COMPASS_SIZE, color).bold());
        }
        canvas.end_group();
    }

    fn draw_title(&self, canvas: &mut Canvas) {
        let color = self.settings.theme.palette().edge;

        canvas.begin_layer(layers::TEXT);
        canvas.text(
            format!("Planisphere {}", self.settings.latitude_label()),
            Point::new(0.0, R_HOLDER + 7.0 * UNIT_MM),
            TextStyle::new(TITLE_SIZE, color).bold(),
        );
        canvas.text(
            "Cut along the solid lines, including the horizon window and the date slots.",
            Point::new(0.0, R_HOLDER + 13.0 * UNIT_MM),
            TextStyle::new(NOTE_SIZE, color),
        );
        canvas.text(
            "The dotted line marks where the handle meets the disc.",
            Point::new(0.0, R_HOLDER + 17.5 * UNIT_MM),
            TextStyle::new(NOTE_SIZE, color),
        );
        canvas.end_group();
    }
}

impl Component for Holder<'_> {
    fn default_filename(&self) -> &'static str {
        "holder"
    }

    fn bounding_box(&self) -> BoundingBox {
        let margin = 4.0 * UNIT_MM;
        BoundingBox::new(
            -R_HOLDER - margin,
            R_HOLDER + margin,
            -R_HOLDER - margin,
            R_HOLDER + HANDLE_DEPTH + margin,
        )
    }

    fn title(&self) -> String {
        format!("Planisphere holder for latitude {}", self.settings.latitude_label())
    }

    fn render(&self, canvas: &mut Canvas) -> Result<()> {
        debug!("Rendering holder for {}", self.settings.latitude_label());

        let background = self.settings.theme.palette().background;
        canvas.begin_layer(layers::BACKGROUND);
        canvas.polyline(Self::outline(), true, Style::fill(background));
        canvas.end_group();

        self.draw_cut_lines(canvas);
        self.draw_time_ring(canvas);
        self.draw_compass(canvas);
        self.draw_title(canvas);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Shape;

    fn holder_canvas(lat: f64) -> Canvas {
        let settings = Settings::new(lat).unwrap();
        Holder::new(&settings).render_canvas().unwrap()
    }

    fn texts(shapes: Vec<&Shape>) -> Vec<(String, Point)> {
        shapes
            .into_iter()
            .filter_map(|s| match s {
                Shape::Text { text, at, .. } => Some((text.clone(), *at)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_date_slots_leave_four_bridges() {
        let slots = Holder::date_slots();
        assert_eq!(slots.len(), 4);
        for slot in &slots {
            for p in slot {
                assert!(p.radius() >= R_2 - 1e-9 && p.radius() <= R_1 + 1e-9);
                // No slot crosses a quarter point
                let quarter = (p.angle().rem_euclid(UNIT_REV) / UNIT_DEG) % 90.0;
                assert!(quarter > 1.0 && quarter < 89.0, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_time_ring_has_hour_labels_and_ten_minute_ticks() {
        let canvas = holder_canvas(52.0);
        let ring = canvas.layer(layers::TIME_RING);
        let ticks = ring.iter().filter(|s| matches!(s, Shape::Polyline { .. })).count();
        assert_eq!(ticks, 144);
        let labels = texts(ring);
        assert_eq!(labels.len(), 24);
        // Midnight at the bottom
        assert_eq!(labels[0].0, "0h");
        assert!(labels[0].1.x.abs() < 1e-9 && labels[0].1.y > R_1);
    }

    #[test]
    fn test_time_runs_the_other_way_in_the_south() {
        let north = Settings::new(45.0).unwrap();
        let south = Settings::new(-45.0).unwrap();
        let n = Holder::new(&north).time_angle(3.0);
        let s = Holder::new(&south).time_angle(3.0);
        assert!((n + s).abs() < 1e-12);
        assert!((n - 45.0 * UNIT_DEG).abs() < 1e-12);
    }

    #[test]
    fn test_compass_points_inside_the_chart() {
        for lat in [52.0, -35.0] {
            let canvas = holder_canvas(lat);
            let compass = texts(canvas.layer(layers::COMPASS));
            assert_eq!(compass.len(), 8);
            for (name, at) in compass {
                assert!(at.radius() < R_2, "lat {}: {} at {:?}", lat, name, at);
            }
        }
    }

    #[test]
    fn test_south_marker_near_bottom_in_north() {
        let canvas = holder_canvas(52.0);
        let compass = texts(canvas.layer(layers::COMPASS));
        let south = compass.iter().find(|(n, _)| n == "S").unwrap();
        assert!(south.1.y > R_2 - 2.0 * COMPASS_INSET);
        assert!(south.1.x.abs() < 1e-6);

        let canvas = holder_canvas(-52.0);
        let compass = texts(canvas.layer(layers::COMPASS));
        let north = compass.iter().find(|(n, _)| n == "N").unwrap();
        assert!(north.1.y > R_2 - 2.0 * COMPASS_INSET);
    }

    #[test]
    fn test_title_names_latitude() {
        let canvas = holder_canvas(-35.0);
        let title = texts(canvas.layer(layers::TEXT));
        assert_eq!(title[0].0, "Planisphere 35°S");
        assert!(canvas.bounds().y_max > title.last().unwrap().1.y);
    }

    #[test]
    fn test_outline_is_closed_around_the_disc() {
        let outline = Holder::outline();
        let top = outline.iter().map(|p| p.y).fold(f64::MAX, f64::min);
        assert!((top + R_HOLDER).abs() < 0.01);
        let bottom = outline.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert!((bottom - R_HOLDER - HANDLE_DEPTH).abs() < 1e-9);
    }
}
