//! Drawing surface for planisphere parts
//!
//! Components draw onto a [`Canvas`], which records vector primitives in page
//! millimetres. The recording can be inspected (tests check where stars
//! landed) and then serialised through [`SvgWriter`].

use std::io::Write;

use crate::astro::{Point, UNIT_DEG};
use crate::core::error::Result;
use crate::formats::{HAlign, Style, SvgConfig, SvgWriter, TextStyle, VAlign};

/// Average glyph advance as a fraction of the font size
const GLYPH_ADVANCE: f64 = 0.6;

/// Rough rendered width of a run of text
pub fn estimate_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_ADVANCE
}

/// Axis-aligned rectangle on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Square box centred on the origin
    pub fn square(half_width: f64) -> Self {
        Self::new(-half_width, half_width, -half_width, half_width)
    }

    /// Smallest box containing all the points
    pub fn around(points: &[Point]) -> Self {
        let mut bbox = Self::new(f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for p in points {
            bbox.x_min = bbox.x_min.min(p.x);
            bbox.x_max = bbox.x_max.max(p.x);
            bbox.y_min = bbox.y_min.min(p.y);
            bbox.y_max = bbox.y_max.max(p.y);
        }
        bbox
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x_min, self.y_min),
            Point::new(self.x_max, self.y_min),
            Point::new(self.x_max, self.y_max),
            Point::new(self.x_min, self.y_max),
        ]
    }

    /// Overlap test; touching edges don't count
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }
}

/// Outline of a rectangle turned about an anchor, such as a run of rotated
/// text as it appears on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub corners: [Point; 4],
}

impl Footprint {
    /// Rectangle spanning `x_from..x_to`, `y_from..y_to` relative to `anchor`,
    /// then rotated clockwise by `rotation` degrees about it
    pub fn new(anchor: Point, x_from: f64, x_to: f64, y_from: f64, y_to: f64, rotation: f64) -> Self {
        let (sin, cos) = rotation.to_radians().sin_cos();
        let place = |x: f64, y: f64| anchor.offset(x * cos - y * sin, x * sin + y * cos);
        Self {
            corners: [
                place(x_from, y_from),
                place(x_to, y_from),
                place(x_to, y_to),
                place(x_from, y_to),
            ],
        }
    }

    /// Where `text` lands when drawn at `at` with `style`
    pub fn of_text(text: &str, at: Point, style: &TextStyle) -> Self {
        let width = estimate_text_width(text, style.size);
        let height = style.size;
        let (x_from, x_to) = match style.h_align {
            HAlign::Start => (0.0, width),
            HAlign::Middle => (-width / 2.0, width / 2.0),
            HAlign::End => (-width, 0.0),
        };
        let (y_from, y_to) = match style.v_align {
            VAlign::Top => (0.0, height),
            VAlign::Middle => (-height / 2.0, height / 2.0),
            VAlign::Baseline => (-height, 0.0),
        };
        Self::new(at, x_from, x_to, y_from, y_to, style.rotation)
    }

    /// Axis-aligned box around the corners
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::around(&self.corners)
    }

    /// Whether the whole outline lies within `radius` of the origin
    pub fn inside_circle(&self, radius: f64) -> bool {
        self.corners.iter().all(|c| c.radius() <= radius)
    }

    /// Separating axis test; touching edges don't count
    pub fn overlaps(&self, other: &Footprint) -> bool {
        if !self.bounds().intersects(&other.bounds()) {
            return false;
        }
        self.axes().into_iter().chain(other.axes()).all(|axis| {
            let (a_min, a_max) = self.project(axis);
            let (b_min, b_max) = other.project(axis);
            a_min < b_max && b_min < a_max
        })
    }

    fn axes(&self) -> [Point; 2] {
        let [a, b, _, d] = self.corners;
        [Point::new(b.x - a.x, b.y - a.y), Point::new(d.x - a.x, d.y - a.y)]
    }

    fn project(&self, axis: Point) -> (f64, f64) {
        self.corners
            .iter()
            .map(|c| c.x * axis.x + c.y * axis.y)
            .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        centre: Point,
        radius: f64,
        style: Style,
    },
    /// Annulus about the origin
    Ring {
        inner: f64,
        outer: f64,
        style: Style,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        style: Style,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
    BeginLayer(String),
    BeginClip(f64),
    EndGroup,
}

/// Records the shapes of one drawing
#[derive(Debug, Clone)]
pub struct Canvas {
    bounds: BoundingBox,
    title: String,
    id_prefix: Option<String>,
    shapes: Vec<Shape>,
    depth: usize,
}

impl Canvas {
    pub fn new(bounds: BoundingBox, title: impl Into<String>) -> Self {
        Self {
            bounds,
            title: title.into(),
            id_prefix: None,
            shapes: Vec::new(),
            depth: 0,
        }
    }

    /// Prefix group and clip ids, e.g. `starwheel-stars`
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn circle(&mut self, centre: Point, radius: f64, style: Style) {
        self.shapes.push(Shape::Circle {
            centre,
            radius,
            style,
        });
    }

    pub fn ring(&mut self, inner: f64, outer: f64, style: Style) {
        self.shapes.push(Shape::Ring { inner, outer, style });
    }

    pub fn line(&mut self, from: Point, to: Point, style: Style) {
        self.polyline(vec![from, to], false, style);
    }

    pub fn polyline(&mut self, points: Vec<Point>, closed: bool, style: Style) {
        self.shapes.push(Shape::Polyline {
            points,
            closed,
            style,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, at: Point, style: TextStyle) {
        self.shapes.push(Shape::Text {
            text: text.into(),
            at,
            style,
        });
    }

    /// Write text along a circle about the origin, one glyph at a time, with
    /// the feet of the letters towards the centre. `centre_angle` is a polar
    /// angle in radians.
    pub fn arc_text(&mut self, text: &str, radius: f64, centre_angle: f64, style: TextStyle) {
        let glyphs: Vec<char> = text.chars().collect();
        if glyphs.is_empty() || radius <= 0.0 {
            return;
        }

        let step = style.size * GLYPH_ADVANCE / radius;
        let middle = (glyphs.len() as f64 - 1.0) / 2.0;

        for (i, glyph) in glyphs.iter().enumerate() {
            if glyph.is_whitespace() {
                continue;
            }
            let angle = centre_angle - (i as f64 - middle) * step;
            self.text(
                glyph.to_string(),
                Point::from_polar(radius, angle),
                style.rotated(outward_rotation(angle)),
            );
        }
    }

    /// Start a named group; shapes until [`Canvas::end_group`] belong to it
    pub fn begin_layer(&mut self, name: &str) {
        self.shapes.push(Shape::BeginLayer(name.to_string()));
        self.depth += 1;
    }

    /// Start a group clipped to a circle about the origin
    pub fn begin_clip(&mut self, radius: f64) {
        self.shapes.push(Shape::BeginClip(radius));
        self.depth += 1;
    }

    pub fn end_group(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
            self.shapes.push(Shape::EndGroup);
        }
    }

    /// Shapes drawn inside the named layer, nested groups included
    pub fn layer(&self, name: &str) -> Vec<&Shape> {
        let mut found = Vec::new();
        let mut depth_in_layer: Option<usize> = None;

        for shape in &self.shapes {
            match (shape, depth_in_layer) {
                (Shape::BeginLayer(n), None) if n == name => depth_in_layer = Some(0),
                (Shape::BeginLayer(_), Some(d)) | (Shape::BeginClip(_), Some(d)) => {
                    depth_in_layer = Some(d + 1)
                }
                (Shape::EndGroup, Some(0)) => depth_in_layer = None,
                (Shape::EndGroup, Some(d)) => depth_in_layer = Some(d - 1),
                (_, Some(_)) => found.push(shape),
                _ => {}
            }
        }

        found
    }

    /// Serialise the drawing as SVG
    pub fn write_svg<W: Write>(&self, writer: W, prolog: bool) -> Result<()> {
        let config = SvgConfig {
            x_min: self.bounds.x_min,
            y_min: self.bounds.y_min,
            width: self.bounds.width(),
            height: self.bounds.height(),
            title: Some(self.title.clone()),
            prolog,
            id_prefix: self.id_prefix.clone(),
        };

        let mut svg = SvgWriter::new(writer, config);
        svg.write_start()?;

        for shape in &self.shapes {
            match shape {
                Shape::Circle {
                    centre,
                    radius,
                    style,
                } => svg.write_circle(*centre, *radius, style)?,
                Shape::Ring { inner, outer, style } => svg.write_ring(*inner, *outer, style)?,
                Shape::Polyline {
                    points,
                    closed,
                    style,
                } => svg.write_polyline(points, *closed, style)?,
                Shape::Text { text, at, style } => svg.write_text(text, *at, style)?,
                Shape::BeginLayer(name) => svg.begin_group(name)?,
                Shape::BeginClip(radius) => svg.begin_clip_circle(*radius)?,
                Shape::EndGroup => svg.end_group()?,
            }
        }

        for _ in 0..self.depth {
            svg.end_group()?;
        }
        svg.write_end()?;
        svg.flush()?;
        Ok(())
    }
}

/// Text rotation, in degrees, that puts the feet of the letters towards the
/// centre at polar angle `angle`
pub fn outward_rotation(angle: f64) -> f64 {
    180.0 - angle / UNIT_DEG
}

/// Points along an arc about the origin, roughly one per degree
pub fn arc_points(radius: f64, from: f64, to: f64) -> Vec<Point> {
    let steps = (((to - from).abs() / UNIT_DEG).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| Point::from_polar(radius, from + (to - from) * i as f64 / steps as f64))
        .collect()
}
