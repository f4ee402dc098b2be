//! Greedy placement of text labels
//!
//! Labels are tried in priority order, then in the order they were added.
//! Each label has a handful of candidate positions around its anchor, taken
//! along the label's own baseline and across it, so a rotated label moves
//! the way it reads. The first candidate whose rotated outline stays inside
//! the chart and clears every label already placed wins. A label with no
//! free position is dropped.

use tracing::debug;

use super::canvas::{estimate_text_width, Footprint};
use crate::astro::Point;

/// Gap between an anchor and an offset label, as a fraction of font size
const OFFSET_GAP: f64 = 0.5;

/// A label waiting to be placed
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Point,
    pub size: f64,
    /// Clockwise rotation about the centre of the text, degrees
    pub rotation: f64,
    /// Higher priority labels are placed first
    pub priority: i32,
}

impl Label {
    pub fn new(text: impl Into<String>, anchor: Point, size: f64) -> Self {
        Self {
            text: text.into(),
            anchor,
            size,
            rotation: 0.0,
            priority: 0,
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn width(&self) -> f64 {
        estimate_text_width(&self.text, self.size)
    }

    /// Centre positions to try, best first: on the anchor, then above,
    /// below, after and before it in the label's own frame
    fn candidates(&self) -> [Point; 5] {
        let along = self.width() / 2.0 + self.size * OFFSET_GAP;
        let across = self.size * (1.0 + OFFSET_GAP);
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let a = self.anchor;
        [
            a,
            a.offset(across * sin, -across * cos),
            a.offset(-across * sin, across * cos),
            a.offset(along * cos, along * sin),
            a.offset(-along * cos, -along * sin),
        ]
    }

    fn footprint_at(&self, centre: Point) -> Footprint {
        let half_w = self.width() / 2.0;
        let half_h = self.size / 2.0;
        Footprint::new(centre, -half_w, half_w, -half_h, half_h, self.rotation)
    }
}

/// A label that found a home
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    /// Centre of the text
    pub position: Point,
    pub size: f64,
    pub rotation: f64,
    /// Page outline of the text as drawn
    pub footprint: Footprint,
}

/// Collects labels and places them without overlaps inside a circle
#[derive(Debug, Clone)]
pub struct LabelPlacer {
    limit_radius: f64,
    pending: Vec<Label>,
}

impl LabelPlacer {
    /// Labels must fit entirely within `limit_radius` of the origin
    pub fn new(limit_radius: f64) -> Self {
        Self {
            limit_radius,
            pending: Vec::new(),
        }
    }

    pub fn add(&mut self, label: Label) {
        self.pending.push(label);
    }

    /// Place every label that fits; the result is in placement order
    pub fn place(self) -> Vec<PlacedLabel> {
        let mut order: Vec<usize> = (0..self.pending.len()).collect();
        // Stable sort keeps insertion order within a priority
        order.sort_by_key(|&i| std::cmp::Reverse(self.pending[i].priority));

        let mut placed: Vec<PlacedLabel> = Vec::with_capacity(self.pending.len());

        for i in order {
            let label = &self.pending[i];
            let spot = label.candidates().into_iter().find_map(|centre| {
                let footprint = label.footprint_at(centre);
                let fits = footprint.inside_circle(self.limit_radius)
                    && !placed.iter().any(|p| p.footprint.overlaps(&footprint));
                fits.then_some((centre, footprint))
            });

            match spot {
                Some((position, footprint)) => placed.push(PlacedLabel {
                    text: label.text.clone(),
                    position,
                    size: label.size,
                    rotation: label.rotation,
                    footprint,
                }),
                None => debug!("No room for label '{}', dropping it", label.text),
            }
        }

        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_label_centred_on_anchor() {
        let mut placer = LabelPlacer::new(50.0);
        placer.add(Label::new("Orion", Point::new(5.0, 5.0), 2.0));
        let placed = placer.place();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].position, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_colliding_label_moves_to_next_candidate() {
        let mut placer = LabelPlacer::new(50.0);
        placer.add(Label::new("Lyra", Point::new(0.0, 0.0), 2.0));
        placer.add(Label::new("Vega", Point::new(0.5, 0.0), 2.0));
        let placed = placer.place();
        assert_eq!(placed.len(), 2);
        assert!(placed[1].position.y < 0.0, "second label goes above");
        assert!(!placed[0].footprint.overlaps(&placed[1].footprint));
    }

    #[test]
    fn test_label_outside_limit_dropped() {
        let mut placer = LabelPlacer::new(10.0);
        placer.add(Label::new("Far away", Point::new(0.0, 30.0), 2.0));
        assert!(placer.place().is_empty());
    }

    #[test]
    fn test_priority_wins_the_contested_spot() {
        let mut placer = LabelPlacer::new(50.0);
        placer.add(Label::new("minor", Point::new(0.0, 0.0), 2.0));
        placer.add(Label::new("MAJOR", Point::new(0.0, 0.0), 2.0).with_priority(1));
        let placed = placer.place();
        assert_eq!(placed[0].text, "MAJOR");
        assert_eq!(placed[0].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_crowded_labels_never_overlap() {
        let mut placer = LabelPlacer::new(30.0);
        for i in 0..40 {
            let angle = i as f64 * 0.7;
            let r = (i % 7) as f64 * 3.0;
            placer.add(Label::new(format!("Label{}", i), Point::from_polar(r, angle), 2.0));
        }
        let placed = placer.place();
        assert!(!placed.is_empty());
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert!(!a.footprint.overlaps(&b.footprint), "{} overlaps {}", a.text, b.text);
            }
            assert!(a.footprint.inside_circle(30.0));
        }
    }

    #[test]
    fn test_upright_neighbours_are_separated() {
        // Both labels stand on end at the right of the chart, one above the other
        let mut placer = LabelPlacer::new(63.0);
        placer.add(Label::new("Cassiopeia", Point::new(40.0, 0.0), 2.0).with_rotation(90.0));
        placer.add(Label::new("Andromeda", Point::new(40.0, 3.0), 2.0).with_rotation(94.3));
        let placed = placer.place();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].position, Point::new(40.0, 0.0));
        assert_ne!(placed[1].position, Point::new(40.0, 3.0));
        assert!(!placed[0].footprint.overlaps(&placed[1].footprint));
    }

    #[test]
    fn test_offsets_follow_the_label_baseline() {
        let mut placer = LabelPlacer::new(63.0);
        placer.add(Label::new("Lyra", Point::new(20.0, 0.0), 2.0).with_rotation(90.0));
        placer.add(Label::new("Vega", Point::new(20.0, 0.0), 2.0).with_rotation(90.0));
        let placed = placer.place();
        assert_eq!(placed.len(), 2);
        // "Above" an upright label is off to the side of the page, not up it
        let moved = placed[1].position;
        assert!((moved.y - 0.0).abs() < 1e-9, "{:?}", moved);
        assert!((moved.x - 23.0).abs() < 1e-9, "{:?}", moved);
        assert_eq!(placed[1].rotation, 90.0);
    }

    #[test]
    fn test_upright_label_checked_against_limit_as_drawn() {
        // Level, this name would sit inside a radius of 10 at the origin
        let mut placer = LabelPlacer::new(10.0);
        placer.add(Label::new("Camelopardalis", Point::new(0.0, 0.0), 2.0));
        assert_eq!(placer.place().len(), 1);

        // Stood on end beside the edge, no candidate keeps it inside
        let mut placer = LabelPlacer::new(10.0);
        placer.add(Label::new("Camelopardalis", Point::new(8.0, 0.0), 2.0).with_rotation(90.0));
        assert!(placer.place().is_empty());
    }

    #[test]
    fn test_placement_is_deterministic() {
        let build = || {
            let mut placer = LabelPlacer::new(30.0);
            for i in 0..20 {
                placer.add(Label::new(format!("L{}", i), Point::new(i as f64 % 5.0, 0.0), 2.0));
            }
            placer.place()
        };
        assert_eq!(build(), build());
    }
}
