//! Render Module - the printed parts of a planisphere
//!
//! Each part is a [`Component`] that draws itself onto a [`Canvas`]:
//!
//! - [`StarWheel`]: the rotating disc of stars with the calendar ring
//! - [`Holder`]: the card the wheel turns in, with the horizon window
//! - [`AltAzGrid`]: altitude/azimuth overlay for the window
//!
//! Drawing is pure; only [`Component::render_to_file`] touches the
//! filesystem.

pub mod alt_az;
pub mod canvas;
pub mod holder;
pub mod labels;
pub mod starwheel;
pub mod theme;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use crate::core::error::{PlanisphereError, Result, ResultExt};

pub use alt_az::AltAzGrid;
pub use canvas::{BoundingBox, Canvas, Footprint, Shape};
pub use holder::Holder;
pub use labels::{Label, LabelPlacer, PlacedLabel};
pub use starwheel::StarWheel;
pub use theme::{Palette, Theme};

/// Layer names used by every component, so callers can inspect a canvas
pub mod layers {
    pub const BACKGROUND: &str = "background";
    pub const GRID: &str = "grid";
    pub const STICK_FIGURES: &str = "stick-figures";
    pub const STARS: &str = "stars";
    pub const CUSTOM_OBJECTS: &str = "custom-objects";
    pub const CONSTELLATION_NAMES: &str = "constellation-names";
    pub const CALENDAR: &str = "calendar";
    pub const CUT_LINES: &str = "cut-lines";
    pub const TIME_RING: &str = "time-ring";
    pub const COMPASS: &str = "compass";
    pub const TEXT: &str = "text";
}

/// A printable part of the planisphere
pub trait Component {
    /// Filename stem, without latitude or extension
    fn default_filename(&self) -> &'static str;

    /// Page area used by the drawing, in millimetres
    fn bounding_box(&self) -> BoundingBox;

    /// Title embedded in the SVG
    fn title(&self) -> String;

    /// Draw the part
    fn render(&self, canvas: &mut Canvas) -> Result<()>;

    /// Draw the part onto a fresh canvas
    fn render_canvas(&self) -> Result<Canvas> {
        let mut canvas = Canvas::new(self.bounding_box(), self.title()).with_id_prefix(self.default_filename());
        self.render(&mut canvas)?;
        Ok(canvas)
    }

    /// Render as an SVG document; `prolog` adds the XML declaration
    fn render_to_string(&self, prolog: bool) -> Result<String> {
        let canvas = self.render_canvas()?;
        let mut output = Vec::new();
        canvas.write_svg(&mut output, prolog)?;
        Ok(String::from_utf8(output)?)
    }

    /// Render and write to `path`
    fn render_to_file(&self, path: &Path) -> Result<()> {
        let canvas = self.render_canvas()?;
        let file = File::create(path)
            .map_err(PlanisphereError::from)
            .context(format!("creating {}", path.display()))?;
        canvas.write_svg(BufWriter::new(file), true)?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}
