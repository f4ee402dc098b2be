//! planisphere - printable planispheres for any latitude
//!
//! This library draws the parts of a cardboard planisphere for a chosen
//! latitude: the star wheel, the holder it turns in, an altitude/azimuth
//! overlay, and an HTML document that gathers them with instructions.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/planisphere.rs**: Thin wrapper that calls the library
//!
//! ```text
//! catalog ──► astro::Projection ──► render::{StarWheel, Holder, AltAzGrid} ──► formats::SvgWriter
//!                                                                         └──► formats::document
//! ```
//!
//! Output is deterministic: the same settings and catalogs always produce
//! byte-identical files.

pub mod astro;
pub mod catalog;
pub mod core;
pub mod formats;
pub mod render;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

pub use crate::catalog::Catalog;
pub use crate::core::{Config, Hemisphere, PlanisphereError, Result, ResultExt, Settings};
pub use crate::render::{AltAzGrid, Component, Holder, StarWheel, Theme};

use crate::formats::{write_instructions, DocumentPart, InstructionDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the planisphere library
pub fn version() -> &'static str {
    VERSION
}

/// Filename for a part, e.g. `starwheel_52N.svg`
pub fn part_filename(component: &dyn Component, settings: &Settings) -> String {
    format!("{}_{}.svg", component.default_filename(), settings.part_stem())
}

/// Filename for the assembled document, e.g. `planisphere_52N.html`
pub fn document_filename(settings: &Settings) -> String {
    format!("planisphere_{}.html", settings.part_stem())
}

/// Render every part for one latitude into `output_dir`, followed by the
/// instruction document. Returns the paths written, in order.
pub fn generate(settings: &Settings, catalog: &Catalog, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .map_err(PlanisphereError::from)
        .context(format!("creating output directory {}", output_dir.display()))?;

    let star_wheel = StarWheel::new(settings, catalog);
    let holder = Holder::new(settings);
    let alt_az = AltAzGrid::new(settings);
    let parts: [(&dyn Component, &str, &str); 3] = [
        (
            &star_wheel,
            "Star wheel",
            "Cut around the outer circle and make a small hole at the centre.",
        ),
        (
            &holder,
            "Holder",
            "Cut around the outline, then cut out the horizon window and the date slots.",
        ),
        (
            &alt_az,
            "Altitude and azimuth grid",
            "Print onto transparent film and fix over the horizon window.",
        ),
    ];

    let mut written = Vec::with_capacity(parts.len() + 1);
    let mut document_parts = Vec::with_capacity(parts.len());

    for (component, heading, caption) in parts {
        let path = output_dir.join(part_filename(component, settings));
        component.render_to_file(&path)?;
        written.push(path);

        document_parts.push(DocumentPart {
            heading: heading.to_string(),
            caption: caption.to_string(),
            svg: component.render_to_string(false)?,
        });
    }

    let document = InstructionDocument {
        latitude_label: settings.latitude_label(),
        southern: settings.hemisphere() == Hemisphere::South,
        parts: document_parts,
    };
    let path = output_dir.join(document_filename(settings));
    let file = File::create(&path)
        .map_err(PlanisphereError::from)
        .context(format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_instructions(&mut writer, &document)?;
    writer.flush()?;
    info!("Wrote {}", path.display());
    written.push(path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_filenames_use_latitude_stem() {
        let settings = Settings::new(-35.0).unwrap();
        assert_eq!(document_filename(&settings), "planisphere_35S.html");
        let holder = Holder::new(&settings);
        assert_eq!(part_filename(&holder, &settings), "holder_35S.svg");
    }

    #[test]
    fn test_generate_writes_all_parts() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::new(52.0).unwrap();
        let catalog = Catalog::bundled().unwrap();

        let written = generate(&settings, &catalog, dir.path()).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "starwheel_52N.svg",
                "holder_52N.svg",
                "alt_az_grid_52N.svg",
                "planisphere_52N.html"
            ]
        );

        let html = fs::read_to_string(dir.path().join("planisphere_52N.html")).unwrap();
        assert_eq!(html.matches("<svg ").count(), 3);
        assert!(!html.contains("<?xml"));
    }

    #[test]
    fn test_inlined_parts_have_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::new(52.0).unwrap();
        generate(&settings, &Catalog::bundled().unwrap(), dir.path()).unwrap();
        let html = fs::read_to_string(dir.path().join("planisphere_52N.html")).unwrap();

        let mut ids: Vec<&str> = html
            .split(" id=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert!(ids.contains(&"starwheel-clip1"));
        assert!(ids.contains(&"alt_az_grid-clip1"));
        assert!(html.contains("url(#alt_az_grid-clip1)"));

        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "duplicate ids in the document");
    }

    #[test]
    fn test_generate_creates_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let settings = Settings::new(-20.0).unwrap();
        generate(&settings, &Catalog::default(), &nested).unwrap();
        assert!(nested.join("starwheel_20S.svg").exists());
    }
}
