//! Constellation stick figures and name positions

use super::{check_position, data_lines, parse_field};
use crate::core::error::{PlanisphereError, Result};

/// One stroke of a constellation stick figure, RA in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct StickSegment {
    pub constellation: String,
    pub ra1_deg: f64,
    pub dec1_deg: f64,
    pub ra2_deg: f64,
    pub dec2_deg: f64,
}

/// Where a constellation's name is written
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationName {
    /// Display name, underscores turned into spaces
    pub name: String,
    pub ra_hours: f64,
    pub dec_deg: f64,
}

impl ConstellationName {
    pub fn ra_deg(&self) -> f64 {
        self.ra_hours * 360.0 / 24.0
    }
}

/// Parse `name ra1 dec1 ra2 dec2` rows
pub fn parse_stick_figures(text: &str, source_name: &str) -> Result<Vec<StickSegment>> {
    let mut segments = Vec::new();

    for (line_no, line) in data_lines(text) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(PlanisphereError::malformed_row(
                source_name,
                line_no,
                format!("expected 5 columns, found {}", fields.len()),
            ));
        }

        let ra1_deg = parse_field(fields[1], "ra1", source_name, line_no)?;
        let dec1_deg = parse_field(fields[2], "dec1", source_name, line_no)?;
        let ra2_deg = parse_field(fields[3], "ra2", source_name, line_no)?;
        let dec2_deg = parse_field(fields[4], "dec2", source_name, line_no)?;
        check_position(ra1_deg, dec1_deg, source_name, line_no)?;
        check_position(ra2_deg, dec2_deg, source_name, line_no)?;

        segments.push(StickSegment {
            constellation: fields[0].to_string(),
            ra1_deg,
            dec1_deg,
            ra2_deg,
            dec2_deg,
        });
    }

    Ok(segments)
}

/// Parse `name ra_hours dec [...]` rows; trailing columns are ignored
pub fn parse_constellation_names(text: &str, source_name: &str) -> Result<Vec<ConstellationName>> {
    let mut names = Vec::new();

    for (line_no, line) in data_lines(text) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(PlanisphereError::malformed_row(
                source_name,
                line_no,
                format!("expected at least 3 columns, found {}", fields.len()),
            ));
        }

        let ra_hours = parse_field(fields[1], "ra", source_name, line_no)?;
        let dec_deg = parse_field(fields[2], "dec", source_name, line_no)?;
        if !(0.0..=24.0).contains(&ra_hours) {
            return Err(PlanisphereError::malformed_row(
                source_name,
                line_no,
                format!("right ascension {} outside 0..24 hours", ra_hours),
            ));
        }
        check_position(0.0, dec_deg, source_name, line_no)?;

        names.push(ConstellationName {
            name: fields[0].replace('_', " "),
            ra_hours,
            dec_deg,
        });
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stick_figures() {
        let text = "# Orion\nOri 88.793 7.407 81.283 6.350\n\nOri 88.793 7.407 85.190 -1.943\n";
        let segments = parse_stick_figures(text, "lines.dat").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].constellation, "Ori");
        assert_eq!(segments[1].dec2_deg, -1.943);
    }

    #[test]
    fn test_stick_figure_column_count() {
        let err = parse_stick_figures("Ori 88.793 7.407 81.283", "lines.dat").unwrap_err();
        assert!(err.to_string().starts_with("lines.dat:1:"));
    }

    #[test]
    fn test_parse_names_converts_underscores() {
        let names = parse_constellation_names("Ursa_Major 11.3 58.0 extra", "names.dat").unwrap();
        assert_eq!(names[0].name, "Ursa Major");
        assert!((names[0].ra_deg() - 169.5).abs() < 1e-9);
    }

    #[test]
    fn test_name_ra_out_of_range() {
        let err = parse_constellation_names("Leo 25.0 13.5", "names.dat").unwrap_err();
        assert!(err.to_string().contains("0..24 hours"));
    }
}
