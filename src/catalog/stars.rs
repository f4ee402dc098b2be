//! Bright star catalog
//!
//! Whitespace-delimited rows of `id ra_deg dec_deg mag [name]`.

use super::{check_position, data_lines, parse_field};
use crate::core::error::{PlanisphereError, Result};

/// A catalog star
#[derive(Debug, Clone, PartialEq)]
pub struct BrightStar {
    pub id: u32,
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// `None` when the catalog lists the magnitude as `-`
    pub mag: Option<f64>,
    /// Proper name, underscores already turned into spaces
    pub name: Option<String>,
}

impl BrightStar {
    /// Whether the star is bright enough to draw
    pub fn is_brighter_than(&self, limit: f64) -> bool {
        matches!(self.mag, Some(mag) if mag <= limit)
    }
}

/// Parse the bright star catalog
pub fn parse_bright_stars(text: &str, source_name: &str) -> Result<Vec<BrightStar>> {
    let mut stars = Vec::new();

    for (line_no, line) in data_lines(text) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 5 {
            return Err(PlanisphereError::malformed_row(
                source_name,
                line_no,
                format!("expected 4 or 5 columns, found {}", fields.len()),
            ));
        }

        let id: u32 = fields[0].parse().map_err(|_| {
            PlanisphereError::malformed_row(
                source_name,
                line_no,
                format!("id '{}' is not a catalog number", fields[0]),
            )
        })?;
        let ra_deg = parse_field(fields[1], "ra", source_name, line_no)?;
        let dec_deg = parse_field(fields[2], "dec", source_name, line_no)?;
        check_position(ra_deg, dec_deg, source_name, line_no)?;

        let mag = match fields[3] {
            "-" => None,
            value => Some(parse_field(value, "mag", source_name, line_no)?),
        };

        stars.push(BrightStar {
            id,
            ra_deg,
            dec_deg,
            mag,
            name: fields.get(4).map(|n| n.replace('_', " ")),
        });
    }

    Ok(stars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_rows() {
        let text = "# id ra dec mag name\n1 101.287 -16.716 -1.46 Sirius\n2 95.988 -52.696 -0.74\n";
        let stars = parse_bright_stars(text, "test").unwrap();
        assert_eq!(stars.len(), 2);
        assert_eq!(stars[0].id, 1);
        assert_eq!(stars[0].mag, Some(-1.46));
        assert_eq!(stars[0].name.as_deref(), Some("Sirius"));
        assert!(stars[1].name.is_none());
    }

    #[test]
    fn test_unknown_magnitude_is_never_drawn() {
        let stars = parse_bright_stars("7 128.5 -5.0 -", "test").unwrap();
        assert_eq!(stars[0].mag, None);
        assert!(!stars[0].is_brighter_than(99.0));
    }

    #[test]
    fn test_magnitude_limit() {
        let stars = parse_bright_stars("1 10 10 3.9\n2 10 10 4.0\n3 10 10 4.1", "test").unwrap();
        let visible: Vec<u32> = stars
            .iter()
            .filter(|s| s.is_brighter_than(4.0))
            .map(|s| s.id)
            .collect();
        assert_eq!(visible, vec![1, 2]);
    }

    #[test]
    fn test_underscores_become_spaces() {
        let stars = parse_bright_stars("4 219.9 -60.8 -0.27 Rigil_Kentaurus", "test").unwrap();
        assert_eq!(stars[0].name.as_deref(), Some("Rigil Kentaurus"));
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let err = parse_bright_stars("# c\n1 101.287 -16.716\n", "stars.dat").unwrap_err();
        match err {
            PlanisphereError::MalformedRow { source_name, line, .. } => {
                assert_eq!(source_name, "stars.dat");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = parse_bright_stars("1 abc -16.7 1.0", "test").unwrap_err();
        assert!(err.to_string().contains("ra 'abc'"));
    }

    #[test]
    fn test_out_of_range_declination_rejected() {
        let err = parse_bright_stars("1 10.0 95.0 1.0", "test").unwrap_err();
        assert!(err.to_string().contains("declination"));
    }
}
