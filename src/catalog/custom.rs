//! Custom objects
//!
//! A CSV file with the header `id,ra,dec,mag`, where `ra` is written in hours
//! (`12h25m30s`) and `dec` in degrees (`+24°40′42″`). Objects are drawn on
//! the star wheel as crosses.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::io::Read;

use crate::core::error::{PlanisphereError, Result, ResultExt};

lazy_static! {
    static ref RA_HMS: Regex =
        Regex::new(r"^(\d+)h\s*(\d+)m\s*(\d+(?:\.\d+)?)s$").unwrap();
    static ref DEC_DMS: Regex =
        Regex::new(r#"^([+-]?)(\d+)[°度]\s*(\d+)['′分]\s*(\d+(?:\.\d+)?)["″秒]?$"#).unwrap();
}

/// A user-supplied object, coordinates already in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct CustomObject {
    pub id: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub mag: f64,
}

#[derive(Debug, Deserialize)]
struct CustomRow {
    id: String,
    ra: String,
    dec: String,
    mag: String,
}

/// Convert `HHhMMmSS.Ss` into degrees
pub fn parse_hms(ra: &str) -> Result<f64> {
    let caps = RA_HMS.captures(ra.trim()).ok_or_else(|| {
        PlanisphereError::invalid_coordinate(ra, "expected right ascension like '12h25m30s'")
    })?;

    let hours: f64 = caps[1].parse().unwrap_or(f64::NAN);
    let minutes: f64 = caps[2].parse().unwrap_or(f64::NAN);
    let seconds: f64 = caps[3].parse().unwrap_or(f64::NAN);

    if !(hours < 24.0 && minutes < 60.0 && seconds < 60.0) {
        return Err(PlanisphereError::invalid_coordinate(
            ra,
            "hours must be below 24, minutes and seconds below 60",
        ));
    }

    Ok((hours + minutes / 60.0 + seconds / 3600.0) / 24.0 * 360.0)
}

/// Convert `±DD°MM′SS″` into degrees. The sign applies to the whole value,
/// so `-0°30′0″` is half a degree south.
pub fn parse_dms(dec: &str) -> Result<f64> {
    let caps = DEC_DMS.captures(dec.trim()).ok_or_else(|| {
        PlanisphereError::invalid_coordinate(dec, "expected declination like '+24°40′42″'")
    })?;

    let negative = &caps[1] == "-";
    let degrees: f64 = caps[2].parse().unwrap_or(f64::NAN);
    let minutes: f64 = caps[3].parse().unwrap_or(f64::NAN);
    let seconds: f64 = caps[4].parse().unwrap_or(f64::NAN);

    if !(minutes < 60.0 && seconds < 60.0) {
        return Err(PlanisphereError::invalid_coordinate(
            dec,
            "minutes and seconds must be below 60",
        ));
    }

    let magnitude = degrees + minutes / 60.0 + seconds / 3600.0;
    if magnitude > 90.0 {
        return Err(PlanisphereError::invalid_coordinate(dec, "declination beyond the pole"));
    }

    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse the custom object CSV. Rows with an empty id, ra, dec or mag are
/// skipped with a warning; anything else malformed rejects the file.
pub fn parse_custom_objects<R: Read>(reader: R, source_name: &str) -> Result<Vec<CustomObject>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut objects = Vec::new();

    for (index, record) in csv_reader.deserialize::<CustomRow>().enumerate() {
        // Row 1 is the header
        let row_num = index + 2;
        let row = record
            .map_err(PlanisphereError::from)
            .context(format!("{}:{}", source_name, row_num))?;

        if row.id.is_empty() || row.ra.is_empty() || row.dec.is_empty() || row.mag.is_empty() {
            tracing::warn!(source = source_name, row = row_num, "empty data in custom object row, skipping");
            continue;
        }

        let ra_deg = parse_hms(&row.ra).context(format!("{}:{} ({})", source_name, row_num, row.id))?;
        let dec_deg = parse_dms(&row.dec).context(format!("{}:{} ({})", source_name, row_num, row.id))?;
        let mag: f64 = row.mag.parse().map_err(|_| {
            PlanisphereError::malformed_row(
                source_name,
                row_num,
                format!("mag '{}' is not a number", row.mag),
            )
        })?;

        objects.push(CustomObject {
            id: row.id,
            ra_deg,
            dec_deg,
            mag,
        });
    }

    tracing::debug!(source = source_name, count = objects.len(), "custom objects loaded");
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_parse_hms() {
        assert!(approx(parse_hms("12h25m30s").unwrap(), 186.375));
        assert!(approx(parse_hms("0h0m0s").unwrap(), 0.0));
        assert!(approx(parse_hms("5h35m17.3s").unwrap(), (5.0 + 35.0 / 60.0 + 17.3 / 3600.0) * 15.0));
    }

    #[test]
    fn test_parse_hms_rejects_bad_input() {
        assert!(parse_hms("12:25:30").is_err());
        assert!(parse_hms("25h00m00s").is_err());
        assert!(parse_hms("12h61m00s").is_err());
    }

    #[test]
    fn test_parse_dms_mark_styles() {
        let expected = 24.0 + 40.0 / 60.0 + 42.0 / 3600.0;
        assert!(approx(parse_dms("+24°40′42″").unwrap(), expected));
        assert!(approx(parse_dms("+24°40'42\"").unwrap(), expected));
        assert!(approx(parse_dms("24度40分42秒").unwrap(), expected));
        assert!(approx(parse_dms("+24°40′42").unwrap(), expected));
    }

    #[test]
    fn test_parse_dms_negative_zero_degrees() {
        assert!(approx(parse_dms("-0°30′0″").unwrap(), -0.5));
        assert!(approx(parse_dms("-5°23′28″").unwrap(), -(5.0 + 23.0 / 60.0 + 28.0 / 3600.0)));
    }

    #[test]
    fn test_parse_dms_rejects_bad_input() {
        assert!(parse_dms("24.5").is_err());
        assert!(parse_dms("+91°00′00″").is_err());
        assert!(parse_dms("+10°75′00″").is_err());
    }

    #[test]
    fn test_parse_custom_objects() {
        let csv = "id,ra,dec,mag\nM31,0h42m44s,+41°16′9″,3.4\nM42,5h35m17s,-5°23′28″,4.0\n";
        let objects = parse_custom_objects(csv.as_bytes(), "custom.csv").unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].id, "M31");
        assert!(objects[1].dec_deg < 0.0);
        assert_eq!(objects[1].mag, 4.0);
    }

    #[test]
    fn test_empty_fields_skipped() {
        let csv = "id,ra,dec,mag\n,0h42m44s,+41°16′9″,3.4\nM42,5h35m17s,-5°23′28″,4.0\n";
        let objects = parse_custom_objects(csv.as_bytes(), "custom.csv").unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].id, "M42");
    }

    #[test]
    fn test_empty_magnitude_skipped() {
        let csv = "id,ra,dec,mag\nM31,0h42m44s,+41°16′9″,\nM42,5h35m17s,-5°23′28″,4.0\n";
        let objects = parse_custom_objects(csv.as_bytes(), "c.csv").unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].id, "M42");
    }

    #[test]
    fn test_unreadable_magnitude_names_row() {
        let csv = "id,ra,dec,mag\nM31,0h42m44s,+41°16′9″,bright\n";
        let msg = parse_custom_objects(csv.as_bytes(), "c.csv").unwrap_err().to_string();
        assert!(msg.contains("c.csv:2"), "{}", msg);
    }

    #[test]
    fn test_bad_coordinate_names_row() {
        let csv = "id,ra,dec,mag\nM31,0h42m44s,+41°16′9″,3.4\nBAD,noon,+41°16′9″,3.4\n";
        let err = parse_custom_objects(csv.as_bytes(), "custom.csv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("custom.csv:3"), "{}", msg);
        assert!(msg.contains("BAD"), "{}", msg);
    }

    #[test]
    fn test_missing_column_rejected() {
        let csv = "id,ra,dec\nM31,0h42m44s,+41°16′9″\n";
        assert!(parse_custom_objects(csv.as_bytes(), "custom.csv").is_err());
    }
}
