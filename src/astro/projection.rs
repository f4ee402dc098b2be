//! Equidistant polar projection for the star wheel and holder
//!
//! The pole sits at the centre of the wheel and radius grows linearly with
//! distance from the pole, so that the southernmost declination ever above
//! the horizon (`|latitude| - 90`) lands exactly on the chart edge [`R_2`].
//!
//! Page coordinates have y growing downward. A polar angle of zero points
//! straight down the page and grows towards +x.

use super::{R_2, UNIT_DEG};
use crate::core::error::Result;
use crate::core::models::{validate_latitude, Hemisphere, Settings};

/// A position on the page in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the centre, `angle` radians from straight down
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.sin(),
            y: radius * angle.cos(),
        }
    }

    /// Distance from the centre of the wheel
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle in radians, inverse of [`Point::from_polar`]
    pub fn angle(&self) -> f64 {
        self.x.atan2(self.y)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Projection for one latitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    latitude: f64,
    hemisphere: Hemisphere,
}

impl Projection {
    pub fn new(settings: &Settings) -> Self {
        Self {
            latitude: settings.abs_latitude(),
            hemisphere: settings.hemisphere(),
        }
    }

    /// Projection for a signed latitude, validated like [`Settings::new`]
    pub fn for_latitude(latitude: f64) -> Result<Self> {
        validate_latitude(latitude)?;
        Ok(Self {
            latitude: latitude.abs(),
            hemisphere: if latitude < 0.0 {
                Hemisphere::South
            } else {
                Hemisphere::North
            },
        })
    }

    pub fn abs_latitude(&self) -> f64 {
        self.latitude
    }

    /// Signed latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude * self.hemisphere.sign()
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Radius of a declination that has already been flipped for the
    /// hemisphere. Values beyond [`R_2`] are off the chart.
    pub fn radius(&self, dec_deg: f64) -> f64 {
        R_2 * (90.0 - dec_deg) / (180.0 - self.latitude)
    }

    /// Southern charts are drawn from a sky flipped in both coordinates
    pub fn flip(&self, ra_deg: f64, dec_deg: f64) -> (f64, f64) {
        let s = self.hemisphere.sign();
        (s * ra_deg, s * dec_deg)
    }

    /// Whether a true-sky declination can ever rise at this latitude
    pub fn ever_visible(&self, dec_deg: f64) -> bool {
        let (_, dec) = self.flip(0.0, dec_deg);
        dec > self.latitude - 90.0
    }

    /// Polar angle (radians) of a right ascension on the wheel
    pub fn wheel_angle(&self, ra_deg: f64) -> f64 {
        let (ra, _) = self.flip(ra_deg, 0.0);
        -ra * UNIT_DEG
    }

    /// Page position of a true-sky RA/Dec on the wheel, whether or not it
    /// falls inside the chart
    pub fn wheel_point(&self, ra_deg: f64, dec_deg: f64) -> Point {
        let (_, dec) = self.flip(ra_deg, dec_deg);
        Point::from_polar(self.radius(dec), self.wheel_angle(ra_deg))
    }

    /// Page position on the wheel, or `None` if it is off the chart
    pub fn wheel_position(&self, ra_deg: f64, dec_deg: f64) -> Option<Point> {
        let point = self.wheel_point(ra_deg, dec_deg);
        (point.radius() <= R_2).then_some(point)
    }

    /// Page position on the holder of a true-sky hour angle and declination
    pub fn holder_position(&self, hour_angle_deg: f64, dec_deg: f64) -> Point {
        let (ha, dec) = self.flip(hour_angle_deg, dec_deg);
        Point::from_polar(self.radius(dec), ha * UNIT_DEG)
    }

    /// Holder position of an altitude/azimuth (azimuth from north through east)
    pub fn alt_az_position(&self, alt_deg: f64, az_deg: f64) -> Point {
        let (ha, dec) = alt_az_to_ha_dec(alt_deg, az_deg, self.latitude());
        self.holder_position(ha, dec)
    }

    /// The horizon as a closed polyline on the holder, sampled every
    /// `360 / steps` degrees of azimuth starting from north
    pub fn horizon(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(3);
        (0..steps)
            .map(|i| {
                let az = 360.0 * i as f64 / steps as f64;
                self.alt_az_position(0.0, az)
            })
            .collect()
    }
}

/// Convert altitude/azimuth to hour angle/declination (all degrees).
/// Azimuth runs from north through east; hour angle is positive west of
/// the meridian.
pub fn alt_az_to_ha_dec(alt_deg: f64, az_deg: f64, latitude_deg: f64) -> (f64, f64) {
    let alt = alt_deg * UNIT_DEG;
    let az = az_deg * UNIT_DEG;
    let lat = latitude_deg * UNIT_DEG;

    let sin_dec = alt.sin() * lat.sin() + alt.cos() * lat.cos() * az.cos();
    let dec = sin_dec.clamp(-1.0, 1.0).asin();

    let ha = (-az.sin() * alt.cos()).atan2(alt.sin() * lat.cos() - alt.cos() * az.cos() * lat.sin());

    (ha / UNIT_DEG, dec / UNIT_DEG)
}

/// Convert hour angle/declination to altitude/azimuth (all degrees,
/// azimuth in `[0, 360)`)
pub fn ha_dec_to_alt_az(ha_deg: f64, dec_deg: f64, latitude_deg: f64) -> (f64, f64) {
    let ha = ha_deg * UNIT_DEG;
    let dec = dec_deg * UNIT_DEG;
    let lat = latitude_deg * UNIT_DEG;

    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos();
    let alt = sin_alt.clamp(-1.0, 1.0).asin();

    let az = (-ha.sin() * dec.cos()).atan2(dec.sin() * lat.cos() - dec.cos() * ha.cos() * lat.sin());

    (alt / UNIT_DEG, (az / UNIT_DEG).rem_euclid(360.0))
}
