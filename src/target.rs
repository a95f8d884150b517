use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Radian, DPI};
use crate::conversion::{format_sexagesimal, parse_dec_to_deg, parse_ra_to_deg};
use crate::ephem_errors::EphemError;

/// A fixed celestial target, J2000 equatorial coordinates, no proper motion.
///
/// Serialized as radians; deserialization goes through the same range checks as the
/// constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct Target {
    /// Right ascension in **radians**, `[0, 2π)`.
    ra: Radian,
    /// Declination in **radians**, `[-π/2, π/2]`.
    dec: Radian,
}

#[derive(Deserialize)]
struct RawTarget {
    ra: Radian,
    dec: Radian,
}

impl TryFrom<RawTarget> for Target {
    type Error = EphemError;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        if !raw.ra.is_finite() || !raw.dec.is_finite() || raw.dec.abs() > FRAC_PI_2 {
            return Err(EphemError::InvalidCoordinate(format!(
                "invalid target coordinates: ra={} rad, dec={} rad",
                raw.ra, raw.dec
            )));
        }
        Ok(Target {
            ra: raw.ra.rem_euclid(DPI),
            dec: raw.dec,
        })
    }
}

impl Target {
    /// Build a target from sexagesimal strings.
    ///
    /// Arguments
    /// ---------
    /// * `ra`: right ascension in **hours**, e.g. `"8:00:00"` or `"08 00 00.0"`.
    /// * `dec`: declination in **degrees**, e.g. `"30:00:00"` or `"-05 23 28"`.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::InvalidCoordinate`] if either string is malformed or out of range.
    pub fn from_sexagesimal(ra: &str, dec: &str) -> Result<Self, EphemError> {
        Self::from_degrees(parse_ra_to_deg(ra)?, parse_dec_to_deg(dec)?)
    }

    /// Build a target from decimal degrees.
    ///
    /// Right ascension is wrapped into `[0°, 360°)`; declination must lie in `[-90°, 90°]`.
    pub fn from_degrees(ra: Degree, dec: Degree) -> Result<Self, EphemError> {
        if !ra.is_finite() || !dec.is_finite() || dec.abs() > 90.0 {
            return Err(EphemError::InvalidCoordinate(format!(
                "invalid target coordinates: ra={ra}, dec={dec}"
            )));
        }
        Ok(Target {
            ra: ra.rem_euclid(360.0).to_radians(),
            dec: dec.to_radians(),
        })
    }

    pub fn ra(&self) -> Radian {
        self.ra
    }

    pub fn dec(&self) -> Radian {
        self.dec
    }

    pub fn ra_deg(&self) -> Degree {
        self.ra.to_degrees()
    }

    pub fn dec_deg(&self) -> Degree {
        self.dec.to_degrees()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RA {} Dec {}",
            format_sexagesimal(self.ra_deg() / 15.0, false),
            format_sexagesimal(self.dec_deg(), true)
        )
    }
}
