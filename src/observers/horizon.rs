//! # Horizon conventions
//!
//! A rise/set search looks for the instant a body's upper limb crosses a given altitude.
//! The altitude depends on what is being timed: the USNO definition of sunrise, sunset,
//! moonrise and moonset uses −0°34′ (mean refraction at the horizon), while twilight is the
//! instant the Sun's upper limb reaches −6°, −12° or −18°.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Radian, ASTRONOMICAL_TWILIGHT, CIVIL_TWILIGHT, NAUTICAL_TWILIGHT, STANDARD_HORIZON,
};
use crate::ephem_errors::EphemError;

/// Named altitude threshold used for horizon-crossing searches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    /// −0°34′, USNO sunrise/sunset/moonrise/moonset
    #[default]
    Standard,
    /// −6°
    CivilTwilight,
    /// −12°
    NauticalTwilight,
    /// −18°
    AstronomicalTwilight,
    /// Any other altitude, in degrees
    Custom(Degree),
}

impl Horizon {
    /// Build a custom horizon, rejecting altitudes outside `[-90°, 90°]`.
    pub fn custom(altitude: Degree) -> Result<Self, EphemError> {
        if !altitude.is_finite() || altitude.abs() > 90.0 {
            return Err(EphemError::InvalidCoordinate(format!(
                "horizon altitude out of range: {altitude}"
            )));
        }
        Ok(Horizon::Custom(altitude))
    }

    /// Horizon altitude in degrees.
    pub fn altitude(&self) -> Degree {
        match *self {
            Horizon::Standard => STANDARD_HORIZON,
            Horizon::CivilTwilight => CIVIL_TWILIGHT,
            Horizon::NauticalTwilight => NAUTICAL_TWILIGHT,
            Horizon::AstronomicalTwilight => ASTRONOMICAL_TWILIGHT,
            Horizon::Custom(alt) => alt,
        }
    }

    /// Horizon altitude in radians.
    pub fn altitude_rad(&self) -> Radian {
        self.altitude().to_radians()
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Horizon::Standard => write!(f, "standard (-0:34)"),
            Horizon::CivilTwilight => write!(f, "civil twilight (-6)"),
            Horizon::NauticalTwilight => write!(f, "nautical twilight (-12)"),
            Horizon::AstronomicalTwilight => write!(f, "astronomical twilight (-18)"),
            Horizon::Custom(alt) => write!(f, "custom ({alt})"),
        }
    }
}
