//! # Coordinate and airmass transform
//!
//! Maps `(site, instant, target)` to the quantities an observer plans with: altitude and
//! azimuth, the plane-parallel airmass and the parallactic angle, all exposed in degrees.
//!
//! ## Airmass
//!
//! The airmass is the secant of the zenith distance,
//!
//! ```text
//! X = 1 / cos(90° − altitude)
//! ```
//!
//! without refraction or curvature corrections. It is exact at the zenith (`X = 1`), grows
//! without bound toward the horizon and turns negative below it. No clamping is applied: the
//! observability cutoff `1 < X < cutoff` rejects those samples naturally.

use std::sync::Arc;

use hifitime::Epoch;

use crate::constants::Degree;
use crate::ephem_errors::EphemError;
use crate::ephemeris::{Body, EphemerisProvider, ObserverState};
use crate::observers::horizon::Horizon;
use crate::observers::Observer;
use crate::target::Target;

/// Position of a target at one instant, angles in **degrees**.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub instant: Epoch,
    pub altitude: Degree,
    /// Measured from north through east, `[0°, 360°)`.
    pub azimuth: Degree,
    pub airmass: f64,
    /// Positive west of the meridian.
    pub parallactic_angle: Degree,
}

/// Plane-parallel airmass for an altitude in degrees.
///
/// Arguments
/// ---------
/// * `altitude`: apparent altitude in **degrees**.
///
/// Return
/// ------
/// * `1 / cos(90° − altitude)`; very large near the horizon and negative below it.
pub fn alt_to_airmass(altitude: Degree) -> f64 {
    1.0 / (90.0 - altitude).to_radians().cos()
}

/// Altitude, azimuth, airmass and parallactic angle of a fixed target.
///
/// Arguments
/// ---------
/// * `provider`: source of topocentric positions.
/// * `site`: the observatory.
/// * `instant`: the time of the observation.
/// * `target`: J2000 coordinates of the target.
///
/// Return
/// ------
/// * The [`PositionSample`] at `instant`. Identical inputs give bit-identical outputs.
///
/// See also
/// ------------
/// * [`alt_to_airmass`] – airmass convention.
/// * [`Target::from_sexagesimal`] – building the target from strings.
pub fn transform<P: EphemerisProvider + ?Sized>(
    provider: &P,
    site: Arc<Observer>,
    instant: Epoch,
    target: &Target,
) -> Result<PositionSample, EphemError> {
    let observer = ObserverState::new(site, instant, Horizon::Standard);
    sample_at(provider, &observer, target)
}

/// Same as [`transform`], reusing an existing observer snapshot moved to its instant.
pub(crate) fn sample_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &ObserverState,
    target: &Target,
) -> Result<PositionSample, EphemError> {
    let pos = provider.topocentric_position(&Body::Fixed(*target), observer)?;
    let altitude = pos.altitude.to_degrees();

    Ok(PositionSample {
        instant: observer.instant(),
        altitude,
        azimuth: pos.azimuth.to_degrees(),
        airmass: alt_to_airmass(altitude),
        parallactic_angle: pos.parallactic_angle.to_degrees(),
    })
}
