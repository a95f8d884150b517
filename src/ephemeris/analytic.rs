//! Built-in ephemeris provider based on analytic theories.
//!
//! Positions are produced in three steps:
//!
//! 1. a geocentric vector in the body's natural frame (mean ecliptic of date for the Sun and
//!    the Moon, mean equator J2000 for fixed targets),
//! 2. rotation to the true equator and equinox of date with [`rotpn`], followed by the
//!    removal of the site's geocentric vector (topocentric parallax),
//! 3. conversion of the local hour angle and declination into altitude, azimuth and
//!    parallactic angle with [`horizontal_coordinates`].
//!
//! UT1 is taken equal to UTC for the sidereal time.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{Kilometer, Radian, DPI, MOON_RADIUS, SUN_RADIUS};
use crate::earth_orientation::equequ;
use crate::ephem_errors::EphemError;
use crate::ephemeris::moon::lunar_position;
use crate::ephemeris::sun::solar_position;
use crate::ephemeris::{Body, EphemerisProvider, ObserverState, TopocentricPosition};
use crate::ref_system::{rotpn, to_spherical, unit_vector, RefEpoch, RefSystem};
use crate::time::{centuries_since_j2000, gmst};

/// Analytic Sun and Moon theories, precession and truncated nutation.
///
/// Stateless; every query reads its configuration from the [`ObserverState`] it is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticEphemeris;

/// Greenwich apparent sidereal time in radians, `[0, 2π)`.
pub fn apparent_sidereal_time(instant: &Epoch) -> Radian {
    (gmst(instant.to_mjd_utc_days()) + equequ(instant.to_mjd_tt_days())).rem_euclid(DPI)
}

/// Geocentric vector of a body in the true equator and equinox of date, with its physical
/// radius. Fixed bodies are returned as unit vectors with a zero radius.
fn geocentric_true_of_date(body: &Body, instant: &Epoch) -> (Vector3<f64>, Kilometer) {
    let tjm = instant.to_mjd_tt_days();
    let t = centuries_since_j2000(instant);
    let ecliptic_of_date = RefSystem::Eclm(RefEpoch::Epoch(tjm));
    let true_of_date = RefSystem::Equt(RefEpoch::Epoch(tjm));

    match body {
        Body::Sun => {
            let sun = solar_position(t);
            let ecl = sun.distance * unit_vector(sun.longitude, sun.latitude);
            (rotpn(&ecliptic_of_date, &true_of_date) * ecl, SUN_RADIUS)
        }
        Body::Moon => {
            let moon = lunar_position(t);
            let ecl = moon.distance * unit_vector(moon.longitude, moon.latitude);
            (rotpn(&ecliptic_of_date, &true_of_date) * ecl, MOON_RADIUS)
        }
        Body::Fixed(target) => {
            let j2000 = unit_vector(target.ra(), target.dec());
            let rot = rotpn(&RefSystem::Equm(RefEpoch::J2000), &true_of_date);
            (rot * j2000, 0.0)
        }
    }
}

/// Altitude, azimuth and parallactic angle from hour angle and declination.
///
/// Arguments
/// ---------
/// * `hour_angle`: local hour angle, positive west of the meridian, in radians.
/// * `dec`: declination in radians.
/// * `lat`: observer latitude in radians.
///
/// Return
/// ------
/// * `(altitude, azimuth, parallactic_angle)` in radians. The azimuth runs from north through
///   east in `[0, 2π)`; the parallactic angle is `0` on the meridian, positive west of it.
pub fn horizontal_coordinates(hour_angle: Radian, dec: Radian, lat: Radian) -> (Radian, Radian, Radian) {
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();
    let (sin_l, cos_l) = lat.sin_cos();

    let altitude = (sin_l * sin_d + cos_l * cos_d * cos_h).clamp(-1.0, 1.0).asin();
    let azimuth = (-cos_d * sin_h)
        .atan2(sin_d * cos_l - cos_d * sin_l * cos_h)
        .rem_euclid(DPI);
    let parallactic = (sin_h * cos_l).atan2(sin_l * cos_d - cos_l * sin_d * cos_h);

    (altitude, azimuth, parallactic)
}

impl EphemerisProvider for AnalyticEphemeris {
    fn topocentric_position(
        &self,
        body: &Body,
        observer: &ObserverState,
    ) -> Result<TopocentricPosition, EphemError> {
        let instant = observer.instant();
        let site = observer.site();
        let gast = apparent_sidereal_time(&instant);

        let (geocentric, radius) = geocentric_true_of_date(body, &instant);
        let (topocentric, angular_radius) = match body {
            Body::Fixed(_) => (geocentric, 0.0),
            _ => {
                let v = geocentric - site.geocentric_position(gast);
                let distance = v.norm();
                (v, (radius / distance).asin())
            }
        };

        let (ra, dec) = to_spherical(&topocentric);
        let hour_angle = gast + site.longitude_rad() - ra;
        let (altitude, azimuth, parallactic_angle) =
            horizontal_coordinates(hour_angle, dec, site.latitude_rad());

        finite_position(
            body,
            &instant,
            TopocentricPosition {
                altitude,
                azimuth,
                parallactic_angle,
                angular_radius,
            },
        )
    }
}

/// Reject positions with a non-finite angle.
fn finite_position(
    body: &Body,
    instant: &Epoch,
    position: TopocentricPosition,
) -> Result<TopocentricPosition, EphemError> {
    let TopocentricPosition {
        altitude,
        azimuth,
        parallactic_angle,
        angular_radius,
    } = position;
    if [altitude, azimuth, parallactic_angle, angular_radius]
        .iter()
        .all(|x| x.is_finite())
    {
        Ok(position)
    } else {
        Err(EphemError::InvalidCoordinate(format!(
            "no finite position of {body} at {instant}: alt={altitude}, az={azimuth}, \
             q={parallactic_angle}, radius={angular_radius}"
        )))
    }
}
