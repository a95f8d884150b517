//! Low-precision solar theory (Meeus, *Astronomical Algorithms*, ch. 25).
//!
//! Accurate to about 0.01° in longitude over the present century, i.e. well under a minute
//! of time on the sunrise and sunset instants.

use crate::constants::{Kilometer, Radian, AU, RADEG};

/// Annual aberration in longitude for the mean Earth–Sun distance, in degrees.
const ABERRATION: f64 = 0.00569;

/// Geocentric position of the Sun on the mean ecliptic and equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Ecliptic longitude corrected for aberration, in radians, `[0, 2π)`.
    pub longitude: Radian,
    /// Ecliptic latitude; always `0` at this precision.
    pub latitude: Radian,
    pub distance: Kilometer,
}

/// Compute the Sun's position.
///
/// Arguments
/// ---------
/// * `t`: Julian centuries of TT since J2000.0.
///
/// Return
/// ------
/// * The [`SolarPosition`] referred to the mean equinox of date. Nutation is left to the
///   mean-to-true rotation of the caller.
pub fn solar_position(t: f64) -> SolarPosition {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t) * RADEG;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    // equation of center
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let true_longitude = l0 + c;
    let true_anomaly = m + c * RADEG;
    let radius_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    SolarPosition {
        longitude: ((true_longitude - ABERRATION) * RADEG).rem_euclid(std::f64::consts::TAU),
        latitude: 0.0,
        distance: radius_au * AU,
    }
}

#[cfg(test)]
mod sun_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meeus_example_25a() {
        // 1992 October 13.0 TD
        let t = -0.072183436;
        let sun = solar_position(t);

        // true geometric longitude 199.90988°, minus aberration
        assert_relative_eq!(sun.longitude.to_degrees(), 199.90988 - 0.00569, epsilon = 2e-4);
        assert_relative_eq!(sun.distance / AU, 0.99766, epsilon = 2e-5);
        assert_eq!(sun.latitude, 0.0);
    }

    #[test]
    fn test_distance_stays_within_orbit_bounds() {
        for day in (0..365).step_by(7) {
            let sun = solar_position(0.16 + day as f64 / 36525.0);
            let r = sun.distance / AU;
            assert!(r > 0.983 && r < 1.017, "r = {r}");
            assert!((0.0..std::f64::consts::TAU).contains(&sun.longitude));
        }
    }
}
