use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Radian, T2000};
use crate::earth_orientation::{obleq, prec, rnut};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefEpoch {
    J2000,
    Epoch(f64),
}

impl RefEpoch {
    pub fn date(&self) -> f64 {
        match *self {
            RefEpoch::J2000 => T2000,
            RefEpoch::Epoch(d) => d,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefSystem {
    // Equatorial Mean, equator and mean equinox of the epoch
    // (corrected for precession but not for nutation)
    Equm(RefEpoch),
    // Equatorial True (same as Equm but corrected for precession and nutation)
    Equt(RefEpoch),
    // Ecliptic mean, ecliptic and mean equinox of the epoch
    Eclm(RefEpoch),
}

impl RefSystem {
    pub fn epoch(&self) -> RefEpoch {
        match *self {
            RefSystem::Equm(e) => e,
            RefSystem::Equt(e) => e,
            RefSystem::Eclm(e) => e,
        }
    }

    /// Rotation taking a vector expressed in this system to the equatorial mean J2000 frame.
    fn to_equm_j2000(&self) -> Matrix3<f64> {
        let date = self.epoch().date();
        let precession = match self.epoch() {
            RefEpoch::J2000 => Matrix3::identity(),
            RefEpoch::Epoch(d) => prec(d),
        };

        match *self {
            RefSystem::Equm(_) => precession,
            RefSystem::Equt(_) => precession * rnut(date),
            RefSystem::Eclm(_) => precession * rotmt(obleq(date), 0),
        }
    }
}

/// Compute the rotation matrix between two celestial reference systems and epochs.
///
/// The supported systems are:
/// - `Equm`: equatorial mean (precession only)
/// - `Equt`: equatorial true (precession + nutation)
/// - `Eclm`: ecliptic mean (precession + obliquity)
///
/// Both systems are first related to the equatorial mean J2000 frame, which serves as the
/// canonical pivot, and the two legs are chained.
///
/// Arguments
/// ---------
/// * `ref_sys1`: source reference system and epoch.
/// * `ref_sys2`: target reference system and epoch.
///
/// Return
/// ------
/// * The rotation matrix `rot` such that `x₂ = rot · x₁`, where `x₁` is a vector in the source
///   system and `x₂` the same vector expressed in the target system.
///
/// # See also
/// * [`prec`] – IAU 1976 precession matrix
/// * [`rnut`] – truncated IAU 1980 nutation matrix
/// * [`obleq`] – mean obliquity of the ecliptic
pub fn rotpn(ref_sys1: &RefSystem, ref_sys2: &RefSystem) -> Matrix3<f64> {
    if ref_sys1 == ref_sys2 {
        return Matrix3::identity();
    }
    ref_sys2.to_equm_j2000().transpose() * ref_sys1.to_equm_j2000()
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// The matrix is an **active rotation** of a vector by `alpha` in the direct sense.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `k` - Index of the axis of rotation: `0` → X, `1` → Y, `2` → Z.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Unit vector of spherical coordinates (longitude, latitude) in radians.
pub fn unit_vector(lon: Radian, lat: Radian) -> Vector3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Spherical coordinates (longitude in `[0, 2π)`, latitude) of a non-zero vector.
pub fn to_spherical(v: &Vector3<f64>) -> (Radian, Radian) {
    let lon = v.y.atan2(v.x).rem_euclid(std::f64::consts::TAU);
    let lat = v.z.atan2((v.x * v.x + v.y * v.y).sqrt());
    (lon, lat)
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotmt_axes() {
        let r = rotmt(std::f64::consts::FRAC_PI_2, 2);
        assert_relative_eq!(r * Vector3::x(), Vector3::y(), epsilon = 1e-15);
    }

    #[test]
    #[should_panic]
    fn test_rotmt_invalid_axis() {
        rotmt(0.1, 3);
    }

    #[test]
    fn test_rotpn_identity_cases() {
        let sys = RefSystem::Equt(RefEpoch::Epoch(57427.8));
        assert_eq!(rotpn(&sys, &sys), Matrix3::identity());

        let j2000 = RefSystem::Equm(RefEpoch::J2000);
        assert_relative_eq!(
            rotpn(&j2000, &RefSystem::Equm(RefEpoch::Epoch(T2000))),
            Matrix3::identity(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_rotpn_inverse_transform() {
        let a = RefSystem::Eclm(RefEpoch::Epoch(57427.8));
        let b = RefSystem::Equt(RefEpoch::Epoch(57427.8));
        let m = rotpn(&a, &b) * rotpn(&b, &a);
        assert_relative_eq!(m, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_pole_to_equator() {
        // the ecliptic pole sits at RA 18h, Dec 90° − ε in the equatorial frame
        let rot = rotpn(
            &RefSystem::Eclm(RefEpoch::J2000),
            &RefSystem::Equm(RefEpoch::J2000),
        );
        let (ra, dec) = to_spherical(&(rot * Vector3::z()));
        assert_relative_eq!(ra, 1.5 * std::f64::consts::PI, epsilon = 1e-12);
        assert_relative_eq!(dec, std::f64::consts::FRAC_PI_2 - obleq(T2000), epsilon = 1e-12);
    }

    #[test]
    fn test_precession_moves_equinox() {
        // over 16 years the equinox drifts by about 50.3″/yr in longitude
        let rot = rotpn(
            &RefSystem::Equm(RefEpoch::J2000),
            &RefSystem::Equm(RefEpoch::Epoch(T2000 + 16.0 * 365.25)),
        );
        let (ra, dec) = to_spherical(&(rot * unit_vector(0.0, 0.0)));
        let ra_arcsec = ra.to_degrees() * 3600.0;
        let dec_arcsec = dec.to_degrees() * 3600.0;
        assert!((ra_arcsec - 16.0 * 46.1).abs() < 5.0, "ra drift {ra_arcsec}");
        assert!((dec_arcsec - 16.0 * 20.04).abs() < 5.0, "dec drift {dec_arcsec}");
    }
}
