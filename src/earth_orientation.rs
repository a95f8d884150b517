use nalgebra::Matrix3;

use crate::{
    constants::{ArcSec, Radian, DAYS_PER_CENTURY, RADEG, RADSEC, T2000},
    ref_system::rotmt,
};

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(t) = ε₀ + ε₁·T + ε₂·T² + ε₃·T³
/// ```
/// with `T = (tjm - T2000) / 36525.0` and coefficients in arcseconds, evaluated with Horner's
/// method.
pub fn obleq(tjm: f64) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / DAYS_PER_CENTURY;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Nutation in longitude and obliquity, truncated IAU 1980 series.
///
/// Only the four dominant terms are kept (lunar node, twice the solar and lunar mean
/// longitudes, twice the node). The truncation error is below 0.5″ in Δψ and 0.1″ in Δε,
/// well under what a 5-minute observability curve can resolve.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * `(Δψ, Δε)` in **arcseconds**.
pub fn nutation(tjm: f64) -> (ArcSec, ArcSec) {
    let t = (tjm - T2000) / DAYS_PER_CENTURY;

    // longitude of the Moon's ascending node, mean longitudes of the Sun and the Moon
    let node = (125.04452 - 1934.136261 * t) * RADEG;
    let sun = (280.4665 + 36000.7698 * t) * RADEG;
    let moon = (218.3165 + 481267.8813 * t) * RADEG;

    let dpsi = -17.20 * node.sin() - 1.32 * (2.0 * sun).sin() - 0.23 * (2.0 * moon).sin()
        + 0.21 * (2.0 * node).sin();
    let deps = 9.20 * node.cos() + 0.57 * (2.0 * sun).cos() + 0.10 * (2.0 * moon).cos()
        - 0.09 * (2.0 * node).cos();

    (dpsi, deps)
}

/// Nutation matrix between the mean and the true equator of date.
///
/// Built from the truncated [`nutation`] angles as `A₁(ε) · A₃(−Δψ) · A₁(−ε−Δε)` with the
/// active rotations of [`rotmt`]. Like [`prec`], the matrix maps true-of-date vectors back to
/// mean-of-date; its transpose goes from mean to true.
pub fn rnut(tjm: f64) -> Matrix3<f64> {
    let epsm = obleq(tjm);
    let (dpsi, deps) = nutation(tjm);
    let epst = epsm + deps * RADSEC;

    let r1 = rotmt(epsm, 0);
    let r2 = rotmt(-dpsi * RADSEC, 2);
    let r3 = rotmt(-epst, 0);

    (r1 * r2) * r3
}

/// Compute the equation of the equinoxes in radians.
///
/// The difference between apparent and mean sidereal time, `Δψ · cos(ε)`.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (TT)
pub fn equequ(tjm: f64) -> Radian {
    let oblm = obleq(tjm);
    let (dpsi, _deps) = nutation(tjm);

    RADSEC * dpsi * oblm.cos()
}

/// Compute the precession matrix from J2000 to the mean equator and equinox of a given epoch (IAU 1976 model).
///
/// The matrix is composed of three rotations, about Z by `−ζ`, about Y by `θ` and about Z by
/// `−z`, with the angles polynomial in Julian centuries since J2000:
///
/// ```text
/// ζ(T) = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// θ(T) = (0.5567530 - 0.0001185·T - 0.0000116·T²) · T  [deg]
/// z(T) = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// ```
///
/// In the [`rotmt`] convention the returned matrix `P` maps mean-of-date vectors back to
/// J2000, so a J2000 position is carried to the mean equator of date by `Pᵀ`.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date in TT scale.
pub fn prec(tjm: f64) -> Matrix3<f64> {
    let zed = 0.6406161 * RADEG;
    let zd = 0.6406161 * RADEG;
    let thd = 0.5567530 * RADEG;

    let zedd = 0.0000839 * RADEG;
    let zdd = 0.0003041 * RADEG;
    let thdd = -0.0001185 * RADEG;

    let zeddd = 0.0000050 * RADEG;
    let zddd = 0.0000051 * RADEG;
    let thddd = -0.0000116 * RADEG;

    let t = (tjm - T2000) / DAYS_PER_CENTURY;

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    let r1 = rotmt(-zeta, 2);
    let r2 = rotmt(theta, 1);
    let r3 = rotmt(-z, 2);

    (r1 * r2) * r3
}
