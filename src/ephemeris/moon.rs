//! Truncated lunar theory (Meeus, *Astronomical Algorithms*, ch. 47).
//!
//! The periodic series keep the 60 terms of the longitude/distance table and the 30 largest
//! latitude terms. Errors stay around 10″ in longitude, under 0.01° in latitude and a few
//! kilometers in distance, so the Moon's rise and set instants come out within a minute.

use crate::constants::{Kilometer, Radian, RADEG};

/// One periodic term: multiples of (D, M, M′, F) and its coefficient(s).
type LonDistTerm = (i8, i8, i8, i8, f64, f64);
type LatTerm = (i8, i8, i8, i8, f64);

/// Longitude (10⁻⁶ °) and distance (10⁻³ km) terms.
#[rustfmt::skip]
const LONGITUDE_DISTANCE: [LonDistTerm; 60] = [
    (0, 0, 1, 0, 6288774.0, -20905355.0),
    (2, 0, -1, 0, 1274027.0, -3699111.0),
    (2, 0, 0, 0, 658314.0, -2955968.0),
    (0, 0, 2, 0, 213618.0, -569925.0),
    (0, 1, 0, 0, -185116.0, 48888.0),
    (0, 0, 0, 2, -114332.0, -3149.0),
    (2, 0, -2, 0, 58793.0, 246158.0),
    (2, -1, -1, 0, 57066.0, -152138.0),
    (2, 0, 1, 0, 53322.0, -170733.0),
    (2, -1, 0, 0, 45758.0, -204586.0),
    (0, 1, -1, 0, -40923.0, -129620.0),
    (1, 0, 0, 0, -34720.0, 108743.0),
    (0, 1, 1, 0, -30383.0, 104755.0),
    (2, 0, 0, -2, 15327.0, 10321.0),
    (0, 0, 1, 2, -12528.0, 0.0),
    (0, 0, 1, -2, 10980.0, 79661.0),
    (4, 0, -1, 0, 10675.0, -34782.0),
    (0, 0, 3, 0, 10034.0, -23210.0),
    (4, 0, -2, 0, 8548.0, -21636.0),
    (2, 1, -1, 0, -7888.0, 24208.0),
    (2, 1, 0, 0, -6766.0, 30824.0),
    (1, 0, -1, 0, -5163.0, -8379.0),
    (1, 1, 0, 0, 4987.0, -16675.0),
    (2, -1, 1, 0, 4036.0, -12831.0),
    (2, 0, 2, 0, 3994.0, -10445.0),
    (4, 0, 0, 0, 3861.0, -11650.0),
    (2, 0, -3, 0, 3665.0, 14403.0),
    (0, 1, -2, 0, -2689.0, -7003.0),
    (2, 0, -1, 2, -2602.0, 0.0),
    (2, -1, -2, 0, 2390.0, 10056.0),
    (1, 0, 1, 0, -2348.0, 6322.0),
    (2, -2, 0, 0, 2236.0, -9884.0),
    (0, 1, 2, 0, -2120.0, 5751.0),
    (0, 2, 0, 0, -2069.0, 0.0),
    (2, -2, -1, 0, 2048.0, -4950.0),
    (2, 0, 1, -2, -1773.0, 4130.0),
    (2, 0, 0, 2, -1595.0, 0.0),
    (4, -1, -1, 0, 1215.0, -3958.0),
    (0, 0, 2, 2, -1110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3258.0),
    (2, 1, 1, 0, -810.0, 2616.0),
    (4, -1, -2, 0, 759.0, -1897.0),
    (0, 2, -1, 0, -713.0, -2117.0),
    (2, 2, -1, 0, -700.0, 2354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1423.0),
    (0, 0, 4, 0, 537.0, -1117.0),
    (4, -1, 0, 0, 520.0, -1571.0),
    (1, 0, -2, 0, -487.0, -1739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8752.0),
];

/// Latitude terms (10⁻⁶ °).
#[rustfmt::skip]
const LATITUDE: [LatTerm; 30] = [
    (0, 0, 0, 1, 5128122.0),
    (0, 0, 1, 1, 280602.0),
    (0, 0, 1, -1, 277693.0),
    (2, 0, 0, -1, 173237.0),
    (2, 0, -1, 1, 55413.0),
    (2, 0, -1, -1, 46271.0),
    (2, 0, 0, 1, 32573.0),
    (0, 0, 2, 1, 17198.0),
    (2, 0, 1, -1, 9266.0),
    (0, 0, 2, -1, 8822.0),
    (2, -1, 0, -1, 8216.0),
    (2, 0, -2, -1, 4324.0),
    (2, 0, 1, 1, 4200.0),
    (2, 1, 0, -1, -3359.0),
    (2, -1, -1, 1, 2463.0),
    (2, -1, 0, 1, 2211.0),
    (2, -1, -1, -1, 2065.0),
    (0, 1, -1, -1, -1870.0),
    (4, 0, -1, -1, 1828.0),
    (0, 1, 0, 1, -1794.0),
    (0, 0, 0, 3, -1749.0),
    (0, 1, -1, 1, -1565.0),
    (1, 0, 0, 1, -1491.0),
    (0, 1, 1, 1, -1475.0),
    (0, 1, 1, -1, -1410.0),
    (0, 1, 0, -1, -1344.0),
    (1, 0, 0, -1, -1335.0),
    (0, 0, 3, 1, 1107.0),
    (4, 0, 0, -1, 1021.0),
    (4, 0, -1, 1, 833.0),
];

/// Geocentric position of the Moon on the mean ecliptic and equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Ecliptic longitude in radians, `[0, 2π)`.
    pub longitude: Radian,
    pub latitude: Radian,
    /// Distance between the centers of the Earth and the Moon.
    pub distance: Kilometer,
}

/// Fundamental arguments in degrees: L′, D, M, M′, F.
fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l_prime =
        218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538841.0 - t4 / 65194000.0;
    let d = 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0 - t4 / 113065000.0;
    let m = 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0;
    let m_prime =
        134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0 - t4 / 14712000.0;
    let f = 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0 + t4 / 863310000.0;

    [l_prime, d, m, m_prime, f]
}

/// Argument of a term and its eccentricity factor `E^|m|`.
fn term_argument(d: f64, m: f64, m_prime: f64, f: f64, mult: (i8, i8, i8, i8), e: f64) -> (f64, f64) {
    let (cd, cm, cmp, cf) = mult;
    let arg = (f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * m_prime + f64::from(cf) * f)
        * RADEG;
    let factor = match cm.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };
    (arg, factor)
}

/// Compute the Moon's geocentric position.
///
/// Arguments
/// ---------
/// * `t`: Julian centuries of TT since J2000.0.
///
/// Return
/// ------
/// * The [`LunarPosition`] referred to the mean equinox of date, without nutation.
pub fn lunar_position(t: f64) -> LunarPosition {
    let [l_prime, d, m, m_prime, f] = fundamental_arguments(t);

    // Venus, Jupiter and flattening perturbations
    let a1 = (119.75 + 131.849 * t) * RADEG;
    let a2 = (53.09 + 479264.290 * t) * RADEG;
    let a3 = (313.45 + 481266.484 * t) * RADEG;

    // decreasing eccentricity of the Earth's orbit
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for &(cd, cm, cmp, cf, coef_l, coef_r) in LONGITUDE_DISTANCE.iter() {
        let (arg, factor) = term_argument(d, m, m_prime, f, (cd, cm, cmp, cf), e);
        sum_l += coef_l * factor * arg.sin();
        sum_r += coef_r * factor * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, coef_b) in LATITUDE.iter() {
        let (arg, factor) = term_argument(d, m, m_prime, f, (cd, cm, cmp, cf), e);
        sum_b += coef_b * factor * arg.sin();
    }

    let l_prime_rad = l_prime * RADEG;
    let f_rad = f * RADEG;
    let m_prime_rad = m_prime * RADEG;

    sum_l += 3958.0 * a1.sin() + 1962.0 * (l_prime_rad - f_rad).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * l_prime_rad.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f_rad).sin()
        + 175.0 * (a1 + f_rad).sin()
        + 127.0 * (l_prime_rad - m_prime_rad).sin()
        - 115.0 * (l_prime_rad + m_prime_rad).sin();

    LunarPosition {
        longitude: ((l_prime + sum_l / 1e6) * RADEG).rem_euclid(std::f64::consts::TAU),
        latitude: (sum_b / 1e6) * RADEG,
        distance: 385000.56 + sum_r / 1000.0,
    }
}
