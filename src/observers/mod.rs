//! # Observatory site
//!
//! This module holds the **site model**: an immutable [`Observer`] describing one fixed
//! ground-based observatory (geodetic longitude/latitude, elevation, atmospheric pressure),
//! together with the geometry needed to place it in space:
//!
//! - [`geodetic_to_parallax`] converts geodetic latitude and height into the geocentric
//!   parallax coordinates (ρ·cosφ, ρ·sinφ), accounting for Earth oblateness.
//! - [`Observer::geocentric_position`] gives the site's geocentric vector in the true
//!   equatorial frame of date for a given apparent sidereal time, which is what the Moon's
//!   topocentric parallax needs.
//!
//! The crate is built around a single site, the MMT on Mt. Hopkins, available through
//! [`Observer::mmt`]. It is shared as an `Arc<Observer>` between observer snapshots.
//!
//! ## Units
//!
//! - Longitude, latitude: **degrees** (east and north positive).
//! - Elevation: **meters** above the reference ellipsoid.
//! - Pressure: **millibars**; `0` means no refraction is applied.
//! - Geocentric parallax (ρ·cosφ, ρ·sinφ): **Earth equatorial radii**.
//!
//! ## See also
//! ------------
//! * [`horizon::Horizon`] – altitude conventions used by rise/set searches.
//! * [`crate::ephemeris::ObserverState`] – site + instant + horizon snapshot.

pub mod horizon;

use std::fmt;

use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::constants::{
    Degree, Kilometer, Meter, Millibar, Radian, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, MMT_ELEVATION,
    MMT_LATITUDE, MMT_LONGITUDE, MMT_PRESSURE,
};
use crate::conversion::format_sexagesimal;
use crate::ephem_errors::EphemError;

/// A fixed ground-based observing site.
///
/// The fields are NaN-free (`NotNan`) so that the site can be compared and hashed; the
/// geocentric parallax coordinates are precomputed at construction.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Observer {
    /// Geodetic longitude in **degrees** east of Greenwich.
    pub longitude: NotNan<f64>,

    /// Geodetic latitude in **degrees**.
    pub latitude: NotNan<f64>,

    /// Height above the reference ellipsoid in **meters**.
    pub elevation: NotNan<f64>,

    /// Atmospheric pressure in **millibars**.
    pub pressure: NotNan<f64>,

    /// Optional human-readable site name.
    pub name: Option<String>,

    /// ρ·cosφ (geocentric latitude φ), in **Earth radii**.
    pub rho_cos_phi: NotNan<f64>,

    /// ρ·sinφ (geocentric latitude φ), in **Earth radii**.
    pub rho_sin_phi: NotNan<f64>,
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: Geodetic longitude in **degrees** (east positive).
    /// * `latitude`: Geodetic latitude in **degrees**, within `[-90, 90]`.
    /// * `elevation`: Height above the reference ellipsoid in **meters**.
    /// * `pressure`: Atmospheric pressure in **millibars** (non-negative).
    /// * `name`: Optional site name.
    ///
    /// Errors
    /// ----------
    /// * [`EphemError::InvalidCoordinate`] if a value is not finite or out of range.
    pub fn new(
        longitude: Degree,
        latitude: Degree,
        elevation: Meter,
        pressure: Millibar,
        name: Option<String>,
    ) -> Result<Observer, EphemError> {
        if ![longitude, latitude, elevation, pressure]
            .iter()
            .all(|x| x.is_finite())
        {
            return Err(EphemError::InvalidCoordinate(format!(
                "site values must be finite: lon={longitude}, lat={latitude}, \
                 elevation={elevation}, pressure={pressure}"
            )));
        }
        if latitude.abs() > 90.0 {
            return Err(EphemError::InvalidCoordinate(format!(
                "site latitude out of range: {latitude}"
            )));
        }
        if pressure < 0.0 {
            return Err(EphemError::InvalidCoordinate(format!(
                "site pressure must be non-negative: {pressure}"
            )));
        }

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, elevation);

        Ok(Observer {
            longitude: NotNan::new(longitude)?,
            latitude: NotNan::new(latitude)?,
            elevation: NotNan::new(elevation)?,
            pressure: NotNan::new(pressure)?,
            name,
            rho_cos_phi: NotNan::new(rho_cos_phi)?,
            rho_sin_phi: NotNan::new(rho_sin_phi)?,
        })
    }

    /// The MMT Observatory, Mt. Hopkins, Arizona.
    ///
    /// 31°41′19.6″ N, 110°53′04.4″ W, 2600 m, pressure 0 (no refraction).
    pub fn mmt() -> Observer {
        Observer::new(
            MMT_LONGITUDE,
            MMT_LATITUDE,
            MMT_ELEVATION,
            MMT_PRESSURE,
            Some("MMT".to_string()),
        )
        .expect("MMT site constants are finite and in range")
    }

    /// Geodetic latitude in radians.
    pub fn latitude_rad(&self) -> Radian {
        self.latitude.to_radians()
    }

    /// Geodetic longitude in radians (east positive).
    pub fn longitude_rad(&self) -> Radian {
        self.longitude.to_radians()
    }

    /// Geocentric position of the site in the true equatorial frame of date, in **km**.
    ///
    /// Arguments
    /// ---------
    /// * `gast`: Greenwich apparent sidereal time in radians.
    ///
    /// Return
    /// ------
    /// * The site vector, rotated by the local sidereal time `gast + longitude`.
    pub fn geocentric_position(&self, gast: Radian) -> Vector3<Kilometer> {
        let local_sidereal = gast + self.longitude_rad();
        let scale = EARTH_MAJOR_AXIS / 1000.0;
        let rho_cos_phi = self.rho_cos_phi.into_inner();

        Vector3::new(
            scale * rho_cos_phi * local_sidereal.cos(),
            scale * rho_cos_phi * local_sidereal.sin(),
            scale * self.rho_sin_phi.into_inner(),
        )
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (lat {}, lon {}, {} m)",
            self.name.as_deref().unwrap_or("unnamed site"),
            format_sexagesimal(self.latitude.into_inner(), true),
            format_sexagesimal(self.longitude.into_inner(), true),
            self.elevation
        )
    }
}

/// Convert geodetic latitude and height into normalized parallax coordinates
/// on the Earth.
///
/// The resulting values are dimensionless and expressed in units of the Earth's
/// equatorial radius (`EARTH_MAJOR_AXIS`).
///
/// Arguments
/// ---------
/// * `lat` - Geodetic latitude of the observer in **radians**.
/// * `height` - Observer's altitude above the reference ellipsoid in **meters**.
///
/// Details
/// -------
/// ```text
/// u = atan( (sin φ * (b/a)) / cos φ )
/// ρ_sinφ = (b/a) * sin u + (h/a) * sin φ
/// ρ_cosφ = cos u + (h/a) * cos φ
/// ```
///
/// where `a` and `b` are the Earth's semi-major and semi-minor axes,
/// and `h` is the height above the ellipsoid.
pub fn lat_alt_to_parallax(lat: Radian, height: Meter) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // parametric latitude
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Convert geodetic latitude (in degrees) and height (in meters)
/// into normalized parallax coordinates.
///
/// Convenience wrapper around [`lat_alt_to_parallax`].
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}
