//! # Constants and type definitions for mmt-ephem
//!
//! This module centralizes the **physical constants**, **conversion factors**, and
//! **common type aliases** used throughout the crate, along with the fixed parameters
//! of the MMT site and the operational defaults of the observing tools.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//! - MMT site coordinates and horizon conventions

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Equatorial radius of the Sun in kilometers
pub const SUN_RADIUS: f64 = 695_700.0;

/// Equatorial radius of the Moon in kilometers
pub const MOON_RADIUS: f64 = 1_737.4;

/// Ratio of sidereal day to solar day
pub const SIDEREAL_RATE: f64 = 1.00273790934;

// -------------------------------------------------------------------------------------------------
// MMT site
// -------------------------------------------------------------------------------------------------

/// MMT geodetic latitude, 31°41′19.6″ N
pub const MMT_LATITUDE: Degree = 31.0 + 41.0 / 60.0 + 19.6 / 3600.0;

/// MMT geodetic longitude, 110°53′04.4″ W (east positive)
pub const MMT_LONGITUDE: Degree = -(110.0 + 53.0 / 60.0 + 4.4 / 3600.0);

/// MMT elevation above the ellipsoid in meters
pub const MMT_ELEVATION: Meter = 2600.0;

/// Atmospheric pressure used for the MMT site; zero disables refraction
pub const MMT_PRESSURE: Millibar = 0.0;

/// Standard time offset of the MMT site from UTC (MST, Arizona does not observe DST)
pub const MMT_UTC_OFFSET_HOURS: i32 = -7;

// -------------------------------------------------------------------------------------------------
// Horizon conventions and operational defaults
// -------------------------------------------------------------------------------------------------

/// USNO sunrise/sunset horizon, −0°34′
pub const STANDARD_HORIZON: Degree = -(34.0 / 60.0);

/// Civil twilight horizon
pub const CIVIL_TWILIGHT: Degree = -6.0;

/// Nautical twilight horizon
pub const NAUTICAL_TWILIGHT: Degree = -12.0;

/// Astronomical twilight horizon
pub const ASTRONOMICAL_TWILIGHT: Degree = -18.0;

/// Airmass beyond which the image quality is no longer useful at the MMT
pub const AIRMASS_CUTOFF: f64 = 1.8;

/// Sampling cadence of observability curves in minutes
pub const CURVE_CADENCE_MINUTES: u32 = 5;

/// Local hour used to anchor the "next rising/setting" searches of a night
pub const LOCAL_ANCHOR_HOUR: u8 = 12;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Pressure in millibars
pub type Millibar = f64;

/// Modified Julian Date (days)
pub type MJD = f64;
