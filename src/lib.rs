pub mod config;
pub mod constants;
pub mod conversion;
pub mod curve;
mod earth_orientation;
pub mod ephem_errors;
pub mod ephemeris;
pub mod mmt_ephem;
pub mod night;
pub mod observers;
mod ref_system;
pub mod target;
pub mod time;
pub mod transform;
