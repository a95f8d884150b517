//! # Observing configuration
//!
//! Operational parameters of the nightly tools, gathered in a single serializable value so
//! they can be loaded from a file, logged, or overridden in tests. The defaults reproduce the
//! MMT queue-planning conventions: nautical twilight, a 1.8 airmass limit, 5-minute curves,
//! and local noon (MST) as the anchor of the nightly event searches.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIRMASS_CUTOFF, CURVE_CADENCE_MINUTES, LOCAL_ANCHOR_HOUR, MMT_UTC_OFFSET_HOURS,
};
use crate::ephem_errors::EphemError;
use crate::observers::horizon::Horizon;

/// Parameters shared by the night computation and the observability curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservingConfig {
    /// Samples with an airmass at or above this value are not observable.
    pub airmass_cutoff: f64,

    /// Horizon defining the evening and morning twilight.
    pub twilight: Horizon,

    /// Time step of the observability curves, in minutes.
    pub cadence_minutes: u32,

    /// Offset of the site's local time from UTC, in hours.
    pub utc_offset_hours: i32,

    /// Local hour of the observation date from which the nightly events are searched.
    pub local_anchor_hour: u8,
}

impl Default for ObservingConfig {
    fn default() -> Self {
        ObservingConfig {
            airmass_cutoff: AIRMASS_CUTOFF,
            twilight: Horizon::NauticalTwilight,
            cadence_minutes: CURVE_CADENCE_MINUTES,
            utc_offset_hours: MMT_UTC_OFFSET_HOURS,
            local_anchor_hour: LOCAL_ANCHOR_HOUR,
        }
    }
}

impl ObservingConfig {
    /// Check that every parameter is usable.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::InvalidConfiguration`] if the airmass cutoff is not above 1, the cadence
    ///   is zero, the UTC offset is outside ±14 h, the anchor hour is not a valid hour of the
    ///   day, or a custom twilight horizon is out of range.
    pub fn validate(&self) -> Result<(), EphemError> {
        if !self.airmass_cutoff.is_finite() || self.airmass_cutoff <= 1.0 {
            return Err(EphemError::InvalidConfiguration(format!(
                "airmass cutoff must be a finite value above 1, got {}",
                self.airmass_cutoff
            )));
        }
        if self.cadence_minutes == 0 {
            return Err(EphemError::InvalidConfiguration(
                "curve cadence must be at least one minute".to_string(),
            ));
        }
        if !(-14..=14).contains(&self.utc_offset_hours) {
            return Err(EphemError::InvalidConfiguration(format!(
                "UTC offset out of range: {} h",
                self.utc_offset_hours
            )));
        }
        if self.local_anchor_hour > 23 {
            return Err(EphemError::InvalidConfiguration(format!(
                "anchor hour out of range: {}",
                self.local_anchor_hour
            )));
        }
        if let Horizon::Custom(alt) = self.twilight {
            if !alt.is_finite() || alt.abs() > 90.0 {
                return Err(EphemError::InvalidConfiguration(format!(
                    "twilight horizon out of range: {alt}"
                )));
            }
        }
        Ok(())
    }
}
