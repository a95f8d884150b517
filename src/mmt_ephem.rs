//! # MmtEphem: site, ephemeris provider and observing configuration
//!
//! This module defines [`MmtEphem`], the façade that wires together:
//!
//! 1. **The site** ([`Observer`]), the MMT by default, shared as an `Arc`.
//! 2. **An ephemeris provider** ([`EphemerisProvider`]), the analytic
//!    [`AnalyticEphemeris`] unless another one is supplied.
//! 3. **The observing configuration** ([`ObservingConfig`]), validated once at construction.
//!
//! ## Key responsibilities
//!
//! - Nightly events for a local date through [`compute_night`](MmtEphem::compute_night)
//! - Per-instant target positions through [`transform`](MmtEphem::transform)
//! - Sunset-to-sunrise observability curves through [`build_curve`](MmtEphem::build_curve)
//! - Rise and set times of a target on a given night through
//!   [`target_events`](MmtEphem::target_events)
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use mmt_ephem::mmt_ephem::MmtEphem;
//! use mmt_ephem::target::Target;
//!
//! let mmt = MmtEphem::default();
//! let night = mmt.compute_night("2016/02/09".parse().unwrap()).unwrap();
//!
//! let target = Target::from_sexagesimal("8:00:00", "30:00:00").unwrap();
//! let curve = mmt.build_curve(&night, &target).unwrap();
//! for (start, end) in curve.observable_windows() {
//!     println!("observable from {start} to {end}");
//! }
//! ```
//!
//! ## See also
//! ------------
//! * [`NightEphemeris`] – nightly event instants.
//! * [`ObservabilityCurve`] – the sampled curve and its windows.
//! * [`EphemerisProvider`] – the provider interface.

use std::sync::Arc;

use hifitime::Epoch;
use log::debug;

use crate::config::ObservingConfig;
use crate::curve::{self, ObservabilityCurve};
use crate::ephem_errors::EphemError;
use crate::ephemeris::{AnalyticEphemeris, Body, EphemerisProvider};
use crate::night::NightEphemeris;
use crate::observers::Observer;
use crate::target::Target;
use crate::time::LocalDate;
use crate::transform::{self, PositionSample};

/// Rise and set times of a fixed target after the anchor of a night.
///
/// Each field is `None` when the target does not cross the horizon in the search window,
/// i.e. it is circumpolar or never rises at the site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEvents {
    pub rising: Option<Epoch>,
    pub setting: Option<Epoch>,
}

#[derive(Debug, Clone)]
pub struct MmtEphem<P: EphemerisProvider = AnalyticEphemeris> {
    site: Arc<Observer>,
    provider: P,
    config: ObservingConfig,
}

impl MmtEphem<AnalyticEphemeris> {
    /// Construct a context for the MMT with the analytic ephemeris.
    ///
    /// Arguments
    /// -----------------
    /// * `config`: the observing configuration.
    ///
    /// Return
    /// ----------
    /// * A new [`MmtEphem`], or [`EphemError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: ObservingConfig) -> Result<Self, EphemError> {
        Self::with_provider(Observer::mmt(), AnalyticEphemeris, config)
    }
}

impl Default for MmtEphem<AnalyticEphemeris> {
    fn default() -> Self {
        MmtEphem {
            site: Arc::new(Observer::mmt()),
            provider: AnalyticEphemeris,
            config: ObservingConfig::default(),
        }
    }
}

impl<P: EphemerisProvider> MmtEphem<P> {
    /// Construct a context with an explicit site and provider.
    ///
    /// Arguments
    /// -----------------
    /// * `site`: the observatory.
    /// * `provider`: the ephemeris provider.
    /// * `config`: the observing configuration.
    ///
    /// Return
    /// ----------
    /// * A new [`MmtEphem`], or [`EphemError::InvalidConfiguration`] if `config` is invalid.
    pub fn with_provider(
        site: Observer,
        provider: P,
        config: ObservingConfig,
    ) -> Result<Self, EphemError> {
        config.validate()?;
        debug!("observing context for {site} with {config:?}");
        Ok(MmtEphem {
            site: Arc::new(site),
            provider,
            config,
        })
    }

    pub fn site(&self) -> &Observer {
        &self.site
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &ObservingConfig {
        &self.config
    }

    /// Nightly events for a local calendar date.
    ///
    /// See also
    /// ------------
    /// * [`NightEphemeris::compute`] – search protocol and errors.
    pub fn compute_night(&self, date: LocalDate) -> Result<NightEphemeris, EphemError> {
        NightEphemeris::compute(&self.provider, Arc::clone(&self.site), date, &self.config)
    }

    /// Position, airmass and parallactic angle of `target` at `instant`.
    pub fn transform(&self, instant: Epoch, target: &Target) -> Result<PositionSample, EphemError> {
        transform::transform(&self.provider, Arc::clone(&self.site), instant, target)
    }

    /// Observability curve of `target` from sunset to sunrise of `night`.
    pub fn build_curve(
        &self,
        night: &NightEphemeris,
        target: &Target,
    ) -> Result<ObservabilityCurve, EphemError> {
        curve::build_curve(&self.provider, night, target, &self.config)
    }

    /// Next rising and setting of `target` after the anchor of `night`.
    ///
    /// The searches use the standard horizon and a zero angular radius. A missing crossing
    /// is reported as `None`; any other failure is an error.
    pub fn target_events(
        &self,
        night: &NightEphemeris,
        target: &Target,
    ) -> Result<TargetEvents, EphemError> {
        let body = Body::Fixed(*target);
        let observer = night.observer_state();

        let optional = |result: Result<Epoch, EphemError>| match result {
            Ok(instant) => Ok(Some(instant)),
            Err(EphemError::EventNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        };

        Ok(TargetEvents {
            rising: optional(self.provider.next_rising(&body, observer))?,
            setting: optional(self.provider.next_setting(&body, observer))?,
        })
    }
}
