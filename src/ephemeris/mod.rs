//! # Ephemeris provider
//!
//! The ephemeris layer answers two questions for an observer: *where is this body on the
//! sky right now* and *when does it next cross this horizon*. The night timeline and the
//! observability curves are built only on top of these two queries.
//!
//! ## Overview
//!
//! - [`Body`]: what is being observed, the Sun, the Moon or a fixed J2000 [`Target`].
//! - [`ObserverState`]: an immutable snapshot of *site + reference instant + horizon*.
//!   Reconfiguring it ([`ObserverState::at`], [`ObserverState::with_horizon`]) returns a new
//!   snapshot, so a horizon switch can never leak into another query.
//! - [`EphemerisProvider`]: the provider interface. Implementors supply
//!   [`topocentric_position`](EphemerisProvider::topocentric_position); the rise/set searches
//!   [`next_rising`](EphemerisProvider::next_rising) and
//!   [`next_setting`](EphemerisProvider::next_setting) are provided on top of it through the
//!   bounded search of [`crossing`].
//! - [`AnalyticEphemeris`](analytic::AnalyticEphemeris): the built-in provider, low-precision
//!   analytic theories for the Sun ([`sun`]) and the Moon ([`moon`]).
//!
//! ## Conventions
//!
//! - All angles are **radians**; azimuth is measured from north through east.
//! - Positions are geometric (no refraction), consistent with a site pressure of zero.
//! - A rise or set is the instant the body's **upper limb** crosses the horizon altitude, so
//!   the angular radius of the body is part of every position.

pub mod analytic;
pub mod crossing;
pub mod moon;
pub mod sun;

use std::fmt;
use std::sync::Arc;

use hifitime::Epoch;
use log::warn;

use crate::constants::Radian;
use crate::ephem_errors::EphemError;
use crate::observers::horizon::Horizon;
use crate::observers::Observer;
use crate::target::Target;

pub use analytic::AnalyticEphemeris;

/// A body whose position the provider can compute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    Sun,
    Moon,
    /// A fixed J2000 position (zero angular radius).
    Fixed(Target),
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Sun => write!(f, "Sun"),
            Body::Moon => write!(f, "Moon"),
            Body::Fixed(target) => write!(f, "fixed body at {target}"),
        }
    }
}

/// Direction of a horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Rising,
    Setting,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Rising => write!(f, "rising"),
            Event::Setting => write!(f, "setting"),
        }
    }
}

/// Apparent topocentric position of a body, all angles in **radians**.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopocentricPosition {
    pub altitude: Radian,
    /// Measured from north through east, `[0, 2π)`.
    pub azimuth: Radian,
    pub parallactic_angle: Radian,
    /// Apparent angular radius of the disk, `0` for fixed bodies.
    pub angular_radius: Radian,
}

/// Immutable observer configuration: a site, a reference instant and a horizon.
///
/// Every query reads its configuration from a snapshot passed by reference, and the
/// builder-style methods return new snapshots, so callers never share mutable observer
/// state. Cloning is cheap, the site is reference counted.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverState {
    site: Arc<Observer>,
    instant: Epoch,
    horizon: Horizon,
}

impl ObserverState {
    pub fn new(site: Arc<Observer>, instant: Epoch, horizon: Horizon) -> Self {
        ObserverState {
            site,
            instant,
            horizon,
        }
    }

    /// Same site and horizon, another reference instant.
    pub fn at(&self, instant: Epoch) -> Self {
        ObserverState {
            site: Arc::clone(&self.site),
            instant,
            horizon: self.horizon,
        }
    }

    /// Same site and instant, another horizon.
    pub fn with_horizon(&self, horizon: Horizon) -> Self {
        ObserverState {
            site: Arc::clone(&self.site),
            instant: self.instant,
            horizon,
        }
    }

    pub fn site(&self) -> &Observer {
        &self.site
    }

    pub fn instant(&self) -> Epoch {
        self.instant
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }
}

/// Source of body positions and horizon crossings.
///
/// Only [`topocentric_position`](EphemerisProvider::topocentric_position) must be implemented.
/// The crossing searches are derived from it: the quantity followed in time is
/// `altitude + angular_radius − horizon`, i.e. the upper limb relative to the horizon of the
/// observer snapshot, starting strictly after the snapshot's instant.
pub trait EphemerisProvider {
    /// Position of `body` as seen from `observer.site()` at `observer.instant()`.
    fn topocentric_position(
        &self,
        body: &Body,
        observer: &ObserverState,
    ) -> Result<TopocentricPosition, EphemError>;

    /// Next instant after `observer.instant()` at which `body` rises above `observer.horizon()`.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::EventNotFound`] if no crossing exists in the search window.
    fn next_rising(&self, body: &Body, observer: &ObserverState) -> Result<Epoch, EphemError> {
        next_event(self, body, observer, Event::Rising)
    }

    /// Next instant after `observer.instant()` at which `body` sets below `observer.horizon()`.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::EventNotFound`] if no crossing exists in the search window.
    fn next_setting(&self, body: &Body, observer: &ObserverState) -> Result<Epoch, EphemError> {
        next_event(self, body, observer, Event::Setting)
    }
}

fn next_event<P: EphemerisProvider + ?Sized>(
    provider: &P,
    body: &Body,
    observer: &ObserverState,
    event: Event,
) -> Result<Epoch, EphemError> {
    let horizon = observer.horizon().altitude_rad();
    let limb_height = |instant: Epoch| -> Result<f64, EphemError> {
        let pos = provider.topocentric_position(body, &observer.at(instant))?;
        Ok(pos.altitude + pos.angular_radius - horizon)
    };

    crossing::find_crossing(limb_height, observer.instant(), event)?.ok_or_else(|| {
        warn!(
            "no {event} of {body} within {} h of {} for horizon {}",
            crossing::SEARCH_WINDOW_HOURS,
            observer.instant(),
            observer.horizon()
        );
        EphemError::EventNotFound {
            body: *body,
            event,
            horizon: observer.horizon(),
        }
    })
}
