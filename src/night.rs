//! # Night ephemeris
//!
//! The six characteristic instants of one observing night: sunset, sunrise, evening and
//! morning twilight, moonrise and moonset.
//!
//! ## Search protocol
//!
//! Every event is the *next* crossing after a single shared anchor, local noon of the
//! observation date (19:00 UTC at the MMT). Searching forward from noon picks the coming
//! evening rather than the morning that has already passed, and all six instants refer to
//! the same astronomical night.
//!
//! Three observer snapshots are used in a fixed order:
//!
//! 1. standard horizon (−0°34′): sunset, sunrise,
//! 2. twilight horizon (−12° by default), same anchor: evening and morning twilight,
//! 3. standard horizon again: moonrise, moonset.
//!
//! The snapshots are independent values derived from the first one, so the twilight horizon
//! cannot leak into the lunar searches.
//!
//! ## Ordering
//!
//! For a mid-latitude site the result satisfies
//! `sunset < evening_twilight < morning_twilight < sunrise`. The Moon events are not
//! ordered with respect to the night; either may even fall on the following day.

use std::fmt;
use std::sync::Arc;

use hifitime::Epoch;
use log::debug;

use crate::config::ObservingConfig;
use crate::ephem_errors::EphemError;
use crate::ephemeris::{Body, EphemerisProvider, ObserverState};
use crate::observers::horizon::Horizon;
use crate::observers::Observer;
use crate::time::{format_local, LocalDate};

/// Nightly event instants for one local date, immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct NightEphemeris {
    observation_date: LocalDate,
    anchor: Epoch,
    sunset: Epoch,
    sunrise: Epoch,
    evening_twilight: Epoch,
    morning_twilight: Epoch,
    moonrise: Epoch,
    moonset: Epoch,
    utc_offset_hours: i32,
    observer_state: ObserverState,
}

impl NightEphemeris {
    /// Compute the events of the night starting on `date`.
    ///
    /// Arguments
    /// ---------
    /// * `provider`: the ephemeris provider answering the rise/set searches.
    /// * `site`: the observatory.
    /// * `date`: local calendar date of the evening.
    /// * `config`: anchor hour, UTC offset and twilight horizon.
    ///
    /// Return
    /// ------
    /// * The [`NightEphemeris`], or the first error met.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::InvalidConfiguration`] if `config` does not validate.
    /// * [`EphemError::EventNotFound`] if any of the six searches finds no crossing.
    /// * [`EphemError::TimeError`] if the anchor cannot be represented.
    pub fn compute<P: EphemerisProvider + ?Sized>(
        provider: &P,
        site: Arc<Observer>,
        date: LocalDate,
        config: &ObservingConfig,
    ) -> Result<Self, EphemError> {
        config.validate()?;
        let anchor = date.local_hour_to_utc(config.local_anchor_hour, config.utc_offset_hours)?;
        debug!("computing night of {date}, anchor {anchor}");

        let standard = ObserverState::new(site, anchor, Horizon::Standard);
        let sunset = provider.next_setting(&Body::Sun, &standard)?;
        let sunrise = provider.next_rising(&Body::Sun, &standard)?;

        let twilight = standard.with_horizon(config.twilight);
        let evening_twilight = provider.next_setting(&Body::Sun, &twilight)?;
        let morning_twilight = provider.next_rising(&Body::Sun, &twilight)?;

        let lunar = twilight.with_horizon(Horizon::Standard);
        let moonrise = provider.next_rising(&Body::Moon, &lunar)?;
        let moonset = provider.next_setting(&Body::Moon, &lunar)?;

        let night = NightEphemeris {
            observation_date: date,
            anchor,
            sunset,
            sunrise,
            evening_twilight,
            morning_twilight,
            moonrise,
            moonset,
            utc_offset_hours: config.utc_offset_hours,
            observer_state: lunar,
        };
        debug!("{night}");
        Ok(night)
    }

    pub fn observation_date(&self) -> LocalDate {
        self.observation_date
    }

    /// Reference instant of every search of this night.
    pub fn anchor(&self) -> Epoch {
        self.anchor
    }

    pub fn sunset(&self) -> Epoch {
        self.sunset
    }

    pub fn sunrise(&self) -> Epoch {
        self.sunrise
    }

    /// Sun setting below the twilight horizon.
    pub fn evening_twilight(&self) -> Epoch {
        self.evening_twilight
    }

    /// Sun rising above the twilight horizon.
    pub fn morning_twilight(&self) -> Epoch {
        self.morning_twilight
    }

    pub fn moonrise(&self) -> Epoch {
        self.moonrise
    }

    pub fn moonset(&self) -> Epoch {
        self.moonset
    }

    /// Observer snapshot at the anchor with the standard horizon, for further queries on the
    /// same night.
    pub fn observer_state(&self) -> &ObserverState {
        &self.observer_state
    }

    /// Time between sunset and sunrise, in hours.
    pub fn duration_hours(&self) -> f64 {
        (self.sunrise - self.sunset).to_seconds() / 3600.0
    }

    /// Time between evening and morning twilight, in hours.
    pub fn dark_hours(&self) -> f64 {
        (self.morning_twilight - self.evening_twilight).to_seconds() / 3600.0
    }
}

impl fmt::Display for NightEphemeris {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = |epoch: &Epoch| format_local(epoch, self.utc_offset_hours);
        writeln!(f, "Night of {} (local time)", self.observation_date)?;
        writeln!(f, "  sunset           {}", local(&self.sunset))?;
        writeln!(f, "  evening twilight {}", local(&self.evening_twilight))?;
        writeln!(f, "  morning twilight {}", local(&self.morning_twilight))?;
        writeln!(f, "  sunrise          {}", local(&self.sunrise))?;
        writeln!(f, "  moonrise         {}", local(&self.moonrise))?;
        write!(f, "  moonset          {}", local(&self.moonset))
    }
}

#[cfg(test)]
mod night_test {
    use std::sync::Mutex;

    use hifitime::Unit;

    use super::*;
    use crate::ephemeris::{Event, TopocentricPosition};
    use crate::constants::Radian;

    /// Sun and Moon following a 24 h sine wave, recording the horizon of every query.
    struct ScriptedSky {
        horizons: Mutex<Vec<Horizon>>,
    }

    impl ScriptedSky {
        fn new() -> Self {
            ScriptedSky {
                horizons: Mutex::new(Vec::new()),
            }
        }

        fn altitude(body: &Body, instant: Epoch) -> Radian {
            // the Sun culminates at 19:00 UTC, the Moon eight hours later
            let culmination = match body {
                Body::Moon => Epoch::from_gregorian_utc_hms(2016, 2, 10, 3, 0, 0),
                _ => Epoch::from_gregorian_utc_hms(2016, 2, 9, 19, 0, 0),
            };
            let phase = (instant - culmination).to_seconds() / 86_400.0;
            (std::f64::consts::TAU * phase).cos()
        }
    }

    impl EphemerisProvider for ScriptedSky {
        fn topocentric_position(
            &self,
            body: &Body,
            observer: &ObserverState,
        ) -> Result<TopocentricPosition, EphemError> {
            if let Ok(mut horizons) = self.horizons.lock() {
                if horizons.last() != Some(&observer.horizon()) {
                    horizons.push(observer.horizon());
                }
            }
            Ok(TopocentricPosition {
                altitude: Self::altitude(body, observer.instant()),
                azimuth: 0.0,
                parallactic_angle: 0.0,
                angular_radius: 0.0,
            })
        }
    }

    #[test]
    fn test_event_sequence_and_horizon_order() {
        let sky = ScriptedSky::new();
        let date = LocalDate::new(2016, 2, 9).unwrap();
        let night = NightEphemeris::compute(
            &sky,
            Arc::new(Observer::mmt()),
            date,
            &ObservingConfig::default(),
        )
        .unwrap();

        assert_eq!(
            *sky.horizons.lock().unwrap(),
            vec![
                Horizon::Standard,
                Horizon::NauticalTwilight,
                Horizon::Standard
            ]
        );

        assert_eq!(night.anchor(), Epoch::from_gregorian_utc_hms(2016, 2, 9, 19, 0, 0));
        assert!(night.sunset() < night.evening_twilight());
        assert!(night.evening_twilight() < night.morning_twilight());
        assert!(night.morning_twilight() < night.sunrise());
        assert!(night.sunset() > night.anchor());

        // a cosine crosses zero a quarter day after culmination, the −0°34′ horizon
        // is reached a couple of minutes later
        let expected_sunset = night.anchor() + Unit::Hour * 6_i64;
        let delay = (night.sunset() - expected_sunset).to_seconds();
        assert!(delay > 0.0 && delay < 300.0, "delay = {delay}");
        assert!((night.duration_hours() - 12.0).abs() < 0.1);
        assert!(night.moonrise() > night.anchor());
        assert!(night.moonset() > night.moonrise());
        assert!(night.dark_hours() < night.duration_hours());

        assert_eq!(night.observer_state().horizon(), Horizon::Standard);
        assert_eq!(night.observer_state().instant(), night.anchor());
        assert_eq!(night.observation_date(), date);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_searching() {
        let sky = ScriptedSky::new();
        let config = ObservingConfig {
            local_anchor_hour: 200,
            ..ObservingConfig::default()
        };
        let result = NightEphemeris::compute(
            &sky,
            Arc::new(Observer::mmt()),
            LocalDate::new(2016, 2, 9).unwrap(),
            &config,
        );

        assert!(matches!(result, Err(EphemError::InvalidConfiguration(_))));
        assert!(sky.horizons.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_event_is_an_error() {
        struct DaylightForever;
        impl EphemerisProvider for DaylightForever {
            fn topocentric_position(
                &self,
                _body: &Body,
                _observer: &ObserverState,
            ) -> Result<TopocentricPosition, EphemError> {
                Ok(TopocentricPosition {
                    altitude: 1.0,
                    azimuth: 0.0,
                    parallactic_angle: 0.0,
                    angular_radius: 0.0,
                })
            }
        }

        let result = NightEphemeris::compute(
            &DaylightForever,
            Arc::new(Observer::mmt()),
            LocalDate::new(2016, 2, 9).unwrap(),
            &ObservingConfig::default(),
        );
        assert_eq!(
            result,
            Err(EphemError::EventNotFound {
                body: Body::Sun,
                event: Event::Setting,
                horizon: Horizon::Standard,
            })
        );
    }
}
