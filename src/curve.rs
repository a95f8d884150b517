//! # Observability curves
//!
//! A curve samples a fixed target across one night on a regular grid:
//!
//! ```text
//! t₀ = sunset,  tᵢ = tᵢ₋₁ + cadence,  stop at the first tᵢ ≥ sunrise (included)
//! ```
//!
//! so it holds `⌈(sunrise − sunset) / cadence⌉ + 1` samples, strictly ascending in time.
//! Each sample carries the full [`PositionSample`] and an observability flag,
//! `1 < airmass < cutoff` with both bounds excluded.
//!
//! The parallel arrays of the planning tools (times, airmass, parallactic angles, flags) are
//! available as accessors, and [`ObservabilityCurve::observable_windows`] condenses the flags
//! into time intervals.

use hifitime::{Epoch, Unit};
use itertools::Itertools;
use log::debug;

use crate::config::ObservingConfig;
use crate::ephem_errors::EphemError;
use crate::ephemeris::EphemerisProvider;
use crate::night::NightEphemeris;
use crate::target::Target;
use crate::transform::{sample_at, PositionSample};

/// Is a sample with this airmass usable?
///
/// Both bounds are excluded: an airmass of exactly `1.0` (zenith) or exactly `cutoff` is not
/// observable, neither is any negative value (target below the horizon).
pub fn target_observability(airmass: f64, cutoff: f64) -> bool {
    airmass > 1.0 && airmass < cutoff
}

/// One grid point of an [`ObservabilityCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservabilitySample {
    pub position: PositionSample,
    pub is_observable: bool,
}

impl ObservabilitySample {
    pub fn instant(&self) -> Epoch {
        self.position.instant
    }

    pub fn airmass(&self) -> f64 {
        self.position.airmass
    }
}

/// Observability of one target over one night, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityCurve {
    target: Target,
    cadence_minutes: u32,
    samples: Vec<ObservabilitySample>,
}

impl ObservabilityCurve {
    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn cadence_minutes(&self) -> u32 {
        self.cadence_minutes
    }

    pub fn samples(&self) -> &[ObservabilitySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObservabilitySample> {
        self.samples.iter()
    }

    pub fn times(&self) -> Vec<Epoch> {
        self.samples.iter().map(|s| s.instant()).collect()
    }

    pub fn airmass(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.airmass()).collect()
    }

    /// Parallactic angles in degrees.
    pub fn parallactic_angles(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.position.parallactic_angle)
            .collect()
    }

    pub fn observable(&self) -> Vec<bool> {
        self.samples.iter().map(|s| s.is_observable).collect()
    }

    /// Intervals of consecutive observable samples.
    ///
    /// Return
    /// ------
    /// * `(first, last)` instants of every run of observable samples, in time order. A run
    ///   made of a single sample gives `first == last`.
    pub fn observable_windows(&self) -> Vec<(Epoch, Epoch)> {
        let runs = self.samples.iter().chunk_by(|s| s.is_observable);
        let windows = runs
            .into_iter()
            .filter(|(observable, _)| *observable)
            .filter_map(|(_, run)| {
                let run: Vec<_> = run.collect();
                Some((run.first()?.instant(), run.last()?.instant()))
            })
            .collect();
        windows
    }
}

impl<'a> IntoIterator for &'a ObservabilityCurve {
    type Item = &'a ObservabilitySample;
    type IntoIter = std::slice::Iter<'a, ObservabilitySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Sample a target from sunset to sunrise.
///
/// Arguments
/// ---------
/// * `provider`: source of topocentric positions.
/// * `night`: the night; its sunset and sunrise bound the grid and its observer snapshot is
///   reused for every sample.
/// * `target`: the fixed target.
/// * `config`: cadence and airmass cutoff.
///
/// Return
/// ------
/// * The [`ObservabilityCurve`], one position evaluation per grid point.
///
/// See also
/// ------------
/// * [`target_observability`] – the observability rule.
/// * [`crate::transform::transform`] – the per-instant computation.
pub fn build_curve<P: EphemerisProvider + ?Sized>(
    provider: &P,
    night: &NightEphemeris,
    target: &Target,
    config: &ObservingConfig,
) -> Result<ObservabilityCurve, EphemError> {
    config.validate()?;

    let step = Unit::Minute * i64::from(config.cadence_minutes);
    let sunrise = night.sunrise();
    let observer = night.observer_state();

    let mut samples = Vec::new();
    let mut instant = night.sunset();
    loop {
        let position = sample_at(provider, &observer.at(instant), target)?;
        samples.push(ObservabilitySample {
            position,
            is_observable: target_observability(position.airmass, config.airmass_cutoff),
        });
        if instant >= sunrise {
            break;
        }
        instant = instant + step;
    }

    let curve = ObservabilityCurve {
        target: *target,
        cadence_minutes: config.cadence_minutes,
        samples,
    };
    debug!(
        "curve of {target} for {}: {} samples, {} observable",
        night.observation_date(),
        curve.len(),
        curve.iter().filter(|s| s.is_observable).count()
    );
    Ok(curve)
}
