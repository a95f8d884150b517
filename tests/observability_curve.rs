mod common;

use approx::assert_relative_eq;
use hifitime::Unit;
use mmt_ephem::config::ObservingConfig;
use mmt_ephem::curve::build_curve;
use mmt_ephem::ephemeris::AnalyticEphemeris;
use mmt_ephem::mmt_ephem::MmtEphem;
use mmt_ephem::target::Target;
use mmt_ephem::transform::alt_to_airmass;
use proptest::prelude::*;

use crate::common::{MMT, NIGHT_2016_02_09};

fn expected_len(span_seconds: f64, cadence_minutes: u32) -> usize {
    (span_seconds / (60.0 * f64::from(cadence_minutes))).ceil() as usize + 1
}

#[test]
fn curve_spans_the_night() {
    let night = &*NIGHT_2016_02_09;
    let target = Target::from_sexagesimal("8:00:00", "30:00:00").unwrap();
    let curve = MMT.build_curve(night, &target).unwrap();

    let times = curve.times();
    assert_eq!(times[0], night.sunset());

    let last = *times.last().unwrap();
    assert!(last >= night.sunrise());
    assert!(last - night.sunrise() < Unit::Minute * 5_i64);
    assert!(times[times.len() - 2] < night.sunrise());

    for pair in times.windows(2) {
        assert_eq!(pair[1] - pair[0], Unit::Minute * 5_i64);
    }

    let span = (night.sunrise() - night.sunset()).to_seconds();
    assert_eq!(curve.len(), expected_len(span, 5));
    assert_eq!(curve.airmass().len(), curve.len());
    assert_eq!(curve.parallactic_angles().len(), curve.len());
    assert_eq!(curve.observable().len(), curve.len());
}

#[test]
fn flags_follow_the_airmass_cutoff() {
    let night = &*NIGHT_2016_02_09;
    let target = Target::from_sexagesimal("8:00:00", "30:00:00").unwrap();
    let curve = MMT.build_curve(night, &target).unwrap();

    for sample in &curve {
        let airmass = sample.airmass();
        assert_eq!(sample.is_observable, airmass > 1.0 && airmass < 1.8);
        assert_relative_eq!(airmass, alt_to_airmass(sample.position.altitude));
    }

    // an 8h/+30° target transits near 23:00 MST in February
    let windows = curve.observable_windows();
    assert_eq!(windows.len(), 1);
    let (start, end) = windows[0];
    assert!(start > night.sunset() && end < night.sunrise());
    assert!((end - start).to_seconds() / 3600.0 > 6.0);
}

#[test]
fn target_below_the_horizon_is_never_observable() {
    let night = &*NIGHT_2016_02_09;
    let south = Target::from_degrees(90.0, -75.0).unwrap();
    let curve = MMT.build_curve(night, &south).unwrap();

    assert!(curve.observable().iter().all(|flag| !flag));
    assert!(curve.observable_windows().is_empty());
    assert!(curve.airmass().iter().all(|x| *x < 0.0));
}

#[test]
fn cadence_and_cutoff_come_from_the_config() {
    let config = ObservingConfig {
        cadence_minutes: 10,
        airmass_cutoff: 1.2,
        ..ObservingConfig::default()
    };
    let mmt = MmtEphem::new(config).unwrap();
    let night = &*NIGHT_2016_02_09;
    let target = Target::from_sexagesimal("8:00:00", "30:00:00").unwrap();

    let coarse = mmt.build_curve(night, &target).unwrap();
    let fine = MMT.build_curve(night, &target).unwrap();

    let span = (night.sunrise() - night.sunset()).to_seconds();
    assert_eq!(coarse.len(), expected_len(span, 10));
    assert!(coarse.observable().iter().filter(|f| **f).count() * 2 <= fine.len());
    for sample in &coarse {
        assert_eq!(sample.is_observable, sample.airmass() > 1.0 && sample.airmass() < 1.2);
    }
}

#[test]
fn curve_reuses_the_transform() {
    let night = &*NIGHT_2016_02_09;
    let target = Target::from_sexagesimal("10:30:00", "-10:00:00").unwrap();
    let curve = build_curve(
        &AnalyticEphemeris,
        night,
        &target,
        &ObservingConfig::default(),
    )
    .unwrap();

    for sample in curve.iter().step_by(17) {
        let direct = MMT.transform(sample.instant(), &target).unwrap();
        assert_eq!(sample.position, direct);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_curve_invariants(ra in 0.0..360.0f64, dec in -89.0..89.0f64) {
        let night = &*NIGHT_2016_02_09;
        let target = Target::from_degrees(ra, dec).unwrap();
        let curve = MMT.build_curve(night, &target).unwrap();

        let span = (night.sunrise() - night.sunset()).to_seconds();
        prop_assert_eq!(curve.len(), expected_len(span, 5));
        prop_assert_eq!(curve.samples()[0].instant(), night.sunset());

        for pair in curve.samples().windows(2) {
            prop_assert!(pair[0].instant() < pair[1].instant());
        }
        for sample in &curve {
            let airmass = sample.airmass();
            prop_assert_eq!(sample.is_observable, airmass > 1.0 && airmass < 1.8);
            prop_assert!((0.0..360.0).contains(&sample.position.azimuth));
            prop_assert!(sample.position.altitude.abs() <= 90.0);
        }
        for (start, end) in curve.observable_windows() {
            prop_assert!(start <= end);
        }
    }

    #[test]
    fn prop_transform_is_deterministic(ra in 0.0..360.0f64, dec in -90.0..=90.0f64, minutes in 0i64..1440) {
        let target = Target::from_degrees(ra, dec).unwrap();
        let instant = NIGHT_2016_02_09.anchor() + Unit::Minute * minutes;
        let a = MMT.transform(instant, &target).unwrap();
        let b = MMT.transform(instant, &target).unwrap();
        prop_assert_eq!(a.altitude.to_bits(), b.altitude.to_bits());
        prop_assert_eq!(a.azimuth.to_bits(), b.azimuth.to_bits());
        prop_assert_eq!(a.airmass.to_bits(), b.airmass.to_bits());
        prop_assert_eq!(a.parallactic_angle.to_bits(), b.parallactic_angle.to_bits());
    }
}
