#![allow(dead_code)]

use std::sync::LazyLock;

use hifitime::Epoch;
use mmt_ephem::mmt_ephem::MmtEphem;
use mmt_ephem::night::NightEphemeris;
use mmt_ephem::time::LocalDate;

pub static MMT: LazyLock<MmtEphem> = LazyLock::new(MmtEphem::default);

pub static NIGHT_2016_02_09: LazyLock<NightEphemeris> = LazyLock::new(|| {
    MMT.compute_night(LocalDate::new(2016, 2, 9).unwrap())
        .unwrap()
});

/// Assert that two instants are at most `tolerance_minutes` apart.
pub fn assert_epoch_close(actual: Epoch, expected: Epoch, tolerance_minutes: f64) {
    let diff = (actual - expected).to_seconds() / 60.0;
    assert!(
        diff.abs() <= tolerance_minutes,
        "{actual} differs from {expected} by {diff:.2} min (tolerance {tolerance_minutes} min)"
    );
}

pub fn hours_between(start: Epoch, end: Epoch) -> f64 {
    (end - start).to_seconds() / 3600.0
}
