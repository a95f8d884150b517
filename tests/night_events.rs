mod common;

use hifitime::Epoch;
use mmt_ephem::config::ObservingConfig;
use mmt_ephem::mmt_ephem::MmtEphem;
use mmt_ephem::observers::horizon::Horizon;
use mmt_ephem::time::LocalDate;

use crate::common::{assert_epoch_close, hours_between, MMT, NIGHT_2016_02_09};

#[test]
fn night_of_2016_02_09() {
    let night = &*NIGHT_2016_02_09;

    assert_eq!(night.observation_date().to_string(), "2016/02/09");
    assert_eq!(
        night.anchor(),
        Epoch::from_gregorian_utc_hms(2016, 2, 9, 19, 0, 0)
    );

    // 18:06 and 07:13 MST
    assert_epoch_close(
        night.sunset(),
        Epoch::from_gregorian_utc_hms(2016, 2, 10, 1, 6, 0),
        15.0,
    );
    assert_epoch_close(
        night.sunrise(),
        Epoch::from_gregorian_utc_hms(2016, 2, 10, 14, 13, 0),
        15.0,
    );

    // nautical twilight: 18:59 and 06:20 MST
    assert_epoch_close(
        night.evening_twilight(),
        Epoch::from_gregorian_utc_hms(2016, 2, 10, 1, 59, 0),
        15.0,
    );
    assert_epoch_close(
        night.morning_twilight(),
        Epoch::from_gregorian_utc_hms(2016, 2, 10, 13, 20, 0),
        15.0,
    );
}

#[test]
fn events_are_ordered_within_the_night() {
    let night = &*NIGHT_2016_02_09;

    assert!(night.anchor() < night.sunset());
    assert!(night.sunset() < night.evening_twilight());
    assert!(night.evening_twilight() < night.morning_twilight());
    assert!(night.morning_twilight() < night.sunrise());
    assert!(hours_between(night.sunset(), night.sunrise()) < 24.0);

    let duration = night.duration_hours();
    assert!(duration > 12.0 && duration < 14.0, "night lasts {duration} h");

    for event in [
        night.sunset(),
        night.sunrise(),
        night.evening_twilight(),
        night.morning_twilight(),
        night.moonrise(),
        night.moonset(),
    ] {
        let delay = hours_between(night.anchor(), event);
        assert!(delay > 0.0 && delay < 36.0, "{event} is {delay} h after the anchor");
    }
}

#[test]
fn darker_twilight_shortens_the_dark_time() {
    let civil = MmtEphem::new(ObservingConfig {
        twilight: Horizon::CivilTwilight,
        ..ObservingConfig::default()
    })
    .unwrap();
    let astronomical = MmtEphem::new(ObservingConfig {
        twilight: Horizon::AstronomicalTwilight,
        ..ObservingConfig::default()
    })
    .unwrap();

    let date = LocalDate::new(2016, 2, 9).unwrap();
    let civil = civil.compute_night(date).unwrap();
    let astronomical = astronomical.compute_night(date).unwrap();
    let nautical = &*NIGHT_2016_02_09;

    assert!(civil.dark_hours() > nautical.dark_hours());
    assert!(nautical.dark_hours() > astronomical.dark_hours());

    // sunset, sunrise and the Moon do not depend on the twilight horizon
    assert_eq!(civil.sunset(), nautical.sunset());
    assert_eq!(astronomical.sunrise(), nautical.sunrise());
    assert_eq!(civil.moonrise(), nautical.moonrise());
    assert_eq!(astronomical.moonset(), nautical.moonset());
}

#[test]
fn nights_follow_the_seasons() {
    let winter = MMT.compute_night("2016/12/21".parse().unwrap()).unwrap();
    let summer = MMT.compute_night("2016-06-20".parse().unwrap()).unwrap();

    // about 13.9 h and 9.8 h at +31.7°
    assert!(winter.duration_hours() > 13.5 && winter.duration_hours() < 14.3);
    assert!(summer.duration_hours() > 9.3 && summer.duration_hours() < 10.3);
}

#[test]
fn night_is_reproducible() {
    let again = MMT
        .compute_night("2016/02/09 19:00".parse().unwrap())
        .unwrap();
    assert_eq!(again, *NIGHT_2016_02_09);
}
