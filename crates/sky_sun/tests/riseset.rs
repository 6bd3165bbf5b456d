use proptest::prelude::*;
use sky_site::SiteContext;
use sky_sun::{
    PolarCondition, RiseSetConfig, RiseSetEvent, SunError, solar_noon, sun_apparent, sun_event,
    sun_events_for_day, sun_rise_set,
};
use sky_time::julian::civil_to_j2k_days;
use sky_time::{CalendarDate, DeltaTs, TimeContext};

fn day(year: i32, month: u32, d: u32, tz: f64) -> TimeContext {
    TimeContext::with_deltas(
        &CalendarDate::date(year, month, d),
        tz,
        DeltaTs::from_leap_seconds(37.0, 0.0).unwrap(),
    )
    .unwrap()
}

#[test]
fn equinox_rise_and_set_straddle_noon() {
    let site = SiteContext::new(40.0, 0.0, 0.0).unwrap();
    let time = day(2024, 3, 20, 0.0);
    let (rise, set) = sun_rise_set(&time, &site, &RiseSetConfig::default()).unwrap();
    let noon = solar_noon(&time, &site).unwrap();

    let asymmetry_min = ((rise.j2k_utc_days + set.j2k_utc_days) / 2.0 - noon.j2k_utc_days) * 1440.0;
    assert!(asymmetry_min.abs() < 2.0, "asymmetry {asymmetry_min} min");

    let day_length_h = (set.j2k_utc_days - rise.j2k_utc_days) * 24.0;
    assert!((day_length_h - 12.15).abs() < 0.1, "day length {day_length_h} h");

    assert!((rise.position.azimuth_deg() - 90.0).abs() < 2.0);
    assert!((set.position.azimuth_deg() - 270.0).abs() < 2.0);
    assert!((-1.0..0.5).contains(&rise.position.elevation_deg()));
}

#[test]
fn noon_is_on_the_meridian() {
    let site = SiteContext::new(40.0, 0.0, 0.0).unwrap();
    let noon = solar_noon(&day(2024, 3, 20, 0.0), &site).unwrap();
    assert!((noon.position.azimuth_deg() - 180.0).abs() < 0.01);
    assert!((noon.position.elevation_deg() - 50.0).abs() < 0.3);
    // Equation of time near the equinox: about 7.5 min late.
    let late_min = (noon.j2k_utc_days - civil_to_j2k_days(2024, 3, 20, 43_200.0)) * 1440.0;
    assert!((late_min - 7.5).abs() < 1.0, "{late_min} min");
}

#[test]
fn new_delhi_sunrise() {
    let mut site = SiteContext::new(28.6139, 77.2090, 0.0).unwrap();
    site.set_timezone(5.5).unwrap();
    let (rise, _) = sun_rise_set(&day(2024, 3, 20, 5.5), &site, &RiseSetConfig::default()).unwrap();
    let utc_min = (rise.j2k_utc_days - civil_to_j2k_days(2024, 3, 20, 0.0)) * 1440.0;
    assert!((utc_min - 55.0).abs() < 3.0, "sunrise at {utc_min} min after 0h UTC");
    let local = rise.local_time(5.5);
    assert_eq!((local.year, local.month, local.day, local.hour), (2024, 3, 20, 6));
}

#[test]
fn date_line_site_keeps_its_local_date() {
    // Kiritimati keeps UTC+14 at 157.4° W: local clock runs a day ahead of
    // the longitude's mean solar time.
    let mut site = SiteContext::new(1.87, -157.4, 0.0).unwrap();
    site.set_timezone(14.0).unwrap();
    let time = TimeContext::with_deltas(
        &CalendarDate::new(2024, 3, 20, 12, 0, 0.0),
        14.0,
        DeltaTs::from_leap_seconds(37.0, 0.0).unwrap(),
    )
    .unwrap();

    let (rise, set) = sun_rise_set(&time, &site, &RiseSetConfig::default()).unwrap();
    let noon = solar_noon(&time, &site).unwrap();
    let local = |e: &sky_sun::SolarEvent| {
        let c = e.local_time(14.0);
        (c.year, c.month, c.day, c.hour)
    };
    assert_eq!(local(&rise), (2024, 3, 20, 6), "{:?}", rise.local_time(14.0));
    assert_eq!(local(&noon), (2024, 3, 20, 12), "{:?}", noon.local_time(14.0));
    assert_eq!(local(&set), (2024, 3, 20, 18), "{:?}", set.local_time(14.0));
    assert!(rise.j2k_utc_days < noon.j2k_utc_days && noon.j2k_utc_days < set.j2k_utc_days);
}

#[test]
fn polar_night_and_midnight_sun() {
    let site = SiteContext::new(78.0, 15.0, 0.0).unwrap();
    let config = RiseSetConfig::default();
    assert_eq!(
        sun_rise_set(&day(2024, 12, 21, 0.0), &site, &config),
        Err(SunError::NoCrossing(PolarCondition::PolarNight))
    );
    assert_eq!(
        sun_rise_set(&day(2024, 6, 21, 0.0), &site, &config),
        Err(SunError::NoCrossing(PolarCondition::MidnightSun))
    );
    // Noon altitude ≈ −11.4°: astronomical twilight still happens.
    let astro = sun_event(&day(2024, 12, 21, 0.0), &site, RiseSetEvent::AstronomicalDawn, &config);
    assert!(astro.is_ok(), "{astro:?}");
}

#[test]
fn events_are_chronological() {
    let site = SiteContext::new(51.48, -0.0015, 45.0).unwrap();
    let events = sun_events_for_day(&day(2024, 10, 4, 0.0), &site, &RiseSetConfig::default());
    assert_eq!(events.len(), 8);
    let times: Vec<f64> = events
        .iter()
        .map(|(e, r)| r.as_ref().map(|ev| ev.j2k_utc_days).unwrap_or_else(|err| panic!("{e:?}: {err}")))
        .collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]), "{times:?}");
}

#[test]
fn invalid_config_is_rejected() {
    let site = SiteContext::new(10.0, 10.0, 0.0).unwrap();
    let config = RiseSetConfig {
        semidiameter_arcmin: f64::NAN,
        ..Default::default()
    };
    assert!(matches!(
        sun_rise_set(&day(2024, 1, 1, 0.0), &site, &config),
        Err(SunError::InvalidConfig { field: "semidiameter_arcmin", .. })
    ));
}

proptest! {
    #[test]
    fn sun_stays_on_its_orbit(days in -36_525.0f64..36_525.0) {
        let time = TimeContext::from_j2k_utc(days, DeltaTs::builtin(days)).unwrap();
        let sun = sun_apparent(&time);
        let (_, dec) = sun.ra_dec();
        prop_assert!((0.983..1.0168).contains(&sun.distance_au));
        prop_assert!(dec.to_degrees().abs() < 23.5);
        prop_assert!((sun.vector.norm() - 1.0).abs() < 1e-12);
    }
}
