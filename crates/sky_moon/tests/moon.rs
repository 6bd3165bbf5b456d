use proptest::prelude::*;
use sky_moon::{
    LunarCondition, MoonError, MoonEventKind, MoonRiseSetConfig, lunar_coordinates, moon_apparent,
    moon_event, moon_rise_set,
};
use sky_site::SiteContext;
use sky_time::{CalendarDate, DeltaTs, TimeContext};

fn day(year: i32, month: u32, d: u32, tz: f64) -> TimeContext {
    TimeContext::with_deltas(
        &CalendarDate::date(year, month, d),
        tz,
        DeltaTs::from_leap_seconds(37.0, 0.0).unwrap(),
    )
    .unwrap()
}

fn munich() -> SiteContext {
    let mut site = SiteContext::new(48.14, 11.58, 520.0).unwrap();
    site.set_timezone(2.0).unwrap();
    site
}

fn minutes_after_local_midnight(utc: f64, tz: f64) -> f64 {
    let local = utc + tz / 24.0 + 0.5;
    (local - local.floor()) * 1440.0
}

#[test]
fn full_moon_rises_at_dusk() {
    // 2024 October 17, full Moon: rises 18:06, sets 07:29 CEST.
    let (rise, set) = moon_rise_set(&day(2024, 10, 17, 2.0), &munich(), &MoonRiseSetConfig::default())
        .unwrap();
    let rise = rise.expect("moonrise");
    let set = set.expect("moonset");
    let rise_min = minutes_after_local_midnight(rise.j2k_utc_days, 2.0);
    let set_min = minutes_after_local_midnight(set.j2k_utc_days, 2.0);
    assert!((rise_min - 1086.4).abs() < 3.0, "rise {rise_min} min");
    assert!((set_min - 449.4).abs() < 3.0, "set {set_min} min");

    assert!((0.0..180.0).contains(&rise.position.azimuth_deg()));
    assert!((180.0..360.0).contains(&set.position.azimuth_deg()));
    // Upper limb on the refracted horizon, 520 m dip included.
    let centre = rise.position.horizon.geometric_elevation_rad.to_degrees();
    assert!((-1.7..-1.4).contains(&centre), "centre at {centre}°");
    assert_eq!(rise.kind, MoonEventKind::Moonrise);
    assert_eq!(rise.local_time(2.0).day, 17);
}

#[test]
fn one_moonrise_and_one_moonset_go_missing_in_a_month() {
    let site = munich();
    let config = MoonRiseSetConfig::default();
    let mut rises = Vec::new();
    let mut missing_rise = Vec::new();
    let mut missing_set = Vec::new();
    for d in 1..=31 {
        let (rise, set) = moon_rise_set(&day(2024, 10, d, 2.0), &site, &config).unwrap();
        match rise {
            Some(r) => rises.push(r.j2k_utc_days),
            None => missing_rise.push(d),
        }
        if set.is_none() {
            missing_set.push(d);
        }
    }
    assert_eq!(missing_rise, [25]);
    assert_eq!(missing_set, [11]);
    // Moonrise comes on average about 50 minutes later each day.
    let gaps: Vec<f64> = rises.windows(2).map(|w| (w[1] - w[0]) * 1440.0 - 1440.0).collect();
    assert!(gaps.iter().all(|g| (10.0..90.0).contains(g)), "{gaps:?}");
    let mean = (rises[rises.len() - 1] - rises[0]) / (rises.len() - 1) as f64 * 1440.0 - 1440.0;
    assert!((mean - 50.0).abs() < 10.0, "mean delay {mean} min");
}

#[test]
fn missing_event_reports_its_condition() {
    let site = munich();
    let config = MoonRiseSetConfig::default();
    assert_eq!(
        moon_event(&day(2024, 10, 25, 2.0), &site, MoonEventKind::Moonrise, &config),
        Err(MoonError::NoCrossing {
            kind: MoonEventKind::Moonrise,
            condition: LunarCondition::NotOnDate,
        })
    );
}

#[test]
fn arctic_moon_stays_up_or_down() {
    let site = SiteContext::new(78.22, 15.65, 0.0).unwrap();
    let config = MoonRiseSetConfig::default();
    assert_eq!(
        moon_event(&day(2024, 10, 8, 0.0), &site, MoonEventKind::Moonrise, &config),
        Err(MoonError::NoCrossing {
            kind: MoonEventKind::Moonrise,
            condition: LunarCondition::AlwaysBelow,
        })
    );
    assert_eq!(
        moon_event(&day(2024, 10, 22, 0.0), &site, MoonEventKind::Moonset, &config),
        Err(MoonError::NoCrossing {
            kind: MoonEventKind::Moonset,
            condition: LunarCondition::AlwaysAbove,
        })
    );
    assert_eq!(moon_rise_set(&day(2024, 10, 8, 0.0), &site, &config), Ok((None, None)));
}

#[test]
fn invalid_config_is_an_error_not_a_missing_event() {
    let config = MoonRiseSetConfig {
        scan_step_minutes: 500.0,
        ..Default::default()
    };
    assert!(matches!(
        moon_rise_set(&day(2024, 10, 17, 2.0), &munich(), &config),
        Err(MoonError::InvalidConfig { field: "scan_step_minutes", .. })
    ));
}

proptest! {
    #[test]
    fn moon_stays_on_its_orbit(days in -36_525.0f64..36_525.0) {
        let t = days / 36_525.0;
        let m = lunar_coordinates(t);
        prop_assert!((356_000.0..407_000.0).contains(&m.distance_km), "{}", m.distance_km);
        prop_assert!(m.latitude_rad.to_degrees().abs() < 5.4);

        let time = TimeContext::from_j2k_utc(days, DeltaTs::builtin(days)).unwrap();
        let moon = moon_apparent(&time);
        let (_, dec) = moon.ra_dec();
        prop_assert!(dec.to_degrees().abs() < 29.0);
        prop_assert!((moon.vector.norm() - 1.0).abs() < 1e-12);
    }
}
