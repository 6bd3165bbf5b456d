use sky_fast::{
    ApparentSource, CacheStatus, FastCache, FastCacheConfig, FastCacheError, MoonSource,
    RefreshOutcome, StalePolicy, SunSource, WindowState,
};
use sky_frames::{ARCSEC_TO_RAD, angular_separation};
use sky_moon::{moon_apparent, moon_topocentric};
use sky_site::SiteContext;
use sky_star::{CatalogPosition, CoordSystem, catalog_to_apparent, catalog_to_topocentric};
use sky_sun::{SolarModel, sun_apparent, sun_apparent_spa, sun_topocentric};
use sky_time::{CalendarDate, DeltaTs, TimeContext};

fn deltas() -> DeltaTs {
    DeltaTs::from_leap_seconds(37.0, 0.05).unwrap()
}

fn at(date: CalendarDate) -> TimeContext {
    TimeContext::with_deltas(&date, 0.0, deltas()).unwrap()
}

fn exact(utc: f64) -> TimeContext {
    TimeContext::from_j2k_utc(utc, deltas()).unwrap()
}

fn munich() -> SiteContext {
    SiteContext::new(48.14, 11.58, 520.0).unwrap()
}

#[test]
fn sun_interpolation_stays_within_its_bound() {
    let t0 = at(CalendarDate::date(2024, 10, 4));
    let cache = FastCache::init(SunSource, &t0, FastCacheConfig::with_window_minutes(360.0)).unwrap();
    let site = munich();
    // Both sample pairs, 20 minutes apart.
    for step in 0..=36 {
        let utc = t0.j2k_utc_days() + f64::from(step) / 72.0;
        let approx = cache.get_approx(utc, &site).unwrap();
        assert_eq!(approx.status, CacheStatus::Valid);
        let time = exact(utc);

        let geo = angular_separation(&approx.apparent.vector, &sun_apparent(&time).vector);
        assert!(geo <= approx.error_bound_rad, "step {step}: {geo} > {}", approx.error_bound_rad);
        assert!(approx.error_bound_rad < 0.05 * ARCSEC_TO_RAD);

        let topo = angular_separation(
            &approx.topocentric.horizon.vector,
            &sun_topocentric(&time, &site).horizon.vector,
        );
        assert!(topo < 0.05 * ARCSEC_TO_RAD, "step {step}: {topo} rad");
    }
}

#[test]
fn moon_interpolation_stays_within_its_bound() {
    let t0 = at(CalendarDate::new(2024, 10, 17, 18, 0, 0.0));
    let cache = FastCache::init(MoonSource, &t0, FastCacheConfig::with_window_minutes(60.0)).unwrap();
    let site = munich();
    for step in 0..=24 {
        let utc = t0.j2k_utc_days() + f64::from(step) / 288.0;
        let approx = cache.get_approx(utc, &site).unwrap();
        let time = exact(utc);

        let geo = angular_separation(&approx.apparent.vector, &moon_apparent(&time).vector);
        assert!(geo <= approx.error_bound_rad, "step {step}: {geo} > {}", approx.error_bound_rad);
        assert!(approx.error_bound_rad < ARCSEC_TO_RAD);

        // The diurnal parallax (about 1°) is applied at the query instant.
        let topo = angular_separation(
            &approx.topocentric.horizon.vector,
            &moon_topocentric(&time, &site).horizon.vector,
        );
        assert!(topo < ARCSEC_TO_RAD, "step {step}: {topo} rad");
    }
}

#[test]
fn spa_sun_is_a_source() {
    let t0 = at(CalendarDate::date(2024, 6, 21));
    let cache =
        FastCache::init(SolarModel::Spa, &t0, FastCacheConfig::with_window_minutes(360.0)).unwrap();
    assert_eq!(cache.source().name(), "Sun");
    for step in 0..=12 {
        let utc = t0.j2k_utc_days() + f64::from(step) / 24.0;
        let approx = cache.get_approx(utc, &munich()).unwrap();
        let geo = angular_separation(&approx.apparent.vector, &sun_apparent_spa(&exact(utc)).vector);
        assert!(geo <= approx.error_bound_rad, "step {step}: {geo}");
    }
}

#[test]
fn extrapolation_error_and_bound_grow() {
    let t0 = at(CalendarDate::new(2024, 10, 4, 12, 0, 0.0));
    let config = FastCacheConfig {
        window_minutes: 1440.0,
        stale_policy: StalePolicy::Extrapolate { max_windows: 10.0 },
    };
    let cache = FastCache::init(SunSource, &t0, config).unwrap();
    let site = munich();

    let mut prev_err = 0.0;
    let mut prev_bound = 0.0;
    for u in [1.5, 2.0, 3.0, 5.0] {
        // Parameter `u` along the second pair, one day per unit.
        let utc = t0.j2k_utc_days() + 1.0 + u;
        let approx = cache.get_approx(utc, &site).unwrap();
        let CacheStatus::Extrapolated { windows_beyond } = approx.status else {
            panic!("u = {u}: {:?}", approx.status);
        };
        assert!((windows_beyond - (u - 1.0)).abs() < 1e-6);

        let err = angular_separation(&approx.apparent.vector, &sun_apparent(&exact(utc)).vector);
        assert!(err > prev_err, "u = {u}: {err} <= {prev_err}");
        assert!(approx.error_bound_rad > prev_bound);
        assert!(err <= approx.error_bound_rad, "u = {u}: {err} > {}", approx.error_bound_rad);
        prev_err = err;
        prev_bound = approx.error_bound_rad;
    }
}

#[test]
fn background_update_is_idempotent() {
    let t0 = at(CalendarDate::date(2024, 3, 1));
    let mut cache = FastCache::init(SunSource, &t0, FastCacheConfig::with_window_minutes(60.0)).unwrap();
    let later = t0.j2k_utc_days() + 1.5 / 24.0;

    assert!(cache.needs_refresh(later));
    assert_eq!(cache.background_update(later).unwrap(), RefreshOutcome::Advanced);
    let settled = *cache.state();
    assert!(!cache.needs_refresh(later));
    assert_eq!(cache.background_update(later).unwrap(), RefreshOutcome::Unchanged);
    assert_eq!(*cache.state(), settled);

    let far = t0.j2k_utc_days() + 3.0;
    assert_eq!(cache.background_update(far).unwrap(), RefreshOutcome::Reanchored);
    let settled = *cache.state();
    assert_eq!(cache.background_update(far).unwrap(), RefreshOutcome::Unchanged);
    assert_eq!(*cache.state(), settled);
}

#[test]
fn uninitialized_cache_refuses_queries() {
    let mut cache = FastCache::new(SunSource, FastCacheConfig::default()).unwrap();
    assert_eq!(cache.status(0.0), WindowState::Uninitialized);
    assert!(cache.needs_refresh(0.0));
    let err = cache.get_approx(0.0, &munich()).unwrap_err();
    assert_eq!(err, FastCacheError::Uninitialized);
    assert!(err.is_fatal());
    assert_eq!(cache.background_update(0.0), Err(FastCacheError::Uninitialized));

    cache.initialize(&exact(0.0)).unwrap();
    assert!(cache.get_approx(0.1, &munich()).is_ok());
}

#[test]
fn stale_query_recovers_after_refresh() {
    let t0 = at(CalendarDate::new(2025, 6, 21, 6, 0, 0.0));
    let mut cache = FastCache::init(SunSource, &t0, FastCacheConfig::with_window_minutes(60.0)).unwrap();
    let site = munich();
    let query = t0.j2k_utc_days() + 5.0 / 24.0;

    let err = cache.get_approx(query, &site).unwrap_err();
    let FastCacheError::Stale { query_tt_days, window_start, window_end } = err else {
        panic!("expected Stale, got {err:?}");
    };
    assert!(query_tt_days > window_end && window_start < window_end);
    assert!(!err.is_fatal());
    assert_eq!(cache.status(query), WindowState::Stale);

    assert_eq!(cache.background_update(query).unwrap(), RefreshOutcome::Reanchored);
    let approx = cache.get_approx(query, &site).unwrap();
    assert_eq!(approx.status, CacheStatus::Valid);
}

#[test]
fn non_finite_query_is_rejected() {
    let mut cache = FastCache::init(SunSource, &exact(0.0), FastCacheConfig::default()).unwrap();
    assert!(matches!(cache.get_approx(f64::NAN, &munich()), Err(FastCacheError::NonFinite(_))));
    assert!(matches!(cache.background_update(f64::INFINITY), Err(FastCacheError::NonFinite(_))));
}

#[test]
fn star_source_tracks_exact_reduction() {
    // θ Persei with its Hipparcos motion.
    let star = CatalogPosition::new(
        "theta Per",
        CoordSystem::Fk5,
        (41.054_6_f64).to_radians(),
        (49.227_3_f64).to_radians(),
    )
    .with_proper_motion(335.0, -89.0, 2000.0)
    .with_parallax(89.0);
    let t0 = at(CalendarDate::new(2028, 11, 13, 4, 0, 0.0));
    let cache = FastCache::init(&star, &t0, FastCacheConfig::default()).unwrap();
    let site = munich();

    for hours in [0.0, 3.0, 7.5, 12.0, 19.0] {
        let utc = t0.j2k_utc_days() + hours / 24.0;
        let approx = cache.get_approx(utc, &site).unwrap();
        let time = exact(utc);
        let geo = angular_separation(
            &approx.apparent.vector,
            &catalog_to_apparent(&star, &time).unwrap().vector,
        );
        assert!(geo <= approx.error_bound_rad, "{hours} h: {geo}");
        let topo = angular_separation(
            &approx.topocentric.horizon.vector,
            &catalog_to_topocentric(&star, &time, &site).unwrap().horizon.vector,
        );
        assert!(topo < 0.02 * ARCSEC_TO_RAD, "{hours} h: {topo}");
    }
}

#[test]
fn invalid_configuration_is_fatal() {
    let err = FastCache::new(SunSource, FastCacheConfig::with_window_minutes(0.0)).unwrap_err();
    assert!(err.is_fatal());
}
