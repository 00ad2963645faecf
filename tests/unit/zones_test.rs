//! Unit tests for zone calculations.

use lactate_zones::metrics::zones::{
    calculate_zones, find_zone, heart_rate_zones, ZoneColor, ZoneSystem, MAX_INTENSITY_FROM_LT2,
};

#[test]
fn test_three_zone_from_thresholds() {
    let zones = calculate_zones(200.0, 280.0, ZoneSystem::ThreeZone);
    let bounds: Vec<(f64, f64)> = zones.iter().map(|z| (z.lower_bound, z.upper_bound)).collect();

    assert_eq!(bounds[0], (0.0, 200.0));
    assert_eq!(bounds[1], (200.0, 280.0));
    assert_eq!(bounds[2].0, 280.0);
    assert!((bounds[2].1 - 280.0 * MAX_INTENSITY_FROM_LT2).abs() < 1e-9);
    assert!((bounds[2].1 - 322.0).abs() < 1e-9);
}

#[test]
fn test_three_zone_is_contiguous() {
    for (lt1, lt2) in [(200.0, 280.0), (12.0, 15.5), (0.0, 0.0), (300.0, 250.0)] {
        let zones = calculate_zones(lt1, lt2, ZoneSystem::ThreeZone);
        assert_eq!(zones[0].lower_bound, 0.0);
        for pair in zones.windows(2) {
            assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
        }
    }
}

#[test]
fn test_couzens_with_equal_thresholds() {
    let zones = calculate_zones(200.0, 200.0, ZoneSystem::Couzens);

    assert_eq!(zones.len(), 8);
    assert!(zones.iter().all(|z| z.lower_bound.is_finite() && z.upper_bound.is_finite()));
    // No span between thresholds collapses every offset to zero
    assert_eq!(zones[0].upper_bound, 200.0);
    assert_eq!(zones[5].lower_bound, 200.0);
    assert_eq!(zones[5].upper_bound, 200.0);
}

#[test]
fn test_zone_counts_for_degenerate_input() {
    let inputs = [(0.0, 0.0), (200.0, 200.0), (300.0, 200.0), (0.0, 1.0), (5000.0, 12.0)];

    for system in ZoneSystem::all() {
        for (lt1, lt2) in inputs {
            assert_eq!(calculate_zones(lt1, lt2, system).len(), system.zone_count());
        }
        assert_eq!(heart_rate_zones(0, 0, 0, system).len(), system.zone_count());
        assert_eq!(heart_rate_zones(180, 150, 160, system).len(), system.zone_count());
    }
}

#[test]
fn test_only_couzens_zone0_is_clamped() {
    // offset = (210 - 10) / 4 = 50, so LT1 - offset would be -40
    let zones = calculate_zones(10.0, 210.0, ZoneSystem::Couzens);
    assert_eq!(zones[0].upper_bound, 0.0);
    assert_eq!(zones[1].lower_bound, 0.0);

    // Inverted thresholds are passed through literally
    let zones = calculate_zones(300.0, 200.0, ZoneSystem::Touretski);
    assert!(zones[3].upper_bound < zones[3].lower_bound);
}

#[test]
fn test_speed_zones_overlap() {
    let touretski = calculate_zones(200.0, 280.0, ZoneSystem::Touretski);
    let sp = &touretski[6];
    assert_eq!(sp.name, "SP - Speed");
    assert!(sp.lower_bound < touretski[1].upper_bound);

    let couzens = calculate_zones(200.0, 280.0, ZoneSystem::Couzens);
    let z7 = &couzens[7];
    assert_eq!(z7.name, "Zone 7 - Speed");
    assert_eq!(z7.lower_bound, couzens[3].lower_bound);
    assert_eq!(z7.upper_bound, couzens[4].upper_bound);

    // Lists keep formula order, the last zone is not re-sorted
    assert_eq!(find_zone(&couzens, 240.0).unwrap().name, "Zone 3 - Moderate Aerobic");
}

#[test]
fn test_heart_rate_zones_three_zone() {
    let zones = heart_rate_zones(150, 172, 190, ZoneSystem::ThreeZone);

    assert_eq!(zones[0].lower_bound, 0.0);
    assert_eq!(zones[0].upper_bound, 150.0);
    assert_eq!(zones[1].upper_bound, 172.0);
    assert_eq!(zones[2].upper_bound, 190.0);
    assert_eq!(zones[2].description, "Above second threshold");
}

#[test]
fn test_couzens_heart_rate_zones() {
    let zones = heart_rate_zones(150, 172, 190, ZoneSystem::Couzens);
    let bounds: Vec<(f64, f64)> = zones.iter().map(|z| (z.lower_bound, z.upper_bound)).collect();

    assert_eq!(
        bounds,
        vec![
            (0.0, 140.0),
            (140.0, 150.0),
            (150.0, 160.0),
            (160.0, 162.0),
            (162.0, 172.0),
            (172.0, 185.0),
            (185.0, 190.0),
            (150.0, 172.0),
        ]
    );
}

#[test]
fn test_colors_come_from_palette() {
    for system in ZoneSystem::all() {
        let zones = calculate_zones(200.0, 280.0, system)
            .into_iter()
            .chain(heart_rate_zones(150, 172, 190, system));
        for zone in zones {
            assert!(ZoneColor::ALL.contains(&zone.color), "{} has unknown color", zone.name);
        }
    }
}

#[test]
fn test_zone_names_are_distinct_within_a_system() {
    for system in ZoneSystem::all() {
        let zones = calculate_zones(200.0, 280.0, system);
        let mut names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), system.zone_count());
    }
}
