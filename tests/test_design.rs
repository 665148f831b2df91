use chrono::NaiveTime;

use pv_row_spacing::design::*;
use pv_row_spacing::error::Error;
use pv_row_spacing::regions::RegionCatalog;
use pv_row_spacing::types::{
    ConstraintStatus, GeoLocation, HeightSource, MarginConfig, PanelGeometry, ShadowLength,
};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

const REGIONS_JSON: &str = r#"{
  "regions": [
    { "id": "sapporo", "lat": 43.06, "lon": 141.35, "nameJa": "北海道" },
    { "id": "tokyo", "lat": 35.68, "lon": 139.77, "nameJa": "東京都" },
    { "id": "naha", "lat": 26.21, "lon": 127.68, "nameJa": "沖縄県", "note": "ignored" }
  ]
}"#;

fn tokyo() -> GeoLocation {
    GeoLocation::new(35.68, 139.77).unwrap()
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

// ── Defaults ──

#[test]
fn test_default_conditions() {
    let c = DesignConditions::default();
    assert_eq!(c.region_id, "tokyo");
    assert_eq!(c.time, "12:00");
    assert_eq!(c.panel_azimuth, 180.0);
    assert_eq!(c.height, HeightSource::Panel(PanelGeometry::default()));
    assert_eq!(c.margin, MarginConfig::Factor(1.0));
}

// ── Tokyo noon scenario ──

#[test]
fn test_tokyo_noon_south_facing() {
    let r = evaluate(&DesignConditions::default(), &tokyo(), noon());
    assert_approx!(r.solar_position.altitude, 30.9, 0.5);
    assert_approx!(r.solar_position.azimuth, 180.0, 6.0);
    assert_approx!(r.shadow.azimuth_diff, 0.0, 6.0);
    assert_approx!(r.top_height_m, 2.158, 0.001);

    let basic = r.shadow.basic.meters().unwrap();
    let expected = r.top_height_m / r.solar_position.altitude.to_radians().tan();
    assert_approx!(basic, expected, 1e-9);
    assert!(r.shadow.row <= basic);
    assert!(r.shadow.row / basic > 0.99);
    assert_eq!(r.spacing.recommended_spacing, r.shadow.row);
    assert_eq!(r.spacing.status, ConstraintStatus::Valid);
}

#[test]
fn test_direct_height_with_fixed_margin() {
    let conditions = DesignConditions {
        height: HeightSource::Direct { height_m: 1.5 },
        margin: MarginConfig::Fixed(0.5),
        ..DesignConditions::default()
    };
    let r = evaluate(&conditions, &tokyo(), noon());
    assert_eq!(r.top_height_m, 1.5);
    assert_approx!(r.spacing.recommended_spacing, r.shadow.row + 0.5, 1e-12);
}

// ── Degenerate states ──

#[test]
fn test_invalid_geometry_status() {
    let conditions = DesignConditions {
        height: HeightSource::Panel(PanelGeometry {
            panel_length_mm: 0.0,
            ..PanelGeometry::default()
        }),
        ..DesignConditions::default()
    };
    let r = evaluate(&conditions, &tokyo(), noon());
    assert_eq!(r.top_height_m, 0.0);
    assert_eq!(r.shadow.basic, ShadowLength::Finite(0.0));
    assert_eq!(r.spacing.recommended_spacing, 0.0);
    assert_eq!(r.spacing.status, ConstraintStatus::InvalidGeometry);
}

#[test]
fn test_polar_night_status() {
    let arctic = GeoLocation::new(70.0, 135.0).unwrap();
    let r = evaluate(&DesignConditions::default(), &arctic, noon());
    assert_eq!(r.solar_position.altitude, 0.0);
    assert_eq!(r.solar_position.azimuth, 0.0);
    assert!(r.shadow.basic.is_unbounded());
    assert!(r.shadow.is_backside);
    assert_eq!(r.spacing.recommended_spacing, 0.0);
    assert_eq!(r.spacing.status, ConstraintStatus::NightNoConstraint);
}

#[test]
fn test_polar_night_with_fixed_margin() {
    let arctic = GeoLocation::new(70.0, 135.0).unwrap();
    let conditions = DesignConditions {
        margin: MarginConfig::Fixed(0.5),
        ..DesignConditions::default()
    };
    let r = evaluate_at_label(&conditions, &arctic, "12:00").unwrap();
    assert_eq!(r.spacing.recommended_spacing, 0.0);
    assert_eq!(r.spacing.status, ConstraintStatus::NightNoConstraint);
}

#[test]
fn test_invalid_geometry_dominates_night() {
    let arctic = GeoLocation::new(70.0, 135.0).unwrap();
    let conditions = DesignConditions {
        height: HeightSource::Panel(PanelGeometry {
            bottom_clearance_mm: -10.0,
            ..PanelGeometry::default()
        }),
        ..DesignConditions::default()
    };
    let r = evaluate(&conditions, &arctic, noon());
    assert_eq!(r.shadow.status, ConstraintStatus::InvalidGeometry);
}

// ── Time labels ──

#[test]
fn test_evaluate_at_label() {
    let r = evaluate_at_label(&DesignConditions::default(), &tokyo(), "10:00").unwrap();
    assert_eq!(r.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    assert_eq!(r.solar_position.hour, 10.0);
}

#[test]
fn test_label_outside_grid_rejected() {
    let c = DesignConditions::default();
    assert!(matches!(
        evaluate_at_label(&c, &tokyo(), "12:30"),
        Err(Error::TimeNotInGrid(_))
    ));
    assert!(matches!(
        evaluate_at_label(&c, &tokyo(), "16:00"),
        Err(Error::TimeNotInGrid(_))
    ));
    assert!(matches!(
        evaluate_at_label(&c, &tokyo(), "later"),
        Err(Error::InvalidTimeLabel(_))
    ));
}

// ── Saved conditions ──

#[test]
fn test_conditions_from_json() {
    let json = r#"{
        "region_id": "sapporo",
        "time": "10:00",
        "panel_azimuth": 165,
        "height": { "source": "direct", "height_m": 1.8 },
        "margin": { "mode": "fixed", "value": 0.5 }
    }"#;
    let c = DesignConditions::from_json_str(json).unwrap();
    assert_eq!(c.region_id, "sapporo");
    assert_eq!(c.panel_azimuth, 165.0);
    assert_eq!(c.height, HeightSource::Direct { height_m: 1.8 });
    assert_eq!(c.margin, MarginConfig::Fixed(0.5));
}

#[test]
fn test_conditions_panel_source_from_json() {
    let json = r#"{
        "height": {
            "source": "panel",
            "panel_length_mm": 1722,
            "vertical_count": 3,
            "tilt_deg": 10,
            "bottom_clearance_mm": 500
        }
    }"#;
    let c = DesignConditions::from_json_str(json).unwrap();
    assert_eq!(
        c.height,
        HeightSource::Panel(PanelGeometry {
            panel_length_mm: 1722.0,
            vertical_count: 3,
            tilt_deg: 10.0,
            bottom_clearance_mm: 500.0,
        })
    );
}

#[test]
fn test_partial_conditions_fill_defaults() {
    let c = DesignConditions::from_json_str(r#"{ "time": "14:00" }"#).unwrap();
    assert_eq!(c.time, "14:00");
    assert_eq!(c.region_id, "tokyo");
    assert_eq!(c.margin, MarginConfig::Factor(1.0));
}

#[test]
fn test_conditions_survive_save_and_load() {
    let c = DesignConditions {
        region_id: "naha".to_string(),
        margin: MarginConfig::Fixed(0.75),
        ..DesignConditions::default()
    };
    let saved = c.to_json_string().unwrap();
    assert_eq!(DesignConditions::from_json_str(&saved).unwrap(), c);
}

#[test]
fn test_unknown_margin_mode_in_json_rejected() {
    let json = r#"{ "margin": { "mode": "percent", "value": 10 } }"#;
    assert!(matches!(DesignConditions::from_json_str(json), Err(Error::Json(_))));
}

// ── Region dataset ──

#[test]
fn test_region_lookup() {
    let catalog = RegionCatalog::from_json_str(REGIONS_JSON).unwrap();
    assert_eq!(catalog.regions.len(), 3);
    let tokyo = catalog.find("tokyo").unwrap();
    assert_eq!(tokyo.name, "東京都");
    assert_eq!(catalog.locate("sapporo").unwrap(), GeoLocation::new(43.06, 141.35).unwrap());
}

#[test]
fn test_unknown_region() {
    let catalog = RegionCatalog::from_json_str(REGIONS_JSON).unwrap();
    assert!(matches!(catalog.find("atlantis"), Err(Error::UnknownRegion(ref id)) if id == "atlantis"));
}

#[test]
fn test_region_with_bad_coordinates_rejected() {
    let json = r#"{ "regions": [ { "id": "x", "lat": 95.0, "lon": 0.0, "nameJa": "x" } ] }"#;
    assert!(matches!(RegionCatalog::from_json_str(json), Err(Error::InvalidLatitude(_))));
}

#[test]
fn test_region_drives_evaluation() {
    let catalog = RegionCatalog::from_json_str(REGIONS_JSON).unwrap();
    let c = DesignConditions::default();
    let loc = catalog.locate(&c.region_id).unwrap();
    let r = evaluate_at_label(&c, &loc, &c.time).unwrap();
    assert_eq!(r.location, tokyo());
}
