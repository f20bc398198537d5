use super::*;

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = OutlineTaskConfig::from_json_str(
        r#"{
            "groups": [
                { "width": 3.0, "glow": true },
                { "color": { "r": 0.0, "g": 1.0, "b": 0.0 }, "occluded_fill_opacity": 0.5 }
            ],
            "debug": { "view_mask": true }
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.groups.len(), 2);
    assert_eq!(cfg.groups[0].width, 3.0);
    assert!(cfg.groups[0].glow);
    assert_eq!(cfg.groups[0].intensity, 0.9);
    assert_eq!(cfg.groups[1].color, Rgb::new(0.0, 1.0, 0.0));
    assert_eq!(cfg.groups[1].occluded_fill_opacity, 0.5);
    assert!(cfg.debug.view_mask);
}

#[test]
fn missing_groups_use_default_style() {
    let cfg = OutlineTaskConfig::default();
    assert_eq!(cfg.group(5), OutlineConfig::default());
}

#[test]
fn too_many_groups_are_rejected() {
    let cfg = OutlineTaskConfig {
        groups: vec![OutlineConfig::default(); MAX_OUTLINE_COUNT + 1],
        ..OutlineTaskConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("at most"));
}

#[test]
fn invalid_group_values_are_reported_with_index() {
    let mut cfg = OutlineTaskConfig::default();
    cfg.groups.push(OutlineConfig::default());
    cfg.groups.push(OutlineConfig {
        unoccluded_fill_opacity: 1.5,
        ..OutlineConfig::default()
    });
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("group 1"));

    let cfg = OutlineConfig {
        width: f32::NAN,
        ..OutlineConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = OutlineTaskConfig::from_json_str("{ \"groups\": 3 }").unwrap_err();
    assert!(matches!(err, OutlineError::Serde(_)));
}

#[test]
fn json_roundtrip_preserves_config() {
    let cfg = OutlineTaskConfig {
        groups: vec![OutlineConfig {
            width: 1.5,
            ..OutlineConfig::default()
        }],
        debug: DebugOutlineConfig { view_mask: true },
    };
    let s = cfg.to_json_string().unwrap();
    assert_eq!(OutlineTaskConfig::from_json_str(&s).unwrap(), cfg);
}

#[test]
fn color_components_above_one_are_rejected() {
    let err = OutlineTaskConfig::from_json_str(
        r#"{ "groups": [{ "color": { "r": 2.0, "g": 0.5, "b": 0.5 } }] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, OutlineError::Validation(_)));
    assert!(err.to_string().contains("group 0"));
}
