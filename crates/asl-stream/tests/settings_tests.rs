use asl_stream::{Settings, SettingsErrorReason, SettingsStore};

#[test]
fn test_defaults() {
    let settings = SettingsStore::default().snapshot();
    assert_eq!(settings.confidence_threshold, 0.5);
    assert_eq!(settings.zoom_factor, 1.0);
}

#[test]
fn test_threshold_accepts_closed_unit_interval() {
    let store = SettingsStore::default();
    for value in [0.0, 1.0, 0.5] {
        let settings = store.set_threshold(value).unwrap();
        assert_eq!(settings.confidence_threshold, value);
        assert_eq!(store.snapshot().confidence_threshold, value);
    }
}

#[test]
fn test_threshold_rejections_keep_prior_value() {
    let store = SettingsStore::default();
    store.set_threshold(0.7).unwrap();
    for value in [-0.1, 1.1] {
        let err = store.set_threshold(value).unwrap_err();
        assert_eq!(err.reason, SettingsErrorReason::ThresholdOutOfRange);
        assert_eq!(err.reason.code(), "threshold_out_of_range");
        assert_eq!(err.to_string(), "Threshold must be between 0 and 1");
    }
    let err = store.set_threshold(f32::NAN).unwrap_err();
    assert_eq!(err.reason, SettingsErrorReason::NotFinite);
    assert_eq!(store.snapshot().confidence_threshold, 0.7);
}

#[test]
fn test_zoom_rejections_keep_prior_value() {
    let store = SettingsStore::default();
    store.set_zoom(2.5).unwrap();
    for value in [0.0, -2.0] {
        let err = store.set_zoom(value).unwrap_err();
        assert_eq!(err.reason, SettingsErrorReason::ZoomNotPositive);
        assert_eq!(err.reason.code(), "zoom_not_positive");
    }
    assert_eq!(
        store.set_zoom(f32::INFINITY).unwrap_err().reason,
        SettingsErrorReason::NotFinite
    );
    assert_eq!(store.snapshot().zoom_factor, 2.5);
}

#[test]
fn test_writes_are_independent() {
    let store = SettingsStore::default();
    store.set_zoom(0.5).unwrap();
    let settings = store.set_threshold(0.9).unwrap();
    assert_eq!(
        settings,
        Settings {
            confidence_threshold: 0.9,
            zoom_factor: 0.5
        }
    );
}

#[test]
fn test_validated_constructor() {
    assert!(Settings::new(0.3, 1.5).is_ok());
    assert!(Settings::new(1.3, 1.5).is_err());
    assert!(Settings::new(0.3, 0.0).is_err());
}

#[test]
fn test_last_write_wins_across_threads() {
    let store = std::sync::Arc::new(SettingsStore::default());
    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                store.set_zoom(i as f32).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let zoom = store.snapshot().zoom_factor;
    assert!((1.0..=8.0).contains(&zoom));
    assert_eq!(zoom.fract(), 0.0);
}
