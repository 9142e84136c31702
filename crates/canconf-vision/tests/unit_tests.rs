//! Camera behaviour against a shared in-memory table.

use std::sync::Arc;

use canconf_vision::{
    CameraMode, InMemoryTable, LightMode, NetworkTable, TargetReading, VisionCamera,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_peer_updates_are_visible_to_camera() {
    let table = Arc::new(InMemoryTable::new());
    let camera = VisionCamera::new(Arc::clone(&table));

    table.set_number("limelight", "tv", 1.0);
    table.set_number("limelight", "tx", 8.5);
    table.set_number("limelight", "ta", 2.75);
    table.set_number("limelight", "tl", 11.0);

    assert_eq!(
        camera.reading(),
        TargetReading {
            horizontal_offset: 8.5,
            vertical_offset: 0.0,
            area: 2.75,
            skew: 0.0,
            latency_ms: 11.0,
            has_target: true,
        }
    );
}

#[test]
fn test_settings_are_published_as_codes() -> TestResult {
    let table = Arc::new(InMemoryTable::new());
    let camera = VisionCamera::new(Arc::clone(&table));

    camera.set_light_mode(LightMode::Off);
    camera.set_camera_mode(CameraMode::Driver);
    camera.set_pipeline(7)?;

    assert_eq!(table.get_number("limelight", "ledMode"), Some(1.0));
    assert_eq!(table.get_number("limelight", "camMode"), Some(1.0));
    assert_eq!(table.get_number("limelight", "pipeline"), Some(7.0));
    assert_eq!(camera.light_mode(), Some(LightMode::Off));
    assert_eq!(camera.camera_mode(), Some(CameraMode::Driver));
    Ok(())
}

#[test]
fn test_rejected_pipeline_leaves_table_untouched() {
    let table = Arc::new(InMemoryTable::new());
    let camera = VisionCamera::new(Arc::clone(&table));

    let err = camera.set_pipeline(12);
    assert!(err.is_err());
    assert!(table.is_empty());
    if let Err(err) = err {
        assert_eq!(err.to_string(), "pipeline value 12 is out of range [0, 9]");
    }
}

#[test]
fn test_two_cameras_on_one_store() -> TestResult {
    let table = Arc::new(InMemoryTable::new());
    let front = VisionCamera::with_table_name(Arc::clone(&table), "limelight-front");
    let rear = VisionCamera::new(Arc::clone(&table));

    front.set_pipeline(2)?;
    rear.set_pipeline(5)?;

    assert_eq!(front.pipeline(), Some(2));
    assert_eq!(rear.pipeline(), Some(5));
    assert_eq!(
        table.keys("limelight-front"),
        vec!["pipeline".to_string()]
    );
    Ok(())
}

#[test]
fn test_camera_over_trait_object() {
    let table: Arc<dyn NetworkTable> = Arc::new(InMemoryTable::new());
    let camera = VisionCamera::new(Arc::clone(&table));
    camera.set_light_mode(LightMode::Blink);
    assert_eq!(camera.light_mode(), Some(LightMode::Blink));
}
