//! Property tests for the camera wrapper.

use canconf_vision::{InMemoryTable, MAX_PIPELINE, NetworkTable, VisionCamera};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_pipeline_accepted_iff_in_range(index in any::<u8>()) {
        let camera = VisionCamera::new(InMemoryTable::new());
        let accepted = camera.set_pipeline(index).is_ok();
        prop_assert_eq!(accepted, index <= MAX_PIPELINE);
        let expected = if accepted { Some(index) } else { None };
        prop_assert_eq!(camera.pipeline(), expected);
    }

    #[test]
    fn prop_published_readings_read_back(
        tx in -27.0f64..27.0,
        ty in -20.5f64..20.5,
        ts in -90.0f64..90.0,
    ) {
        let table = InMemoryTable::new();
        table.set_number("limelight", "tx", tx);
        table.set_number("limelight", "ty", ty);
        table.set_number("limelight", "ts", ts);
        let camera = VisionCamera::new(table);

        prop_assert_eq!(camera.horizontal_offset(), tx);
        prop_assert_eq!(camera.vertical_offset(), ty);
        prop_assert_eq!(camera.target_skew(), ts);
        prop_assert_eq!(camera.target_area(), 0.0);
    }

    #[test]
    fn prop_other_tables_never_leak(value in any::<f64>()) {
        let table = InMemoryTable::new();
        table.set_number("other", "tx", value);
        let camera = VisionCamera::new(table);
        prop_assert_eq!(camera.horizontal_offset(), 0.0);
    }
}
