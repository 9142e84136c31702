//! Property-based tests for the simulated controller's acceptance rules.

use canconf_device::{
    DeviceFamily, DeviceId, FrameKind, MotorController, Operation, SimulatedController,
    StatusCode,
};
use proptest::prelude::*;

fn family_strategy() -> impl Strategy<Value = DeviceFamily> {
    prop::sample::select(DeviceFamily::ALL.to_vec())
}

fn frame_strategy() -> impl Strategy<Value = FrameKind> {
    prop::sample::select(FrameKind::ALL.to_vec())
}

fn failure_strategy() -> impl Strategy<Value = StatusCode> {
    prop::sample::select(
        StatusCode::ALL
            .into_iter()
            .filter(|status| !status.is_ok())
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn test_frame_period_accepted_iff_supported_and_in_range(
        family in family_strategy(),
        kind in frame_strategy(),
        period in any::<u16>(),
        raw_id in 0u8..=62,
    ) {
        let id = DeviceId::new(raw_id).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut sim = SimulatedController::new(id, family);
        let status = sim.set_periodic_frame_period(kind, period);

        let expected_ok = family.supports_frame(kind) && family.frame_period_range().contains(&period);
        prop_assert_eq!(status.is_ok(), expected_ok);

        let recorded = sim.recorded_state().status_frames.get(kind);
        prop_assert_eq!(recorded, expected_ok.then_some(period));
    }

    #[test]
    fn test_injected_fault_is_returned_verbatim(
        family in family_strategy(),
        status in failure_strategy(),
        inverted in any::<bool>(),
    ) {
        let id = DeviceId::new(1).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut sim = SimulatedController::new(id, family);
        sim.fail_operation(Operation::SetInverted, status);

        prop_assert_eq!(sim.set_inverted(inverted), status);
        prop_assert_eq!(sim.recorded_state().inverted, None);
        prop_assert_eq!(sim.calls().len(), 1);
    }

    #[test]
    fn test_ramp_rates_reject_negative_values(family in family_strategy(), seconds in -100.0f64..-0.001) {
        let id = DeviceId::new(2).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut sim = SimulatedController::new(id, family);
        prop_assert_eq!(sim.set_open_loop_ramp_rate(seconds), StatusCode::InvalidParameter);
        prop_assert_eq!(sim.recorded_state().open_loop_ramp, None);
    }

    #[test]
    fn test_status_code_numeric_roundtrip(status in prop::sample::select(StatusCode::ALL.to_vec())) {
        prop_assert_eq!(StatusCode::from_code(status.code()), Some(status));
    }
}
