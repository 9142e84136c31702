//! Property-based tests for profile application on simulated controllers.

use std::sync::Arc;

use canconf_applier::{ConfigurationApplier, DeviceHandle, ErrorReporter, MemorySink};
use canconf_device::{DeviceFamily, DeviceState, Operation, SimulatedController};
use canconf_profile::ConfigurationProfile;
use canconf_test_helpers::prelude::*;
use proptest::prelude::*;

fn fresh(family: DeviceFamily) -> DeviceHandle<SimulatedController> {
    DeviceHandle::new(SimulatedController::new(device_id(11), family))
}

fn recording_applier() -> (ConfigurationApplier, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (ConfigurationApplier::new(ErrorReporter::new(sink.clone())), sink)
}

/// Clear whatever `operation` would have written.
fn forget(state: &mut DeviceState, operation: Operation) {
    match operation {
        Operation::ConfigFactoryDefault => {}
        Operation::SetSensorPhase => state.sensor_phase = None,
        Operation::ConfigSelectedFeedbackSensor => state.feedback_sensor = None,
        Operation::ConfigFeedbackNotContinuous => state.feedback_continuity = None,
        Operation::SetOpenLoopRampRate => state.open_loop_ramp = None,
        Operation::SetClosedLoopRampRate => state.closed_loop_ramp = None,
        Operation::ConfigIntegratedSensorInitializationStrategy => {
            state.sensor_initialization = None
        }
        Operation::SetIdleMode => state.idle_mode = None,
        Operation::SetInverted => state.inverted = None,
        Operation::ConfigNeutralDeadband => state.neutral_deadband = None,
        Operation::SetPeriodicFramePeriod(kind) => {
            state.status_frames = state.status_frames.without(kind);
        }
        Operation::ConfigVelocityMeasurement => state.velocity_measurement = None,
        Operation::ConfigSoftLimits => state.soft_limits = None,
        Operation::EnableCurrentLimit => state.current_limit_enabled = None,
        Operation::OverrideLimitSwitchesEnable => state.limit_switches_enabled = None,
        Operation::EnableVoltageCompensation | Operation::DisableVoltageCompensation => {
            state.voltage_compensation = None
        }
    }
}

proptest! {
    #[test]
    fn test_state_round_trip((family, profile) in family_and_profile()) {
        let applier = ConfigurationApplier::default();
        let mut handle = fresh(family);

        let result = applier.apply(&profile, &mut handle);

        prop_assert!(result.fully_succeeded(), "failures: {:?}", result.failures);
        prop_assert_eq!(handle.controller().recorded_state(), &profile.expected_state(family));
    }

    #[test]
    fn test_apply_twice_is_idempotent((family, profile) in family_and_profile()) {
        let applier = ConfigurationApplier::default();
        let mut handle = fresh(family);

        applier.apply(&profile, &mut handle);
        let after_first = handle.controller().recorded_state().clone();
        applier.apply(&profile, &mut handle);

        prop_assert_eq!(handle.controller().recorded_state(), &after_first);
    }

    #[test]
    fn test_continue_on_error(
        (family, profile) in family_and_profile(),
        pick in any::<prop::sample::Index>(),
        status in failure_status(),
    ) {
        // Learn which calls this profile issues on this family.
        let applier = ConfigurationApplier::default();
        let mut dry_run = fresh(family);
        applier.apply(&profile, &mut dry_run);
        let calls = dry_run.controller().calls();
        prop_assume!(!calls.is_empty());
        let (failing, _) = calls[pick.index(calls.len())];

        let (applier, sink) = recording_applier();
        let mut handle = fresh(family);
        handle.controller_mut().fail_operation(failing, status);
        let result = applier.apply(&profile, &mut handle);

        prop_assert_eq!(&result.failures, &vec![(failing, status)]);
        prop_assert_eq!(sink.len(), 1);
        prop_assert_eq!(sink.count_containing(failing.name()), 1);
        prop_assert_eq!(result.calls_issued, calls.len());

        let mut expected = profile.expected_state(family);
        forget(&mut expected, failing);
        prop_assert_eq!(handle.controller().recorded_state(), &expected);
    }

    #[test]
    fn test_fully_succeeded_iff_no_failures(
        (family, profile) in family_and_profile(),
        faulty in any::<bool>(),
        status in failure_status(),
    ) {
        let applier = ConfigurationApplier::default();
        let mut handle = fresh(family);
        if faulty {
            handle.controller_mut().fail_operation(Operation::SetInverted, status);
        }
        let result = applier.apply(&profile, &mut handle);
        prop_assert_eq!(result.fully_succeeded(), result.failures.is_empty());
        let inverted_applied = profile.inverted.is_some();
        prop_assert_eq!(result.fully_succeeded(), !(faulty && inverted_applied));
    }

    #[test]
    fn test_offline_device_fails_every_call(
        (family, profile) in family_and_profile(),
    ) {
        let (applier, sink) = recording_applier();
        let mut handle = fresh(family);
        handle.controller_mut().set_offline(true);

        let result = applier.apply(&profile, &mut handle);

        prop_assert_eq!(result.failures.len(), result.calls_issued);
        prop_assert_eq!(sink.len(), result.calls_issued);
        prop_assert!(handle.controller().recorded_state().is_blank());
    }
}

#[test]
fn test_unsupported_fields_never_reach_the_controller() {
    let applier = ConfigurationApplier::default();
    let mut handle = fresh(DeviceFamily::BrushlessSmart);
    let profile = ConfigurationProfile::sensored_bootstrap(DeviceFamily::IntegratedSensor, 0.2);

    let result = applier.apply(&profile, &mut handle);

    assert!(result.fully_succeeded());
    for (operation, _) in handle.controller().calls() {
        assert!(DeviceFamily::BrushlessSmart.supports(operation.field()));
    }
}
