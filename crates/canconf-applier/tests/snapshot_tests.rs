//! Snapshot tests for operator-visible diagnostics.

use std::sync::Arc;

use canconf_applier::{ConfigurationApplier, ControllerFactory, ErrorReporter, MemorySink};
use canconf_device::{DeviceFamily, FrameKind, Operation, SimulatedBus, StatusCode};
use canconf_profile::presets;
use canconf_test_helpers::prelude::*;

fn run_with_faults(family: DeviceFamily, script: FaultScript) -> Vec<String> {
    let sink = Arc::new(MemorySink::new());
    let applier = ConfigurationApplier::new(ErrorReporter::new(sink.clone()));
    let mut factory = ControllerFactory::new(SimulatedBus::new(), applier);
    let id = device_id(12);
    script.install_on_bus(factory.backend_mut(), id);
    factory.create(id, family, &presets::DRIVE);
    sink.messages()
}

#[test]
fn snapshot_brushless_frame_failures() {
    let messages = run_with_faults(
        DeviceFamily::BrushlessSmart,
        FaultScript::new()
            .fail(Operation::SetPeriodicFramePeriod(FrameKind::Status0), StatusCode::CanTimeout)
            .fail(Operation::SetIdleMode, StatusCode::InvalidParameter),
    );
    insta::assert_snapshot!(messages.join("\n"), @r"
    Could not configure brushless smart controller id: 12 error: CAN timeout set status0 rate
    Could not configure brushless smart controller id: 12 error: invalid parameter set neutral
    ");
}

#[test]
fn snapshot_integrated_sensor_failures() {
    let messages = run_with_faults(
        DeviceFamily::IntegratedSensor,
        FaultScript::new()
            .fail(Operation::ConfigNeutralDeadband, StatusCode::FirmwareTooOld)
            .fail(
                Operation::SetPeriodicFramePeriod(FrameKind::General),
                StatusCode::CanMessageStale,
            )
            .fail(Operation::DisableVoltageCompensation, StatusCode::TxFailed),
    );
    insta::assert_snapshot!(messages.join("\n"), @r"
    Could not configure integrated sensor controller id: 12 error: firmware too old neutral deadband
    Could not configure integrated sensor controller id: 12 error: CAN message stale set general status rate
    Could not configure integrated sensor controller id: 12 error: transmit failed voltage compensation
    ");
}

#[test]
fn snapshot_healthy_device_reports_nothing() {
    let messages = run_with_faults(DeviceFamily::ExternalSensor, FaultScript::new());
    insta::assert_snapshot!(messages.join("\n"), @"");
}
