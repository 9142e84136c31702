//! Continue-on-error profile application.
//!
//! [`ConfigurationApplier::apply`] walks the device family's application
//! order and issues one capability call per field the profile sets (one per
//! frame kind for status frames). A non-OK status is reported and recorded,
//! then the next field is applied. Nothing here returns an error or panics.

use canconf_device::{
    DeviceFamily, DeviceId, MotorController, Operation, ProfileField, StatusCode,
};
use canconf_profile::ConfigurationProfile;
use tracing::{debug, info, warn};

use crate::handle::DeviceHandle;
use crate::reporter::ErrorReporter;

/// Outcome of applying one profile to one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub profile: String,
    pub device_id: DeviceId,
    pub family: DeviceFamily,
    /// Every call that returned a non-OK status, in issue order.
    pub failures: Vec<(Operation, StatusCode)>,
    /// Fields the profile sets that the family has no capability for.
    pub skipped: Vec<ProfileField>,
    pub calls_issued: usize,
}

impl ApplyResult {
    pub fn fully_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, operation: Operation) -> bool {
        self.failures.iter().any(|(op, _)| op.name() == operation.name())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigurationApplier {
    reporter: ErrorReporter,
}

impl ConfigurationApplier {
    pub fn new(reporter: ErrorReporter) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    /// Apply `profile` to `handle`, returning what failed.
    ///
    /// The result is also stored on the handle.
    pub fn apply<C: MotorController>(
        &self,
        profile: &ConfigurationProfile,
        handle: &mut DeviceHandle<C>,
    ) -> ApplyResult {
        let family = handle.family();
        let mut run = Run {
            reporter: &self.reporter,
            result: ApplyResult {
                profile: profile.name.to_string(),
                device_id: handle.id(),
                family,
                failures: Vec::new(),
                skipped: profile.unsupported_fields(family),
                calls_issued: 0,
            },
        };

        let device = handle.controller_mut();
        for field in family.application_order() {
            apply_field(*field, profile, device, &mut run);
        }

        let result = run.result;
        if result.fully_succeeded() {
            info!(
                device_id = %result.device_id,
                family = %family,
                profile = %result.profile,
                calls = result.calls_issued,
                "device configured"
            );
        } else {
            warn!(
                device_id = %result.device_id,
                family = %family,
                profile = %result.profile,
                calls = result.calls_issued,
                failures = result.failures.len(),
                "device partially configured"
            );
        }
        handle.record(result.clone());
        result
    }
}

struct Run<'a> {
    reporter: &'a ErrorReporter,
    result: ApplyResult,
}

impl Run<'_> {
    fn check(&mut self, operation: Operation, status: StatusCode) {
        self.result.calls_issued += 1;
        debug!(
            device_id = %self.result.device_id,
            operation = operation.name(),
            status = %status,
            "capability call"
        );
        if !status.is_ok() {
            self.reporter.report(
                self.result.device_id,
                self.result.family,
                operation,
                status,
            );
            self.result.failures.push((operation, status));
        }
    }
}

fn apply_field<C: MotorController>(
    field: ProfileField,
    profile: &ConfigurationProfile,
    device: &mut C,
    run: &mut Run<'_>,
) {
    match field {
        ProfileField::FactoryReset => {
            if profile.factory_reset {
                run.check(Operation::ConfigFactoryDefault, device.config_factory_default());
            }
        }
        ProfileField::SensorPhase => {
            if let Some(inverted) = profile.sensor_phase {
                run.check(Operation::SetSensorPhase, device.set_sensor_phase(inverted));
            }
        }
        ProfileField::FeedbackSensor => {
            if let Some(selection) = profile.feedback_sensor {
                run.check(
                    Operation::ConfigSelectedFeedbackSensor,
                    device.config_selected_feedback_sensor(selection),
                );
            }
        }
        ProfileField::FeedbackContinuity => {
            if let Some(continuity) = profile.feedback_continuity {
                run.check(
                    Operation::ConfigFeedbackNotContinuous,
                    device.config_feedback_not_continuous(continuity),
                );
            }
        }
        ProfileField::OpenLoopRamp => {
            if let Some(seconds) = profile.open_loop_ramp {
                run.check(
                    Operation::SetOpenLoopRampRate,
                    device.set_open_loop_ramp_rate(seconds),
                );
            }
        }
        ProfileField::ClosedLoopRamp => {
            if let Some(seconds) = profile.closed_loop_ramp {
                run.check(
                    Operation::SetClosedLoopRampRate,
                    device.set_closed_loop_ramp_rate(seconds),
                );
            }
        }
        ProfileField::SensorInitialization => {
            if let Some(strategy) = profile.sensor_initialization {
                run.check(
                    Operation::ConfigIntegratedSensorInitializationStrategy,
                    device.config_integrated_sensor_initialization_strategy(strategy),
                );
            }
        }
        ProfileField::IdleBehavior => {
            if let Some(mode) = profile.idle_mode {
                run.check(Operation::SetIdleMode, device.set_idle_mode(mode));
            }
        }
        ProfileField::Inverted => {
            if let Some(inverted) = profile.inverted {
                run.check(Operation::SetInverted, device.set_inverted(inverted));
            }
        }
        ProfileField::NeutralDeadband => {
            if let Some(deadband) = profile.neutral_deadband {
                run.check(
                    Operation::ConfigNeutralDeadband,
                    device.config_neutral_deadband(deadband),
                );
            }
        }
        ProfileField::StatusFrames => {
            for kind in run.result.family.supported_frames() {
                if let Some(period) = profile.status_frames.get(*kind) {
                    run.check(
                        Operation::SetPeriodicFramePeriod(*kind),
                        device.set_periodic_frame_period(*kind, period),
                    );
                }
            }
        }
        ProfileField::VelocityMeasurement => {
            if let Some(measurement) = profile.velocity_measurement {
                run.check(
                    Operation::ConfigVelocityMeasurement,
                    device.config_velocity_measurement(measurement),
                );
            }
        }
        ProfileField::SoftLimits => {
            if let Some(limits) = profile.soft_limits {
                run.check(Operation::ConfigSoftLimits, device.config_soft_limits(limits));
            }
        }
        ProfileField::CurrentLimit => {
            if let Some(enabled) = profile.current_limit_enabled {
                run.check(Operation::EnableCurrentLimit, device.enable_current_limit(enabled));
            }
        }
        ProfileField::LimitSwitch => {
            if let Some(enabled) = profile.limit_switches_enabled {
                run.check(
                    Operation::OverrideLimitSwitchesEnable,
                    device.override_limit_switches_enable(enabled),
                );
            }
        }
        ProfileField::VoltageCompensation => match profile.voltage_compensation {
            Some(vc) if vc.enabled => run.check(
                Operation::EnableVoltageCompensation,
                device.enable_voltage_compensation(vc.nominal_voltage),
            ),
            Some(_) => run.check(
                Operation::DisableVoltageCompensation,
                device.disable_voltage_compensation(),
            ),
            None => {}
        },
    }
}
