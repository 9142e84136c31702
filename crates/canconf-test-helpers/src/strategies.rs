//! proptest strategies.
//!
//! [`profile_for`] only produces values the given family's controllers
//! accept, so applying one to a healthy simulated controller never fails.

use canconf_device::{
    DeviceFamily, FeedbackContinuity, FeedbackSensor, FeedbackSensorSelection, IdleMode,
    SensorInitializationStrategy, SoftLimits, StatusCode, StatusFramePeriods, VELOCITY_WINDOWS,
    VelocityMeasPeriod, VelocityMeasurement, VoltageCompensation,
};
use canconf_profile::ConfigurationProfile;
use proptest::prelude::*;

pub fn family() -> impl Strategy<Value = DeviceFamily> {
    prop::sample::select(DeviceFamily::ALL.to_vec())
}

/// Any non-OK status.
pub fn failure_status() -> impl Strategy<Value = StatusCode> {
    prop::sample::select(
        StatusCode::ALL
            .into_iter()
            .filter(|status| !status.is_ok())
            .collect::<Vec<_>>(),
    )
}

fn feedback_sensor(family: DeviceFamily) -> impl Strategy<Value = FeedbackSensor> {
    let accepted: Vec<FeedbackSensor> = [
        FeedbackSensor::Integrated,
        FeedbackSensor::QuadEncoder,
        FeedbackSensor::Analog,
        FeedbackSensor::PulseWidth,
    ]
    .into_iter()
    .filter(|sensor| family.accepts_feedback_sensor(*sensor))
    .collect();

    if accepted.is_empty() {
        Just(FeedbackSensor::QuadEncoder).boxed()
    } else {
        prop::sample::select(accepted).boxed()
    }
}

fn status_frames(family: DeviceFamily) -> impl Strategy<Value = StatusFramePeriods> {
    let range = family.frame_period_range();
    let periods = prop::collection::vec(
        prop::option::of(*range.start()..=*range.end()),
        family.supported_frames().len(),
    );
    periods.prop_map(move |periods| {
        let mut frames = StatusFramePeriods::EMPTY;
        for (kind, period) in family.supported_frames().iter().zip(periods) {
            if let Some(period) = period {
                frames.set(*kind, period);
            }
        }
        frames
    })
}

fn velocity_measurement() -> impl Strategy<Value = VelocityMeasurement> {
    (
        prop::sample::select(vec![
            VelocityMeasPeriod::Period1Ms,
            VelocityMeasPeriod::Period2Ms,
            VelocityMeasPeriod::Period5Ms,
            VelocityMeasPeriod::Period10Ms,
            VelocityMeasPeriod::Period20Ms,
            VelocityMeasPeriod::Period25Ms,
            VelocityMeasPeriod::Period50Ms,
            VelocityMeasPeriod::Period100Ms,
        ]),
        prop::sample::select(VELOCITY_WINDOWS.to_vec()),
    )
        .prop_map(|(period, rolling_average_window)| VelocityMeasurement {
            period,
            rolling_average_window,
        })
}

fn voltage_compensation() -> impl Strategy<Value = VoltageCompensation> {
    prop_oneof![
        Just(VoltageCompensation::DISABLED),
        (6.0f64..14.0).prop_map(VoltageCompensation::enabled),
    ]
}

fn soft_limits() -> impl Strategy<Value = SoftLimits> {
    (-4096i32..=0, 0i32..=4096, any::<bool>()).prop_map(|(reverse, forward, enabled)| SoftLimits {
        forward,
        reverse,
        enabled,
    })
}

/// Profiles whose every value `family` accepts.
pub fn profile_for(family: DeviceFamily) -> impl Strategy<Value = ConfigurationProfile> {
    let sensor_part = (
        any::<bool>(),
        prop::option::of(any::<bool>()),
        prop::option::of((feedback_sensor(family), 0u8..=1, 0u16..=100)),
        prop::option::of((any::<bool>(), 0u16..=100)),
        prop::option::of(prop::sample::select(vec![
            SensorInitializationStrategy::BootToZero,
            SensorInitializationStrategy::BootToAbsolutePosition,
        ])),
    );
    let motion_part = (
        prop::option::of(0.0f64..2.0),
        prop::option::of(0.0f64..2.0),
        prop::option::of(prop::sample::select(vec![IdleMode::Coast, IdleMode::Brake])),
        prop::option::of(any::<bool>()),
        prop::option::of(0.0f64..0.25),
        status_frames(family),
    );
    let limits_part = (
        prop::option::of(velocity_measurement()),
        prop::option::of(soft_limits()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(voltage_compensation()),
    );

    (sensor_part, motion_part, limits_part).prop_map(
        |(
            (factory_reset, sensor_phase, feedback, continuity, sensor_initialization),
            (
                open_loop_ramp,
                closed_loop_ramp,
                idle_mode,
                inverted,
                neutral_deadband,
                status_frames,
            ),
            (
                velocity_measurement,
                soft_limits,
                current_limit_enabled,
                limit_switches_enabled,
                voltage_compensation,
            ),
        )| ConfigurationProfile {
            factory_reset,
            sensor_phase,
            feedback_sensor: feedback.map(|(sensor, slot, timeout_ms)| FeedbackSensorSelection {
                sensor,
                slot,
                timeout_ms,
            }),
            feedback_continuity: continuity.map(|(not_continuous, timeout_ms)| FeedbackContinuity {
                not_continuous,
                timeout_ms,
            }),
            open_loop_ramp,
            closed_loop_ramp,
            sensor_initialization,
            idle_mode,
            inverted,
            neutral_deadband,
            status_frames,
            velocity_measurement,
            soft_limits,
            current_limit_enabled,
            limit_switches_enabled,
            voltage_compensation,
            ..ConfigurationProfile::empty("generated")
        },
    )
}

/// A family together with a profile it accepts.
pub fn family_and_profile() -> impl Strategy<Value = (DeviceFamily, ConfigurationProfile)> {
    family().prop_flat_map(|family| (Just(family), profile_for(family)))
}
