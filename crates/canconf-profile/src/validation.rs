//! Profile validation

use canconf_device::{DeviceFamily, ProfileField, VELOCITY_WINDOWS};
use canconf_errors::ValidationError;
use tracing::debug;

use crate::types::ConfigurationProfile;

fn check_ramp(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(seconds) if !seconds.is_finite() => Err(ValidationError::not_finite(field)),
        Some(seconds) if seconds < 0.0 => Err(ValidationError::out_of_range(
            field,
            seconds,
            0.0,
            f64::INFINITY,
        )),
        _ => Ok(()),
    }
}

/// Check a profile against the value ranges controllers accept.
///
/// Validation does not look at device families; fields a family does not
/// support are skipped when the profile is applied.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_profile(profile: &ConfigurationProfile) -> Result<(), ValidationError> {
    if profile.name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    check_ramp("open_loop_ramp", profile.open_loop_ramp)?;
    check_ramp("closed_loop_ramp", profile.closed_loop_ramp)?;

    if let Some(deadband) = profile.neutral_deadband {
        if !deadband.is_finite() {
            return Err(ValidationError::not_finite("neutral_deadband"));
        }
        if !(0.0..1.0).contains(&deadband) {
            return Err(ValidationError::out_of_range("neutral_deadband", deadband, 0.0, 1.0));
        }
    }

    if let Some(vc) = profile.voltage_compensation {
        if !vc.nominal_voltage.is_finite() {
            return Err(ValidationError::not_finite("voltage_compensation.nominal_voltage"));
        }
        if vc.nominal_voltage <= 0.0 {
            return Err(ValidationError::constraint(format!(
                "voltage_compensation.nominal_voltage must be positive, got {}",
                vc.nominal_voltage
            )));
        }
    }

    if let Some(velocity) = profile.velocity_measurement
        && !VELOCITY_WINDOWS.contains(&velocity.rolling_average_window)
    {
        return Err(ValidationError::invalid_enum(
            "velocity_measurement.rolling_average_window",
            velocity.rolling_average_window.to_string(),
            "1, 2, 4, 8, 16, 32, 64",
        ));
    }

    if let Some(limits) = profile.soft_limits
        && limits.forward < limits.reverse
    {
        return Err(ValidationError::constraint(format!(
            "soft_limits.forward ({}) must not be below soft_limits.reverse ({})",
            limits.forward, limits.reverse
        )));
    }

    Ok(())
}

/// Check that everything `profile` sets can be applied to `family` without
/// the controller rejecting it.
///
/// # Errors
///
/// Returns a [`ValidationError`] when a status frame period is outside the
/// family's range or the feedback sensor is not available on the family.
pub fn validate_for_family(
    profile: &ConfigurationProfile,
    family: DeviceFamily,
) -> Result<(), ValidationError> {
    validate_profile(profile)?;

    let range = family.frame_period_range();
    for (kind, period) in profile.status_frames.iter() {
        if family.supports_frame(kind) && !range.contains(&period) {
            return Err(ValidationError::out_of_range(
                format!("status_frames.{kind:?}"),
                period,
                *range.start(),
                *range.end(),
            ));
        }
    }

    if family.supports(ProfileField::FeedbackSensor)
        && let Some(selection) = profile.feedback_sensor
        && !family.accepts_feedback_sensor(selection.sensor)
    {
        return Err(ValidationError::constraint(format!(
            "{family} cannot use feedback sensor {:?}",
            selection.sensor
        )));
    }

    let skipped = profile.unsupported_fields(family);
    if !skipped.is_empty() {
        debug!(
            profile = %profile.name,
            family = %family,
            skipped = skipped.len(),
            "profile sets fields the family does not support"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canconf_device::{FeedbackSensor, FeedbackSensorSelection, FrameKind, SoftLimits};

    #[test]
    fn test_validate_profile_empty_name() {
        let profile = ConfigurationProfile::empty("  ");
        assert!(matches!(
            validate_profile(&profile),
            Err(ValidationError::Required(_))
        ));
    }

    #[test]
    fn test_negative_ramp_rejected() {
        let profile = ConfigurationProfile::empty("p").with_ramps(-0.1, 0.0);
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_nan_deadband_rejected() {
        let profile = ConfigurationProfile::empty("p").with_neutral_deadband(f64::NAN);
        assert!(matches!(
            validate_profile(&profile),
            Err(ValidationError::NotFinite(_))
        ));
    }

    #[test]
    fn test_deadband_upper_bound_exclusive() {
        let profile = ConfigurationProfile::empty("p").with_neutral_deadband(1.0);
        assert!(validate_profile(&profile).is_err());
        let profile = ConfigurationProfile::empty("p").with_neutral_deadband(0.0);
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn test_soft_limits_order() {
        let profile = ConfigurationProfile::empty("p").with_soft_limits(SoftLimits {
            forward: -10,
            reverse: 10,
            enabled: true,
        });
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_family_frame_range() {
        let profile = ConfigurationProfile::empty("p").with_frame_period(FrameKind::General, 300);
        assert!(validate_for_family(&profile, DeviceFamily::IntegratedSensor).is_err());
        // General is not a brushless frame, so the period is irrelevant there.
        assert!(validate_for_family(&profile, DeviceFamily::BrushlessSmart).is_ok());
    }

    #[test]
    fn test_external_sensor_cannot_select_integrated() {
        let mut profile = ConfigurationProfile::empty("p");
        profile.feedback_sensor = Some(FeedbackSensorSelection {
            sensor: FeedbackSensor::Integrated,
            slot: 0,
            timeout_ms: 50,
        });
        assert!(validate_for_family(&profile, DeviceFamily::ExternalSensor).is_err());
        assert!(validate_for_family(&profile, DeviceFamily::IntegratedSensor).is_ok());
    }
}
