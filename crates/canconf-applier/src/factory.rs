//! Controller construction.

use canconf_device::{ControllerBackend, DeviceFamily, DeviceId};
use canconf_profile::{ConfigurationProfile, DeviceSetup, ResolvedDevice};
use tracing::debug;

use crate::applier::ConfigurationApplier;
use crate::handle::DeviceHandle;

/// Builds configured device handles.
///
/// Each call opens a fresh controller through the backend and applies a
/// profile to it. The handle is returned whatever the outcome; inspect
/// [`DeviceHandle::last_apply`] for failures. Handles are never cached or
/// shared.
#[derive(Debug)]
pub struct ControllerFactory<B> {
    backend: B,
    applier: ConfigurationApplier,
}

impl<B: ControllerBackend> ControllerFactory<B> {
    pub fn new(backend: B, applier: ConfigurationApplier) -> Self {
        Self { backend, applier }
    }

    pub fn create(
        &mut self,
        id: DeviceId,
        family: DeviceFamily,
        profile: &ConfigurationProfile,
    ) -> DeviceHandle<B::Controller> {
        debug!(device_id = %id, family = %family, profile = %profile.name, "creating controller");
        let mut handle = DeviceHandle::new(self.backend.open(id, family));
        self.applier.apply(profile, &mut handle);
        handle
    }

    pub fn create_default(
        &mut self,
        id: DeviceId,
        family: DeviceFamily,
    ) -> DeviceHandle<B::Controller> {
        self.create(id, family, &ConfigurationProfile::DEFAULT)
    }

    /// Create a sensor-bearing controller with the bring-up sequence from
    /// [`ConfigurationProfile::sensored_bootstrap`].
    pub fn create_sensored(
        &mut self,
        id: DeviceId,
        family: DeviceFamily,
        ramp_seconds: f64,
    ) -> DeviceHandle<B::Controller> {
        let profile = ConfigurationProfile::sensored_bootstrap(family, ramp_seconds);
        self.create(id, family, &profile)
    }

    /// Create the controller a manifest entry describes.
    pub fn create_resolved(&mut self, device: &ResolvedDevice) -> DeviceHandle<B::Controller> {
        match &device.setup {
            DeviceSetup::Profile(profile) => self.create(device.id, device.family, profile),
            DeviceSetup::Sensored { ramp_seconds } => {
                self.create_sensored(device.id, device.family, *ramp_seconds)
            }
        }
    }

    pub fn applier(&self) -> &ConfigurationApplier {
        &self.applier
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canconf_device::{FrameKind, IdleMode, SimulatedBus};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_every_create_opens_a_fresh_controller() -> TestResult {
        let mut factory =
            ControllerFactory::new(SimulatedBus::new(), ConfigurationApplier::default());
        let id = DeviceId::new(2)?;

        let first = factory.create_default(id, DeviceFamily::BrushlessSmart);
        let second = factory.create_default(id, DeviceFamily::BrushlessSmart);

        assert_eq!(factory.backend().opened().len(), 2);
        assert_eq!(first.controller().calls().len(), second.controller().calls().len());
        Ok(())
    }

    #[test]
    fn test_create_sensored_on_brushless_uses_default_with_ramp() -> TestResult {
        let mut factory =
            ControllerFactory::new(SimulatedBus::new(), ConfigurationApplier::default());
        let handle = factory.create_sensored(DeviceId::new(9)?, DeviceFamily::BrushlessSmart, 0.4);
        let state = handle.controller().recorded_state();

        assert_eq!(state.open_loop_ramp, Some(0.4));
        assert_eq!(state.idle_mode, Some(IdleMode::Coast));
        assert_eq!(state.status_frames.get(FrameKind::Status0), Some(10));
        assert_eq!(handle.controller().factory_resets(), 0);
        Ok(())
    }
}
