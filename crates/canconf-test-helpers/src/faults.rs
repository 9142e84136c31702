//! Fault scripts for simulated controllers.

use canconf_device::{DeviceId, Operation, SimulatedBus, SimulatedController, StatusCode};

/// A list of capability calls to fail, and the status each returns.
#[derive(Debug, Clone, Default)]
pub struct FaultScript {
    faults: Vec<(Operation, StatusCode)>,
}

impl FaultScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, operation: Operation, status: StatusCode) -> Self {
        self.faults.push((operation, status));
        self
    }

    /// Time out every voltage compensation call.
    pub fn voltage_compensation_timeout() -> Self {
        Self::new().fail(Operation::EnableVoltageCompensation, StatusCode::CanTimeout)
    }

    pub fn faults(&self) -> &[(Operation, StatusCode)] {
        &self.faults
    }

    pub fn install(&self, controller: &mut SimulatedController) {
        for (operation, status) in &self.faults {
            controller.fail_operation(*operation, *status);
        }
    }

    pub fn install_on_bus(&self, bus: &mut SimulatedBus, id: DeviceId) {
        for (operation, status) in &self.faults {
            bus.fail_on(id, *operation, *status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canconf_device::{DeviceFamily, MotorController};

    #[test]
    fn test_install_applies_every_fault() {
        let mut sim = SimulatedController::new(crate::device_id(1), DeviceFamily::BrushlessSmart);
        FaultScript::new()
            .fail(Operation::SetInverted, StatusCode::TxFailed)
            .fail(Operation::SetIdleMode, StatusCode::CanTimeout)
            .install(&mut sim);

        assert_eq!(sim.set_inverted(true), StatusCode::TxFailed);
        assert_eq!(
            sim.set_idle_mode(canconf_device::IdleMode::Brake),
            StatusCode::CanTimeout
        );
    }
}
