//! Configured device handles.

use canconf_device::{DeviceFamily, DeviceId, MotorController};

use crate::applier::ApplyResult;

/// One physical controller, owned by the subsystem that drives it.
///
/// Wraps the capability interface and remembers the outcome of the last
/// profile applied to it.
#[derive(Debug)]
pub struct DeviceHandle<C> {
    controller: C,
    last_apply: Option<ApplyResult>,
}

impl<C: MotorController> DeviceHandle<C> {
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            last_apply: None,
        }
    }

    pub fn id(&self) -> DeviceId {
        self.controller.id()
    }

    pub fn family(&self) -> DeviceFamily {
        self.controller.family()
    }

    /// Name of the last profile applied, fully or partially.
    pub fn last_profile(&self) -> Option<&str> {
        self.last_apply.as_ref().map(|result| result.profile.as_str())
    }

    pub fn last_apply(&self) -> Option<&ApplyResult> {
        self.last_apply.as_ref()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub(crate) fn record(&mut self, result: ApplyResult) {
        self.last_apply = Some(result);
    }
}
