//! Manifest dry run on a simulated bus

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use canconf_applier::{
    ApplyResult, ConfigurationApplier, ControllerFactory, ErrorReporter, MemorySink,
};
use canconf_device::{DeviceId, Operation, SimulatedBus, StatusCode};
use canconf_profile::load_manifest;
use tracing::info;

use crate::error::CliError;
use crate::output;

/// A capability call to fail during the dry run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedFault {
    /// `None` fails the call on every device.
    pub device: Option<DeviceId>,
    pub operation: Operation,
    pub status: StatusCode,
}

impl InjectedFault {
    /// Parse `[<id>:]<operation>=<status>`, e.g. `5:voltage compensation=can-timeout`.
    pub fn parse(raw: &str) -> Result<Self, CliError> {
        let invalid = |reason: String| CliError::InvalidFault(format!("'{raw}': {reason}"));

        let (target, status) = raw
            .rsplit_once('=')
            .ok_or_else(|| invalid("expected [<id>:]<operation>=<status>".to_string()))?;

        let (device, operation) = match target.split_once(':') {
            Some((id, operation)) => {
                let address: u8 = id
                    .trim()
                    .parse()
                    .map_err(|e| invalid(format!("device id '{id}': {e}")))?;
                let id = DeviceId::new(address).map_err(|e| invalid(e.to_string()))?;
                (Some(id), operation)
            }
            None => (None, target),
        };

        let operation = Operation::from_name(operation.trim())
            .ok_or_else(|| invalid(format!("unknown operation '{}'", operation.trim())))?;
        let status = StatusCode::from_name(status.trim())
            .ok_or_else(|| invalid(format!("unknown status '{}'", status.trim())))?;
        if status.is_ok() {
            return Err(invalid("status must be a failure".to_string()));
        }

        Ok(Self {
            device,
            operation,
            status,
        })
    }

    fn install(&self, bus: &mut SimulatedBus) {
        match self.device {
            Some(id) => bus.fail_on(id, self.operation, self.status),
            None => bus.fail_everywhere(self.operation, self.status),
        }
    }
}

/// Outcome of configuring one manifest entry.
#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub label: String,
    pub result: ApplyResult,
}

pub fn execute(manifest: &Path, faults: &[String], strict: bool, json: bool) -> Result<()> {
    let faults = faults
        .iter()
        .map(|raw| InjectedFault::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let robot = load_manifest(manifest).map_err(CliError::from)?;
    let base_dir = manifest.parent().unwrap_or_else(|| Path::new("."));
    let devices = robot.resolve(base_dir).map_err(CliError::from)?;

    let mut bus = SimulatedBus::new();
    for fault in &faults {
        fault.install(&mut bus);
    }

    let sink = Arc::new(MemorySink::new());
    let applier = ConfigurationApplier::new(ErrorReporter::new(sink.clone()));
    let mut factory = ControllerFactory::new(bus, applier);

    let reports: Vec<DeviceReport> = devices
        .iter()
        .filter_map(|device| {
            let handle = factory.create_resolved(device);
            handle.last_apply().cloned().map(|result| DeviceReport {
                label: device.label.clone(),
                result,
            })
        })
        .collect();

    let diagnostics = sink.messages();
    let failed_devices = reports
        .iter()
        .filter(|report| !report.result.fully_succeeded())
        .count();
    let failures: usize = reports.iter().map(|report| report.result.failures.len()).sum();
    info!(
        manifest = %manifest.display(),
        devices = reports.len(),
        failures,
        "Manifest dry run complete"
    );

    output::print_apply_report(&reports, &diagnostics, json)?;

    if strict && failures > 0 {
        return Err(CliError::ConfigurationFailed {
            devices: failed_devices,
            failures,
        }
        .into());
    }
    Ok(())
}
