//! Output formatting for CLI responses

use anyhow::Error;
use canconf_device::DeviceFamily;
use canconf_profile::{ConfigurationProfile, FileFormat, render_profile};
use colored::*;
use serde::Serialize;
use serde_json::json;

use crate::commands::apply::DeviceReport;

fn print_json(value: &serde_json::Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print success message
pub fn print_success(message: &str, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "message": message
        });
        if let Err(e) = print_json(&output) {
            eprintln!("Failed to format success message as JSON: {e}");
        }
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print warning message
pub fn print_warning(message: &str, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "warning": message
        });
        if let Err(e) = print_json(&output) {
            eprintln!("Failed to format warning message as JSON: {e}");
        }
    } else {
        println!("{} {}", "⚠".yellow(), message);
    }
}

fn error_type_name(error: &Error) -> String {
    format!("{error:?}")
        .split([' ', '(', '{'])
        .next()
        .unwrap_or("Unknown")
        .to_string()
}

pub fn print_profile_list(profiles: &[&ConfigurationProfile], json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&json!({
            "success": true,
            "profiles": profiles
        }))?;
        return Ok(());
    }

    println!("{}", "Presets:".bold());
    for profile in profiles {
        let idle = profile
            .idle_mode
            .map_or_else(|| "-".to_string(), |mode| format!("{mode:?}").to_lowercase());
        println!(
            "  {} {:<18} idle {:<6} deadband {}",
            "●".green(),
            profile.name.bold(),
            idle,
            profile
                .neutral_deadband
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
        );
    }
    Ok(())
}

pub fn print_profile(profile: &ConfigurationProfile, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&json!({
            "success": true,
            "profile": profile
        }))?;
    } else {
        println!("{} {}", "Profile:".bold(), profile.name.cyan());
        print!("{}", render_profile(profile, FileFormat::Yaml)?);
    }
    Ok(())
}

pub fn print_capabilities(family: DeviceFamily, json: bool) -> anyhow::Result<()> {
    let order: Vec<&str> = family
        .application_order()
        .iter()
        .map(|field| field.name())
        .collect();
    let frames: Vec<&str> = family
        .supported_frames()
        .iter()
        .map(|kind| kind.operation_name())
        .collect();
    let range = family.frame_period_range();

    if json {
        print_json(&json!({
            "success": true,
            "family": family,
            "application_order": order,
            "frames": family.supported_frames(),
            "frame_period_ms": { "min": range.start(), "max": range.end() },
            "has_sensor": family.has_sensor(),
            "default_feedback_sensor": family.default_feedback_sensor(),
        }))?;
        return Ok(());
    }

    println!("{} {}", "Family:".bold(), family.name().cyan());
    println!("{}", "Application order:".bold());
    for (step, field) in order.iter().enumerate() {
        println!("  {:>2}. {}", step + 1, field);
    }
    println!("{}", "Status frames:".bold());
    for frame in frames {
        println!("  - {frame}");
    }
    println!(
        "Frame period range: {}..={} ms",
        range.start(),
        range.end()
    );
    let sensor = match family.default_feedback_sensor() {
        Some(sensor) if family.has_sensor() => format!("{sensor:?}"),
        _ => "none".to_string(),
    };
    println!("Feedback sensor: {sensor}");
    Ok(())
}

#[derive(Serialize)]
struct DeviceReportJson<'a> {
    label: &'a str,
    id: u8,
    family: DeviceFamily,
    profile: &'a str,
    calls_issued: usize,
    fully_succeeded: bool,
    failures: Vec<FailureJson>,
    skipped: Vec<&'static str>,
}

#[derive(Serialize)]
struct FailureJson {
    operation: &'static str,
    status: String,
    code: i16,
}

pub fn print_apply_report(
    reports: &[DeviceReport],
    diagnostics: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let all_ok = reports.iter().all(|report| report.result.fully_succeeded());

    if json {
        let devices: Vec<DeviceReportJson<'_>> = reports
            .iter()
            .map(|report| DeviceReportJson {
                label: &report.label,
                id: report.result.device_id.get(),
                family: report.result.family,
                profile: &report.result.profile,
                calls_issued: report.result.calls_issued,
                fully_succeeded: report.result.fully_succeeded(),
                failures: report
                    .result
                    .failures
                    .iter()
                    .map(|(operation, status)| FailureJson {
                        operation: operation.name(),
                        status: status.to_string(),
                        code: status.code(),
                    })
                    .collect(),
                skipped: report.result.skipped.iter().map(|field| field.name()).collect(),
            })
            .collect();
        print_json(&json!({
            "success": all_ok,
            "devices": devices,
            "diagnostics": diagnostics,
        }))?;
        return Ok(());
    }

    if reports.is_empty() {
        println!("{}", "Manifest lists no devices".yellow());
        return Ok(());
    }

    for report in reports {
        let result = &report.result;
        let marker = if result.fully_succeeded() {
            "●".green()
        } else {
            "●".red()
        };
        println!(
            "  {} {} ({} id {}) profile {} - {} calls",
            marker,
            report.label.bold(),
            result.family,
            result.device_id,
            result.profile.cyan(),
            result.calls_issued
        );
        for (operation, status) in &result.failures {
            println!("      {} {}: {}", "✗".red(), operation.name(), status);
        }
        if !result.skipped.is_empty() {
            let skipped: Vec<&str> = result.skipped.iter().map(|field| field.name()).collect();
            println!("      {} {}", "skipped:".dimmed(), skipped.join(", ").dimmed());
        }
    }

    if !diagnostics.is_empty() {
        println!("{}", "Diagnostics:".bold());
        for message in diagnostics {
            println!("  {}", message.red());
        }
    }
    Ok(())
}
