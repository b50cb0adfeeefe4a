//! `ovpn-check` – run the registry's profile intake checks over local files.
//!
//! The binary in `main.rs` only parses arguments and installs logging;
//! everything testable lives here.

use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use vreg_ovpn::ovpn::{IntakeError, IntakeSettings, OvpnIntakeService, ValidationResult};

/// Exit status when every file passes.
pub const EXIT_OK: u8 = 0;
/// Exit status when at least one file fails.
pub const EXIT_REJECTED: u8 = 1;
/// Exit status for settings or output errors.
pub const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "ovpn-check", about = "Check OpenVPN client profiles before registering an endpoint")]
pub struct Cli {
    /// JSON intake settings file.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
    /// Print one JSON object per file instead of text.
    #[arg(long)]
    pub json: bool,
    /// Profiles to check.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

pub fn load_settings(path: Option<&Path>) -> Result<IntakeSettings, IntakeError> {
    match path {
        Some(p) => IntakeSettings::from_json_file(p),
        None => Ok(IntakeSettings::default()),
    }
}

/// Check one file. Read failures and intake errors become a `Failure`.
pub fn check_file(service: &OvpnIntakeService, path: &Path) -> ValidationResult {
    let upload = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("cannot read {}: {}", path.display(), e);
            return ValidationResult::Failure {
                errors: IntakeError::from(e).messages(),
            };
        }
    };
    match service.inspect_bytes(&upload) {
        Ok(result) => result,
        Err(e) => ValidationResult::Failure { errors: e.messages() },
    }
}

fn write_text(out: &mut dyn Write, path: &Path, result: &ValidationResult) -> std::io::Result<()> {
    match result {
        ValidationResult::Success { descriptor } => {
            writeln!(out, "OK {}: {}", path.display(), descriptor)
        }
        ValidationResult::Failure { errors } => {
            writeln!(out, "FAIL {}", path.display())?;
            for e in errors {
                writeln!(out, "  {}", e)?;
            }
            Ok(())
        }
    }
}

fn write_json(out: &mut dyn Write, path: &Path, result: &ValidationResult) -> std::io::Result<()> {
    let mut value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "file".to_string(),
            serde_json::Value::String(path.display().to_string()),
        );
    }
    writeln!(out, "{}", value)
}

/// Run the check over every file and return the process exit status.
pub fn run(cli: &Cli, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
    let settings = match load_settings(cli.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            let _ = writeln!(err, "ovpn-check: {}", e);
            return EXIT_USAGE;
        }
    };
    let service = OvpnIntakeService::new(settings);

    let mut status = EXIT_OK;
    for path in &cli.files {
        let result = check_file(&service, path);
        if !result.is_success() {
            status = EXIT_REJECTED;
        }
        let written = if cli.json {
            write_json(out, path, &result)
        } else {
            write_text(out, path, &result)
        };
        if let Err(e) = written {
            let _ = writeln!(err, "ovpn-check: {}", e);
            return EXIT_USAGE;
        }
    }
    status
}
