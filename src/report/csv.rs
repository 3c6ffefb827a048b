//! CSV export of fired rule codes.
//!
//! Produces one code per line, in engine order, for scripted post-processing
//! of many traces.

use crate::report::Report;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the fired rule codes as CSV text
pub fn generate_csv(report: &Report) -> String {
    let mut output = String::from("code\n");
    for code in report.codes() {
        output.push_str(code);
        output.push('\n');
    }
    output
}

/// Write the fired rule codes to a CSV file
///
/// **Public** - main entry point for CSV output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_csv(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing CSV report to: {}", output_path.display());

    crate::report::html::validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory: {}", e))
            })?;
        }
    }

    let output = generate_csv(report);

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(output.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("CSV report written successfully ({} rows)", report.findings.len());

    Ok(())
}
