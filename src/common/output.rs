use anyhow::{Context, Result};
use csv::Writer;
use log::info;

use super::types::{OutputRow, REPORT_COLUMNS};

/// Write assembled rows as a CSV report with the fixed 14-column header,
/// preserving the given row order
pub fn write_report(output_path: &str, rows: &[OutputRow]) -> Result<()> {
    info!("Writing {} rows to: {}", rows.len(), output_path);

    let mut writer = Writer::from_path(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;

    writer
        .write_record(REPORT_COLUMNS)
        .context("Failed to write report header")?;

    for row in rows {
        writer
            .write_record(row.to_record())
            .context("Failed to write report row")?;
    }

    writer.flush().context("Failed to flush report")?;
    Ok(())
}
