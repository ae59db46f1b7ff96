use anyhow::{Context, Result};

/// The backend refuses to stream unbounded exports; past this row count the
/// download is not even attempted.
pub const MAX_CSV_ROWS: usize = 10_000;
pub const CSV_LIMIT_MESSAGE: &str = "Maximum number of rows reached for downloading CSV";

pub fn csv_allowed(count: usize) -> Result<(), String> {
    if count > MAX_CSV_ROWS {
        Err(CSV_LIMIT_MESSAGE.to_string())
    } else {
        Ok(())
    }
}

/// Local CSV rendering for client-paged screens that hold their full row
/// set already; server-paged screens download the backend's CSV instead.
pub fn write_rows_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .context("failed to write csv header")?;
    for row in rows {
        writer.write_record(row).context("failed to write csv row")?;
    }
    let bytes = writer
        .into_inner()
        .context("failed to flush csv output")?;
    String::from_utf8(bytes).context("csv output should be valid utf-8")
}
