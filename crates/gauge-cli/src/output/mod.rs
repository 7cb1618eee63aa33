use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Serialize `value` as one JSON document: indented for `json`, a single
/// line for `raw`. Always newline-terminated.
pub fn write_to<W: Write, T: Serialize>(
    mut writer: W,
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(&mut writer, value)?,
        OutputFormat::Raw => serde_json::to_writer(&mut writer, value)?,
    }
    writeln!(writer)?;
    Ok(())
}

/// Print a command result on stdout. Logs go to stderr, so stdout stays
/// machine-readable.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    write_to(std::io::stdout().lock(), value, format)
}
