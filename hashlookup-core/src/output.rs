//! Rendering of lookup results.
//!
//! Two sinks: a plain-text listing for the console, and a JSON file named
//! after the query inside the configured output directory.

use crate::Result;
use crate::error::LookupError;
use crate::models::Row;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Line printed before each row in console output.
pub const ROW_SEPARATOR: &str = "---- Row ----";

/// Longest file stem derived from a query, in UTF-8 bytes. Leaves room for
/// `.json` within the usual 255-byte file name limit.
pub const MAX_FILE_STEM_BYTES: usize = 250;

/// Writes rows as `key: value` lines, each row preceded by a separator.
///
/// # Errors
/// Returns an output error if the writer fails.
pub fn render_console<W: Write>(rows: &[Row], out: &mut W) -> Result<()> {
    let write_all = |out: &mut W| -> std::io::Result<()> {
        for row in rows {
            writeln!(out, "{}", ROW_SEPARATOR)?;
            for (column, value) in row.iter() {
                writeln!(out, "{}: {}", column, value)?;
            }
        }
        out.flush()
    };

    write_all(out).map_err(|e| LookupError::output_failed("Failed to write results", e))
}

/// Serializes rows as a pretty-printed JSON array of string-valued objects.
///
/// # Errors
/// Returns a serialization error if encoding fails.
pub fn to_json(rows: &[Row]) -> Result<String> {
    serde_json::to_string_pretty(rows).map_err(|e| LookupError::Serialization {
        context: "JSON serialization of result rows".to_string(),
        source: e,
    })
}

/// Derives a file stem from query text.
///
/// Alphanumeric characters and `_` are kept, everything else becomes `_`.
/// The stem is cut at a character boundary so it never exceeds
/// [`MAX_FILE_STEM_BYTES`] bytes; an empty query yields `query`.
///
/// # Example
/// ```rust
/// use hashlookup_core::output::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("+7 999 123-45-67"), "_7_999_123_45_67");
/// assert_eq!(sanitize_file_stem("../etc/passwd"), "___etc_passwd");
/// ```
pub fn sanitize_file_stem(query: &str) -> String {
    let mut stem = String::new();
    for c in query.chars() {
        let c = if c.is_alphanumeric() || c == '_' { c } else { '_' };
        if stem.len().saturating_add(c.len_utf8()) > MAX_FILE_STEM_BYTES {
            break;
        }
        stem.push(c);
    }

    if stem.is_empty() {
        "query".to_string()
    } else {
        stem
    }
}

/// Path of the JSON file for `query` inside `output_dir`.
pub fn json_output_path(output_dir: &Path, query: &str) -> PathBuf {
    output_dir.join(format!("{}.json", sanitize_file_stem(query)))
}

/// Writes rows as JSON into `output_dir`, creating the directory if needed.
///
/// # Returns
/// The path of the written file.
///
/// # Errors
/// Returns an output error if the directory cannot be created or the file
/// cannot be written.
pub async fn write_json(rows: &[Row], output_dir: &Path, query: &str) -> Result<PathBuf> {
    let json_data = to_json(rows)?;

    tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
        LookupError::output_failed(
            format!("Failed to create directory {}", output_dir.display()),
            e,
        )
    })?;

    let output_path = json_output_path(output_dir, query);
    tokio::fs::write(&output_path, json_data)
        .await
        .map_err(|e| {
            LookupError::output_failed(format!("Failed to write to {}", output_path.display()), e)
        })?;

    tracing::info!("Wrote {} rows to {}", rows.len(), output_path.display());
    Ok(output_path)
}
