//! Low-level read/write of the history CSV file.

use crate::errors::{AppError, AppResult};
use crate::models::PostRecord;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fixed column order of the history file.
pub const HEADER: [&str; 4] = ["timestamp", "product_name", "style", "content"];

/// Read every row of the history file.
///
/// - Missing file or empty file → empty table
/// - Columns are matched by position, not by header name
/// - Rows with a different column count → error
pub fn read_table(path: &Path) -> AppResult<Vec<PostRecord>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let data = bytes.strip_prefix(BOM).unwrap_or(&bytes);
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(data);

    let columns = rdr.headers()?.len();
    if columns != HEADER.len() {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{}: expected {} columns, found {}",
                path.display(),
                HEADER.len(),
                columns
            ),
        )));
    }

    let mut out = Vec::new();
    for row in rdr.records() {
        let row = row?;
        out.push(PostRecord::new(
            &row[0], &row[1], &row[2], &row[3],
        ));
    }

    Ok(out)
}

/// Serialize the table (BOM + header + rows) into memory.
pub fn encode_table(records: &[PostRecord]) -> AppResult<Vec<u8>> {
    let mut buf = BOM.to_vec();
    {
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);

        wtr.write_record(HEADER)?;
        for r in records {
            wtr.write_record(r.as_row())?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Replace the whole history file with `records`.
///
/// The table is written to a temporary file in the same directory and then
/// renamed over the target, so readers never see a half-written file.
pub fn write_table(path: &Path, records: &[PostRecord]) -> AppResult<()> {
    let buf = encode_table(records)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&buf)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| AppError::Io(e.error))?;

    Ok(())
}
