use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use mx_core::Matrix;

use crate::error::{FileError, Result};

/// Serialize `matrix` in the text format: row count, column count, then one
/// line per row with every value followed by a single space.
pub fn write_to<W: Write>(out: &mut W, matrix: &Matrix) -> std::io::Result<()> {
    let dims = matrix.dims();
    writeln!(out, "{}", dims.rows)?;
    writeln!(out, "{}", dims.cols)?;
    for row in matrix.iter_rows() {
        for value in row {
            write!(out, "{} ", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render `matrix` into a string using [`write_to`].
pub fn format_matrix(matrix: &Matrix) -> String {
    let mut buf = Vec::new();
    write_to(&mut buf, matrix).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write `matrix` to `path`.
///
/// The contents go to a temporary file next to `path`, which replaces
/// `path` only after everything has been flushed. A failed write leaves no
/// partial output behind.
pub fn write_matrix(path: &Path, matrix: &Matrix) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_to(&mut writer, matrix)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| FileError::Io(e.error))?;

    debug!("wrote {} matrix to {}", matrix.dims(), path.display());
    Ok(())
}
