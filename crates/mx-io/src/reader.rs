use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use mx_core::{Matrix, MatrixError};

use crate::error::{FileError, Result};

/// Load a matrix from a text file.
///
/// The file is memory-mapped read-only and parsed with [`parse_matrix`].
pub fn load_matrix(path: &Path) -> Result<Matrix> {
    let file = File::open(path)?;
    // Mapping a zero-length file fails on some platforms.
    if file.metadata()?.len() == 0 {
        return Err(FileError::MissingHeader { field: "rows" });
    }
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap)?;

    let matrix = parse_matrix(text)?;
    debug!("loaded {} matrix from {}", matrix.dims(), path.display());
    Ok(matrix)
}

/// Parse the matrix text format.
///
/// Layout:
///   - line 1: row count
///   - line 2: column count
///   - then `rows` lines of `cols` whitespace-separated integers
///
/// Blank lines after the header are skipped.
pub fn parse_matrix(text: &str) -> Result<Matrix> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let rows = parse_header(lines.next(), "rows")?;
    let cols = parse_header(lines.next(), "cols")?;
    if rows == 0 || cols == 0 {
        return Err(MatrixError::EmptyMatrix { rows, cols }.into());
    }

    if rows.checked_mul(cols).is_none() {
        return Err(FileError::Oversized { rows, cols });
    }

    // Every value takes at least two bytes, so the text bounds the cell count
    // no matter what the header claims.
    let mut data = Vec::with_capacity((rows * cols).min(text.len() / 2 + 1));
    let mut seen_rows = 0;
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        seen_rows += 1;
        if seen_rows > rows {
            continue;
        }

        let before = data.len();
        for token in line.split_whitespace() {
            let value = token.parse::<i64>().map_err(|_| FileError::InvalidValue {
                line: line_no,
                token: token.to_string(),
            })?;
            data.push(value);
        }
        let got = data.len() - before;
        if got != cols {
            return Err(FileError::RowLength {
                line: line_no,
                expected: cols,
                got,
            });
        }
    }

    if seen_rows != rows {
        return Err(FileError::RowCount {
            expected: rows,
            got: seen_rows,
        });
    }

    Ok(Matrix::new(rows, cols, data)?)
}

fn parse_header(line: Option<(usize, &str)>, field: &'static str) -> Result<usize> {
    let (line_no, raw) = line.ok_or(FileError::MissingHeader { field })?;
    let value = raw.trim();
    if value.is_empty() {
        return Err(FileError::MissingHeader { field });
    }
    value.parse::<usize>().map_err(|_| FileError::InvalidHeader {
        field,
        line: line_no,
        value: value.to_string(),
    })
}
