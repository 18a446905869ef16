use crate::errors::LoadError;
use crate::loader::resolve_columns;
use crate::model::{Cell, Schema};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, warn};

/// Read every row of `table` from the SQLite database at `db_path` into
/// records of schema `S`.
///
/// The database is opened read-only and must already exist. The table name
/// is quoted as an identifier, so names such as `meg-sonicwall-sep-24` work
/// as-is. The connection is closed before returning.
pub fn load_table<S: Schema>(db_path: &Path, table: &str) -> Result<Vec<S>, LoadError> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    let records = read_table(&conn, table)?;

    debug!(
        database = %db_path.display(),
        table,
        rows = records.len(),
        "loaded database table"
    );
    Ok(records)
}

fn read_table<S: Schema>(conn: &Connection, table: &str) -> Result<Vec<S>, LoadError> {
    let query = format!("SELECT * FROM {}", quote_identifier(table));
    let mut stmt = conn.prepare(&query)?;

    let headers: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let positions = resolve_columns::<S>(&headers)?;

    let mut records = Vec::new();
    let mut rows = stmt.query([])?;
    let mut row_number = 0usize;
    while let Some(row) = rows.next()? {
        row_number += 1;

        let mut cells = Vec::with_capacity(positions.len());
        for position in &positions {
            let cell = match position {
                Some(idx) => to_cell(row.get_ref(*idx)?),
                None => Cell::Null,
            };
            cells.push(cell);
        }

        match S::from_cells(cells) {
            Some(record) => records.push(record),
            None => warn!(
                table,
                row = row_number,
                "skipping row that does not match the expected columns"
            ),
        }
    }

    Ok(records)
}

/// Quote a table name as an SQL identifier, doubling any embedded quotes.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn to_cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Cell::Null,
        ValueRef::Integer(value) => Cell::Integer(value),
        ValueRef::Real(value) => Cell::Real(value),
        ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}
