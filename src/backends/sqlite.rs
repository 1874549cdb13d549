//! SQLite driver backend
//!
//! `{name}` templates are rewritten to numbered `?N` markers at prepare time;
//! the statement remembers which name owns which marker.

use crate::core::config::ConnectionOptions;
use crate::core::connection::Connection;
use crate::core::driver::{Handle, Statement};
use crate::core::placeholder;
use crate::core::value::{DatabaseResult, DatabaseRow, DatabaseValue, NativeParam};
use rusqlite::types::{Null, ValueRef};
use rusqlite::Row;

/// A connection whose handle is SQLite
pub type SqliteConnection = Connection<SqliteHandle>;

/// Live SQLite handle
pub struct SqliteHandle {
    conn: rusqlite::Connection,
}

impl SqliteHandle {
    /// Wrap an already open rusqlite connection
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self { conn }
    }

    /// The underlying rusqlite connection
    pub fn connection(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl Handle for SqliteHandle {
    const DRIVER: &'static str = "sqlite";

    type Error = rusqlite::Error;
    type Statement<'h> = SqliteStatement<'h>;

    /// `options.database` is the file path; `:memory:` opens an in-memory
    /// database. Host, port and credentials do not apply to SQLite.
    fn open(options: &ConnectionOptions) -> Result<Self, Self::Error> {
        let conn = rusqlite::Connection::open(&options.database)?;

        // Enable foreign keys
        conn.execute_batch("PRAGMA foreign_keys = ON")?;

        Ok(Self { conn })
    }

    /// Native markers (`?`, `:x`, `@x`, `$x`) would share indexes with the
    /// numbered placeholders, so a template containing any is refused.
    fn prepare<'h>(&'h self, sql: &str) -> Result<SqliteStatement<'h>, Self::Error> {
        if let Some(marker) = placeholder::native_markers(sql).first() {
            return Err(rusqlite::Error::InvalidParameterName(marker.text.to_string()));
        }

        let (native, names) = placeholder::to_numbered(sql, '?');
        let stmt = self.conn.prepare(&native)?;
        if stmt.parameter_count() != names.len() {
            return Err(rusqlite::Error::InvalidParameterCount(
                names.len(),
                stmt.parameter_count(),
            ));
        }
        Ok(SqliteStatement {
            stmt,
            names,
            rows: Vec::new(),
        })
    }

    fn begin(&self) -> Result<(), Self::Error> {
        self.conn.execute_batch("BEGIN")
    }

    fn commit(&self) -> Result<(), Self::Error> {
        self.conn.execute_batch("COMMIT")
    }

    fn rollback(&self) -> Result<(), Self::Error> {
        self.conn.execute_batch("ROLLBACK")
    }

    fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

/// Prepared SQLite statement
pub struct SqliteStatement<'h> {
    stmt: rusqlite::Statement<'h>,
    /// Placeholder name for marker `?{index + 1}`
    names: Vec<String>,
    rows: DatabaseResult,
}

impl SqliteStatement<'_> {
    /// Convert a rusqlite Row to a DatabaseRow
    fn row_to_database_row(row: &Row) -> rusqlite::Result<DatabaseRow> {
        let mut db_row = DatabaseRow::new();
        let column_count = row.as_ref().column_count();

        for i in 0..column_count {
            let column_name = row.as_ref().column_name(i)?.to_string();
            let value = match row.get_ref(i)? {
                ValueRef::Null => DatabaseValue::Null,
                ValueRef::Integer(v) => DatabaseValue::Integer(v),
                ValueRef::Real(v) => DatabaseValue::Real(v),
                ValueRef::Text(v) => DatabaseValue::Text(String::from_utf8_lossy(v).to_string()),
                ValueRef::Blob(v) => DatabaseValue::Blob(v.to_vec()),
            };
            db_row.insert(column_name, value);
        }

        Ok(db_row)
    }
}

impl Statement for SqliteStatement<'_> {
    type Error = rusqlite::Error;

    fn placeholders(&self) -> &[String] {
        &self.names
    }

    fn bind(&mut self, target: &str, value: NativeParam<'_>) -> bool {
        let Some(name) = placeholder::parameter_name(target) else {
            return false;
        };
        let Some(pos) = self.names.iter().position(|n| n == name) else {
            return false;
        };
        let index = pos + 1;

        let bound = match value {
            NativeParam::Bool(v) => self.stmt.raw_bind_parameter(index, v),
            NativeParam::Int(v) => self.stmt.raw_bind_parameter(index, v),
            NativeParam::Str(v) => self.stmt.raw_bind_parameter(index, &*v),
            NativeParam::Null => self.stmt.raw_bind_parameter(index, Null),
        };
        bound.is_ok()
    }

    fn execute(&mut self) -> Result<(), Self::Error> {
        let mut buffered = Vec::new();
        let mut rows = self.stmt.raw_query();
        while let Some(row) = rows.next()? {
            buffered.push(Self::row_to_database_row(row)?);
        }
        self.rows = buffered;
        Ok(())
    }

    fn fetch_all(&mut self) -> DatabaseResult {
        std::mem::take(&mut self.rows)
    }
}
