//! Native driver collaborator
//!
//! These traits are the minimum an underlying database driver must provide
//! for [`Executor`](super::executor::Executor) and
//! [`Connection`](super::connection::Connection) to sit on top of it.

use super::config::ConnectionOptions;
use super::value::{DatabaseResult, NativeParam};

/// A live, exclusively owned connection to a database
pub trait Handle: Sized {
    /// Driver prefix used when building the data-source string
    const DRIVER: &'static str;

    /// Driver diagnostic type
    type Error: std::error::Error + Send + Sync + 'static;

    /// Prepared statement borrowed from this handle
    type Statement<'h>: Statement<Error = Self::Error>
    where
        Self: 'h;

    /// Open a new handle
    fn open(options: &ConnectionOptions) -> Result<Self, Self::Error>;

    /// Compile a brace-placeholder template
    fn prepare<'h>(&'h self, sql: &str) -> Result<Self::Statement<'h>, Self::Error>;

    fn begin(&self) -> Result<(), Self::Error>;

    fn commit(&self) -> Result<(), Self::Error>;

    fn rollback(&self) -> Result<(), Self::Error>;

    /// Whether a native transaction is currently open on this handle
    fn in_transaction(&self) -> bool;
}

/// A prepared statement, valid for a single execution
pub trait Statement {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Distinct placeholder names referenced by the statement, without delimiters
    fn placeholders(&self) -> &[String];

    /// Bind a value to a `{name}` placeholder.
    ///
    /// Returns `false` if the driver refused the binding, e.g. because the
    /// statement has no such placeholder.
    fn bind(&mut self, placeholder: &str, value: NativeParam<'_>) -> bool;

    /// Run the statement to completion
    fn execute(&mut self) -> Result<(), Self::Error>;

    /// Take the rows produced by the last `execute`
    fn fetch_all(&mut self) -> DatabaseResult;
}
