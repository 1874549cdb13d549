//! Statement execution
//!
//! An [`Executor`] turns a `{name}` template plus a [`ParameterSet`] into a
//! prepared, bound and executed statement. Every statement goes through the
//! same path: prepare, map each parameter to its native type, bind it under
//! its brace-delimited placeholder, check nothing was left unbound, execute.

use super::driver::{Handle, Statement};
use super::error::{DatabaseError, Result};
use super::params::ParameterSet;
use super::placeholder::placeholder;
use super::value::DatabaseResult;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Runs statements against one live handle
pub struct Executor<H: Handle> {
    handle: Rc<H>,
}

impl<H: Handle> Executor<H> {
    pub(crate) fn new(handle: Rc<H>) -> Self {
        Self { handle }
    }

    pub(crate) fn handle(&self) -> &Rc<H> {
        &self.handle
    }

    /// Execute a statement and return all of its rows.
    ///
    /// Rows come back in whatever order the engine produced them.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Prepare`], [`DatabaseError::Bind`],
    /// [`DatabaseError::UnboundPlaceholder`] or [`DatabaseError::Execution`]
    /// carrying the SQL text. No partial result is ever returned.
    pub fn query(&self, sql: &str, params: &ParameterSet) -> Result<DatabaseResult> {
        let mut statement = self.prepare_and_run(sql, params)?;
        Ok(statement.fetch_all())
    }

    /// Execute a statement, discarding any rows, and return `self` for chaining
    ///
    /// ```rust,no_run
    /// # use rust_sql_executor::prelude::*;
    /// # fn demo(conn: &SqliteConnection) -> Result<()> {
    /// conn.transaction(|tx| {
    ///     tx.exec("DELETE FROM carts WHERE user_id = {id}", &params! { "id" => 7 })?
    ///         .exec("DELETE FROM users WHERE id = {id}", &params! { "id" => 7 })?;
    ///     Ok::<_, DatabaseError>(())
    /// })
    /// # }
    /// ```
    pub fn exec(&self, sql: &str, params: &ParameterSet) -> Result<&Self> {
        self.prepare_and_run(sql, params)?;
        Ok(self)
    }

    /// Whether the underlying handle has a native transaction open
    pub fn in_transaction(&self) -> bool {
        self.handle.in_transaction()
    }

    fn prepare_and_run(&self, sql: &str, params: &ParameterSet) -> Result<H::Statement<'_>> {
        if sql.trim().is_empty() {
            return Err(DatabaseError::EmptyStatement);
        }

        let mut statement = self
            .handle
            .prepare(sql)
            .map_err(|e| DatabaseError::prepare(sql, e))?;

        for (name, value) in params.iter() {
            if !statement.bind(&placeholder(name), value.to_native()) {
                return Err(DatabaseError::bind(name, sql));
            }
        }

        if let Some(missing) = statement
            .placeholders()
            .iter()
            .find(|name| !params.contains(name.as_str()))
        {
            return Err(DatabaseError::unbound(missing, sql));
        }

        debug!(sql = %sql, params = params.len(), "executing statement");
        statement
            .execute()
            .map_err(|e| DatabaseError::execution(sql, e))?;

        Ok(statement)
    }
}

impl<H: Handle> fmt::Debug for Executor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("driver", &H::DRIVER)
            .field("in_transaction", &self.handle.in_transaction())
            .finish()
    }
}
