//! Transactional connection
//!
//! A [`Connection`] owns one live handle. Statements issued outside a
//! transaction go through its primary [`Executor`]; `transaction()` hands the
//! unit of work a second executor that is created on first use and reused for
//! the life of the connection. Both executors share the *same* handle, so
//! everything the unit of work runs participates in the native transaction.
//!
//! # Thread safety
//!
//! A connection is a single thread of control. It is neither `Send` nor
//! `Sync`, and calling `transaction()` again from inside a unit of work fails
//! with [`DatabaseError::TransactionActive`]; nested transactions are not
//! supported.

use super::config::ConnectionOptions;
use super::driver::Handle;
use super::error::{DatabaseError, Result};
use super::executor::Executor;
use super::params::ParameterSet;
use super::transaction::{TransactionGuard, TransactionState};
use super::value::DatabaseResult;
use std::cell::{Cell, OnceCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// A connection that can run units of work atomically
pub struct Connection<H: Handle> {
    executor: Executor<H>,
    transactional: OnceCell<Executor<H>>,
    state: Cell<TransactionState>,
}

impl<H: Handle> Connection<H> {
    /// Open a connection with the given options
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connection`] naming the database if the
    /// driver cannot establish a handle.
    pub fn open(options: &ConnectionOptions) -> Result<Self> {
        debug!(dsn = %options.dsn(H::DRIVER), "opening connection");
        let handle =
            H::open(options).map_err(|e| DatabaseError::connection(&options.database, e))?;
        Ok(Self::from_handle(handle))
    }

    /// Wrap an already open handle
    pub fn from_handle(handle: H) -> Self {
        Self {
            executor: Executor::new(Rc::new(handle)),
            transactional: OnceCell::new(),
            state: Cell::new(TransactionState::Idle),
        }
    }

    /// See [`Executor::query`]
    pub fn query(&self, sql: &str, params: &ParameterSet) -> Result<DatabaseResult> {
        self.executor.query(sql, params)
    }

    /// See [`Executor::exec`]
    pub fn exec(&self, sql: &str, params: &ParameterSet) -> Result<&Self> {
        self.executor.exec(sql, params)?;
        Ok(self)
    }

    /// Run `work` inside a transaction.
    ///
    /// Commits if `work` returns `Ok`, rolls back if it returns `Err` and
    /// hands that same error back unchanged. If `work` panics the transaction
    /// is rolled back before the panic continues.
    ///
    /// ```rust,no_run
    /// # use rust_sql_executor::prelude::*;
    /// # fn demo(conn: &SqliteConnection) -> Result<()> {
    /// let id = conn.transaction(|tx| {
    ///     tx.exec("INSERT INTO users(name) VALUES({name})", &params! { "name" => "alice" })?;
    ///     let rows = tx.query("SELECT last_insert_rowid() AS id", &params! {})?;
    ///     Ok::<_, DatabaseError>(rows[0]["id"].as_int())
    /// })?;
    /// # let _ = id;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// - [`DatabaseError::TransactionActive`] if called while a transaction
    ///   is already open on this connection
    /// - [`DatabaseError::Transaction`] if begin or commit fails
    /// - [`DatabaseError::RollbackFailed`] if `work` failed and the rollback
    ///   failed too; the original error is kept inside it. The connection
    ///   should be discarded.
    pub fn transaction<T, E, F>(&self, work: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Executor<H>) -> std::result::Result<T, E>,
        E: From<DatabaseError> + std::error::Error + Send + Sync + 'static,
    {
        if self.state.get() == TransactionState::Active {
            return Err(DatabaseError::TransactionActive.into());
        }

        let guard = TransactionGuard::begin(self.executor.handle().as_ref(), &self.state)?;

        match work(self.transactional_executor()) {
            Ok(value) => {
                guard.commit()?;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "unit of work failed, rolling back transaction");
                match guard.rollback() {
                    Ok(()) => Err(err),
                    Err(rollback_err) => {
                        error!(
                            error = %err,
                            rollback_error = %rollback_err,
                            "rollback failed, connection state is unknown"
                        );
                        Err(DatabaseError::RollbackFailed {
                            source: Box::new(rollback_err),
                            original: Box::new(err),
                        }
                        .into())
                    }
                }
            }
        }
    }

    fn transactional_executor(&self) -> &Executor<H> {
        self.transactional.get_or_init(|| {
            debug!("creating transactional executor");
            Executor::new(Rc::clone(self.executor.handle()))
        })
    }

    /// Whether the transactional executor has been created yet
    pub fn has_transactional_executor(&self) -> bool {
        self.transactional.get().is_some()
    }

    pub fn state(&self) -> TransactionState {
        self.state.get()
    }

    pub fn in_transaction(&self) -> bool {
        self.state.get() == TransactionState::Active
    }
}

impl<H: Handle> fmt::Debug for Connection<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("driver", &H::DRIVER)
            .field("state", &self.state.get())
            .field("transactional", &self.has_transactional_executor())
            .finish()
    }
}
