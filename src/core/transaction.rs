//! Transaction state and rollback-on-drop guard

use super::driver::Handle;
use super::error::{DatabaseError, Result};
use std::cell::Cell;
use tracing::{debug, error, warn};

/// Whether a connection currently has a transaction open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    #[default]
    Idle,
    Active,
}

/// Guard that rolls back on drop if neither committed nor rolled back.
///
/// `Connection::transaction` always finishes the guard explicitly; the drop
/// path only runs when the commit failed or the unit of work panicked.
pub(crate) struct TransactionGuard<'c, H: Handle> {
    handle: &'c H,
    state: &'c Cell<TransactionState>,
    finished: bool,
}

impl<'c, H: Handle> TransactionGuard<'c, H> {
    /// Begin a native transaction and mark the connection Active
    pub(crate) fn begin(handle: &'c H, state: &'c Cell<TransactionState>) -> Result<Self> {
        handle
            .begin()
            .map_err(|e| DatabaseError::transaction("begin", e))?;
        state.set(TransactionState::Active);
        debug!("transaction started");

        Ok(Self {
            handle,
            state,
            finished: false,
        })
    }

    pub(crate) fn commit(mut self) -> Result<()> {
        self.handle
            .commit()
            .map_err(|e| DatabaseError::transaction("commit", e))?;
        self.finish();
        debug!("transaction committed");
        Ok(())
    }

    /// Roll back, handing the raw driver error back so the caller can pair
    /// it with the error that caused the rollback
    pub(crate) fn rollback(mut self) -> std::result::Result<(), H::Error> {
        self.finish();
        self.handle.rollback()
    }

    fn finish(&mut self) {
        self.finished = true;
        self.state.set(TransactionState::Idle);
    }
}

impl<H: Handle> Drop for TransactionGuard<'_, H> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.finish();

        if std::thread::panicking() {
            warn!("unit of work panicked, rolling back transaction");
        } else {
            warn!("commit failed, rolling back transaction");
        }

        if self.handle.in_transaction() {
            if let Err(e) = self.handle.rollback() {
                error!(error = %e, "rollback failed, connection state is unknown");
            }
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::backends::SqliteHandle;
    use crate::core::config::ConnectionOptions;

    fn handle() -> SqliteHandle {
        SqliteHandle::open(&ConnectionOptions::new(":memory:")).unwrap()
    }

    #[test]
    fn test_guard_commit() {
        let handle = handle();
        let state = Cell::new(TransactionState::Idle);

        let guard = TransactionGuard::begin(&handle, &state).unwrap();
        assert_eq!(state.get(), TransactionState::Active);
        assert!(handle.in_transaction());

        guard.commit().unwrap();
        assert_eq!(state.get(), TransactionState::Idle);
        assert!(!handle.in_transaction());
    }

    #[test]
    fn test_guard_rolls_back_on_drop() {
        let handle = handle();
        let state = Cell::new(TransactionState::Idle);

        {
            let _guard = TransactionGuard::begin(&handle, &state).unwrap();
            assert!(handle.in_transaction());
        }

        assert_eq!(state.get(), TransactionState::Idle);
        assert!(!handle.in_transaction());
    }

    #[test]
    fn test_guard_explicit_rollback() {
        let handle = handle();
        let state = Cell::new(TransactionState::Idle);

        let guard = TransactionGuard::begin(&handle, &state).unwrap();
        guard.rollback().unwrap();
        assert_eq!(state.get(), TransactionState::Idle);
        assert!(!handle.in_transaction());
    }
}
