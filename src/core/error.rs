//! Error types for the execution layer
//!
//! Every failure surfaced by an executor carries enough context (SQL text
//! and/or parameter name) to diagnose it without re-running the statement.

use std::error::Error as StdError;

/// Boxed driver diagnostic
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Error types for database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The driver could not establish a handle
    #[error("Could not connect to database: {database}")]
    Connection {
        database: String,
        #[source]
        source: BoxError,
    },

    /// Statement text was empty or whitespace only
    #[error("Empty SQL statement")]
    EmptyStatement,

    /// SQL template rejected by the driver
    #[error("Could not prepare SQL statement: {sql}")]
    Prepare {
        sql: String,
        #[source]
        source: BoxError,
    },

    /// A parameter value has no native parameter type
    #[error("Invalid SQL parameter type: {kind}")]
    UnsupportedType { kind: String },

    /// The driver refused to bind a parameter
    #[error("Could not bind parameter to statement: {name} (SQL: {sql})")]
    Bind { name: String, sql: String },

    /// A placeholder in the statement received no value
    #[error("No value supplied for placeholder {{{name}}} (SQL: {sql})")]
    UnboundPlaceholder { name: String, sql: String },

    /// Statement prepared and bound but failed to execute
    #[error("Could not execute SQL: {sql}")]
    Execution {
        sql: String,
        #[source]
        source: BoxError,
    },

    /// `transaction()` called while another transaction is active
    #[error("A transaction is already active on this connection")]
    TransactionActive,

    /// Begin or commit failed
    #[error("Could not {operation} transaction")]
    Transaction {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// Rollback failed after the unit of work failed
    #[error("Rollback failed after unit of work error: {original}")]
    RollbackFailed {
        #[source]
        source: BoxError,
        original: BoxError,
    },

    /// Configuration could not be parsed
    #[error("Invalid connection options: {0}")]
    InvalidConfig(String),
}

impl DatabaseError {
    pub(crate) fn connection(database: impl Into<String>, source: impl Into<BoxError>) -> Self {
        DatabaseError::Connection {
            database: database.into(),
            source: source.into(),
        }
    }

    pub(crate) fn prepare(sql: &str, source: impl Into<BoxError>) -> Self {
        DatabaseError::Prepare {
            sql: sql.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn execution(sql: &str, source: impl Into<BoxError>) -> Self {
        DatabaseError::Execution {
            sql: sql.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn bind(name: &str, sql: &str) -> Self {
        DatabaseError::Bind {
            name: name.to_string(),
            sql: sql.to_string(),
        }
    }

    pub(crate) fn unbound(name: &str, sql: &str) -> Self {
        DatabaseError::UnboundPlaceholder {
            name: name.to_string(),
            sql: sql.to_string(),
        }
    }

    /// Create an unsupported parameter type error
    pub fn unsupported_type(kind: impl Into<String>) -> Self {
        DatabaseError::UnsupportedType { kind: kind.into() }
    }

    pub(crate) fn transaction(operation: &'static str, source: impl Into<BoxError>) -> Self {
        DatabaseError::Transaction {
            operation,
            source: source.into(),
        }
    }

    /// SQL text of the statement that failed, if the error is statement-scoped
    pub fn sql(&self) -> Option<&str> {
        match self {
            DatabaseError::Prepare { sql, .. }
            | DatabaseError::Bind { sql, .. }
            | DatabaseError::UnboundPlaceholder { sql, .. }
            | DatabaseError::Execution { sql, .. } => Some(sql),
            _ => None,
        }
    }

    /// Parameter or placeholder name involved in a binding failure
    pub fn parameter(&self) -> Option<&str> {
        match self {
            DatabaseError::Bind { name, .. } | DatabaseError::UnboundPlaceholder { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }

    /// The connection is in an unknown transactional state and should be discarded
    pub fn is_fatal(&self) -> bool {
        matches!(self, DatabaseError::RollbackFailed { .. })
    }

    /// Original unit-of-work error preserved by a failed rollback
    pub fn original(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            DatabaseError::RollbackFailed { original, .. } => Some(original.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatabaseError::bind("id", "SELECT {id}");
        assert_eq!(
            err.to_string(),
            "Could not bind parameter to statement: id (SQL: SELECT {id})"
        );

        let err = DatabaseError::unbound("name", "SELECT {name}");
        assert_eq!(
            err.to_string(),
            "No value supplied for placeholder {name} (SQL: SELECT {name})"
        );

        let err = DatabaseError::unsupported_type("array");
        assert_eq!(err.to_string(), "Invalid SQL parameter type: array");
    }

    #[test]
    fn test_error_context() {
        let err = DatabaseError::execution("DELETE FROM t", "constraint failed");
        assert_eq!(err.sql(), Some("DELETE FROM t"));
        assert_eq!(err.parameter(), None);
        assert_eq!(
            StdError::source(&err).map(|s| s.to_string()),
            Some("constraint failed".to_string())
        );

        let err = DatabaseError::bind("id", "SELECT {id}");
        assert_eq!(err.parameter(), Some("id"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_rollback_failure_keeps_original() {
        let err = DatabaseError::RollbackFailed {
            source: "disk I/O error".into(),
            original: Box::new(DatabaseError::execution("INSERT", "UNIQUE constraint failed")),
        };
        assert!(err.is_fatal());
        assert_eq!(
            err.original().map(|e| e.to_string()),
            Some("Could not execute SQL: INSERT".to_string())
        );
        assert_eq!(
            err.to_string(),
            "Rollback failed after unit of work error: Could not execute SQL: INSERT"
        );
    }
}
