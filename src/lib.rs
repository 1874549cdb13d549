//! # Rust SQL Executor
//!
//! A small synchronous layer for running parameterized SQL and grouping
//! statements into atomic transactions.
//!
//! ## Features
//!
//! - **Named parameters**: statements name their parameters as `{name}`, so
//!   `{id}` never collides with `{identifier}` or a positional `?`
//! - **Closed parameter types**: values are `bool`, integers, strings,
//!   floats (bound as text) or null; anything else is a compile error
//! - **Atomic units of work**: `transaction()` commits when the closure
//!   returns `Ok` and rolls back when it returns `Err`, handing the same
//!   error back
//! - **Pluggable drivers**: SQLite ships in the box; other drivers implement
//!   [`Handle`] and [`Statement`]
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! rust_sql_executor = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! ### Basic Usage
//!
//! ```rust
//! use rust_sql_executor::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let conn = SqliteConnection::open(&ConnectionOptions::new(":memory:"))?;
//!
//!     conn.exec("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", &params! {})?
//!         .exec(
//!             "INSERT INTO t(id, name) VALUES({id}, {name})",
//!             &params! { "id" => 1, "name" => "a" },
//!         )?;
//!
//!     let rows = conn.query("SELECT name FROM t WHERE id = {id}", &params! { "id" => 1 })?;
//!     assert_eq!(rows[0]["name"].as_str(), Some("a"));
//!     Ok(())
//! }
//! ```
//!
//! ### Working with Transactions
//!
//! ```rust
//! use rust_sql_executor::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let conn = SqliteConnection::open(&ConnectionOptions::new(":memory:"))?;
//!     conn.exec("CREATE TABLE accounts (id INTEGER PRIMARY KEY, balance INTEGER)", &params! {})?;
//!
//!     let failed = conn.transaction(|tx| {
//!         tx.exec("INSERT INTO accounts VALUES({id}, {balance})", &params! { "id" => 1, "balance" => 100 })?;
//!         tx.exec("INSERT INTO accounts VALUES({id}, {balance})", &params! { "id" => 1, "balance" => 50 })?;
//!         Ok::<_, DatabaseError>(())
//!     });
//!     assert!(failed.is_err());
//!
//!     // Neither insert survived
//!     assert!(conn.query("SELECT * FROM accounts", &params! {})?.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ## Project Structure
//!
//! ```text
//! src/
//! ├── core/
//! │   ├── config.rs       # Connection options, data-source string
//! │   ├── connection.rs   # Transactional connection
//! │   ├── driver.rs       # Handle / Statement driver traits
//! │   ├── error.rs        # Error types
//! │   ├── executor.rs     # query / exec
//! │   ├── params.rs       # ParameterSet, params! macro
//! │   ├── placeholder.rs  # {name} scanning and rewriting
//! │   ├── transaction.rs  # Transaction state, rollback guard
//! │   └── value.rs        # Parameter and result values
//! ├── backends/
//! │   └── sqlite.rs       # rusqlite driver
//! └── lib.rs
//! ```

/// Core execution layer types and traits
pub mod core;

/// Database backend implementations
pub mod backends;

/// Prelude for convenient imports
///
/// ```rust
/// use rust_sql_executor::prelude::*;
///
/// fn main() -> Result<()> {
///     let conn = SqliteConnection::open(&ConnectionOptions::new(":memory:"))?;
///     conn.query("SELECT 1 AS one", &params! {})?;
///     Ok(())
/// }
/// ```
pub mod prelude {
    pub use crate::core::{
        ConnectionOptions, Connection, DatabaseError, DatabaseResult, DatabaseRow, DatabaseValue,
        Executor, Param, ParameterSet, Result, TransactionState,
    };
    pub use crate::params;

    #[cfg(feature = "sqlite")]
    pub use crate::backends::SqliteConnection;
}

// Re-export at root level for convenience
pub use crate::core::{
    Connection, ConnectionOptions, DatabaseError, DatabaseResult, DatabaseRow, DatabaseValue,
    Executor, Handle, NativeParam, Param, ParamType, ParameterSet, Result, Statement,
    TransactionState,
};

#[cfg(feature = "sqlite")]
pub use crate::backends::{SqliteConnection, SqliteHandle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let params = params! { "id" => 1 };
        assert_eq!(params.get("id"), Some(&Param::Int(1)));
        assert_eq!(TransactionState::default(), TransactionState::Idle);
    }

    #[test]
    fn test_param_conversions() {
        let val: Param = 42.into();
        assert_eq!(val.param_type(), ParamType::Int);

        let val: Param = "test".into();
        assert_eq!(val, Param::Str("test".to_string()));

        let val: Param = 2.5f32.into();
        assert_eq!(val.param_type(), ParamType::Str);
    }
}
