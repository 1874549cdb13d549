//! Core execution layer types and traits
//!
//! This module provides the driver collaborator traits, parameter and value
//! types, the statement executor and the transactional connection.

pub mod config;
pub mod connection;
pub mod driver;
pub mod error;
pub mod executor;
pub mod params;
pub mod placeholder;
pub mod transaction;
pub mod value;

// Re-export commonly used types
pub use config::ConnectionOptions;
pub use connection::Connection;
pub use driver::{Handle, Statement};
pub use error::{BoxError, DatabaseError, Result};
pub use executor::Executor;
pub use params::ParameterSet;
pub use transaction::TransactionState;
pub use value::{DatabaseResult, DatabaseRow, DatabaseValue, NativeParam, Param, ParamType};
