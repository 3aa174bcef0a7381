//! Runtime support for generated mappers
//!
//! Connection pooling, dynamic criteria, bind-parameter statements, the `money` type handler
//! and the mapper error type. Generated code refers to these through the context's
//! `runtimePath`.

pub mod criteria;
pub mod database;
pub mod error;
pub mod money;
pub mod statement;

pub use criteria::{Condition, Criteria, Criterion, Dialect, Example, Operator, Value};
pub use database::{Database, DatabaseConfig, DbBackend, DbConnection, Pool, PooledConnection};
pub use error::MapperError;
pub use money::{CurrencyUnit, Money, MoneyError};
pub use statement::{CountRow, SqlStatement};
