//! # stacksql-core
//!
//! A stack-based SQL renderer with per-dialect parameterized output and typed
//! result decoding.
//!
//! This crate provides:
//! - Builders describing SELECT, INSERT, UPDATE and DELETE statements as
//!   expression trees
//! - Dialects that render a tree into SQL text plus ordered `?` parameters
//! - Decoders mapping nullable result cells back into `Option<T>`
//! - The blocking driver traits the renderer and decoders are written against
//!
//! ## Rendering
//!
//! A builder emits operators in post-order; the dialect keeps intermediate
//! segments on a stack and ends with the complete statement:
//!
//! ```rust
//! use stacksql_core::builder::{col, Emit, Select};
//! use stacksql_core::dialect::MySqlDialect;
//! use stacksql_core::Parameter;
//!
//! let query = Select::new("users")
//!     .columns([col("id"), col("name")])
//!     .filter(col("id").eq(5));
//!
//! let segment = query.render(&mut MySqlDialect::new());
//! assert_eq!(segment.sql(), "SELECT `id`, `name` FROM `users` WHERE `id` = ?");
//! assert_eq!(segment.parameters(), &[Parameter::Int(Some(5))]);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Constants never reach the SQL text. Each one becomes a placeholder bound
//! at execution time:
//!
//! ```rust
//! use stacksql_core::builder::{col, Emit, Select};
//! use stacksql_core::dialect::MySqlDialect;
//!
//! let user_input = "'; DROP TABLE users; --";
//! let segment = Select::new("users")
//!     .column(col("id"))
//!     .filter(col("name").eq(user_input))
//!     .render(&mut MySqlDialect::new());
//!
//! assert_eq!(segment.sql(), "SELECT `id` FROM `users` WHERE `name` = ?");
//! ```
//!
//! ## Date Arithmetic
//!
//! Periods are [`chrono::TimeDelta`] values, truncated to milliseconds and
//! written in the coarsest unit that expresses them exactly:
//!
//! ```rust
//! use chrono::TimeDelta;
//! use stacksql_core::builder::{now, Emit};
//! use stacksql_core::dialect::{H2Dialect, MySqlDialect};
//!
//! let expires = now().add_period(TimeDelta::minutes(90));
//! assert_eq!(
//!     expires.render(&mut MySqlDialect::new()).sql(),
//!     "DATE_ADD(NOW(), INTERVAL '1 30' HOUR_MINUTE)"
//! );
//! assert_eq!(
//!     expires.render(&mut H2Dialect::new()).sql(),
//!     "DATEADD(MINUTE, 90, NOW())"
//! );
//! ```

pub mod builder;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod event;
pub mod param;
pub mod period;
pub mod row;
pub mod segment;
pub mod stack;

pub use builder::{col, Delete, Emit, Expr, Insert, Select, Update};
pub use dialect::{H2Dialect, MySqlDialect, SqlDialect};
pub use driver::{Connection, ResultCursor, Statement};
pub use error::{Error, Result};
pub use event::Operator;
pub use param::{IntoParameter, Parameter, ParameterKind};
pub use row::Row;
pub use segment::Segment;
