//! # stacksql-orm
//!
//! A blocking execution environment for `stacksql` statements.
//!
//! This crate provides:
//! - [`DialectEnvironment`] to run compiled statements and map result rows
//! - [`ConnectionFactory`] implementations that open or wrap connections
//! - A blocking driver over sqlx for MySQL and SQLite
//! - [`ConnectionSettings`] loadable from serde sources or the environment
//!
//! ## Quick Start
//!
//! ```no_run
//! use stacksql_core::builder::{col, Insert, Select};
//! use stacksql_orm::connect_sqlite;
//!
//! # fn main() -> stacksql_orm::Result<()> {
//! let names = connect_sqlite("sqlite::memory:", |env| {
//!     env.run_sql("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")?;
//!     env.insert(&Insert::into_table("users").set("id", 1).set("name", "Ada"))?;
//!
//!     let query = Select::new("users")
//!         .columns([col("id"), col("name")])
//!         .filter(col("id").eq(1));
//!     env.select(&query, |row| Ok(row.string("name")?))
//! })?;
//!
//! assert_eq!(names, vec![Some(String::from("Ada"))]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scoped environments
//!
//! [`connect_mysql`], [`connect_sqlite`] and [`with_environment`] close the
//! connection when the closure returns. If both the closure and the close
//! fail, the closure's error is returned.

pub mod config;
pub mod connection;
pub mod environment;
pub mod error;
pub mod factory;

pub use config::{ConnectionSettings, DriverKind};
pub use connection::SqlxConnection;
pub use environment::{
    connect_mysql, connect_sqlite, from_settings, mysql, sqlite, with_environment,
    DialectEnvironment, DialectFactory,
};
pub use error::{OrmError, Result};
pub use factory::{ConnectionFactory, CreateConnectionFactory, SingleConnectionFactory};
