//! The blocking driver contract.
//!
//! These traits describe what the renderer and decoders need from a database
//! driver: prepared statements with 1-based typed binding, and a forward-only
//! cursor whose typed getters are paired with a was-null query.
//! `stacksql-orm` implements them on top of sqlx.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::param::ParameterKind;

/// An open database connection.
pub trait Connection {
    /// Prepares `sql` for execution. The statement borrows the connection.
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>>;

    /// Closes the connection.
    fn close(self: Box<Self>) -> Result<()>;
}

/// A prepared statement with positional `?` placeholders.
///
/// Positions start at 1. Dropping the statement releases it.
pub trait Statement {
    /// Binds a NULL of the given kind.
    fn set_null(&mut self, position: usize, kind: ParameterKind) -> Result<()>;

    /// Binds an integer.
    fn set_long(&mut self, position: usize, value: i64) -> Result<()>;

    /// Binds a string.
    fn set_string(&mut self, position: usize, value: &str) -> Result<()>;

    /// Binds a date.
    fn set_date(&mut self, position: usize, value: NaiveDate) -> Result<()>;

    /// Binds a time of day.
    fn set_time(&mut self, position: usize, value: NaiveTime) -> Result<()>;

    /// Binds a timestamp.
    fn set_timestamp(&mut self, position: usize, value: NaiveDateTime) -> Result<()>;

    /// Binds a double.
    fn set_double(&mut self, position: usize, value: f64) -> Result<()>;

    /// Executes the statement, discarding any result.
    fn execute(&mut self) -> Result<()>;

    /// Executes a mutation and returns the number of affected rows.
    fn execute_update(&mut self) -> Result<u64>;

    /// Executes a query and returns a cursor over its rows.
    fn execute_query(&mut self) -> Result<Box<dyn ResultCursor + '_>>;
}

/// A forward-only cursor over result rows.
///
/// Getters return the type's zero value for a NULL cell; callers consult
/// [`ResultCursor::was_null`] right after the read to tell the two apart.
pub trait ResultCursor {
    /// Moves to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Reads an 8-bit integer.
    fn get_byte(&self, column: &str) -> Result<i8>;

    /// Reads a 16-bit integer.
    fn get_short(&self, column: &str) -> Result<i16>;

    /// Reads a 32-bit integer.
    fn get_int(&self, column: &str) -> Result<i32>;

    /// Reads a 64-bit integer.
    fn get_long(&self, column: &str) -> Result<i64>;

    /// Reads an integer of arbitrary width.
    fn get_big_int(&self, column: &str) -> Result<i128>;

    /// Reads a string.
    fn get_string(&self, column: &str) -> Result<String>;

    /// Reads a date-only value.
    fn get_date(&self, column: &str) -> Result<NaiveDate>;

    /// Reads a time of day.
    fn get_time(&self, column: &str) -> Result<NaiveTime>;

    /// Reads a date and time of day.
    fn get_timestamp(&self, column: &str) -> Result<NaiveDateTime>;

    /// Reads a double.
    fn get_double(&self, column: &str) -> Result<f64>;

    /// Returns whether the cell read last was NULL.
    fn was_null(&self) -> bool;
}
