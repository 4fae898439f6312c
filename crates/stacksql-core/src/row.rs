//! Typed access to the current result row.

use chrono::{NaiveDateTime, NaiveTime};

use crate::dialect::SqlDialect;
use crate::driver::ResultCursor;
use crate::error::Result;

/// The row a cursor is positioned on, decoded through a dialect.
///
/// Row mappers receive a `Row` and read columns by name. Every accessor
/// returns `None` for a NULL cell.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    dialect: &'a dyn SqlDialect,
    cursor: &'a dyn ResultCursor,
}

impl<'a> Row<'a> {
    /// Creates a row view.
    #[must_use]
    pub fn new(dialect: &'a dyn SqlDialect, cursor: &'a dyn ResultCursor) -> Self {
        Self { dialect, cursor }
    }

    /// Decodes an 8-bit integer column.
    pub fn byte(&self, name: &str) -> Result<Option<i8>> {
        self.dialect.byte_result(self.cursor, name)
    }

    /// Decodes a 16-bit integer column.
    pub fn short(&self, name: &str) -> Result<Option<i16>> {
        self.dialect.short_result(self.cursor, name)
    }

    /// Decodes a 32-bit integer column.
    pub fn int(&self, name: &str) -> Result<Option<i32>> {
        self.dialect.int_result(self.cursor, name)
    }

    /// Decodes a 64-bit integer column.
    pub fn long(&self, name: &str) -> Result<Option<i64>> {
        self.dialect.long_result(self.cursor, name)
    }

    /// Decodes a wide integer column.
    pub fn big_int(&self, name: &str) -> Result<Option<i128>> {
        self.dialect.big_int_result(self.cursor, name)
    }

    /// Decodes a string column.
    pub fn string(&self, name: &str) -> Result<Option<String>> {
        self.dialect.string_result(self.cursor, name)
    }

    /// Reads the logical date of a column, as the dialect defines it.
    pub fn date(&self, name: &str) -> Result<Option<NaiveDateTime>> {
        self.dialect.date_result(self.cursor, name)
    }

    /// Decodes a time-of-day column.
    pub fn time(&self, name: &str) -> Result<Option<NaiveTime>> {
        self.dialect.time_result(self.cursor, name)
    }

    /// Decodes a timestamp column.
    pub fn timestamp(&self, name: &str) -> Result<Option<NaiveDateTime>> {
        self.dialect.timestamp_result(self.cursor, name)
    }

    /// Decodes a boolean stored as an integer. Any nonzero value is `true`.
    pub fn bool(&self, name: &str) -> Result<Option<bool>> {
        self.dialect.bool_result(self.cursor, name)
    }

    /// Decodes a double column.
    pub fn double(&self, name: &str) -> Result<Option<f64>> {
        self.dialect.double_result(self.cursor, name)
    }
}
