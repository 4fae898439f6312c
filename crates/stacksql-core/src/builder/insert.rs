//! INSERT statements using the typestate pattern.

use std::marker::PhantomData;

use super::expr::Expr;
use super::{emit_list, Emit};
use crate::event::Operator;

// Typestate markers

/// Marker: no value given yet.
pub struct NoValues;
/// Marker: at least one value given.
pub struct HasValues;

/// An INSERT statement.
///
/// Values are either named with [`Insert::set`], producing an explicit column
/// list, or positional with [`Insert::values`].
pub struct Insert<State> {
    table: String,
    columns: Vec<String>,
    values: Vec<Expr>,
    _state: PhantomData<State>,
}

impl Insert<NoValues> {
    /// Starts an INSERT into `table`.
    #[must_use]
    pub fn into_table(table: &str) -> Self {
        Self {
            table: String::from(table),
            columns: Vec::new(),
            values: Vec::new(),
            _state: PhantomData,
        }
    }

    /// Inserts positional values, one per table column.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn values(self, values: impl IntoIterator<Item = Expr>) -> Insert<HasValues> {
        let values: Vec<Expr> = values.into_iter().collect();
        assert!(!values.is_empty(), "insert requires at least one value");
        Insert {
            table: self.table,
            columns: Vec::new(),
            values,
            _state: PhantomData,
        }
    }
}

impl<State> Insert<State> {
    /// Sets the value of `column`.
    ///
    /// # Panics
    ///
    /// Panics when mixed with positional values.
    #[must_use]
    pub fn set(mut self, column: &str, value: impl Into<Expr>) -> Insert<HasValues> {
        assert!(
            self.columns.len() == self.values.len(),
            "insert cannot mix named and positional values"
        );
        self.columns.push(String::from(column));
        self.values.push(value.into());
        Insert {
            table: self.table,
            columns: self.columns,
            values: self.values,
            _state: PhantomData,
        }
    }
}

impl Emit for Insert<HasValues> {
    fn emit(&self, out: &mut Vec<Operator>) {
        if self.columns.is_empty() {
            emit_list(&self.values, out, "insert");
            out.push(Operator::Insert(self.table.clone()));
            return;
        }
        let columns: Vec<Expr> = self
            .columns
            .iter()
            .map(|name| super::col(name))
            .collect();
        emit_list(&columns, out, "insert");
        emit_list(&self.values, out, "insert");
        out.push(Operator::InsertWithColumns(self.table.clone()));
    }
}
