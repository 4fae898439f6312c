//! UPDATE statements using the typestate pattern.

use std::marker::PhantomData;

use super::expr::Expr;
use super::Emit;
use crate::event::Operator;

// Typestate markers

/// Marker: no SET assignment yet.
pub struct NoSet;
/// Marker: at least one SET assignment.
pub struct HasSet;

/// An UPDATE statement.
///
/// Without a filter every row of the table is updated.
pub struct Update<Set> {
    table: String,
    assignments: Vec<(String, Expr)>,
    filter: Option<Expr>,
    _state: PhantomData<Set>,
}

impl Update<NoSet> {
    /// Starts an UPDATE of `table`.
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self {
            table: String::from(table),
            assignments: Vec::new(),
            filter: None,
            _state: PhantomData,
        }
    }
}

impl<Set> Update<Set> {
    /// Assigns `value` to `column`. The value may be any expression.
    #[must_use]
    pub fn set(mut self, column: &str, value: impl Into<Expr>) -> Update<HasSet> {
        self.assignments.push((String::from(column), value.into()));
        Update {
            table: self.table,
            assignments: self.assignments,
            filter: self.filter,
            _state: PhantomData,
        }
    }

    /// Restricts the update to rows matching `condition`.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter = Some(condition);
        self
    }
}

impl Emit for Update<HasSet> {
    fn emit(&self, out: &mut Vec<Operator>) {
        out.push(Operator::Table(self.table.clone()));
        for (index, (column, value)) in self.assignments.iter().enumerate() {
            out.push(Operator::Column(column.clone()));
            value.emit(out);
            out.push(Operator::Assign);
            out.push(if index == 0 {
                Operator::AssignList
            } else {
                Operator::AddAssign
            });
        }
        match &self.filter {
            Some(filter) => {
                filter.emit(out);
                out.push(Operator::UpdateWithFilter);
            }
            None => out.push(Operator::UpdateAll),
        }
    }
}
