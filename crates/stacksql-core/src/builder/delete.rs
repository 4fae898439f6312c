//! DELETE statements.

use super::expr::Expr;
use super::Emit;
use crate::event::Operator;

/// A DELETE statement.
#[derive(Debug, Clone)]
pub struct Delete {
    table: String,
    filter: Option<Expr>,
}

impl Delete {
    /// Starts a DELETE from `table`.
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self {
            table: String::from(table),
            filter: None,
        }
    }

    /// Restricts the delete to rows matching `condition`.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter = Some(condition);
        self
    }
}

impl Emit for Delete {
    fn emit(&self, out: &mut Vec<Operator>) {
        match &self.filter {
            Some(filter) => {
                out.push(Operator::Table(self.table.clone()));
                filter.emit(out);
                out.push(Operator::Delete);
            }
            // The unfiltered form takes the table name verbatim.
            None => out.push(Operator::DeleteAll(self.table.clone())),
        }
    }
}
