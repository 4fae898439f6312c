//! Statement builders.
//!
//! Builders are plain values describing a statement as an expression tree.
//! [`Emit`] walks a tree in post-order and produces the operator sequence a
//! dialect renders; the sequence always leaves exactly one segment.
//!
//! # Example
//!
//! ```rust
//! use stacksql_core::builder::{col, Emit, Insert, Update};
//! use stacksql_core::dialect::MySqlDialect;
//!
//! let insert = Insert::into_table("t").set("a", 1).set("b", "x");
//! let segment = insert.render(&mut MySqlDialect::new());
//! assert_eq!(segment.sql(), "INSERT INTO `t` (`a`, `b`) VALUES (?, ?)");
//!
//! let update = Update::table("t").set("b", "y").filter(col("a").eq(1));
//! let segment = update.render(&mut MySqlDialect::new());
//! assert_eq!(segment.sql(), "UPDATE `t` SET `b` = ? WHERE `a` = ?");
//! ```

mod delete;
mod expr;
mod insert;
mod select;
mod update;

pub use delete::Delete;
pub use expr::{col, now, qualified, val, Aggregate, BinaryOp, Expr};
pub use insert::{HasValues, Insert, NoValues};
pub use select::{table, JoinKind, Select, Source};
pub use update::{HasSet, NoSet, Update};

use crate::dialect::SqlDialect;
use crate::event::{replay, Operator};
use crate::segment::Segment;

/// A tree that emits renderer operators.
pub trait Emit {
    /// Appends this tree's operators to `out` in post-order.
    fn emit(&self, out: &mut Vec<Operator>);

    /// Returns this tree's operators.
    fn operators(&self) -> Vec<Operator> {
        let mut out = Vec::new();
        self.emit(&mut out);
        out
    }

    /// Renders this tree with `dialect`, which is reset first.
    fn render(&self, dialect: &mut dyn SqlDialect) -> Segment {
        replay(dialect, &self.operators())
    }
}

/// Emits a comma list: the first item, `ColumnList`, then each further item
/// followed by `AddToList`.
///
/// # Panics
///
/// Panics if `items` is empty.
fn emit_list<T: Emit>(items: &[T], out: &mut Vec<Operator>, clause: &str) {
    let Some((first, rest)) = items.split_first() else {
        panic!("{clause} requires at least one item");
    };
    first.emit(out);
    out.push(Operator::ColumnList);
    for item in rest {
        item.emit(out);
        out.push(Operator::AddToList);
    }
}
