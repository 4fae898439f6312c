//! Operator events.
//!
//! An [`Operator`] is one call on a [`SqlDialect`], captured as data. The
//! builder produces operator sequences in post-order; [`replay`] feeds a
//! sequence to a dialect and returns the finished statement.

use chrono::TimeDelta;

use crate::dialect::SqlDialect;
use crate::param::Parameter;
use crate::segment::Segment;

/// One renderer operation with its literal arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Table(String),
    Column(String),
    QualifiedColumn { table: String, name: String },
    Constant(Parameter),
    ColumnList,
    AddToList,
    Select,
    Rename(String),
    Where,
    Having,
    And,
    Or,
    Eq,
    Greater,
    Add,
    Subtraction,
    LeftJoin,
    RightJoin,
    InnerJoin,
    OuterJoin,
    Max,
    Min,
    Sum,
    Count,
    Now,
    AddPeriod(TimeDelta),
    SubPeriod(TimeDelta),
    Insert(String),
    InsertWithColumns(String),
    Assign,
    AssignList,
    AddAssign,
    UpdateWithFilter,
    UpdateAll,
    Delete,
    DeleteAll(String),
    Order,
    Group,
    DescKey,
    Limit(u64),
    LimitWithOffset { count: u64, offset: u64 },
}

impl Operator {
    /// Returns how many segments the operator pops.
    #[must_use]
    pub const fn pops(&self) -> usize {
        match self {
            Self::Table(_)
            | Self::Column(_)
            | Self::QualifiedColumn { .. }
            | Self::Constant(_)
            | Self::ColumnList
            | Self::AssignList
            | Self::Now
            | Self::DeleteAll(_) => 0,
            Self::Rename(_)
            | Self::Max
            | Self::Min
            | Self::Sum
            | Self::Count
            | Self::AddPeriod(_)
            | Self::SubPeriod(_)
            | Self::Insert(_)
            | Self::DescKey
            | Self::Limit(_)
            | Self::LimitWithOffset { .. } => 1,
            Self::AddToList
            | Self::Select
            | Self::Where
            | Self::Having
            | Self::And
            | Self::Or
            | Self::Eq
            | Self::Greater
            | Self::Add
            | Self::Subtraction
            | Self::InsertWithColumns(_)
            | Self::Assign
            | Self::AddAssign
            | Self::UpdateAll
            | Self::Delete
            | Self::Order
            | Self::Group => 2,
            Self::LeftJoin
            | Self::RightJoin
            | Self::InnerJoin
            | Self::OuterJoin
            | Self::UpdateWithFilter => 3,
        }
    }

    /// Returns how many segments the operator pushes.
    #[must_use]
    pub const fn pushes(&self) -> usize {
        match self {
            Self::ColumnList | Self::AssignList => 0,
            _ => 1,
        }
    }

    /// Returns the net change in stack depth.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn stack_effect(&self) -> isize {
        self.pushes() as isize - self.pops() as isize
    }

    /// Applies the operator to `dialect`.
    pub fn apply(&self, dialect: &mut dyn SqlDialect) {
        match self {
            Self::Table(name) => dialect.table(name),
            Self::Column(name) => dialect.column(name),
            Self::QualifiedColumn { table, name } => dialect.qualified_column(table, name),
            Self::Constant(value) => dialect.constant(value.clone()),
            Self::ColumnList => dialect.column_list(),
            Self::AddToList => dialect.add_to_list(),
            Self::Select => dialect.select(),
            Self::Rename(alias) => dialect.rename(alias),
            Self::Where => dialect.where_clause(),
            Self::Having => dialect.having(),
            Self::And => dialect.and(),
            Self::Or => dialect.or(),
            Self::Eq => dialect.eq(),
            Self::Greater => dialect.greater(),
            Self::Add => dialect.add(),
            Self::Subtraction => dialect.subtraction(),
            Self::LeftJoin => dialect.left_join(),
            Self::RightJoin => dialect.right_join(),
            Self::InnerJoin => dialect.inner_join(),
            Self::OuterJoin => dialect.outer_join(),
            Self::Max => dialect.max(),
            Self::Min => dialect.min(),
            Self::Sum => dialect.sum(),
            Self::Count => dialect.count(),
            Self::Now => dialect.now(),
            Self::AddPeriod(period) => dialect.add_period(*period),
            Self::SubPeriod(period) => dialect.sub_period(*period),
            Self::Insert(table) => dialect.insert(table),
            Self::InsertWithColumns(table) => dialect.insert_with_columns(table),
            Self::Assign => dialect.assign(),
            Self::AssignList => dialect.assign_list(),
            Self::AddAssign => dialect.add_assign(),
            Self::UpdateWithFilter => dialect.update_with_filter(),
            Self::UpdateAll => dialect.update_all(),
            Self::Delete => dialect.delete(),
            Self::DeleteAll(name) => dialect.delete_all(name),
            Self::Order => dialect.order(),
            Self::Group => dialect.group(),
            Self::DescKey => dialect.desc_key(),
            Self::Limit(count) => dialect.limit(*count),
            Self::LimitWithOffset { count, offset } => {
                dialect.limit_with_offset(*count, *offset);
            }
        }
    }
}

/// Resets `dialect`, applies every operator and returns the finished statement.
///
/// # Panics
///
/// Panics if an operator underflows the stack or the sequence does not
/// leave exactly one segment.
pub fn replay(dialect: &mut dyn SqlDialect, operators: &[Operator]) -> Segment {
    dialect.reset();
    for operator in operators {
        operator.apply(dialect);
    }
    dialect.finish()
}

/// Returns the stack depth after running `operators` from an empty stack.
#[must_use]
pub fn net_depth(operators: &[Operator]) -> isize {
    operators.iter().map(Operator::stack_effect).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;

    #[test]
    fn test_stack_effect_matches_dialect() {
        let operators = vec![
            Operator::Table(String::from("users")),
            Operator::Column(String::from("id")),
            Operator::Constant(Parameter::Int(Some(5))),
            Operator::Eq,
            Operator::Where,
            Operator::Column(String::from("id")),
            Operator::ColumnList,
            Operator::Column(String::from("name")),
            Operator::AddToList,
            Operator::Select,
        ];
        assert_eq!(net_depth(&operators), 1);

        let mut dialect = MySqlDialect::new();
        let mut depth = 0_isize;
        for operator in &operators {
            operator.apply(&mut dialect);
            depth += operator.stack_effect();
            assert_eq!(dialect.stack().depth() as isize, depth, "after {operator:?}");
        }
    }

    #[test]
    fn test_replay_resets_leftovers() {
        let mut dialect = MySqlDialect::new();
        dialect.column("stale");
        let segment = replay(&mut dialect, &[Operator::Now]);
        assert_eq!(segment.sql(), "NOW()");
    }

    #[test]
    #[should_panic(expected = "render stack underflow in `and`")]
    fn test_underflow_names_operator() {
        let mut dialect = MySqlDialect::new();
        let _ = replay(&mut dialect, &[Operator::Now, Operator::And]);
    }
}
