//! SELECT queries and their sources.

use super::expr::Expr;
use super::{emit_list, Emit};
use crate::event::Operator;

/// Creates a table source.
#[must_use]
pub fn table(name: &str) -> Source {
    Source::Table(String::from(name))
}

/// Join kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Right,
    Inner,
    /// `FULL OUTER JOIN`.
    Outer,
}

impl JoinKind {
    const fn operator(self) -> Operator {
        match self {
            Self::Left => Operator::LeftJoin,
            Self::Right => Operator::RightJoin,
            Self::Inner => Operator::InnerJoin,
            Self::Outer => Operator::OuterJoin,
        }
    }
}

/// Something rows are selected from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A named table.
    Table(String),
    /// Two sources joined on a condition.
    Join {
        kind: JoinKind,
        left: Box<Source>,
        right: Box<Source>,
        on: Expr,
    },
    /// A derived table.
    Subquery { query: Box<Select>, alias: String },
}

impl Source {
    fn join(self, kind: JoinKind, right: impl Into<Self>, on: Expr) -> Self {
        Self::Join {
            kind,
            left: Box::new(self),
            right: Box::new(right.into()),
            on,
        }
    }

    /// `LEFT JOIN right ON on`.
    #[must_use]
    pub fn left_join(self, right: impl Into<Self>, on: Expr) -> Self {
        self.join(JoinKind::Left, right, on)
    }

    /// `RIGHT JOIN right ON on`.
    #[must_use]
    pub fn right_join(self, right: impl Into<Self>, on: Expr) -> Self {
        self.join(JoinKind::Right, right, on)
    }

    /// `INNER JOIN right ON on`.
    #[must_use]
    pub fn inner_join(self, right: impl Into<Self>, on: Expr) -> Self {
        self.join(JoinKind::Inner, right, on)
    }

    /// `FULL OUTER JOIN right ON on`.
    #[must_use]
    pub fn outer_join(self, right: impl Into<Self>, on: Expr) -> Self {
        self.join(JoinKind::Outer, right, on)
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        table(name)
    }
}

impl Emit for Source {
    fn emit(&self, out: &mut Vec<Operator>) {
        match self {
            Self::Table(name) => out.push(Operator::Table(name.clone())),
            Self::Join {
                kind,
                left,
                right,
                on,
            } => {
                left.emit(out);
                right.emit(out);
                on.emit(out);
                out.push(kind.operator());
            }
            Self::Subquery { query, alias } => {
                query.emit(out);
                out.push(Operator::Rename(alias.clone()));
            }
        }
    }
}

/// A SELECT query.
///
/// Clauses are applied to the source in SQL order, then the column list is
/// rendered around the result.
///
/// ```rust
/// use stacksql_core::builder::{col, Emit, Select};
/// use stacksql_core::dialect::MySqlDialect;
///
/// let query = Select::new("users")
///     .columns([col("id"), col("name")])
///     .filter(col("id").eq(5));
///
/// let segment = query.render(&mut MySqlDialect::new());
/// assert_eq!(segment.sql(), "SELECT `id`, `name` FROM `users` WHERE `id` = ?");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    source: Source,
    columns: Vec<Expr>,
    filter: Option<Expr>,
    group_by: Vec<Expr>,
    having: Option<Expr>,
    order_by: Vec<Expr>,
    limit: Option<(u64, Option<u64>)>,
}

impl Select {
    /// Starts a query over `source`.
    #[must_use]
    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            columns: Vec::new(),
            filter: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Adds a selected column.
    #[must_use]
    pub fn column(mut self, column: Expr) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds several selected columns.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = Expr>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Sets the WHERE condition, AND-ing it with any previous one.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(previous) => previous.and(condition),
            None => condition,
        });
        self
    }

    /// Adds a grouping key.
    #[must_use]
    pub fn group_by(mut self, key: Expr) -> Self {
        self.group_by.push(key);
        self
    }

    /// Sets the HAVING condition, AND-ing it with any previous one.
    #[must_use]
    pub fn having(mut self, condition: Expr) -> Self {
        self.having = Some(match self.having.take() {
            Some(previous) => previous.and(condition),
            None => condition,
        });
        self
    }

    /// Adds an ordering key. Use [`Expr::desc`] for descending order.
    #[must_use]
    pub fn order_by(mut self, key: Expr) -> Self {
        self.order_by.push(key);
        self
    }

    /// Returns at most `count` rows.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit = Some((count, None));
        self
    }

    /// Returns at most `count` rows after skipping `offset`.
    #[must_use]
    pub const fn limit_offset(mut self, count: u64, offset: u64) -> Self {
        self.limit = Some((count, Some(offset)));
        self
    }

    /// Uses this query as a derived table named `alias`.
    #[must_use]
    pub fn alias(self, alias: &str) -> Source {
        Source::Subquery {
            query: Box::new(self),
            alias: String::from(alias),
        }
    }
}

impl Emit for Select {
    fn emit(&self, out: &mut Vec<Operator>) {
        self.source.emit(out);
        if let Some(filter) = &self.filter {
            filter.emit(out);
            out.push(Operator::Where);
        }
        if !self.group_by.is_empty() {
            emit_list(&self.group_by, out, "group_by");
            out.push(Operator::Group);
        }
        if let Some(having) = &self.having {
            having.emit(out);
            out.push(Operator::Having);
        }
        if !self.order_by.is_empty() {
            emit_list(&self.order_by, out, "order_by");
            out.push(Operator::Order);
        }
        match self.limit {
            Some((count, Some(offset))) => out.push(Operator::LimitWithOffset { count, offset }),
            Some((count, None)) => out.push(Operator::Limit(count)),
            None => {}
        }
        emit_list(&self.columns, out, "select");
        out.push(Operator::Select);
    }
}
