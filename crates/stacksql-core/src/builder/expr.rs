//! Value expressions.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::select::Select;
use super::Emit;
use crate::event::Operator;
use crate::param::{IntoParameter, Parameter};
use crate::period::ShiftDirection;

/// Creates a column reference.
#[must_use]
pub fn col(name: &str) -> Expr {
    Expr::Column {
        table: None,
        name: String::from(name),
    }
}

/// Creates a table-qualified column reference.
#[must_use]
pub fn qualified(table: &str, name: &str) -> Expr {
    Expr::Column {
        table: Some(String::from(table)),
        name: String::from(name),
    }
}

/// Creates a bound constant.
#[must_use]
pub fn val<T: IntoParameter>(value: T) -> Expr {
    Expr::Constant(value.into_parameter())
}

/// The current timestamp of the database.
#[must_use]
pub const fn now() -> Expr {
    Expr::Now
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Greater,
    Add,
    Subtraction,
    And,
    Or,
}

impl BinaryOp {
    const fn operator(self) -> Operator {
        match self {
            Self::Eq => Operator::Eq,
            Self::Greater => Operator::Greater,
            Self::Add => Operator::Add,
            Self::Subtraction => Operator::Subtraction,
            Self::And => Operator::And,
            Self::Or => Operator::Or,
        }
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Max,
    Min,
    Sum,
    Count,
}

impl Aggregate {
    const fn operator(self) -> Operator {
        match self {
            Self::Max => Operator::Max,
            Self::Min => Operator::Min,
            Self::Sum => Operator::Sum,
            Self::Count => Operator::Count,
        }
    }
}

/// A value expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column, optionally qualified by its table.
    Column {
        table: Option<String>,
        name: String,
    },
    /// A bound parameter.
    Constant(Parameter),
    /// `left op right`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// An aggregate over a value.
    Aggregate {
        function: Aggregate,
        value: Box<Expr>,
    },
    /// The current timestamp.
    Now,
    /// An instant moved by an elapsed period.
    Shift {
        base: Box<Expr>,
        direction: ShiftDirection,
        period: TimeDelta,
    },
    /// An aliased value.
    Rename { value: Box<Expr>, alias: String },
    /// A nested query used as a value.
    Subquery(Box<Select>),
    /// A descending sort key.
    Desc(Box<Expr>),
}

impl Expr {
    fn binary(self, op: BinaryOp, right: impl Into<Self>) -> Self {
        Self::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right.into()),
        }
    }

    fn aggregate(self, function: Aggregate) -> Self {
        Self::Aggregate {
            function,
            value: Box::new(self),
        }
    }

    fn shift(self, direction: ShiftDirection, period: TimeDelta) -> Self {
        Self::Shift {
            base: Box::new(self),
            direction,
            period,
        }
    }

    /// `self = right`.
    #[must_use]
    pub fn eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// `self > right`.
    #[must_use]
    pub fn gt(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Greater, right)
    }

    /// `self + right`.
    #[must_use]
    pub fn plus(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Add, right)
    }

    /// `self - right`.
    #[must_use]
    pub fn minus(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Subtraction, right)
    }

    /// `(self) AND (right)`.
    #[must_use]
    pub fn and(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// `(self) OR (right)`.
    #[must_use]
    pub fn or(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// `MAX(self)`.
    #[must_use]
    pub fn max(self) -> Self {
        self.aggregate(Aggregate::Max)
    }

    /// `MIN(self)`.
    #[must_use]
    pub fn min(self) -> Self {
        self.aggregate(Aggregate::Min)
    }

    /// `SUM(self)`.
    #[must_use]
    pub fn sum(self) -> Self {
        self.aggregate(Aggregate::Sum)
    }

    /// `COUNT(self)`.
    #[must_use]
    pub fn count(self) -> Self {
        self.aggregate(Aggregate::Count)
    }

    /// Moves the instant later by `period`.
    #[must_use]
    pub fn add_period(self, period: TimeDelta) -> Self {
        self.shift(ShiftDirection::Forward, period)
    }

    /// Moves the instant earlier by `period`.
    #[must_use]
    pub fn sub_period(self, period: TimeDelta) -> Self {
        self.shift(ShiftDirection::Backward, period)
    }

    /// `self AS alias`.
    #[must_use]
    pub fn alias(self, alias: &str) -> Self {
        Self::Rename {
            value: Box::new(self),
            alias: String::from(alias),
        }
    }

    /// Sorts descending when used as an ordering key.
    #[must_use]
    pub fn desc(self) -> Self {
        Self::Desc(Box::new(self))
    }
}

impl Emit for Expr {
    fn emit(&self, out: &mut Vec<Operator>) {
        match self {
            Self::Column { table: None, name } => out.push(Operator::Column(name.clone())),
            Self::Column {
                table: Some(table),
                name,
            } => out.push(Operator::QualifiedColumn {
                table: table.clone(),
                name: name.clone(),
            }),
            Self::Constant(value) => out.push(Operator::Constant(value.clone())),
            Self::Binary { op, left, right } => {
                left.emit(out);
                right.emit(out);
                out.push(op.operator());
            }
            Self::Aggregate { function, value } => {
                value.emit(out);
                out.push(function.operator());
            }
            Self::Now => out.push(Operator::Now),
            Self::Shift {
                base,
                direction,
                period,
            } => {
                base.emit(out);
                out.push(match direction {
                    ShiftDirection::Forward => Operator::AddPeriod(*period),
                    ShiftDirection::Backward => Operator::SubPeriod(*period),
                });
            }
            Self::Rename { value, alias } => {
                value.emit(out);
                out.push(Operator::Rename(alias.clone()));
            }
            Self::Subquery(query) => query.emit(out),
            Self::Desc(key) => {
                key.emit(out);
                out.push(Operator::DescKey);
            }
        }
    }
}

impl From<Parameter> for Expr {
    fn from(value: Parameter) -> Self {
        Self::Constant(value)
    }
}

impl From<Select> for Expr {
    fn from(query: Select) -> Self {
        Self::Subquery(Box::new(query))
    }
}

macro_rules! expr_from_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Expr {
                fn from(value: $t) -> Self {
                    Self::Constant(value.into_parameter())
                }
            }

            impl From<Option<$t>> for Expr {
                fn from(value: Option<$t>) -> Self {
                    Self::Constant(value.into_parameter())
                }
            }
        )*
    };
}

expr_from_value!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    String,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    bool,
    f64,
);

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Constant(value.into_parameter())
    }
}
