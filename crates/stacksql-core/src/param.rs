//! Typed statement parameters.
//!
//! Every constant in a rendered statement becomes a `?` placeholder plus one
//! [`Parameter`]. The value itself never reaches the SQL text.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::driver::Statement;
use crate::error::Result;

/// The SQL kind of a parameter, used to bind a typed NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Integer.
    Int,
    /// Character data.
    String,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time of day.
    Timestamp,
    /// Boolean, stored as an integer.
    Bool,
    /// Double precision float.
    Double,
}

/// A nullable statement parameter of a fixed kind.
///
/// `None` payloads bind as SQL NULL of the matching kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// Integer value.
    Int(Option<i64>),
    /// Text value.
    String(Option<String>),
    /// Date value.
    Date(Option<NaiveDate>),
    /// Time value.
    Time(Option<NaiveTime>),
    /// Timestamp value.
    Timestamp(Option<NaiveDateTime>),
    /// Boolean value, bound as `1` or `0`.
    Bool(Option<bool>),
    /// Double value.
    Double(Option<f64>),
}

impl Parameter {
    /// Returns the kind of this parameter.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        match self {
            Self::Int(_) => ParameterKind::Int,
            Self::String(_) => ParameterKind::String,
            Self::Date(_) => ParameterKind::Date,
            Self::Time(_) => ParameterKind::Time,
            Self::Timestamp(_) => ParameterKind::Timestamp,
            Self::Bool(_) => ParameterKind::Bool,
            Self::Double(_) => ParameterKind::Double,
        }
    }

    /// Returns whether the payload is absent.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        match self {
            Self::Int(v) => v.is_none(),
            Self::String(v) => v.is_none(),
            Self::Date(v) => v.is_none(),
            Self::Time(v) => v.is_none(),
            Self::Timestamp(v) => v.is_none(),
            Self::Bool(v) => v.is_none(),
            Self::Double(v) => v.is_none(),
        }
    }

    /// Binds this parameter to the 1-based `position` of `statement`.
    pub fn bind(&self, statement: &mut dyn Statement, position: usize) -> Result<()> {
        match self {
            Self::Int(Some(v)) => statement.set_long(position, *v),
            Self::String(Some(v)) => statement.set_string(position, v),
            Self::Date(Some(v)) => statement.set_date(position, *v),
            Self::Time(Some(v)) => statement.set_time(position, *v),
            Self::Timestamp(Some(v)) => statement.set_timestamp(position, *v),
            Self::Bool(Some(v)) => statement.set_long(position, i64::from(*v)),
            Self::Double(Some(v)) => statement.set_double(position, *v),
            _ => statement.set_null(position, self.kind()),
        }
    }

    /// Returns a short human-readable form, used in statement descriptions.
    #[must_use]
    pub fn describe(&self) -> String {
        fn show<T: std::fmt::Display>(v: Option<&T>) -> String {
            v.map_or_else(|| String::from("NULL"), ToString::to_string)
        }
        match self {
            Self::Int(v) => show(v.as_ref()),
            Self::String(v) => v
                .as_ref()
                .map_or_else(|| String::from("NULL"), |s| format!("'{}'", s.replace('\'', "''"))),
            Self::Date(v) => show(v.as_ref()),
            Self::Time(v) => show(v.as_ref()),
            Self::Timestamp(v) => show(v.as_ref()),
            Self::Bool(v) => show(v.as_ref()),
            Self::Double(v) => show(v.as_ref()),
        }
    }
}

/// Conversion into a typed [`Parameter`].
pub trait IntoParameter {
    /// Converts the value to a `Parameter`.
    fn into_parameter(self) -> Parameter;
}

impl IntoParameter for Parameter {
    fn into_parameter(self) -> Parameter {
        self
    }
}

macro_rules! int_parameter {
    ($($ty:ty),*) => {
        $(
            impl IntoParameter for $ty {
                fn into_parameter(self) -> Parameter {
                    Parameter::Int(Some(i64::from(self)))
                }
            }

            impl IntoParameter for Option<$ty> {
                fn into_parameter(self) -> Parameter {
                    Parameter::Int(self.map(i64::from))
                }
            }
        )*
    };
}

int_parameter!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! direct_parameter {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl IntoParameter for $ty {
                fn into_parameter(self) -> Parameter {
                    Parameter::$variant(Some(self))
                }
            }

            impl IntoParameter for Option<$ty> {
                fn into_parameter(self) -> Parameter {
                    Parameter::$variant(self)
                }
            }
        )*
    };
}

direct_parameter!(
    String => String,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    bool => Bool,
    f64 => Double
);

impl IntoParameter for &str {
    fn into_parameter(self) -> Parameter {
        Parameter::String(Some(String::from(self)))
    }
}

impl IntoParameter for Option<&str> {
    fn into_parameter(self) -> Parameter {
        Parameter::String(self.map(String::from))
    }
}

impl IntoParameter for f32 {
    fn into_parameter(self) -> Parameter {
        Parameter::Double(Some(f64::from(self)))
    }
}
