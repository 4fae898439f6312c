#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use stacksql_core::dialect::{H2Dialect, MySqlDialect};
use stacksql_core::{Emit, Error, Result, ResultCursor, Segment};

pub fn mysql(tree: &impl Emit) -> Segment {
    tree.render(&mut MySqlDialect::new())
}

pub fn h2(tree: &impl Emit) -> Segment {
    tree.render(&mut H2Dialect::new())
}

/// A raw cell as a driver would hold it.
#[derive(Debug, Clone)]
pub enum RawCell {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Double(f64),
}

/// A single-row cursor over scripted cells. Missing names read as NULL.
#[derive(Default)]
pub struct OneRow {
    cells: HashMap<String, RawCell>,
    last_null: Cell<bool>,
}

impl OneRow {
    pub fn with(mut self, name: &str, cell: RawCell) -> Self {
        self.cells.insert(name.to_string(), cell);
        self
    }

    fn read<T: Default>(
        &self,
        name: &str,
        pick: impl FnOnce(&RawCell) -> Option<T>,
    ) -> Result<T> {
        match self.cells.get(name) {
            None => {
                self.last_null.set(true);
                Ok(T::default())
            }
            Some(cell) => {
                self.last_null.set(false);
                pick(cell).ok_or_else(|| Error::driver(format!("column {name} holds {cell:?}")))
            }
        }
    }
}

impl ResultCursor for OneRow {
    fn advance(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn get_byte(&self, column: &str) -> Result<i8> {
        self.read(column, |c| match c {
            RawCell::Int(v) => i8::try_from(*v).ok(),
            _ => None,
        })
    }

    fn get_short(&self, column: &str) -> Result<i16> {
        self.read(column, |c| match c {
            RawCell::Int(v) => i16::try_from(*v).ok(),
            _ => None,
        })
    }

    fn get_int(&self, column: &str) -> Result<i32> {
        self.read(column, |c| match c {
            RawCell::Int(v) => i32::try_from(*v).ok(),
            _ => None,
        })
    }

    fn get_long(&self, column: &str) -> Result<i64> {
        self.read(column, |c| match c {
            RawCell::Int(v) => Some(*v),
            _ => None,
        })
    }

    fn get_big_int(&self, column: &str) -> Result<i128> {
        self.read(column, |c| match c {
            RawCell::Int(v) => Some(i128::from(*v)),
            _ => None,
        })
    }

    fn get_string(&self, column: &str) -> Result<String> {
        self.read(column, |c| match c {
            RawCell::Text(v) => Some(v.clone()),
            _ => None,
        })
    }

    fn get_date(&self, column: &str) -> Result<NaiveDate> {
        self.read(column, |c| match c {
            RawCell::Date(v) => Some(*v),
            RawCell::Timestamp(v) => Some(v.date()),
            _ => None,
        })
    }

    fn get_time(&self, column: &str) -> Result<NaiveTime> {
        self.read(column, |c| match c {
            RawCell::Time(v) => Some(*v),
            _ => None,
        })
    }

    fn get_timestamp(&self, column: &str) -> Result<NaiveDateTime> {
        self.read(column, |c| match c {
            RawCell::Timestamp(v) => Some(*v),
            _ => None,
        })
    }

    fn get_double(&self, column: &str) -> Result<f64> {
        self.read(column, |c| match c {
            RawCell::Double(v) => Some(*v),
            _ => None,
        })
    }

    fn was_null(&self) -> bool {
        self.last_null.get()
    }
}
