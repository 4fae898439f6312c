#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use stacksql_core::driver::{Connection, ResultCursor, Statement};
use stacksql_core::{Error, ParameterKind, Result};

/// Routes `tracing` output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A value bound through the mock statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Null(ParameterKind),
    Long(i64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Double(f64),
}

/// A raw cell returned by the mock cursor.
#[derive(Debug, Clone)]
pub enum RawCell {
    Int(i64),
    Text(String),
    Timestamp(NaiveDateTime),
    Double(f64),
}

pub type ScriptedRow = HashMap<String, RawCell>;

pub fn row(cells: &[(&str, RawCell)]) -> ScriptedRow {
    cells
        .iter()
        .map(|(name, cell)| ((*name).to_string(), cell.clone()))
        .collect()
}

/// Everything the mock driver saw.
#[derive(Debug, Default)]
pub struct Journal {
    pub prepared: Vec<String>,
    pub executions: Vec<Vec<Bound>>,
    pub closed: bool,
}

/// A connection that records statements and replays scripted rows.
pub struct MockConnection {
    journal: Rc<RefCell<Journal>>,
    rows: Vec<ScriptedRow>,
    affected: u64,
    fail_close: bool,
}

impl MockConnection {
    pub fn new() -> (Self, Rc<RefCell<Journal>>) {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let connection = Self {
            journal: Rc::clone(&journal),
            rows: Vec::new(),
            affected: 0,
            fail_close: false,
        };
        (connection, journal)
    }

    pub fn with_rows(mut self, rows: Vec<ScriptedRow>) -> Self {
        self.rows = rows;
        self
    }

    pub const fn with_affected(mut self, affected: u64) -> Self {
        self.affected = affected;
        self
    }

    pub const fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }
}

impl Connection for MockConnection {
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement + '_>> {
        self.journal.borrow_mut().prepared.push(sql.to_string());
        Ok(Box::new(MockStatement {
            connection: self,
            bound: Vec::new(),
        }))
    }

    fn close(self: Box<Self>) -> Result<()> {
        if self.fail_close {
            return Err(Error::driver("close failed"));
        }
        self.journal.borrow_mut().closed = true;
        Ok(())
    }
}

struct MockStatement<'c> {
    connection: &'c MockConnection,
    bound: Vec<Option<Bound>>,
}

impl MockStatement<'_> {
    fn set(&mut self, position: usize, value: Bound) -> Result<()> {
        if position == 0 {
            return Err(Error::InvalidPosition(position));
        }
        if self.bound.len() < position {
            self.bound.resize(position, None);
        }
        self.bound[position - 1] = Some(value);
        Ok(())
    }

    fn record(&self) -> Result<()> {
        let values = self
            .bound
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .clone()
                    .ok_or(Error::UnboundParameter { position: index + 1 })
            })
            .collect::<Result<Vec<_>>>()?;
        self.connection.journal.borrow_mut().executions.push(values);
        Ok(())
    }
}

impl Statement for MockStatement<'_> {
    fn set_null(&mut self, position: usize, kind: ParameterKind) -> Result<()> {
        self.set(position, Bound::Null(kind))
    }

    fn set_long(&mut self, position: usize, value: i64) -> Result<()> {
        self.set(position, Bound::Long(value))
    }

    fn set_string(&mut self, position: usize, value: &str) -> Result<()> {
        self.set(position, Bound::Text(value.to_string()))
    }

    fn set_date(&mut self, position: usize, value: NaiveDate) -> Result<()> {
        self.set(position, Bound::Date(value))
    }

    fn set_time(&mut self, position: usize, value: NaiveTime) -> Result<()> {
        self.set(position, Bound::Time(value))
    }

    fn set_timestamp(&mut self, position: usize, value: NaiveDateTime) -> Result<()> {
        self.set(position, Bound::Timestamp(value))
    }

    fn set_double(&mut self, position: usize, value: f64) -> Result<()> {
        self.set(position, Bound::Double(value))
    }

    fn execute(&mut self) -> Result<()> {
        self.record()
    }

    fn execute_update(&mut self) -> Result<u64> {
        self.record()?;
        Ok(self.connection.affected)
    }

    fn execute_query(&mut self) -> Result<Box<dyn ResultCursor + '_>> {
        self.record()?;
        Ok(Box::new(MockCursor {
            rows: self.connection.rows.clone().into_iter(),
            current: None,
            last_null: Cell::new(false),
        }))
    }
}

struct MockCursor {
    rows: std::vec::IntoIter<ScriptedRow>,
    current: Option<ScriptedRow>,
    last_null: Cell<bool>,
}

impl MockCursor {
    fn read<T: Default>(
        &self,
        name: &str,
        pick: impl FnOnce(&RawCell) -> Option<T>,
    ) -> Result<T> {
        let row = self.current.as_ref().ok_or(Error::NoCurrentRow)?;
        match row.get(name) {
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

    fn integer(&self, name: &str) -> Result<i64> {
        self.read(name, |c| match c {
            RawCell::Int(v) => Some(*v),
            _ => None,
        })
    }
}

impl ResultCursor for MockCursor {
    fn advance(&mut self) -> Result<bool> {
        self.current = self.rows.next();
        Ok(self.current.is_some())
    }

    fn get_byte(&self, column: &str) -> Result<i8> {
        self.integer(column)
            .and_then(|v| i8::try_from(v).map_err(Error::driver))
    }

    fn get_short(&self, column: &str) -> Result<i16> {
        self.integer(column)
            .and_then(|v| i16::try_from(v).map_err(Error::driver))
    }

    fn get_int(&self, column: &str) -> Result<i32> {
        self.integer(column)
            .and_then(|v| i32::try_from(v).map_err(Error::driver))
    }

    fn get_long(&self, column: &str) -> Result<i64> {
        self.integer(column)
    }

    fn get_big_int(&self, column: &str) -> Result<i128> {
        self.integer(column).map(i128::from)
    }

    fn get_string(&self, column: &str) -> Result<String> {
        self.read(column, |c| match c {
            RawCell::Text(v) => Some(v.clone()),
            _ => None,
        })
    }

    fn get_date(&self, column: &str) -> Result<NaiveDate> {
        self.read(column, |c| match c {
            RawCell::Timestamp(v) => Some(v.date()),
            _ => None,
        })
    }

    fn get_time(&self, column: &str) -> Result<NaiveTime> {
        self.read(column, |c| match c {
            RawCell::Timestamp(v) => Some(v.time()),
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
