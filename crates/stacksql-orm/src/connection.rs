//! Blocking driver over sqlx.
//!
//! Each [`SqlxConnection`] owns a current-thread tokio runtime and blocks on
//! it for every call. Query results are fetched eagerly; the cursor then
//! walks the owned rows.

use std::cell::Cell;
use std::num::TryFromIntError;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection as _, Row as _};
use stacksql_core::driver::{Connection, ResultCursor, Statement};
use stacksql_core::{Error, ParameterKind};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::config::DriverKind;

enum Backend {
    MySql(MySqlConnection),
    Sqlite(SqliteConnection),
}

/// A blocking connection backed by sqlx.
pub struct SqlxConnection {
    runtime: Runtime,
    backend: Backend,
}

impl SqlxConnection {
    /// Opens a connection to `url`.
    ///
    /// Credentials, when given, override any user name and password in the URL.
    /// SQLite ignores them.
    pub fn open(
        driver: DriverKind,
        url: &str,
        credentials: Option<(&str, &str)>,
    ) -> crate::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let backend = match driver {
            DriverKind::MySql => {
                let mut options = MySqlConnectOptions::from_str(url)?;
                if let Some((username, password)) = credentials {
                    options = options.username(username).password(password);
                }
                Backend::MySql(runtime.block_on(options.connect())?)
            }
            DriverKind::Sqlite => {
                let options = SqliteConnectOptions::from_str(url)?;
                Backend::Sqlite(runtime.block_on(options.connect())?)
            }
        };
        debug!(driver = %driver, "Connection opened");
        Ok(Self { runtime, backend })
    }

    /// Returns the driver of this connection.
    #[must_use]
    pub const fn driver(&self) -> DriverKind {
        match self.backend {
            Backend::MySql(_) => DriverKind::MySql,
            Backend::Sqlite(_) => DriverKind::Sqlite,
        }
    }
}

impl Connection for SqlxConnection {
    fn prepare(&mut self, sql: &str) -> stacksql_core::Result<Box<dyn Statement + '_>> {
        Ok(Box::new(SqlxStatement {
            connection: self,
            sql: sql.to_string(),
            slots: Vec::new(),
        }))
    }

    fn close(self: Box<Self>) -> stacksql_core::Result<()> {
        let Self { runtime, backend } = *self;
        let driver = match backend {
            Backend::MySql(connection) => {
                runtime.block_on(connection.close()).map_err(Error::driver)?;
                DriverKind::MySql
            }
            Backend::Sqlite(connection) => {
                runtime.block_on(connection.close()).map_err(Error::driver)?;
                DriverKind::Sqlite
            }
        };
        debug!(driver = %driver, "Connection closed");
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum BoundValue {
    Null(ParameterKind),
    Long(i64),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Double(f64),
}

/// Builds a sqlx query for `$db` with every value bound in order.
macro_rules! bind_values {
    ($db:ty, $sql:expr, $values:expr) => {{
        let mut query = sqlx::query::<$db>($sql);
        for value in $values {
            query = match value {
                BoundValue::Null(ParameterKind::Int | ParameterKind::Bool) => {
                    query.bind(Option::<i64>::None)
                }
                BoundValue::Null(ParameterKind::String) => query.bind(Option::<String>::None),
                BoundValue::Null(ParameterKind::Date) => query.bind(Option::<NaiveDate>::None),
                BoundValue::Null(ParameterKind::Time) => query.bind(Option::<NaiveTime>::None),
                BoundValue::Null(ParameterKind::Timestamp) => {
                    query.bind(Option::<NaiveDateTime>::None)
                }
                BoundValue::Null(ParameterKind::Double) => query.bind(Option::<f64>::None),
                BoundValue::Long(v) => query.bind(*v),
                BoundValue::String(v) => query.bind(v.clone()),
                BoundValue::Date(v) => query.bind(*v),
                BoundValue::Time(v) => query.bind(*v),
                BoundValue::Timestamp(v) => query.bind(*v),
                BoundValue::Double(v) => query.bind(*v),
            };
        }
        query
    }};
}

struct SqlxStatement<'c> {
    connection: &'c mut SqlxConnection,
    sql: String,
    slots: Vec<Option<BoundValue>>,
}

impl SqlxStatement<'_> {
    fn set(&mut self, position: usize, value: BoundValue) -> stacksql_core::Result<()> {
        if position == 0 {
            return Err(Error::InvalidPosition(position));
        }
        if self.slots.len() < position {
            self.slots.resize(position, None);
        }
        self.slots[position - 1] = Some(value);
        Ok(())
    }

    fn values(&self) -> stacksql_core::Result<Vec<BoundValue>> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.clone()
                    .ok_or(Error::UnboundParameter { position: index + 1 })
            })
            .collect()
    }
}

impl Statement for SqlxStatement<'_> {
    fn set_null(&mut self, position: usize, kind: ParameterKind) -> stacksql_core::Result<()> {
        self.set(position, BoundValue::Null(kind))
    }

    fn set_long(&mut self, position: usize, value: i64) -> stacksql_core::Result<()> {
        self.set(position, BoundValue::Long(value))
    }

    fn set_string(&mut self, position: usize, value: &str) -> stacksql_core::Result<()> {
        self.set(position, BoundValue::String(value.to_string()))
    }

    fn set_date(&mut self, position: usize, value: NaiveDate) -> stacksql_core::Result<()> {
        self.set(position, BoundValue::Date(value))
    }

    fn set_time(&mut self, position: usize, value: NaiveTime) -> stacksql_core::Result<()> {
        self.set(position, BoundValue::Time(value))
    }

    fn set_timestamp(&mut self, position: usize, value: NaiveDateTime) -> stacksql_core::Result<()> {
        self.set(position, BoundValue::Timestamp(value))
    }

    fn set_double(&mut self, position: usize, value: f64) -> stacksql_core::Result<()> {
        self.set(position, BoundValue::Double(value))
    }

    fn execute(&mut self) -> stacksql_core::Result<()> {
        self.execute_update().map(|_| ())
    }

    fn execute_update(&mut self) -> stacksql_core::Result<u64> {
        let values = self.values()?;
        let SqlxConnection { runtime, backend } = &mut *self.connection;
        let affected = match backend {
            Backend::MySql(connection) => {
                let query = bind_values!(sqlx::MySql, self.sql.as_str(), &values);
                runtime
                    .block_on(query.execute(connection))
                    .map(|done| done.rows_affected())
            }
            Backend::Sqlite(connection) => {
                let query = bind_values!(sqlx::Sqlite, self.sql.as_str(), &values);
                runtime
                    .block_on(query.execute(connection))
                    .map(|done| done.rows_affected())
            }
        };
        affected.map_err(Error::driver)
    }

    fn execute_query(&mut self) -> stacksql_core::Result<Box<dyn ResultCursor + '_>> {
        let values = self.values()?;
        let SqlxConnection { runtime, backend } = &mut *self.connection;
        let cursor: Box<dyn ResultCursor> = match backend {
            Backend::MySql(connection) => {
                let query = bind_values!(sqlx::MySql, self.sql.as_str(), &values);
                let rows = runtime
                    .block_on(query.fetch_all(connection))
                    .map_err(Error::driver)?;
                Box::new(RowsCursor::new(rows))
            }
            Backend::Sqlite(connection) => {
                let query = bind_values!(sqlx::Sqlite, self.sql.as_str(), &values);
                let rows = runtime
                    .block_on(query.fetch_all(connection))
                    .map_err(Error::driver)?;
                Box::new(RowsCursor::new(rows))
            }
        };
        Ok(cursor)
    }
}

/// Owned rows with a was-null flag for the last read.
struct RowsCursor<R> {
    rows: std::vec::IntoIter<R>,
    current: Option<R>,
    last_null: Cell<bool>,
}

impl<R> RowsCursor<R> {
    fn new(rows: Vec<R>) -> Self {
        Self {
            rows: rows.into_iter(),
            current: None,
            last_null: Cell::new(false),
        }
    }
}

/// Parses the integer part of a decimal literal such as `-12.50`.
///
/// The fraction is truncated toward zero.
fn integer_part(text: &str) -> stacksql_core::Result<i128> {
    let text = text.trim();
    let whole = text.split_once('.').map_or(text, |(whole, _)| whole);
    match whole {
        "" | "-" | "+" => Ok(0),
        whole => whole.parse().map_err(Error::driver),
    }
}

// sqlx rejects MySQL DATE, TIMESTAMP, UNSIGNED and DECIMAL cells for the
// nearest Rust type, so getters fall back to the next representation.
// The first decode error is the one reported.
macro_rules! impl_result_cursor {
    ($($row:ty => $db:ty),* $(,)?) => {
        $(
            impl RowsCursor<$row> {
                fn cell<T>(&self, column: &str) -> stacksql_core::Result<Option<T>>
                where
                    T: for<'r> sqlx::Decode<'r, $db> + sqlx::Type<$db>,
                {
                    let row = self.current.as_ref().ok_or(Error::NoCurrentRow)?;
                    row.try_get(column).map_err(Error::driver)
                }

                fn record<T: Default>(&self, value: Option<T>) -> T {
                    self.last_null.set(value.is_none());
                    value.unwrap_or_default()
                }

                fn read<T>(&self, column: &str) -> stacksql_core::Result<T>
                where
                    T: Default + for<'r> sqlx::Decode<'r, $db> + sqlx::Type<$db>,
                {
                    let value = self.cell(column)?;
                    Ok(self.record(value))
                }

                fn read_integer<T>(&self, column: &str) -> stacksql_core::Result<T>
                where
                    T: Default
                        + TryFrom<u64, Error = TryFromIntError>
                        + for<'r> sqlx::Decode<'r, $db>
                        + sqlx::Type<$db>,
                {
                    let value = match self.cell::<T>(column) {
                        Ok(value) => value,
                        Err(signed) => self
                            .cell::<u64>(column)
                            .map_err(|_| signed)?
                            .map(T::try_from)
                            .transpose()
                            .map_err(Error::driver)?,
                    };
                    Ok(self.record(value))
                }

                fn decimal(&self, column: &str) -> stacksql_core::Result<Option<i128>> {
                    let row = self.current.as_ref().ok_or(Error::NoCurrentRow)?;
                    let text: Option<String> =
                        row.try_get_unchecked(column).map_err(Error::driver)?;
                    text.as_deref().map(integer_part).transpose()
                }
            }

            impl ResultCursor for RowsCursor<$row> {
                fn advance(&mut self) -> stacksql_core::Result<bool> {
                    self.current = self.rows.next();
                    Ok(self.current.is_some())
                }

                fn get_byte(&self, column: &str) -> stacksql_core::Result<i8> {
                    self.read_integer(column)
                }

                fn get_short(&self, column: &str) -> stacksql_core::Result<i16> {
                    self.read_integer(column)
                }

                fn get_int(&self, column: &str) -> stacksql_core::Result<i32> {
                    self.read_integer(column)
                }

                fn get_long(&self, column: &str) -> stacksql_core::Result<i64> {
                    self.read_integer(column)
                }

                fn get_big_int(&self, column: &str) -> stacksql_core::Result<i128> {
                    let value = match self.cell::<i64>(column) {
                        Ok(value) => value.map(i128::from),
                        Err(signed) => match self.cell::<u64>(column) {
                            Ok(value) => value.map(i128::from),
                            Err(_) => self.decimal(column).map_err(|_| signed)?,
                        },
                    };
                    Ok(self.record(value))
                }

                fn get_string(&self, column: &str) -> stacksql_core::Result<String> {
                    self.read(column)
                }

                fn get_date(&self, column: &str) -> stacksql_core::Result<NaiveDate> {
                    let value = match self.cell::<NaiveDate>(column) {
                        Ok(value) => value,
                        Err(date) => match self.cell::<NaiveDateTime>(column) {
                            Ok(value) => value.map(|at| at.date()),
                            Err(_) => self
                                .cell::<DateTime<Utc>>(column)
                                .map_err(|_| date)?
                                .map(|at| at.date_naive()),
                        },
                    };
                    Ok(self.record(value))
                }

                fn get_time(&self, column: &str) -> stacksql_core::Result<NaiveTime> {
                    self.read(column)
                }

                fn get_timestamp(&self, column: &str) -> stacksql_core::Result<NaiveDateTime> {
                    let value = match self.cell::<NaiveDateTime>(column) {
                        Ok(value) => value,
                        Err(naive) => match self.cell::<DateTime<Utc>>(column) {
                            Ok(value) => value.map(|at| at.naive_utc()),
                            Err(_) => self
                                .cell::<NaiveDate>(column)
                                .map_err(|_| naive)?
                                .map(|date| date.and_time(NaiveTime::MIN)),
                        },
                    };
                    Ok(self.record(value))
                }

                fn get_double(&self, column: &str) -> stacksql_core::Result<f64> {
                    self.read(column)
                }

                fn was_null(&self) -> bool {
                    self.last_null.get()
                }
            }
        )*
    };
}

impl_result_cursor!(
    MySqlRow => sqlx::MySql,
    SqliteRow => sqlx::Sqlite,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_part_of_decimal_text() {
        assert_eq!(integer_part("7").unwrap(), 7);
        assert_eq!(integer_part("123.00").unwrap(), 123);
        assert_eq!(integer_part("-12.50").unwrap(), -12);
        assert_eq!(integer_part("-0.5").unwrap(), 0);
        assert_eq!(integer_part(".25").unwrap(), 0);
        assert_eq!(
            integer_part("170141183460469231731687303715884105727").unwrap(),
            i128::MAX
        );
    }

    #[test]
    fn test_integer_part_rejects_non_numbers() {
        assert!(matches!(integer_part("abc"), Err(Error::Driver(_))));
        assert!(matches!(integer_part("1e3"), Err(Error::Driver(_))));
    }
}
