//! # stacksql-sqlite
//!
//! SQLite dialect for `stacksql-core`.
//!
//! # How SQLite differs from other dialects
//!
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as
//!   the standard quoting style, though it also accepts backticks
//!   and square brackets. See [SQLite keywords].
//! - **Current time**: `NOW()` does not exist; the dialect renders
//!   `CURRENT_TIMESTAMP` instead.
//! - **[Date and time functions]**: there is no interval type. Date
//!   arithmetic is rendered with `strftime` and a modifier such as
//!   `'+90 minutes'`. Periods that are not a whole number of seconds
//!   use fractional seconds (`'+0.500 seconds'`).
//! - **[Type affinity]**: SQLite has no native date or time storage.
//!   Dates and timestamps are stored as ISO-8601 text and decoded
//!   from it; booleans are integers.
//!
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//! [Date and time functions]: https://www.sqlite.org/lang_datefunc.html
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//!
//! ## Example
//!
//! ```rust
//! use chrono::TimeDelta;
//! use stacksql_core::builder::{col, now, Emit, Select};
//! use stacksql_sqlite::SqliteDialect;
//!
//! let query = Select::new("sessions")
//!     .column(col("id"))
//!     .filter(col("expires").gt(now().add_period(TimeDelta::days(1))));
//!
//! let segment = query.render(&mut SqliteDialect::new());
//! assert_eq!(
//!     segment.sql(),
//!     "SELECT \"id\" FROM \"sessions\" WHERE \"expires\" > \
//!      strftime('%Y-%m-%d %H:%M:%f', CURRENT_TIMESTAMP, '+1 days')"
//! );
//! ```

mod dialect;

pub use dialect::{SqliteDialect, TIMESTAMP_FORMAT};
