//! SQLite dialect implementation.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use stacksql_core::dialect::{unless_null, SqlDialect};
use stacksql_core::driver::ResultCursor;
use stacksql_core::period::{PeriodUnit, ShiftDirection};
use stacksql_core::stack::RenderStack;
use stacksql_core::Result;

/// Format produced by date arithmetic, with millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%f";

/// SQLite dialect.
#[derive(Debug, Default, Clone)]
pub struct SqliteDialect {
    stack: RenderStack,
}

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stack: RenderStack::new(),
        }
    }

    fn modifier(span: TimeDelta, direction: ShiftDirection) -> String {
        let sign = match direction {
            ShiftDirection::Forward => '+',
            ShiftDirection::Backward => '-',
        };
        let Some(unit) = PeriodUnit::coarsest_whole(span) else {
            let millis = span.num_milliseconds();
            return format!("{sign}{}.{:03} seconds", millis / 1000, millis % 1000);
        };
        let name = match unit {
            PeriodUnit::Day => "days",
            PeriodUnit::Hour => "hours",
            PeriodUnit::Minute => "minutes",
            _ => "seconds",
        };
        format!("{sign}{} {name}", unit.count(span))
    }
}

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn stack(&self) -> &RenderStack {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut RenderStack {
        &mut self.stack
    }

    fn identifier_quote(&self) -> char {
        '"' // SQLite also accepts backticks, but double quotes are standard
    }

    fn now_literal(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    fn render_shift(&self, base: &str, span: TimeDelta, direction: ShiftDirection) -> String {
        format!(
            "strftime('{TIMESTAMP_FORMAT}', {base}, '{}')",
            Self::modifier(span, direction)
        )
    }

    fn date_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<NaiveDateTime>> {
        let value = row.get_date(name)?;
        Ok(unless_null(row, value).map(|date| date.and_time(NaiveTime::MIN)))
    }
}
