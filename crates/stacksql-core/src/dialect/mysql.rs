//! MySQL dialect.

use chrono::{NaiveDateTime, TimeDelta};

use super::{unless_null, SqlDialect};
use crate::driver::ResultCursor;
use crate::error::Result;
use crate::period::{PeriodUnit, ShiftDirection};
use crate::stack::RenderStack;

/// MySQL / MariaDB dialect.
///
/// Date arithmetic uses `DATE_ADD`/`DATE_SUB`. A period that is not a whole
/// number of its leading unit is written as a compound interval such as
/// `INTERVAL '1 30' HOUR_MINUTE`.
#[derive(Debug, Default, Clone)]
pub struct MySqlDialect {
    stack: RenderStack,
}

impl MySqlDialect {
    /// Sub-second unit used when no coarse unit applies.
    pub const FALLBACK_UNIT: PeriodUnit = PeriodUnit::Microsecond;

    /// Creates a dialect with an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stack: RenderStack::new(),
        }
    }

    fn interval(span: TimeDelta) -> String {
        let leading = PeriodUnit::leading(span).unwrap_or(Self::FALLBACK_UNIT);
        if leading.is_whole(span) {
            return format!("INTERVAL {} {}", leading.count(span), leading.keyword());
        }
        let whole = PeriodUnit::coarsest_whole(span).unwrap_or(Self::FALLBACK_UNIT);
        let lead_count = leading.count(span);
        let remainder = span - leading.span(lead_count);
        format!(
            "INTERVAL '{} {}' {}_{}",
            lead_count,
            whole.count(remainder),
            leading.keyword(),
            whole.keyword()
        )
    }
}

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn stack(&self) -> &RenderStack {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut RenderStack {
        &mut self.stack
    }

    fn render_shift(&self, base: &str, span: TimeDelta, direction: ShiftDirection) -> String {
        let function = match direction {
            ShiftDirection::Forward => "DATE_ADD",
            ShiftDirection::Backward => "DATE_SUB",
        };
        format!("{function}({base}, {})", Self::interval(span))
    }

    fn date_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<NaiveDateTime>> {
        let value = row.get_timestamp(name)?;
        Ok(unless_null(row, value))
    }
}
