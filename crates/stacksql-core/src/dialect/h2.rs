//! H2 dialect.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use super::{unless_null, SqlDialect};
use crate::driver::ResultCursor;
use crate::error::Result;
use crate::period::{PeriodUnit, ShiftDirection};
use crate::stack::RenderStack;

/// H2 embedded-engine dialect.
#[derive(Debug, Default, Clone)]
pub struct H2Dialect {
    stack: RenderStack,
}

impl H2Dialect {
    /// Sub-second unit used when no coarse unit applies.
    pub const FALLBACK_UNIT: PeriodUnit = PeriodUnit::Millisecond;

    /// Creates a dialect with an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stack: RenderStack::new(),
        }
    }
}

impl SqlDialect for H2Dialect {
    fn name(&self) -> &'static str {
        "h2"
    }

    fn stack(&self) -> &RenderStack {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut RenderStack {
        &mut self.stack
    }

    fn render_shift(&self, base: &str, span: TimeDelta, direction: ShiftDirection) -> String {
        let unit = PeriodUnit::coarsest_whole(span).unwrap_or(Self::FALLBACK_UNIT);
        let sign = match direction {
            ShiftDirection::Forward => "",
            ShiftDirection::Backward => "-",
        };
        format!(
            "DATEADD({}, {sign}{}, {base})",
            unit.keyword(),
            unit.count(span)
        )
    }

    fn date_result(&self, row: &dyn ResultCursor, name: &str) -> Result<Option<NaiveDateTime>> {
        let value = row.get_date(name)?;
        Ok(unless_null(row, value).map(|date| date.and_time(NaiveTime::MIN)))
    }
}
