//! Decomposition of elapsed-time periods into SQL interval units.
//!
//! Periods are truncated to whole milliseconds first. A period is then
//! expressed in the coarsest unit that reproduces it exactly, trying
//! [`COARSE_UNITS`] in order and falling back to a sub-second unit picked by
//! the dialect.

use chrono::TimeDelta;

/// A unit a period can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodUnit {
    /// 24 hours.
    Day,
    /// 60 minutes.
    Hour,
    /// 60 seconds.
    Minute,
    /// One second.
    Second,
    /// One millisecond.
    Millisecond,
    /// One microsecond.
    Microsecond,
}

/// Units tried from coarsest to finest before falling back.
pub const COARSE_UNITS: [PeriodUnit; 4] = [
    PeriodUnit::Day,
    PeriodUnit::Hour,
    PeriodUnit::Minute,
    PeriodUnit::Second,
];

impl PeriodUnit {
    /// Returns the SQL keyword of the unit (`DAY`, `HOUR`, ...).
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Millisecond => "MILLISECOND",
            Self::Microsecond => "MICROSECOND",
        }
    }

    /// Returns how many whole units fit in `span`, truncating.
    #[must_use]
    pub fn count(self, span: TimeDelta) -> i64 {
        match self {
            Self::Day => span.num_days(),
            Self::Hour => span.num_hours(),
            Self::Minute => span.num_minutes(),
            Self::Second => span.num_seconds(),
            Self::Millisecond => span.num_milliseconds(),
            Self::Microsecond => span.num_milliseconds().saturating_mul(1000),
        }
    }

    /// Returns the span covered by `count` units.
    #[must_use]
    pub fn span(self, count: i64) -> TimeDelta {
        match self {
            Self::Day => TimeDelta::days(count),
            Self::Hour => TimeDelta::hours(count),
            Self::Minute => TimeDelta::minutes(count),
            Self::Second => TimeDelta::seconds(count),
            Self::Millisecond => TimeDelta::milliseconds(count),
            Self::Microsecond => TimeDelta::microseconds(count),
        }
    }

    /// Returns whether `span` is a whole number of this unit.
    #[must_use]
    pub fn is_whole(self, span: TimeDelta) -> bool {
        self.span(self.count(span)) == span
    }

    /// Returns the coarsest unit with a nonzero count in `span`.
    #[must_use]
    pub fn leading(span: TimeDelta) -> Option<Self> {
        COARSE_UNITS.into_iter().find(|unit| unit.count(span) > 0)
    }

    /// Returns the coarsest unit that expresses `span` exactly.
    #[must_use]
    pub fn coarsest_whole(span: TimeDelta) -> Option<Self> {
        COARSE_UNITS.into_iter().find(|unit| unit.is_whole(span))
    }
}

/// Which way a period moves the base instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// Later in time.
    Forward,
    /// Earlier in time.
    Backward,
}

impl ShiftDirection {
    /// Returns the other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Drops everything finer than a millisecond.
///
/// Truncation is toward zero so that a period and its negation stay
/// symmetric.
#[must_use]
pub fn truncate_to_millis(period: TimeDelta) -> TimeDelta {
    TimeDelta::milliseconds(period.num_milliseconds())
}

/// Normalizes a requested shift into a strictly positive span.
///
/// Returns `None` when the period truncates to zero. Negative periods flip
/// the direction.
#[must_use]
pub fn normalize(direction: ShiftDirection, period: TimeDelta) -> Option<(ShiftDirection, TimeDelta)> {
    let span = truncate_to_millis(period);
    if span.is_zero() {
        None
    } else if span < TimeDelta::zero() {
        Some((direction.opposite(), -span))
    } else {
        Some((direction, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coarsest_whole_unit() {
        assert_eq!(PeriodUnit::coarsest_whole(TimeDelta::days(1)), Some(PeriodUnit::Day));
        assert_eq!(PeriodUnit::coarsest_whole(TimeDelta::hours(36)), Some(PeriodUnit::Hour));
        assert_eq!(PeriodUnit::coarsest_whole(TimeDelta::minutes(90)), Some(PeriodUnit::Minute));
        assert_eq!(
            PeriodUnit::coarsest_whole(TimeDelta::hours(1) + TimeDelta::seconds(30)),
            Some(PeriodUnit::Second)
        );
        assert_eq!(PeriodUnit::coarsest_whole(TimeDelta::milliseconds(500)), None);
    }

    #[test]
    fn test_leading_unit() {
        assert_eq!(PeriodUnit::leading(TimeDelta::minutes(90)), Some(PeriodUnit::Hour));
        assert_eq!(PeriodUnit::leading(TimeDelta::milliseconds(1500)), Some(PeriodUnit::Second));
        assert_eq!(PeriodUnit::leading(TimeDelta::milliseconds(500)), None);
    }

    #[test]
    fn test_sub_second_units_are_always_whole() {
        let span = TimeDelta::milliseconds(1234);
        assert!(PeriodUnit::Millisecond.is_whole(span));
        assert!(PeriodUnit::Microsecond.is_whole(span));
        assert_eq!(PeriodUnit::Microsecond.count(span), 1_234_000);
    }

    #[test]
    fn test_truncation_discards_sub_millisecond_precision() {
        let period = TimeDelta::milliseconds(5) + TimeDelta::nanoseconds(999_999);
        assert_eq!(truncate_to_millis(period), TimeDelta::milliseconds(5));
        assert_eq!(truncate_to_millis(-period), TimeDelta::milliseconds(-5));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(ShiftDirection::Forward, TimeDelta::zero()), None);
        assert_eq!(normalize(ShiftDirection::Forward, TimeDelta::nanoseconds(900)), None);
        assert_eq!(
            normalize(ShiftDirection::Forward, TimeDelta::hours(-2)),
            Some((ShiftDirection::Backward, TimeDelta::hours(2)))
        );
        assert_eq!(
            normalize(ShiftDirection::Backward, TimeDelta::seconds(-1)),
            Some((ShiftDirection::Forward, TimeDelta::seconds(1)))
        );
    }
}
