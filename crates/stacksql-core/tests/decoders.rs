//! Typed decoding of result cells.

mod common;
use common::*;

use chrono::{NaiveDate, NaiveTime};
use stacksql_core::dialect::{H2Dialect, MySqlDialect, SqlDialect};
use stacksql_core::Row;

fn sample() -> OneRow {
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    OneRow::default()
        .with("flag", RawCell::Int(2))
        .with("zero", RawCell::Int(0))
        .with("small", RawCell::Int(-7))
        .with("big", RawCell::Int(i64::MAX))
        .with("name", RawCell::Text(String::from("ada")))
        .with("ratio", RawCell::Double(0.25))
        .with("day", RawCell::Date(day))
        .with("at", RawCell::Timestamp(day.and_hms_opt(13, 45, 10).unwrap()))
        .with("clock", RawCell::Time(NaiveTime::from_hms_opt(8, 0, 0).unwrap()))
}

#[test]
fn values_decode_to_some() {
    let row = sample();
    let dialect = MySqlDialect::new();

    assert_eq!(dialect.byte_result(&row, "small").unwrap(), Some(-7));
    assert_eq!(dialect.short_result(&row, "small").unwrap(), Some(-7));
    assert_eq!(dialect.int_result(&row, "small").unwrap(), Some(-7));
    assert_eq!(dialect.long_result(&row, "big").unwrap(), Some(i64::MAX));
    assert_eq!(
        dialect.big_int_result(&row, "big").unwrap(),
        Some(i128::from(i64::MAX))
    );
    assert_eq!(
        dialect.string_result(&row, "name").unwrap().as_deref(),
        Some("ada")
    );
    assert_eq!(dialect.double_result(&row, "ratio").unwrap(), Some(0.25));
    assert_eq!(
        dialect.time_result(&row, "clock").unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0)
    );
}

#[test]
fn null_cells_decode_to_none() {
    let row = OneRow::default();
    for dialect in [&MySqlDialect::new() as &dyn SqlDialect, &H2Dialect::new()] {
        assert_eq!(dialect.byte_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.int_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.long_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.big_int_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.string_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.date_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.timestamp_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.bool_result(&row, "x").unwrap(), None);
        assert_eq!(dialect.double_result(&row, "x").unwrap(), None);
    }
}

#[test]
fn zero_is_not_null() {
    let row = sample();
    let dialect = H2Dialect::new();
    assert_eq!(dialect.int_result(&row, "zero").unwrap(), Some(0));
    assert_eq!(dialect.bool_result(&row, "zero").unwrap(), Some(false));
}

#[test]
fn bool_is_any_nonzero_integer() {
    let row = sample();
    assert_eq!(MySqlDialect::new().bool_result(&row, "flag").unwrap(), Some(true));
}

#[test]
fn date_decoding_differs_per_dialect() {
    let row = sample();
    let at = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(13, 45, 10)
        .unwrap();

    // A timestamp cell keeps its time of day only where dates decode from timestamps.
    assert_eq!(MySqlDialect::new().date_result(&row, "at").unwrap(), Some(at));
    assert_eq!(
        H2Dialect::new().date_result(&row, "at").unwrap(),
        Some(at.date().and_time(NaiveTime::MIN))
    );
    assert_eq!(
        H2Dialect::new().date_result(&row, "day").unwrap(),
        Some(at.date().and_time(NaiveTime::MIN))
    );
}

#[test]
fn type_mismatch_is_a_driver_error() {
    let row = sample();
    let err = MySqlDialect::new().int_result(&row, "name").unwrap_err();
    assert!(matches!(err, stacksql_core::Error::Driver(_)));
}

#[test]
fn row_accessor_delegates_to_dialect() {
    let cursor = sample();
    let dialect = H2Dialect::new();
    let row = Row::new(&dialect, &cursor);

    assert_eq!(row.string("name").unwrap().as_deref(), Some("ada"));
    assert_eq!(row.bool("flag").unwrap(), Some(true));
    assert_eq!(row.long("missing").unwrap(), None);
    assert_eq!(
        row.date("at").unwrap().map(|d| d.date()),
        NaiveDate::from_ymd_opt(2024, 2, 29)
    );
}
