//! Environment behavior against a scripted driver.

mod common;
use common::*;

use chrono::NaiveDate;
use stacksql_core::builder::{col, val, Delete, Insert, Select, Update};
use stacksql_core::dialect::{MySqlDialect, SqlDialect};
use stacksql_core::{Error, ParameterKind};
use stacksql_orm::{
    with_environment, DialectEnvironment, OrmError, SingleConnectionFactory,
};

fn environment(connection: MockConnection) -> DialectEnvironment<SingleConnectionFactory> {
    init_tracing();
    DialectEnvironment::new(SingleConnectionFactory::new(Box::new(connection)), || {
        Box::new(MySqlDialect::new()) as Box<dyn SqlDialect>
    })
}

#[test]
fn select_binds_parameters_in_placeholder_order() {
    let (connection, journal) = MockConnection::new();
    let mut env = environment(connection);
    let query = Select::new("users")
        .columns([col("id"), col("name")])
        .filter(col("id").gt(5).and(col("name").eq("x")));

    let rows = env.select(&query, |row| Ok(row.long("id")?)).unwrap();

    assert!(rows.is_empty());
    let journal = journal.borrow();
    assert_eq!(journal.prepared, vec![env.compile(&query).sql().to_string()]);
    assert_eq!(
        journal.executions,
        vec![vec![Bound::Long(5), Bound::Text(String::from("x"))]]
    );
}

#[test]
fn select_maps_every_row_and_null_cells() {
    let (connection, _) = MockConnection::new();
    let connection = connection.with_rows(vec![
        row(&[("id", RawCell::Int(1)), ("name", RawCell::Text(String::from("Ada")))]),
        row(&[("id", RawCell::Int(2))]),
    ]);
    let mut env = environment(connection);
    let query = Select::new("users").columns([col("id"), col("name")]);

    let rows = env
        .select(&query, |row| Ok((row.long("id")?, row.string("name")?)))
        .unwrap();

    assert_eq!(
        rows,
        vec![
            (Some(1), Some(String::from("Ada"))),
            (Some(2), None),
        ]
    );
}

#[test]
fn first_stops_after_one_row() {
    let (connection, _) = MockConnection::new();
    let connection = connection.with_rows(vec![
        row(&[("id", RawCell::Int(10))]),
        row(&[("id", RawCell::Int(20))]),
        row(&[("id", RawCell::Int(30))]),
    ]);
    let mut env = environment(connection);
    let query = Select::new("users").column(col("id"));

    let mut calls = 0;
    let first = env
        .first(&query, |row| {
            calls += 1;
            Ok(row.int("id")?)
        })
        .unwrap();

    assert_eq!(first, Some(Some(10)));
    assert_eq!(calls, 1);
}

#[test]
fn first_on_empty_result_is_none() {
    let (connection, _) = MockConnection::new();
    let mut env = environment(connection);
    let query = Select::new("users").column(col("id"));

    let first = env.first(&query, |row| Ok(row.long("id")?)).unwrap();
    assert_eq!(first, None);
}

#[test]
fn mapper_errors_propagate() {
    let (connection, _) = MockConnection::new();
    let connection = connection.with_rows(vec![row(&[("id", RawCell::Text(String::from("x")))])]);
    let mut env = environment(connection);
    let query = Select::new("users").column(col("id"));

    let result = env.select(&query, |row| Ok(row.long("id")?));
    assert!(matches!(result, Err(OrmError::Core(Error::Driver(_)))));
}

#[test]
fn mutations_return_affected_counts() {
    let (connection, journal) = MockConnection::new();
    let mut env = environment(connection.with_affected(3));

    let inserted = env
        .insert(
            &Insert::into_table("users")
                .set("id", 7)
                .set("name", val(None::<&str>)),
        )
        .unwrap();
    let updated = env
        .update(&Update::table("users").set("name", "Bob").filter(col("id").eq(7)))
        .unwrap();
    let deleted = env.delete(&Delete::table("users")).unwrap();

    assert_eq!((inserted, updated, deleted), (3, 3, 3));
    let journal = journal.borrow();
    assert_eq!(
        journal.executions,
        vec![
            vec![Bound::Long(7), Bound::Null(ParameterKind::String)],
            vec![Bound::Text(String::from("Bob")), Bound::Long(7)],
            vec![],
        ]
    );
    assert_eq!(journal.prepared[2], "DELETE FROM users");
}

#[test]
fn run_sql_with_binds_through_the_closure() {
    let (connection, journal) = MockConnection::new();
    let mut env = environment(connection);
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

    env.run_sql("CREATE TABLE t (d DATE)").unwrap();
    env.run_sql_with("INSERT INTO t (d) VALUES (?)", |statement| {
        statement.set_date(1, day)
    })
    .unwrap();

    let journal = journal.borrow();
    assert_eq!(journal.prepared.len(), 2);
    assert_eq!(journal.executions, vec![vec![], vec![Bound::Date(day)]]);
}

#[test]
fn unbound_placeholder_is_reported() {
    let (connection, _) = MockConnection::new();
    let mut env = environment(connection);

    let result = env.run_sql_with("SELECT ?, ?", |statement| statement.set_long(2, 1));
    assert!(matches!(
        result,
        Err(OrmError::Core(Error::UnboundParameter { position: 1 }))
    ));
}

#[test]
fn with_environment_closes_after_success() {
    let (connection, journal) = MockConnection::new();

    let value = with_environment(
        SingleConnectionFactory::new(Box::new(connection)),
        || Box::new(MySqlDialect::new()) as Box<dyn SqlDialect>,
        |env| env.run_sql("SELECT 1").map(|()| 42),
    )
    .unwrap();

    assert_eq!(value, 42);
    assert!(journal.borrow().closed);
}

#[test]
fn with_environment_reports_close_failure_after_success() {
    let (connection, _) = MockConnection::new();

    let result = with_environment(
        SingleConnectionFactory::new(Box::new(connection.failing_close())),
        || Box::new(MySqlDialect::new()) as Box<dyn SqlDialect>,
        |_| Ok(()),
    );

    assert!(matches!(result, Err(OrmError::Core(Error::Driver(_)))));
}

#[test]
fn with_environment_keeps_work_error_over_close_error() {
    init_tracing();
    let (connection, _) = MockConnection::new();

    let result: stacksql_orm::Result<()> = with_environment(
        SingleConnectionFactory::new(Box::new(connection.failing_close())),
        || Box::new(MySqlDialect::new()) as Box<dyn SqlDialect>,
        |_| Err(OrmError::Config(String::from("work failed"))),
    );

    assert!(matches!(result, Err(OrmError::Config(message)) if message == "work failed"));
}
