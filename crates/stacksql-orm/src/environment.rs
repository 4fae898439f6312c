//! The execution environment.
//!
//! A [`DialectEnvironment`] pairs a connection factory with a dialect factory.
//! Every statement is compiled by a fresh dialect, prepared, bound from
//! position 1 and executed; query rows are handed to a caller-supplied mapper
//! which decodes them through the same dialect.

use stacksql_core::builder::{Delete, Emit, HasSet, HasValues, Insert, Select, Update};
use stacksql_core::dialect::{MySqlDialect, SqlDialect};
use stacksql_core::driver::Statement;
use stacksql_core::{Row, Segment};
use stacksql_sqlite::SqliteDialect;
use tracing::{debug, warn};

use crate::config::{ConnectionSettings, DriverKind};
use crate::error::Result;
use crate::factory::{ConnectionFactory, CreateConnectionFactory};

/// Creates one dialect instance per compilation.
pub type DialectFactory = Box<dyn Fn() -> Box<dyn SqlDialect>>;

/// Executes statements through a connection factory.
pub struct DialectEnvironment<F> {
    factory: F,
    dialects: DialectFactory,
}

impl<F: ConnectionFactory> DialectEnvironment<F> {
    /// Creates an environment. `dialects` is called once per statement.
    pub fn new(factory: F, dialects: impl Fn() -> Box<dyn SqlDialect> + 'static) -> Self {
        Self {
            factory,
            dialects: Box::new(dialects),
        }
    }

    /// Compiles `tree` with a fresh dialect.
    pub fn compile(&self, tree: &impl Emit) -> Segment {
        tree.render((self.dialects)().as_mut())
    }

    /// Runs `query` and maps every row.
    pub fn select<T>(
        &mut self,
        query: &Select,
        mapper: impl FnMut(&Row<'_>) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.query(query, mapper, None)
    }

    /// Runs `query` and maps the first row, if any.
    pub fn first<T>(
        &mut self,
        query: &Select,
        mapper: impl FnMut(&Row<'_>) -> Result<T>,
    ) -> Result<Option<T>> {
        Ok(self.query(query, mapper, Some(1))?.into_iter().next())
    }

    /// Runs an INSERT and returns the number of inserted rows.
    pub fn insert(&mut self, insert: &Insert<HasValues>) -> Result<u64> {
        self.execute(insert)
    }

    /// Runs an UPDATE and returns the number of affected rows.
    pub fn update(&mut self, update: &Update<HasSet>) -> Result<u64> {
        self.execute(update)
    }

    /// Runs a DELETE and returns the number of deleted rows.
    pub fn delete(&mut self, delete: &Delete) -> Result<u64> {
        self.execute(delete)
    }

    /// Runs any mutation and returns the number of affected rows.
    pub fn execute(&mut self, tree: &impl Emit) -> Result<u64> {
        let mut dialect = (self.dialects)();
        let segment = tree.render(dialect.as_mut());
        log_statement(&*dialect, &segment);
        self.factory.connect(|connection| {
            let mut statement = connection.prepare(segment.sql())?;
            segment.bind(statement.as_mut())?;
            Ok(statement.execute_update()?)
        })
    }

    /// Runs raw SQL without parameters.
    pub fn run_sql(&mut self, sql: &str) -> Result<()> {
        self.run_sql_with(sql, |_| Ok(()))
    }

    /// Runs raw SQL after `prepare` has bound its parameters.
    pub fn run_sql_with(
        &mut self,
        sql: &str,
        prepare: impl FnOnce(&mut dyn Statement) -> stacksql_core::Result<()>,
    ) -> Result<()> {
        debug!(sql = %sql, "Executing SQL");
        self.factory.connect(|connection| {
            let mut statement = connection.prepare(sql)?;
            prepare(statement.as_mut())?;
            Ok(statement.execute()?)
        })
    }

    /// Closes the connection factory.
    pub fn close(self) -> Result<()> {
        self.factory.close()
    }

    fn query<T>(
        &mut self,
        query: &Select,
        mut mapper: impl FnMut(&Row<'_>) -> Result<T>,
        limit: Option<usize>,
    ) -> Result<Vec<T>> {
        let mut dialect = (self.dialects)();
        let segment = query.render(dialect.as_mut());
        log_statement(&*dialect, &segment);
        let dialect = &*dialect;
        self.factory.connect(|connection| {
            let mut statement = connection.prepare(segment.sql())?;
            segment.bind(statement.as_mut())?;
            let mut cursor = statement.execute_query()?;
            let mut results = Vec::new();
            while cursor.advance()? {
                let row = Row::new(dialect, cursor.as_ref());
                results.push(mapper(&row)?);
                if limit == Some(results.len()) {
                    break;
                }
            }
            Ok(results)
        })
    }
}

fn log_statement(dialect: &dyn SqlDialect, segment: &Segment) {
    debug!(
        dialect = dialect.name(),
        sql = %segment.sql(),
        parameters = segment.parameters().len(),
        statement = %segment.describe(),
        "Executing statement"
    );
}

/// Runs `work` in a fresh environment and closes it afterwards.
///
/// The factory is closed on every path. A close failure is returned only
/// when `work` succeeded; otherwise the error from `work` wins and the close
/// failure is logged.
pub fn with_environment<F, T>(
    factory: F,
    dialects: impl Fn() -> Box<dyn SqlDialect> + 'static,
    work: impl FnOnce(&mut DialectEnvironment<F>) -> Result<T>,
) -> Result<T>
where
    F: ConnectionFactory,
{
    let mut environment = DialectEnvironment::new(factory, dialects);
    let outcome = work(&mut environment);
    let closed = environment.close();
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_error)) => Err(close_error),
        (Err(error), Ok(())) => Err(error),
        (Err(error), Err(close_error)) => {
            warn!(error = %close_error, "Failed to close connection after error");
            Err(error)
        }
    }
}

/// Creates a MySQL environment for `url`.
#[must_use]
pub fn mysql(
    url: &str,
    username: &str,
    password: &str,
) -> DialectEnvironment<CreateConnectionFactory> {
    DialectEnvironment::new(
        CreateConnectionFactory::with_credentials(DriverKind::MySql, url, username, password),
        || Box::new(MySqlDialect::new()),
    )
}

/// Creates a SQLite environment for `url`.
#[must_use]
pub fn sqlite(url: &str) -> DialectEnvironment<CreateConnectionFactory> {
    DialectEnvironment::new(CreateConnectionFactory::new(DriverKind::Sqlite, url), || {
        Box::new(SqliteDialect::new())
    })
}

/// Creates an environment from settings, choosing the dialect from the driver.
pub fn from_settings(
    settings: &ConnectionSettings,
) -> Result<DialectEnvironment<CreateConnectionFactory>> {
    let factory = CreateConnectionFactory::from_settings(settings)?;
    let environment = match settings.driver()? {
        DriverKind::MySql => DialectEnvironment::new(factory, || Box::new(MySqlDialect::new())),
        DriverKind::Sqlite => DialectEnvironment::new(factory, || Box::new(SqliteDialect::new())),
    };
    Ok(environment)
}

/// Runs `work` against a MySQL database and closes the connection afterwards.
pub fn connect_mysql<T>(
    url: &str,
    username: &str,
    password: &str,
    work: impl FnOnce(&mut DialectEnvironment<CreateConnectionFactory>) -> Result<T>,
) -> Result<T> {
    with_environment(
        CreateConnectionFactory::with_credentials(DriverKind::MySql, url, username, password),
        || Box::new(MySqlDialect::new()),
        work,
    )
}

/// Runs `work` against a SQLite database and closes the connection afterwards.
pub fn connect_sqlite<T>(
    url: &str,
    work: impl FnOnce(&mut DialectEnvironment<CreateConnectionFactory>) -> Result<T>,
) -> Result<T> {
    with_environment(
        CreateConnectionFactory::new(DriverKind::Sqlite, url),
        || Box::new(SqliteDialect::new()),
        work,
    )
}
