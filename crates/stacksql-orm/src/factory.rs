//! Connection factories.
//!
//! A factory hands one connection to each unit of work and releases it when
//! closed. Both factories here reuse a single connection sequentially.

use stacksql_core::driver::Connection;
use tracing::debug;

use crate::config::{ConnectionSettings, DriverKind};
use crate::connection::SqlxConnection;
use crate::error::Result;

/// Supplies connections to an environment.
pub trait ConnectionFactory {
    /// Runs `work` against a live connection.
    fn connect<T>(&mut self, work: impl FnOnce(&mut dyn Connection) -> Result<T>) -> Result<T>;

    /// Releases the held connection, if any.
    fn close(self) -> Result<()>;
}

/// Opens a connection from a driver and URL on first use and keeps it open
/// until closed.
pub struct CreateConnectionFactory {
    driver: DriverKind,
    url: String,
    credentials: Option<(String, String)>,
    connection: Option<Box<dyn Connection>>,
}

impl CreateConnectionFactory {
    /// Creates a factory for `url` without credentials.
    #[must_use]
    pub fn new(driver: DriverKind, url: impl Into<String>) -> Self {
        Self {
            driver,
            url: url.into(),
            credentials: None,
            connection: None,
        }
    }

    /// Creates a factory for `url` that authenticates as `username`.
    #[must_use]
    pub fn with_credentials(
        driver: DriverKind,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Some((username.into(), password.into())),
            ..Self::new(driver, url)
        }
    }

    /// Creates a factory from settings.
    pub fn from_settings(settings: &ConnectionSettings) -> Result<Self> {
        let driver = settings.driver()?;
        Ok(match settings.credentials()? {
            Some((username, password)) => {
                Self::with_credentials(driver, settings.url.as_str(), username, password)
            }
            None => Self::new(driver, settings.url.as_str()),
        })
    }

    fn open(&self) -> Result<Box<dyn Connection>> {
        let credentials = self
            .credentials
            .as_ref()
            .map(|(username, password)| (username.as_str(), password.as_str()));
        let connection = SqlxConnection::open(self.driver, &self.url, credentials)?;
        Ok(Box::new(connection))
    }
}

impl ConnectionFactory for CreateConnectionFactory {
    fn connect<T>(&mut self, work: impl FnOnce(&mut dyn Connection) -> Result<T>) -> Result<T> {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => {
                debug!(driver = %self.driver, "Opening connection");
                self.open()?
            }
        };
        let connection = self.connection.insert(connection);
        work(&mut **connection)
    }

    fn close(self) -> Result<()> {
        match self.connection {
            Some(connection) => Ok(connection.close()?),
            None => Ok(()),
        }
    }
}

/// Wraps a connection that is already open.
pub struct SingleConnectionFactory {
    connection: Box<dyn Connection>,
}

impl SingleConnectionFactory {
    /// Wraps `connection`. Closing the factory closes the connection.
    #[must_use]
    pub fn new(connection: Box<dyn Connection>) -> Self {
        Self { connection }
    }
}

impl ConnectionFactory for SingleConnectionFactory {
    fn connect<T>(&mut self, work: impl FnOnce(&mut dyn Connection) -> Result<T>) -> Result<T> {
        work(&mut *self.connection)
    }

    fn close(self) -> Result<()> {
        Ok(self.connection.close()?)
    }
}
