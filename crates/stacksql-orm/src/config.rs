//! Connection settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OrmError, Result};

/// Environment variable holding the driver name.
pub const DRIVER_VAR: &str = "STACKSQL_DRIVER";
/// Environment variable holding the connection URL.
pub const URL_VAR: &str = "STACKSQL_URL";
/// Environment variable holding the user name.
pub const USERNAME_VAR: &str = "STACKSQL_USERNAME";
/// Environment variable holding the password.
pub const PASSWORD_VAR: &str = "STACKSQL_PASSWORD";

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// MySQL or MariaDB.
    #[serde(alias = "mariadb")]
    MySql,
    /// SQLite.
    Sqlite,
}

impl DriverKind {
    /// Returns the canonical driver name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Infers the driver from the scheme of `url`.
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .ok_or_else(|| OrmError::Config(format!("no scheme in url `{url}`")))?;
        scheme.parse()
    }
}

impl FromStr for DriverKind {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(OrmError::UnknownDriver(s.to_string())),
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where and how to connect.
///
/// The driver may be left out, in which case it is inferred from the URL
/// scheme.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Driver to use.
    #[serde(default)]
    pub driver: Option<DriverKind>,
    /// Connection URL, e.g. `mysql://localhost/app` or `sqlite::memory:`.
    pub url: String,
    /// User name, if not part of the URL.
    #[serde(default)]
    pub username: Option<String>,
    /// Password, if not part of the URL.
    #[serde(default)]
    pub password: Option<String>,
}

impl ConnectionSettings {
    /// Creates settings for `url` with the driver inferred from it.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            driver: None,
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Sets the driver explicitly.
    #[must_use]
    pub const fn with_driver(mut self, driver: DriverKind) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Returns the explicit driver, or the one inferred from the URL.
    pub fn driver(&self) -> Result<DriverKind> {
        self.driver.map_or_else(|| DriverKind::from_url(&self.url), Ok)
    }

    /// Returns the credentials when both parts are present.
    ///
    /// A user name without a password, or the reverse, is a configuration error.
    pub fn credentials(&self) -> Result<Option<(&str, &str)>> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(Some((username.as_str(), password.as_str()))),
            (None, None) => Ok(None),
            _ => Err(OrmError::Config(String::from(
                "username and password must be given together",
            ))),
        }
    }

    /// Loads settings from the `STACKSQL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(URL_VAR).ok_or_else(|| OrmError::Config(format!("{URL_VAR} is not set")))?;
        let driver = lookup(DRIVER_VAR)
            .map(|name| name.parse::<DriverKind>())
            .transpose()?;
        let settings = Self {
            driver,
            url,
            username: lookup(USERNAME_VAR),
            password: lookup(PASSWORD_VAR),
        };
        settings.credentials()?;
        Ok(settings)
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("driver", &self.driver)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
