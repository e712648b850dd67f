//! Database credential resolution.
//!
//! Builds the PostgreSQL connection string from [`DbConfig`], resolving the
//! password through the secret store when it is not supplied directly.

use std::env;
use std::fmt;

use search_reindex_repository::SecretStore;
use url::form_urlencoded;

use crate::errors::ReindexError;

pub const DB_USER_VAR: &str = "SEARCH_SERVICE_DB_USER";
pub const DB_HOST_VAR: &str = "SEARCH_SERVICE_DB_HOST";
pub const DB_PORT_VAR: &str = "SEARCH_SERVICE_DB_PORT";
pub const DB_DATABASE_VAR: &str = "SEARCH_SERVICE_DB_DATABASE";
pub const DB_PASS_VAR: &str = "SEARCH_SERVICE_DB_PASS";
pub const DB_PASS_SECRET_VAR: &str = "SEARCH_SERVICE_DB_PASS_SECRET";

/// Database connection settings as supplied by the environment.
///
/// Empty values count as unset.
#[derive(Clone, Default)]
pub struct DbConfig {
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub database: Option<String>,
    pub password: Option<String>,
    /// Secret store key holding the password.
    pub password_secret: Option<String>,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_secret", &self.password_secret)
            .finish()
    }
}

impl DbConfig {
    /// Read the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            user: read(DB_USER_VAR),
            host: read(DB_HOST_VAR),
            port: read(DB_PORT_VAR),
            database: read(DB_DATABASE_VAR),
            password: read(DB_PASS_VAR),
            password_secret: read(DB_PASS_SECRET_VAR),
        }
    }
}

/// A fully assembled `postgres://` connection string.
///
/// Holds the password in clear text; `Debug` hides it and there is no
/// `Display` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString(String);

impl ConnectionString {
    /// The raw connection string, for handing to the database driver only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConnectionString(<redacted>)")
    }
}

/// Resolve the database connection string.
///
/// The direct password wins; the secret key is only consulted when no direct
/// password is set. Secret store errors are returned unchanged. Required
/// fields are checked in the order user, host, port, database.
pub async fn resolve(
    config: &DbConfig,
    secrets: &dyn SecretStore,
) -> Result<ConnectionString, ReindexError> {
    let password = match (&config.password, &config.password_secret) {
        (Some(password), _) => password.clone(),
        (None, Some(key)) => secrets.get_global_secret_string(key).await?,
        (None, None) => String::new(),
    };
    if password.is_empty() {
        return Err(ReindexError::config(format!(
            "{} or {} must be specified",
            DB_PASS_VAR, DB_PASS_SECRET_VAR
        )));
    }

    let user = required(&config.user, DB_USER_VAR)?;
    let host = required(&config.host, DB_HOST_VAR)?;
    let port = required(&config.port, DB_PORT_VAR)?;
    let database = required(&config.database, DB_DATABASE_VAR)?;

    Ok(ConnectionString(format!(
        "postgres://{}:{}@{}:{}/{}",
        user,
        escape_password(&password),
        host,
        port,
        database
    )))
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ReindexError> {
    value
        .as_deref()
        .ok_or_else(|| ReindexError::config(format!("{} must be specified", name)))
}

/// Percent-encode a password for the userinfo part of a URI.
///
/// Literal `+` is already encoded as `%2B`, so the remaining `+` signs are
/// spaces.
fn escape_password(password: &str) -> String {
    form_urlencoded::byte_serialize(password.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
