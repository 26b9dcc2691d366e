//! Implements the struct that holds the state shared by all page handlers.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the server.
///
/// Each page handler declares its own smaller state struct and pulls the
/// fields it needs out of this one via [FromRef].
#[derive(Debug, Clone)]
pub struct AppState {
    /// The path prefix under which the app is served, used for link generation.
    pub base_path: BasePath,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, base_path: BasePath) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            base_path,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

impl FromRef<AppState> for BasePath {
    fn from_ref(state: &AppState) -> Self {
        state.base_path.clone()
    }
}

/// The path prefix the app is served under, e.g. "/blog".
///
/// When the app runs at the web root this is the empty string. Links and
/// redirect targets are produced by joining endpoint constants onto this
/// prefix, so the same pages work in both setups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(Arc<str>);

impl BasePath {
    /// Create a base path from a raw prefix such as "/blog" or "".
    ///
    /// Trailing slashes are stripped and a bare "/" is treated as empty, so
    /// joining never produces a double slash.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim_end_matches('/');

        Self(Arc::from(trimmed))
    }

    /// Join an endpoint path onto the prefix.
    pub fn join(&self, endpoint: &str) -> String {
        format!("{}{}", self.0, endpoint)
    }
}
