//! Database schema initialization.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, category::create_category_table, post::create_post_table};

/// Create the application tables inside a single exclusive transaction.
///
/// Foreign key enforcement is off by default in SQLite, so this also turns
/// on `foreign_keys` for the connection. Without it the restrict-on-delete
/// constraint between post and category would be silently ignored.
///
/// # Errors
/// Returns an error if a table cannot be created or the transaction cannot
/// be committed.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_post_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
