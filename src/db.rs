//! Database set up for the application.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, functions::FunctionFlags};

use crate::{Error, transaction::create_transaction_table};

/// Create the application's tables if they do not exist yet and register the
/// SQL functions the queries use.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created or a function
/// could not be registered.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_unicode_lower(connection)?;
    create_transaction_table(connection)?;

    Ok(())
}

/// Register `unicode_lower(text)`, a lowercase that folds all of Unicode.
///
/// SQLite's built-in `lower()` only folds ASCII letters. NULL maps to NULL.
fn register_unicode_lower(connection: &Connection) -> Result<(), Error> {
    connection.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text: Option<String> = context.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )?;

    Ok(())
}

/// Lock the shared database connection.
///
/// # Errors
/// Returns an [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}
