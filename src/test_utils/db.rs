use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::db::initialize;

/// An initialized in-memory database.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

/// The number of rows in `table`, used to check how many writes a handler issued.
#[track_caller]
pub(crate) fn count_rows(connection: &Arc<Mutex<Connection>>, table: &str) -> i64 {
    connection
        .lock()
        .expect("Could not acquire database lock")
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("Could not count rows")
}
