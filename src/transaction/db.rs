//! Database operations for transactions.

use rusqlite::{Connection, Row, params_from_iter};
use time::OffsetDateTime;

use crate::{
    Error,
    filter::RecordFilter,
    transaction::{Transaction, TransactionId, domain::TransactionInput},
};

/// Create a transaction and return it with its generated ID.
pub fn create_transaction(
    input: &TransactionInput,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO transactions (description, amount, type, category, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, description, amount, type, category, date, created_at",
        )?
        .query_row(
            (
                &input.description,
                input.amount,
                &input.transaction_type,
                &input.category,
                input.date,
                OffsetDateTime::now_utc(),
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single transaction by ID.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, type, category, date, created_at
             FROM transactions WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the transactions matching `filter`, most recent first.
pub fn get_transactions(
    filter: &RecordFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let sql_filter = filter.to_sql("date");
    let query = format!(
        "SELECT id, description, amount, type, category, date, created_at
         FROM transactions {} ORDER BY date DESC, id DESC",
        sql_filter.where_clause
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(sql_filter.params.iter()), map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Overwrite every editable field of a transaction.
///
/// # Errors
/// Returns [Error::UpdateMissingTransaction] if `id` does not refer to a transaction.
pub fn update_transaction(
    id: TransactionId,
    input: &TransactionInput,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE transactions
         SET description = ?1, amount = ?2, type = ?3, category = ?4, date = ?5
         WHERE id = ?6",
        (
            &input.description,
            input.amount,
            &input.transaction_type,
            &input.category,
            input.date,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        transaction_type: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
        created_at: row.get(6)?,
    })
}
