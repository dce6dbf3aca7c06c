//! Database operations for payment methods.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    payment_method::{PaymentMethod, PaymentMethodId, domain::PaymentMethodInput},
};

/// Create a payment method and return it with its generated ID.
pub fn create_payment_method(
    input: &PaymentMethodInput,
    connection: &Connection,
) -> Result<PaymentMethod, Error> {
    connection
        .prepare(
            "INSERT INTO payment_methods (name, description, active, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, description, active, created_at",
        )?
        .query_row(
            (
                &input.name,
                &input.description,
                input.active,
                OffsetDateTime::now_utc(),
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single payment method by ID.
pub fn get_payment_method(
    id: PaymentMethodId,
    connection: &Connection,
) -> Result<PaymentMethod, Error> {
    connection
        .prepare(
            "SELECT id, name, description, active, created_at FROM payment_methods WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all payment methods ordered by name.
pub fn get_all_payment_methods(connection: &Connection) -> Result<Vec<PaymentMethod>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, active, created_at FROM payment_methods
             ORDER BY name ASC, id ASC",
        )?
        .query_map([], map_row)?
        .map(|maybe_payment_method| maybe_payment_method.map_err(|error| error.into()))
        .collect()
}

/// Overwrite every editable field of a payment method.
///
/// # Errors
/// Returns [Error::UpdateMissingPaymentMethod] if `id` does not refer to a payment method.
pub fn update_payment_method(
    id: PaymentMethodId,
    input: &PaymentMethodInput,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE payment_methods SET name = ?1, description = ?2, active = ?3 WHERE id = ?4",
        (&input.name, &input.description, input.active, id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingPaymentMethod);
    }

    Ok(())
}

pub fn create_payment_method_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS payment_methods (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<PaymentMethod, rusqlite::Error> {
    Ok(PaymentMethod {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        active: row.get(3)?,
        created_at: row.get(4)?,
    })
}
