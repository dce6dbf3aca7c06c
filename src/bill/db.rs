//! Database operations for bills.

use rusqlite::{Connection, Row, params_from_iter};
use time::OffsetDateTime;

use crate::{
    Error,
    bill::{Bill, BillId, domain::BillInput},
    filter::RecordFilter,
};

const BILL_COLUMNS: &str = "id, description, amount, category, due_date, paid, paid_date, \
    actual_amount, interest_amount, payment_method_id, account_id, created_at";

/// Create a bill and return it with its generated ID.
///
/// # Errors
/// Returns [Error::InvalidReference] if the payment method or account does not exist.
pub fn create_bill(input: &BillInput, connection: &Connection) -> Result<Bill, Error> {
    let payment = input.payment.clone().unwrap_or_default();

    connection
        .prepare(&format!(
            "INSERT INTO bills (description, amount, category, due_date, paid, paid_date,
                actual_amount, interest_amount, payment_method_id, account_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             RETURNING {BILL_COLUMNS}"
        ))?
        .query_row(
            (
                &input.description,
                input.amount,
                &input.category,
                input.due_date,
                input.payment.is_some(),
                payment.paid_date,
                payment.actual_amount,
                payment.interest_amount,
                payment.payment_method_id,
                input.account_id,
                OffsetDateTime::now_utc(),
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single bill by ID.
pub fn get_bill(id: BillId, connection: &Connection) -> Result<Bill, Error> {
    connection
        .prepare(&format!("SELECT {BILL_COLUMNS} FROM bills WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the bills matching `filter`, soonest due first.
pub fn get_bills(filter: &RecordFilter, connection: &Connection) -> Result<Vec<Bill>, Error> {
    let sql_filter = filter.to_sql("due_date");
    let query = format!(
        "SELECT {BILL_COLUMNS} FROM bills {} ORDER BY due_date ASC, id ASC",
        sql_filter.where_clause
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(sql_filter.params.iter()), map_row)?
        .map(|maybe_bill| maybe_bill.map_err(|error| error.into()))
        .collect()
}

/// Overwrite every editable field of a bill.
///
/// Saving an unpaid bill clears its payment fields.
///
/// # Errors
/// Returns [Error::UpdateMissingBill] if `id` does not refer to a bill.
pub fn update_bill(id: BillId, input: &BillInput, connection: &Connection) -> Result<(), Error> {
    let payment = input.payment.clone().unwrap_or_default();

    let rows_affected = connection.execute(
        "UPDATE bills
         SET description = ?1, amount = ?2, category = ?3, due_date = ?4, paid = ?5,
             paid_date = ?6, actual_amount = ?7, interest_amount = ?8,
             payment_method_id = ?9, account_id = ?10
         WHERE id = ?11",
        (
            &input.description,
            input.amount,
            &input.category,
            input.due_date,
            input.payment.is_some(),
            payment.paid_date,
            payment.actual_amount,
            payment.interest_amount,
            payment.payment_method_id,
            input.account_id,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingBill);
    }

    Ok(())
}

pub fn create_bill_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS bills (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            due_date TEXT NOT NULL,
            paid INTEGER NOT NULL DEFAULT 0,
            paid_date TEXT,
            actual_amount REAL,
            interest_amount REAL,
            payment_method_id INTEGER REFERENCES payment_methods(id),
            account_id INTEGER REFERENCES chart_of_accounts(id),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bills_due_date ON bills(due_date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Bill, rusqlite::Error> {
    Ok(Bill {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        due_date: row.get(4)?,
        paid: row.get(5)?,
        paid_date: row.get(6)?,
        actual_amount: row.get(7)?,
        interest_amount: row.get(8)?,
        payment_method_id: row.get(9)?,
        account_id: row.get(10)?,
        created_at: row.get(11)?,
    })
}

#[cfg(test)]
mod bill_query_tests {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        bill::domain::{BillInput, BillPayment},
        filter::RecordFilter,
        payment_method::{PaymentMethodInput, create_payment_method},
        test_utils::get_test_connection,
    };

    use super::{create_bill, get_bill, get_bills, update_bill};

    fn input(description: &str, due_date: OffsetDateTime) -> BillInput {
        BillInput {
            description: description.to_owned(),
            amount: 100.0,
            category: "servicos".to_owned(),
            due_date,
            account_id: None,
            payment: None,
        }
    }

    #[test]
    fn create_unpaid_bill() {
        let connection = get_test_connection();

        let bill = create_bill(&input("Internet", datetime!(2024-04-10 0:00 UTC)), &connection)
            .unwrap();

        assert!(!bill.paid);
        assert_eq!(bill.paid_date, None);
        assert_eq!(bill.payment_method_id, None);
        assert_eq!(get_bill(bill.id, &connection), Ok(bill));
    }

    #[test]
    fn create_with_missing_payment_method_is_invalid_reference() {
        let connection = get_test_connection();
        let bill_input = BillInput {
            payment: Some(BillPayment {
                payment_method_id: Some(5),
                ..Default::default()
            }),
            ..input("Internet", datetime!(2024-04-10 0:00 UTC))
        };

        assert_eq!(
            create_bill(&bill_input, &connection),
            Err(Error::InvalidReference)
        );
    }

    #[test]
    fn get_bills_orders_by_due_date_and_filters() {
        let connection = get_test_connection();
        create_bill(&input("Gás", datetime!(2024-05-01 0:00 UTC)), &connection).unwrap();
        create_bill(&input("Água", datetime!(2024-03-01 0:00 UTC)), &connection).unwrap();
        create_bill(&input("Luz", datetime!(2024-04-01 0:00 UTC)), &connection).unwrap();

        let all = get_bills(&RecordFilter::default(), &connection)
            .unwrap()
            .into_iter()
            .map(|bill| bill.description)
            .collect::<Vec<_>>();
        assert_eq!(all, vec!["Água", "Luz", "Gás"]);

        let filter = RecordFilter {
            from: "2024-04-01".to_owned(),
            to: "2024-04-01".to_owned(),
            ..Default::default()
        };
        let filtered = get_bills(&filter, &connection).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].description, "Luz");
    }

    #[test]
    fn marking_unpaid_clears_payment_fields() {
        let connection = get_test_connection();
        let payment_method = create_payment_method(
            &PaymentMethodInput {
                name: "PIX".to_owned(),
                description: None,
                active: true,
            },
            &connection,
        )
        .unwrap();
        let paid_input = BillInput {
            payment: Some(BillPayment {
                paid_date: Some(datetime!(2024-04-09 0:00 UTC)),
                payment_method_id: Some(payment_method.id),
                actual_amount: Some(102.0),
                interest_amount: Some(2.0),
            }),
            ..input("Internet", datetime!(2024-04-10 0:00 UTC))
        };
        let bill = create_bill(&paid_input, &connection).unwrap();
        assert!(bill.paid);
        assert_eq!(bill.payment_method_id, Some(payment_method.id));

        update_bill(bill.id, &input("Internet", bill.due_date), &connection).unwrap();

        let updated = get_bill(bill.id, &connection).unwrap();
        assert!(!updated.paid);
        assert_eq!(updated.paid_date, None);
        assert_eq!(updated.payment_method_id, None);
        assert_eq!(updated.actual_amount, None);
        assert_eq!(updated.interest_amount, None);
    }

    #[test]
    fn update_with_invalid_id_returns_error() {
        let connection = get_test_connection();

        assert_eq!(
            update_bill(9, &input("Internet", datetime!(2024-04-10 0:00 UTC)), &connection),
            Err(Error::UpdateMissingBill)
        );
    }
}
