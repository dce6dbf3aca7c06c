//! Database operations for the chart of accounts.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    chart_of_accounts::{AccountId, ChartOfAccount, domain::AccountInput},
};

/// Create an account and return it with its generated ID.
///
/// # Errors
/// Returns [Error::InvalidReference] if the parent account does not exist.
pub fn create_account(input: &AccountInput, connection: &Connection) -> Result<ChartOfAccount, Error> {
    connection
        .prepare(
            "INSERT INTO chart_of_accounts (code, name, type, parent_id, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, code, name, type, parent_id, active, created_at",
        )?
        .query_row(
            (
                &input.code,
                &input.name,
                &input.account_type,
                input.parent_id,
                input.active,
                OffsetDateTime::now_utc(),
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single account by ID.
pub fn get_account(id: AccountId, connection: &Connection) -> Result<ChartOfAccount, Error> {
    connection
        .prepare(
            "SELECT id, code, name, type, parent_id, active, created_at
             FROM chart_of_accounts WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all accounts ordered by code.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<ChartOfAccount>, Error> {
    connection
        .prepare(
            "SELECT id, code, name, type, parent_id, active, created_at
             FROM chart_of_accounts ORDER BY code ASC, id ASC",
        )?
        .query_map([], map_row)?
        .map(|maybe_account| maybe_account.map_err(|error| error.into()))
        .collect()
}

/// Overwrite every editable field of an account.
///
/// # Errors
/// Returns [Error::UpdateMissingAccount] if `id` does not refer to an account.
pub fn update_account(
    id: AccountId,
    input: &AccountInput,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE chart_of_accounts
         SET code = ?1, name = ?2, type = ?3, parent_id = ?4, active = ?5
         WHERE id = ?6",
        (
            &input.code,
            &input.name,
            &input.account_type,
            input.parent_id,
            input.active,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingAccount);
    }

    Ok(())
}

/// Whether making `parent_id` the parent of `account_id` would close a loop,
/// i.e. `parent_id` is `account_id` itself or one of its descendants.
pub fn creates_parent_cycle(
    account_id: AccountId,
    parent_id: AccountId,
    connection: &Connection,
) -> Result<bool, Error> {
    // UNION rather than UNION ALL so a cycle already in the table still ends.
    connection
        .prepare(
            "WITH RECURSIVE ancestors(id, parent_id) AS (
                SELECT id, parent_id FROM chart_of_accounts WHERE id = ?1
                UNION
                SELECT account.id, account.parent_id
                FROM chart_of_accounts account
                JOIN ancestors ON account.id = ancestors.parent_id
            )
            SELECT EXISTS(SELECT 1 FROM ancestors WHERE id = ?2)",
        )?
        .query_row((parent_id, account_id), |row| row.get(0))
        .map_err(|error| error.into())
}

pub fn create_chart_of_accounts_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS chart_of_accounts (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            parent_id INTEGER REFERENCES chart_of_accounts(id),
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_chart_of_accounts_code ON chart_of_accounts(code);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<ChartOfAccount, rusqlite::Error> {
    Ok(ChartOfAccount {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        account_type: row.get(3)?,
        parent_id: row.get(4)?,
        active: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod account_query_tests {
    use rusqlite::Connection;

    use crate::{Error, chart_of_accounts::domain::AccountInput, db::initialize};

    use super::{
        create_account, creates_parent_cycle, get_account, get_all_accounts, update_account,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn input(code: &str, parent_id: Option<i64>) -> AccountInput {
        AccountInput {
            code: code.to_owned(),
            name: format!("Conta {code}"),
            account_type: "ativo".to_owned(),
            parent_id,
            active: true,
        }
    }

    #[test]
    fn create_child_account_succeeds() {
        let connection = get_test_db_connection();
        let parent = create_account(&input("1", None), &connection).unwrap();

        let child = create_account(&input("1.1", Some(parent.id)), &connection).unwrap();

        assert_eq!(child.parent_id, Some(parent.id));
        assert_eq!(get_account(child.id, &connection), Ok(child));
    }

    #[test]
    fn create_with_missing_parent_is_invalid_reference() {
        let connection = get_test_db_connection();

        let result = create_account(&input("1.1", Some(99)), &connection);

        assert_eq!(result, Err(Error::InvalidReference));
    }

    #[test]
    fn get_all_orders_by_code() {
        let connection = get_test_db_connection();
        create_account(&input("2", None), &connection).unwrap();
        create_account(&input("1.2", None), &connection).unwrap();
        create_account(&input("1.1", None), &connection).unwrap();

        let codes = get_all_accounts(&connection)
            .unwrap()
            .into_iter()
            .map(|account| account.code)
            .collect::<Vec<_>>();

        assert_eq!(codes, vec!["1.1", "1.2", "2"]);
    }

    #[test]
    fn update_account_succeeds() {
        let connection = get_test_db_connection();
        let account = create_account(&input("1", None), &connection).unwrap();
        let new_input = AccountInput {
            active: false,
            account_type: "despesa".to_owned(),
            ..input("3", None)
        };

        update_account(account.id, &new_input, &connection).unwrap();

        let updated = get_account(account.id, &connection).unwrap();
        assert_eq!(updated.code, "3");
        assert_eq!(updated.account_type, "despesa");
        assert!(!updated.active);
    }

    #[test]
    fn parent_cycle_detects_self_and_descendants() {
        let connection = get_test_db_connection();
        let root = create_account(&input("1", None), &connection).unwrap();
        let child = create_account(&input("1.1", Some(root.id)), &connection).unwrap();
        let grandchild = create_account(&input("1.1.1", Some(child.id)), &connection).unwrap();
        let other = create_account(&input("2", None), &connection).unwrap();

        assert_eq!(creates_parent_cycle(root.id, root.id, &connection), Ok(true));
        assert_eq!(creates_parent_cycle(root.id, grandchild.id, &connection), Ok(true));
        assert_eq!(creates_parent_cycle(child.id, root.id, &connection), Ok(false));
        assert_eq!(creates_parent_cycle(root.id, other.id, &connection), Ok(false));
        assert_eq!(creates_parent_cycle(root.id, 99, &connection), Ok(false));
    }

    #[test]
    fn update_with_invalid_id_returns_error() {
        let connection = get_test_db_connection();

        assert_eq!(
            update_account(5, &input("1", None), &connection),
            Err(Error::UpdateMissingAccount)
        );
    }
}
