//! Database operations for transactions.

use rusqlite::{Connection, Row, params, params_from_iter, types::Value};

use crate::{
    Error,
    database_id::TransactionId,
    db::{SqlDateTime, SqlDecimal},
    transaction::{NewTransaction, Totals, Transaction, TransactionFilter, TransactionType},
};

const TRANSACTION_COLUMNS: &str =
    "id, title, description, amount, \"type\", category, date, created_at";

/// Create a transaction and return it with its generated ID.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO transactions \
        (title, description, amount, \"type\", category, date, created_at) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            transaction.title,
            transaction.description,
            SqlDecimal(transaction.amount),
            transaction.transaction_type,
            transaction.category,
            SqlDateTime(transaction.date),
            SqlDateTime(transaction.created_at),
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(transaction.with_id(id))
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the transactions selected by `filter`, most recent first.
///
/// Transactions on the same date-time are ordered by ID, newest first, so the
/// order stays stable after updates.
pub fn get_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, parameters): (&str, Vec<Value>) = match filter {
        TransactionFilter::All => ("", Vec::new()),
        TransactionFilter::DateRange { start, end } => (
            "WHERE date(date) BETWEEN ?1 AND ?2",
            vec![Value::Text(start.to_string()), Value::Text(end.to_string())],
        ),
        TransactionFilter::Type(transaction_type) => (
            "WHERE \"type\" = ?1",
            vec![Value::Text(transaction_type.as_str().to_owned())],
        ),
        TransactionFilter::Category(category) => {
            ("WHERE category = ?1", vec![Value::Text(category.clone())])
        }
    };

    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM transactions {where_clause} ORDER BY date DESC, id DESC"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(parameters), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

/// Sum income and expenses over every transaction.
///
/// The sums are exact, and all zero when there are no transactions.
pub fn get_totals(connection: &Connection) -> Result<Totals, Error> {
    let amounts = connection
        .prepare("SELECT amount, \"type\" FROM transactions")?
        .query_map([], |row| {
            let SqlDecimal(amount) = row.get(0)?;
            let transaction_type: TransactionType = row.get(1)?;

            Ok((amount, transaction_type))
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    Ok(Totals::from_amounts(amounts))
}

/// Replace every field of the stored transaction with the same ID as `transaction`.
///
/// # Errors
/// Returns [Error::UpdateMissingTransaction] if the transaction does not exist.
pub fn update_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE transactions SET \
            title = ?1, \
            description = ?2, \
            amount = ?3, \
            \"type\" = ?4, \
            category = ?5, \
            date = ?6, \
            created_at = ?7 \
        WHERE id = ?8;",
        params![
            transaction.title,
            transaction.description,
            SqlDecimal(transaction.amount),
            transaction.transaction_type,
            transaction.category,
            SqlDateTime(transaction.date),
            SqlDateTime(transaction.created_at),
            transaction.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete a transaction by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if the transaction does not exist.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM transactions WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            amount TEXT NOT NULL,
            \"type\" TEXT NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
        CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let SqlDecimal(amount) = row.get(3)?;
    let SqlDateTime(date) = row.get(6)?;
    let SqlDateTime(created_at) = row.get(7)?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        amount,
        transaction_type: row.get(4)?,
        category: row.get(5)?,
        date,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{
        PrimitiveDateTime,
        macros::{date, datetime},
    };

    use crate::{
        Error,
        db::initialize,
        transaction::{NewTransaction, Transaction, TransactionFilter, TransactionType},
    };

    use super::{
        create_transaction, delete_transaction, get_totals, get_transaction, get_transactions,
        update_transaction,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_transaction(
        title: &str,
        amount: Decimal,
        transaction_type: TransactionType,
        date: PrimitiveDateTime,
    ) -> NewTransaction {
        NewTransaction {
            title: title.to_owned(),
            description: None,
            amount,
            transaction_type,
            category: "Food".to_owned(),
            date,
            created_at: datetime!(2024-01-10 12:00),
        }
    }

    fn expense(title: &str, amount: Decimal, date: PrimitiveDateTime) -> NewTransaction {
        new_transaction(title, amount, TransactionType::Expense, date)
    }

    fn income(title: &str, amount: Decimal, date: PrimitiveDateTime) -> NewTransaction {
        new_transaction(title, amount, TransactionType::Income, date)
    }

    fn must_create(transaction: NewTransaction, conn: &Connection) -> Transaction {
        create_transaction(transaction, conn).expect("Could not create transaction")
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let transaction = NewTransaction {
            description: Some("Flat white".to_owned()),
            ..new_transaction(
                "Coffee",
                dec!(4.50),
                TransactionType::Expense,
                datetime!(2024-01-10 0:00),
            )
        };

        let got = must_create(transaction.clone(), &conn);

        assert!(got.id > 0);
        assert_eq!(got, transaction.with_id(got.id));
        assert_eq!(get_transaction(got.id, &conn), Ok(got));
    }

    #[test]
    fn get_with_invalid_id_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(1, &conn), Err(Error::NotFound));
    }

    #[test]
    fn all_transactions_are_ordered_most_recent_first() {
        let conn = get_test_connection();
        let oldest = must_create(
            expense("Rent", dec!(1200), datetime!(2024-01-01 0:00)),
            &conn,
        );
        let newest = must_create(
            expense("Coffee", dec!(4.50), datetime!(2024-01-10 0:00)),
            &conn,
        );
        let middle = must_create(
            income("Salary", dec!(2500), datetime!(2024-01-05 0:00)),
            &conn,
        );

        let got = get_transactions(&TransactionFilter::All, &conn).expect("Could not query");

        assert_eq!(got, vec![newest, middle, oldest]);
    }

    #[test]
    fn same_date_ties_are_broken_by_id() {
        let conn = get_test_connection();
        let date = datetime!(2024-01-10 0:00);
        let first = must_create(expense("A", dec!(1), date), &conn);
        let second = must_create(expense("B", dec!(2), date), &conn);

        let got = get_transactions(&TransactionFilter::All, &conn).expect("Could not query");

        assert_eq!(got, vec![second, first]);
    }

    #[test]
    fn date_range_includes_whole_end_day() {
        let conn = get_test_connection();
        must_create(
            expense("Before", dec!(1), datetime!(2024-01-31 23:59:59)),
            &conn,
        );
        let start = must_create(
            expense("Start", dec!(2), datetime!(2024-02-01 0:00)),
            &conn,
        );
        let end = must_create(
            income("End", dec!(3), datetime!(2024-02-29 18:45)),
            &conn,
        );
        must_create(
            expense("After", dec!(4), datetime!(2024-03-01 0:00)),
            &conn,
        );

        let got = get_transactions(
            &TransactionFilter::DateRange {
                start: date!(2024 - 02 - 01),
                end: date!(2024 - 02 - 29),
            },
            &conn,
        )
        .expect("Could not query");

        assert_eq!(got, vec![end, start]);
    }

    #[test]
    fn filter_by_type() {
        let conn = get_test_connection();
        let salary = must_create(
            income("Salary", dec!(2500), datetime!(2024-01-05 0:00)),
            &conn,
        );
        must_create(
            expense("Coffee", dec!(4.50), datetime!(2024-01-10 0:00)),
            &conn,
        );

        let got = get_transactions(&TransactionFilter::Type(TransactionType::Income), &conn)
            .expect("Could not query");

        assert_eq!(got, vec![salary]);
    }

    #[test]
    fn filter_by_category_is_exact() {
        let conn = get_test_connection();
        let groceries = must_create(
            NewTransaction {
                category: "Groceries".to_owned(),
                ..expense("Supermarket", dec!(85.20), datetime!(2024-01-07 0:00))
            },
            &conn,
        );
        must_create(
            expense("Coffee", dec!(4.50), datetime!(2024-01-10 0:00)),
            &conn,
        );

        let got = get_transactions(&TransactionFilter::Category("Groceries".to_owned()), &conn)
            .expect("Could not query");
        let none = get_transactions(&TransactionFilter::Category("groceries".to_owned()), &conn)
            .expect("Could not query");

        assert_eq!(got, vec![groceries]);
        assert!(none.is_empty());
    }

    #[test]
    fn totals_are_zero_without_transactions() {
        let conn = get_test_connection();

        let totals = get_totals(&conn).expect("Could not get totals");

        assert_eq!(totals.balance, Decimal::ZERO);
        assert_eq!(totals.total_income, Decimal::ZERO);
        assert_eq!(totals.total_expenses, Decimal::ZERO);
    }

    #[test]
    fn totals_are_exact() {
        let conn = get_test_connection();
        for _ in 0..10 {
            must_create(
                expense("Bus", dec!(0.10), datetime!(2024-01-10 0:00)),
                &conn,
            );
        }
        must_create(
            income("Refund", dec!(0.30), datetime!(2024-01-10 0:00)),
            &conn,
        );

        let totals = get_totals(&conn).expect("Could not get totals");

        assert_eq!(totals.total_expenses, dec!(1.00));
        assert_eq!(totals.total_income, dec!(0.30));
        assert_eq!(totals.balance, dec!(-0.70));
    }

    #[test]
    fn update_replaces_all_fields() {
        let conn = get_test_connection();
        let transaction = must_create(
            expense("Coffee", dec!(4.50), datetime!(2024-01-10 0:00)),
            &conn,
        );
        let want = Transaction {
            title: "Coffee beans".to_owned(),
            description: Some("1kg".to_owned()),
            amount: dec!(32.00),
            transaction_type: TransactionType::Expense,
            category: "Groceries".to_owned(),
            date: datetime!(2024-01-11 8:15),
            ..transaction
        };

        update_transaction(&want, &conn).expect("Could not update transaction");

        assert_eq!(get_transaction(want.id, &conn), Ok(want));
    }

    #[test]
    fn update_missing_transaction_returns_error() {
        let conn = get_test_connection();
        let transaction = new_transaction(
            "Ghost",
            dec!(1),
            TransactionType::Income,
            datetime!(2024-01-10 0:00),
        )
        .with_id(7);

        let result = update_transaction(&transaction, &conn);

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction = must_create(
            expense("Coffee", dec!(4.50), datetime!(2024-01-10 0:00)),
            &conn,
        );

        delete_transaction(transaction.id, &conn).expect("Could not delete transaction");

        assert_eq!(get_transaction(transaction.id, &conn), Err(Error::NotFound));
        assert_eq!(delete_transaction(transaction.id, &conn), Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn unknown_stored_type_is_an_error() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO transactions (title, amount, \"type\", category, date, created_at) \
            VALUES ('Odd', '1', 'REFUND', 'Misc', '2024-01-10T00:00:00', '2024-01-10T00:00:00')",
            (),
        )
        .unwrap();

        let result = get_transactions(&TransactionFilter::All, &conn);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }
}
