use std::str::FromStr;

use estimator_core::RepositoryError;
use rust_decimal::Decimal;
use sqlx::{Row, TypeInfo, ValueRef};

/// Get a decimal value from a row.
///
/// Money is written as TEXT so no precision is lost, but INTEGER and REAL
/// cells (hand-edited rows, older files) are accepted too.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    // A NULL cell still reports its column's declared type.
    if value_ref.is_null() {
        return Ok(Decimal::ZERO);
    }

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "TEXT" => {
            let val: String = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get TEXT from '{}': {}", column, e))
            })?;
            Decimal::from_str(val.trim()).map_err(|e| {
                RepositoryError::Database(format!("Failed to parse decimal '{}': {}", val, e))
            })
        }
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> sqlx::sqlite::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        sqlx::query(
            "CREATE TABLE test_decimals (
                id INTEGER PRIMARY KEY,
                text_value TEXT,
                int_value INTEGER,
                real_value REAL,
                null_value TEXT,
                blob_value BLOB
            )",
        )
        .execute(&pool)
        .await
        .expect("Failed to create test table");

        sqlx::query(
            "INSERT INTO test_decimals (id, text_value, int_value, real_value, null_value, blob_value)
             VALUES (1, '576.89', 12345, 123.45, NULL, x'00ff')",
        )
        .execute(&pool)
        .await
        .expect("Failed to insert test row");

        pool
    }

    async fn fetch_row(pool: &sqlx::sqlite::SqlitePool) -> sqlx::sqlite::SqliteRow {
        sqlx::query("SELECT * FROM test_decimals WHERE id = 1")
            .fetch_one(pool)
            .await
            .expect("Failed to fetch test row")
    }

    #[tokio::test]
    async fn test_get_decimal_from_text() {
        let pool = setup_test_db().await;
        let row = fetch_row(&pool).await;

        assert_eq!(get_decimal(&row, "text_value"), Ok(dec!(576.89)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_integer() {
        let pool = setup_test_db().await;
        let row = fetch_row(&pool).await;

        assert_eq!(get_decimal(&row, "int_value"), Ok(dec!(12345)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_real() {
        let pool = setup_test_db().await;
        let row = fetch_row(&pool).await;

        assert_eq!(get_decimal(&row, "real_value"), Ok(dec!(123.45)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_null_returns_zero() {
        let pool = setup_test_db().await;
        let row = fetch_row(&pool).await;

        assert_eq!(get_decimal(&row, "null_value"), Ok(Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_get_decimal_column_not_found() {
        let pool = setup_test_db().await;
        let row = fetch_row(&pool).await;

        assert!(matches!(
            get_decimal(&row, "missing"),
            Err(RepositoryError::Database(msg)) if msg.contains("missing")
        ));
    }

    #[tokio::test]
    async fn test_get_decimal_unexpected_type() {
        let pool = setup_test_db().await;
        let row = fetch_row(&pool).await;

        assert!(matches!(
            get_decimal(&row, "blob_value"),
            Err(RepositoryError::Database(msg)) if msg.contains("BLOB")
        ));
    }
}
