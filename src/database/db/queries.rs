use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::{Pool, Sqlite};

use crate::database::models::{NewSavingEntry, SavingEntry};

/*
CRUD queries for the savings_entries table.
Amounts are stored as TEXT and parsed back into Decimal.
 */

// Insert a batch of entries; all or nothing.
pub async fn insert_entries(
    pool: &Pool<Sqlite>,
    entries: &[NewSavingEntry],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO savings_entries (name, amount, created_at)
            VALUES (?, ?, datetime('now'))
            "#,
        )
        .bind(&entry.name)
        .bind(entry.amount.to_string())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

// List all entries, newest first.
pub async fn list_entries(pool: &Pool<Sqlite>) -> Result<Vec<SavingEntry>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT
            entry_id,
            name,
            amount,
            created_at
        FROM savings_entries
        ORDER BY created_at DESC, entry_id DESC
        "#,
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let amount_text: String = row.try_get("amount")?;
        let amount = Decimal::from_str_exact(&amount_text).map_err(|e| {
            sqlx::Error::Decode(format!("invalid Decimal format for amount: {e}").into())
        })?;

        Ok(SavingEntry {
            entry_id: row.try_get("entry_id")?,
            name: row.try_get("name")?,
            amount,
            created_at: row.try_get("created_at")?,
        })
    })
    .collect::<Result<Vec<SavingEntry>, sqlx::Error>>()
}

// Delete one entry, reporting whether it existed.
pub async fn delete_entry(pool: &Pool<Sqlite>, entry_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM savings_entries
        WHERE entry_id = ?
        "#,
    )
    .bind(entry_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory sqlite");
        crate::database::db::migrate::run_migrations(&pool)
            .await
            .expect("run migrations");
        pool
    }

    fn entry(name: &str, amount: &str) -> NewSavingEntry {
        NewSavingEntry {
            name: name.to_string(),
            amount: Decimal::from_str_exact(amount).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_then_list_roundtrips_amounts() {
        let pool = test_pool().await;
        insert_entries(&pool, &[entry("Emergency fund", "1234.56"), entry("Trip", "80")])
            .await
            .unwrap();

        let entries = list_entries(&pool).await.unwrap();
        assert_eq!(entries.len(), 2);
        // Newest first; same-second inserts fall back to id order.
        assert_eq!(entries[0].name, "Trip");
        assert_eq!(entries[0].amount, Decimal::from_str_exact("80").unwrap());
        assert_eq!(entries[1].name, "Emergency fund");
        assert_eq!(entries[1].amount, Decimal::from_str_exact("1234.56").unwrap());
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let pool = test_pool().await;
        insert_entries(&pool, &[entry("Emergency fund", "500")])
            .await
            .unwrap();

        let id = list_entries(&pool).await.unwrap()[0].entry_id;
        assert!(delete_entry(&pool, id).await.unwrap());
        assert!(!delete_entry(&pool, id).await.unwrap());
        assert!(list_entries(&pool).await.unwrap().is_empty());
    }
}
