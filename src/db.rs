use migration::Migrator;
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr,
    sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous},
};
use sea_orm_migration::MigratorTrait;

/// Opens the database and brings the schema up to date. Safe to call on every start.
pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(database_url);

    // Each pooled connection to `:memory:` would open its own empty database.
    if database_url.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(max_connections.max(1));
    }

    // Applied on every new pooled connection.
    opts.map_sqlx_sqlite_opts(|sqlite| {
        sqlite.journal_mode(SqliteJournalMode::Wal).synchronous(SqliteSynchronous::Normal)
    });

    let db = Database::connect(opts).await?;

    Migrator::up(&db, None).await?;
    tracing::debug!(url = %database_url, "database ready");

    Ok(db)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Statement, Value};

    use super::*;

    async fn pragma<T: sea_orm::TryGetable>(db: &DatabaseConnection, name: &str) -> T {
        let row = db
            .query_one(Statement::from_string(db.get_database_backend(), format!("PRAGMA {name}")))
            .await
            .unwrap()
            .unwrap();
        row.try_get_by_index(0).unwrap()
    }

    #[tokio::test]
    async fn every_pooled_connection_gets_the_pragmas() {
        let path = std::env::temp_dir().join(format!("films-pragmas-{}.db", std::process::id()));
        let url = format!("sqlite://{}?mode=rwc", path.display());
        let db = connect_and_migrate(&url, 4).await.unwrap();

        let (a, b, c, mode) = tokio::join!(
            pragma::<i32>(&db, "synchronous"),
            pragma::<i32>(&db, "synchronous"),
            pragma::<i32>(&db, "synchronous"),
            pragma::<String>(&db, "journal_mode"),
        );
        // 1 is NORMAL
        assert_eq!([a, b, c], [1, 1, 1]);
        assert_eq!(mode.to_lowercase(), "wal");

        db.close().await.unwrap();
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn migrating_twice_is_a_no_op() {
        let db = connect_and_migrate("sqlite::memory:", 1).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let applied = Migrator::get_applied_migrations(&db).await.unwrap();
        assert_eq!(applied.len(), 1);
    }

    #[tokio::test]
    async fn rating_check_is_enforced_by_the_table() {
        let db = connect_and_migrate("sqlite::memory:", 1).await.unwrap();

        let backend = db.get_database_backend();
        let rejected = db
            .execute(Statement::from_sql_and_values(
                backend,
                "INSERT INTO films (title, year, genre, rating) VALUES (?, ?, ?, ?)",
                [Value::from("Heat"), Value::from(1995), Value::from("Crime"), Value::from(11)],
            ))
            .await;
        assert!(rejected.is_err());

        let accepted = db
            .execute(Statement::from_sql_and_values(
                backend,
                "INSERT INTO films (title, year, genre, rating) VALUES (?, ?, ?, ?)",
                [Value::from("Heat"), Value::from(1995), Value::from("Crime"), Value::from(10)],
            ))
            .await;
        assert!(accepted.is_ok());
    }
}
