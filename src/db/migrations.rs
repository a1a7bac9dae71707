use anyhow::Context;
use rusqlite::Connection;

/// Applied in order; names are recorded in `_migrations` so re-runs skip
/// anything already applied. Seed content ships inside the binary.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_articles",
        include_str!("../../migrations/001_create_articles.sql"),
    ),
    (
        "002_create_reviews",
        include_str!("../../migrations/002_create_reviews.sql"),
    ),
    (
        "003_seed_articles",
        include_str!("../../migrations/003_seed_articles.sql"),
    ),
];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;

        if already_applied {
            continue;
        }

        conn.execute_batch(sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;

        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}
