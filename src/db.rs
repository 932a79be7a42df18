use anyhow::Context;
use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use sqlx::{sqlite::SqlitePoolOptions, FromRow, SqlitePool};
use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime, UtcOffset};
use uuid::Uuid;

/// Rows shown on the message wall.
pub const WALL_LIMIT: i64 = 30;

#[derive(Debug, Clone, FromRow)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guests: i64,
    pub message: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A validated RSVP, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guests: i64,
    pub message: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct WallMessage {
    pub name: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WallMessageJson {
    pub name: String,
    pub message: String,
    pub created_at: String,
}

impl From<WallMessage> for WallMessageJson {
    fn from(WallMessage { name, message, created_at }: WallMessage) -> Self {
        WallMessageJson {
            name,
            message,
            created_at: created_at.format(&Rfc3339).unwrap_or_default(),
        }
    }
}

/// Fixed-width RFC 3339 in UTC, so text order is time order.
pub fn timestamp(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"))
        .unwrap_or_default()
}

pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(16)
        .connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {db_url}"))
}

pub async fn run_migrations(db_pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS guests (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            guests INTEGER NOT NULL,
            message TEXT,
            created_at TEXT NOT NULL
        )",
    )
    .execute(db_pool)
    .await
    .context("create guests table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS guests_created_at ON guests (created_at)")
        .execute(db_pool)
        .await
        .context("create guests_created_at index")?;

    Ok(())
}

pub async fn insert_guest(db_pool: &SqlitePool, guest: NewGuest) -> Result<Guest, sqlx::Error> {
    let guest = Guest {
        id: Uuid::now_v7().to_string(),
        name: guest.name,
        email: guest.email,
        phone: guest.phone,
        guests: guest.guests,
        message: guest.message,
        created_at: OffsetDateTime::now_utc(),
    };

    sqlx::query("INSERT INTO guests (id,name,email,phone,guests,message,created_at) VALUES (?,?,?,?,?,?,?)")
        .bind(&guest.id)
        .bind(&guest.name)
        .bind(&guest.email)
        .bind(&guest.phone)
        .bind(guest.guests)
        .bind(&guest.message)
        .bind(timestamp(guest.created_at))
        .execute(db_pool)
        .await?;

    tracing::info!(id = %guest.id, guests = guest.guests, "rsvp stored");
    Ok(guest)
}

/// Newest non-empty messages first.
pub async fn recent_messages(db_pool: &SqlitePool, limit: i64) -> Result<Vec<WallMessage>, sqlx::Error> {
    sqlx::query_as(
        "SELECT name,message,created_at FROM guests
        WHERE message IS NOT NULL AND trim(message) <> ''
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?",
    )
    .bind(limit)
    .fetch_all(db_pool)
    .await
}

pub async fn ping(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(db_pool)
        .await
        .map(|_| ())
}

/// `GET /health`: 200 while the database answers, 503 otherwise.
pub async fn health(State(db_pool): State<SqlitePool>) -> StatusCode {
    match ping(&db_pool).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn timestamps_sort_as_text() {
        let whole = timestamp(datetime!(2027-01-01 12:00:00 UTC));
        let later = timestamp(datetime!(2027-01-01 12:00:00.5 UTC));
        assert_eq!(whole, "2027-01-01T12:00:00.000000000Z");
        assert!(whole < later);
        assert_eq!(timestamp(datetime!(2027-01-01 06:00:00 -6)), whole);
    }
}
