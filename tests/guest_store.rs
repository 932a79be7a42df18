use anyhow::Result;
use axum::{extract::State, http::StatusCode};
use sqlx::SqlitePool;
use tempfile::TempDir;
use weddingsite::db::{self, NewGuest, WALL_LIMIT};

async fn fresh_pool(dir: &TempDir) -> Result<SqlitePool> {
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("wedding.db").display());
    let pool = db::connect_pool(&url).await?;
    db::run_migrations(&pool).await?;
    Ok(pool)
}

fn guest(name: &str, message: Option<&str>) -> NewGuest {
    NewGuest {
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "5512345678".to_owned(),
        guests: 2,
        message: message.map(str::to_owned),
    }
}

async fn insert_at(pool: &SqlitePool, id: &str, message: Option<&str>, created_at: &str) -> Result<()> {
    sqlx::query("INSERT INTO guests (id,name,email,phone,guests,message,created_at) VALUES (?,?,?,?,1,?,?)")
        .bind(id)
        .bind(id)
        .bind(format!("{id}@example.com"))
        .bind("5512345678")
        .bind(message)
        .bind(created_at)
        .execute(pool)
        .await?;
    Ok(())
}

#[tokio::test]
async fn migrations_are_idempotent() -> Result<()> {
    let td = TempDir::new()?;
    let pool = fresh_pool(&td).await?;
    db::run_migrations(&pool).await?;

    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' AND name='guests'")
        .fetch_all(&pool)
        .await?;
    assert_eq!(names, vec!["guests".to_string()]);
    Ok(())
}

#[tokio::test]
async fn insert_assigns_id_and_timestamp() -> Result<()> {
    let td = TempDir::new()?;
    let pool = fresh_pool(&td).await?;

    let stored = db::insert_guest(&pool, guest("Lucia", Some("¡Felicidades!"))).await?;
    assert!(uuid::Uuid::parse_str(&stored.id).is_ok());

    let row: db::Guest = sqlx::query_as("SELECT id,name,email,phone,guests,message,created_at FROM guests WHERE id=?")
        .bind(&stored.id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(row.name, "Lucia");
    assert_eq!(row.email, "lucia@example.com");
    assert_eq!(row.guests, 2);
    assert_eq!(row.message.as_deref(), Some("¡Felicidades!"));
    assert_eq!(row.created_at.unix_timestamp(), stored.created_at.unix_timestamp());
    Ok(())
}

#[tokio::test]
async fn wall_skips_guests_without_messages() -> Result<()> {
    let td = TempDir::new()?;
    let pool = fresh_pool(&td).await?;

    db::insert_guest(&pool, guest("Ana", None)).await?;
    db::insert_guest(&pool, guest("Beto", Some("Los queremos"))).await?;
    insert_at(&pool, "blank", Some("   "), "2027-01-01T00:00:00.000000000Z").await?;

    let wall = db::recent_messages(&pool, WALL_LIMIT).await?;
    assert_eq!(wall.len(), 1);
    assert_eq!(wall[0].name, "Beto");
    assert_eq!(wall[0].message, "Los queremos");
    Ok(())
}

#[tokio::test]
async fn wall_is_newest_first_and_capped() -> Result<()> {
    let td = TempDir::new()?;
    let pool = fresh_pool(&td).await?;

    // inserted oldest last so row order alone would be wrong
    for minute in (0..35).rev() {
        insert_at(&pool, &format!("g{minute:02}"), Some("hola"), &format!("2027-01-01T12:{minute:02}:00.000000000Z")).await?;
    }

    let wall = db::recent_messages(&pool, WALL_LIMIT).await?;
    assert_eq!(wall.len(), 30);
    assert!(wall.windows(2).all(|pair| pair[0].created_at >= pair[1].created_at));
    assert_eq!(wall[0].name, "g34");
    assert_eq!(wall[29].name, "g05");
    Ok(())
}

#[tokio::test]
async fn ping_succeeds_on_a_live_pool() -> Result<()> {
    let td = TempDir::new()?;
    let pool = fresh_pool(&td).await?;
    db::ping(&pool).await?;

    pool.close().await;
    assert!(db::ping(&pool).await.is_err());
    Ok(())
}

#[tokio::test]
async fn health_follows_the_database() -> Result<()> {
    let td = TempDir::new()?;
    let pool = fresh_pool(&td).await?;
    assert_eq!(db::health(State(pool.clone())).await, StatusCode::OK);

    pool.close().await;
    assert_eq!(db::health(State(pool)).await, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}
