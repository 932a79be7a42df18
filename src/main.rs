use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use weddingsite::{config::Config, countdown, db, gifts::{self, Catalog}, index, payments::Payments, res, rsvp, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env().context("read configuration")?;

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.public_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(1)));

    let db_pool = db::connect_pool(&config.database_url).await?;
    db::run_migrations(&db_pool).await.context("run migrations")?;

    let catalog = Catalog::bundled()?;
    let payments = Payments::from_config(&config).map_err(|err| err.0)?;
    let bind_addr = config.bind_addr;

    tracing::info!(
        gifts = catalog.gifts().len(),
        stripe = config.stripe_secret_key.is_some(),
        mercadopago = config.mercadopago_access_token.is_some(),
        maps = config.maps_api_key.is_some(),
        "starting"
    );

    let app_state = AppState {
        db_pool,
        config: Arc::new(config),
        catalog: Arc::new(catalog),
        payments,
    };

    let api = Router::new()
        .route("/api/countdown", get(countdown::countdown))
        .route("/health", get(db::health))
        .layer(CorsLayer::permissive());

    let app = Router::new()
        .route("/", get(index::index))
        .route("/lang/{code}", get(index::switch_lang))
        .route("/static/style.css", get(res::style))
        .route("/static/app.js", get(res::script))

        .merge(api)
        .merge(rsvp::router())
        .merge(gifts::router())
        .fallback(res::sorry)

        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("bind {bind_addr}"))?;
    tracing::info!("listening on http://{bind_addr}");
    axum::serve(listener, app).await.context("server shutdown")?;

    Ok(())
}
