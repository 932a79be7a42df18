use std::net::SocketAddr;

use anyhow::Context;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://wedding.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
pub const DEFAULT_WEDDING_DATE: &str = "2027-03-20T17:00:00-06:00";
pub const DEFAULT_CURRENCY: &str = "MXN";
pub const DEFAULT_MAPS_QUERY: &str = "Hacienda San Gabriel";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub public_url: String,
    pub wedding_date: OffsetDateTime,
    pub currency: String,
    pub stripe_secret_key: Option<String>,
    pub mercadopago_access_token: Option<String>,
    pub maps_api_key: Option<String>,
    pub maps_query: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        let bind_addr = or("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr.parse::<SocketAddr>()
            .with_context(|| format!("parse BIND_ADDR {bind_addr:?}"))?;

        let wedding_date = or("WEDDING_DATE", DEFAULT_WEDDING_DATE);
        let wedding_date = OffsetDateTime::parse(&wedding_date, &Rfc3339)
            .with_context(|| format!("parse WEDDING_DATE {wedding_date:?} as RFC 3339"))?;

        let currency = or("CURRENCY", DEFAULT_CURRENCY).to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            anyhow::bail!("CURRENCY must be a three letter ISO 4217 code, got {currency:?}");
        }

        Ok(Config {
            database_url: or("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr,
            public_url: or("PUBLIC_URL", DEFAULT_PUBLIC_URL).trim_end_matches('/').to_owned(),
            wedding_date,
            currency,
            stripe_secret_key: var("STRIPE_SECRET_KEY"),
            mercadopago_access_token: var("MERCADOPAGO_ACCESS_TOKEN"),
            maps_api_key: var("MAPS_API_KEY"),
            maps_query: or("MAPS_QUERY", DEFAULT_MAPS_QUERY),
        })
    }

    /// Absolute URL under the public base, used for payment return links.
    pub fn public_link(&self, path: &str) -> String {
        format!("{}/{}", self.public_url, path.trim_start_matches('/'))
    }

    pub fn maps_embed_url(&self) -> Option<String> {
        let key = self.maps_api_key.as_ref()?;
        reqwest::Url::parse_with_params(
            "https://www.google.com/maps/embed/v1/place",
            &[("key", key.as_str()), ("q", self.maps_query.as_str())],
        )
        .ok()
        .map(String::from)
    }
}
