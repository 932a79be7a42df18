use std::{fmt, time::Duration};

use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use crate::{config::Config, AppResult};

mod mercadopago;
mod stripe;

pub use mercadopago::MercadoPagoClient;
pub use stripe::StripeClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProvider {
    Stripe,
    Mercadopago,
}

impl PaymentProvider {
    /// Name used in `/checkout/{provider}`.
    pub fn parse(name: &str) -> Option<PaymentProvider> {
        match name {
            "stripe" => Some(PaymentProvider::Stripe),
            "mercadopago" => Some(PaymentProvider::Mercadopago),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What a provider needs to build its hosted checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub reference: Uuid,
    pub currency: String,
    pub lines: Vec<CheckoutLine>,
    pub success_url: String,
    pub failure_url: String,
    pub pending_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub id: String,
    pub title: String,
    /// Minor units.
    pub unit_amount: i64,
    pub quantity: u32,
}

#[derive(Clone)]
pub struct Payments {
    http_client: reqwest::Client,
    stripe: Option<StripeClient>,
    mercadopago: Option<MercadoPagoClient>,
}

impl Payments {
    pub fn from_config(config: &Config) -> AppResult<Payments> {
        let http_client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Payments {
            http_client,
            stripe: config.stripe_secret_key.clone().map(StripeClient::new),
            mercadopago: config.mercadopago_access_token.clone().map(MercadoPagoClient::new),
        })
    }

    pub fn is_enabled(&self, provider: PaymentProvider) -> bool {
        use PaymentProvider::*;
        match provider {
            Stripe => self.stripe.is_some(),
            Mercadopago => self.mercadopago.is_some(),
        }
    }

    /// Asks the provider for a hosted checkout and returns the URL to send the visitor to.
    pub async fn start_checkout(&self, provider: PaymentProvider, checkout: &Checkout) -> AppResult<String> {
        use PaymentProvider::*;
        let not_configured = || format!("payment provider {provider} keys not supplied");
        let url = match provider {
            Stripe => {
                self.stripe.as_ref().ok_or_else(not_configured)?
                    .create_session(&self.http_client, checkout).await?
            }
            Mercadopago => {
                self.mercadopago.as_ref().ok_or_else(not_configured)?
                    .create_preference(&self.http_client, checkout).await?
            }
        };

        tracing::info!(%provider, reference = %checkout.reference, "checkout started");
        Ok(url)
    }
}

/// Reads a provider reply. Failures keep the status and whatever the body said,
/// even when the body is not JSON (gateway pages, empty replies).
fn read_reply(
    provider: PaymentProvider,
    status: StatusCode,
    text: &str,
    message: fn(&Value) -> AppResult<String>,
) -> AppResult<Value> {
    let body = serde_json::from_str::<Value>(text);
    if !status.is_success() {
        let detail = match body.as_ref().ok().map(message) {
            Some(Ok(message)) => message,
            _ if text.trim().is_empty() => "<empty body>".to_owned(),
            _ => text.trim().to_owned(),
        };
        return Err(format!("{provider} responded {status}: {detail}").into());
    }
    Ok(body?)
}

#[cfg(test)]
pub(crate) fn sample_checkout() -> Checkout {
    Checkout {
        reference: Uuid::nil(),
        currency: "MXN".to_owned(),
        lines: vec![
            CheckoutLine { id: "plates".into(), title: "Vajilla".into(), unit_amount: 125_000, quantity: 2 },
            CheckoutLine { id: "dinner".into(), title: "Cena".into(), unit_amount: 80_050, quantity: 1 },
        ],
        success_url: "https://boda.example/checkout/success".into(),
        failure_url: "https://boda.example/checkout/failure".into(),
        pending_url: "https://boda.example/checkout/pending".into(),
    }
}
