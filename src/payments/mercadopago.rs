use serde::Serialize;
use serde_json::Value;

use crate::{AppResult, GetField};

use super::{read_reply, Checkout, PaymentProvider};

const API_BASE: &str = "https://api.mercadopago.com";

/// Mercado Pago Checkout Pro preferences.
#[derive(Clone)]
pub struct MercadoPagoClient {
    access_token: String,
}

#[derive(Debug, Serialize)]
pub struct Preference<'a> {
    items: Vec<PreferenceItem<'a>>,
    back_urls: BackUrls<'a>,
    auto_return: &'static str,
    external_reference: String,
}

#[derive(Debug, Serialize)]
struct PreferenceItem<'a> {
    id: &'a str,
    title: &'a str,
    quantity: u32,
    /// Major units, the API does not take cents.
    unit_price: f64,
    currency_id: &'a str,
}

#[derive(Debug, Serialize)]
struct BackUrls<'a> {
    success: &'a str,
    failure: &'a str,
    pending: &'a str,
}

impl MercadoPagoClient {
    pub fn new(access_token: String) -> MercadoPagoClient {
        MercadoPagoClient { access_token }
    }

    pub fn preference(checkout: &Checkout) -> Preference<'_> {
        Preference {
            items: checkout.lines.iter()
                .map(|line| PreferenceItem {
                    id: &line.id,
                    title: &line.title,
                    quantity: line.quantity,
                    unit_price: line.unit_amount as f64 / 100.0,
                    currency_id: &checkout.currency,
                })
                .collect(),
            back_urls: BackUrls {
                success: &checkout.success_url,
                failure: &checkout.failure_url,
                pending: &checkout.pending_url,
            },
            auto_return: "approved",
            external_reference: checkout.reference.to_string(),
        }
    }

    pub async fn create_preference(&self, http_client: &reqwest::Client, checkout: &Checkout) -> AppResult<String> {
        let response = http_client.post(format!("{API_BASE}/checkout/preferences"))
            .bearer_auth(&self.access_token)
            .header("X-Idempotency-Key", checkout.reference.to_string())
            .json(&Self::preference(checkout))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body = read_reply(PaymentProvider::Mercadopago, status, &text, error_message)?;

        redirect_url(&body)
    }
}

fn error_message(body: &Value) -> AppResult<String> {
    body.get_str_field("message")
}

fn redirect_url(body: &Value) -> AppResult<String> {
    body.get_str_field("init_point")
}
