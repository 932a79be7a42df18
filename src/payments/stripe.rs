use serde_json::Value;

use crate::{AppResult, GetField};

use super::{read_reply, Checkout, PaymentProvider};

const API_BASE: &str = "https://api.stripe.com";

/// Stripe Checkout Sessions, card payments on a hosted page.
#[derive(Clone)]
pub struct StripeClient {
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> StripeClient {
        StripeClient { secret_key }
    }

    /// Form body for `POST /v1/checkout/sessions`.
    pub fn session_params(checkout: &Checkout) -> Vec<(String, String)> {
        let currency = checkout.currency.to_lowercase();
        let reference = checkout.reference.to_string();

        let mut params = vec![
            ("mode".to_owned(), "payment".to_owned()),
            ("success_url".to_owned(), checkout.success_url.clone()),
            ("cancel_url".to_owned(), checkout.failure_url.clone()),
            ("client_reference_id".to_owned(), reference.clone()),
            ("metadata[reference]".to_owned(), reference),
        ];
        for (i, line) in checkout.lines.iter().enumerate() {
            let key = |field: &str| format!("line_items[{i}]{field}");
            params.push((key("[price_data][currency]"), currency.clone()));
            params.push((key("[price_data][product_data][name]"), line.title.clone()));
            params.push((key("[price_data][product_data][metadata][gift_id]"), line.id.clone()));
            params.push((key("[price_data][unit_amount]"), line.unit_amount.to_string()));
            params.push((key("[quantity]"), line.quantity.to_string()));
        }
        params
    }

    pub async fn create_session(&self, http_client: &reqwest::Client, checkout: &Checkout) -> AppResult<String> {
        let response = http_client.post(format!("{API_BASE}/v1/checkout/sessions"))
            .bearer_auth(&self.secret_key)
            .form(&Self::session_params(checkout))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body = read_reply(PaymentProvider::Stripe, status, &text, error_message)?;

        redirect_url(&body)
    }
}

fn error_message(body: &Value) -> AppResult<String> {
    body.get_obj_field("error")?.get_str_field("message")
}

fn redirect_url(body: &Value) -> AppResult<String> {
    body.get_str_field("url")
}
