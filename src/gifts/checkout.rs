use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Redirect, Response}};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    config::Config,
    i18n::Lang,
    payments::{Checkout, CheckoutLine, PaymentProvider},
    res,
    session::{self, Notice, CART},
    AppResult, AppState,
};

use super::{cart::Cart, catalog::Catalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Success,
    Failure,
    Pending,
}

impl Outcome {
    pub(crate) fn parse(name: &str) -> Option<Outcome> {
        match name {
            "success" => Some(Outcome::Success),
            "failure" => Some(Outcome::Failure),
            "pending" => Some(Outcome::Pending),
            _ => None,
        }
    }
}

/// `None` for an empty cart.
pub(crate) fn build_checkout(cart: &Cart, catalog: &Catalog, config: &Config, lang: Lang) -> Option<Checkout> {
    let lines: Vec<CheckoutLine> = cart.resolve(catalog).iter()
        .map(|line| CheckoutLine {
            id: line.gift.id.clone(),
            title: line.gift.name.get(lang).to_owned(),
            unit_amount: line.gift.price,
            quantity: line.quantity,
        })
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(Checkout {
        reference: Uuid::now_v7(),
        currency: config.currency.clone(),
        lines,
        success_url: config.public_link("/checkout/success"),
        failure_url: config.public_link("/checkout/failure"),
        pending_url: config.public_link("/checkout/pending"),
    })
}

#[debug_handler(state = AppState)]
pub(crate) async fn checkout(
    Path(name): Path<String>,
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Response> {
    let Some(provider) = PaymentProvider::parse(&name) else {
        return Ok(res::sorry().await);
    };

    let lang = session::lang(&session).await?;
    let mut cart = Cart::load(&session).await?;
    cart.retain_known(&state.catalog);
    cart.save(&session).await?;

    let Some(checkout) = build_checkout(&cart, &state.catalog, &state.config, lang) else {
        session::set_notice(&session, Notice::error("checkout_empty")).await?;
        return Ok(Redirect::to("/#gifts").into_response());
    };

    if !state.payments.is_enabled(provider) {
        session::set_notice(&session, Notice::error("checkout_unavailable")).await?;
        return Ok(Redirect::to("/#gifts").into_response());
    }

    match state.payments.start_checkout(provider, &checkout).await {
        Ok(url) => Ok(Redirect::to(&url).into_response()),
        Err(err) => {
            tracing::error!(%provider, error = %err, "could not start checkout");
            session::set_notice(&session, Notice::error("checkout_failed")).await?;
            Ok(Redirect::to("/#gifts").into_response())
        }
    }
}

#[debug_handler]
pub(crate) async fn checkout_return(
    Path(name): Path<String>,
    session: Session,
) -> AppResult<Response> {
    let Some(outcome) = Outcome::parse(&name) else {
        return Ok(res::sorry().await);
    };

    tracing::info!(?outcome, "returned from checkout");
    let notice = match outcome {
        Outcome::Success => {
            session.remove::<Cart>(CART).await?;
            Notice::success("checkout_success")
        }
        Outcome::Failure => Notice::error("checkout_failure"),
        Outcome::Pending => Notice::success("checkout_pending"),
    };
    session::set_notice(&session, notice).await?;

    Ok(Redirect::to("/#gifts").into_response())
}
