mod cart;
mod catalog;
mod checkout;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use cart::{Cart, CartJson, ResolvedLine};
pub use catalog::{format_money, Catalog, Gift, Localized};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart/add", post(cart::add_to_cart))
        .route("/cart/remove", post(cart::remove_from_cart))
        .route("/cart/clear", post(cart::clear_cart))
        .route("/api/cart", get(cart::cart_json))
        .route("/checkout/{name}", get(checkout::checkout_return).post(checkout::checkout))
}
