use axum::{debug_handler, extract::State, response::Redirect, Form, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{config::Config, session::{self, Notice, CART}, AppResult, AppState};

use super::catalog::{Catalog, Gift};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub gift_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

pub struct ResolvedLine<'a> {
    pub gift: &'a Gift,
    pub quantity: u32,
}

impl ResolvedLine<'_> {
    pub fn subtotal(&self) -> i64 {
        self.gift.price * i64::from(self.quantity)
    }
}

impl Cart {
    pub fn add(&mut self, gift_id: &str) {
        match self.lines.iter_mut().find(|line| line.gift_id == gift_id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine { gift_id: gift_id.to_owned(), quantity: 1 }),
        }
    }

    /// Drops the whole line. Returns whether anything was removed.
    pub fn remove(&mut self, gift_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.gift_id != gift_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Lines whose gift left the catalog are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<ResolvedLine<'a>> {
        self.lines.iter()
            .filter_map(|line| Some(ResolvedLine {
                gift: catalog.get(&line.gift_id)?,
                quantity: line.quantity,
            }))
            .collect()
    }

    pub fn total(&self, catalog: &Catalog) -> i64 {
        self.resolve(catalog).iter().map(ResolvedLine::subtotal).sum()
    }

    pub fn retain_known(&mut self, catalog: &Catalog) {
        self.lines.retain(|line| catalog.get(&line.gift_id).is_some());
    }

    pub async fn load(session: &Session) -> AppResult<Cart> {
        Ok(session.get::<Cart>(CART).await?.unwrap_or_default())
    }

    pub async fn save(&self, session: &Session) -> AppResult<()> {
        Ok(session.insert(CART, self).await?)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GiftForm {
    gift_id: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Form(GiftForm { gift_id }): Form<GiftForm>,
) -> AppResult<Redirect> {
    if state.catalog.get(&gift_id).is_none() {
        tracing::debug!(gift_id, "add of unknown gift");
        session::set_notice(&session, Notice::error("gift_unknown")).await?;
        return Ok(Redirect::to("/#gifts"));
    }

    let mut cart = Cart::load(&session).await?;
    cart.add(&gift_id);
    cart.save(&session).await?;

    Ok(Redirect::to("/#gifts"))
}

#[debug_handler]
pub(crate) async fn remove_from_cart(
    session: Session,
    Form(GiftForm { gift_id }): Form<GiftForm>,
) -> AppResult<Redirect> {
    let mut cart = Cart::load(&session).await?;
    if cart.remove(&gift_id) {
        cart.save(&session).await?;
    }

    Ok(Redirect::to("/#gifts"))
}

#[debug_handler]
pub(crate) async fn clear_cart(session: Session) -> AppResult<Redirect> {
    session.remove::<Cart>(CART).await?;
    Ok(Redirect::to("/#gifts"))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CartItemJson {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    pub subtotal: i64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CartJson {
    pub items: Vec<CartItemJson>,
    pub total: i64,
    pub currency: String,
}

impl CartJson {
    pub fn new(cart: &Cart, catalog: &Catalog, config: &Config, lang: crate::i18n::Lang) -> CartJson {
        let items = cart.resolve(catalog).iter()
            .map(|line| CartItemJson {
                id: line.gift.id.clone(),
                name: line.gift.name.get(lang).to_owned(),
                price: line.gift.price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            })
            .collect();

        CartJson {
            items,
            total: cart.total(catalog),
            currency: config.currency.clone(),
        }
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn cart_json(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<CartJson>> {
    let lang = session::lang(&session).await?;
    let cart = Cart::load(&session).await?;
    Ok(Json(CartJson::new(&cart, &state.catalog, &state.config, lang)))
}
