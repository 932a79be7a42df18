use axum::{debug_handler, extract::{Path, Query, State}, response::{Html, IntoResponse, Redirect, Response}};
use serde::Deserialize;
use time::macros::format_description;
use tower_sessions::Session;

use crate::{
    config::Config,
    countdown::Countdown,
    db::{self, WallMessage, WALL_LIMIT},
    escape_html,
    gifts::{format_money, Cart, Catalog},
    i18n::Lang,
    include_res, markdown_to_html,
    payments::{PaymentProvider, Payments},
    res::{self, Section},
    rsvp::render_wall,
    session::{self, Notice, NoticeKind},
    AppResult, AppState,
};

#[derive(Deserialize)]
pub struct IndexQuery {
    lang: Option<String>,
}

/// Everything the single page shows for one visitor.
pub struct Page<'a> {
    pub lang: Lang,
    pub config: &'a Config,
    pub countdown: Countdown,
    pub catalog: &'a Catalog,
    pub cart: &'a Cart,
    pub payments: &'a Payments,
    pub messages: &'a [WallMessage],
    pub notice: Option<Notice>,
}

#[debug_handler(state = AppState)]
pub async fn index(
    State(state): State<AppState>,
    Query(IndexQuery { lang }): Query<IndexQuery>,
    session: Session,
) -> AppResult<Response> {
    if let Some(lang) = lang.as_deref().and_then(Lang::parse) {
        session::set_lang(&session, lang).await?;
    }
    let lang = session::lang(&session).await?;

    let messages = match db::recent_messages(&state.db_pool, WALL_LIMIT).await {
        Ok(messages) => messages,
        Err(err) => {
            tracing::error!(error = %err, "could not load message wall");
            Vec::new()
        }
    };

    let cart = Cart::load(&session).await?;
    let notice = session::take_notice(&session).await?;

    let page = Page {
        lang,
        config: &state.config,
        countdown: Countdown::until(state.config.wedding_date),
        catalog: &state.catalog,
        cart: &cart,
        payments: &state.payments,
        messages: &messages,
        notice,
    };

    Ok(Html(page.render()).into_response())
}

#[debug_handler]
pub async fn switch_lang(
    Path(code): Path<String>,
    session: Session,
) -> AppResult<Response> {
    let Some(lang) = Lang::parse(&code) else {
        return Ok(res::sorry().await);
    };
    session::set_lang(&session, lang).await?;
    Ok(Redirect::to("/").into_response())
}

impl Page<'_> {
    pub fn render(&self) -> String {
        let lang = self.lang;
        let mut body = lang.translate(include_res!(str, "/pages/index.html"))
            .replace("{lang}", lang.code())
            .replace("{other_lang}", lang.other().code())
            .replace("{wedding_date}", &self.wedding_date())
            .replace("{countdown_days}", &self.countdown.days.to_string())
            .replace("{countdown_hours}", &format!("{:02}", self.countdown.hours))
            .replace("{countdown_minutes}", &format!("{:02}", self.countdown.minutes))
            .replace("{countdown_seconds}", &format!("{:02}", self.countdown.seconds))
            .replace("{countdown_state}", if self.countdown.finished { "finished" } else { "running" })
            .replace("{map}", &self.map())
            .replace("{gift_items}", &self.gift_items())
            .replace("{cart}", &self.cart())
            .replace("{notice}", &self.notice());

        for section in Section::ALL {
            body = body.replace(section.placeholder(), &markdown_to_html(section.markdown(lang)));
        }

        let messages = if self.messages.is_empty() {
            format!("<li class=\"empty\">{}</li>", lang.t("messages_empty"))
        } else {
            render_wall(self.messages)
        };
        body.replace("{messages}", &messages)
    }

    fn wedding_date(&self) -> String {
        self.config.wedding_date
            .format(format_description!("[day].[month].[year]"))
            .unwrap_or_default()
    }

    fn map(&self) -> String {
        match self.config.maps_embed_url() {
            Some(url) => self.lang.translate(include_res!(str, "/pages/map.html"))
                .replace("{map_url}", &escape_html(&url)),
            None => String::new(),
        }
    }

    fn notice(&self) -> String {
        let Some(notice) = &self.notice else {
            return String::new();
        };
        let class = match notice.kind {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        };
        format!("<div class=\"notice {class}\" role=\"status\">{}</div>", self.lang.t(&notice.key))
    }

    fn gift_items(&self) -> String {
        let mut items = String::new();
        for gift in self.catalog.gifts() {
            items += &self.lang.translate(include_res!(str, "/pages/gift_item.html"))
                .replace("{id}", &escape_html(&gift.id))
                .replace("{image}", &escape_html(&gift.image))
                .replace("{price}", &format_money(gift.price, &self.config.currency))
                .replace("{description}", &escape_html(gift.description.get(self.lang)))
                .replace("{name}", &escape_html(gift.name.get(self.lang)));
        }
        items
    }

    fn cart(&self) -> String {
        let lines = self.cart.resolve(self.catalog);
        if lines.is_empty() {
            return format!("<p class=\"cart-empty\">{}</p>", self.lang.t("cart_empty"));
        }

        let mut rows = String::new();
        for line in &lines {
            rows += &self.lang.translate(include_res!(str, "/pages/cart_line.html"))
                .replace("{id}", &escape_html(&line.gift.id))
                .replace("{quantity}", &line.quantity.to_string())
                .replace("{subtotal}", &format_money(line.subtotal(), &self.config.currency))
                .replace("{name}", &escape_html(line.gift.name.get(self.lang)));
        }

        let mut buttons = String::new();
        for (provider, path, label) in [
            (PaymentProvider::Stripe, "stripe", "pay_card"),
            (PaymentProvider::Mercadopago, "mercadopago", "pay_mercadopago"),
        ] {
            if self.payments.is_enabled(provider) {
                buttons += &format!(
                    "<form method=\"post\" action=\"/checkout/{path}\"><button type=\"submit\" class=\"pay {path}\">{}</button></form>",
                    self.lang.t(label)
                );
            }
        }

        self.lang.translate(include_res!(str, "/pages/cart.html"))
            .replace("{rows}", &rows)
            .replace("{total}", &format_money(self.cart.total(self.catalog), &self.config.currency))
            .replace("{pay_buttons}", &buttons)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    struct Fixture {
        config: Config,
        catalog: Catalog,
        payments: Payments,
    }

    fn fixture(pairs: &[(&str, &str)]) -> Fixture {
        let pairs: Vec<(String, String)> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let config = Config::from_lookup(|key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())).unwrap();
        let payments = Payments::from_config(&config).unwrap();
        Fixture { config, catalog: Catalog::bundled().unwrap(), payments }
    }

    fn render(fixture: &Fixture, lang: Lang, cart: &Cart, messages: &[WallMessage], notice: Option<Notice>) -> String {
        Page {
            lang,
            config: &fixture.config,
            countdown: Countdown::between(datetime!(2027-03-18 15:58:30 -6), fixture.config.wedding_date),
            catalog: &fixture.catalog,
            cart,
            payments: &fixture.payments,
            messages,
            notice,
        }.render()
    }

    #[test]
    fn renders_every_placeholder() {
        let fixture = fixture(&[("MAPS_API_KEY", "k"), ("STRIPE_SECRET_KEY", "sk_test")]);
        let mut cart = Cart::default();
        cart.add(&fixture.catalog.gifts()[0].id);
        let html = render(&fixture, Lang::Es, &cart, &[], Some(Notice::success("rsvp_ok")));

        assert!(!html.contains("{t."), "untranslated placeholder left");
        for placeholder in ["{lang}", "{map}", "{cart}", "{gift_items}", "{messages}", "{notice}", "{countdown_days}", "{ceremony}", "{rows}", "{pay_buttons}"] {
            assert!(!html.contains(placeholder), "{placeholder} left in page");
        }
        assert!(html.contains("<html lang=\"es\""));
        assert!(html.contains("20.03.2027"));
        assert!(html.contains("google.com/maps/embed"));
        assert!(html.contains("/checkout/stripe"));
        assert!(!html.contains("/checkout/mercadopago"));
        assert!(html.contains("notice success"));
    }

    #[test]
    fn countdown_is_rendered_server_side() {
        let fixture = fixture(&[]);
        let html = render(&fixture, Lang::En, &Cart::default(), &[], None);
        assert!(html.contains(r#"data-unit="days">2<"#));
        assert!(html.contains(r#"data-unit="seconds">30<"#));
    }

    #[test]
    fn optional_parts_are_hidden() {
        let fixture = fixture(&[]);
        let html = render(&fixture, Lang::En, &Cart::default(), &[], None);
        assert!(!html.contains("google.com/maps"));
        assert!(!html.contains("class=\"notice"));
        assert!(html.contains(Lang::En.t("cart_empty")));
        assert!(html.contains(Lang::En.t("messages_empty")));
    }

    #[test]
    fn english_page_is_english() {
        let fixture = fixture(&[]);
        let html = render(&fixture, Lang::En, &Cart::default(), &[], None);
        assert!(html.contains("<html lang=\"en\""));
        assert!(html.contains(Lang::En.t("nav_rsvp")));
        assert!(html.contains(fixture.catalog.gifts()[0].name.get(Lang::En)));
    }

    #[test]
    fn messages_appear_on_the_wall() {
        let fixture = fixture(&[]);
        let messages = [WallMessage {
            name: "Tío Beto".into(),
            message: "¡Que vivan los novios!".into(),
            created_at: datetime!(2027-01-02 12:00:00 UTC),
        }];
        let html = render(&fixture, Lang::Es, &Cart::default(), &messages, None);
        assert!(html.contains("Tío Beto"));
        assert!(html.contains("¡Que vivan los novios!"));
        assert!(!html.contains(Lang::Es.t("messages_empty")));
    }
}
