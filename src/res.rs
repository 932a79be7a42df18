use axum::{debug_handler, http::{header, StatusCode}, response::{Html, IntoResponse, Response}};

use crate::i18n::Lang;

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Ceremony,
    Reception,
    DressCode,
    History,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Ceremony, Section::Reception, Section::DressCode, Section::History];

    pub fn placeholder(&self) -> &'static str {
        use Section::*;
        match self {
            Ceremony => "{ceremony}",
            Reception => "{reception}",
            DressCode => "{dress_code}",
            History => "{history}",
        }
    }

    pub fn markdown(&self, lang: Lang) -> &'static str {
        use Section::*;
        match (lang, self) {
            (Lang::Es, Ceremony) => include_res!(str, "/content/es/ceremony.md"),
            (Lang::Es, Reception) => include_res!(str, "/content/es/reception.md"),
            (Lang::Es, DressCode) => include_res!(str, "/content/es/dress_code.md"),
            (Lang::Es, History) => include_res!(str, "/content/es/history.md"),
            (Lang::En, Ceremony) => include_res!(str, "/content/en/ceremony.md"),
            (Lang::En, Reception) => include_res!(str, "/content/en/reception.md"),
            (Lang::En, DressCode) => include_res!(str, "/content/en/dress_code.md"),
            (Lang::En, History) => include_res!(str, "/content/en/history.md"),
        }
    }
}

#[debug_handler]
pub async fn style() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_res!(str, "/static/style.css"),
    )
}

#[debug_handler]
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        include_res!(str, "/static/app.js"),
    )
}

pub async fn sorry() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(include_res!(str, "/pages/sorry.html")),
    ).into_response()
}
