use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{i18n::Lang, AppResult};

pub const LANG: &str = "lang";
pub const CART: &str = "cart";
pub const NOTICE: &str = "notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub key: String,
}

impl Notice {
    pub fn success(key: &str) -> Notice {
        Notice { kind: NoticeKind::Success, key: key.to_owned() }
    }

    pub fn error(key: &str) -> Notice {
        Notice { kind: NoticeKind::Error, key: key.to_owned() }
    }
}

pub async fn lang(session: &Session) -> AppResult<Lang> {
    Ok(session.get::<Lang>(LANG).await?.unwrap_or_default())
}

pub async fn set_lang(session: &Session, lang: Lang) -> AppResult<()> {
    Ok(session.insert(LANG, lang).await?)
}

pub async fn set_notice(session: &Session, notice: Notice) -> AppResult<()> {
    Ok(session.insert(NOTICE, notice).await?)
}

pub async fn take_notice(session: &Session) -> AppResult<Option<Notice>> {
    Ok(session.remove::<Notice>(NOTICE).await?)
}

#[cfg(test)]
pub(crate) fn test_session() -> Session {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    Session::new(None, Arc::new(MemoryStore::default()), None)
}
