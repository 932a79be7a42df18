use anyhow::Context;
use serde::Deserialize;

use crate::{i18n::Lang, include_res};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Localized {
    pub es: String,
    pub en: String,
}

impl Localized {
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Es => &self.es,
            Lang::En => &self.en,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Gift {
    pub id: String,
    pub name: Localized,
    pub description: Localized,
    /// Minor units of the configured currency.
    pub price: i64,
    pub image: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    gifts: Vec<Gift>,
}

impl Catalog {
    pub fn bundled() -> anyhow::Result<Catalog> {
        Self::from_json(include_res!(str, "/gifts.json")).context("load bundled gift catalog")
    }

    pub fn from_json(json: &str) -> anyhow::Result<Catalog> {
        let gifts: Vec<Gift> = serde_json::from_str(json)?;
        for (i, gift) in gifts.iter().enumerate() {
            if gift.id.trim().is_empty() {
                anyhow::bail!("gift #{i} has an empty id");
            }
            if gift.price <= 0 {
                anyhow::bail!("gift {} must have a positive price", gift.id);
            }
            if gifts[..i].iter().any(|other| other.id == gift.id) {
                anyhow::bail!("gift id {} is used twice", gift.id);
            }
        }
        Ok(Catalog { gifts })
    }

    pub fn get(&self, id: &str) -> Option<&Gift> {
        self.gifts.iter().find(|gift| gift.id == id)
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }
}

/// `$1,234.50 MXN`
pub fn format_money(minor: i64, currency: &str) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let minor = minor.unsigned_abs();
    let whole = (minor / 100).to_string();
    let cents = minor % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents:02} {currency}")
}
