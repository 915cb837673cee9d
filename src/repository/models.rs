//! Domain models with resolved references.
//!
//! These are the in-process shapes the services work with; the Sea-ORM
//! entities in the `migration` crate are their persisted counterparts.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{BakeCakeError, Result};
use crate::utils::format_price;

/// Which catalog table a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Level,
    Shape,
    Topping,
    Berries,
    Decor,
}

impl ParamKind {
    /// Customer-facing attribute label used in composition blocks
    pub fn label(&self) -> &'static str {
        match self {
            ParamKind::Level => "Уровни",
            ParamKind::Shape => "Форма",
            ParamKind::Topping => "Топпинг",
            ParamKind::Berries => "Ягоды",
            ParamKind::Decor => "Декор",
        }
    }
}

/// A catalog entry contributing price and availability to a cake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeParam {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub is_available: bool,
}

/// New catalog entry, not yet persisted.
///
/// For [`ParamKind::Level`] the title must be the tier count "1", "2" or "3".
#[derive(Debug, Clone)]
pub struct NewParam {
    pub title: String,
    pub price: Decimal,
    pub is_available: bool,
}

impl NewParam {
    pub fn validate(&self, kind: ParamKind) -> Result<()> {
        if self.price < Decimal::ZERO {
            return Err(BakeCakeError::validation(format!(
                "parameter price must be non-negative, got {}",
                self.price
            )));
        }
        if kind == ParamKind::Level {
            match self.title.parse::<i32>() {
                Ok(1..=3) => {}
                _ => {
                    return Err(BakeCakeError::validation(format!(
                        "level count must be 1, 2 or 3, got \"{}\"",
                        self.title
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A cake with every referenced parameter resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cake {
    pub id: i64,
    pub is_original: bool,
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Inscription baked onto the cake
    pub text: Option<String>,
    pub level: CakeParam,
    pub shape: CakeParam,
    pub topping: CakeParam,
    pub berries: Option<CakeParam>,
    pub decor: Option<CakeParam>,
}

impl Cake {
    /// The exhaustive list of priced components, each present one exactly once.
    pub fn params(&self) -> Vec<&CakeParam> {
        let mut params = vec![&self.level, &self.shape, &self.topping];
        if let Some(berries) = &self.berries {
            params.push(berries);
        }
        if let Some(decor) = &self.decor {
            params.push(decor);
        }
        params
    }

    /// Sum of the present parameters' prices; absent optionals contribute 0.
    pub fn base_price(&self) -> Decimal {
        self.params().iter().map(|param| param.price).sum()
    }

    /// A cake may be offered only while every constituent parameter is
    /// available. Recomputed from catalog state on every call.
    pub fn verify(&self) -> bool {
        self.params().iter().all(|param| param.is_available)
    }

    /// Human-readable composition block, one line per present attribute,
    /// ending with the formatted base price.
    pub fn composition(&self) -> String {
        let mut lines = vec![
            format!("{}: {}", ParamKind::Level.label(), self.level.title),
            format!("{}: {}", ParamKind::Shape.label(), self.shape.title),
            format!("{}: {}", ParamKind::Topping.label(), self.topping.title),
        ];
        if let Some(berries) = &self.berries {
            lines.push(format!("{}: {}", ParamKind::Berries.label(), berries.title));
        }
        if let Some(decor) = &self.decor {
            lines.push(format!("{}: {}", ParamKind::Decor.label(), decor.title));
        }
        if let Some(text) = &self.text {
            lines.push(format!("Надпись: {}", text));
        }
        lines.push(format!("Цена: {}", format_price(self.base_price())));
        lines.join("\n")
    }
}

impl fmt::Display for Cake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "Торт {}", title),
            None => write!(f, "Торт #{}", self.id),
        }
    }
}

/// New cake referencing catalog entries by id.
#[derive(Debug, Clone, Default)]
pub struct NewCake {
    pub is_original: bool,
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub text: Option<String>,
    pub level_id: i64,
    pub shape_id: i64,
    pub topping_id: i64,
    pub berries_id: Option<i64>,
    pub decor_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub id_telegram: String,
    pub name: String,
    pub address: Option<String>,
    /// Personal-data-processing consent flag
    pub consent_to_pd_proc: bool,
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.id_telegram)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub id_telegram: String,
    /// Defaults to "Дорогой Гость" when empty
    pub name: Option<String>,
    pub address: Option<String>,
    pub consent_to_pd_proc: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: i64,
    pub code: String,
    /// Discount fraction in [0, 1]
    pub discount: Decimal,
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = (self.discount * Decimal::ONE_HUNDRED).normalize();
        write!(f, "Код \"{}\" на скидку {}%", self.code, percent)
    }
}

#[derive(Debug, Clone)]
pub struct NewPromoCode {
    pub code: String,
    pub discount: Decimal,
}

impl NewPromoCode {
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(BakeCakeError::validation("promo code must not be empty"));
        }
        if self.discount < Decimal::ZERO || self.discount > Decimal::ONE {
            return Err(BakeCakeError::validation(format!(
                "promo discount must be within [0, 1], got {}",
                self.discount
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: i64,
    pub text: String,
}

/// An order with the cake, client and optional attachments resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub cake: Cake,
    pub client: Client,
    /// Set at creation, immutable afterwards
    pub order_dt: DateTime<Utc>,
    pub delivery_dt: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub promo_code: Option<PromoCode>,
    pub comment: Option<String>,
    pub complaint: Option<Complaint>,
}

impl Order {
    /// Whether delivery is requested within 24 hours of placement.
    ///
    /// The delivery time is an explicit precondition here; an order without
    /// one cannot be classified.
    pub fn is_urgent(&self) -> Result<bool> {
        let delivery_dt = self.delivery_dt.ok_or_else(|| {
            BakeCakeError::missing_order_data(format!("{} has no delivery time", self))
        })?;
        Ok(delivery_dt - self.order_dt < Duration::hours(24))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Заказ #{}", self.id)
    }
}

/// New order referencing already-persisted rows; `order_dt` is assigned by
/// the backend at insert.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub cake_id: i64,
    pub client_id: i64,
    pub delivery_dt: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub promo_code_id: Option<i64>,
    pub comment: Option<String>,
}

/// An issued short link; written once at allocation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedLink {
    pub id: i64,
    /// Numeric identifier at the shortening service
    pub external_id: i64,
    pub short_url: String,
    pub place_of_use: String,
    pub created_at: DateTime<Utc>,
}
