//! Item Entity
//!
//! A tracked possession as the backend returns it. Read responses carry the
//! localized display keys; write payloads use the stable English keys and
//! live in `NewItem` and `ItemPatch`. The two key sets are part of the wire
//! contract and must never be mixed.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{DomainError, DomainResult};

/// A single ledger entry as fetched from the backend
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: String,
    pub properties: ItemProperties,
}

/// Fetched item properties (localized read keys)
///
/// `service_days` and `daily_price` are derived by the backend from the
/// authoritative dates. They are display-only here and are never written
/// back; the update path recomputes nothing from them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemProperties {
    #[serde(rename = "物品名称", default)]
    pub name: String,
    #[serde(rename = "购买价格", default)]
    pub purchase_price: Option<f64>,
    #[serde(rename = "附加价值", default)]
    pub additional_value: Option<f64>,
    #[serde(rename = "入役日期", default, deserialize_with = "de_opt_date")]
    pub entry_date: Option<NaiveDate>,
    #[serde(rename = "退役日期", default, deserialize_with = "de_opt_date")]
    pub retirement_date: Option<NaiveDate>,
    #[serde(rename = "服役天数", default, deserialize_with = "de_service_days")]
    pub service_days: Option<i64>,
    #[serde(rename = "日均价格", default, deserialize_with = "de_daily_price")]
    pub daily_price: Option<f64>,
    #[serde(rename = "备注", default)]
    pub remark: Option<String>,
}

impl ItemProperties {
    /// Purchase price plus additional value, absent values counting as 0
    pub fn total_value(&self) -> f64 {
        self.purchase_price.unwrap_or(0.0) + self.additional_value.unwrap_or(0.0)
    }
}

/// Create payload (stable English write keys)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub purchase_price: f64,
    pub additional_value: f64,
    pub entry_date: String,
    pub retirement_date: Option<String>,
    pub remark: String,
}

/// Extract the day count from a `服役天数` value such as `"1331 天"`.
/// Bare integers are accepted too.
pub fn parse_service_days(raw: &str) -> Option<i64> {
    if let Ok(days) = raw.trim().parse::<i64>() {
        return Some(days);
    }
    let re = Regex::new(r"(\d+)\s*天").ok()?;
    re.captures(raw)?.get(1)?.as_str().parse().ok()
}

/// Extract the amount from a `日均价格` value such as `"1.88 元"`.
/// Bare numbers are accepted too.
pub fn parse_daily_price(raw: &str) -> Option<f64> {
    if let Ok(price) = raw.trim().parse::<f64>() {
        return Some(price);
    }
    let re = Regex::new(r"(\d+(\.\d+)?)\s*元").ok()?;
    re.captures(raw)?.get(1)?.as_str().parse().ok()
}

/// Dates arrive as `YYYY-MM-DD`; null and empty string both mean absent.
fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The backend emits `服役天数` as either an integer or a `"X 天"` string.
/// Unparseable values degrade to absent rather than failing the item.
fn de_service_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|value| match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let parsed = parse_service_days(s);
            if parsed.is_none() {
                log::warn!("unparseable service days value: {:?}", s);
            }
            parsed
        }
        _ => None,
    }))
}

/// Same dual shape as `服役天数`: number or `"X 元"` string.
fn de_daily_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let parsed = parse_daily_price(s);
            if parsed.is_none() {
                log::warn!("unparseable daily price value: {:?}", s);
            }
            parsed
        }
        _ => None,
    }))
}

/// Parse a decimal form field; non-finite results count as "not a number"
pub(crate) fn parse_decimal(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Reject values the backend stores as non-negative decimals
pub(crate) fn require_non_negative(field: &str, value: f64) -> DomainResult<f64> {
    if value < 0.0 {
        return Err(DomainError::Validation(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(value)
}
