//! Item Form and Differential Patch Builder
//!
//! `ItemForm` carries the raw text a user typed for each editable field.
//! `ItemPatch::diff` compares it against the last-fetched properties and
//! keeps only the changed fields, with per-field null handling, so updates
//! go out as a sparse PATCH body. An empty patch means "do not send
//! anything at all".

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use super::item::{parse_decimal, require_non_negative};
use super::valuation::{compute_valuation, Valuation};
use super::{DomainError, DomainResult, ItemProperties, NewItem};

/// Raw editable field values, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub purchase_price: String,
    pub additional_value: String,
    pub entry_date: String,
    pub retirement_date: String,
    pub remark: String,
}

impl ItemForm {
    /// Prefill a form with an item's fetched values, before any edits
    /// are applied on top
    pub fn from_properties(previous: &ItemProperties) -> Self {
        Self {
            name: previous.name.clone(),
            purchase_price: previous.purchase_price.map(fmt_number).unwrap_or_default(),
            additional_value: previous.additional_value.map(fmt_number).unwrap_or_default(),
            entry_date: fmt_date(previous.entry_date),
            retirement_date: fmt_date(previous.retirement_date),
            remark: previous.remark.clone().unwrap_or_default(),
        }
    }

    /// Validate the form for item creation.
    ///
    /// Name, purchase price and entry date are required; additional value
    /// defaults to 0, retirement date to absent and remark to empty, which
    /// is exactly the create payload the backend expects.
    pub fn validate_new(&self) -> DomainResult<NewItem> {
        if self.name.is_empty() || self.purchase_price.is_empty() || self.entry_date.is_empty() {
            return Err(DomainError::Validation(
                "name, purchase price and entry date are required".to_string(),
            ));
        }
        let purchase_price = parse_decimal(&self.purchase_price).ok_or_else(|| {
            DomainError::Validation(format!(
                "purchase price {:?} is not a number",
                self.purchase_price
            ))
        })?;
        let purchase_price = require_non_negative("purchase price", purchase_price)?;
        let additional_value =
            require_non_negative("additional value", parse_decimal(&self.additional_value).unwrap_or(0.0))?;
        if NaiveDate::parse_from_str(&self.entry_date, "%Y-%m-%d").is_err() {
            return Err(DomainError::Validation(format!(
                "entry date {:?} is not a YYYY-MM-DD date",
                self.entry_date
            )));
        }

        Ok(NewItem {
            name: self.name.clone(),
            purchase_price,
            additional_value,
            entry_date: self.entry_date.clone(),
            retirement_date: if self.retirement_date.is_empty() {
                None
            } else {
                Some(self.retirement_date.clone())
            },
            remark: self.remark.clone(),
        })
    }

    /// Recompute the derived figures for the values currently in the form.
    /// Returns `None` until the entry date parses.
    pub fn valuation(&self, today: NaiveDate) -> Option<Valuation> {
        let entry = NaiveDate::parse_from_str(&self.entry_date, "%Y-%m-%d").ok()?;
        let retirement = NaiveDate::parse_from_str(&self.retirement_date, "%Y-%m-%d").ok();
        Some(compute_valuation(
            entry,
            retirement,
            parse_decimal(&self.purchase_price),
            parse_decimal(&self.additional_value),
            today,
        ))
    }
}

/// Sparse update payload (stable English write keys)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ItemPatch(Map<String, Value>);

impl ItemPatch {
    /// Build the minimal patch between the last-fetched properties and the
    /// current form values.
    ///
    /// Field rules:
    /// - `name`, `entry_date`, `remark`: plain string inequality
    /// - `purchase_price`: numeric inequality; an unparseable field means
    ///   "no edit attempted" and is skipped, never treated as clearing
    /// - `additional_value`: numeric inequality; an unparseable (cleared)
    ///   field emits an explicit null when a value was previously present
    /// - `retirement_date`: string inequality; empty input clears via null
    ///
    /// The derived `service_days` / `daily_cost` fields are never part of
    /// a patch.
    pub fn diff(previous: &ItemProperties, current: &ItemForm) -> Self {
        let mut fields = Map::new();

        if current.name != previous.name {
            fields.insert("name".to_string(), Value::String(current.name.clone()));
        }

        if let Some(price) = parse_decimal(&current.purchase_price) {
            if Some(price) != previous.purchase_price {
                fields.insert("purchase_price".to_string(), number(price));
            }
        }

        match parse_decimal(&current.additional_value) {
            Some(value) => {
                if Some(value) != previous.additional_value {
                    fields.insert("additional_value".to_string(), number(value));
                }
            }
            None => {
                if previous.additional_value.is_some() {
                    fields.insert("additional_value".to_string(), Value::Null);
                }
            }
        }

        if current.entry_date != fmt_date(previous.entry_date) {
            fields.insert(
                "entry_date".to_string(),
                Value::String(current.entry_date.clone()),
            );
        }

        if current.retirement_date != fmt_date(previous.retirement_date) {
            let value = if current.retirement_date.is_empty() {
                Value::Null
            } else {
                Value::String(current.retirement_date.clone())
            };
            fields.insert("retirement_date".to_string(), value);
        }

        if current.remark != previous.remark.clone().unwrap_or_default() {
            fields.insert("remark".to_string(), Value::String(current.remark.clone()));
        }

        ItemPatch(fields)
    }

    /// An empty patch must short-circuit the save: no request is issued
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Format a number the way the form fields show it: no trailing `.0`
pub(crate) fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn previous() -> ItemProperties {
        ItemProperties {
            name: "红米 K40".to_string(),
            purchase_price: Some(2499.0),
            additional_value: Some(5.0),
            entry_date: Some(date(2021, 6, 10)),
            retirement_date: Some(date(2024, 5, 1)),
            remark: Some("daily driver".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unchanged_form_yields_empty_patch() {
        let prev = previous();
        let form = ItemForm::from_properties(&prev);
        let patch = ItemPatch::diff(&prev, &form);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_changed_fields_only() {
        let prev = previous();
        let mut form = ItemForm::from_properties(&prev);
        form.name = "红米 K40 Pro".to_string();
        form.purchase_price = "2599".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        let fields = patch.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["name"], Value::String("红米 K40 Pro".to_string()));
        assert_eq!(fields["purchase_price"].as_f64(), Some(2599.0));
    }

    #[test]
    fn test_unparseable_price_means_no_edit() {
        let prev = previous();
        let mut form = ItemForm::from_properties(&prev);
        form.purchase_price = "".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        assert!(!patch.fields().contains_key("purchase_price"));
    }

    #[test]
    fn test_clearing_additional_value_emits_null() {
        let prev = previous();
        let mut form = ItemForm::from_properties(&prev);
        form.additional_value = "".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        assert_eq!(patch.fields()["additional_value"], Value::Null);
    }

    #[test]
    fn test_absent_additional_value_stays_omitted() {
        let mut prev = previous();
        prev.additional_value = None;
        let mut form = ItemForm::from_properties(&prev);
        form.additional_value = "".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        assert!(!patch.fields().contains_key("additional_value"));
    }

    #[test]
    fn test_clearing_retirement_date_emits_null() {
        let prev = previous();
        let mut form = ItemForm::from_properties(&prev);
        form.retirement_date = "".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        assert_eq!(patch.fields()["retirement_date"], Value::Null);
    }

    #[test]
    fn test_derived_fields_never_patched() {
        let mut prev = previous();
        prev.service_days = Some(1000);
        prev.daily_price = Some(2.5);
        let mut form = ItemForm::from_properties(&prev);
        form.name = "renamed".to_string();
        form.entry_date = "2022-01-01".to_string();
        form.retirement_date = "".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        assert!(!patch.fields().contains_key("service_days"));
        assert!(!patch.fields().contains_key("daily_cost"));
        assert!(!patch.fields().contains_key("daily_price"));
    }

    #[test]
    fn test_patch_round_trips_onto_previous() {
        // applying the patched fields onto the previous values must
        // reproduce the form for every field present in the patch
        let prev = previous();
        let mut form = ItemForm::from_properties(&prev);
        form.name = "new name".to_string();
        form.additional_value = "12.5".to_string();
        form.retirement_date = "2024-06-01".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        let fields = patch.fields();
        assert_eq!(fields["name"].as_str(), Some("new name"));
        assert_eq!(fields["additional_value"].as_f64(), Some(12.5));
        assert_eq!(fields["retirement_date"].as_str(), Some("2024-06-01"));
    }

    #[test]
    fn test_remark_empty_string_is_a_value() {
        let prev = previous();
        let mut form = ItemForm::from_properties(&prev);
        form.remark = "".to_string();

        let patch = ItemPatch::diff(&prev, &form);
        assert_eq!(patch.fields()["remark"], Value::String(String::new()));
    }

    #[test]
    fn test_validate_new_requires_core_fields() {
        let form = ItemForm {
            name: "键盘".to_string(),
            purchase_price: "".to_string(),
            entry_date: "2024-01-01".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.validate_new(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_new_defaults() {
        let form = ItemForm {
            name: "键盘".to_string(),
            purchase_price: "399".to_string(),
            entry_date: "2024-01-01".to_string(),
            ..Default::default()
        };
        let item = form.validate_new().expect("should validate");
        assert_eq!(item.additional_value, 0.0);
        assert_eq!(item.retirement_date, None);
        assert_eq!(item.remark, "");
    }

    #[test]
    fn test_validate_new_rejects_negative_price() {
        let form = ItemForm {
            name: "键盘".to_string(),
            purchase_price: "-1".to_string(),
            entry_date: "2024-01-01".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.validate_new(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_form_valuation_preview() {
        let form = ItemForm {
            name: "键盘".to_string(),
            purchase_price: "100".to_string(),
            entry_date: "2024-01-01".to_string(),
            retirement_date: "2024-01-11".to_string(),
            ..Default::default()
        };
        let valuation = form.valuation(date(2024, 6, 1)).expect("entry date parses");
        assert_eq!(valuation.service_days, 10);
        assert_eq!(valuation.daily_cost, "10.00");
    }
}
