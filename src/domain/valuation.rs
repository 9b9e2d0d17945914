//! Valuation Calculator
//!
//! Pure derivation of service days and daily cost from the date and price
//! inputs. Cheap enough to recompute on every form change; no I/O, no state.

use chrono::NaiveDate;

/// Derived ledger figures for one item
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// Whole days between entry and retirement (or `today` while in service).
    /// A same-day pair yields 0; this is deliberate, not an off-by-one.
    pub service_days: i64,
    pub total_value: f64,
    /// Amortized cost per day, fixed two decimals; `"0.00"` whenever the
    /// duration is not positive
    pub daily_cost: String,
}

/// Compute service days and daily cost for one item.
///
/// `today` is passed in rather than read from the clock so the result is
/// referentially transparent; callers that want wall-clock behavior hand in
/// the current local date. Missing prices count as 0 here; required-ness
/// is enforced by the form validation before creation, not at this stage.
pub fn compute_valuation(
    entry_date: NaiveDate,
    retirement_date: Option<NaiveDate>,
    purchase_price: Option<f64>,
    additional_value: Option<f64>,
    today: NaiveDate,
) -> Valuation {
    let end = retirement_date.unwrap_or(today);
    let service_days = (end - entry_date).num_days();
    let total_value = purchase_price.unwrap_or(0.0) + additional_value.unwrap_or(0.0);

    let daily_cost = if service_days > 0 {
        // round half up to two decimals
        let cents = (total_value / service_days as f64 * 100.0).round();
        format!("{:.2}", cents / 100.0)
    } else {
        "0.00".to_string()
    };

    Valuation {
        service_days,
        total_value,
        daily_cost,
    }
}
