//! Item Commands
//!
//! One function per user action: list, add, edit, delete. Each mutating
//! action re-fetches the list after success so the rendered state reflects
//! the mutation before the command returns. Failures surface as messages
//! here; no retries anywhere.

use chrono::Local;

use crate::client::ItemStore;
use crate::domain::{fmt_number, DomainError, DomainResult, Item, ItemForm};
use crate::workflow::{EditFlow, EditSession};

/// Per-field edits from the command line. `None` leaves a field untouched;
/// an explicit empty string clears it (where clearing is meaningful).
#[derive(Debug, Clone, Default)]
pub struct FieldEdits {
    pub name: Option<String>,
    pub purchase_price: Option<String>,
    pub additional_value: Option<String>,
    pub entry_date: Option<String>,
    pub retirement_date: Option<String>,
    pub remark: Option<String>,
}

impl FieldEdits {
    fn apply(&self, form: &mut ItemForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(price) = &self.purchase_price {
            form.purchase_price = price.clone();
        }
        if let Some(additional) = &self.additional_value {
            form.additional_value = additional.clone();
        }
        if let Some(entry) = &self.entry_date {
            form.entry_date = entry.clone();
        }
        if let Some(retirement) = &self.retirement_date {
            form.retirement_date = retirement.clone();
        }
        if let Some(remark) = &self.remark {
            form.remark = remark.clone();
        }
    }
}

/// List all items. The private-list state gets its own message instead of
/// the generic error path; `logged_in` only gates the edit/delete hint.
pub async fn list_items(store: &impl ItemStore, logged_in: bool) -> DomainResult<String> {
    match store.list().await {
        Ok(items) => Ok(render_item_list(&items, logged_in)),
        Err(DomainError::ListPrivate) => {
            Ok("This ledger is not public; log in to view it.".to_string())
        }
        Err(e) => Err(e),
    }
}

/// Validate and create a new item, then show the refreshed list
pub async fn add_item(store: &impl ItemStore, form: &ItemForm) -> DomainResult<String> {
    let new_item = form.validate_new()?;
    store.create(&new_item).await?;

    let mut output = format!("Item \"{}\" added.", new_item.name);
    if let Some(valuation) = form.valuation(Local::now().date_naive()) {
        output.push_str(&format!(
            " ({} day(s) in service, {} per day)",
            valuation.service_days, valuation.daily_cost
        ));
    }
    Ok(format!(
        "{}\n\n{}",
        output,
        refreshed_listing(store).await
    ))
}

/// Fetch an item, apply the requested edits and send the minimal patch.
/// A no-change edit short-circuits: no request is issued.
pub async fn edit_item(
    store: &impl ItemStore,
    id: &str,
    edits: &FieldEdits,
) -> DomainResult<String> {
    let flow = EditFlow::default().open(id)?;

    let item = match store.fetch(id).await {
        Ok(item) => item,
        Err(e) => {
            // the form never becomes interactive
            flow.load_failed()?;
            return Err(e);
        }
    };
    let flow = flow.populated(EditSession::new(item.id.clone(), item.properties))?;

    let mut form = match flow.session() {
        Some(session) => ItemForm::from_properties(session.previous()),
        None => return Err(DomainError::Conflict("edit form is not open".to_string())),
    };
    edits.apply(&mut form);

    let (flow, patch) = flow.submit(&form)?;
    if patch.is_empty() {
        return Ok("No changes detected; nothing to update.".to_string());
    }

    match store.update(id, &patch).await {
        Ok(()) => {
            flow.completed()?;
            let mut output = format!("Item {} updated ({} field(s)).", id, patch.fields().len());
            if let Some(valuation) = form.valuation(Local::now().date_naive()) {
                output.push_str(&format!(
                    " Now {} day(s) in service at {} per day.",
                    valuation.service_days, valuation.daily_cost
                ));
            }
            Ok(format!("{}\n\n{}", output, refreshed_listing(store).await))
        }
        Err(e) => {
            // form state is retained for a retry; the error is reported as-is
            flow.submit_failed()?;
            Err(e)
        }
    }
}

/// Delete an item and show the refreshed list
pub async fn delete_item(store: &impl ItemStore, id: &str) -> DomainResult<String> {
    store.delete(id).await?;
    Ok(format!(
        "Item {} deleted.\n\n{}",
        id,
        refreshed_listing(store).await
    ))
}

/// Post-mutation list refresh. A refresh failure is reported inline and
/// never turns a successful mutation into an error.
async fn refreshed_listing(store: &impl ItemStore) -> String {
    match store.list().await {
        Ok(items) => render_item_list(&items, true),
        Err(e) => {
            log::error!("list refresh after mutation failed: {}", e);
            format!("(failed to refresh the item list: {})", e)
        }
    }
}

/// Render the item list, one block per item
fn render_item_list(items: &[Item], logged_in: bool) -> String {
    if items.is_empty() {
        return "No items yet.".to_string();
    }

    let mut out = format!("{} item(s)\n", items.len());
    for item in items {
        let props = &item.properties;
        out.push('\n');
        let name = if props.name.is_empty() {
            "unnamed item"
        } else {
            props.name.as_str()
        };
        out.push_str(&format!("[{}] {}\n", item.id, name));
        if let Some(remark) = props.remark.as_deref().filter(|r| !r.is_empty()) {
            out.push_str(&format!("  {}\n", remark));
        }
        out.push_str(&format!(
            "  purchase price: {}\n",
            props
                .purchase_price
                .map(fmt_number)
                .unwrap_or_else(|| "not set".to_string())
        ));
        if let Some(additional) = props.additional_value {
            out.push_str(&format!("  additional value: {}\n", fmt_number(additional)));
        }
        out.push_str(&format!("  total value: {}\n", fmt_number(props.total_value())));
        out.push_str(&format!(
            "  entry date: {}\n",
            props
                .entry_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "not set".to_string())
        ));
        if let Some(retirement) = props.retirement_date {
            out.push_str(&format!("  retirement date: {}\n", retirement));
        }
        out.push_str(&format!(
            "  service days: {}\n",
            props
                .service_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| "still counting...".to_string())
        ));
        out.push_str(&format!(
            "  daily price: {}\n",
            props
                .daily_price
                .map(fmt_number)
                .unwrap_or_else(|| "just started? check back tomorrow".to_string())
        ));
    }

    if !logged_in {
        out.push_str("\n(log in to add, edit or delete items)\n");
    }
    out
}
