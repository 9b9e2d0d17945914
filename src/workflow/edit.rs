//! Edit Workflow
//!
//! One edit interaction as an explicit state machine. The previous-values
//! snapshot travels inside the flow, keyed by item id, instead of living
//! in a shared variable, and a successful submit consumes it: a second
//! save needs a fresh fetch, which coalesces accidental double
//! submissions.
//!
//! Legal transitions:
//!
//! ```text
//! Closed -> Loading -> Populated -> Submitting -> Closed      (success)
//!              |            ^            |
//!              v            +------------+                    (submit failed, retry)
//!            Closed                                           (load failed)
//! ```

use crate::domain::{DomainError, DomainResult, ItemForm, ItemPatch, ItemProperties};

/// Snapshot of an item's pre-edit values, captured when the detail fetch
/// populates the form and consumed when the patch is built
#[derive(Debug, Clone)]
pub struct EditSession {
    item_id: String,
    previous: ItemProperties,
}

impl EditSession {
    pub fn new(item_id: String, previous: ItemProperties) -> Self {
        Self { item_id, previous }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn previous(&self) -> &ItemProperties {
        &self.previous
    }
}

/// Explicit state of one edit interaction
#[derive(Debug, Default)]
pub enum EditFlow {
    #[default]
    Closed,
    Loading {
        item_id: String,
    },
    Populated {
        session: EditSession,
    },
    Submitting {
        session: EditSession,
    },
}

impl EditFlow {
    /// Closed -> Loading: the user asked to edit an item
    pub fn open(self, item_id: &str) -> DomainResult<Self> {
        match self {
            EditFlow::Closed => Ok(EditFlow::Loading {
                item_id: item_id.to_string(),
            }),
            other => Err(other.illegal("open")),
        }
    }

    /// Loading -> Populated: the detail fetch succeeded and the snapshot
    /// is captured. The session must belong to the item being loaded.
    pub fn populated(self, session: EditSession) -> DomainResult<Self> {
        match self {
            EditFlow::Loading { item_id } if item_id == session.item_id() => {
                Ok(EditFlow::Populated { session })
            }
            EditFlow::Loading { item_id } => Err(DomainError::Conflict(format!(
                "edit flow for item {} populated with item {}",
                item_id,
                session.item_id()
            ))),
            other => Err(other.illegal("populate")),
        }
    }

    /// Loading -> Closed: the detail fetch failed; the form never opens
    pub fn load_failed(self) -> DomainResult<Self> {
        match self {
            EditFlow::Loading { .. } => Ok(EditFlow::Closed),
            other => Err(other.illegal("fail loading")),
        }
    }

    /// Populated -> Submitting, with the patch to send. A no-change form
    /// keeps the flow in Populated: the caller must not issue a request.
    pub fn submit(self, form: &ItemForm) -> DomainResult<(Self, ItemPatch)> {
        match self {
            EditFlow::Populated { session } => {
                let patch = ItemPatch::diff(session.previous(), form);
                if patch.is_empty() {
                    Ok((EditFlow::Populated { session }, patch))
                } else {
                    Ok((EditFlow::Submitting { session }, patch))
                }
            }
            other => Err(other.illegal("submit")),
        }
    }

    /// Submitting -> Closed: the update went through; the session is spent
    pub fn completed(self) -> DomainResult<Self> {
        match self {
            EditFlow::Submitting { .. } => Ok(EditFlow::Closed),
            other => Err(other.illegal("complete")),
        }
    }

    /// Submitting -> Populated: the update failed; the form is retained
    /// with the original snapshot so the user can retry
    pub fn submit_failed(self) -> DomainResult<Self> {
        match self {
            EditFlow::Submitting { session } => Ok(EditFlow::Populated { session }),
            other => Err(other.illegal("fail submitting")),
        }
    }

    /// Access the captured snapshot while the form is open
    pub fn session(&self) -> Option<&EditSession> {
        match self {
            EditFlow::Populated { session } | EditFlow::Submitting { session } => Some(session),
            _ => None,
        }
    }

    fn state_name(&self) -> &'static str {
        match self {
            EditFlow::Closed => "closed",
            EditFlow::Loading { .. } => "loading",
            EditFlow::Populated { .. } => "populated",
            EditFlow::Submitting { .. } => "submitting",
        }
    }

    fn illegal(self, action: &str) -> DomainError {
        DomainError::Conflict(format!(
            "cannot {} an edit flow that is {}",
            action,
            self.state_name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(name: &str) -> ItemProperties {
        ItemProperties {
            name: name.to_string(),
            purchase_price: Some(100.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let flow = EditFlow::default().open("item-1").expect("open");
        let flow = flow
            .populated(EditSession::new("item-1".to_string(), props("lamp")))
            .expect("populate");

        let mut form = ItemForm::from_properties(flow.session().expect("open form").previous());
        form.name = "desk lamp".to_string();

        let (flow, patch) = flow.submit(&form).expect("submit");
        assert!(!patch.is_empty());
        let flow = flow.completed().expect("complete");
        assert!(matches!(flow, EditFlow::Closed));
    }

    #[test]
    fn test_no_change_submit_stays_populated() {
        let flow = EditFlow::default().open("item-1").expect("open");
        let flow = flow
            .populated(EditSession::new("item-1".to_string(), props("lamp")))
            .expect("populate");

        let form = ItemForm::from_properties(flow.session().expect("open form").previous());
        let (flow, patch) = flow.submit(&form).expect("submit");
        assert!(patch.is_empty());
        assert!(matches!(flow, EditFlow::Populated { .. }));
    }

    #[test]
    fn test_load_failure_closes_the_flow() {
        let flow = EditFlow::default().open("item-1").expect("open");
        let flow = flow.load_failed().expect("fail loading");
        assert!(matches!(flow, EditFlow::Closed));
    }

    #[test]
    fn test_submit_failure_keeps_the_form_for_retry() {
        let flow = EditFlow::default().open("item-1").expect("open");
        let flow = flow
            .populated(EditSession::new("item-1".to_string(), props("lamp")))
            .expect("populate");

        let mut form = ItemForm::from_properties(flow.session().expect("open form").previous());
        form.remark = "retry me".to_string();

        let (flow, _patch) = flow.submit(&form).expect("submit");
        let flow = flow.submit_failed().expect("fail submitting");
        assert!(flow.session().is_some());

        // the retained snapshot still supports a second attempt
        let (flow, patch) = flow.submit(&form).expect("second submit");
        assert!(!patch.is_empty());
        assert!(matches!(flow, EditFlow::Submitting { .. }));
    }

    #[test]
    fn test_completed_flow_rejects_another_submit() {
        let flow = EditFlow::default().open("item-1").expect("open");
        let flow = flow
            .populated(EditSession::new("item-1".to_string(), props("lamp")))
            .expect("populate");

        let mut form = ItemForm::from_properties(flow.session().expect("open form").previous());
        form.name = "renamed".to_string();

        let (flow, _patch) = flow.submit(&form).expect("submit");
        let flow = flow.completed().expect("complete");
        assert!(matches!(
            flow.submit(&form),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_populate_checks_item_identity() {
        let flow = EditFlow::default().open("item-1").expect("open");
        let result = flow.populated(EditSession::new("item-2".to_string(), props("lamp")));
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn test_closed_flow_rejects_everything_but_open() {
        assert!(matches!(
            EditFlow::Closed.load_failed(),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            EditFlow::Closed.completed(),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            EditFlow::Closed.submit(&ItemForm::default()),
            Err(DomainError::Conflict(_))
        ));
    }
}
