use crate::error::{ApiError, ValidationError};
use crate::types::{Feedback, NewFeedback};

pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this feedback?";

/// Which feedback request a status line reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Fetch,
    Submit,
    Update,
    Delete,
}

impl FeedbackAction {
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            FeedbackAction::Fetch => None,
            FeedbackAction::Submit => Some("Feedback submitted successfully!"),
            FeedbackAction::Update => Some("Feedback updated successfully!"),
            FeedbackAction::Delete => Some("Feedback deleted successfully!"),
        }
    }

    /// A refused status and a transport failure read differently.
    pub fn failure_message(self, error: &ApiError) -> String {
        if let ApiError::Validation(validation) = error {
            return validation.to_string();
        }
        if let ApiError::Network(reason) = error {
            let verb = match self {
                FeedbackAction::Fetch => "fetching",
                FeedbackAction::Submit => "submitting",
                FeedbackAction::Update => "updating",
                FeedbackAction::Delete => "deleting",
            };
            return format!("Error {verb} feedback: {reason}");
        }
        match self {
            FeedbackAction::Fetch => "Failed to fetch feedback".to_string(),
            FeedbackAction::Submit => format!(
                "Failed to submit feedback: {}",
                error.backend_message().unwrap_or("Unknown error")
            ),
            FeedbackAction::Update => "Failed to update feedback".to_string(),
            FeedbackAction::Delete => "Failed to delete feedback".to_string(),
        }
    }
}

pub fn build_feedback(prompt: &str, response: &str, authenticated: bool) -> Result<NewFeedback, ValidationError> {
    if !authenticated {
        return Err(ValidationError::NotAuthenticated);
    }
    if prompt.trim().is_empty() || response.trim().is_empty() {
        return Err(ValidationError::IncompleteFeedback);
    }
    Ok(NewFeedback {
        prompt: prompt.to_string(),
        response: response.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackEvent {
    Loaded(Vec<Feedback>),
    Toggled { id: i64, is_active: bool },
    Deleted(i64),
}

/// Mirrors the last known server state. The page refetches after every
/// mutation, so toggles and deletes only bridge the gap until that lands.
pub fn reduce(state: Vec<Feedback>, event: FeedbackEvent) -> Vec<Feedback> {
    match event {
        FeedbackEvent::Loaded(list) => list,
        FeedbackEvent::Toggled { id, is_active } => state
            .into_iter()
            .map(|item| {
                if item.id == id {
                    Feedback { is_active, ..item }
                } else {
                    item
                }
            })
            .collect(),
        FeedbackEvent::Deleted(id) => state.into_iter().filter(|item| item.id != id).collect(),
    }
}

pub fn toggle_label(is_active: bool) -> &'static str {
    if is_active {
        "Deactivate"
    } else {
        "Activate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, is_active: bool) -> Feedback {
        Feedback {
            id,
            prompt: format!("prompt {id}"),
            response: format!("response {id}"),
            is_active,
            created_at: "2024-05-01T10:00:00".to_string(),
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(build_feedback("p", "r", false), Err(ValidationError::NotAuthenticated));
        assert_eq!(build_feedback(" ", "r", true), Err(ValidationError::IncompleteFeedback));
        assert_eq!(build_feedback("p", "", true), Err(ValidationError::IncompleteFeedback));
        assert!(build_feedback("p", "r", true).is_ok());
    }

    #[test]
    fn test_toggle_and_delete() {
        let list = vec![item(1, true), item(2, false)];
        let list = reduce(list, FeedbackEvent::Toggled { id: 2, is_active: true });
        assert!(list.iter().all(|f| f.is_active));

        let list = reduce(list, FeedbackEvent::Deleted(1));
        assert_eq!(list, vec![item(2, true)]);
    }

    #[test]
    fn test_failure_messages() {
        let network = ApiError::Network("Failed to fetch".to_string());
        assert_eq!(
            FeedbackAction::Fetch.failure_message(&network),
            "Error fetching feedback: Failed to fetch"
        );

        let refused = ApiError::Backend { status: 400, detail: None };
        assert_eq!(
            FeedbackAction::Submit.failure_message(&refused),
            "Failed to submit feedback: Unknown error"
        );
        assert_eq!(FeedbackAction::Update.failure_message(&refused), "Failed to update feedback");
        assert_eq!(FeedbackAction::Delete.success_message(), Some("Feedback deleted successfully!"));
        assert_eq!(toggle_label(true), "Deactivate");
    }

    #[test]
    fn test_delete_asks_first() {
        assert_eq!(DELETE_CONFIRM, "Are you sure you want to delete this feedback?");
    }
}
