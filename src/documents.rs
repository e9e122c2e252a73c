use serde_json::{Map, Value};

use crate::controller::StatusMessage;
use crate::error::{ApiError, ValidationError};
use crate::types::{DocumentQuery, DocumentResult, DocumentUpload, SearchResponse};

pub const TOP_K_CHOICES: [u32; 4] = [3, 5, 10, 20];
pub const DEFAULT_TOP_K: u32 = 5;

pub const UPLOAD_SUCCESS: &str = "Document uploaded successfully!";
pub const DELETE_SUCCESS: &str = "Document deleted successfully";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this document?";

/// Empty metadata becomes `{}`; anything else must be JSON.
pub fn parse_metadata(raw: &str) -> Result<Value, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw).map_err(|error| ValidationError::InvalidMetadata(error.to_string()))
}

pub fn build_upload(content: &str, metadata: &str, is_private: bool) -> Result<DocumentUpload, ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(DocumentUpload {
        content: content.to_string(),
        metadata: parse_metadata(metadata)?,
        is_private,
    })
}

pub fn build_query(query: &str, include_private: bool, top_k: u32) -> Result<DocumentQuery, ValidationError> {
    if query.trim().is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    Ok(DocumentQuery {
        query: query.to_string(),
        include_private,
        top_k,
    })
}

/// Snaps a select value onto one of the offered result counts.
pub fn parse_top_k(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| TOP_K_CHOICES.contains(value))
        .unwrap_or(DEFAULT_TOP_K)
}

pub fn upload_failure(error: &ApiError) -> String {
    match error {
        ApiError::Validation(validation) => validation.to_string(),
        other => format!("Upload failed: {}", other.reason()),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub results: Vec<DocumentResult>,
    pub status: Option<StatusMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Started,
    Found(SearchResponse),
    DeleteStarted,
    SearchFailed(ApiError),
    Deleted(i64),
    DeleteFailed(ApiError),
}

pub fn reduce(state: SearchState, event: SearchEvent) -> SearchState {
    match event {
        SearchEvent::Started | SearchEvent::DeleteStarted => SearchState { status: None, ..state },
        SearchEvent::Found(response) => SearchState {
            status: Some(StatusMessage::info(format!("Found {} documents", response.total_found))),
            results: response.results,
        },
        SearchEvent::SearchFailed(ApiError::Validation(validation)) => SearchState {
            status: Some(StatusMessage::error(validation.to_string())),
            ..state
        },
        SearchEvent::SearchFailed(error) => SearchState {
            results: Vec::new(),
            status: Some(StatusMessage::error(format!("Search failed: {}", error.reason()))),
        },
        SearchEvent::Deleted(id) => SearchState {
            results: state.results.into_iter().filter(|doc| doc.id != id).collect(),
            status: Some(StatusMessage::success(DELETE_SUCCESS)),
        },
        SearchEvent::DeleteFailed(error) => SearchState {
            status: Some(StatusMessage::error(format!("Delete failed: {}", error.reason()))),
            ..state
        },
    }
}

pub fn similarity_percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

pub fn privacy_badge(is_private: bool) -> &'static str {
    if is_private {
        "PRIVATE"
    } else {
        "PUBLIC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: i64) -> DocumentResult {
        DocumentResult {
            id,
            content: format!("doc {id}"),
            metadata: None,
            is_private: false,
            author: Some("anonymous".to_string()),
            created_at: None,
            similarity_score: 0.5,
        }
    }

    fn status_text(state: &SearchState) -> Option<&str> {
        state.status.as_ref().map(|status| status.text.as_str())
    }

    fn with_results(ids: &[i64]) -> SearchState {
        SearchState {
            results: ids.iter().copied().map(doc).collect(),
            status: None,
        }
    }

    #[test]
    fn test_metadata_parsing() {
        assert_eq!(parse_metadata("  ").unwrap(), json!({}));
        assert_eq!(parse_metadata(r#"{"title": "T"}"#).unwrap(), json!({"title": "T"}));
        assert!(matches!(
            parse_metadata("{title:"),
            Err(ValidationError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_upload_requires_content() {
        assert_eq!(build_upload(" \n", "", false), Err(ValidationError::EmptyContent));
        let upload = build_upload("poison", "", true).unwrap();
        assert_eq!(upload.metadata, json!({}));
        assert!(upload.is_private);
    }

    #[test]
    fn test_empty_query_is_local_validation() {
        assert_eq!(build_query("", true, 5), Err(ValidationError::EmptyQuery));
        let state = reduce(
            with_results(&[1]),
            SearchEvent::SearchFailed(ValidationError::EmptyQuery.into()),
        );
        assert_eq!(status_text(&state), Some("Please enter a search query"));
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn test_delete_keeps_others_in_order() {
        let state = reduce(with_results(&[4, 7, 9, 2]), SearchEvent::Deleted(9));
        let ids: Vec<_> = state.results.iter().map(|d| d.id).collect();
        assert_eq!(ids, [4, 7, 2]);
        assert_eq!(status_text(&state), Some(DELETE_SUCCESS));
    }

    #[test]
    fn test_new_delete_attempt_clears_previous_status() {
        let failed = reduce(
            with_results(&[3, 5]),
            SearchEvent::DeleteFailed(ApiError::Rejected("locked".to_string())),
        );
        let retried = reduce(failed, SearchEvent::DeleteStarted);
        assert_eq!(retried.status, None);
        assert_eq!(retried.results.len(), 2);
        assert_eq!(DELETE_CONFIRM, "Are you sure you want to delete this document?");
    }

    #[test]
    fn test_search_outcomes() {
        let found = reduce(
            SearchState::default(),
            SearchEvent::Found(SearchResponse {
                success: true,
                results: vec![doc(1), doc(2)],
                total_found: 2,
                error: None,
            }),
        );
        assert_eq!(status_text(&found), Some("Found 2 documents"));

        let failed = reduce(found, SearchEvent::SearchFailed(ApiError::Rejected("index missing".to_string())));
        assert!(failed.results.is_empty());
        assert_eq!(status_text(&failed), Some("Search failed: index missing"));
    }

    #[test]
    fn test_delete_failure_keeps_results() {
        let state = reduce(
            with_results(&[1, 2]),
            SearchEvent::DeleteFailed(ApiError::Rejected("not found".to_string())),
        );
        assert_eq!(state.results.len(), 2);
        assert_eq!(status_text(&state), Some("Delete failed: not found"));
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(similarity_percent(0.87654), "87.65%");
        assert_eq!(parse_top_k("10"), 10);
        assert_eq!(parse_top_k("7"), DEFAULT_TOP_K);
        assert_eq!(privacy_badge(true), "PRIVATE");
        assert_eq!(
            upload_failure(&ApiError::Rejected("too big".to_string())),
            "Upload failed: too big"
        );
    }
}
