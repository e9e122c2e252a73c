use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::Pagination;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub is_private: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMessage {
    pub content: String,
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentUpload {
    pub content: String,
    pub metadata: Value,
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentQuery {
    pub query: String,
    pub include_private: bool,
    pub top_k: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub similarity_score: f64,
}

/// Envelope used by the document endpoints: `{success, error?, ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<DocumentResult>,
    #[serde(default)]
    pub total_found: usize,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub ollama_connected: bool,
}

/// One recorded unit of the agent's reasoning, tagged by `type`. Free-text
/// payloads stay as raw JSON since structured agents emit objects there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Thought {
        #[serde(default)]
        content: Value,
    },
    Action {
        #[serde(default)]
        tool: String,
        #[serde(default)]
        tool_input: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw_action: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        log: Option<String>,
    },
    ActionComplete {
        #[serde(default)]
        tool_output: Value,
    },
    FinalAnswer {
        #[serde(default)]
        output: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw_action: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        log: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl Step {
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Thought { .. } => "thought",
            Step::Action { .. } => "action",
            Step::ActionComplete { .. } => "action_complete",
            Step::FinalAnswer { .. } => "final_answer",
            Step::Unknown => "unknown",
        }
    }
}

/// Legacy agent trace entry: `[{tool, tool_input, ...}, output]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub tool: String,
    #[serde(default)]
    pub tool_input: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub created_at: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub user_message: String,
    #[serde(default)]
    pub ai_response: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub reasoning_steps: Option<Vec<Step>>,
    #[serde(default)]
    pub intermediate_steps: Option<Vec<(ToolCall, Value)>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogPage {
    pub logs: Vec<LogEntry>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub prompt: String,
    pub response: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedbackList {
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFeedback {
    pub prompt: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackUpdate {
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrivacyStatement {
    #[serde(default)]
    pub content: String,
}

/// Renders a JSON value the way the UI shows inputs and outputs: strings bare,
/// everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_tags() {
        let steps: Vec<Step> = serde_json::from_value(json!([
            {"type": "thought", "content": "look it up"},
            {"type": "action", "tool": "rag_search", "tool_input": "salary"},
            {"type": "action_complete", "tool_output": "3 docs"},
            {"type": "final_answer", "output": "done", "log": "Final Answer: done"},
            {"type": "observation", "content": "?"}
        ]))
        .unwrap();

        let kinds: Vec<_> = steps.iter().map(Step::kind).collect();
        assert_eq!(
            kinds,
            ["thought", "action", "action_complete", "final_answer", "unknown"]
        );
    }

    #[test]
    fn test_structured_step_payload_keeps_page_intact() {
        let page: LogPage = serde_json::from_value(json!({
            "logs": [
                {
                    "id": 1,
                    "created_at": "2024-05-01T10:00:00",
                    "reasoning_steps": [{"type": "final_answer", "output": {"answer": 42}}]
                },
                {
                    "id": 2,
                    "created_at": "2024-05-01T10:01:00",
                    "reasoning_steps": [{"type": "thought", "content": "plain text"}]
                }
            ],
            "pagination": {"page": 1, "per_page": 20, "total": 2, "pages": 1}
        }))
        .unwrap();

        assert_eq!(page.logs.len(), 2);
        let steps = page.logs[0].reasoning_steps.as_ref().unwrap();
        match &steps[0] {
            Step::FinalAnswer { output, .. } => assert_eq!(display_value(output), r#"{"answer":42}"#),
            other => panic!("expected final answer, got {other:?}"),
        }
    }

    #[test]
    fn test_log_entry_legacy_steps() {
        let entry: LogEntry = serde_json::from_value(json!({
            "id": 7,
            "created_at": "2024-05-01T10:00:00",
            "success": true,
            "model_name": "llama3",
            "user_message": "hi",
            "ai_response": "hello",
            "intermediate_steps": [[{"tool": "user_info", "tool_input": "alice", "log": "x"}, "alice@corp"]]
        }))
        .unwrap();

        assert!(entry.reasoning_steps.is_none());
        let legacy = entry.intermediate_steps.unwrap();
        assert_eq!(legacy[0].0.tool, "user_info");
        assert_eq!(legacy[0].1, json!("alice@corp"));
    }

    #[test]
    fn test_chat_roles_serialize_lowercase() {
        let turn = ChatTurn {
            role: ChatRole::Assistant,
            content: "hey".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            json!({"role": "assistant", "content": "hey"})
        );
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("plain")), "plain");
        assert_eq!(display_value(&json!({"q": 1})), r#"{"q":1}"#);
        assert_eq!(display_value(&Value::Null), "");
    }
}
