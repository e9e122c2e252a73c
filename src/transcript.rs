use crate::error::ApiError;
use crate::types::{ChatRequest, ChatResponse, ChatRole, ChatTurn, HealthResponse};

pub const CHAT_FAILURE_FALLBACK: &str = "Failed to get response from AI";

/// Reachability of the chat backend as last reported by the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Checking,
    Connected,
    /// Backend answered but its model server is down.
    ModelOffline,
    /// The health request itself failed.
    Unreachable,
}

impl Connection {
    pub fn from_health(result: Result<&HealthResponse, &ApiError>) -> Self {
        match result {
            Ok(health) if health.ollama_connected => Connection::Connected,
            Ok(_) => Connection::ModelOffline,
            Err(_) => Connection::Unreachable,
        }
    }

    pub fn can_send(self) -> bool {
        self == Connection::Connected
    }

    /// Only a failed request raises the retry banner.
    pub fn shows_banner(self) -> bool {
        self == Connection::Unreachable
    }

    pub fn indicator(self) -> (&'static str, &'static str) {
        match self {
            Connection::Checking => ("#ffc107", "Checking connection..."),
            Connection::Connected => ("#28a745", "Connected"),
            Connection::ModelOffline | Connection::Unreachable => ("#dc3545", "Disconnected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
    /// Synthetic entry for a failed turn. Shown, never sent back as history.
    Error,
}

impl Sender {
    fn role(self) -> Option<ChatRole> {
        match self {
            Sender::User => Some(ChatRole::User),
            Sender::Ai => Some(ChatRole::Assistant),
            Sender::Error => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
    pub model: Option<String>,
}

/// Append-only record of one chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Role-tagged history in transcript order, without error entries.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .filter_map(|message| {
                message.sender.role().map(|role| ChatTurn {
                    role,
                    content: message.text.clone(),
                })
            })
            .collect()
    }

    /// Starts a turn: snapshots the history as it stands, then appends the
    /// user's message. Blank input starts nothing.
    pub fn begin_turn(&mut self, text: &str, timestamp: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }
        let chat_history = self.history();
        self.push(text.to_string(), Sender::User, timestamp, None);
        Some(ChatRequest {
            message: text.to_string(),
            chat_history,
        })
    }

    pub fn complete_turn(&mut self, result: Result<ChatResponse, &ApiError>, timestamp: &str) {
        match result {
            Ok(response) => {
                self.push(response.response, Sender::Ai, timestamp, response.model);
            }
            Err(error) => {
                let text = error.message_or(CHAT_FAILURE_FALLBACK);
                self.push(text, Sender::Error, timestamp, None);
            }
        }
    }

    fn push(&mut self, text: String, sender: Sender, timestamp: &str, model: Option<String>) {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: timestamp.to_string(),
            model,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_model_blocks_sending_without_banner() {
        let offline = Connection::from_health(Ok(&HealthResponse {
            ollama_connected: false,
        }));
        assert_eq!(offline, Connection::ModelOffline);
        assert!(!offline.can_send());
        assert!(!offline.shows_banner());
        assert_eq!(offline.indicator().1, "Disconnected");

        let up = Connection::from_health(Ok(&HealthResponse {
            ollama_connected: true,
        }));
        assert!(up.can_send());
        assert!(!up.shows_banner());
    }

    #[test]
    fn test_failed_health_request_raises_banner() {
        let down = Connection::from_health(Err(&ApiError::Network("connection refused".to_string())));
        assert_eq!(down, Connection::Unreachable);
        assert!(down.shows_banner());
        assert!(!down.can_send());
        assert!(!Connection::Checking.shows_banner());
    }

    fn reply(text: &str) -> ChatResponse {
        ChatResponse {
            response: text.to_string(),
            model: Some("llama3".to_string()),
        }
    }

    fn turn(role: ChatRole, content: &str) -> ChatTurn {
        ChatTurn {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_first_turn_has_empty_history() {
        let mut transcript = Transcript::default();
        let request = transcript.begin_turn("hello", "10:00").unwrap();
        assert_eq!(request.message, "hello");
        assert!(request.chat_history.is_empty());
        assert_eq!(transcript.messages().len(), 1);
    }

    #[test]
    fn test_history_excludes_in_flight_and_errors() {
        let mut transcript = Transcript::default();

        transcript.begin_turn("one", "t1").unwrap();
        transcript.complete_turn(Ok(reply("first answer")), "t2");

        transcript.begin_turn("two", "t3").unwrap();
        let failure = ApiError::Backend {
            status: 500,
            detail: Some("Ollama timed out".to_string()),
        };
        transcript.complete_turn(Err(&failure), "t4");

        let request = transcript.begin_turn("three", "t5").unwrap();
        assert_eq!(
            request.chat_history,
            vec![
                turn(ChatRole::User, "one"),
                turn(ChatRole::Assistant, "first answer"),
                turn(ChatRole::User, "two"),
            ]
        );
        assert_eq!(request.message, "three");
    }

    #[test]
    fn test_history_matches_prior_turns_for_every_turn() {
        let mut transcript = Transcript::default();
        let mut expected = Vec::new();
        for n in 0..5 {
            let text = format!("msg {n}");
            let request = transcript.begin_turn(&text, "t").unwrap();
            assert_eq!(request.chat_history, expected);
            expected.push(turn(ChatRole::User, &text));
            if n % 2 == 0 {
                let answer = format!("answer {n}");
                transcript.complete_turn(Ok(reply(&answer)), "t");
                expected.push(turn(ChatRole::Assistant, &answer));
            } else {
                transcript.complete_turn(Err(&ApiError::Network("down".to_string())), "t");
            }
        }
    }

    #[test]
    fn test_error_entry_text() {
        let mut transcript = Transcript::default();
        transcript.begin_turn("hi", "t").unwrap();
        transcript.complete_turn(Err(&ApiError::Network("down".to_string())), "t");

        let last = transcript.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Error);
        assert_eq!(last.text, CHAT_FAILURE_FALLBACK);

        transcript.begin_turn("hi", "t").unwrap();
        let failure = ApiError::Backend {
            status: 400,
            detail: Some("model not loaded".to_string()),
        };
        transcript.complete_turn(Err(&failure), "t");
        assert_eq!(transcript.messages().last().unwrap().text, "model not loaded");
    }

    #[test]
    fn test_blank_input_and_clear() {
        let mut transcript = Transcript::default();
        assert!(transcript.begin_turn("   ", "t").is_none());
        assert!(transcript.is_empty());

        transcript.begin_turn("hi", "t").unwrap();
        transcript.complete_turn(Ok(reply("hey")), "t");
        let ids: Vec<_> = transcript.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(transcript.messages()[1].model.as_deref(), Some("llama3"));

        transcript.clear();
        assert!(transcript.is_empty());
        assert!(transcript.history().is_empty());
    }
}
