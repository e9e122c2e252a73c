use crate::pagination::Pagination;
use crate::types::{Message, MessagePage};

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub messages: Vec<Message>,
    pub pagination: Pagination,
}

impl BoardState {
    pub fn new(per_page: u32) -> Self {
        Self {
            messages: Vec::new(),
            pagination: Pagination::empty(per_page),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    PageLoaded(MessagePage),
    /// The server's copy of a message this client just posted.
    Posted(Message),
    Deleted(i64),
}

pub fn reduce(state: BoardState, event: BoardEvent) -> BoardState {
    match event {
        BoardEvent::PageLoaded(page) => BoardState {
            messages: page.messages,
            pagination: page.pagination,
        },
        BoardEvent::Posted(message) => {
            let mut messages = Vec::with_capacity(state.messages.len() + 1);
            messages.push(message);
            messages.extend(state.messages);
            BoardState { messages, ..state }
        }
        BoardEvent::Deleted(id) => BoardState {
            messages: state
                .messages
                .into_iter()
                .filter(|message| message.id != id)
                .collect(),
            ..state
        },
    }
}

/// Delete controls are shown only on the signed-in author's own messages.
pub fn can_delete(message: &Message, username: Option<&str>) -> bool {
    username.is_some_and(|name| name == message.author)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64, author: &str, content: &str) -> Message {
        Message {
            id,
            author: author.to_string(),
            content: content.to_string(),
            is_private: false,
            created_at: "2024-05-01T10:00:00".to_string(),
        }
    }

    fn loaded() -> BoardState {
        reduce(
            BoardState::new(20),
            BoardEvent::PageLoaded(MessagePage {
                messages: vec![message(2, "bob", "second"), message(1, "alice", "first")],
                pagination: Pagination::from_counts(1, 20, 2),
            }),
        )
    }

    #[test]
    fn test_posted_message_is_prepended() {
        let state = reduce(loaded(), BoardEvent::Posted(message(3, "alice", "hello")));
        let contents: Vec<_> = state.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["hello", "second", "first"]);
        assert_eq!(state.pagination, Pagination::from_counts(1, 20, 2));
    }

    #[test]
    fn test_delete_removes_only_that_id() {
        let state = reduce(loaded(), BoardEvent::Deleted(2));
        let ids: Vec<_> = state.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, [1]);

        let unchanged = reduce(loaded(), BoardEvent::Deleted(99));
        assert_eq!(unchanged, loaded());
    }

    #[test]
    fn test_can_delete_own_messages_only() {
        let own = message(1, "alice", "x");
        assert!(can_delete(&own, Some("alice")));
        assert!(!can_delete(&own, Some("bob")));
        assert!(!can_delete(&own, None));
    }
}
