use std::collections::BTreeSet;

/// Lifecycle of one page action: `Idle -> Loading -> {Success, Error}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProcessingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl ProcessingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProcessingState::Loading)
    }

    /// Moves into `Loading` and clears the previous outcome. Returns `None`
    /// while a request for this action is already in flight.
    pub fn begin(&self) -> Option<ProcessingState> {
        (!self.is_loading()).then_some(ProcessingState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ProcessingState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Row-level actions (delete, toggle) with a request still in flight, keyed
/// by item id. A row stays locked until its response lands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingRows {
    ids: BTreeSet<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    Started(i64),
    Finished(i64),
}

impl PendingRows {
    pub fn is_pending(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// The event that locks `id`, or `None` when it is already locked.
    pub fn begin(&self, id: i64) -> Option<RowEvent> {
        (!self.is_pending(id)).then_some(RowEvent::Started(id))
    }

    pub fn apply(mut self, event: RowEvent) -> Self {
        match event {
            RowEvent::Started(id) => {
                self.ids.insert(id);
            }
            RowEvent::Finished(id) => {
                self.ids.remove(&id);
            }
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Error,
}

/// Transient status line scoped to one page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Success }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Info }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Error }
    }

    pub fn style(&self) -> &'static str {
        match self.tone {
            Tone::Success => "background:#d4edda; border:1px solid #c3e6cb; color:#155724;",
            Tone::Info => "background:#e7f3ff; border:1px solid #b3d9ff; color:#0056b3;",
            Tone::Error => "background:#f8d7da; border:1px solid #f5c6cb; color:#721c24;",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_blocks_second_request() {
        let state = ProcessingState::Idle;
        let loading = state.begin().unwrap();
        assert!(loading.is_loading());
        assert_eq!(loading.begin(), None);
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let state = ProcessingState::Error("boom".to_string());
        assert_eq!(state.error(), Some("boom"));
        let next = state.begin().unwrap();
        assert_eq!(next.error(), None);
    }

    #[test]
    fn test_row_cannot_start_twice_while_pending() {
        let rows = PendingRows::default();
        let started = rows.begin(7).unwrap();
        let rows = rows.apply(started);
        assert!(rows.is_pending(7));
        assert_eq!(rows.begin(7), None);
        assert_eq!(rows.begin(8), Some(RowEvent::Started(8)));
    }

    #[test]
    fn test_finished_row_unlocks_only_itself() {
        let rows = PendingRows::default()
            .apply(RowEvent::Started(1))
            .apply(RowEvent::Started(2))
            .apply(RowEvent::Finished(1));
        assert!(!rows.is_pending(1));
        assert!(rows.is_pending(2));
        assert_eq!(rows.begin(1), Some(RowEvent::Started(1)));
    }
}
