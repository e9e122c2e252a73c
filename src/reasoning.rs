//! Display model for the agent trace attached to each LLM log entry.
//!
//! Entries carry either the current `reasoning_steps` timeline or the legacy
//! `intermediate_steps` pairs. Only one of the two is ever shown, and an entry
//! with neither still gets a placeholder region.

use serde_json::{json, Value};

use crate::types::{display_value, LogEntry, Step, ToolCall};

pub const NO_REASONING: &str = "No detailed reasoning captured";
pub const NO_TOOLS: &str = "No tools used";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Label followed by prose.
    Text { label: &'static str, text: String },
    /// Tool name and its input, shown side by side.
    ToolCall { tool: String, input: String },
    /// Label followed by preformatted text.
    Code { label: &'static str, code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    /// Style key: the step's wire tag.
    pub kind: &'static str,
    pub title: String,
    pub number: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolUseView {
    pub tool: String,
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasoningView {
    Timeline(Vec<StepView>),
    /// Legacy list; empty renders as "No tools used".
    ToolUse(Vec<ToolUseView>),
    Placeholder(&'static str),
}

pub fn render_reasoning(entry: &LogEntry) -> ReasoningView {
    match (&entry.reasoning_steps, &entry.intermediate_steps) {
        (Some(steps), _) if steps.is_empty() => ReasoningView::Placeholder(NO_REASONING),
        (Some(steps), _) => ReasoningView::Timeline(
            steps
                .iter()
                .enumerate()
                .map(|(index, step)| render_step(step, index))
                .collect(),
        ),
        (None, Some(pairs)) => ReasoningView::ToolUse(pairs.iter().map(render_tool_use).collect()),
        (None, None) => ReasoningView::Placeholder(NO_REASONING),
    }
}

pub fn render_step(step: &Step, index: usize) -> StepView {
    let kind = step.kind();
    let blocks = match step {
        Step::Thought { content } => vec![Block::Text {
            label: "Thought:",
            text: display_value(content),
        }],
        Step::Action {
            tool,
            tool_input,
            raw_action,
            log,
        } => {
            let mut blocks = vec![
                Block::ToolCall {
                    tool: tool.clone(),
                    input: display_value(tool_input),
                },
                Block::Code {
                    label: "JSON Action:",
                    code: action_json(raw_action.as_ref(), tool, tool_input),
                },
            ];
            blocks.extend(log_block("Log:", log.as_deref()));
            blocks
        }
        Step::ActionComplete { tool_output } => vec![Block::Code {
            label: "Tool Result:",
            code: display_value(tool_output),
        }],
        Step::FinalAnswer {
            output,
            raw_action,
            log,
        } => {
            let mut blocks = vec![
                Block::Text {
                    label: "Final Answer:",
                    text: display_value(output),
                },
                Block::Code {
                    label: "Final JSON Action:",
                    code: action_json(raw_action.as_ref(), "Final Answer", output),
                },
            ];
            blocks.extend(log_block("Final Log:", log.as_deref()));
            blocks
        }
        Step::Unknown => Vec::new(),
    };

    StepView {
        kind,
        title: kind.replace('_', " ").to_uppercase(),
        number: format!("#{}", index + 1),
        blocks,
    }
}

/// Two-space pretty JSON of the agent's action blob. A captured raw action is
/// shown as-is; otherwise the blob is rebuilt from the step.
pub fn action_json(raw_action: Option<&Value>, action: &str, action_input: &Value) -> String {
    let blob = match raw_action {
        Some(raw) => raw.clone(),
        None => json!({ "action": action, "action_input": action_input }),
    };
    serde_json::to_string_pretty(&blob).unwrap_or_else(|_| blob.to_string())
}

fn log_block(label: &'static str, log: Option<&str>) -> Option<Block> {
    log.filter(|text| !text.is_empty()).map(|text| Block::Code {
        label,
        code: text.to_string(),
    })
}

fn render_tool_use((call, output): &(ToolCall, Value)) -> ToolUseView {
    ToolUseView {
        tool: call.tool.clone(),
        input: display_value(&call.tool_input),
        output: display_value(output),
    }
}
