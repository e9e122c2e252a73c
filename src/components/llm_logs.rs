use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::controller::ProcessingState;
use crate::format;
use crate::pagination::Pagination;
use crate::reasoning::{render_reasoning, Block, ReasoningView, StepView, ToolUseView, NO_TOOLS};
use crate::types::LogEntry;

use super::{Pager, ProcessingBanner};

fn step_color(kind: &str) -> &'static str {
    match kind {
        "thought" => "#6f42c1",
        "action" => "#007bff",
        "action_complete" => "#17a2b8",
        "final_answer" => "#28a745",
        _ => "#6c757d",
    }
}

fn render_block(block: &Block) -> Html {
    match block {
        Block::Text { label, text } => html! {
            <div style="margin:0.3em 0;">
                <strong>{ *label }</strong>
                <div style="white-space:pre-wrap;">{ text }</div>
            </div>
        },
        Block::ToolCall { tool, input } => html! {
            <div style="margin:0.3em 0; display:flex; gap:1em;">
                <span><strong>{ "Tool: " }</strong><code>{ tool }</code></span>
                <span><strong>{ "Input: " }</strong><code>{ input }</code></span>
            </div>
        },
        Block::Code { label, code } => html! {
            <div style="margin:0.3em 0;">
                <strong>{ *label }</strong>
                <pre style="background:#f8f9fa; padding:0.5em; border-radius:4px; font-size:0.85em; overflow-x:auto; white-space:pre-wrap;">
                    { code }
                </pre>
            </div>
        },
    }
}

fn render_step(step: &StepView) -> Html {
    let color = step_color(step.kind);
    html! {
        <div style={format!("border-left:4px solid {color}; padding:0.5em 0.8em; margin:0.5em 0; background:#fdfdfd;")}>
            <div style="display:flex; justify-content:space-between; font-size:0.85em;">
                <strong style={format!("color:{color};")}>{ &step.title }</strong>
                <span style="color:#999;">{ &step.number }</span>
            </div>
            { for step.blocks.iter().map(render_block) }
        </div>
    }
}

fn render_tool_use(call: &ToolUseView) -> Html {
    html! {
        <div style="border:1px solid #e9ecef; border-radius:4px; padding:0.5em 0.8em; margin:0.5em 0;">
            <div><strong>{ "Tool: " }</strong><code>{ &call.tool }</code></div>
            <div><strong>{ "Input: " }</strong><code>{ &call.input }</code></div>
            <div><strong>{ "Output:" }</strong>
                <pre style="background:#f8f9fa; padding:0.5em; border-radius:4px; font-size:0.85em; white-space:pre-wrap;">{ &call.output }</pre>
            </div>
        </div>
    }
}

fn render_reasoning_region(entry: &LogEntry) -> Html {
    let body = match render_reasoning(entry) {
        ReasoningView::Timeline(steps) => html! { <>{ for steps.iter().map(render_step) }</> },
        ReasoningView::ToolUse(calls) if calls.is_empty() => html! {
            <div style="color:#888; font-style:italic;">{ NO_TOOLS }</div>
        },
        ReasoningView::ToolUse(calls) => html! { <>{ for calls.iter().map(render_tool_use) }</> },
        ReasoningView::Placeholder(text) => html! {
            <div style="color:#888; font-style:italic;">{ text }</div>
        },
    };
    html! {
        <div style="margin-top:0.8em;">
            <h4 style="margin:0.4em 0; color:#555;">{ "Agent Reasoning" }</h4>
            { body }
        </div>
    }
}

fn log_card(entry: &LogEntry) -> Html {
    let (badge, badge_color) = if entry.success {
        ("Success", "#28a745")
    } else {
        ("Error", "#dc3545")
    };
    html! {
        <div key={entry.id} style="background:white; border:1px solid #ddd; border-radius:8px; padding:1.2em;">
            <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:0.8em;">
                <div style="display:flex; gap:1em; align-items:center;">
                    <strong>{ format!("#{}", entry.id) }</strong>
                    <span style="color:#666; font-size:0.9em;">{ format::date_time(&entry.created_at) }</span>
                    <span style={format!("background:{badge_color}; color:white; padding:0.1em 0.6em; border-radius:10px; font-size:0.8em;")}>
                        { badge }
                    </span>
                </div>
                <span style="color:#666; font-size:0.9em;">{ format!("Model: {}", entry.model_name) }</span>
            </div>
            <div style="margin-bottom:0.6em;">
                <strong>{ "User Message:" }</strong>
                <div style="white-space:pre-wrap; background:#e7f3ff; padding:0.5em; border-radius:4px;">{ &entry.user_message }</div>
            </div>
            <div style="margin-bottom:0.6em;">
                <strong>{ "AI Response:" }</strong>
                <div style="white-space:pre-wrap; background:#f1f3f5; padding:0.5em; border-radius:4px;">{ &entry.ai_response }</div>
            </div>
            { for entry.error_message.as_ref().filter(|text| !text.is_empty()).map(|text| html! {
                <div style="margin-bottom:0.6em; color:#721c24; background:#f8d7da; padding:0.5em; border-radius:4px;">
                    <strong>{ "Error: " }</strong>{ text }
                </div>
            }) }
            { render_reasoning_region(entry) }
        </div>
    }
}

#[function_component(LlmLogsPage)]
pub fn llm_logs_page() -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let per_page = ctx.client.config().page_size;
    let logs = use_state(Vec::<LogEntry>::new);
    let pagination = use_state(|| Pagination::empty(per_page));
    let page = use_state(|| 1u32);
    let processing_state = use_state(|| ProcessingState::Loading);

    let fetch_logs = {
        let client = ctx.client.clone();
        let logs = logs.clone();
        let pagination = pagination.clone();
        let page = page.clone();
        let processing_state = processing_state.clone();
        Callback::from(move |requested: u32| {
            processing_state.set(ProcessingState::Loading);
            page.set(requested);
            let client = client.clone();
            let logs = logs.clone();
            let pagination = pagination.clone();
            let processing_state = processing_state.clone();
            spawn_local(async move {
                match client.chat_logs(requested).await {
                    Ok(listing) => {
                        log::debug!("loaded {} llm log entries", listing.logs.len());
                        logs.set(listing.logs);
                        pagination.set(listing.pagination.normalized());
                        processing_state.set(ProcessingState::Success);
                    }
                    Err(error) => {
                        log::error!("error fetching llm logs: {error}");
                        processing_state.set(ProcessingState::Error(error.message_or("Failed to fetch logs")));
                    }
                }
            });
        })
    };

    {
        let fetch_logs = fetch_logs.clone();
        use_effect_with((), move |_| {
            fetch_logs.emit(1);
            || ()
        });
    }

    let on_retry = {
        let fetch_logs = fetch_logs.clone();
        let page = page.clone();
        Callback::from(move |_: MouseEvent| fetch_logs.emit(*page))
    };

    let content = match &*processing_state {
        ProcessingState::Success if logs.is_empty() => html! {
            <div style="color:#888; padding:1em;">{ "No logs found" }</div>
        },
        ProcessingState::Success => html! {
            <>
                <div style="display:flex; flex-direction:column; gap:1em;">
                    { for logs.iter().map(log_card) }
                </div>
                <Pager pagination={*pagination} on_page={fetch_logs.clone()} />
            </>
        },
        _ => html! {},
    };

    html! {
        <div>
            <h1 style="color:#333;">{ "LLM Interaction Logs" }</h1>
            <ProcessingBanner state={(*processing_state).clone()} loading_text="Loading logs..." {on_retry} />
            { content }
        </div>
    }
}
