use std::rc::Rc;

use web_sys::HtmlTextAreaElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::controller::{ProcessingState, StatusMessage};
use crate::error::ApiError;
use crate::format;
use crate::transcript::{ChatMessage, Connection, Sender, Transcript};
use crate::types::ChatResponse;

use super::{ProcessingBanner, StatusBanner};

const DISCONNECTED: &str =
    "Cannot connect to AI service. Please make sure the backend and Ollama are running.";
const EXAMPLE_PROMPTS: [&str; 3] = [
    "What documents are available about our products?",
    "Summarize the latest messages on the board.",
    "Search the knowledge base for company policies.",
];

pub enum TranscriptAction {
    Begin { text: String, timestamp: String },
    Complete { result: Result<ChatResponse, ApiError>, timestamp: String },
    Clear,
}

impl Reducible for Transcript {
    type Action = TranscriptAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TranscriptAction::Begin { text, timestamp } => {
                next.begin_turn(&text, &timestamp);
            }
            TranscriptAction::Complete { result, timestamp } => match result {
                Ok(response) => next.complete_turn(Ok(response), &timestamp),
                Err(error) => next.complete_turn(Err(&error), &timestamp),
            },
            TranscriptAction::Clear => next.clear(),
        }
        Rc::new(next)
    }
}

fn bubble(message: &ChatMessage) -> Html {
    let (align, background, color) = match message.sender {
        Sender::User => ("flex-end", "#007bff", "white"),
        Sender::Ai => ("flex-start", "#f1f3f5", "#333"),
        Sender::Error => ("flex-start", "#f8d7da", "#721c24"),
    };
    let meta = match &message.model {
        Some(model) => format!("{} via {model}", message.timestamp),
        None => message.timestamp.clone(),
    };
    html! {
        <div key={message.id} style={format!("display:flex; flex-direction:column; align-items:{align};")}>
            <div style={format!("max-width:75%; padding:0.7em 1em; border-radius:12px; background:{background}; color:{color}; white-space:pre-wrap;")}>
                { &message.text }
            </div>
            <small style="color:#999; margin-top:0.2em;">{ meta }</small>
        </div>
    }
}

#[function_component(ChatPage)]
pub fn chat_page() -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let transcript = use_reducer(Transcript::default);
    let input = use_state(String::new);
    let sending = use_state(ProcessingState::default);
    let connection = use_state(|| Connection::Checking);
    let status = use_state(|| None::<StatusMessage>);

    let check_health = {
        let client = ctx.client.clone();
        let connection = connection.clone();
        Callback::from(move |_: ()| {
            connection.set(Connection::Checking);
            let client = client.clone();
            let connection = connection.clone();
            spawn_local(async move {
                let result = client.chat_health().await;
                match &result {
                    Ok(health) if !health.ollama_connected => {
                        log::warn!("chat backend reachable but the model server is not")
                    }
                    Ok(_) => {}
                    Err(error) => log::error!("chat health check failed: {error}"),
                }
                connection.set(Connection::from_health(result.as_ref()));
            });
        })
    };

    {
        let check_health = check_health.clone();
        use_effect_with((), move |_| {
            check_health.emit(());
            || ()
        });
    }

    let on_input = {
        let input = input.clone();
        Callback::from(move |event: InputEvent| {
            input.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let connected = connection.can_send();
    let on_send = {
        let client = ctx.client.clone();
        let transcript = transcript.clone();
        let input = input.clone();
        let sending = sending.clone();
        let status = status.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if !connected {
                return;
            }
            let Some(next) = sending.begin() else {
                return;
            };

            let text = input.trim().to_string();
            let timestamp = format::time_now();
            let mut draft = (*transcript).clone();
            let Some(request) = draft.begin_turn(&text, &timestamp) else {
                return;
            };
            sending.set(next);
            status.set(None);
            input.set(String::new());
            transcript.dispatch(TranscriptAction::Begin { text, timestamp });

            let client = client.clone();
            let transcript = transcript.dispatcher();
            let sending = sending.clone();
            let status = status.clone();
            spawn_local(async move {
                let result = client.chat(&request).await;
                match &result {
                    Ok(_) => sending.set(ProcessingState::Success),
                    Err(error) => {
                        log::error!("chat request failed: {error}");
                        let text = error.message_or("An error occurred while communicating with the AI");
                        status.set(Some(StatusMessage::error(text.clone())));
                        sending.set(ProcessingState::Error(text));
                    }
                }
                transcript.dispatch(TranscriptAction::Complete {
                    result,
                    timestamp: format::time_now(),
                });
            });
        })
    };

    let on_clear = {
        let transcript = transcript.dispatcher();
        let status = status.clone();
        Callback::from(move |_: MouseEvent| {
            transcript.dispatch(TranscriptAction::Clear);
            status.set(None);
        })
    };

    let on_retry = {
        let check_health = check_health.clone();
        Callback::from(move |_: MouseEvent| check_health.emit(()))
    };

    let is_sending = sending.is_loading();
    let can_send = connected && !is_sending && !input.trim().is_empty();
    let (dot, label) = connection.indicator();

    let body = if transcript.is_empty() {
        html! {
            <div style="color:#666; padding:1em;">
                <h3 style="margin-top:0;">{ "Welcome to the AI assistant" }</h3>
                <p>{ "Ask anything. The assistant can search documents and read the message board. Try:" }</p>
                <ul>
                    { for EXAMPLE_PROMPTS.iter().map(|prompt| html! { <li>{ *prompt }</li> }) }
                </ul>
            </div>
        }
    } else {
        html! {
            <div style="display:flex; flex-direction:column; gap:0.8em;">
                { for transcript.messages().iter().map(bubble) }
                { if is_sending {
                    html! { <div style="color:#888; font-style:italic;">{ "AI is thinking..." }</div> }
                } else {
                    html! {}
                }}
            </div>
        }
    };

    html! {
        <div>
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h1 style="color:#333;">{ "AI Chat" }</h1>
                <div style="display:flex; align-items:center; gap:1em;">
                    <span style="display:flex; align-items:center; gap:0.4em; color:#555;">
                        <span style={format!("width:10px; height:10px; border-radius:50%; background:{dot}; display:inline-block;")}></span>
                        { label }
                    </span>
                    <button onclick={on_clear} disabled={transcript.is_empty()}
                        style="padding:0.4em 1em; border:1px solid #ccc; border-radius:4px; background:white; cursor:pointer;">
                        { "Clear Chat" }
                    </button>
                </div>
            </div>
            { if connection.shows_banner() {
                html! {
                    <ProcessingBanner state={ProcessingState::Error(DISCONNECTED.to_string())} loading_text=""
                        on_retry={on_retry} retry_label="Retry Connection" />
                }
            } else {
                html! {}
            }}
            <div style="background:white; border:1px solid #ddd; border-radius:8px; padding:1em; min-height:300px; max-height:60vh; overflow-y:auto;">
                { body }
            </div>
            <StatusBanner status={(*status).clone()} />
            <form onsubmit={on_send} style="display:flex; gap:0.75em; margin-top:1em;">
                <textarea rows="2" placeholder="Type your message..."
                    value={(*input).clone()} oninput={on_input} disabled={!connected || is_sending}
                    style="flex:1; padding:0.6em; border:1px solid #ccc; border-radius:4px; resize:vertical;" />
                <button type="submit" disabled={!can_send}
                    style="padding:0.6em 1.4em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;">
                    { if is_sending { "Sending..." } else { "Send" } }
                </button>
            </form>
        </div>
    }
}
