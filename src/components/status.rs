use yew::prelude::*;

use crate::controller::{ProcessingState, StatusMessage};

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    pub status: Option<StatusMessage>,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    match &props.status {
        Some(status) => html! {
            <div style={format!("margin-top:1em; padding:0.75em 1em; border-radius:4px; {}", status.style())}>
                { &status.text }
            </div>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ProcessingBannerProps {
    pub state: ProcessingState,
    pub loading_text: AttrValue,
    #[prop_or_default]
    pub on_retry: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub retry_label: Option<AttrValue>,
}

/// Spinner while loading, error box with an optional retry control on failure.
#[function_component(ProcessingBanner)]
pub fn processing_banner(props: &ProcessingBannerProps) -> Html {
    match &props.state {
        ProcessingState::Loading => html! {
            <div style="margin:1em 0; padding:1em; background:#e7f3ff; border:1px solid #b3d9ff; border-radius:4px;">
                <div style="display:flex; align-items:center; gap:0.5em;">
                    <div class="spinner" style="
                        width:16px; height:16px;
                        border:2px solid #f3f3f3;
                        border-top:2px solid #007bff;
                        border-radius:50%;
                        animation:spin 1s linear infinite;
                    "></div>
                    <strong style="color:#0056b3;">{ &props.loading_text }</strong>
                </div>
            </div>
        },
        ProcessingState::Error(message) => html! {
            <div style="margin:1em 0; padding:1em; background:#f8d7da; border:1px solid #f5c6cb; border-radius:4px; display:flex; justify-content:space-between; align-items:center; gap:1em;">
                <span style="color:#721c24;">{ message }</span>
                { match &props.on_retry {
                    Some(on_retry) => html! {
                        <button onclick={on_retry.clone()} style="padding:0.4em 1em; background:#721c24; color:white; border:none; border-radius:4px; cursor:pointer;">
                            { props.retry_label.clone().unwrap_or_else(|| AttrValue::from("Retry")) }
                        </button>
                    },
                    None => html! {},
                }}
            </div>
        },
        ProcessingState::Idle | ProcessingState::Success => html! {},
    }
}
