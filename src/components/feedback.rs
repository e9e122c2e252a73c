use std::rc::Rc;

use web_sys::HtmlTextAreaElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::controller::{PendingRows, ProcessingState, RowEvent, StatusMessage};
use crate::error::ApiError;
use crate::feedback::{
    build_feedback, reduce, toggle_label, FeedbackAction, FeedbackEvent, DELETE_CONFIRM,
};
use crate::format;
use crate::route::Route;
use crate::types::{Feedback, FeedbackList};

use super::{confirm, ProcessingBanner, StatusBanner};

impl Reducible for FeedbackList {
    type Action = FeedbackEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(FeedbackList {
            feedback: reduce(self.feedback.clone(), action),
        })
    }
}

fn report(status: &UseStateHandle<Option<StatusMessage>>, action: FeedbackAction, result: &Result<(), ApiError>) {
    match result {
        Ok(()) => status.set(action.success_message().map(StatusMessage::success)),
        Err(error) => {
            log::error!("feedback {action:?} failed: {error}");
            status.set(Some(StatusMessage::error(action.failure_message(error))));
        }
    }
}

#[function_component(FeedbackPage)]
pub fn feedback_page() -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let authenticated = ctx.is_authenticated();
    let list = use_reducer(|| FeedbackList { feedback: Vec::new() });
    let loading = use_state(ProcessingState::default);
    let submitting = use_state(ProcessingState::default);
    let prompt = use_state(String::new);
    let response = use_state(String::new);
    let status = use_state(|| None::<StatusMessage>);
    let busy_rows = use_reducer(PendingRows::default);

    let fetch_feedback = {
        let client = ctx.client.clone();
        let list = list.dispatcher();
        let loading = loading.clone();
        let status = status.clone();
        Callback::from(move |_: ()| {
            if !client.is_authenticated() {
                return;
            }
            loading.set(ProcessingState::Loading);
            let client = client.clone();
            let list = list.clone();
            let loading = loading.clone();
            let status = status.clone();
            spawn_local(async move {
                match client.list_feedback().await {
                    Ok(feedback) => {
                        list.dispatch(FeedbackEvent::Loaded(feedback));
                        loading.set(ProcessingState::Success);
                    }
                    Err(error) => {
                        let text = FeedbackAction::Fetch.failure_message(&error);
                        log::error!("feedback fetch failed: {error}");
                        status.set(Some(StatusMessage::error(text.clone())));
                        loading.set(ProcessingState::Error(text));
                    }
                }
            });
        })
    };

    {
        let fetch_feedback = fetch_feedback.clone();
        use_effect_with(ctx.auth_revision, move |_| {
            fetch_feedback.emit(());
            || ()
        });
    }

    let on_prompt = {
        let prompt = prompt.clone();
        Callback::from(move |event: InputEvent| {
            prompt.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_response = {
        let response = response.clone();
        Callback::from(move |event: InputEvent| {
            response.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let on_submit = {
        let client = ctx.client.clone();
        let prompt = prompt.clone();
        let response = response.clone();
        let submitting = submitting.clone();
        let status = status.clone();
        let fetch_feedback = fetch_feedback.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let feedback = match build_feedback(&prompt, &response, client.is_authenticated()) {
                Ok(feedback) => feedback,
                Err(invalid) => {
                    status.set(Some(StatusMessage::error(invalid.to_string())));
                    return;
                }
            };
            let Some(next) = submitting.begin() else {
                return;
            };
            submitting.set(next);
            status.set(None);

            let client = client.clone();
            let prompt = prompt.clone();
            let response = response.clone();
            let submitting = submitting.clone();
            let status = status.clone();
            let fetch_feedback = fetch_feedback.clone();
            spawn_local(async move {
                let result = client.submit_feedback(&feedback).await;
                report(&status, FeedbackAction::Submit, &result);
                submitting.set(ProcessingState::Idle);
                if result.is_ok() {
                    prompt.set(String::new());
                    response.set(String::new());
                    fetch_feedback.emit(());
                }
            });
        })
    };

    let on_toggle = {
        let client = ctx.client.clone();
        let list = list.dispatcher();
        let status = status.clone();
        let fetch_feedback = fetch_feedback.clone();
        let busy_rows = busy_rows.clone();
        Callback::from(move |(id, is_active): (i64, bool)| {
            let Some(started) = busy_rows.begin(id) else {
                return;
            };
            busy_rows.dispatch(started);
            status.set(None);

            let client = client.clone();
            let list = list.clone();
            let status = status.clone();
            let fetch_feedback = fetch_feedback.clone();
            let busy_rows = busy_rows.dispatcher();
            spawn_local(async move {
                let result = client.set_feedback_active(id, is_active).await;
                busy_rows.dispatch(RowEvent::Finished(id));
                report(&status, FeedbackAction::Update, &result);
                if result.is_ok() {
                    list.dispatch(FeedbackEvent::Toggled { id, is_active });
                    fetch_feedback.emit(());
                }
            });
        })
    };

    let on_delete = {
        let client = ctx.client.clone();
        let list = list.dispatcher();
        let status = status.clone();
        let fetch_feedback = fetch_feedback.clone();
        let busy_rows = busy_rows.clone();
        Callback::from(move |id: i64| {
            if busy_rows.is_pending(id) || !confirm(DELETE_CONFIRM) {
                return;
            }
            let Some(started) = busy_rows.begin(id) else {
                return;
            };
            busy_rows.dispatch(started);
            status.set(None);

            let client = client.clone();
            let list = list.clone();
            let status = status.clone();
            let fetch_feedback = fetch_feedback.clone();
            let busy_rows = busy_rows.dispatcher();
            spawn_local(async move {
                let result = client.delete_feedback(id).await;
                busy_rows.dispatch(RowEvent::Finished(id));
                report(&status, FeedbackAction::Delete, &result);
                if result.is_ok() {
                    list.dispatch(FeedbackEvent::Deleted(id));
                    fetch_feedback.emit(());
                }
            });
        })
    };

    if !authenticated {
        let navigate = ctx.navigate.clone();
        return html! {
            <div style="max-width:480px; margin:3em auto; padding:2em; background:white; border:1px solid #ddd; border-radius:8px; text-align:center;">
                <h2 style="margin-top:0;">{ "Feedback Management" }</h2>
                <p style="color:#666;">{ "Please login to manage feedback." }</p>
                <button onclick={Callback::from(move |_: MouseEvent| navigate.emit(Route::Login))}
                    style="padding:0.6em 1.4em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;">
                    { "Go to Login" }
                </button>
            </div>
        };
    }

    let field_style = "width:100%; padding:0.6em; border:1px solid #ccc; border-radius:4px; box-sizing:border-box;";
    let busy = submitting.is_loading();
    let entries = if list.feedback.is_empty() && !loading.is_loading() {
        html! { <div style="color:#888; padding:1em;">{ "No feedback yet." }</div> }
    } else {
        html! {
            <div style="display:flex; flex-direction:column; gap:1em;">
                { for list.feedback.iter().map(|item| feedback_card(item, busy_rows.is_pending(item.id), on_toggle.clone(), on_delete.clone())) }
            </div>
        }
    };

    html! {
        <div>
            <h1 style="color:#333;">{ "Feedback Management" }</h1>
            <div style="background:white; border:1px solid #ddd; border-radius:8px; padding:1.5em;">
                <h2 style="margin-top:0;">{ "Add Feedback" }</h2>
                <form onsubmit={on_submit} style="display:flex; flex-direction:column; gap:1em;">
                    <label style="font-weight:bold; color:#555;">{ "Prompt" }
                        <textarea rows="3" value={(*prompt).clone()} oninput={on_prompt} style={field_style} />
                    </label>
                    <label style="font-weight:bold; color:#555;">{ "Preferred Response" }
                        <textarea rows="4" value={(*response).clone()} oninput={on_response} style={field_style} />
                    </label>
                    <button type="submit" disabled={busy}
                        style="align-self:flex-start; padding:0.6em 1.4em; background:#28a745; color:white; border:none; border-radius:4px; cursor:pointer;">
                        { if busy { "Submitting..." } else { "Submit Feedback" } }
                    </button>
                </form>
                <StatusBanner status={(*status).clone()} />
            </div>
            <div style="margin-top:2em;">
                <h2>{ "Existing Feedback" }</h2>
                <ProcessingBanner state={if loading.is_loading() { ProcessingState::Loading } else { ProcessingState::Idle }}
                    loading_text="Loading feedback..." />
                { entries }
            </div>
        </div>
    }
}

fn feedback_card(
    item: &Feedback,
    busy: bool,
    on_toggle: Callback<(i64, bool)>,
    on_delete: Callback<i64>,
) -> Html {
    let id = item.id;
    let next_state = !item.is_active;
    let (badge, badge_color) = if item.is_active {
        ("Active", "#28a745")
    } else {
        ("Inactive", "#6c757d")
    };
    html! {
        <div key={id} style="background:white; border:1px solid #ddd; border-radius:6px; padding:1em;">
            <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:0.6em;">
                <div style="display:flex; gap:0.8em; align-items:center; font-size:0.9em; color:#666;">
                    <span style={format!("background:{badge_color}; color:white; padding:0.1em 0.6em; border-radius:10px; font-size:0.8em;")}>
                        { badge }
                    </span>
                    <span>{ format::date_time(&item.created_at) }</span>
                </div>
                <div style="display:flex; gap:0.5em;">
                    <button onclick={Callback::from(move |_: MouseEvent| on_toggle.emit((id, next_state)))} disabled={busy}
                        style="padding:0.3em 0.9em; border:1px solid #ccc; border-radius:4px; background:white; cursor:pointer;">
                        { toggle_label(item.is_active) }
                    </button>
                    <button onclick={Callback::from(move |_: MouseEvent| on_delete.emit(id))} disabled={busy}
                        style="background:#dc3545; color:white; border:none; padding:0.3em 0.9em; border-radius:4px; cursor:pointer;">
                        { "Delete" }
                    </button>
                </div>
            </div>
            <div style="margin-bottom:0.4em;"><strong>{ "Prompt: " }</strong><span style="white-space:pre-wrap;">{ &item.prompt }</span></div>
            <div><strong>{ "Response: " }</strong><span style="white-space:pre-wrap;">{ &item.response }</span></div>
        </div>
    }
}
