use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::board::{can_delete, reduce, BoardEvent, BoardState};
use crate::controller::{PendingRows, ProcessingState, RowEvent, StatusMessage};
use crate::format;
use crate::types::NewMessage;

use super::{Pager, StatusBanner};

impl Reducible for BoardState {
    type Action = BoardEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(reduce((*self).clone(), action))
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let per_page = ctx.client.config().page_size;
    let board = use_reducer(move || BoardState::new(per_page));
    let loading = use_state(|| ProcessingState::Loading);
    let posting = use_state(ProcessingState::default);
    let new_message = use_state(String::new);
    let is_private = use_state(|| false);
    let status = use_state(|| None::<StatusMessage>);
    let deleting = use_reducer(PendingRows::default);

    let fetch_messages = {
        let client = ctx.client.clone();
        let board = board.dispatcher();
        let loading = loading.clone();
        let status = status.clone();
        Callback::from(move |page: u32| {
            loading.set(ProcessingState::Loading);
            let client = client.clone();
            let board = board.clone();
            let loading = loading.clone();
            let status = status.clone();
            spawn_local(async move {
                match client.list_messages(page).await {
                    Ok(listing) => {
                        board.dispatch(BoardEvent::PageLoaded(listing));
                        loading.set(ProcessingState::Success);
                    }
                    Err(error) => {
                        log::error!("error fetching messages: {error}");
                        status.set(Some(StatusMessage::error("Failed to load messages")));
                        loading.set(ProcessingState::Error(error.to_string()));
                    }
                }
            });
        })
    };

    {
        let fetch_messages = fetch_messages.clone();
        use_effect_with((), move |_| {
            fetch_messages.emit(1);
            || ()
        });
    }

    let on_input = {
        let new_message = new_message.clone();
        Callback::from(move |event: InputEvent| {
            new_message.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_private = {
        let is_private = is_private.clone();
        Callback::from(move |event: Event| {
            is_private.set(event.target_unchecked_into::<HtmlInputElement>().checked());
        })
    };

    let authenticated = ctx.is_authenticated();
    let on_post = {
        let client = ctx.client.clone();
        let board = board.dispatcher();
        let posting = posting.clone();
        let new_message = new_message.clone();
        let is_private = is_private.clone();
        let status = status.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if !authenticated || new_message.trim().is_empty() {
                return;
            }
            let Some(next) = posting.begin() else {
                return;
            };
            posting.set(next);
            status.set(None);

            let message = NewMessage {
                content: new_message.trim().to_string(),
                is_private: *is_private,
            };
            let client = client.clone();
            let board = board.clone();
            let posting = posting.clone();
            let new_message = new_message.clone();
            let is_private = is_private.clone();
            let status = status.clone();
            spawn_local(async move {
                match client.post_message(&message).await {
                    Ok(posted) => {
                        board.dispatch(BoardEvent::Posted(posted));
                        new_message.set(String::new());
                        is_private.set(false);
                        posting.set(ProcessingState::Success);
                    }
                    Err(error) => {
                        log::error!("error posting message: {error}");
                        let text = error.message_or("Failed to post message");
                        status.set(Some(StatusMessage::error(text.clone())));
                        posting.set(ProcessingState::Error(text));
                    }
                }
            });
        })
    };

    let on_delete = {
        let client = ctx.client.clone();
        let board = board.dispatcher();
        let status = status.clone();
        let deleting = deleting.clone();
        Callback::from(move |id: i64| {
            if !authenticated {
                return;
            }
            let Some(started) = deleting.begin(id) else {
                return;
            };
            deleting.dispatch(started);
            status.set(None);

            let client = client.clone();
            let board = board.clone();
            let status = status.clone();
            let deleting = deleting.dispatcher();
            spawn_local(async move {
                let result = client.delete_message(id).await;
                deleting.dispatch(RowEvent::Finished(id));
                match result {
                    Ok(()) => board.dispatch(BoardEvent::Deleted(id)),
                    Err(error) => {
                        log::error!("error deleting message {id}: {error}");
                        status.set(Some(StatusMessage::error(
                            error.message_or("Failed to delete message"),
                        )));
                    }
                }
            });
        })
    };

    let username = ctx.client.session().username();
    let is_posting = posting.is_loading();
    let post_label = if is_posting {
        "Posting..."
    } else if authenticated {
        "Post Message"
    } else {
        "Login to Post"
    };

    let listing = if loading.is_loading() {
        html! { <div style="color:#888; padding:1em;">{ "Loading messages..." }</div> }
    } else if board.messages.is_empty() {
        html! { <div style="color:#888; padding:1em;">{ "No messages yet. Be the first to post!" }</div> }
    } else {
        html! {
            <>
                <div style="display:flex; flex-direction:column; gap:0.75em;">
                    { for board.messages.iter().map(|message| {
                        let id = message.id;
                        let on_delete = on_delete.clone();
                        let busy = deleting.is_pending(id);
                        html! {
                            <div key={id} style="background:white; border:1px solid #ddd; border-radius:6px; padding:1em;">
                                <div style="display:flex; gap:1em; align-items:center; font-size:0.9em; color:#666; margin-bottom:0.5em;">
                                    <strong style="color:#333;">{ &message.author }</strong>
                                    <span>{ format::date_time(&message.created_at) }</span>
                                    { if message.is_private {
                                        html! { <span style="background:#fd7e14; color:white; padding:0.1em 0.6em; border-radius:10px; font-size:0.8em;">{ "Private" }</span> }
                                    } else {
                                        html! {}
                                    }}
                                </div>
                                <div style="white-space:pre-wrap;">{ &message.content }</div>
                                { if authenticated && can_delete(message, username.as_deref()) {
                                    html! {
                                        <div style="margin-top:0.5em; text-align:right;">
                                            <button onclick={Callback::from(move |_: MouseEvent| on_delete.emit(id))} disabled={busy}
                                                style="background:#dc3545; color:white; border:none; padding:0.3em 0.9em; border-radius:4px; cursor:pointer;">
                                                { if busy { "Deleting..." } else { "Delete" } }
                                            </button>
                                        </div>
                                    }
                                } else {
                                    html! {}
                                }}
                            </div>
                        }
                    }) }
                </div>
                <Pager pagination={board.pagination} on_page={fetch_messages.clone()} disabled={loading.is_loading()} />
            </>
        }
    };

    html! {
        <div>
            <h1 style="color:#333;">{ "Message Dashboard" }</h1>
            <div style="background:white; border:1px solid #ddd; border-radius:8px; padding:1.5em;">
                <h2 style="margin-top:0;">{ "Post a Message" }</h2>
                <form onsubmit={on_post}>
                    <textarea rows="3" placeholder="What's on your mind?"
                        value={(*new_message).clone()} oninput={on_input} disabled={!authenticated}
                        style="width:100%; padding:0.6em; border:1px solid #ccc; border-radius:4px; box-sizing:border-box; resize:vertical;" />
                    <div style="display:flex; justify-content:space-between; align-items:center; margin-top:0.75em;">
                        <label style="display:flex; align-items:center; gap:0.4em; color:#555;">
                            <input type="checkbox" checked={*is_private} onchange={on_private} disabled={!authenticated} />
                            <span>{ "Private Message" }</span>
                        </label>
                        <button type="submit" disabled={!authenticated || new_message.trim().is_empty() || is_posting}
                            style="padding:0.6em 1.4em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;">
                            { post_label }
                        </button>
                    </div>
                </form>
                <StatusBanner status={(*status).clone()} />
            </div>
            <div style="margin-top:2em;">
                <h2>{ "Messages" }</h2>
                { listing }
            </div>
        </div>
    }
}
