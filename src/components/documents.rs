use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::controller::{PendingRows, ProcessingState, RowEvent, StatusMessage};
use crate::documents::{
    build_query, build_upload, parse_top_k, DELETE_CONFIRM, privacy_badge, reduce, similarity_percent,
    upload_failure, SearchEvent, SearchState, DEFAULT_TOP_K, TOP_K_CHOICES, UPLOAD_SUCCESS,
};
use crate::error::ApiError;
use crate::format;
use crate::types::{display_value, DocumentResult};

use super::{confirm, ProcessingBanner, StatusBanner};

impl Reducible for SearchState {
    type Action = SearchEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(reduce((*self).clone(), action))
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Upload,
    Search,
}

const FIELD_STYLE: &str =
    "width:100%; padding:0.6em; border:1px solid #ccc; border-radius:4px; box-sizing:border-box;";

#[function_component(DocumentsPage)]
pub fn documents_page() -> Html {
    let tab = use_state(|| Tab::Upload);

    let tab_button = |target: Tab, title: &'static str| {
        let tab = tab.clone();
        let active = *tab == target;
        let style = if active {
            "padding:0.6em 1.4em; border:none; border-bottom:3px solid #007bff; background:none; font-weight:bold; cursor:pointer;"
        } else {
            "padding:0.6em 1.4em; border:none; border-bottom:3px solid transparent; background:none; color:#666; cursor:pointer;"
        };
        html! {
            <button onclick={Callback::from(move |_: MouseEvent| tab.set(target))} {style}>{ title }</button>
        }
    };

    html! {
        <div>
            <h1 style="color:#333;">{ "Document Management" }</h1>
            <div style="display:flex; gap:0.5em; border-bottom:1px solid #ddd; margin-bottom:1.5em;">
                { tab_button(Tab::Upload, "Upload Document") }
                { tab_button(Tab::Search, "Search Documents") }
            </div>
            { match *tab {
                Tab::Upload => html! { <UploadPanel /> },
                Tab::Search => html! { <SearchPanel /> },
            }}
        </div>
    }
}

#[function_component(UploadPanel)]
fn upload_panel() -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let content = use_state(String::new);
    let metadata = use_state(String::new);
    let is_private = use_state(|| false);
    let uploading = use_state(ProcessingState::default);
    let status = use_state(|| None::<StatusMessage>);

    let on_content = {
        let content = content.clone();
        Callback::from(move |event: InputEvent| {
            content.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_metadata = {
        let metadata = metadata.clone();
        Callback::from(move |event: InputEvent| {
            metadata.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_private = {
        let is_private = is_private.clone();
        Callback::from(move |event: Event| {
            is_private.set(event.target_unchecked_into::<HtmlInputElement>().checked());
        })
    };

    let on_submit = {
        let client = ctx.client.clone();
        let content = content.clone();
        let metadata = metadata.clone();
        let is_private = is_private.clone();
        let uploading = uploading.clone();
        let status = status.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let upload = match build_upload(&content, &metadata, *is_private) {
                Ok(upload) => upload,
                Err(invalid) => {
                    status.set(Some(StatusMessage::error(upload_failure(&ApiError::from(invalid)))));
                    return;
                }
            };
            let Some(next) = uploading.begin() else {
                return;
            };
            uploading.set(next);
            status.set(None);

            let client = client.clone();
            let content = content.clone();
            let metadata = metadata.clone();
            let is_private = is_private.clone();
            let uploading = uploading.clone();
            let status = status.clone();
            spawn_local(async move {
                match client.upload_document(&upload).await {
                    Ok(()) => {
                        content.set(String::new());
                        metadata.set(String::new());
                        is_private.set(false);
                        status.set(Some(StatusMessage::success(UPLOAD_SUCCESS)));
                        uploading.set(ProcessingState::Success);
                    }
                    Err(error) => {
                        log::error!("document upload failed: {error}");
                        let text = upload_failure(&error);
                        status.set(Some(StatusMessage::error(text.clone())));
                        uploading.set(ProcessingState::Error(text));
                    }
                }
            });
        })
    };

    let busy = uploading.is_loading();
    html! {
        <div style="background:white; border:1px solid #ddd; border-radius:8px; padding:1.5em;">
            <form onsubmit={on_submit} style="display:flex; flex-direction:column; gap:1em;">
                <label style="font-weight:bold; color:#555;">{ "Document Content" }
                    <textarea rows="8" placeholder="Enter the document text..."
                        value={(*content).clone()} oninput={on_content} style={FIELD_STYLE} />
                </label>
                <label style="font-weight:bold; color:#555;">{ "Metadata (JSON, optional)" }
                    <textarea rows="3" placeholder={r#"{"title": "Quarterly report", "category": "finance"}"#}
                        value={(*metadata).clone()} oninput={on_metadata}
                        style={format!("{FIELD_STYLE} font-family:monospace;")} />
                </label>
                <label style="display:flex; align-items:center; gap:0.4em; color:#555;">
                    <input type="checkbox" checked={*is_private} onchange={on_private} />
                    <span>{ "Private Document" }</span>
                </label>
                <button type="submit" disabled={busy}
                    style="align-self:flex-start; padding:0.6em 1.4em; background:#28a745; color:white; border:none; border-radius:4px; cursor:pointer;">
                    { if busy { "Uploading..." } else { "Upload Document" } }
                </button>
            </form>
            <StatusBanner status={(*status).clone()} />
        </div>
    }
}

#[function_component(SearchPanel)]
fn search_panel() -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let query = use_state(String::new);
    let top_k = use_state(|| DEFAULT_TOP_K);
    let include_private = use_state(|| true);
    let searching = use_state(ProcessingState::default);
    let search = use_reducer(SearchState::default);
    let deleting = use_reducer(PendingRows::default);

    let on_query = {
        let query = query.clone();
        Callback::from(move |event: InputEvent| {
            query.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_top_k = {
        let top_k = top_k.clone();
        Callback::from(move |event: Event| {
            top_k.set(parse_top_k(&event.target_unchecked_into::<HtmlSelectElement>().value()));
        })
    };
    let on_include_private = {
        let include_private = include_private.clone();
        Callback::from(move |event: Event| {
            include_private.set(event.target_unchecked_into::<HtmlInputElement>().checked());
        })
    };

    let on_search = {
        let client = ctx.client.clone();
        let query = query.clone();
        let top_k = top_k.clone();
        let include_private = include_private.clone();
        let searching = searching.clone();
        let search = search.dispatcher();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = match build_query(&query, *include_private, *top_k) {
                Ok(request) => request,
                Err(invalid) => {
                    search.dispatch(SearchEvent::SearchFailed(invalid.into()));
                    return;
                }
            };
            let Some(next) = searching.begin() else {
                return;
            };
            searching.set(next);
            search.dispatch(SearchEvent::Started);

            let client = client.clone();
            let searching = searching.clone();
            let search = search.clone();
            spawn_local(async move {
                match client.search_documents(&request).await {
                    Ok(response) => {
                        searching.set(ProcessingState::Success);
                        search.dispatch(SearchEvent::Found(response));
                    }
                    Err(error) => {
                        log::error!("document search failed: {error}");
                        searching.set(ProcessingState::Idle);
                        search.dispatch(SearchEvent::SearchFailed(error));
                    }
                }
            });
        })
    };

    let on_delete = {
        let client = ctx.client.clone();
        let search = search.dispatcher();
        let deleting = deleting.clone();
        Callback::from(move |id: i64| {
            if deleting.is_pending(id) || !confirm(DELETE_CONFIRM) {
                return;
            }
            let Some(started) = deleting.begin(id) else {
                return;
            };
            deleting.dispatch(started);
            search.dispatch(SearchEvent::DeleteStarted);

            let client = client.clone();
            let search = search.clone();
            let deleting = deleting.dispatcher();
            spawn_local(async move {
                let result = client.delete_document(id).await;
                deleting.dispatch(RowEvent::Finished(id));
                match result {
                    Ok(()) => search.dispatch(SearchEvent::Deleted(id)),
                    Err(error) => {
                        log::error!("failed to delete document {id}: {error}");
                        search.dispatch(SearchEvent::DeleteFailed(error));
                    }
                }
            });
        })
    };

    html! {
        <div>
            <div style="background:white; border:1px solid #ddd; border-radius:8px; padding:1.5em;">
                <form onsubmit={on_search} style="display:flex; flex-direction:column; gap:1em;">
                    <input type="text" placeholder="Search documents by meaning..."
                        value={(*query).clone()} oninput={on_query} style={FIELD_STYLE} />
                    <div style="display:flex; gap:1.5em; align-items:center; flex-wrap:wrap;">
                        <label style="color:#555;">{ "Results: " }
                            <select onchange={on_top_k}>
                                { for TOP_K_CHOICES.iter().map(|choice| html! {
                                    <option value={choice.to_string()} selected={*choice == *top_k}>{ choice.to_string() }</option>
                                }) }
                            </select>
                        </label>
                        <label style="display:flex; align-items:center; gap:0.4em; color:#555;">
                            <input type="checkbox" checked={*include_private} onchange={on_include_private} />
                            <span>{ "Include private documents" }</span>
                        </label>
                        <button type="submit" disabled={searching.is_loading()}
                            style="padding:0.6em 1.4em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;">
                            { "Search" }
                        </button>
                    </div>
                </form>
                <StatusBanner status={search.status.clone()} />
            </div>
            <ProcessingBanner state={(*searching).clone()} loading_text="Searching documents..." />
            <div style="display:flex; flex-direction:column; gap:1em; margin-top:1.5em;">
                { for search.results.iter().map(|doc| result_card(doc, deleting.is_pending(doc.id), on_delete.clone())) }
            </div>
        </div>
    }
}

fn result_card(doc: &DocumentResult, busy: bool, on_delete: Callback<i64>) -> Html {
    let id = doc.id;
    let badge_color = if doc.is_private { "#fd7e14" } else { "#28a745" };
    html! {
        <div key={id} style="background:white; border:1px solid #ddd; border-radius:6px; padding:1em;">
            <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:0.5em;">
                <div style="display:flex; gap:0.8em; align-items:center; font-size:0.9em; color:#666;">
                    <strong style="color:#007bff;">{ format!("Similarity: {}", similarity_percent(doc.similarity_score)) }</strong>
                    <span style={format!("background:{badge_color}; color:white; padding:0.1em 0.6em; border-radius:10px; font-size:0.8em;")}>
                        { privacy_badge(doc.is_private) }
                    </span>
                    { for doc.author.as_ref().map(|author| html! { <span>{ format!("by {author}") }</span> }) }
                    { for doc.created_at.as_ref().map(|created| html! { <span>{ format::date(created) }</span> }) }
                </div>
                <button onclick={Callback::from(move |_: MouseEvent| on_delete.emit(id))} disabled={busy}
                    style="background:#dc3545; color:white; border:none; padding:0.3em 0.9em; border-radius:4px; cursor:pointer;">
                    { if busy { "Deleting..." } else { "Delete" } }
                </button>
            </div>
            <div style="white-space:pre-wrap;">{ &doc.content }</div>
            { for doc.metadata.as_ref().filter(|meta| !meta.is_null()).map(|meta| html! {
                <pre style="margin-top:0.75em; background:#f8f9fa; padding:0.5em; border-radius:4px; font-size:0.85em; overflow-x:auto;">
                    { display_value(meta) }
                </pre>
            }) }
        </div>
    }
}
