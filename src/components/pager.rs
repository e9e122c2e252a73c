use yew::prelude::*;

use crate::pagination::Pagination;

#[derive(Properties, PartialEq)]
pub struct PagerProps {
    pub pagination: Pagination,
    pub on_page: Callback<u32>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Previous/Next controls; hidden for single-page collections.
#[function_component(Pager)]
pub fn pager(props: &PagerProps) -> Html {
    let pagination = props.pagination;
    if !pagination.shows_controls() {
        return html! {};
    }

    let on_prev = {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = pagination.prev_page() {
                on_page.emit(page);
            }
        })
    };
    let on_next = {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = pagination.next_page() {
                on_page.emit(page);
            }
        })
    };

    let button_style = "padding:0.5em 1.2em; border:1px solid #ccc; border-radius:4px; background:white; cursor:pointer;";
    html! {
        <div style="display:flex; justify-content:center; align-items:center; gap:1em; margin:1.5em 0;">
            <button onclick={on_prev} disabled={props.disabled || !pagination.has_prev} style={button_style}>
                { "Previous" }
            </button>
            <span style="color:#555;">{ pagination.label() }</span>
            <button onclick={on_next} disabled={props.disabled || !pagination.has_next} style={button_style}>
                { "Next" }
            </button>
        </div>
    }
}
