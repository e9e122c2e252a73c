use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::privacy::{resolve, text_blocks, ResolvedStatement, TextBlock};

fn render_block(block: &TextBlock) -> Html {
    match block {
        TextBlock::Heading(text) => html! { <h2 style="color:#333;">{ text }</h2> },
        TextBlock::Paragraph(text) => html! { <p style="line-height:1.6; color:#444;">{ text }</p> },
    }
}

#[function_component(PrivacyPage)]
pub fn privacy_page() -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let statement = use_state(|| None::<ResolvedStatement>);

    {
        let client = ctx.client.clone();
        let statement = statement.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let resolved = resolve(client.privacy_statement().await);
                statement.set(Some(resolved));
            });
            || ()
        });
    }

    let body = match &*statement {
        None => html! { <div style="color:#888;">{ "Loading privacy statement..." }</div> },
        Some(resolved) => html! {
            <>
                { for resolved.error.map(|error| html! {
                    <div style="margin-bottom:1em; padding:0.75em 1em; background:#f8d7da; border:1px solid #f5c6cb; color:#721c24; border-radius:4px;">
                        { error }
                    </div>
                }) }
                { for text_blocks(&resolved.html).iter().map(render_block) }
            </>
        },
    };

    html! {
        <div style="background:white; border:1px solid #ddd; border-radius:8px; padding:2em;">
            { body }
        </div>
    }
}
