use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::AppContext;
use crate::controller::{ProcessingState, StatusMessage};
use crate::route::Route;

use super::StatusBanner;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            AuthMode::Login => "Login failed",
            AuthMode::Register => "Registration failed",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthPageProps {
    pub mode: AuthMode,
}

#[function_component(AuthPage)]
pub fn auth_page(props: &AuthPageProps) -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };
    let username = use_state(String::new);
    let password = use_state(String::new);
    let processing_state = use_state(ProcessingState::default);

    let on_username = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            username.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            password.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let ctx = ctx.clone();
        let mode = props.mode;
        let username = username.clone();
        let password = password.clone();
        let processing_state = processing_state.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(loading) = processing_state.begin() else {
                return;
            };
            processing_state.set(loading);

            let ctx = ctx.clone();
            let user = (*username).clone();
            let pass = (*password).clone();
            let processing_state = processing_state.clone();
            spawn_local(async move {
                let result = match mode {
                    AuthMode::Login => ctx.client.login(&user, &pass).await,
                    AuthMode::Register => ctx.client.register(&user, &pass).await,
                };
                match result {
                    Ok(()) => {
                        processing_state.set(ProcessingState::Success);
                        match mode {
                            AuthMode::Login => {
                                ctx.auth_changed.emit(());
                                ctx.navigate.emit(Route::Home);
                            }
                            AuthMode::Register => ctx.navigate.emit(Route::Login),
                        }
                    }
                    Err(error) => {
                        processing_state.set(ProcessingState::Error(error.message_or(mode.fallback())));
                    }
                }
            });
        })
    };

    let loading = processing_state.is_loading();
    let status = processing_state.error().map(StatusMessage::error);
    let input_style = "width:100%; padding:0.6em; border:1px solid #ccc; border-radius:4px; box-sizing:border-box;";

    html! {
        <div style="max-width:380px; margin:3em auto; padding:2em; background:white; border:1px solid #ddd; border-radius:8px;">
            <h1 style="margin-top:0; color:#333;">{ props.mode.title() }</h1>
            <form onsubmit={on_submit} style="display:flex; flex-direction:column; gap:1em;">
                <label style="font-weight:bold; color:#555;">{ "Username" }
                    <input type="text" value={(*username).clone()} oninput={on_username} style={input_style} />
                </label>
                <label style="font-weight:bold; color:#555;">{ "Password" }
                    <input type="password" value={(*password).clone()} oninput={on_password} style={input_style} />
                </label>
                <button type="submit" disabled={loading}
                    style="padding:0.7em 0; font-size:1em; background:#007bff; color:white; border:none; border-radius:4px; cursor:pointer;">
                    { if loading { "Please wait..." } else { props.mode.title() } }
                </button>
            </form>
            <StatusBanner {status} />
        </div>
    }
}
