use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::api::{ApiClient, GlooTransport};
use crate::components::{
    AuthMode, AuthPage, ChatPage, DocumentsPage, FeedbackPage, HomePage, LlmLogsPage, Navbar,
    PrivacyPage,
};
use crate::config::Config;
use crate::route::Route;
use crate::session::{LocalStorage, SessionStore};

pub type WebClient = ApiClient<GlooTransport, LocalStorage>;

/// Provided to every page through a `ContextProvider`. `auth_revision` changes
/// on login and logout so consumers that depend on the session re-render.
#[derive(Clone)]
pub struct AppContext {
    pub client: Rc<WebClient>,
    pub auth_revision: u32,
    pub auth_changed: Callback<()>,
    pub navigate: Callback<Route>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
            && self.auth_revision == other.auth_revision
            && self.auth_changed == other.auth_changed
            && self.navigate == other.navigate
    }
}

impl AppContext {
    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }
}

fn build_client(config: Config) -> WebClient {
    let session = SessionStore::restore(LocalStorage, config.storage_key.clone());
    ApiClient::new(GlooTransport, session, config)
}

fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Home)
}

fn push_history(route: Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    if history
        .push_state_with_url(&JsValue::NULL, "", Some(route.to_path()))
        .is_err()
    {
        log::warn!("failed to push {} onto browser history", route.to_path());
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Config,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let client = {
        let config = props.config.clone();
        use_memo((), move |_| build_client(config))
    };
    let route = use_state(current_route);
    let auth_revision = use_state(|| 0u32);

    // Keep the route in step with back/forward navigation.
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let listener = Closure::<dyn Fn()>::new(move || route.set(current_route()));
            if let Some(window) = window.as_ref() {
                let _ = window
                    .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
            }
            move || {
                if let Some(window) = window.as_ref() {
                    let _ = window.remove_event_listener_with_callback(
                        "popstate",
                        listener.as_ref().unchecked_ref(),
                    );
                }
                drop(listener);
            }
        });
    }

    let navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            push_history(next);
            route.set(next);
        })
    };

    let auth_changed = {
        let auth_revision = auth_revision.clone();
        Callback::from(move |_| auth_revision.set(auth_revision.wrapping_add(1)))
    };

    let ctx = AppContext {
        client,
        auth_revision: *auth_revision,
        auth_changed,
        navigate,
    };

    let page = match *route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <AuthPage mode={AuthMode::Login} /> },
        Route::Register => html! { <AuthPage mode={AuthMode::Register} /> },
        Route::Documents => html! { <DocumentsPage /> },
        Route::Chat => html! { <ChatPage /> },
        Route::LlmLogs => html! { <LlmLogsPage /> },
        Route::Feedback => html! { <FeedbackPage /> },
        Route::Privacy => html! { <PrivacyPage /> },
        Route::NotFound => html! {
            <div style="padding:3em; text-align:center; color:#888;">
                <h2>{ "Page not found" }</h2>
            </div>
        },
    };

    html! {
        <ContextProvider<AppContext> context={ctx}>
            <div style="min-height:100vh; font-family:Arial,sans-serif; background:#f8f9fa;">
                <Navbar current={*route} />
                <main style="max-width:1000px; margin:0 auto; padding:1.5em;">
                    { page }
                </main>
            </div>
        </ContextProvider<AppContext>>
    }
}
