pub mod api;
pub mod board;
pub mod config;
pub mod controller;
pub mod documents;
pub mod error;
pub mod feedback;
pub mod pagination;
pub mod privacy;
pub mod reasoning;
pub mod route;
pub mod session;
pub mod transcript;
pub mod types;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod format;
#[cfg(target_arch = "wasm32")]
mod logging;

#[cfg(target_arch = "wasm32")]
pub use wasm::run_app;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::app::{App, AppProps};
    use crate::config::Config;

    #[wasm_bindgen(start)]
    pub fn run_app() {
        let config = Config::from_env();
        crate::logging::init(config.log_level);
        log::info!("starting trickster web client against {}", config.backend_url);

        let root = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("root"));
        match root {
            Some(root) => {
                yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
            }
            None => {
                log::warn!("no #root element, mounting on body");
                yew::Renderer::<App>::with_props(AppProps { config }).render();
            }
        }
    }
}
