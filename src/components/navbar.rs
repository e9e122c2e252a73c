use yew::prelude::*;

use crate::app::AppContext;
use crate::route::Route;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub current: Route,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let Some(ctx) = use_context::<AppContext>() else {
        return html! {};
    };

    let link = |route: Route| {
        let navigate = ctx.navigate.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            navigate.emit(route);
        });
        let weight = if props.current == route { "bold" } else { "normal" };
        html! {
            <li>
                <a href={route.to_path()} {onclick} style={format!("color:white; text-decoration:none; font-weight:{weight};")}>
                    { route.title() }
                </a>
            </li>
        }
    };

    let on_logout = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.client.logout();
            ctx.auth_changed.emit(());
            ctx.navigate.emit(Route::Login);
        })
    };

    html! {
        <nav style="display:flex; justify-content:space-between; align-items:center; padding:0.8em 1.5em; background:#4a5568;">
            <a href="/" style="color:white; font-size:1.3em; font-weight:bold; text-decoration:none;"
                onclick={
                    let navigate = ctx.navigate.clone();
                    Callback::from(move |event: MouseEvent| {
                        event.prevent_default();
                        navigate.emit(Route::Home);
                    })
                }>
                { "Trickster" }
            </a>
            <ul style="display:flex; gap:1.2em; list-style:none; margin:0; padding:0; align-items:center;">
                { for Route::NAV.into_iter().map(&link) }
                { if ctx.is_authenticated() {
                    html! {
                        <li>
                            <button onclick={on_logout} style="background:none; border:1px solid white; color:white; padding:0.3em 0.8em; border-radius:4px; cursor:pointer;">
                                { "Logout" }
                            </button>
                        </li>
                    }
                } else {
                    html! {
                        <>
                            { link(Route::Login) }
                            { link(Route::Register) }
                        </>
                    }
                }}
            </ul>
        </nav>
    }
}
