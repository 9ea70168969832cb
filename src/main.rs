// Custom Mods
mod components;
mod error;
mod requests;

#[cfg(test)]
mod tests;

use chrono::Utc;
use components::context::EpisodePages;
use components::episode::EpisodePage;
use components::home::Home;
use components::routes::Route;
use requests::episode_req::{
    call_get_episode_props, call_get_latest_episodes, latest_episode_slugs, ApiClient,
    PRERENDERED_EPISODE_COUNT,
};
use yew_router::history::BrowserHistory;
use yew_router::history::History;

// Yew Imports
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    let on_home_click = Callback::from(|e: MouseEvent| {
        e.prevent_default();
        let history = BrowserHistory::new();
        history.push("/");
    });
    html! {
        <div class="not-found-container">
            <div class="not-found-content">
                <div class="not-found-code">
                    <i class="ph ph-warning-circle"></i>
                    <span>{"404"}</span>
                </div>

                <h1>{"Página não encontrada"}</h1>

                <p>{"Esse episódio não existe ou ainda não foi publicado."}</p>

                <button onclick={on_home_click} class="back-home-button">
                    <i class="ph ph-house-line"></i>
                    {"Voltar para a home"}
                </button>

                <img src="/logo.svg" alt="Podcastr" class="not-found-logo" />
            </div>
        </div>
    }
}

/// Builds the pages every visitor gets instantly: the newest episodes are
/// fetched, mapped and stored before any route needs them. An enumeration
/// failure seeds nothing rather than a partial set; a single page failing to
/// build is skipped and left for on-demand generation.
fn seed_prerendered_pages(pages_dispatch: Dispatch<EpisodePages>) {
    wasm_bindgen_futures::spawn_local(async move {
        let api = ApiClient::default();
        let raw_episodes = match call_get_latest_episodes(&api, PRERENDERED_EPISODE_COUNT).await {
            Ok(raw_episodes) => raw_episodes,
            Err(e) => {
                log::error!("Enumerating episode pages failed: {}", e);
                return;
            }
        };

        for slug in latest_episode_slugs(&raw_episodes, PRERENDERED_EPISODE_COUNT) {
            match call_get_episode_props(&api, &slug).await {
                Ok(episode) => {
                    pages_dispatch.reduce_mut(move |pages| pages.insert(episode, Utc::now()));
                }
                Err(e) => log::error!("Pre-rendering episode {} failed: {}", slug, e),
            }
        }
    });
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Episode { slug } => html! { <EpisodePage slug={slug.clone()} /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(Main)]
fn main_component() -> Html {
    let (_pages, pages_dispatch) = use_store::<EpisodePages>();

    use_effect_with((), move |_| {
        seed_prerendered_pages(pages_dispatch);
        || ()
    });

    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    yew::Renderer::<Main>::new().render();
}
