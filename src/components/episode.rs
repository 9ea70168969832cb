use chrono::Utc;
use yew::prelude::*;
use yew_router::history::{BrowserHistory, History};
use yewdux::prelude::*;

use crate::components::context::{EpisodePages, PageStatus, PlayerState};
use crate::components::player::PlayerBar;
use crate::components::safehtml::SafeHtml;
use crate::error::EpisodeError;
use crate::requests::episode_req::{call_get_episode_props, ApiClient};

#[derive(Clone, Properties, PartialEq)]
pub struct EpisodeProps {
    pub slug: String,
}

#[function_component(EpisodePage)]
pub fn episode_page(props: &EpisodeProps) -> Html {
    let (pages, pages_dispatch) = use_store::<EpisodePages>();
    let (_player, player_dispatch) = use_store::<PlayerState>();
    let generation_error = use_state(|| None::<EpisodeError>);

    // Resolve the slug against the generated pages when the route mounts.
    // Fresh entries render as-is, stale entries keep rendering while a
    // rebuild runs, and a miss blocks on its first build.
    {
        let pages = pages.clone();
        let pages_dispatch = pages_dispatch.clone();
        let generation_error = generation_error.clone();

        use_effect_with(props.slug.clone(), move |slug| {
            let slug = slug.clone();
            match pages.lookup(&slug, Utc::now()) {
                PageStatus::Fresh(_) => {}
                PageStatus::Stale(_) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        let api = ApiClient::default();
                        match call_get_episode_props(&api, &slug).await {
                            Ok(episode) => {
                                pages_dispatch
                                    .reduce_mut(move |pages| pages.insert(episode, Utc::now()));
                            }
                            Err(e) => {
                                // The page already on screen keeps serving.
                                log::warn!("Regenerating episode {} failed: {}", slug, e);
                            }
                        }
                    });
                }
                PageStatus::Missing => {
                    generation_error.set(None);
                    wasm_bindgen_futures::spawn_local(async move {
                        let api = ApiClient::default();
                        match call_get_episode_props(&api, &slug).await {
                            Ok(episode) => {
                                pages_dispatch
                                    .reduce_mut(move |pages| pages.insert(episode, Utc::now()));
                            }
                            Err(e) => {
                                log::error!("Generating episode {} failed: {}", slug, e);
                                generation_error.set(Some(e));
                            }
                        }
                    });
                }
            }

            || ()
        });
    }

    // Document title follows the generated page.
    {
        let title = pages
            .get(&props.slug)
            .map(|entry| entry.episode.title.clone());
        use_effect_with(title, move |title| {
            if let Some(title) = title {
                gloo_utils::document().set_title(&format!("{} | Podcastr", title));
            }
            || ()
        });
    }

    let on_back_click = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        let history = BrowserHistory::new();
        history.push("/");
    });

    let episode = pages.get(&props.slug).map(|entry| entry.episode.clone());

    html! {
        <div class="main-container">
            {
                if let Some(episode) = episode {
                    let on_play_click = {
                        let player_dispatch = player_dispatch.clone();
                        let episode_for_closure = episode.clone();
                        Callback::from(move |_: MouseEvent| {
                            let episode = episode_for_closure.clone();
                            player_dispatch.reduce_mut(move |player| player.play(episode));
                        })
                    };

                    html! {
                        <div class="episode-layout-container">
                            <div class="episode-thumbnail-container">
                                <button type="button" class="back-button" onclick={on_back_click} title="Voltar">
                                    <i class="ph ph-arrow-left"></i>
                                </button>
                                <img src={episode.thumbnail.clone()} alt={episode.title.clone()} class="episode-thumbnail" />
                                <button type="button" class="play-button" onclick={on_play_click} title="Tocar episódio">
                                    <i class="ph ph-play"></i>
                                </button>
                            </div>
                            <header class="episode-header">
                                <h1 class="episode-title">{ &episode.title }</h1>
                                <span class="episode-members">{ &episode.members }</span>
                                <span class="episode-release-date">{ &episode.published_at }</span>
                                <span class="episode-duration">{ &episode.duration_as_string }</span>
                                <button type="button" class="like-button" title="Gostei">
                                    <i class="ph ph-heart"></i>
                                </button>
                            </header>
                            <div class="episode-single-desc episode-description">
                                <div class="item_container-text episode-description-container">
                                    <SafeHtml html={episode.description.clone()} />
                                </div>
                            </div>
                        </div>
                    }
                } else if let Some(error) = (*generation_error).clone() {
                    html! {
                        <div class="error-snackbar">{ format!("Não foi possível montar a página do episódio: {}", error) }</div>
                    }
                } else {
                    html! {
                        <div class="loading-animation">
                            <div class="frame1"></div>
                            <div class="frame2"></div>
                            <div class="frame3"></div>
                            <div class="frame4"></div>
                            <div class="frame5"></div>
                            <div class="frame6"></div>
                        </div>
                    }
                }
            }
            <PlayerBar />
        </div>
    }
}
