use yew::prelude::*;
use yew_router::history::{BrowserHistory, History};
use yewdux::prelude::*;

use crate::components::context::PlayerState;
use crate::components::player::PlayerBar;
use crate::error::EpisodeError;
use crate::requests::episode_req::{call_get_latest_episodes, map_episode, ApiClient, Episode};

/// How many episodes the landing page asks the API for. The two newest make
/// the featured section and the rest fill the list below it.
const HOME_EPISODE_LIMIT: usize = 12;
const FEATURED_EPISODE_COUNT: usize = 2;

fn episode_row(episode: &Episode, player_dispatch: Dispatch<PlayerState>) -> Html {
    let on_title_click = {
        let slug = episode.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let history = BrowserHistory::new();
            history.push(format!("/episodes/{}", slug));
        })
    };

    let on_play_click = {
        let episode_for_closure = episode.clone();
        Callback::from(move |_: MouseEvent| {
            let episode = episode_for_closure.clone();
            player_dispatch.reduce_mut(move |player| player.play(episode));
        })
    };

    html! {
        <div class="episode-item item-container" key={episode.id.clone()}>
            <img src={episode.thumbnail.clone()} alt={episode.title.clone()} class="episode-item-thumbnail" />
            <div class="episode-item-details item_container-text">
                <a href={format!("/episodes/{}", episode.id)} onclick={on_title_click} class="episode-item-title">
                    { &episode.title }
                </a>
                <p class="episode-item-members">{ &episode.members }</p>
                <span class="episode-item-date">{ &episode.published_at }</span>
                <span class="episode-item-duration">{ &episode.duration_as_string }</span>
            </div>
            <button type="button" class="play-button" onclick={on_play_click} title="Tocar episódio">
                <i class="ph ph-play"></i>
            </button>
        </div>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let episodes = use_state(Vec::<Episode>::new);
    let error = use_state(|| None::<EpisodeError>);
    let loading = use_state(|| true);
    let (_player, player_dispatch) = use_store::<PlayerState>();

    use_effect_with((), move |_| {
        gloo_utils::document().set_title("Home | Podcastr");
        || ()
    });

    // Fetch episodes on component mount. One unmappable record fails the
    // whole list; the landing page never renders a partial catalog.
    {
        let episodes = episodes.clone();
        let error = error.clone();
        let loading = loading.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let api = ApiClient::default();
                match call_get_latest_episodes(&api, HOME_EPISODE_LIMIT).await {
                    Ok(fetched_episodes) => {
                        let mapped = fetched_episodes
                            .into_iter()
                            .map(map_episode)
                            .collect::<Result<Vec<Episode>, _>>();
                        match mapped {
                            Ok(mapped_episodes) => episodes.set(mapped_episodes),
                            Err(e) => {
                                log::error!("Mapping latest episodes failed: {}", e);
                                error.set(Some(e));
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("Fetching latest episodes failed: {}", e);
                        error.set(Some(e));
                    }
                }
                loading.set(false);
            });

            || ()
        });
    }

    let featured: Vec<Episode> = episodes
        .iter()
        .take(FEATURED_EPISODE_COUNT)
        .cloned()
        .collect();
    let remaining: Vec<Episode> = episodes
        .iter()
        .skip(FEATURED_EPISODE_COUNT)
        .cloned()
        .collect();

    html! {
        <div class="main-container">
            {
                if *loading {
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
                } else if let Some(error) = (*error).clone() {
                    html! {
                        <div class="error-snackbar">{ error.to_string() }</div>
                    }
                } else {
                    html! {
                        <>
                            <section class="latest-episodes">
                                <h2>{ "Últimos lançamentos" }</h2>
                                { for featured.iter().map(|episode| episode_row(episode, player_dispatch.clone())) }
                            </section>
                            <section class="all-episodes">
                                <h2>{ "Todos os episódios" }</h2>
                                { for remaining.iter().map(|episode| episode_row(episode, player_dispatch.clone())) }
                            </section>
                        </>
                    }
                }
            }
            <PlayerBar />
        </div>
    }
}
