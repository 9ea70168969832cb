use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::context::PlayerState;

/// The persistent bar at the edge of every page showing whatever the play
/// buttons last loaded. Renders nothing until something has been played.
#[function_component(PlayerBar)]
pub fn player_bar() -> Html {
    let (player, dispatch) = use_store::<PlayerState>();

    let toggle_playback = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.reduce_mut(PlayerState::toggle_playback);
        })
    };

    let Some(episode) = player.current.clone() else {
        return html! {};
    };

    let toggle_label = if player.playing { "Pausar" } else { "Tocar" };

    html! {
        <div class="player-bar">
            <img src={episode.thumbnail.clone()} alt={episode.title.clone()} class="player-thumbnail" />
            <div class="player-details">
                <strong class="player-title">{ &episode.title }</strong>
                <span class="player-members">{ &episode.members }</span>
                <span class="player-duration">{ &episode.duration_as_string }</span>
            </div>
            <button type="button" class="player-toggle" onclick={toggle_playback}>
                { toggle_label }
            </button>
        </div>
    }
}
