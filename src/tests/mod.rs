use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use crate::components::context::{EpisodePages, PageStatus, PlayerState, REVALIDATE_SECONDS};
use crate::components::gen_funcs::{
    convert_duration_to_time_string, format_published_date, parse_published_at,
    parse_published_instant,
};
use crate::error::EpisodeError;
use crate::requests::episode_req::{
    episode_props, latest_episode_slugs, map_episode, ApiClient, Episode, RawEpisode,
};

fn raw_episode_json(id: &str, published_at: &str, duration: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Episode {}", id),
        "thumbnail": format!("https://cdn.example/{}.jpg", id),
        "members": "Diego e Richard",
        "published_at": published_at,
        "file": {
            "url": format!("https://cdn.example/{}.mp3", id),
            "duration": duration
        },
        "description": "<p>Neste episódio…</p>"
    })
}

fn raw_episode(id: &str, published_at: &str, duration: serde_json::Value) -> RawEpisode {
    serde_json::from_value(raw_episode_json(id, published_at, duration)).unwrap()
}

fn sample_episode(id: &str) -> Episode {
    map_episode(raw_episode(id, "2021-01-08T12:00:00.000Z", json!(3723))).unwrap()
}

#[test]
fn test_duration_formatting() {
    assert_eq!(convert_duration_to_time_string(3723), "1:02:03");
    assert_eq!(convert_duration_to_time_string(0), "0:00:00");
    assert_eq!(convert_duration_to_time_string(1200), "0:20:00");
    // Hours never zero pad, minutes and seconds always do.
    assert_eq!(convert_duration_to_time_string(36_005), "10:00:05");
}

#[test]
fn test_mapper_accepts_string_and_numeric_durations() {
    let from_string = map_episode(raw_episode("a", "2021-01-08T12:00:00.000Z", json!("3723")));
    let from_number = map_episode(raw_episode("a", "2021-01-08T12:00:00.000Z", json!(3723)));

    let from_string = from_string.unwrap();
    let from_number = from_number.unwrap();
    assert_eq!(from_string.duration, 3723);
    assert_eq!(from_string.duration_as_string, "1:02:03");
    assert_eq!(from_string, from_number);
}

#[test]
fn test_mapper_is_pure() {
    let raw = raw_episode("a-conversa", "2021-01-08T12:00:00.000Z", json!("3723"));
    let first = map_episode(raw.clone()).unwrap();
    let second = map_episode(raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.duration_as_string,
        convert_duration_to_time_string(first.duration)
    );
}

#[test]
fn test_mapper_passes_fields_through() {
    let episode = sample_episode("a-conversa");
    assert_eq!(episode.id, "a-conversa");
    assert_eq!(episode.title, "Episode a-conversa");
    assert_eq!(episode.members, "Diego e Richard");
    assert_eq!(episode.thumbnail, "https://cdn.example/a-conversa.jpg");
    assert_eq!(episode.url, "https://cdn.example/a-conversa.mp3");
    assert_eq!(episode.description, "<p>Neste episódio…</p>");
}

#[test]
fn test_mapper_rejects_bad_durations() {
    for bad in [json!("abc"), json!(""), json!(-5), json!(12.5), json!(true)] {
        let result = map_episode(raw_episode("a", "2021-01-08T12:00:00.000Z", bad.clone()));
        match result {
            Err(EpisodeError::InvalidDuration { .. }) => {}
            other => panic!("duration {} should be invalid, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_mapper_rejects_bad_dates() {
    let result = map_episode(raw_episode("a", "next tuesday", json!(3723)));
    match result {
        Err(EpisodeError::InvalidDate { value }) => assert_eq!(value, "next tuesday"),
        other => panic!("expected InvalidDate, got {:?}", other),
    }
}

#[test]
fn test_published_date_display() {
    let date = parse_published_at("2021-01-08T12:00:00.000Z").unwrap();
    let display = format_published_date(date);
    assert_eq!(display, "8 jan 21");

    // Every accepted wire shape lands on the same calendar date.
    for raw in [
        "2021-01-08T12:00:00.000Z",
        "2021-01-08T12:00:00",
        "2021-01-08 12:00:00",
        "2021-01-08",
    ] {
        assert_eq!(parse_published_at(raw).unwrap(), date);
    }
}

#[test]
fn test_published_date_has_no_wire_punctuation() {
    let date = parse_published_at("2021-06-01T09:30:00.000Z").unwrap();
    let display = format_published_date(date);
    assert!(!display.is_empty());
    assert!(!display.contains('T'));
    assert!(!display.contains('Z'));
}

#[test]
fn test_latest_slugs_picks_newest_two() {
    // Deliberately misordered fixture; selection goes by published_at.
    let episodes = vec![
        raw_episode("third", "2021-01-06T12:00:00.000Z", json!(60)),
        raw_episode("newest", "2021-01-10T12:00:00.000Z", json!(60)),
        raw_episode("oldest", "2021-01-04T12:00:00.000Z", json!(60)),
        raw_episode("second", "2021-01-08T12:00:00.000Z", json!(60)),
        raw_episode("fourth", "2021-01-05T12:00:00.000Z", json!(60)),
    ];

    let slugs = latest_episode_slugs(&episodes, 2);
    assert_eq!(slugs.len(), 2);
    assert!(slugs.contains(&"newest".to_string()));
    assert!(slugs.contains(&"second".to_string()));
}

#[test]
fn test_latest_slugs_compares_mixed_wire_formats_as_instants() {
    // All on the same day, in the API's three timestamp shapes. Raw string
    // comparison would rank the T-form above the space-form regardless of
    // the actual hour.
    let episodes = vec![
        raw_episode("midnight", "2021-01-10", json!(60)),
        raw_episode("early", "2021-01-10T05:00:00.000Z", json!(60)),
        raw_episode("morning", "2021-01-10 09:00:00", json!(60)),
    ];

    let slugs = latest_episode_slugs(&episodes, 2);
    assert_eq!(slugs.len(), 2);
    assert!(slugs.contains(&"morning".to_string()));
    assert!(slugs.contains(&"early".to_string()));
}

#[test]
fn test_latest_slugs_unparsable_timestamp_sorts_oldest() {
    let episodes = vec![
        raw_episode("broken", "zzzz-later-than-anything", json!(60)),
        raw_episode("newest", "2021-01-10T12:00:00.000Z", json!(60)),
        raw_episode("second", "2021-01-08T12:00:00.000Z", json!(60)),
    ];

    let slugs = latest_episode_slugs(&episodes, 2);
    assert!(slugs.contains(&"newest".to_string()));
    assert!(slugs.contains(&"second".to_string()));
    assert!(!slugs.contains(&"broken".to_string()));
}

#[test]
fn test_published_instant_normalizes_offsets() {
    let offset = parse_published_instant("2021-01-08T22:00:00-03:00").unwrap();
    let utc = parse_published_instant("2021-01-09T01:00:00.000Z").unwrap();
    assert_eq!(offset, utc);
}

#[test]
fn test_home_catalog_fails_closed_on_one_bad_record() {
    // The landing page maps the whole fetch as one Result; a single bad
    // record fails the list with the typed error, never a partial catalog.
    let catalog = vec![
        raw_episode("good-1", "2021-01-10T12:00:00.000Z", json!(60)),
        raw_episode("bad", "2021-01-09T12:00:00.000Z", json!("abc")),
        raw_episode("good-2", "2021-01-08T12:00:00.000Z", json!(60)),
    ];

    let mapped = catalog
        .into_iter()
        .map(map_episode)
        .collect::<Result<Vec<Episode>, EpisodeError>>();
    match mapped {
        Err(EpisodeError::InvalidDuration { value }) => assert_eq!(value, "abc"),
        other => panic!("expected InvalidDuration, got {:?}", other),
    }
}

#[test]
fn test_failed_fetch_yields_no_view_model() {
    let failed = Err(EpisodeError::upstream("connection refused for ep-42"));
    match episode_props(failed) {
        Err(EpisodeError::UpstreamUnavailable { reason }) => {
            assert!(reason.contains("ep-42"));
        }
        other => panic!("expected UpstreamUnavailable, got {:?}", other),
    }
}

#[test]
fn test_wire_decode_fails_closed() {
    // Missing `file` must reject the record, not default it.
    let incomplete = json!({
        "id": "ep-1",
        "title": "Episode",
        "thumbnail": "https://cdn.example/ep-1.jpg",
        "members": "Diego",
        "published_at": "2021-01-08T12:00:00.000Z",
        "description": "<p>oi</p>"
    });
    assert!(serde_json::from_value::<RawEpisode>(incomplete).is_err());

    let complete = raw_episode_json("ep-1", "2021-01-08T12:00:00.000Z", json!("3723"));
    assert!(serde_json::from_value::<RawEpisode>(complete).is_ok());
}

#[test]
fn test_api_urls() {
    let api = ApiClient::new("http://localhost:3333/");
    assert_eq!(
        api.latest_episodes_url(2),
        "http://localhost:3333/episodes?_limit=2&_sort=published_at&_order=desc"
    );
    assert_eq!(
        api.episode_url("a-conversa"),
        "http://localhost:3333/episodes/a-conversa"
    );
    // Slugs are path segments; anything unusual gets percent encoded.
    assert_eq!(
        api.episode_url("ep 42/б"),
        "http://localhost:3333/episodes/ep%2042%2F%D0%B1"
    );
}

#[test]
fn test_page_cache_revalidation_window() {
    let generated_at = Utc.with_ymd_and_hms(2021, 1, 8, 12, 0, 0).unwrap();
    let mut pages = EpisodePages::default();
    pages.insert(sample_episode("a-conversa"), generated_at);

    let just_before = generated_at + Duration::seconds(REVALIDATE_SECONDS - 1);
    match pages.lookup("a-conversa", just_before) {
        PageStatus::Fresh(entry) => assert_eq!(entry.episode.id, "a-conversa"),
        other => panic!("expected Fresh, got {:?}", other),
    }

    let just_after = generated_at + Duration::seconds(REVALIDATE_SECONDS);
    match pages.lookup("a-conversa", just_after) {
        // Stale entries still hand back the cached page.
        PageStatus::Stale(entry) => assert_eq!(entry.episode.id, "a-conversa"),
        other => panic!("expected Stale, got {:?}", other),
    }

    assert_eq!(pages.lookup("unknown", just_before), PageStatus::Missing);
}

#[test]
fn test_page_cache_reinsert_resets_window() {
    let generated_at = Utc.with_ymd_and_hms(2021, 1, 8, 12, 0, 0).unwrap();
    let regenerated_at = generated_at + Duration::seconds(REVALIDATE_SECONDS);
    let mut pages = EpisodePages::default();

    pages.insert(sample_episode("a-conversa"), generated_at);
    pages.insert(sample_episode("a-conversa"), regenerated_at);

    match pages.lookup("a-conversa", regenerated_at + Duration::seconds(1)) {
        PageStatus::Fresh(entry) => assert_eq!(entry.generated_at, regenerated_at),
        other => panic!("expected Fresh after reinsert, got {:?}", other),
    }
}

#[test]
fn test_player_last_writer_wins() {
    let mut player = PlayerState::default();
    assert!(player.current.is_none());

    player.play(sample_episode("first"));
    assert!(player.playing);

    player.play(sample_episode("second"));
    assert_eq!(player.current.as_ref().unwrap().id, "second");
    assert!(player.playing);
}

#[test]
fn test_toggle_playback() {
    let mut player = PlayerState::default();

    // Nothing loaded; toggling stays paused.
    player.toggle_playback();
    assert!(!player.playing);

    player.play(sample_episode("first"));
    player.toggle_playback();
    assert!(!player.playing);
    player.toggle_playback();
    assert!(player.playing);
}
