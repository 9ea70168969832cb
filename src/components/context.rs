use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use yewdux::prelude::*;

use crate::requests::episode_req::Episode;

/// How long a generated episode page keeps serving before a visit triggers
/// regeneration. Matches the show's daily publishing cadence.
pub const REVALIDATE_SECONDS: i64 = 60 * 60 * 24;

/// What the player is carrying right now. Every play control in the app
/// writes here, and the playback bar only reads it.
#[derive(Default, Clone, PartialEq, Store)]
pub struct PlayerState {
    pub current: Option<Episode>,
    pub playing: bool,
}

impl PlayerState {
    /// Swaps in a whole episode and starts it. Repeated plays of episodes
    /// that are already loaded go through here too; the last caller wins.
    pub fn play(&mut self, episode: Episode) {
        self.current = Some(episode);
        self.playing = true;
    }

    pub fn toggle_playback(&mut self) {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
    }
}

/// A generated episode page plus the moment it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    pub episode: Episode,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of resolving a slug against the generated pages.
#[derive(Debug, PartialEq)]
pub enum PageStatus<'a> {
    /// Inside the revalidation window; serve as-is.
    Fresh(&'a PageEntry),
    /// Past the window; serve while a regeneration runs.
    Stale(&'a PageEntry),
    /// Never generated; the visitor waits for a blocking build.
    Missing,
}

/// Every episode page generated so far, keyed by slug. Seeded at startup
/// with the newest episodes and grown on demand after that.
#[derive(Default, Clone, PartialEq, Store)]
pub struct EpisodePages {
    pub entries: HashMap<String, PageEntry>,
}

impl EpisodePages {
    pub fn lookup(&self, slug: &str, now: DateTime<Utc>) -> PageStatus<'_> {
        match self.entries.get(slug) {
            None => PageStatus::Missing,
            Some(entry) if now - entry.generated_at >= Duration::seconds(REVALIDATE_SECONDS) => {
                PageStatus::Stale(entry)
            }
            Some(entry) => PageStatus::Fresh(entry),
        }
    }

    /// Stores a freshly generated page. A failed regeneration never reaches
    /// this point, so the previous entry keeps serving.
    pub fn insert(&mut self, episode: Episode, generated_at: DateTime<Utc>) {
        self.entries.insert(
            episode.id.clone(),
            PageEntry {
                episode,
                generated_at,
            },
        );
    }

    pub fn get(&self, slug: &str) -> Option<&PageEntry> {
        self.entries.get(slug)
    }
}
