//! Favorite teams
//!
//! Favorites are kept with a snapshot of each team's detail so the favorites
//! screen works without the network. The record has no expiry. Storage
//! failures are logged and the in-memory list stays authoritative.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::TeamDetail;
use crate::cache::{Clock, Storage, SystemClock};
use crate::store::Store;

/// Storage key for the favorites record
pub const FAVORITES_KEY: &str = "footballFavorites";

/// Snapshot of a favorite team's detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedTeamDetail {
    pub data: TeamDetail,
    /// When the team was added to favorites (Unix milliseconds)
    pub cached_at: i64,
    /// When `data` was last refreshed (Unix milliseconds)
    pub last_fetched: i64,
}

/// Persisted favorites record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesCache {
    #[serde(default)]
    pub teams: BTreeMap<i64, CachedTeamDetail>,
    /// Favorite ids in the order they were added
    #[serde(default)]
    pub favorite_ids: Vec<i64>,
    #[serde(default)]
    pub last_updated: i64,
}

/// The user's favorite teams, persisted through a [`Storage`]
pub struct Favorites<S, C = SystemClock> {
    storage: S,
    clock: C,
    state: Store<FavoritesCache>,
}

impl<S: Storage> Favorites<S> {
    pub fn load(storage: S) -> Self {
        Self::load_with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> Favorites<S, C> {
    /// Reads the stored record, starting empty if it is missing or unreadable
    pub fn load_with_clock(storage: S, clock: C) -> Self {
        let record = match storage.get_item(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "failed to parse favorites, starting empty");
                FavoritesCache::default()
            }),
            Ok(None) => FavoritesCache::default(),
            Err(e) => {
                warn!(error = %e, "failed to read favorites, starting empty");
                FavoritesCache::default()
            }
        };

        Self {
            storage,
            clock,
            state: Store::new(record),
        }
    }

    /// The favorites record, for subscribing
    pub fn store(&self) -> &Store<FavoritesCache> {
        &self.state
    }

    pub fn ids(&self) -> Vec<i64> {
        self.state.get_current().favorite_ids
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.state.get_current().favorite_ids.contains(&id)
    }

    /// Favorite teams in the order they were added
    pub fn teams(&self) -> Vec<TeamDetail> {
        let record = self.state.get_current();
        record
            .favorite_ids
            .iter()
            .filter_map(|id| record.teams.get(id).map(|cached| cached.data.clone()))
            .collect()
    }

    /// Adds `detail` to favorites, or removes it if already present
    ///
    /// Returns whether the team is a favorite afterwards.
    pub fn toggle(&self, detail: &TeamDetail) -> bool {
        if self.is_favorite(detail.id) {
            self.remove(detail.id);
            false
        } else {
            self.add(detail);
            true
        }
    }

    /// Adds or refreshes a favorite
    pub fn add(&self, detail: &TeamDetail) {
        let now = self.clock.now_millis();
        let mut record = self.state.get_current();

        let cached_at = record
            .teams
            .get(&detail.id)
            .map(|existing| existing.cached_at)
            .unwrap_or(now);
        record.teams.insert(
            detail.id,
            CachedTeamDetail {
                data: detail.clone(),
                cached_at,
                last_fetched: now,
            },
        );
        if !record.favorite_ids.contains(&detail.id) {
            record.favorite_ids.push(detail.id);
        }
        record.last_updated = now;

        self.commit(record);
    }

    pub fn remove(&self, id: i64) {
        let mut record = self.state.get_current();
        record.teams.remove(&id);
        record.favorite_ids.retain(|fav| *fav != id);
        record.last_updated = self.clock.now_millis();

        self.commit(record);
    }

    fn commit(&self, record: FavoritesCache) {
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(FAVORITES_KEY, &json) {
                    warn!(error = %e, "failed to save favorites");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize favorites"),
        }
        self.state.set(record);
    }
}
