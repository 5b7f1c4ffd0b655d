//! Cache-first access to team data
//!
//! Reads go to the expiring cache before the network. A fresh fetch is written
//! back to the cache; a failed fetch falls back to whatever the cache still
//! holds and only errors when it holds nothing.
//!
//! Concurrent calls are not coalesced: two overlapping misses each issue a
//! request, and the last write to the cache wins.

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::client::{ApiRequest, Deployment, Fetch, FetchError};
use super::{Team, TeamDetail, TeamsResponse};
use crate::cache::{Clock, ExpiringCache, Storage, SystemClock};
use crate::store::Store;

/// Cache key for the team list
pub const TEAMS_CACHE_KEY: &str = "footballTeamsCache";

/// Cache key for one team's detail record
pub fn team_detail_key(id: i64) -> String {
    format!("footballTeamDetail_{}", id)
}

/// Fetches teams through the cache and publishes the list to a store
pub struct TeamsDataService<F, S, C = SystemClock> {
    fetcher: F,
    deployment: Deployment,
    cache: ExpiringCache<S, C>,
    teams: Store<Vec<Team>>,
}

impl<F, S, C> TeamsDataService<F, S, C>
where
    F: Fetch,
    S: Storage,
    C: Clock,
{
    pub fn new(fetcher: F, deployment: Deployment, cache: ExpiringCache<S, C>) -> Self {
        Self {
            fetcher,
            deployment,
            cache,
            teams: Store::new(Vec::new()),
        }
    }

    /// The most recently published team list
    pub fn teams(&self) -> &Store<Vec<Team>> {
        &self.teams
    }

    pub fn cache(&self) -> &ExpiringCache<S, C> {
        &self.cache
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Returns the team list, from cache when possible
    ///
    /// With `force_refresh` the cache is skipped for the first read but still
    /// used as a fallback if the fetch fails.
    pub async fn get_teams(&self, force_refresh: bool) -> Result<Vec<Team>, FetchError> {
        if !force_refresh {
            if let Some(teams) = self.cache.get::<Vec<Team>>(TEAMS_CACHE_KEY) {
                debug!(count = teams.len(), "teams served from cache");
                self.teams.set(teams.clone());
                return Ok(teams);
            }
        }

        let request = self.deployment.teams_request();
        match self.fetch_json::<TeamsResponse>(&request).await {
            Ok(response) => {
                let teams = response.teams;
                self.cache.set(TEAMS_CACHE_KEY, &teams);
                self.teams.set(teams.clone());
                Ok(teams)
            }
            Err(e) => {
                error!(error = %e, url = %request.url, "error fetching teams");
                match self.cache.get::<Vec<Team>>(TEAMS_CACHE_KEY) {
                    Some(teams) => {
                        warn!(count = teams.len(), "serving cached teams after fetch failure");
                        self.teams.set(teams.clone());
                        Ok(teams)
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Returns one team's detail, from cache when possible
    ///
    /// Same policy as [`get_teams`](Self::get_teams), keyed per team. The
    /// result is returned but not published.
    pub async fn get_team_detail(&self, id: i64, force_refresh: bool) -> Result<TeamDetail, FetchError> {
        let key = team_detail_key(id);
        if !force_refresh {
            if let Some(detail) = self.cache.get::<TeamDetail>(&key) {
                debug!(id, "team detail served from cache");
                return Ok(detail);
            }
        }

        let request = self.deployment.team_request(id);
        match self.fetch_json::<TeamDetail>(&request).await {
            Ok(detail) => {
                self.cache.set(&key, &detail);
                Ok(detail)
            }
            Err(e) => {
                error!(id, error = %e, url = %request.url, "error fetching team detail");
                self.cache.get::<TeamDetail>(&key).ok_or(e)
            }
        }
    }

    /// Drops the cached team list and publishes an empty one
    pub fn clear_cache(&self) {
        self.cache.remove(TEAMS_CACHE_KEY);
        self.teams.set(Vec::new());
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, FetchError> {
        let response = self.fetcher.fetch(request).await?;
        if !response.is_success() {
            return Err(FetchError::from_status(response.status, &response.body));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
