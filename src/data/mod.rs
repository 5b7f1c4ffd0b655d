//! Core data models for Kickoff
//!
//! This module contains the team payloads returned by the football-data API
//! together with the client, data service and favorites built on them. The
//! payload shapes are owned by the API; fields it may omit or null out are
//! optional here.

pub mod client;
pub mod favorites;
pub mod service;

pub use client::{ApiRequest, ApiResponse, Deployment, Fetch, FetchError, HttpFetcher};
pub use favorites::{CachedTeamDetail, Favorites, FavoritesCache, FAVORITES_KEY};
pub use service::{team_detail_key, TeamsDataService, TEAMS_CACHE_KEY};

use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Country or region a team or competition belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// A team as listed by `GET /teams`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    /// Three-letter abbreviation
    #[serde(default)]
    pub tla: Option<String>,
    #[serde(default)]
    pub crest_url: Option<String>,
    #[serde(default)]
    pub area: Option<Area>,
    #[serde(default)]
    pub founded: Option<i32>,
    #[serde(default)]
    pub venue: Option<String>,
}

/// Envelope returned by `GET /teams`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<Team>,
}

/// Whether a squad member plays or coaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SquadRole {
    Player,
    Coach,
    #[serde(other)]
    Other,
}

/// A member of a team's squad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub country_of_birth: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub shirt_number: Option<u32>,
    pub role: SquadRole,
}

/// A competition the team currently plays in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub area: Option<Area>,
}

/// Full team record returned by `GET /teams/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub tla: Option<String>,
    #[serde(default)]
    pub crest_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub founded: Option<i32>,
    #[serde(default)]
    pub club_colors: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub squad: Vec<Player>,
    #[serde(default)]
    pub area: Option<Area>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_competitions: Vec<Competition>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl TeamDetail {
    /// Squad members with the player role, in squad order
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.squad.iter().filter(|p| p.role == SquadRole::Player)
    }

    /// First squad member with the coach role
    pub fn coach(&self) -> Option<&Player> {
        self.squad.iter().find(|p| p.role == SquadRole::Coach)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn team(id: i64, name: &str) -> Team {
        Team {
            id,
            name: name.to_string(),
            short_name: None,
            tla: None,
            crest_url: None,
            area: Some(Area {
                id: None,
                name: "England".to_string(),
            }),
            founded: Some(1886),
            venue: Some("Emirates Stadium".to_string()),
        }
    }

    pub fn detail(id: i64, name: &str) -> TeamDetail {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "squad": [
                {"id": 1, "name": "Keeper", "position": "Goalkeeper", "role": "PLAYER"},
                {"id": 2, "name": "Boss", "role": "COACH"}
            ]
        }))
        .expect("fixture should deserialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_deserializes_api_shape() {
        let json = r#"{
            "id": 57,
            "name": "Arsenal FC",
            "shortName": "Arsenal",
            "tla": "ARS",
            "crestUrl": "https://crests.football-data.org/57.svg",
            "area": {"id": 2072, "name": "England"},
            "founded": 1886,
            "venue": "Emirates Stadium"
        }"#;

        let team: Team = serde_json::from_str(json).expect("Team should parse");

        assert_eq!(team.id, 57);
        assert_eq!(team.short_name.as_deref(), Some("Arsenal"));
        assert_eq!(team.tla.as_deref(), Some("ARS"));
        assert_eq!(team.area.map(|a| a.name).as_deref(), Some("England"));
        assert_eq!(team.founded, Some(1886));
    }

    #[test]
    fn test_team_tolerates_nulls_and_missing_fields() {
        let json = r#"{"id": 1, "name": "X", "crestUrl": null, "area": {"name": "Y"}, "founded": null}"#;

        let team: Team = serde_json::from_str(json).expect("Team should parse");

        assert!(team.crest_url.is_none());
        assert!(team.founded.is_none());
        assert!(team.tla.is_none());
    }

    #[test]
    fn test_teams_response_defaults_to_empty() {
        let response: TeamsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.teams.is_empty());
    }

    #[test]
    fn test_teams_response_null_list_is_empty() {
        let response: TeamsResponse = serde_json::from_str(r#"{"teams": null}"#).unwrap();
        assert!(response.teams.is_empty());
    }

    #[test]
    fn test_team_without_area_still_parses() {
        let json = r#"{"teams": [
            {"id": 1, "name": "No Area"},
            {"id": 2, "name": "Null Area", "area": null},
            {"id": 3, "name": "Has Area", "area": {"name": "Spain"}}
        ]}"#;

        let response: TeamsResponse = serde_json::from_str(json).expect("teams should parse");

        assert_eq!(response.teams.len(), 3);
        assert!(response.teams[0].area.is_none());
        assert!(response.teams[1].area.is_none());
        assert_eq!(response.teams[2].area.as_ref().map(|a| a.name.as_str()), Some("Spain"));
    }

    #[test]
    fn test_team_detail_null_lists_are_empty() {
        let json = r#"{"id": 5, "name": "X", "squad": null, "activeCompetitions": null}"#;

        let detail: TeamDetail = serde_json::from_str(json).expect("TeamDetail should parse");

        assert!(detail.squad.is_empty());
        assert!(detail.active_competitions.is_empty());
    }

    #[test]
    fn test_team_detail_squad_roles() {
        let json = r#"{
            "id": 57,
            "name": "Arsenal FC",
            "clubColors": "Red / White",
            "squad": [
                {"id": 1, "name": "A", "position": "Goalkeeper", "shirtNumber": 1, "role": "PLAYER"},
                {"id": 2, "name": "B", "position": null, "role": "COACH"},
                {"id": 3, "name": "C", "role": "ASSISTANT_COACH"}
            ],
            "activeCompetitions": [{"id": 2021, "name": "Premier League", "code": "PL"}]
        }"#;

        let detail: TeamDetail = serde_json::from_str(json).expect("TeamDetail should parse");

        assert_eq!(detail.club_colors.as_deref(), Some("Red / White"));
        assert_eq!(detail.players().count(), 1);
        assert_eq!(detail.coach().map(|c| c.name.as_str()), Some("B"));
        assert_eq!(detail.squad[2].role, SquadRole::Other);
        assert_eq!(detail.squad[0].shirt_number, Some(1));
        assert_eq!(detail.active_competitions[0].code.as_deref(), Some("PL"));
    }

    #[test]
    fn test_team_serializes_camel_case() {
        let team = fixtures::team(1, "A");
        let value = serde_json::to_value(&team).unwrap();
        assert!(value.get("shortName").is_some());
        assert!(value.get("crestUrl").is_some());
    }
}
