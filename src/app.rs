//! Application state management for Kickoff
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and the mapping from navigation state to screens. Which
//! screen is shown is decided solely by the navigation controller; the app
//! only keeps per-screen view state (selection, scroll, loaded detail).

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

use crate::cache::Storage;
use crate::data::{Favorites, Fetch, Team, TeamDetail, TeamsDataService};
use crate::nav::{params, MemoryHistory, NavigationController, NavigationState, RouteName, RouteParams};

/// Result of the last team detail load
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    /// Nothing requested yet
    Empty,
    /// Detail for the given team is loaded
    Loaded(TeamDetail),
    /// Loading the given team failed
    Failed { id: i64, message: String },
}

impl DetailView {
    fn team_id(&self) -> Option<i64> {
        match self {
            DetailView::Empty => None,
            DetailView::Loaded(detail) => Some(detail.id),
            DetailView::Failed { id, .. } => Some(*id),
        }
    }
}

/// Main application struct managing state and data
pub struct App<F, S> {
    /// Navigation state machine and session history
    pub nav: NavigationController<MemoryHistory>,
    /// Index of currently selected row in the list screens
    pub selected_index: usize,
    /// Loaded team detail for the detail screen
    pub detail: DetailView,
    /// Error from the last team list load, shown in the status bar
    pub error: Option<String>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a forced refresh has been requested
    pub refresh_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Scroll offset for team detail view
    pub detail_scroll_offset: u16,
    /// Timestamp of last successful team list load
    pub last_refresh: Option<DateTime<Local>>,
    service: TeamsDataService<F, S>,
    favorites: Favorites<S>,
}

impl<F, S> App<F, S>
where
    F: Fetch,
    S: Storage,
{
    /// Creates the app positioned at the history's current entry
    pub fn new(service: TeamsDataService<F, S>, favorites: Favorites<S>, history: MemoryHistory) -> Self {
        Self {
            nav: NavigationController::init(history),
            selected_index: 0,
            detail: DetailView::Empty,
            error: None,
            should_quit: false,
            refresh_requested: false,
            show_help: false,
            detail_scroll_offset: 0,
            last_refresh: None,
            service,
            favorites,
        }
    }

    /// Current navigation state
    pub fn route(&self) -> NavigationState {
        self.nav.state()
    }

    pub fn service(&self) -> &TeamsDataService<F, S> {
        &self.service
    }

    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    /// Teams last published by the data service
    pub fn teams(&self) -> Vec<Team> {
        self.service.teams().get_current()
    }

    /// Ids listed on the current screen, in display order
    pub fn visible_ids(&self) -> Vec<i64> {
        match self.route().route {
            RouteName::Home => self.teams().iter().map(|t| t.id).collect(),
            RouteName::Favorite => self.favorites.teams().iter().map(|t| t.id).collect(),
            RouteName::Detail | RouteName::NotFound => Vec::new(),
        }
    }

    /// Loads the team list, recording any error for display
    pub async fn load_teams(&mut self, force_refresh: bool) {
        match self.service.get_teams(force_refresh).await {
            Ok(teams) => {
                info!(count = teams.len(), force_refresh, "teams loaded");
                self.error = None;
                self.last_refresh = Some(Local::now());
                let count = teams.len();
                if count > 0 && self.selected_index >= count {
                    self.selected_index = count - 1;
                }
            }
            Err(e) => {
                self.error = Some(format!("Could not load teams: {}", e));
            }
        }
    }

    /// Loads the detail for the current detail route if it is not loaded yet
    pub async fn sync_detail(&mut self, force_refresh: bool) {
        let state = self.route();
        if state.route != RouteName::Detail {
            return;
        }
        let Some(id) = state.team_id() else {
            return;
        };
        if !force_refresh && self.detail.team_id() == Some(id) {
            return;
        }

        self.detail = match self.service.get_team_detail(id, force_refresh).await {
            Ok(detail) => DetailView::Loaded(detail),
            Err(e) => DetailView::Failed {
                id,
                message: e.to_string(),
            },
        };
    }

    /// Runs work requested by key handling
    pub async fn process_pending(&mut self) {
        if self.refresh_requested {
            self.refresh_requested = false;
            self.load_teams(true).await;
            self.sync_detail(true).await;
        } else {
            self.sync_detail(false).await;
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Up`/`k`, `Down`/`j`: Move selection or scroll
    /// - `Enter`: Open the selected team
    /// - `h`: Team list, `f`: Favorites
    /// - `Backspace`/`b`/`Esc`: Back, `n`: Forward
    /// - `s` (in detail): Toggle favorite
    /// - `r`: Refresh from the network, `c`: Clear cached teams
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('h') => self.navigate("home", RouteParams::new()),
            KeyCode::Char('f') => self.navigate("favorite", RouteParams::new()),
            KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Esc => self.back(),
            KeyCode::Char('n') => self.forward(),
            KeyCode::Char('r') => self.refresh_requested = true,
            KeyCode::Char('c') => {
                self.service.clear_cache();
                self.selected_index = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('s') => self.toggle_favorite(),
            _ => {}
        }
    }

    fn navigate(&mut self, route: &str, params: RouteParams) {
        self.nav.navigate(route, params);
        self.reset_view_state();
    }

    fn back(&mut self) {
        if self.nav.back() {
            self.reset_view_state();
        }
    }

    fn forward(&mut self) {
        if self.nav.forward() {
            self.reset_view_state();
        }
    }

    /// Opens the detail screen for the selected row
    fn open_selected(&mut self) {
        if let Some(id) = self.visible_ids().get(self.selected_index).copied() {
            self.navigate("detail", params([("id", id)]));
        }
    }

    /// Adds or removes the team shown on the detail screen from favorites
    fn toggle_favorite(&mut self) {
        if self.route().route != RouteName::Detail {
            return;
        }
        if let DetailView::Loaded(detail) = &self.detail {
            let now_favorite = self.favorites.toggle(detail);
            info!(id = detail.id, now_favorite, "favorite toggled");
        }
    }

    fn move_up(&mut self) {
        if self.route().route == RouteName::Detail {
            self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
            return;
        }
        let count = self.visible_ids().len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    fn move_down(&mut self) {
        if self.route().route == RouteName::Detail {
            const MAX_SCROLL: u16 = 200;
            if self.detail_scroll_offset < MAX_SCROLL {
                self.detail_scroll_offset += 1;
            }
            return;
        }
        let count = self.visible_ids().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Resets per-screen state after the route changed
    ///
    /// Dropping the detail makes a failed team load retry when its route is
    /// entered again.
    fn reset_view_state(&mut self) {
        self.selected_index = 0;
        self.detail_scroll_offset = 0;
        self.detail = DetailView::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::History;
    use crate::cache::{ExpiringCache, MemoryStorage};
    use crate::data::{ApiRequest, ApiResponse, Deployment, FetchError, FAVORITES_KEY, TEAMS_CACHE_KEY};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use futures::future::BoxFuture;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Answers the team list and any team detail; fails while `down` is set
    struct FakeApi {
        down: Arc<AtomicBool>,
    }

    impl Fetch for FakeApi {
        fn fetch<'a>(&'a self, request: &'a ApiRequest) -> BoxFuture<'a, Result<ApiResponse, FetchError>> {
            let response = if self.down.load(Ordering::SeqCst) {
                ApiResponse {
                    status: 502,
                    body: "bad gateway".to_string(),
                }
            } else if request.url.ends_with('/') {
                ApiResponse {
                    status: 200,
                    body: json!({"teams": [
                        {"id": 57, "name": "Arsenal FC", "area": {"name": "England"}},
                        {"id": 65, "name": "Manchester City FC", "area": {"name": "England"}}
                    ]})
                    .to_string(),
                }
            } else {
                let id: i64 = request.url.rsplit('/').next().unwrap().parse().unwrap();
                ApiResponse {
                    status: 200,
                    body: json!({"id": id, "name": format!("Team {}", id), "squad": []}).to_string(),
                }
            };
            Box::pin(async move { Ok(response) })
        }
    }

    type TestApp = App<FakeApi, Arc<MemoryStorage>>;

    fn create_app(path: &str, down: bool) -> TestApp {
        create_app_with_outage(path, Arc::new(AtomicBool::new(down)))
    }

    fn create_app_with_outage(path: &str, down: Arc<AtomicBool>) -> TestApp {
        let storage = Arc::new(MemoryStorage::new());
        let service = TeamsDataService::new(
            FakeApi { down },
            Deployment::default(),
            ExpiringCache::new(Arc::clone(&storage)),
        );
        App::new(service, Favorites::load(storage), MemoryHistory::starting_at(path))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_starts_at_given_path() {
        let app = create_app("/favorite", false);
        assert_eq!(app.route().route, RouteName::Favorite);
        assert_eq!(app.detail, DetailView::Empty);
    }

    #[tokio::test]
    async fn test_load_teams_populates_list() {
        let mut app = create_app("/", false);
        app.load_teams(false).await;

        assert_eq!(app.visible_ids(), vec![57, 65]);
        assert!(app.error.is_none());
        assert!(app.last_refresh.is_some());
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let mut app = create_app("/", true);
        app.load_teams(false).await;

        let error = app.error.clone().expect("error should be recorded");
        assert!(error.contains("502"));
        assert!(app.visible_ids().is_empty());
    }

    #[tokio::test]
    async fn test_enter_opens_detail_and_loads_it() {
        let mut app = create_app("/", false);
        app.load_teams(false).await;

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        app.process_pending().await;

        assert_eq!(app.route().route, RouteName::Detail);
        assert_eq!(app.route().team_id(), Some(65));
        assert_eq!(app.nav.history().current_path(), "/detail/65");
        match &app.detail {
            DetailView::Loaded(detail) => assert_eq!(detail.id, 65),
            other => panic!("unexpected detail view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_back_and_forward_keys_follow_history() {
        let mut app = create_app("/", false);
        app.load_teams(false).await;
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('f')));

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.route().route, RouteName::Detail);

        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.route().route, RouteName::Home);

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.route().route, RouteName::Detail);
        assert_eq!(app.nav.history().len(), 3);
    }

    #[tokio::test]
    async fn test_toggle_favorite_on_detail() {
        let mut app = create_app("/detail/57", false);
        app.process_pending().await;

        app.handle_key(key(KeyCode::Char('s')));
        assert!(app.favorites().is_favorite(57));

        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.visible_ids(), vec![57]);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.route().team_id(), Some(57));
    }

    #[tokio::test]
    async fn test_detail_failure_is_shown() {
        let mut app = create_app("/detail/9", true);
        app.process_pending().await;

        match &app.detail {
            DetailView::Failed { id, message } => {
                assert_eq!(*id, 9);
                assert!(message.contains("bad gateway"));
            }
            other => panic!("unexpected detail view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_detail_retries_when_route_is_entered_again() {
        let down = Arc::new(AtomicBool::new(true));
        let mut app = create_app_with_outage("/detail/9", Arc::clone(&down));
        app.process_pending().await;
        assert!(matches!(app.detail, DetailView::Failed { id: 9, .. }));

        // Staying on the route does not retry
        down.store(false, Ordering::SeqCst);
        app.process_pending().await;
        assert!(matches!(app.detail, DetailView::Failed { id: 9, .. }));

        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('b')));
        app.process_pending().await;

        assert_eq!(app.route().team_id(), Some(9));
        match &app.detail {
            DetailView::Loaded(detail) => assert_eq!(detail.id, 9),
            other => panic!("unexpected detail view: {:?}", other),
        }
    }

    #[test]
    fn test_favorite_rows_and_ids_skip_missing_snapshots() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(
                FAVORITES_KEY,
                &json!({
                    "favoriteIds": [3, 57],
                    "teams": {"57": {
                        "data": {"id": 57, "name": "Arsenal FC"},
                        "cachedAt": 0,
                        "lastFetched": 0
                    }},
                    "lastUpdated": 0
                })
                .to_string(),
            )
            .unwrap();
        let service = TeamsDataService::new(
            FakeApi {
                down: Arc::new(AtomicBool::new(false)),
            },
            Deployment::default(),
            ExpiringCache::new(Arc::clone(&storage)),
        );
        let mut app = App::new(service, Favorites::load(storage), MemoryHistory::starting_at("/favorite"));

        assert_eq!(app.visible_ids(), vec![57]);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.route().team_id(), Some(57));
    }

    #[tokio::test]
    async fn test_clear_cache_key_empties_list() {
        let mut app = create_app("/", false);
        app.load_teams(false).await;

        app.handle_key(key(KeyCode::Char('c')));

        assert!(app.visible_ids().is_empty());
        assert!(!app.service().cache().is_valid(TEAMS_CACHE_KEY));
    }

    #[test]
    fn test_movement_without_rows_is_noop() {
        let mut app = create_app("/favorite", false);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_index, 0);
    }

    #[tokio::test]
    async fn test_selection_wraps() {
        let mut app = create_app("/", false);
        app.load_teams(false).await;

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_index, 1);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_help_intercepts_keys() {
        let mut app = create_app("/", false);
        app.handle_key(key(KeyCode::Char('?')));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.route().route, RouteName::Home);

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_quit_key() {
        let mut app = create_app("/", false);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
