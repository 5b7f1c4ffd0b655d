//! Navigation state machine
//!
//! The controller owns the current [`NavigationState`] and is the only writer
//! of it. States are the route table entries plus `not-found`. Three events
//! move the machine:
//!
//! - startup parses the current history path and touches nothing else,
//! - [`navigate`](NavigationController::navigate) validates the request and
//!   pushes a history entry whether or not it was valid,
//! - a pop event (back/forward) restores the entry's payload, re-validating it,
//!   or re-parses the path when the entry has no payload. Nothing is pushed.
//!
//! Invalid input of any kind lands on `not-found`; no transition fails.

use tracing::debug;

use super::history::{History, HistoryState, PopState};
use super::parser::{parse_path, path_for, validate_route};
use super::route::{RouteName, RouteParams};
use super::NavigationState;
use crate::store::{Store, Subscription};

/// Drives navigation state and keeps history in step with it
#[derive(Debug)]
pub struct NavigationController<H> {
    state: Store<NavigationState>,
    history: H,
}

impl<H: History> NavigationController<H> {
    /// Creates a controller positioned at the history's current path
    pub fn init(history: H) -> Self {
        let initial = parse_path(&history.current_path());
        debug!(route = %initial.route, valid = initial.is_valid, "navigation initialized");
        Self {
            state: Store::new(initial),
            history,
        }
    }

    /// Returns a copy of the current state
    pub fn state(&self) -> NavigationState {
        self.state.get_current()
    }

    /// The store holding the current state, for subscribing
    pub fn store(&self) -> &Store<NavigationState> {
        &self.state
    }

    /// Shortcut for `store().subscribe(callback)`
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&NavigationState) + Send + Sync + 'static,
    {
        self.state.subscribe(callback)
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Moves to `route` with `params`, recording a history entry
    ///
    /// An invalid request moves to `not-found` and still records an entry for
    /// `/not-found`.
    pub fn navigate(&mut self, route: &str, params: RouteParams) {
        let next = resolve(route, params);
        let path = path_for(next.route, &next.params);
        let payload = HistoryState {
            route: next.route.as_str().to_string(),
            params: next.params.clone(),
        };

        debug!(requested = route, route = %next.route, valid = next.is_valid, %path, "navigate");
        self.state.set(next);
        self.history.push_state(payload, &path);
    }

    /// Applies a back/forward event raised by the history
    pub fn handle_pop_state(&mut self, event: PopState) {
        let next = match event.state {
            Some(payload) => resolve(&payload.route, payload.params),
            None => parse_path(&event.path),
        };

        debug!(path = %event.path, route = %next.route, valid = next.is_valid, "history moved");
        self.state.set(next);
    }

    /// Steps back one entry; returns `false` at the first entry
    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    /// Steps forward one entry; returns `false` at the last entry
    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    fn go(&mut self, delta: isize) -> bool {
        match self.history.go(delta) {
            Some(event) => {
                self.handle_pop_state(event);
                true
            }
            None => false,
        }
    }
}

/// Validates a requested route, falling back to `not-found`
fn resolve(route: &str, params: RouteParams) -> NavigationState {
    if !validate_route(route, &params) {
        return NavigationState::not_found();
    }
    match RouteName::from_name(route) {
        Some(name) => NavigationState {
            route: name,
            params,
            is_valid: true,
        },
        None => NavigationState::not_found(),
    }
}
