//! Navigation core
//!
//! Route table, path parsing and the controller that keeps the active view and
//! the session history in step.

mod controller;
mod history;
mod parser;
mod route;

pub use controller::NavigationController;
pub use history::{History, HistoryEntry, HistoryState, MemoryHistory, PopState};
pub use parser::{parse_path, path_for, segments, validate_route, validate_url_path};
pub use route::{
    find_route, params, ParamValue, RouteDefinition, RouteName, RouteParams, NOT_FOUND,
    ROUTE_TABLE,
};

use serde::{Deserialize, Serialize};

/// The active route, its params and whether the request that produced it was valid
///
/// Always replaced as a whole so observers never see a route paired with
/// another transition's params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub route: RouteName,
    pub params: RouteParams,
    pub is_valid: bool,
}

impl NavigationState {
    /// The fallback state for anything that failed validation
    pub fn not_found() -> Self {
        Self {
            route: RouteName::NotFound,
            params: RouteParams::new(),
            is_valid: false,
        }
    }

    /// The `id` param as a positive integer, when present
    pub fn team_id(&self) -> Option<i64> {
        self.params.get("id").and_then(ParamValue::as_positive_id)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            route: RouteName::Home,
            params: RouteParams::new(),
            is_valid: true,
        }
    }
}
