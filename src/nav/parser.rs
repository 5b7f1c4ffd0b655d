//! Conversion between paths and `(route, params)` pairs
//!
//! Two layers of validation exist. [`validate_url_path`] checks the *shape* of
//! a path against the route grammar; [`validate_route`] checks a route name and
//! parameter map against the route table. A path is only turned into params
//! after its shape is accepted, so malformed ids never reach the semantic check.

use super::route::{find_route, ParamValue, RouteName, RouteParams};
use super::NavigationState;

/// Splits a path into its non-empty `/`-delimited segments
///
/// `""`, `"/"` and `"//"` all yield no segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Parses a path segment as a strictly positive integer
///
/// Only ASCII digits are accepted; signs, whitespace and decimals are not.
fn parse_id_segment(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Whether `name` and `params` satisfy the route table
///
/// The route must exist, must not receive params unless it allows them, must
/// receive every required param, and for `detail` the `id` must coerce to a
/// positive integer.
pub fn validate_route(name: &str, params: &RouteParams) -> bool {
    let Some(def) = find_route(name) else {
        return false;
    };

    if !def.allows_params {
        return params.is_empty();
    }

    if !def.required_params.iter().all(|p| params.contains_key(*p)) {
        return false;
    }

    if def.name == RouteName::Detail {
        return params
            .get("id")
            .and_then(ParamValue::as_positive_id)
            .is_some();
    }

    true
}

/// Whether `path` is structurally valid
///
/// The first segment must name a route (no segments means `home`). Routes that
/// take no params accept no further segments; `detail` takes exactly one more
/// segment holding a positive integer.
pub fn validate_url_path(path: &str) -> bool {
    let segs = segments(path);
    let Some(first) = segs.first() else {
        return true;
    };

    let Some(def) = find_route(first) else {
        return false;
    };

    if def.name == RouteName::Detail {
        return segs.len() == 2 && parse_id_segment(segs[1]).is_some();
    }

    if !def.allows_params {
        return segs.len() == 1;
    }

    true
}

/// Converts a path into a navigation state
///
/// Structurally invalid paths yield the `not-found` state.
pub fn parse_path(path: &str) -> NavigationState {
    if !validate_url_path(path) {
        return NavigationState::not_found();
    }

    let segs = segments(path);
    let route = segs
        .first()
        .and_then(|name| RouteName::from_name(name))
        .unwrap_or(RouteName::Home);

    let mut params = RouteParams::new();
    if route == RouteName::Detail {
        if let Some(id) = segs.get(1).and_then(|s| parse_id_segment(s)) {
            params.insert("id".to_string(), ParamValue::Int(id));
        }
    }

    NavigationState {
        route,
        params,
        is_valid: true,
    }
}

/// Returns the canonical path for a route
///
/// `detail` embeds its id in the path; other routes are `/<name>`. A detail
/// route without a usable id falls back to `/not-found`.
pub fn path_for(route: RouteName, params: &RouteParams) -> String {
    match route {
        RouteName::Detail => match params.get("id").and_then(ParamValue::as_positive_id) {
            Some(id) => format!("/detail/{}", id),
            None => format!("/{}", RouteName::NotFound),
        },
        other => format!("/{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::route::params;

    #[test]
    fn test_segments_ignore_empty_parts() {
        assert!(segments("").is_empty());
        assert!(segments("/").is_empty());
        assert_eq!(segments("/detail/7/"), vec!["detail", "7"]);
        assert_eq!(segments("//favorite//"), vec!["favorite"]);
    }

    #[test]
    fn test_validate_route_known_routes() {
        assert!(validate_route("home", &RouteParams::new()));
        assert!(validate_route("favorite", &RouteParams::new()));
        assert!(validate_route("detail", &params([("id", 42)])));
    }

    #[test]
    fn test_validate_route_rejects_unknown_and_sentinel() {
        assert!(!validate_route("bogus", &RouteParams::new()));
        assert!(!validate_route("not-found", &RouteParams::new()));
        assert!(!validate_route("", &RouteParams::new()));
    }

    #[test]
    fn test_validate_route_rejects_params_on_paramless_route() {
        assert!(!validate_route("home", &params([("id", 1)])));
        assert!(!validate_route("favorite", &params([("tab", "x")])));
    }

    #[test]
    fn test_validate_route_detail_id_rules() {
        assert!(!validate_route("detail", &RouteParams::new()));
        assert!(!validate_route("detail", &params([("id", 0)])));
        assert!(!validate_route("detail", &params([("id", -3)])));
        assert!(!validate_route("detail", &params([("id", 1.5)])));
        assert!(!validate_route("detail", &params([("id", "abc")])));
        assert!(validate_route("detail", &params([("id", "12")])));
    }

    #[test]
    fn test_validate_route_detail_allows_extra_params() {
        let p = params([("id", ParamValue::from(3)), ("tab", ParamValue::from("squad"))]);
        assert!(validate_route("detail", &p));
    }

    #[test]
    fn test_validate_url_path_shapes() {
        assert!(validate_url_path(""));
        assert!(validate_url_path("/"));
        assert!(validate_url_path("/home"));
        assert!(validate_url_path("/favorite/"));
        assert!(validate_url_path("/detail/7"));
        assert!(!validate_url_path("/favorite/extra"));
        assert!(!validate_url_path("/detail"));
        assert!(!validate_url_path("/detail/7/extra"));
        assert!(!validate_url_path("/detail/-1"));
        assert!(!validate_url_path("/detail/0"));
        assert!(!validate_url_path("/detail/+5"));
        assert!(!validate_url_path("/detail/1.5"));
        assert!(!validate_url_path("/detail/abc"));
        assert!(!validate_url_path("/not-found"));
        assert!(!validate_url_path("/bogus"));
    }

    #[test]
    fn test_parse_path_root_is_home() {
        for path in ["", "/", "/home", "/home/"] {
            let state = parse_path(path);
            assert_eq!(state.route, RouteName::Home, "path {:?}", path);
            assert!(state.params.is_empty());
            assert!(state.is_valid);
        }
    }

    #[test]
    fn test_parse_path_detail_extracts_id() {
        let state = parse_path("/detail/57/");
        assert_eq!(state.route, RouteName::Detail);
        assert_eq!(state.params, params([("id", 57)]));
        assert!(state.is_valid);
    }

    #[test]
    fn test_parse_path_invalid_shapes_are_not_found() {
        for path in ["/detail/-1", "/detail/7/extra", "/detail", "/favorite/1", "/teams"] {
            assert_eq!(parse_path(path), NavigationState::not_found(), "path {:?}", path);
        }
    }

    #[test]
    fn test_path_for_routes() {
        assert_eq!(path_for(RouteName::Home, &RouteParams::new()), "/home");
        assert_eq!(path_for(RouteName::Favorite, &RouteParams::new()), "/favorite");
        assert_eq!(path_for(RouteName::NotFound, &RouteParams::new()), "/not-found");
        assert_eq!(path_for(RouteName::Detail, &params([("id", 42)])), "/detail/42");
        assert_eq!(path_for(RouteName::Detail, &params([("id", "8")])), "/detail/8");
    }

    #[test]
    fn test_canonical_detail_path_parses_back() {
        let path = path_for(RouteName::Detail, &params([("id", 9.0)]));
        let state = parse_path(&path);
        assert_eq!(state.route, RouteName::Detail);
        assert_eq!(state.params, params([("id", 9)]));
    }
}
