//! Route table and route parameter types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel route name used for every unrecognized or invalid location
pub const NOT_FOUND: &str = "not-found";

/// The screens the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteName {
    /// Team list
    Home,
    /// Single team with its squad
    Detail,
    /// Teams marked as favorite
    Favorite,
    /// Fallback for anything that failed validation
    NotFound,
}

impl RouteName {
    /// Returns the name used in paths and history payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Home => "home",
            RouteName::Detail => "detail",
            RouteName::Favorite => "favorite",
            RouteName::NotFound => NOT_FOUND,
        }
    }

    /// Looks up a route by name, including the `not-found` sentinel
    pub fn from_name(name: &str) -> Option<RouteName> {
        match name {
            "home" => Some(RouteName::Home),
            "detail" => Some(RouteName::Detail),
            "favorite" => Some(RouteName::Favorite),
            NOT_FOUND => Some(RouteName::NotFound),
            _ => None,
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a navigable route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDefinition {
    pub name: RouteName,
    /// Whether the route accepts any parameters at all
    pub allows_params: bool,
    /// Parameters that must be present when the route allows parameters
    pub required_params: &'static [&'static str],
}

/// Every navigable route. `not-found` is deliberately absent: it can be shown
/// but never requested.
pub static ROUTE_TABLE: [RouteDefinition; 3] = [
    RouteDefinition {
        name: RouteName::Home,
        allows_params: false,
        required_params: &[],
    },
    RouteDefinition {
        name: RouteName::Detail,
        allows_params: true,
        required_params: &["id"],
    },
    RouteDefinition {
        name: RouteName::Favorite,
        allows_params: false,
        required_params: &[],
    },
];

/// Returns the table entry for `name`, if it is a navigable route
pub fn find_route(name: &str) -> Option<&'static RouteDefinition> {
    ROUTE_TABLE.iter().find(|def| def.name.as_str() == name)
}

/// A route parameter value: either text or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Coerces the value to a number the way the URL layer does
    ///
    /// Text is trimmed before parsing and empty text coerces to zero. Returns
    /// `None` for text that is not numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Int(n) => Some(*n as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
        }
    }

    /// Returns the value as a positive integer id, if it is one
    pub fn as_positive_id(&self) -> Option<i64> {
        let n = self.as_number()?;
        if n.is_finite() && n.fract() == 0.0 && n > 0.0 && n <= i64::MAX as f64 {
            Some(n as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// Parameters passed to a route, keyed by name
pub type RouteParams = BTreeMap<String, ParamValue>;

/// Builds a [`RouteParams`] from `(name, value)` pairs
pub fn params<I, K, V>(pairs: I) -> RouteParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
