//! Navigation history port
//!
//! The controller records each programmatic transition as a history entry and
//! is told when the user moves back or forward. `MemoryHistory` is the
//! application's own session history: a list of entries with a cursor.

use serde::{Deserialize, Serialize};

use super::route::RouteParams;

/// Structured payload stored with a history entry
///
/// Kept as plain strings because a payload may come from an older build or be
/// edited by hand, so it is re-validated when restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    pub route: String,
    #[serde(default)]
    pub params: RouteParams,
}

/// Raised after the history position moved
#[derive(Debug, Clone, PartialEq)]
pub struct PopState {
    /// Payload of the entry now current, if it has one
    pub state: Option<HistoryState>,
    /// Path of the entry now current
    pub path: String,
}

/// A single history entry
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: String,
    pub state: Option<HistoryState>,
}

/// Host history operations used by the navigation controller
pub trait History {
    /// Path of the current entry
    fn current_path(&self) -> String;

    /// Adds an entry after the current one, discarding any forward entries
    fn push_state(&mut self, state: HistoryState, path: &str);

    /// Moves the position by `delta` entries
    ///
    /// Returns the resulting event, or `None` when the move would leave the
    /// history.
    fn go(&mut self, delta: isize) -> Option<PopState>;
}

/// In-process session history
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    current: usize,
}

impl MemoryHistory {
    /// Creates a history whose only entry is `path` without a payload
    pub fn starting_at(path: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                path: path.into(),
                state: None,
            }],
            current: 0,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::starting_at("/")
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.current().path.clone()
    }

    fn push_state(&mut self, state: HistoryState, path: &str) {
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry {
            path: path.to_string(),
            state: Some(state),
        });
        self.current = self.entries.len() - 1;
    }

    fn go(&mut self, delta: isize) -> Option<PopState> {
        let target = self.current.checked_add_signed(delta)?;
        if delta == 0 || target >= self.entries.len() {
            return None;
        }
        self.current = target;
        let entry = self.current();
        Some(PopState {
            state: entry.state.clone(),
            path: entry.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(route: &str) -> HistoryState {
        HistoryState {
            route: route.to_string(),
            params: RouteParams::new(),
        }
    }

    #[test]
    fn test_starting_entry_has_no_payload() {
        let history = MemoryHistory::starting_at("/favorite");
        assert_eq!(history.current_path(), "/favorite");
        assert!(history.current().state.is_none());
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_push_moves_to_new_entry() {
        let mut history = MemoryHistory::default();
        history.push_state(state("home"), "/home");

        assert_eq!(history.len(), 2);
        assert_eq!(history.position(), 1);
        assert_eq!(history.current_path(), "/home");
    }

    #[test]
    fn test_go_back_and_forward() {
        let mut history = MemoryHistory::default();
        history.push_state(state("home"), "/home");
        history.push_state(state("favorite"), "/favorite");

        let back = history.go(-1).expect("should go back");
        assert_eq!(back.path, "/home");
        assert_eq!(back.state, Some(state("home")));

        let start = history.go(-1).expect("should reach first entry");
        assert_eq!(start.path, "/");
        assert!(start.state.is_none());

        assert!(history.go(-1).is_none());

        let fwd = history.go(2).expect("should jump forward");
        assert_eq!(fwd.path, "/favorite");
        assert!(history.go(1).is_none());
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::default();
        history.push_state(state("home"), "/home");
        history.push_state(state("favorite"), "/favorite");
        history.go(-1);

        history.push_state(state("detail"), "/detail/1");

        assert_eq!(history.len(), 3);
        assert!(!history.can_go_forward());
        assert_eq!(history.current_path(), "/detail/1");
    }

    #[test]
    fn test_history_state_params_default_to_empty() {
        let parsed: HistoryState = serde_json::from_str(r#"{"route":"home"}"#).unwrap();
        assert!(parsed.params.is_empty());
    }
}
