//! Candidate selection state machine.
//!
//! Tracks which candidate is highlighted on the map:
//!
//! ```text
//! None ──successful fetch──► BackendChosen(id) ──user pick──► UserSelected(id')
//!   ▲                              │      ▲                        │
//!   └────────── new fetch ─────────┘      └──── user pick (any) ───┘
//! ```
//!
//! A user pick always wins over the backend's pick for highlighting.
//! Transitions are synchronous; the coordinator triggers an overlay
//! restyle after each one. `UserSelected` is only reachable while a
//! candidate set is current, which the coordinator enforces.

/// Which candidate, if any, is currently highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No candidate set is current, or a new fetch has just started.
    #[default]
    None,
    /// The backend's pick is highlighted; the user has not picked yet.
    BackendChosen(String),
    /// The user explicitly picked this candidate.
    UserSelected(String),
}

impl SelectionState {
    /// The id driving highlight emphasis, if any.
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            SelectionState::None => None,
            SelectionState::BackendChosen(id) | SelectionState::UserSelected(id) => Some(id),
        }
    }

    /// Whether the user has explicitly picked a candidate.
    pub fn is_user_selected(&self) -> bool {
        matches!(self, SelectionState::UserSelected(_))
    }

    /// New fetch starting: drop any selection.
    pub fn reset(&mut self) {
        *self = SelectionState::None;
    }

    /// Successful fetch: adopt the backend's pick.
    pub fn backend_chosen(&mut self, id: impl Into<String>) {
        *self = SelectionState::BackendChosen(id.into());
    }

    /// User picked a candidate. Valid any number of times while a set is
    /// current; the pick stands regardless of later directions failures.
    pub fn user_selected(&mut self, id: impl Into<String>) {
        *self = SelectionState::UserSelected(id.into());
    }
}

impl std::fmt::Display for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionState::None => write!(f, "none"),
            SelectionState::BackendChosen(id) => write!(f, "backend-chosen({})", id),
            SelectionState::UserSelected(id) => write!(f, "user-selected({})", id),
        }
    }
}
