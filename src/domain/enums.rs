use serde::{Deserialize, Serialize};

/// View filter for the todo list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    All,
    Active,
    Completed,
}

impl Tab {
    /// Parse a tab from its display tag (e.g. "ACTIVE")
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_uppercase().as_str() {
            "ALL" => Some(Self::All),
            "ACTIVE" => Some(Self::Active),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Convert a tab to its display tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
        }
    }

    /// Get all tabs in display order
    pub fn all() -> &'static [Tab] {
        &[Tab::All, Tab::Active, Tab::Completed]
    }

    /// Next tab in display order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

/// Phase of a per-todo pomodoro timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PomodoroPhase {
    Work,
    Rest,
}

impl PomodoroPhase {
    /// The phase that follows this one
    pub fn flipped(&self) -> Self {
        match self {
            Self::Work => Self::Rest,
            Self::Rest => Self::Work,
        }
    }

    /// Short display label for the list pane
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "WORK",
            Self::Rest => "REST",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTodo,
    EditingTodo,
}
