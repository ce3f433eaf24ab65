use super::enums::PomodoroPhase;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work/rest durations used when initializing and resetting pomodoro timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    /// Work phase duration in seconds
    pub work_secs: u64,
    /// Rest phase duration in seconds
    pub rest_secs: u64,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            rest_secs: 5 * 60,
        }
    }
}

impl PomodoroSettings {
    /// Configured duration for the given phase
    pub fn duration_for(&self, phase: PomodoroPhase) -> u64 {
        match phase {
            PomodoroPhase::Work => self.work_secs,
            PomodoroPhase::Rest => self.rest_secs,
        }
    }
}

/// Two-phase countdown attached to a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroTimer {
    pub phase: PomodoroPhase,
    /// Seconds remaining in the current phase
    pub time_left: u64,
}

impl PomodoroTimer {
    /// Fresh timer at the start of a work phase
    pub fn new(settings: PomodoroSettings) -> Self {
        Self {
            phase: PomodoroPhase::Work,
            time_left: settings.work_secs,
        }
    }

    /// Advance the timer by one second, returning the resulting timer.
    ///
    /// The transition is evaluated against the pre-decrement `time_left`: a
    /// timer sitting at zero flips to the other phase on this tick and picks
    /// up that phase's configured duration, so it never goes negative.
    pub fn advanced(&self, settings: PomodoroSettings) -> Self {
        if self.time_left > 0 {
            Self {
                phase: self.phase,
                time_left: self.time_left - 1,
            }
        } else {
            let phase = self.phase.flipped();
            Self {
                phase,
                time_left: settings.duration_for(phase),
            }
        }
    }
}

/// A single todo record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique ID for internal references
    pub id: Uuid,
    /// Todo title
    pub title: String,
    /// Whether the todo has been completed
    pub completed: bool,
    /// Total tracked time in seconds
    pub time_spent: u64,
    /// Whether this todo is currently selected for time tracking
    pub active: bool,
    /// Embedded pomodoro timer
    pub timer: PomodoroTimer,
}

impl Todo {
    pub fn new(title: String, settings: PomodoroSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            completed: false,
            time_spent: 0,
            active: false,
            timer: PomodoroTimer::new(settings),
        }
    }

    /// Copy of this todo with a different completion flag
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    /// Copy of this todo with a different title
    pub fn with_title(&self, title: String) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }

    /// Copy of this todo with a different time-tracking flag
    pub fn with_active(&self, active: bool) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }

    /// Copy of this todo advanced by one tracked second
    pub fn ticked(&self, settings: PomodoroSettings) -> Self {
        Self {
            time_spent: self.time_spent + 1,
            timer: self.timer.advanced(settings),
            ..self.clone()
        }
    }
}

/// Format tracked seconds as "Xh Ym Zs" (omits leading zero parts)
pub fn format_time_spent(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format a countdown as "MM:SS"
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
