pub mod enums;
pub mod todo;
pub mod views;

pub use enums::{PomodoroPhase, Tab, UiMode};
pub use todo::{format_countdown, format_time_spent, PomodoroSettings, PomodoroTimer, Todo};
pub use views::{matches_tab, project, TodoView};
