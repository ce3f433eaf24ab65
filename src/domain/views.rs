use super::enums::Tab;
use super::todo::Todo;

/// View-ready summary of the current model state
#[derive(Debug, Clone)]
pub struct TodoView {
    /// Filter the projection was built with
    pub selected_tab: Tab,
    /// Records matching the filter, in insertion order
    pub todos: Vec<Todo>,
    /// Count of not-completed records (across the whole list, not the filter)
    pub active_count: usize,
    /// Count of completed records
    pub completed_count: usize,
    /// Whether the primary list should be shown
    pub show_main: bool,
    /// Whether the summary footer should be shown
    pub show_footer: bool,
    /// Cumulative tracked seconds across all todos
    pub total_time_spent: u64,
}

/// Whether a todo passes the given filter
pub fn matches_tab(todo: &Todo, tab: Tab) -> bool {
    match tab {
        Tab::All => true,
        Tab::Active => !todo.completed,
        Tab::Completed => todo.completed,
    }
}

/// Project the full list into a view for the given filter.
///
/// Filtering never drops records from the underlying list; the counts are
/// always computed over the full list regardless of the filter.
pub fn project(todos: &[Todo], tab: Tab, total_time_spent: u64) -> TodoView {
    let shown: Vec<Todo> = todos
        .iter()
        .filter(|todo| matches_tab(todo, tab))
        .cloned()
        .collect();

    let active_count = todos.iter().filter(|todo| !todo.completed).count();
    let completed_count = todos.len() - active_count;

    TodoView {
        selected_tab: tab,
        show_main: !shown.is_empty(),
        show_footer: active_count > 0 || completed_count > 0,
        todos: shown,
        active_count,
        completed_count,
        total_time_spent,
    }
}
