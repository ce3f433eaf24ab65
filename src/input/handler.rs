use crate::app::AppState;
use crate::domain::{Tab, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTodo | UiMode::EditingTodo => handle_input_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Toggle completion on the selected todo
        KeyCode::Char(' ') => {
            app.toggle_selected()?;
            Ok(false)
        }

        // Start/stop pomodoro time tracking on the selected todo
        KeyCode::Enter => {
            app.toggle_tracking_selected()?;
            Ok(false)
        }

        // Mark all complete (or all incomplete once everything is done)
        KeyCode::Char('A') => {
            app.toggle_all()?;
            Ok(false)
        }

        // Delete selected
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.destroy_selected()?;
            Ok(false)
        }

        // Clear completed todos
        KeyCode::Char('C') => {
            app.clear_completed()?;
            Ok(false)
        }

        // Edit selected (open form with existing title)
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_todo();
            Ok(false)
        }

        // Add todo
        KeyCode::Char('a') => {
            app.start_add_todo();
            Ok(false)
        }

        // View filter
        KeyCode::Tab | KeyCode::Char('t') => {
            app.cycle_tab()?;
            Ok(false)
        }
        KeyCode::Char('1') => {
            app.set_tab(Tab::All)?;
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.set_tab(Tab::Active)?;
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.set_tab(Tab::Completed)?;
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        KeyCode::Esc => Ok(false),

        _ => Ok(false),
    }
}

/// Handle keys in the input form (adding or editing a todo)
fn handle_input_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input()?;
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input();
            Ok(false)
        }

        // Backspace
        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }

        // Add character
        KeyCode::Char(c) => {
            app.input_push(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TodoModel;
    use crate::persistence::SlotStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::{tempdir, TempDir};

    fn create_test_app() -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path().to_path_buf());
        let mut model = TodoModel::new(store, "test-todos");
        model.add_todo("Test todo").unwrap();
        (AppState::new(model), dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_handle_navigation() {
        let (mut app, _dir) = create_test_app();
        app.model.add_todo("Second").unwrap();

        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _dir) = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_add_todo() {
        let (mut app, _dir) = create_test_app();
        let initial_count = app.view().todos.len();

        // Press 'a' to open the form
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTodo);

        // Type a title
        handle_key(&mut app, key(KeyCode::Char('N'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('w'))).unwrap();

        // Submit with Enter
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.view().todos.len(), initial_count + 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_toggle_with_space() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.view().todos[0].completed);
    }

    #[test]
    fn test_handle_delete() {
        let (mut app, _dir) = create_test_app();
        let initial_count = app.view().todos.len();

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.view().todos.len(), initial_count - 1);
    }

    #[test]
    fn test_handle_tracking_with_enter() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.view().todos[0].active);
    }

    #[test]
    fn test_handle_filter_keys() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.model.selected_tab(), Tab::Completed);

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.model.selected_tab(), Tab::All);
    }

    #[test]
    fn test_handle_escape_cancels_form() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('z'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.view().todos.len(), 1);
    }
}
