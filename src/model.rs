use crate::domain::{project, PomodoroSettings, Tab, Todo, TodoView};
use crate::persistence::SlotStore;
use anyhow::Result;
use uuid::Uuid;

/// Callback invoked after every mutation's persistence step
pub type Listener = Box<dyn FnMut()>;

/// The todo list model: an ordered list of todos, a view filter, and the
/// pomodoro configuration used for time tracking.
///
/// Every mutating operation rebuilds the list (records are copied and
/// overridden, never mutated in place), writes the full list to the storage
/// slot, and then notifies subscribers in registration order. Operations
/// given an id that isn't in the list leave the list unchanged but still
/// persist and notify.
pub struct TodoModel {
    key: String,
    store: SlotStore,
    todos: Vec<Todo>,
    selected_tab: Tab,
    total_time_spent: u64,
    settings: PomodoroSettings,
    listeners: Vec<Listener>,
}

impl TodoModel {
    /// Create a model backed by the slot named `key`, loading whatever list
    /// is already stored there (empty if the slot is absent or unreadable)
    pub fn new(store: SlotStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let todos = store.load(&key);
        Self {
            key,
            store,
            todos,
            selected_tab: Tab::All,
            total_time_spent: 0,
            settings: PomodoroSettings::default(),
            listeners: Vec::new(),
        }
    }

    /// Register a callback to run after every mutation. There is no
    /// unsubscribe.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Persist the full list and notify subscribers in registration order
    fn inform(&mut self) -> Result<()> {
        self.store.save(&self.key, &self.todos)?;
        for listener in &mut self.listeners {
            listener();
        }
        Ok(())
    }

    /// Append a new todo with the given title. Titles are taken as-is; the
    /// caller is responsible for trimming and rejecting blank input.
    pub fn add_todo(&mut self, title: impl Into<String>) -> Result<()> {
        let todo = Todo::new(title.into(), self.settings);
        self.todos = self
            .todos
            .iter()
            .cloned()
            .chain(std::iter::once(todo))
            .collect();
        self.inform()
    }

    /// Set the completion flag on every todo
    pub fn toggle_all(&mut self, checked: bool) -> Result<()> {
        self.todos = self
            .todos
            .iter()
            .map(|todo| todo.with_completed(checked))
            .collect();
        self.inform()
    }

    /// Flip the completion flag on the todo matching `id`
    pub fn toggle(&mut self, id: Uuid) -> Result<()> {
        self.todos = self
            .todos
            .iter()
            .map(|todo| {
                if todo.id == id {
                    todo.with_completed(!todo.completed)
                } else {
                    todo.clone()
                }
            })
            .collect();
        self.inform()
    }

    /// Select the todo matching `id` for time tracking, deselecting every
    /// other todo. At most one todo tracks time at once; this is where that
    /// invariant is enforced.
    pub fn mark_active(&mut self, id: Uuid) -> Result<()> {
        self.todos = self
            .todos
            .iter()
            .map(|todo| todo.with_active(todo.id == id))
            .collect();
        self.inform()
    }

    /// Stop time tracking on the todo matching `id` only
    pub fn mark_inactive(&mut self, id: Uuid) -> Result<()> {
        self.todos = self
            .todos
            .iter()
            .map(|todo| {
                if todo.id == id {
                    todo.with_active(false)
                } else {
                    todo.clone()
                }
            })
            .collect();
        self.inform()
    }

    /// Remove the todo matching `id`
    pub fn destroy(&mut self, id: Uuid) -> Result<()> {
        self.todos = self
            .todos
            .iter()
            .filter(|todo| todo.id != id)
            .cloned()
            .collect();
        self.inform()
    }

    /// Replace the title of the todo matching `id`
    pub fn save(&mut self, id: Uuid, new_title: impl Into<String>) -> Result<()> {
        let new_title = new_title.into();
        self.todos = self
            .todos
            .iter()
            .map(|todo| {
                if todo.id == id {
                    todo.with_title(new_title.clone())
                } else {
                    todo.clone()
                }
            })
            .collect();
        self.inform()
    }

    /// Remove every completed todo, preserving the order of the rest
    pub fn clear_completed(&mut self) -> Result<()> {
        self.todos = self
            .todos
            .iter()
            .filter(|todo| !todo.completed)
            .cloned()
            .collect();
        self.inform()
    }

    /// Change the current view filter
    pub fn set_selected_tab(&mut self, tab: Tab) -> Result<()> {
        self.selected_tab = tab;
        self.inform()
    }

    /// Advance time tracking by one second. Every active todo gains one
    /// tracked second and its pomodoro timer advances; the cumulative
    /// counter bumps iff at least one todo is active. Meant to be driven by
    /// the host once per wall-clock second.
    pub fn tick(&mut self) -> Result<()> {
        let any_active = self.todos.iter().any(|todo| todo.active);
        let settings = self.settings;
        self.todos = self
            .todos
            .iter()
            .map(|todo| {
                if todo.active {
                    todo.ticked(settings)
                } else {
                    todo.clone()
                }
            })
            .collect();
        if any_active {
            self.total_time_spent += 1;
        }
        self.inform()
    }

    /// Replace the pomodoro configuration used for future timer
    /// initializations and phase resets. Timers already counting down keep
    /// their remaining time.
    pub fn update_pomodoro_settings(&mut self, settings: PomodoroSettings) -> Result<()> {
        self.settings = settings;
        self.inform()
    }

    /// Project current state into a view-ready summary. Pure; no
    /// persistence, no notification.
    pub fn get_view(&self) -> TodoView {
        project(&self.todos, self.selected_tab, self.total_time_spent)
    }

    pub fn selected_tab(&self) -> Tab {
        self.selected_tab
    }

    pub fn settings(&self) -> PomodoroSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PomodoroPhase;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use tempfile::{tempdir, TempDir};

    fn test_model() -> (TodoModel, TempDir) {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path().to_path_buf());
        (TodoModel::new(store, "test-todos"), dir)
    }

    fn titles(view: &TodoView) -> Vec<String> {
        view.todos.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_add_todo_scenario() {
        let (mut model, _dir) = test_model();
        model.add_todo("buy milk").unwrap();

        let view = model.get_view();
        assert_eq!(view.selected_tab, Tab::All);
        assert_eq!(view.todos.len(), 1);
        assert_eq!(view.todos[0].title, "buy milk");
        assert!(!view.todos[0].completed);
        assert_eq!(view.active_count, 1);
        assert_eq!(view.completed_count, 0);
        assert!(view.show_main);
        assert!(view.show_footer);
    }

    #[test]
    fn test_ids_are_pairwise_distinct() {
        let (mut model, _dir) = test_model();
        for i in 0..20 {
            model.add_todo(format!("task #{}", i)).unwrap();
        }

        let view = model.get_view();
        let ids: HashSet<Uuid> = view.todos.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_toggle_all() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        let before = model.get_view();

        model.toggle_all(true).unwrap();
        let view = model.get_view();
        assert!(view.todos.iter().all(|t| t.completed));
        // Other fields untouched
        for (original, toggled) in before.todos.iter().zip(view.todos.iter()) {
            assert_eq!(original.id, toggled.id);
            assert_eq!(original.title, toggled.title);
            assert_eq!(original.time_spent, toggled.time_spent);
        }

        model.toggle_all(false).unwrap();
        assert!(model.get_view().todos.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_toggle_flips_exactly_one() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        let id = model.get_view().todos[0].id;

        model.toggle(id).unwrap();
        let view = model.get_view();
        assert!(view.todos[0].completed);
        assert!(!view.todos[1].completed);

        model.toggle(id).unwrap();
        assert!(!model.get_view().todos[0].completed);
    }

    #[test]
    fn test_toggle_absent_id_is_noop() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        let before: Vec<(Uuid, String, bool)> = model
            .get_view()
            .todos
            .iter()
            .map(|t| (t.id, t.title.clone(), t.completed))
            .collect();

        model.toggle(Uuid::new_v4()).unwrap();

        let after: Vec<(Uuid, String, bool)> = model
            .get_view()
            .todos
            .iter()
            .map(|t| (t.id, t.title.clone(), t.completed))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_destroy() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        let id = model.get_view().todos[0].id;

        model.destroy(id).unwrap();
        assert_eq!(titles(&model.get_view()), vec!["b"]);

        // Absent id leaves the list alone
        model.destroy(Uuid::new_v4()).unwrap();
        assert_eq!(titles(&model.get_view()), vec!["b"]);
    }

    #[test]
    fn test_save_replaces_title() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        let id = model.get_view().todos[0].id;

        model.save(id, "renamed").unwrap();
        let view = model.get_view();
        assert_eq!(view.todos[0].title, "renamed");
        assert_eq!(view.todos[0].id, id);
    }

    #[test]
    fn test_clear_completed_preserves_order() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        model.add_todo("c").unwrap();
        model.add_todo("d").unwrap();
        let view = model.get_view();
        model.toggle(view.todos[1].id).unwrap();
        model.toggle(view.todos[3].id).unwrap();

        model.clear_completed().unwrap();
        assert_eq!(titles(&model.get_view()), vec!["a", "c"]);
    }

    #[test]
    fn test_selected_tab_filters_view() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        model.toggle(model.get_view().todos[1].id).unwrap();

        model.set_selected_tab(Tab::Completed).unwrap();
        let view = model.get_view();
        assert_eq!(titles(&view), vec!["b"]);
        assert!(view.todos[0].completed);

        model.set_selected_tab(Tab::Active).unwrap();
        assert_eq!(titles(&model.get_view()), vec!["a"]);

        model.set_selected_tab(Tab::All).unwrap();
        assert_eq!(titles(&model.get_view()), vec!["a", "b"]);
    }

    #[test]
    fn test_counts_invariant_across_tabs() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        model.add_todo("c").unwrap();
        model.toggle(model.get_view().todos[0].id).unwrap();

        for tab in Tab::all() {
            model.set_selected_tab(*tab).unwrap();
            let view = model.get_view();
            assert_eq!(view.active_count + view.completed_count, 3);
        }
    }

    #[test]
    fn test_mark_active_is_exclusive() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        let view = model.get_view();
        let (first, second) = (view.todos[0].id, view.todos[1].id);

        model.mark_active(first).unwrap();
        model.mark_active(second).unwrap();

        let view = model.get_view();
        assert!(!view.todos[0].active);
        assert!(view.todos[1].active);
        assert_eq!(view.todos.iter().filter(|t| t.active).count(), 1);
    }

    #[test]
    fn test_mark_inactive_touches_one_todo() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        let view = model.get_view();
        model.mark_active(view.todos[0].id).unwrap();

        model.mark_inactive(view.todos[1].id).unwrap();
        assert!(model.get_view().todos[0].active);

        model.mark_inactive(view.todos[0].id).unwrap();
        assert!(model.get_view().todos.iter().all(|t| !t.active));
    }

    #[test]
    fn test_tick_tracks_active_todo_only() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        let id = model.get_view().todos[0].id;
        model.mark_active(id).unwrap();

        let work_secs = model.settings().work_secs;
        model.tick().unwrap();
        model.tick().unwrap();

        let view = model.get_view();
        assert_eq!(view.todos[0].time_spent, 2);
        assert_eq!(view.todos[0].timer.time_left, work_secs - 2);
        assert_eq!(view.todos[1].time_spent, 0);
        assert_eq!(view.todos[1].timer.time_left, work_secs);
        assert_eq!(view.total_time_spent, 2);
    }

    #[test]
    fn test_tick_with_no_active_leaves_total_unchanged() {
        let (mut model, _dir) = test_model();
        model.add_todo("a").unwrap();

        model.tick().unwrap();
        model.tick().unwrap();

        let view = model.get_view();
        assert_eq!(view.total_time_spent, 0);
        assert_eq!(view.todos[0].time_spent, 0);
    }

    #[test]
    fn test_updated_settings_apply_to_new_todos_not_running_timers() {
        let (mut model, _dir) = test_model();
        model.add_todo("old").unwrap();
        let old_left = model.get_view().todos[0].timer.time_left;

        model
            .update_pomodoro_settings(PomodoroSettings {
                work_secs: 10,
                rest_secs: 3,
            })
            .unwrap();
        model.add_todo("new").unwrap();

        let view = model.get_view();
        assert_eq!(view.todos[0].timer.time_left, old_left);
        assert_eq!(view.todos[1].timer.time_left, 10);
    }

    #[test]
    fn test_timer_flips_through_phases_under_tick() {
        let (mut model, _dir) = test_model();
        model
            .update_pomodoro_settings(PomodoroSettings {
                work_secs: 2,
                rest_secs: 1,
            })
            .unwrap();
        model.add_todo("a").unwrap();
        model.mark_active(model.get_view().todos[0].id).unwrap();

        // 2 ticks exhaust the work phase, the 3rd flips into rest
        model.tick().unwrap();
        model.tick().unwrap();
        let timer = model.get_view().todos[0].timer;
        assert_eq!(timer.phase, PomodoroPhase::Work);
        assert_eq!(timer.time_left, 0);

        model.tick().unwrap();
        let timer = model.get_view().todos[0].timer;
        assert_eq!(timer.phase, PomodoroPhase::Rest);
        assert_eq!(timer.time_left, 1);
    }

    #[test]
    fn test_listeners_fire_per_mutation_in_order() {
        let (mut model, _dir) = test_model();
        let calls: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let first = calls.clone();
        model.subscribe(Box::new(move || first.borrow_mut().push("first")));
        let second = calls.clone();
        model.subscribe(Box::new(move || second.borrow_mut().push("second")));

        model.add_todo("a").unwrap();
        assert_eq!(*calls.borrow(), vec!["first", "second"]);

        model.set_selected_tab(Tab::Active).unwrap();
        assert_eq!(calls.borrow().len(), 4);

        // get_view is pure and must not notify
        let _ = model.get_view();
        assert_eq!(calls.borrow().len(), 4);
    }

    #[test]
    fn test_absent_id_ops_still_persist_and_notify() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path().to_path_buf());

        let mut model = TodoModel::new(store.clone(), "todos");
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();

        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        model.subscribe(Box::new(move || *counter.borrow_mut() += 1));

        // Remove the slot file so a rewrite is observable
        std::fs::remove_file(dir.path().join("todos.json")).unwrap();
        assert!(store.load("todos").is_empty());

        model.toggle(Uuid::new_v4()).unwrap();
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(store.load("todos").len(), 2);

        model.destroy(Uuid::new_v4()).unwrap();
        model.save(Uuid::new_v4(), "ignored").unwrap();
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(titles(&model.get_view()), vec!["a", "b"]);
        assert_eq!(store.load("todos").len(), 2);
    }

    #[test]
    fn test_mutations_persist_to_the_slot() {
        let dir = tempdir().unwrap();
        let store = SlotStore::new(dir.path().to_path_buf());

        let mut model = TodoModel::new(store.clone(), "todos");
        model.add_todo("a").unwrap();
        model.add_todo("b").unwrap();
        model.toggle(model.get_view().todos[0].id).unwrap();

        // A second model over the same slot sees the persisted list
        let reloaded = TodoModel::new(store, "todos");
        let view = reloaded.get_view();
        assert_eq!(titles(&view), vec!["a", "b"]);
        assert!(view.todos[0].completed);
    }

    #[test]
    fn test_construction_from_unreadable_slot_starts_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("todos.json"), "{broken").unwrap();
        let store = SlotStore::new(dir.path().to_path_buf());

        let model = TodoModel::new(store, "todos");
        assert!(model.get_view().todos.is_empty());
    }
}
