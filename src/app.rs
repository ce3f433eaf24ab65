use crate::domain::{PomodoroPhase, Tab, TodoView, UiMode};
use crate::model::TodoModel;
use crate::notifications;
use crate::ticker;
use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Text input state for adding or editing a todo
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub buffer: String,
}

/// Main application state: the todo model plus local interaction state.
///
/// Everything rendered comes from `model.get_view()`; the app only adds the
/// selection, the current input buffer, and the tick cadence. Input is
/// trimmed here before it reaches the model, which accepts titles as-is.
pub struct AppState {
    pub model: TodoModel,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input: InputState,
    pub last_tick: Instant,
    needs_redraw: Rc<Cell<bool>>,
    editing_id: Option<uuid::Uuid>,
}

impl AppState {
    pub fn new(mut model: TodoModel) -> Self {
        // Re-render on every model mutation
        let needs_redraw = Rc::new(Cell::new(true));
        let flag = needs_redraw.clone();
        model.subscribe(Box::new(move || flag.set(true)));

        Self {
            model,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input: InputState::default(),
            last_tick: Instant::now(),
            needs_redraw,
            editing_id: None,
        }
    }

    /// Current projection for rendering
    pub fn view(&self) -> TodoView {
        self.model.get_view()
    }

    /// Take the redraw flag, clearing it
    pub fn take_redraw(&mut self) -> bool {
        self.needs_redraw.replace(false)
    }

    fn mark_redraw(&mut self) {
        self.needs_redraw.set(true);
    }

    /// Clamp the selection to the currently visible rows
    fn clamp_selection(&mut self) {
        let shown = self.view().todos.len();
        if shown == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= shown {
            self.selected_index = shown - 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.mark_redraw();
        }
    }

    pub fn move_selection_down(&mut self) {
        let shown = self.view().todos.len();
        if shown > 0 && self.selected_index < shown - 1 {
            self.selected_index += 1;
            self.mark_redraw();
        }
    }

    /// Id of the todo under the cursor, if any
    fn selected_id(&self) -> Option<uuid::Uuid> {
        self.view().todos.get(self.selected_index).map(|t| t.id)
    }

    /// Flip completion on the selected todo
    pub fn toggle_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_id() {
            self.model.toggle(id)?;
            self.clamp_selection();
        }
        Ok(())
    }

    /// Mark every todo complete, or every todo incomplete when none are
    /// left to complete (the toggle-all checkbox reads as checked iff no
    /// active todos remain)
    pub fn toggle_all(&mut self) -> Result<()> {
        let checked = self.view().active_count > 0;
        self.model.toggle_all(checked)?;
        self.clamp_selection();
        Ok(())
    }

    /// Delete the selected todo
    pub fn destroy_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_id() {
            self.model.destroy(id)?;
            self.clamp_selection();
        }
        Ok(())
    }

    /// Start or stop time tracking on the selected todo
    pub fn toggle_tracking_selected(&mut self) -> Result<()> {
        let selected = self.view().todos.get(self.selected_index).cloned();
        if let Some(todo) = selected {
            if todo.active {
                self.model.mark_inactive(todo.id)?;
            } else {
                self.model.mark_active(todo.id)?;
            }
        }
        Ok(())
    }

    pub fn clear_completed(&mut self) -> Result<()> {
        self.model.clear_completed()?;
        self.clamp_selection();
        Ok(())
    }

    pub fn set_tab(&mut self, tab: Tab) -> Result<()> {
        self.model.set_selected_tab(tab)?;
        self.clamp_selection();
        Ok(())
    }

    pub fn cycle_tab(&mut self) -> Result<()> {
        let next = self.model.selected_tab().next();
        self.set_tab(next)
    }

    /// Open the input form for a new todo
    pub fn start_add_todo(&mut self) {
        self.ui_mode = UiMode::AddingTodo;
        self.input = InputState::default();
        self.mark_redraw();
    }

    /// Open the input form pre-filled with the selected todo's title
    pub fn start_edit_todo(&mut self) {
        let selected = self.view().todos.get(self.selected_index).cloned();
        if let Some(todo) = selected {
            self.ui_mode = UiMode::EditingTodo;
            self.input = InputState { buffer: todo.title };
            self.editing_id = Some(todo.id);
            self.mark_redraw();
        }
    }

    pub fn input_push(&mut self, c: char) {
        self.input.buffer.push(c);
        self.mark_redraw();
    }

    pub fn input_backspace(&mut self) {
        self.input.buffer.pop();
        self.mark_redraw();
    }

    /// Submit the input form. Blank input adds nothing; a blank edit
    /// deletes the todo being edited.
    pub fn submit_input(&mut self) -> Result<()> {
        let trimmed = self.input.buffer.trim().to_string();
        match self.ui_mode {
            UiMode::AddingTodo => {
                if !trimmed.is_empty() {
                    self.model.add_todo(trimmed)?;
                }
            }
            UiMode::EditingTodo => {
                if let Some(id) = self.editing_id.take() {
                    if trimmed.is_empty() {
                        self.model.destroy(id)?;
                    } else {
                        self.model.save(id, trimmed)?;
                    }
                }
            }
            UiMode::Normal => {}
        }
        self.ui_mode = UiMode::Normal;
        self.input = InputState::default();
        self.clamp_selection();
        self.mark_redraw();
        Ok(())
    }

    pub fn cancel_input(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.input = InputState::default();
        self.editing_id = None;
        self.mark_redraw();
    }

    /// Drive the model's one-second tick from the event loop. Called after
    /// every poll timeout; ticks once per elapsed whole second so a slow
    /// redraw doesn't lose tracked time.
    pub fn maybe_tick(&mut self) -> Result<()> {
        let tick = ticker::model_tick_duration();
        while self.last_tick.elapsed() >= tick {
            self.last_tick += tick;
            self.tick_model()?;
        }
        Ok(())
    }

    /// Advance the model by one second and notify on phase completions
    pub fn tick_model(&mut self) -> Result<()> {
        let tracked_before: Vec<_> = self
            .view()
            .todos
            .iter()
            .filter(|t| t.active)
            .map(|t| (t.id, t.timer.phase, t.title.clone()))
            .collect();

        self.model.tick()?;

        let view = self.view();
        for (id, phase_before, title) in tracked_before {
            if let Some(after) = view.todos.iter().find(|t| t.id == id) {
                if after.timer.phase != phase_before {
                    match phase_before {
                        PomodoroPhase::Work => notifications::notify_work_phase_done(&title),
                        PomodoroPhase::Rest => notifications::notify_rest_phase_done(&title),
                    }
                }
            }
        }
        Ok(())
    }
}
