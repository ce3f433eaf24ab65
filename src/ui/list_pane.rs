use crate::app::AppState;
use crate::domain::{format_countdown, format_time_spent, PomodoroPhase, Todo, TodoView};
use crate::ui::styles::{
    border_style, completed_style, default_style, rest_style, selected_style, time_style,
    title_style, work_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the todo list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, view: &TodoView, area: Rect) {
    let title = format!(" Todos — {} ", view.selected_tab.to_tag());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if !view.show_main {
        let empty = Paragraph::new(Line::from(Span::styled(
            " nothing to show — press 'a' to add a todo ",
            default_style(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .todos
        .iter()
        .enumerate()
        .map(|(idx, todo)| {
            let line = create_todo_line(todo);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

/// Create a single line for a todo
/// Format: [x] Write proposal  ⏱ 12m 5s  ▶ WORK 24:31
fn create_todo_line(todo: &Todo) -> Line<'static> {
    let mut spans = Vec::new();

    // Completion checkbox
    let checkbox = if todo.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox.to_string()));

    // Title (struck through when completed)
    if todo.completed {
        spans.push(Span::styled(todo.title.clone(), completed_style()));
    } else {
        spans.push(Span::raw(todo.title.clone()));
    }

    // Tracked time, once any has accumulated
    if todo.time_spent > 0 {
        spans.push(Span::styled(
            format!("  ⏱ {}", format_time_spent(todo.time_spent)),
            time_style(),
        ));
    }

    // Pomodoro badge for the tracked todo
    if todo.active {
        let badge = format!(
            "  ▶ {} {}",
            todo.timer.phase.label(),
            format_countdown(todo.timer.time_left)
        );
        let badge_style = match todo.timer.phase {
            PomodoroPhase::Work => work_style(),
            PomodoroPhase::Rest => rest_style(),
        };
        spans.push(Span::styled(badge, badge_style));
    }

    Line::from(spans)
}
