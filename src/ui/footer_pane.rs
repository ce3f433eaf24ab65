use crate::domain::{format_time_spent, Tab, TodoView};
use crate::ui::styles::{
    border_style, default_style, hint_style, selected_tab_style, tab_style, time_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Pluralize "item" for the remaining count
fn items_left(count: usize) -> String {
    if count == 1 {
        format!("{} item left", count)
    } else {
        format!("{} items left", count)
    }
}

/// Render the summary footer: remaining count, filter tabs, clear-completed
/// hint, and the cumulative tracked time
pub fn render_footer_pane(f: &mut Frame, view: &TodoView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style());

    // Empty list: just the frame
    if !view.show_footer {
        f.render_widget(block, area);
        return;
    }

    let mut summary = vec![Span::styled(items_left(view.active_count), default_style())];
    if view.completed_count > 0 {
        summary.push(Span::styled(
            format!("   ·   C clear {} completed", view.completed_count),
            hint_style(),
        ));
    }

    let mut tabs = Vec::new();
    for (i, tab) in Tab::all().iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw("  "));
        }
        let style = if *tab == view.selected_tab {
            selected_tab_style()
        } else {
            tab_style()
        };
        tabs.push(Span::styled(format!("[{}]", tab.to_tag()), style));
    }
    tabs.push(Span::styled(
        format!(
            "      total time spent: {}",
            format_time_spent(view.total_time_spent)
        ),
        time_style(),
    ));

    let paragraph = Paragraph::new(vec![Line::from(summary), Line::from(tabs)]).block(block);
    f.render_widget(paragraph, area);
}
