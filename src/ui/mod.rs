pub mod footer_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use footer_pane::render_footer_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI from the current projection
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let view = app.view();

    render_keybindings(f, layout.keybindings_area);
    render_list_pane(f, app, &view, layout.list_area);
    render_footer_pane(f, &view, layout.footer_area);

    // Input form floats above everything while adding/editing
    if app.ui_mode != UiMode::Normal {
        render_input_form(f, app, size);
    }
}
