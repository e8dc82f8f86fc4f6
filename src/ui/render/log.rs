use super::Frame;
use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let title = if state.is_debug_mode() {
        "Log (j/k: navigate, Esc: exit)"
    } else {
        "Log (d: navigate, g: hide)"
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let debug_entries = state.get_debug_entries();
    let items: Vec<ListItem> = debug_entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if state.is_debug_mode() && i == state.get_debug_index() {
                styling::active_list_item_style(theme)
            } else {
                styling::dim_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(entry.to_owned(), style)))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(block);

    let mut list_state = ListState::default();
    list_state.select(if debug_entries.is_empty() {
        None
    } else {
        Some(state.get_debug_index())
    });
    frame.render_stateful_widget(list, size, &mut list_state);
}
