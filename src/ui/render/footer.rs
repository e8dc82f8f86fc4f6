use super::Frame;
use crate::state::{State, View};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render contextual key hints.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let hints: &[(&str, &str)] = if state.is_search_mode() {
        &[
            ("Enter", "apply"),
            ("Esc", "clear"),
            ("type", "search tasks"),
        ]
    } else if state.is_debug_mode() {
        &[("j/k", "navigate log"), ("Esc", "exit log navigation")]
    } else {
        match state.current_view() {
            View::Board => &[
                ("drag", "move task"),
                ("h/l j/k", "navigate"),
                ("H/L J/K", "move"),
                ("/", "search"),
                ("p/f/m", "filters"),
                ("n", "task"),
                ("C", "column"),
                ("1-3", "boards"),
                ("q", "quit"),
            ],
            View::CreateTask => &[
                ("Tab", "field"),
                ("Enter", "save (name field)"),
                ("Esc", "cancel"),
            ],
            View::CreateColumn => &[("Enter", "save"), ("Esc", "cancel")],
        }
    };

    let mut spans: Vec<Span> = vec![];
    for (key, action) in hints {
        spans.push(Span::styled(
            format!(" {} ", key),
            styling::active_list_item_style(theme),
        ));
        spans.push(Span::styled(
            format!("{}  ", action),
            styling::dim_text_style(theme),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, size);
}
