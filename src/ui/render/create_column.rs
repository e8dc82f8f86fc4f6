use super::create_task::centered_rect;
use super::Frame;
use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the create-column modal over the board.
///
pub fn create_column(frame: &mut Frame, size: Rect, state: &mut State, theme: &Theme) {
    let area = centered_rect(size, 50, 3);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("New Column")
        .border_style(styling::active_block_border_style(theme));
    let name = Paragraph::new(Line::from(Span::styled(
        format!("{}█", state.get_form_name()),
        styling::normal_text_style(theme),
    )))
    .block(block);
    frame.render_widget(name, area);
}
