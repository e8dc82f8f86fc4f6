use super::Frame;
use crate::state::{FormField, State};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the create-task modal over the board.
///
pub fn create_task(frame: &mut Frame, size: Rect, state: &mut State, theme: &Theme) {
    let area = centered_rect(size, 60, 14);
    frame.render_widget(Clear, area);

    let column_name = state
        .get_form_target_column()
        .and_then(|id| {
            state
                .board()
                .and_then(|s| s.columns().iter().find(|c| c.id == id).map(|c| c.name.to_owned()))
        })
        .unwrap_or_else(|| "column".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("New Task → {}", column_name))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(inner);

    let field = state.get_form_field();
    let name_block = Block::default()
        .borders(Borders::ALL)
        .title("Name")
        .border_style(if field == FormField::Name {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        });
    let name_text = if field == FormField::Name {
        format!("{}█", state.get_form_name())
    } else {
        state.get_form_name().to_string()
    };
    let name = Paragraph::new(Line::from(Span::styled(
        name_text,
        styling::normal_text_style(theme),
    )))
    .block(name_block);
    frame.render_widget(name, chunks[0]);

    let description_block = Block::default()
        .borders(Borders::ALL)
        .title("Description")
        .border_style(if field == FormField::Description {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        });
    let textarea = state.get_form_description_textarea();
    textarea.set_block(description_block);
    frame.render_widget(textarea.widget(), chunks[1]);
}

/// Return a centered rect of the given size clamped to the container.
///
pub fn centered_rect(container: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(container.width);
    let height = height.min(container.height);
    Rect::new(
        container.x + (container.width.saturating_sub(width)) / 2,
        container.y + (container.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}
