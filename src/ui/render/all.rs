use super::Frame;
use crate::state::{State, View};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the whole interface according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let theme = state.get_theme().to_owned();
    let show_log = state.is_log_pane_shown();

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(2),
    ];
    if show_log {
        constraints.insert(2, Constraint::Length(8));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    header(frame, chunks[0], state, &theme);

    let main = chunks[1];
    super::board::board(frame, main, state, &theme);
    let view = state.current_view().to_owned();
    match view {
        View::Board => {}
        View::CreateTask => super::create_task::create_task(frame, main, state, &theme),
        View::CreateColumn => super::create_column::create_column(frame, main, state, &theme),
    }

    if show_log {
        super::log(frame, chunks[2], state, &theme);
        super::footer(frame, chunks[3], state, &theme);
    } else {
        super::footer(frame, chunks[2], state, &theme);
    }
}

/// Render the board tabs and active filter summary.
///
fn header(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let active = state.active_board_kind();
    let mut spans: Vec<Span> = vec![];
    for (i, kind) in crate::board::BoardKind::all().into_iter().enumerate() {
        let label = format!(" {} {} ", i + 1, kind.title());
        if kind == active {
            spans.push(Span::styled(
                label,
                styling::active_list_item_style(theme).add_modifier(Modifier::UNDERLINED),
            ));
        } else {
            spans.push(Span::styled(label, styling::dim_text_style(theme)));
        }
        spans.push(Span::raw(" "));
    }

    let filters = state.get_filters();
    let mut summary: Vec<String> = vec![];
    if state.is_search_mode() || !filters.name_query.is_empty() {
        summary.push(format!("/{}", filters.name_query));
    }
    if let Some(priority) = filters.priorities.first() {
        summary.push(format!("prio:{}", priority.label()));
    }
    if let Some(status) = filters.statuses.first() {
        summary.push(format!("status:{}", status.label()));
    }
    if !filters.assignee_ids.is_empty() {
        summary.push("mine".to_string());
    }
    if !summary.is_empty() {
        spans.push(Span::styled(
            format!("  {}", summary.join("  ")),
            styling::active_list_item_style(theme),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("triage-tui")
        .border_style(styling::normal_block_border_style(theme));
    let tabs = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(tabs, size);
}
