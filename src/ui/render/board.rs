use super::Frame;
use crate::board::{Priority, Task};
use crate::dnd::DragId;
use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use crate::utils::text_processing::replace_mention_urls;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::collections::HashMap;

/// Height of one task card in rows, borders included.
///
const CARD_HEIGHT: u16 = 3;

/// Render the active board: kanban columns on the left, the selected
/// task's details on the right, and the drag ghost on top.
///
pub fn board(frame: &mut Frame, size: Rect, state: &mut State, theme: &Theme) {
    if state.board().is_none() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(state.active_board_kind().title())
            .border_style(styling::normal_block_border_style(theme));
        let frame_index = *state.get_spinner_index();
        let text = Paragraph::new(format!(
            "{} Loading board...",
            spinner::FRAMES[frame_index]
        ))
        .block(block)
        .alignment(Alignment::Center)
        .style(styling::dim_text_style(theme));
        frame.render_widget(text, size);
        return;
    }

    // Split into columns area and details area (70/30 split)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(size);

    render_columns(frame, chunks[0], state, theme);
    render_details(frame, chunks[1], state, theme);
    render_ghost(frame, size, state, theme);
}

fn render_columns(frame: &mut Frame, size: Rect, state: &mut State, theme: &Theme) {
    let columns = state.visible_columns();
    let tasks = state.visible_tasks();
    let selected_column = state.selected_column_index();
    let selected_task = state.selected_task_index();
    let dragged_task = match state.active_drag() {
        Some(DragId::Task(id)) => Some(id.to_owned()),
        _ => None,
    };

    if columns.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Board")
            .border_style(styling::normal_block_border_style(theme));
        let text = Paragraph::new("No columns. Press C to create one.")
            .block(block)
            .alignment(Alignment::Center)
            .style(styling::dim_text_style(theme));
        frame.render_widget(text, size);
        state.droppables_mut().clear();
        return;
    }

    let constraints: Vec<Constraint> = (0..columns.len())
        .map(|_| Constraint::Percentage((100 / columns.len().max(1)) as u16))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints.as_slice())
        .split(size);

    // The registry is rebuilt every frame from what is actually drawn.
    let droppables = state.droppables_mut();
    droppables.clear();

    for (idx, column) in columns.iter().enumerate() {
        let column_area = chunks[idx];
        droppables.register_column(&column.id, column_area);
        let column_tasks: &[Task] = tasks
            .get(&column.id)
            .map(|t| t.as_slice())
            .unwrap_or(&[]);

        let title = format!("{} ({})", column.name, column_tasks.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if idx == selected_column {
                styling::active_block_border_style(theme)
            } else {
                styling::normal_block_border_style(theme)
            });
        let inner = block.inner(column_area);
        frame.render_widget(block, column_area);

        if column_tasks.is_empty() {
            let empty = Paragraph::new("No tasks")
                .alignment(Alignment::Center)
                .style(styling::dim_text_style(theme));
            frame.render_widget(empty, inner);
            continue;
        }

        let capacity = (inner.height / CARD_HEIGHT) as usize;
        for (task_idx, task) in column_tasks.iter().take(capacity).enumerate() {
            let card_area = Rect::new(
                inner.x,
                inner.y + (task_idx as u16) * CARD_HEIGHT,
                inner.width,
                CARD_HEIGHT,
            );
            droppables.register_task(&task.id, &column.id, card_area);
            let is_selected = idx == selected_column && task_idx == selected_task;
            let is_dragged = dragged_task.as_deref() == Some(task.id.as_str());
            render_card(frame, card_area, task, theme, is_selected, is_dragged);
        }

        if column_tasks.len() > capacity {
            let overflow = Paragraph::new(format!("+ {} more", column_tasks.len() - capacity))
                .alignment(Alignment::Center)
                .style(styling::dim_text_style(theme));
            let overflow_area = Rect::new(
                inner.x,
                inner.y + inner.height.saturating_sub(1),
                inner.width,
                1,
            );
            frame.render_widget(overflow, overflow_area);
        }
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    task: &Task,
    theme: &Theme,
    is_selected: bool,
    is_dragged: bool,
) {
    let border_style = if is_dragged {
        styling::dim_text_style(theme)
    } else if is_selected {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut spans = vec![Span::styled(
        priority_marker(task.priority),
        priority_style(task.priority, theme),
    )];
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        task.name.to_owned(),
        if is_selected {
            styling::active_list_item_style(theme)
        } else if is_dragged {
            styling::dim_text_style(theme)
        } else {
            styling::normal_text_style(theme)
        },
    ));
    if let Some(assignee) = task.assignees.first() {
        spans.push(Span::styled(
            format!(" @{}", assignee.name),
            styling::dim_text_style(theme),
        ));
    }

    let card = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(card, area);
}

fn render_details(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Details")
        .border_style(styling::normal_block_border_style(theme));

    let task = match state.selected_task() {
        Some(task) => task,
        None => {
            let text = Paragraph::new("Select a task to view details")
                .block(block)
                .alignment(Alignment::Center)
                .style(styling::dim_text_style(theme));
            frame.render_widget(text, size);
            return;
        }
    };

    let label_style = Style::default().fg(theme.warning.to_color());
    let mut lines = vec![
        Line::from(Span::styled(
            task.name.to_owned(),
            styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status: ", label_style),
            Span::styled(task.status.label(), styling::normal_text_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", label_style),
            Span::styled(
                task.priority.label(),
                priority_style(task.priority, theme),
            ),
        ]),
        Line::from(vec![
            Span::styled("Reporter: ", label_style),
            Span::styled(task.reporter.name.to_owned(), styling::normal_text_style(theme)),
        ]),
    ];

    if task.assignees.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Assignees: ", label_style),
            Span::styled("Unassigned", styling::dim_text_style(theme)),
        ]));
    } else {
        let names: Vec<String> = task.assignees.iter().map(|u| u.name.to_owned()).collect();
        lines.push(Line::from(vec![
            Span::styled("Assignees: ", label_style),
            Span::styled(names.join(", "), styling::normal_text_style(theme)),
        ]));
    }

    if !task.labels.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Labels: ", label_style),
            Span::styled(task.labels.join(", "), styling::normal_text_style(theme)),
        ]));
    }

    if let Some(due) = task.due {
        lines.push(Line::from(vec![
            Span::styled("Due: ", label_style),
            Span::styled(
                format!("{} → {}", due.start, due.end),
                styling::normal_text_style(theme),
            ),
        ]));
    }

    if !task.description.trim().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Description:", label_style)));
        for line in task.description.lines().take(8) {
            lines.push(Line::from(Span::styled(
                line.to_owned(),
                styling::normal_text_style(theme),
            )));
        }
    }

    if !task.comments.is_empty() {
        let user_map: HashMap<String, String> = task
            .comments
            .iter()
            .map(|c| (c.author.id.to_owned(), c.author.name.to_owned()))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Comments ({}):", task.comments.len()),
            label_style,
        )));
        for comment in task.comments.iter().take(3) {
            lines.push(Line::from(Span::styled(
                format!(
                    "{}: {}",
                    comment.author.name,
                    replace_mention_urls(&comment.text, &user_map)
                ),
                styling::dim_text_style(theme),
            )));
        }
    }

    let text = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(text, size);
}

/// Draw the dragged entity following the pointer.
///
fn render_ghost(frame: &mut Frame, bounds: Rect, state: &State, theme: &Theme) {
    if !state.is_dragging() {
        return;
    }
    let rect = match state.ghost_rect() {
        Some(rect) => rect,
        None => return,
    };
    let name = match state.dragged_name() {
        Some(name) => name,
        None => return,
    };
    let rect = rect.intersection(bounds);
    if rect.width < 3 || rect.height < 3 {
        return;
    }
    frame.render_widget(Clear, rect);
    let ghost = Paragraph::new(name)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(theme)),
        )
        .style(styling::active_list_item_style(theme));
    frame.render_widget(ghost, rect);
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "▁",
        Priority::Medium => "▄",
        Priority::High => "▆",
        Priority::Urgent => "█",
    }
}

fn priority_style(priority: Priority, theme: &Theme) -> Style {
    match priority {
        Priority::Low => styling::dim_text_style(theme),
        Priority::Medium => styling::normal_text_style(theme),
        Priority::High => Style::default().fg(theme.warning.to_color()),
        Priority::Urgent => Style::default().fg(theme.danger.to_color()),
    }
}
