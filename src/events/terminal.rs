use crate::board::BoardKind;
use crate::state::{FormField, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{
        Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Pointer(MouseEvent),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                match event::read().unwrap() {
                    CrosstermEvent::Key(key) => tx_clone.send(Event::Input(key)).unwrap(),
                    CrosstermEvent::Mouse(mouse) => {
                        tx_clone.send(Event::Pointer(mouse)).unwrap()
                    }
                    _ => {}
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => return self.handle_key(event, state),
            Event::Pointer(event) => self.handle_pointer(event, state),
            Event::Tick => {
                state.tick();
            }
        }
        Ok(true)
    }

    /// Route pointer events into the drag gesture.
    ///
    fn handle_pointer(&self, event: MouseEvent, state: &mut State) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                state.pointer_down(event.column, event.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                state.pointer_drag(event.column, event.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                state.pointer_up(event.column, event.row);
            }
            _ => {}
        }
    }

    fn handle_key(&self, event: KeyEvent, state: &mut State) -> Result<bool> {
        match event {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                debug!("Processing exit terminal event '{:?}'...", event);
                return Ok(false);
            }
            // Search input takes every character first
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } if state.is_search_mode() => {
                state.add_search_char(c);
            }
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } if state.is_search_mode() => {
                state.remove_search_char();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } if state.is_search_mode() => {
                state.confirm_search();
            }
            KeyEvent {
                code: KeyCode::Esc, ..
            } if state.is_search_mode() => {
                debug!("Processing exit search mode event '{:?}'...", event);
                state.exit_search_mode();
            }
            // Form views route characters into the focused field
            KeyEvent { code, modifiers, .. }
                if matches!(state.current_view(), View::CreateTask)
                    && state.get_form_field() == FormField::Description
                    && !matches!(code, KeyCode::Tab | KeyCode::Esc) =>
            {
                state
                    .get_form_description_textarea()
                    .input(KeyEvent::new(code, modifiers));
            }
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } if matches!(
                state.current_view(),
                View::CreateTask | View::CreateColumn
            ) =>
            {
                state.add_form_name_char(c);
            }
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } if matches!(
                state.current_view(),
                View::CreateTask | View::CreateColumn
            ) =>
            {
                state.remove_form_name_char();
            }
            KeyEvent {
                code: KeyCode::Tab, ..
            } if matches!(state.current_view(), View::CreateTask) => {
                state.next_form_field();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } if matches!(state.current_view(), View::CreateTask) => {
                state.submit_create_task();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } if matches!(state.current_view(), View::CreateColumn) => {
                state.submit_create_column();
            }
            KeyEvent {
                code: KeyCode::Esc, ..
            } if matches!(
                state.current_view(),
                View::CreateTask | View::CreateColumn
            ) =>
            {
                state.close_form();
            }
            // Log navigation while in debug mode
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } if state.is_debug_mode() => {
                state.next_debug();
            }
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } if state.is_debug_mode() => {
                state.previous_debug();
            }
            KeyEvent {
                code: KeyCode::Esc, ..
            } if state.is_debug_mode() => {
                debug!("Processing exit debug mode (Esc) event '{:?}'...", event);
                state.exit_debug_mode();
            }
            // Board view
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            } => {
                debug!("Processing exit terminal event '{:?}'...", event);
                return Ok(false);
            }
            KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                if state.is_dragging() {
                    state.cancel_drag();
                }
            }
            KeyEvent {
                code: KeyCode::Char('/'),
                ..
            } => {
                state.enter_search_mode();
            }
            KeyEvent {
                code: KeyCode::Char('1'),
                ..
            } => {
                state.select_board(BoardKind::Moderation);
            }
            KeyEvent {
                code: KeyCode::Char('2'),
                ..
            } => {
                state.select_board(BoardKind::Support);
            }
            KeyEvent {
                code: KeyCode::Char('3'),
                ..
            } => {
                state.select_board(BoardKind::Improvement);
            }
            KeyEvent {
                code: KeyCode::Char('h') | KeyCode::Left,
                modifiers: KeyModifiers::NONE,
                ..
            } => {
                state.previous_column();
            }
            KeyEvent {
                code: KeyCode::Char('l') | KeyCode::Right,
                modifiers: KeyModifiers::NONE,
                ..
            } => {
                state.next_column();
            }
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                modifiers: KeyModifiers::NONE,
                ..
            } => {
                state.next_task();
            }
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                modifiers: KeyModifiers::NONE,
                ..
            } => {
                state.previous_task();
            }
            KeyEvent {
                code: KeyCode::Char('H'),
                ..
            } => {
                state.move_selected_task_sideways(-1);
            }
            KeyEvent {
                code: KeyCode::Char('L'),
                ..
            } => {
                state.move_selected_task_sideways(1);
            }
            KeyEvent {
                code: KeyCode::Char('J'),
                ..
            } => {
                state.move_selected_task_vertically(1);
            }
            KeyEvent {
                code: KeyCode::Char('K'),
                ..
            } => {
                state.move_selected_task_vertically(-1);
            }
            KeyEvent {
                code: KeyCode::Char('n'),
                ..
            } => {
                state.open_create_task();
            }
            KeyEvent {
                code: KeyCode::Char('C'),
                ..
            } => {
                state.open_create_column();
            }
            KeyEvent {
                code: KeyCode::Char('p'),
                ..
            } => {
                state.cycle_priority_filter();
            }
            KeyEvent {
                code: KeyCode::Char('f'),
                ..
            } => {
                state.cycle_status_filter();
            }
            KeyEvent {
                code: KeyCode::Char('m'),
                ..
            } => {
                state.toggle_mine_filter();
            }
            KeyEvent {
                code: KeyCode::Char('g'),
                ..
            } => {
                state.toggle_log_pane();
            }
            KeyEvent {
                code: KeyCode::Char('d'),
                ..
            } => {
                state.enter_debug_mode();
            }
            _ => {}
        }
        Ok(true)
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}
