use crate::app::SyncEventSender;
use crate::board::{
    filter_board, BoardKind, BoardStore, Column, Task, TaskFilters, Priority, Status, User,
};
use crate::dnd::{DragController, DragId, DragOutcome, DroppableMap};
use crate::events::sync::Event as SyncEvent;
use crate::ui::SPINNER_FRAME_COUNT;
use log::*;
use ratatui::layout::Rect;
use std::collections::HashMap;
use tui_textarea::TextArea;

use super::form::FormField;
use super::navigation::View;

/// Houses data representative of application state.
///
pub struct State {
    sync_sender: Option<SyncEventSender>,
    operator: User,
    terminal_size: Rect,
    spinner_index: usize,
    loading: bool,
    view_stack: Vec<View>,
    boards: HashMap<BoardKind, BoardStore>,
    active_board: BoardKind,
    drag: DragController,
    droppables: DroppableMap,
    pointer: (u16, u16),
    filters: TaskFilters,
    search_mode: bool,
    selected_column: usize,
    selected_task: usize,
    show_log_pane: bool,
    debug_mode: bool,
    debug_index: usize,
    debug_entries: Vec<String>,
    theme: crate::ui::Theme,
    // Form input fields
    form_name: String,
    form_description_textarea: TextArea<'static>,
    form_field: FormField,
    form_target_column: Option<String>,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            sync_sender: None,
            operator: User {
                id: "operator".to_string(),
                name: "Console Operator".to_string(),
                email: String::new(),
            },
            terminal_size: Rect::default(),
            spinner_index: 0,
            loading: false,
            view_stack: vec![View::Board],
            boards: HashMap::new(),
            active_board: BoardKind::Moderation,
            drag: DragController::default(),
            droppables: DroppableMap::default(),
            pointer: (0, 0),
            filters: TaskFilters::default(),
            search_mode: false,
            selected_column: 0,
            selected_task: 0,
            show_log_pane: false,
            debug_mode: false,
            debug_index: 0,
            debug_entries: vec![],
            theme: crate::ui::Theme::default(),
            form_name: String::new(),
            form_description_textarea: TextArea::default(),
            form_field: FormField::Name,
            form_target_column: None,
        }
    }
}

impl State {
    pub fn new(
        sync_sender: SyncEventSender,
        operator: User,
        theme: crate::ui::Theme,
        default_board: BoardKind,
    ) -> Self {
        State {
            sync_sender: Some(sync_sender),
            operator,
            active_board: default_board,
            theme,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &crate::ui::Theme {
        &self.theme
    }

    /// Return the operator identity used for reporter defaults.
    ///
    pub fn get_operator(&self) -> &User {
        &self.operator
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    /// Return the terminal size.
    ///
    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Return whether a board fetch is in flight.
    ///
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) -> &mut Self {
        self.loading = loading;
        self
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        self.view_stack
            .last()
            .expect("view_stack should never be empty")
    }

    /// Push a view onto the view stack.
    ///
    pub fn push_view(&mut self, view: View) -> &mut Self {
        self.view_stack.push(view);
        self
    }

    /// Pop a view from the view stack.
    ///
    pub fn pop_view(&mut self) -> Option<View> {
        if self.view_stack.len() > 1 {
            self.view_stack.pop()
        } else {
            None
        }
    }

    // Boards

    /// Return the active board kind.
    ///
    pub fn active_board_kind(&self) -> BoardKind {
        self.active_board
    }

    /// Switch to the given board, requesting a load if it has not been
    /// fetched yet. Selection is reset; an in-flight drag is abandoned.
    ///
    pub fn select_board(&mut self, kind: BoardKind) -> &mut Self {
        if self.active_board == kind {
            return self;
        }
        self.drag.cancel();
        self.active_board = kind;
        self.selected_column = 0;
        self.selected_task = 0;
        if !self.boards.contains_key(&kind) {
            self.loading = true;
            self.dispatch(SyncEvent::LoadBoard { kind });
        }
        self
    }

    /// Install a fetched board store.
    ///
    pub fn set_board(&mut self, kind: BoardKind, store: BoardStore) -> &mut Self {
        self.boards.insert(kind, store);
        if kind == self.active_board {
            self.loading = false;
            self.selected_column = 0;
            self.selected_task = 0;
        }
        self
    }

    /// Return whether the board has been fetched.
    ///
    pub fn has_board(&self, kind: BoardKind) -> bool {
        self.boards.contains_key(&kind)
    }

    /// Return the active board store.
    ///
    pub fn board(&self) -> Option<&BoardStore> {
        self.boards.get(&self.active_board)
    }

    // Filtered views

    /// Return the filters currently applied.
    ///
    pub fn get_filters(&self) -> &TaskFilters {
        &self.filters
    }

    /// Return the filtered tasks-by-column view of the active board.
    ///
    pub fn visible_tasks(&self) -> HashMap<String, Vec<Task>> {
        match self.board() {
            Some(store) => filter_board(store, &self.filters),
            None => HashMap::new(),
        }
    }

    /// Return the columns to display, in board order. While filters are
    /// active, columns emptied by them are hidden; otherwise all columns
    /// show.
    ///
    pub fn visible_columns(&self) -> Vec<Column> {
        let store = match self.board() {
            Some(store) => store,
            None => return vec![],
        };
        if self.filters.is_empty() {
            return store.columns().to_vec();
        }
        let visible = self.visible_tasks();
        let populated: Vec<Column> = store
            .columns()
            .iter()
            .filter(|c| visible.get(&c.id).map(|t| !t.is_empty()).unwrap_or(false))
            .cloned()
            .collect();
        if populated.is_empty() {
            store.columns().to_vec()
        } else {
            populated
        }
    }

    // Selection

    pub fn selected_column_index(&self) -> usize {
        self.selected_column
    }

    pub fn selected_task_index(&self) -> usize {
        self.selected_task
    }

    /// Navigate to the next column, wrapping.
    ///
    pub fn next_column(&mut self) -> &mut Self {
        let count = self.visible_columns().len();
        if count == 0 {
            return self;
        }
        self.selected_column = (self.selected_column + 1) % count;
        self.selected_task = 0;
        self
    }

    /// Navigate to the previous column, wrapping.
    ///
    pub fn previous_column(&mut self) -> &mut Self {
        let count = self.visible_columns().len();
        if count == 0 {
            return self;
        }
        self.selected_column = if self.selected_column > 0 {
            self.selected_column - 1
        } else {
            count - 1
        };
        self.selected_task = 0;
        self
    }

    /// Navigate to the next task in the selected column, wrapping.
    ///
    pub fn next_task(&mut self) -> &mut Self {
        let count = self.selected_column_task_count();
        if count == 0 {
            self.selected_task = 0;
            return self;
        }
        self.selected_task = (self.selected_task + 1) % count;
        self
    }

    /// Navigate to the previous task in the selected column, wrapping.
    ///
    pub fn previous_task(&mut self) -> &mut Self {
        let count = self.selected_column_task_count();
        if count == 0 {
            self.selected_task = 0;
            return self;
        }
        self.selected_task = if self.selected_task > 0 {
            self.selected_task - 1
        } else {
            count - 1
        };
        self
    }

    /// Return the column currently selected, if any.
    ///
    pub fn selected_column_id(&self) -> Option<String> {
        self.visible_columns()
            .get(self.selected_column)
            .map(|c| c.id.to_owned())
    }

    /// Return the task currently selected, if any.
    ///
    pub fn selected_task(&self) -> Option<Task> {
        let column_id = self.selected_column_id()?;
        self.visible_tasks()
            .get(&column_id)?
            .get(self.selected_task)
            .cloned()
    }

    fn selected_column_task_count(&self) -> usize {
        match self.selected_column_id() {
            Some(column_id) => self
                .visible_tasks()
                .get(&column_id)
                .map(|t| t.len())
                .unwrap_or(0),
            None => 0,
        }
    }

    // Keyboard repositioning

    /// Move the selected task to the adjacent column (delta -1 or 1),
    /// landing at the end of the destination list.
    ///
    pub fn move_selected_task_sideways(&mut self, delta: isize) -> &mut Self {
        let task = match self.selected_task() {
            Some(task) => task,
            None => return self,
        };
        let columns = self.visible_columns();
        let target = self.selected_column as isize + delta;
        if target < 0 || target as usize >= columns.len() {
            return self;
        }
        let dest = columns[target as usize].id.to_owned();
        let index = match self.boards.get_mut(&self.active_board) {
            Some(store) => {
                let index = store.column_tasks(&dest).len();
                store.move_task_to_column(&task.id, &dest, index);
                index
            }
            None => return self,
        };
        self.selected_column = target as usize;
        self.selected_task = index;
        self.dispatch(SyncEvent::TaskMoved {
            task_id: task.id,
            to_column: dest,
            index,
        });
        self
    }

    /// Reorder the selected task within its column (delta -1 or 1).
    ///
    pub fn move_selected_task_vertically(&mut self, delta: isize) -> &mut Self {
        let task = match self.selected_task() {
            Some(task) => task,
            None => return self,
        };
        let (column_id, from) = match self.board().and_then(|s| {
            s.task_position(&task.id)
                .map(|(c, i)| (c.to_owned(), i))
        }) {
            Some(found) => found,
            None => return self,
        };
        let to = from as isize + delta;
        if to < 0 {
            return self;
        }
        let to = to as usize;
        if let Some(store) = self.boards.get_mut(&self.active_board) {
            if to >= store.column_tasks(&column_id).len() {
                return self;
            }
            store.move_task_within(&column_id, from, to);
        }
        self.selected_task = to;
        self.dispatch(SyncEvent::TaskMoved {
            task_id: task.id,
            to_column: column_id,
            index: to,
        });
        self
    }

    // Drag and drop

    /// Return the droppable registry for the render pass to rebuild.
    ///
    pub fn droppables_mut(&mut self) -> &mut DroppableMap {
        &mut self.droppables
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn active_drag(&self) -> Option<&DragId> {
        self.drag.active()
    }

    /// Return the dragged rectangle following the pointer, for the ghost.
    ///
    pub fn ghost_rect(&self) -> Option<Rect> {
        self.drag.translated_rect(self.pointer)
    }

    /// Return the display name of the entity being dragged.
    ///
    pub fn dragged_name(&self) -> Option<String> {
        let active = self.drag.active()?;
        let store = self.board()?;
        match active {
            DragId::Column(id) => store
                .columns()
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.name.to_owned()),
            DragId::Task(id) => store
                .tasks()
                .values()
                .flatten()
                .find(|t| &t.id == id)
                .map(|t| t.name.to_owned()),
        }
    }

    /// Begin a drag on whatever droppable sits under the pointer.
    ///
    pub fn pointer_down(&mut self, x: u16, y: u16) -> &mut Self {
        self.pointer = (x, y);
        if !matches!(self.current_view(), View::Board) {
            return self;
        }
        let hit = match self.droppables.hit_test(x, y) {
            Some(droppable) => droppable,
            None => return self,
        };
        let (drag_id, rect) = match &hit.target {
            crate::dnd::DropTarget::Task(id) => (DragId::Task(id.to_owned()), hit.rect),
            crate::dnd::DropTarget::Column(id) => (DragId::Column(id.to_owned()), hit.rect),
        };
        self.drag.on_drag_start(drag_id, rect, (x, y));
        self
    }

    /// Process pointer movement while dragging.
    ///
    pub fn pointer_drag(&mut self, x: u16, y: u16) -> &mut Self {
        self.pointer = (x, y);
        if !self.drag.is_dragging() {
            return self;
        }
        if let Some(store) = self.boards.get_mut(&self.active_board) {
            self.drag.on_drag_over(store, &self.droppables, (x, y));
        }
        self
    }

    /// Finish the gesture and dispatch the committed outcome, if any.
    ///
    pub fn pointer_up(&mut self, x: u16, y: u16) -> &mut Self {
        self.pointer = (x, y);
        let outcome = match self.boards.get_mut(&self.active_board) {
            Some(store) => self.drag.on_drag_end(store, &self.droppables, (x, y)),
            None => None,
        };
        match outcome {
            Some(DragOutcome::TaskMoved {
                task_id,
                to_column,
                index,
            }) => {
                self.dispatch(SyncEvent::TaskMoved {
                    task_id,
                    to_column,
                    index,
                });
            }
            Some(DragOutcome::ColumnMoved { column_id, index }) => {
                self.dispatch(SyncEvent::ColumnMoved { column_id, index });
            }
            None => {}
        }
        self.clamp_selection();
        self
    }

    /// Abandon an in-flight gesture.
    ///
    pub fn cancel_drag(&mut self) -> &mut Self {
        self.drag.cancel();
        self
    }

    /// Event-loop tick: advance the spinner and let the drag bookkeeping
    /// settle.
    ///
    pub fn tick(&mut self) -> &mut Self {
        self.advance_spinner_index();
        self.drag.settle();
        self
    }

    fn clamp_selection(&mut self) {
        let columns = self.visible_columns().len();
        if columns == 0 {
            self.selected_column = 0;
            self.selected_task = 0;
            return;
        }
        if self.selected_column >= columns {
            self.selected_column = columns - 1;
        }
        let tasks = self.selected_column_task_count();
        if tasks == 0 {
            self.selected_task = 0;
        } else if self.selected_task >= tasks {
            self.selected_task = tasks - 1;
        }
    }

    // Search and filters

    /// Enter search mode.
    ///
    pub fn enter_search_mode(&mut self) -> &mut Self {
        self.search_mode = true;
        self
    }

    /// Leave search input while keeping the query applied.
    ///
    pub fn confirm_search(&mut self) -> &mut Self {
        self.search_mode = false;
        self
    }

    /// Exit search mode, clearing the query.
    ///
    pub fn exit_search_mode(&mut self) -> &mut Self {
        self.search_mode = false;
        self.filters.name_query.clear();
        self.clamp_selection();
        self
    }

    /// Check if in search mode.
    ///
    pub fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    /// Get search query.
    ///
    pub fn get_search_query(&self) -> &str {
        &self.filters.name_query
    }

    /// Add a character to the search query.
    ///
    pub fn add_search_char(&mut self, c: char) -> &mut Self {
        self.filters.name_query.push(c);
        self.clamp_selection();
        self
    }

    /// Remove the last character from the search query.
    ///
    pub fn remove_search_char(&mut self) -> &mut Self {
        self.filters.name_query.pop();
        self.clamp_selection();
        self
    }

    /// Cycle the priority filter through none and each priority.
    ///
    pub fn cycle_priority_filter(&mut self) -> &mut Self {
        self.filters.priorities = match self.filters.priorities.first() {
            None => vec![Priority::Low],
            Some(Priority::Low) => vec![Priority::Medium],
            Some(Priority::Medium) => vec![Priority::High],
            Some(Priority::High) => vec![Priority::Urgent],
            Some(Priority::Urgent) => vec![],
        };
        self.clamp_selection();
        self
    }

    /// Cycle the status filter through none and each status.
    ///
    pub fn cycle_status_filter(&mut self) -> &mut Self {
        self.filters.statuses = match self.filters.statuses.first() {
            None => vec![Status::Open],
            Some(Status::Open) => vec![Status::InProgress],
            Some(Status::InProgress) => vec![Status::Resolved],
            Some(Status::Resolved) => vec![Status::Closed],
            Some(Status::Closed) => vec![],
        };
        self.clamp_selection();
        self
    }

    /// Toggle filtering to tasks assigned to the operator.
    ///
    pub fn toggle_mine_filter(&mut self) -> &mut Self {
        if self.filters.assignee_ids.is_empty() {
            self.filters.assignee_ids = vec![self.operator.id.to_owned()];
        } else {
            self.filters.assignee_ids.clear();
        }
        self.clamp_selection();
        self
    }

    // Create forms

    /// Open the create-task form targeting the selected column.
    ///
    pub fn open_create_task(&mut self) -> &mut Self {
        let target = match self.selected_column_id() {
            Some(column_id) => column_id,
            None => return self,
        };
        self.form_name.clear();
        self.form_description_textarea = TextArea::default();
        self.form_field = FormField::Name;
        self.form_target_column = Some(target);
        self.push_view(View::CreateTask);
        self
    }

    /// Open the create-column form.
    ///
    pub fn open_create_column(&mut self) -> &mut Self {
        if self.board().is_none() {
            return self;
        }
        self.form_name.clear();
        self.form_field = FormField::Name;
        self.push_view(View::CreateColumn);
        self
    }

    /// Close the open form without submitting.
    ///
    pub fn close_form(&mut self) -> &mut Self {
        self.form_target_column = None;
        self.pop_view();
        self
    }

    pub fn get_form_name(&self) -> &str {
        &self.form_name
    }

    /// Return the column the create-task form will insert into.
    ///
    pub fn get_form_target_column(&self) -> Option<&str> {
        self.form_target_column.as_deref()
    }

    pub fn add_form_name_char(&mut self, c: char) -> &mut Self {
        self.form_name.push(c);
        self
    }

    pub fn remove_form_name_char(&mut self) -> &mut Self {
        self.form_name.pop();
        self
    }

    pub fn get_form_field(&self) -> FormField {
        self.form_field
    }

    pub fn next_form_field(&mut self) -> &mut Self {
        self.form_field = self.form_field.next();
        self
    }

    /// Get form description textarea (mutable).
    ///
    pub fn get_form_description_textarea(&mut self) -> &mut TextArea<'static> {
        &mut self.form_description_textarea
    }

    /// Get form description as string.
    ///
    pub fn get_form_description(&self) -> String {
        self.form_description_textarea
            .lines()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Submit the create-task form: insert the task at the end of the
    /// target column and dispatch the creation. No-op on an empty name.
    ///
    pub fn submit_create_task(&mut self) -> &mut Self {
        if self.form_name.trim().is_empty() {
            return self;
        }
        let column_id = match self.form_target_column.take() {
            Some(column_id) => column_id,
            None => return self,
        };
        let task = Task {
            id: format!("task-{}", chrono::Utc::now().timestamp_millis()),
            name: self.form_name.trim().to_owned(),
            description: self.get_form_description(),
            status: Status::Open,
            priority: Priority::Medium,
            assignees: vec![],
            reporter: self.operator.to_owned(),
            labels: vec![],
            comments: vec![],
            attachments: vec![],
            due: None,
        };
        let board = self.active_board;
        if let Some(store) = self.boards.get_mut(&self.active_board) {
            store.insert_task(&column_id, task.to_owned());
        }
        self.dispatch(SyncEvent::TaskCreated {
            board,
            column_id,
            name: task.name,
            description: task.description,
        });
        self.pop_view();
        self
    }

    /// Submit the create-column form: append the column and dispatch the
    /// creation. No-op on an empty name.
    ///
    pub fn submit_create_column(&mut self) -> &mut Self {
        if self.form_name.trim().is_empty() {
            return self;
        }
        let column = Column {
            id: format!("col-{}", chrono::Utc::now().timestamp_millis()),
            name: self.form_name.trim().to_owned(),
        };
        let board = self.active_board;
        if let Some(store) = self.boards.get_mut(&self.active_board) {
            store.add_column(column.to_owned());
        }
        self.dispatch(SyncEvent::ColumnCreated {
            board,
            name: column.name,
        });
        self.pop_view();
        self
    }

    // Log pane

    /// Toggle the log pane.
    ///
    pub fn toggle_log_pane(&mut self) -> &mut Self {
        self.show_log_pane = !self.show_log_pane;
        if !self.show_log_pane {
            self.debug_mode = false;
        }
        self
    }

    pub fn is_log_pane_shown(&self) -> bool {
        self.show_log_pane
    }

    /// Enter debug mode for navigating logs.
    ///
    pub fn enter_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = true;
        self.show_log_pane = true;
        if !self.debug_entries.is_empty() {
            self.debug_index = self.debug_entries.len() - 1;
        } else {
            self.debug_index = 0;
        }
        self
    }

    /// Exit debug mode.
    ///
    pub fn exit_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = false;
        self
    }

    /// Check if in debug mode.
    ///
    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Get current debug index.
    ///
    pub fn get_debug_index(&self) -> usize {
        self.debug_index
    }

    /// Navigate to next log entry.
    ///
    pub fn next_debug(&mut self) -> &mut Self {
        if !self.debug_entries.is_empty() {
            self.debug_index = (self.debug_index + 1) % self.debug_entries.len();
        }
        self
    }

    /// Navigate to previous log entry.
    ///
    pub fn previous_debug(&mut self) -> &mut Self {
        if !self.debug_entries.is_empty() {
            if self.debug_index == 0 {
                self.debug_index = self.debug_entries.len() - 1;
            } else {
                self.debug_index -= 1;
            }
        }
        self
    }

    /// Add a log entry to the debug buffer.
    ///
    pub fn add_log_entry(&mut self, entry: String) {
        self.debug_entries.push(entry);
        // Keep only the last 1000 log entries to bound memory
        if self.debug_entries.len() > 1000 {
            self.debug_entries.remove(0);
            if self.debug_index > 0 {
                self.debug_index -= 1;
            }
        }
        if !self.debug_entries.is_empty() {
            self.debug_index = self.debug_entries.len() - 1;
        }
    }

    /// Get debug entries for rendering (read-only access).
    ///
    pub fn get_debug_entries(&self) -> &[String] {
        &self.debug_entries
    }

    /// Dispatches an asynchronous sync event.
    ///
    pub fn dispatch(&self, event: SyncEvent) {
        if let Some(sync_sender) = &self.sync_sender {
            if let Err(err) = sync_sender.send(event) {
                error!("Received error from sync dispatch: {}", err);
            }
        }
    }
}
